use tracing::{debug, error};

use crate::domain::value_objects::CommandPipeline;
use crate::infrastructure::process::{CommandRunner, CommandSpec, UNKNOWN_EXIT_CODE};

/// Run a pipeline strictly in order, stopping at the first non-zero exit code
///
/// Every command is started from `template` (working directory, environment,
/// stderr handling). Returns the failing command's exit code, or 0 when all
/// commands succeed. An empty pipeline succeeds without running anything.
/// A command that cannot be started counts as a failure with
/// [`UNKNOWN_EXIT_CODE`].
pub async fn run_fail_fast(
    runner: &dyn CommandRunner,
    pipeline: &CommandPipeline,
    template: &CommandSpec,
) -> i32 {
    for command in pipeline {
        let exit_code = run_one(runner, template.for_command(command.as_str())).await;
        if exit_code != 0 {
            error!("Command '{}' failed with exit code {}", command, exit_code);
            return exit_code;
        }
    }
    0
}

/// Run every command regardless of failures and collect the exit codes in order
pub async fn run_all(
    runner: &dyn CommandRunner,
    commands: &[String],
    template: &CommandSpec,
) -> Vec<i32> {
    let mut statuses = Vec::with_capacity(commands.len());
    for command in commands {
        let exit_code = run_one(runner, template.for_command(command.as_str())).await;
        if exit_code != 0 {
            error!("Command '{}' failed with exit code {}", command, exit_code);
        }
        statuses.push(exit_code);
    }
    statuses
}

async fn run_one(runner: &dyn CommandRunner, spec: CommandSpec) -> i32 {
    debug!(command = %spec.command, "running");
    match runner.run(&spec).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            error!("{}", e);
            UNKNOWN_EXIT_CODE
        }
    }
}
