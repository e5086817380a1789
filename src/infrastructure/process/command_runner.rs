use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use thiserror::Error;
use tokio::process::Command;
use tracing::debug;

use super::environment::ExecutionEnvironment;
use crate::domain::value_objects::Platform;

/// Exit code reported when a child has no exit status (killed by a signal)
/// or could not be started at all
pub const UNKNOWN_EXIT_CODE: i32 = -1;

/// Command runner errors
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("Failed to spawn '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

/// One command invocation: command string, working directory, environment and
/// stderr handling
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandSpec {
    /// Command string passed to the shell
    pub command: String,

    /// Working directory; the caller's current directory when `None`
    pub working_directory: Option<PathBuf>,

    /// Replacement environment; inherited from the caller when `None`
    pub environment: Option<ExecutionEnvironment>,

    /// Send the child's stderr to the null device
    pub suppress_stderr: bool,
}

impl CommandSpec {
    /// Create a new command spec
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            ..Self::default()
        }
    }

    /// Set working directory
    pub fn with_working_directory<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.working_directory = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Set the child environment
    pub fn with_environment(mut self, environment: ExecutionEnvironment) -> Self {
        self.environment = Some(environment);
        self
    }

    /// Set whether stderr is discarded
    pub fn with_suppressed_stderr(mut self, suppress: bool) -> Self {
        self.suppress_stderr = suppress;
        self
    }

    /// Same settings, different command
    pub fn for_command(&self, command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            ..self.clone()
        }
    }
}

/// Runs a single command and reports its exit code
///
/// A non-zero exit code is a normal result, not an error. `Err` is reserved
/// for commands that could not be started.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, spec: &CommandSpec) -> Result<i32, ProcessError>;
}

/// Runs commands through the platform shell (`sh -c` / `cmd /C`)
///
/// Stdout is always inherited. Each call spawns exactly one process and waits
/// for it; there is no timeout, so a hung child blocks the caller.
#[derive(Debug, Clone)]
pub struct ShellCommandRunner {
    platform: Platform,
}

impl Default for ShellCommandRunner {
    fn default() -> Self {
        Self::new(Platform::detect())
    }
}

impl ShellCommandRunner {
    pub fn new(platform: Platform) -> Self {
        Self { platform }
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    fn build_command(&self, spec: &CommandSpec) -> Command {
        let (shell, flag) = self.platform.shell();
        let mut cmd = Command::new(shell);
        cmd.arg(flag).arg(&spec.command);

        if let Some(dir) = &spec.working_directory {
            cmd.current_dir(dir);
        }

        if let Some(environment) = &spec.environment {
            cmd.env_clear();
            cmd.envs(environment.resolved());
        }

        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::inherit());
        cmd.stderr(if spec.suppress_stderr {
            Stdio::null()
        } else {
            Stdio::inherit()
        });
        cmd
    }
}

#[async_trait]
impl CommandRunner for ShellCommandRunner {
    async fn run(&self, spec: &CommandSpec) -> Result<i32, ProcessError> {
        debug!(
            command = %spec.command,
            cwd = ?spec.working_directory,
            suppress_stderr = spec.suppress_stderr,
            "spawning command"
        );

        let status = self
            .build_command(spec)
            .status()
            .await
            .map_err(|source| ProcessError::SpawnFailed {
                command: spec.command.clone(),
                source,
            })?;

        let exit_code = status.code().unwrap_or(UNKNOWN_EXIT_CODE);
        debug!(command = %spec.command, exit_code, "command finished");
        Ok(exit_code)
    }
}
