//! Transport overlay that routes git's SSH connections through a given key.

use std::path::Path;

use super::commands::quote_posix;
use crate::domain::value_objects::CommandPipeline;
use crate::infrastructure::process::ExecutionEnvironment;

/// Environment variable git uses to pick the SSH invocation
pub const GIT_SSH_COMMAND_VAR: &str = "GIT_SSH_COMMAND";

/// SSH invocation that uses `key` and skips host key verification
///
/// git runs this value through `sh`, so the key path is quoted POSIX-style
/// on every platform.
pub fn ssh_command_for_key(key: &Path) -> String {
    let key = key.to_string_lossy();
    format!(
        "ssh -i {} -o UserKnownHostsFile=/dev/null -o StrictHostKeyChecking=no",
        quote_posix(&key)
    )
}

/// Overlay `environment` with the transport command when a key is configured
pub fn apply_transport_overlay(
    environment: ExecutionEnvironment,
    ssh_key: Option<&Path>,
) -> ExecutionEnvironment {
    match ssh_key {
        Some(key) => environment.with_var(GIT_SSH_COMMAND_VAR, ssh_command_for_key(key)),
        None => environment,
    }
}

/// Commands that clear and then export the transport override in a shell
pub fn load_key_pipeline(key: &Path) -> CommandPipeline {
    let mut pipeline = CommandPipeline::new();
    pipeline.push(format!("unset {}", GIT_SSH_COMMAND_VAR));
    pipeline.push(format!(
        "export {}={}",
        GIT_SSH_COMMAND_VAR,
        quote_posix(&ssh_command_for_key(key))
    ));
    pipeline
}
