pub mod commands;
pub mod ssh;
pub mod working_copy;

// Re-export main types for convenience
pub use commands::{quote, GitCommands, GIT_DIR_VAR};
pub use ssh::{apply_transport_overlay, load_key_pipeline, ssh_command_for_key, GIT_SSH_COMMAND_VAR};
pub use working_copy::inspect_working_copy;
