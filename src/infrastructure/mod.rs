/// Infrastructure layer modules
///
/// This layer provides concrete implementations for external system interactions:
/// - Process execution (shell command runner, execution environments)
/// - Git command templates, transport overlay and working copy inspection
/// - File system operations (config files)
pub mod filesystem;
pub mod git;
pub mod process;

// Re-export commonly used types
pub use filesystem::ConfigStore;
pub use git::GitCommands;
pub use process::{CommandRunner, CommandSpec, ExecutionEnvironment, ShellCommandRunner};
