pub mod command_runner;
pub mod environment;

pub use command_runner::{CommandRunner, CommandSpec, ProcessError, ShellCommandRunner, UNKNOWN_EXIT_CODE};
pub use environment::ExecutionEnvironment;

#[cfg(test)]
pub use command_runner::MockCommandRunner;
