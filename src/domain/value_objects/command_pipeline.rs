use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered list of shell commands executed one after another
///
/// A pipeline is built fresh for every operation and is never shared.
/// Execution stops at the first command that exits non-zero; an empty
/// pipeline succeeds without running anything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommandPipeline {
    commands: Vec<String>,
}

impl CommandPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a command
    pub fn push(&mut self, command: impl Into<String>) {
        self.commands.push(command.into());
    }

    /// Append a command only when one is configured
    pub fn push_optional(&mut self, command: Option<&str>) {
        if let Some(command) = command {
            self.push(command);
        }
    }

    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.commands.iter()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl From<Vec<String>> for CommandPipeline {
    fn from(commands: Vec<String>) -> Self {
        Self { commands }
    }
}

impl<'a> IntoIterator for &'a CommandPipeline {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter()
    }
}

impl fmt::Display for CommandPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, command) in self.commands.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            write!(f, "{}. {}", index + 1, command)?;
        }
        Ok(())
    }
}
