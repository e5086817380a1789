//! Recording command runner
//!
//! Records every `CommandSpec` it receives and answers with scripted exit
//! codes. Commands can be scripted by prefix, and a command can be told to
//! create a directory when it "runs" so that post-sync checks see a working
//! copy.

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use git_autodeploy::infrastructure::process::{CommandRunner, CommandSpec, ProcessError};

#[derive(Debug, Clone)]
struct Script {
    prefix: String,
    exit_code: i32,
    creates: Option<PathBuf>,
}

/// Command runner that never spawns anything
#[derive(Debug, Clone, Default)]
pub struct RecordingRunner {
    calls: Arc<Mutex<Vec<CommandSpec>>>,
    scripts: Arc<Mutex<Vec<Script>>>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands starting with `prefix` exit with `exit_code`
    pub fn fail_on(self, prefix: &str, exit_code: i32) -> Self {
        self.scripts.lock().unwrap().push(Script {
            prefix: prefix.to_string(),
            exit_code,
            creates: None,
        });
        self
    }

    /// Commands starting with `prefix` succeed and create `dir`
    pub fn create_on(self, prefix: &str, dir: impl Into<PathBuf>) -> Self {
        self.scripts.lock().unwrap().push(Script {
            prefix: prefix.to_string(),
            exit_code: 0,
            creates: Some(dir.into()),
        });
        self
    }

    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.lock().unwrap().clone()
    }

    pub fn commands(&self) -> Vec<String> {
        self.calls().into_iter().map(|spec| spec.command).collect()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn as_runner(&self) -> Arc<dyn CommandRunner> {
        Arc::new(self.clone())
    }
}

#[async_trait]
impl CommandRunner for RecordingRunner {
    async fn run(&self, spec: &CommandSpec) -> Result<i32, ProcessError> {
        self.calls.lock().unwrap().push(spec.clone());

        let scripts = self.scripts.lock().unwrap().clone();
        match scripts.iter().find(|script| spec.command.starts_with(&script.prefix)) {
            Some(script) => {
                if let Some(dir) = &script.creates {
                    std::fs::create_dir_all(dir).expect("Failed to create scripted directory");
                }
                Ok(script.exit_code)
            }
            None => Ok(0),
        }
    }
}
