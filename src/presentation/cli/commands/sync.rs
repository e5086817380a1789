use anyhow::Result;

use crate::application::use_cases::RepositorySynchronizer;
use crate::domain::value_objects::{SyncOperation, SyncTrigger};
use crate::presentation::cli::context::CommandContext;
use crate::presentation::cli::output::{print_operation_rows, OperationRow};

/// Which sync operation the command runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMode {
    /// Pick clone or init from the working copy state
    Startup,
    /// Run one operation regardless of the working copy state
    Only(SyncOperation),
}

/// Handler for the sync, clone, init and pull commands
pub struct SyncCommand {
    context: CommandContext,
    mode: SyncMode,
}

impl SyncCommand {
    pub fn new(context: CommandContext, mode: SyncMode) -> Self {
        Self { context, mode }
    }

    pub async fn execute(&self) -> Result<bool> {
        let repositories = self.context.load_repositories().await?;
        let synchronizer = RepositorySynchronizer::new(self.context.runner());

        let mut rows = Vec::with_capacity(repositories.len());
        for repo in &repositories {
            let (operation, status) = match self.mode {
                SyncMode::Startup => {
                    let outcome = synchronizer.synchronize(repo, SyncTrigger::Startup).await;
                    (outcome.operation, outcome.status)
                }
                SyncMode::Only(operation) => (operation, synchronizer.execute(repo, operation).await),
            };
            rows.push(OperationRow {
                repository: repo.display_name(),
                operation: operation.to_string(),
                status,
            });
        }

        print_operation_rows(self.context.output, &rows)?;
        Ok(rows.iter().all(|row| row.status == 0))
    }
}
