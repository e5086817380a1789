use anyhow::Result;

use crate::application::use_cases::TransportConfigurator;
use crate::presentation::cli::context::CommandContext;
use crate::presentation::cli::output::{print_operation_rows, OperationRow};

/// Handler for the load-key command
pub struct LoadKeyCommand {
    context: CommandContext,
}

impl LoadKeyCommand {
    pub fn new(context: CommandContext) -> Self {
        Self { context }
    }

    pub async fn execute(&self) -> Result<bool> {
        let repositories = self.context.load_repositories().await?;
        let configurator = TransportConfigurator::new(self.context.runner());

        let mut rows = Vec::with_capacity(repositories.len());
        for repo in &repositories {
            let status = configurator.load_key(repo).await;
            rows.push(OperationRow {
                repository: repo.display_name(),
                operation: "load-key".to_string(),
                status,
            });
        }

        print_operation_rows(self.context.output, &rows)?;
        Ok(rows.iter().all(|row| row.status == 0))
    }
}
