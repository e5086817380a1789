use anyhow::Result;

use crate::application::use_cases::DeployExecutor;
use crate::presentation::cli::context::CommandContext;
use crate::presentation::cli::output::{print_deploy_rows, DeployRow};

/// Handler for the deploy command
pub struct DeployCommand {
    context: CommandContext,
}

impl DeployCommand {
    pub fn new(context: CommandContext) -> Self {
        Self { context }
    }

    pub async fn execute(&self) -> Result<bool> {
        let repositories = self.context.load_repositories().await?;
        let executor = DeployExecutor::new(self.context.runner());

        let mut rows = Vec::with_capacity(repositories.len());
        for repo in &repositories {
            let statuses = executor.deploy(repo).await;
            rows.push(DeployRow {
                repository: repo.display_name(),
                commands: repo.effective_deploy_commands(),
                statuses,
            });
        }

        print_deploy_rows(self.context.output, &rows)?;
        Ok(rows.iter().all(DeployRow::is_success))
    }
}
