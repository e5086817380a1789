use anyhow::Result;

use crate::application::use_cases::AutoDeployUseCase;
use crate::domain::value_objects::SyncTrigger;
use crate::presentation::cli::context::CommandContext;
use crate::presentation::cli::output::print_reports;

/// Handler for the trigger command
pub struct TriggerCommand {
    context: CommandContext,
    trigger: SyncTrigger,
}

impl TriggerCommand {
    pub fn new(context: CommandContext, trigger: SyncTrigger) -> Self {
        Self { context, trigger }
    }

    pub async fn execute(&self) -> Result<bool> {
        let repositories = self.context.load_repositories().await?;
        let use_case = AutoDeployUseCase::new(self.context.runner());

        let mut reports = Vec::with_capacity(repositories.len());
        for repo in &repositories {
            reports.push(use_case.execute(repo, self.trigger).await);
        }

        print_reports(self.context.output, &reports)?;
        Ok(reports.iter().all(|report| report.is_success()))
    }
}
