use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use crate::application::use_cases::RepositorySynchronizer;
use crate::common::result::OptionExt;
use crate::domain::entities::RepositoryConfig;
use crate::domain::value_objects::{CommandPipeline, Platform, SyncOperation, SyncTrigger};
use crate::infrastructure::git::load_key_pipeline;
use crate::presentation::cli::context::CommandContext;
use crate::presentation::cli::output::print_structured;

#[derive(Debug, Serialize)]
struct PlanRow {
    repository: String,
    operation: SyncOperation,
    load_key: CommandPipeline,
    sync: CommandPipeline,
    deploy: CommandPipeline,
}

/// Handler for the plan command: prints pipelines without running them
pub struct PlanCommand {
    context: CommandContext,
    operation: Option<SyncOperation>,
    trigger: SyncTrigger,
    platform: Option<Platform>,
}

impl PlanCommand {
    pub fn new(
        context: CommandContext,
        operation: Option<SyncOperation>,
        trigger: SyncTrigger,
        platform: Option<Platform>,
    ) -> Self {
        Self {
            context,
            operation,
            trigger,
            platform,
        }
    }

    pub async fn execute(&self) -> Result<bool> {
        let repositories = self.context.load_repositories().await?;

        // The runner is never called here
        let mut synchronizer = RepositorySynchronizer::new(self.context.runner());
        if let Some(platform) = self.platform {
            synchronizer = synchronizer.with_platform(platform);
        }

        let rows = repositories
            .iter()
            .map(|repo| self.plan_repository(&synchronizer, repo))
            .collect::<Result<Vec<_>>>()?;

        if print_structured(self.context.output, &rows)? {
            return Ok(true);
        }

        println!(
            "{} Plan for {} platform",
            "::".blue().bold(),
            synchronizer.platform()
        );
        for row in &rows {
            println!("{} ({})", row.repository.bold(), row.operation.to_string().cyan());
            print_section("load key", &row.load_key);
            print_section("sync", &row.sync);
            print_section("deploy", &row.deploy);
        }
        Ok(true)
    }

    fn plan_repository(
        &self,
        synchronizer: &RepositorySynchronizer,
        repo: &RepositoryConfig,
    ) -> Result<PlanRow> {
        let operation = match self.operation {
            Some(operation) => {
                repo.path()
                    .ok_or_validation_error("path", format!("{} has no path to {}", repo.url, operation))?;
                operation
            }
            None => synchronizer.select_operation(repo, self.trigger),
        };

        let load_key = match repo.ssh_key.as_deref() {
            Some(key) => load_key_pipeline(key),
            None => CommandPipeline::new(),
        };

        Ok(PlanRow {
            repository: repo.display_name(),
            operation,
            load_key,
            sync: synchronizer.plan(repo, operation),
            deploy: CommandPipeline::from(repo.effective_deploy_commands()),
        })
    }
}

fn print_section(title: &str, pipeline: &CommandPipeline) {
    if pipeline.is_empty() {
        return;
    }
    println!("  {}:", title.dimmed());
    for line in pipeline.to_string().lines() {
        println!("    {}", line);
    }
}
