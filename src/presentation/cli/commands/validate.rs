use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use crate::presentation::cli::context::CommandContext;
use crate::presentation::cli::output::print_structured;

#[derive(Debug, Serialize)]
struct RepositorySummary {
    url: String,
    remote: String,
    branch: String,
    tracking: String,
    path: Option<String>,
    ssh_key: bool,
    deploy_commands: usize,
}

/// Handler for the validate command
pub struct ValidateCommand {
    context: CommandContext,
}

impl ValidateCommand {
    pub fn new(context: CommandContext) -> Self {
        Self { context }
    }

    pub async fn execute(&self) -> Result<bool> {
        let config = self.context.load_config().await?;
        let repositories = self.context.select(&config)?;

        let summaries: Vec<RepositorySummary> = repositories
            .iter()
            .map(|repo| RepositorySummary {
                url: repo.url.clone(),
                remote: repo.remote.clone(),
                branch: repo.branch.clone(),
                tracking: repo.tracking_ref(),
                path: repo.path().map(|path| path.display().to_string()),
                ssh_key: repo.ssh_key.is_some(),
                deploy_commands: repo.effective_deploy_commands().len(),
            })
            .collect();

        if print_structured(self.context.output, &summaries)? {
            return Ok(true);
        }

        println!(
            "{} {} is valid ({} repositories)",
            "✓".green().bold(),
            self.context.config_path.display(),
            config.repositories.len()
        );
        for summary in &summaries {
            print!("  {} {}", summary.url.bold(), summary.tracking.blue());
            match &summary.path {
                Some(path) => print!(" -> {}", path),
                None => print!(" -> {}", "no path".dimmed()),
            }
            if self.context.verbose {
                print!(
                    " [ssh key: {}, deploy commands: {}]",
                    if summary.ssh_key { "yes" } else { "no" },
                    summary.deploy_commands
                );
            }
            println!();
        }

        Ok(true)
    }
}
