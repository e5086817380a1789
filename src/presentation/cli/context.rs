use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;

use super::output::OutputFormat;
use crate::domain::entities::{AutodeployConfig, RepositoryConfig};
use crate::infrastructure::filesystem::ConfigStore;
use crate::infrastructure::process::{CommandRunner, ShellCommandRunner};

/// Settings shared by every subcommand
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub config_path: PathBuf,
    pub output: OutputFormat,
    pub url: Option<String>,
    pub branch: Option<String>,
    pub verbose: bool,
}

impl CommandContext {
    /// Load and validate the config file
    pub async fn load_config(&self) -> Result<AutodeployConfig> {
        let config = ConfigStore::new().load(&self.config_path).await?;
        Ok(config)
    }

    /// Load the config and apply the `--url` / `--branch` filters
    pub async fn load_repositories(&self) -> Result<Vec<RepositoryConfig>> {
        let config = self.load_config().await?;
        self.select(&config)
    }

    /// Repositories matching the filters. Fails when nothing matches.
    pub fn select(&self, config: &AutodeployConfig) -> Result<Vec<RepositoryConfig>> {
        let branch = self.branch.as_deref();
        let selected: Vec<RepositoryConfig> = match self.url.as_deref() {
            Some(url) => config.matching(url, branch).into_iter().cloned().collect(),
            None => config
                .repositories
                .iter()
                .filter(|repo| branch.map_or(true, |branch| repo.branch == branch))
                .cloned()
                .collect(),
        };

        if selected.is_empty() {
            return Err(anyhow::anyhow!(
                "No repository in {} matches url={} branch={}",
                self.config_path.display(),
                self.url.as_deref().unwrap_or("*"),
                self.branch.as_deref().unwrap_or("*")
            ));
        }

        Ok(selected)
    }

    pub fn runner(&self) -> Arc<dyn CommandRunner> {
        Arc::new(ShellCommandRunner::default())
    }
}
