pub mod commands;
pub mod context;
pub mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;
use std::process::exit;

use crate::domain::value_objects::{Platform, SyncOperation, SyncTrigger};
use crate::infrastructure::filesystem::DEFAULT_CONFIG_FILE;

use self::commands::{
    DeployCommand, LoadKeyCommand, PlanCommand, SyncCommand, SyncMode, TriggerCommand,
    ValidateCommand,
};
use self::context::CommandContext;
pub use self::output::OutputFormat;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GIT_HASH"),
    " ",
    env!("BUILD_DATE"),
    ")"
);

/// git-autodeploy - Keep git working copies in sync with a remote branch and deploy them
#[derive(Parser)]
#[command(name = "git-autodeploy")]
#[command(about = "Keep git working copies in sync with a remote branch and deploy them")]
#[command(version, long_version = LONG_VERSION)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Repository config file (YAML, or JSON with a .json extension)
    #[arg(
        short,
        long,
        global = true,
        env = "GIT_AUTODEPLOY_CONFIG",
        default_value = DEFAULT_CONFIG_FILE
    )]
    pub config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Output format (text, json, yaml)
    #[arg(short, long, global = true, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Only repositories with this remote URL
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Only repositories tracking this branch
    #[arg(long, global = true)]
    pub branch: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Sync operation names accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OperationArg {
    Clone,
    Init,
    Pull,
}

impl From<OperationArg> for SyncOperation {
    fn from(arg: OperationArg) -> Self {
        match arg {
            OperationArg::Clone => SyncOperation::Clone,
            OperationArg::Init => SyncOperation::Init,
            OperationArg::Pull => SyncOperation::Pull,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load and validate the config file, then list the selected repositories
    Validate,

    /// Startup synchronization: clone missing working copies, re-initialize existing ones
    Sync,

    /// Clone the selected repositories into their paths
    Clone,

    /// Point existing working copies at the configured remote and branch
    Init,

    /// Hard-reset existing working copies to the remote branch
    Pull,

    /// Export GIT_SSH_COMMAND for the configured SSH keys
    LoadKey,

    /// Run the deploy commands of the selected repositories
    Deploy,

    /// Webhook-style run: load the key, pull (or clone), then deploy
    Trigger {
        /// Treat this run as a startup sync (init instead of pull)
        #[arg(long)]
        startup: bool,
    },

    /// Print the commands that would run, without running them
    Plan {
        /// Plan this operation instead of picking one from the working copy state
        #[arg(long, value_enum)]
        operation: Option<OperationArg>,

        /// Pick operations as a startup sync would
        #[arg(long)]
        startup: bool,

        /// Target platform for the generated commands (posix, windows)
        #[arg(long)]
        platform: Option<Platform>,
    },
}

fn trigger_for(startup: bool) -> SyncTrigger {
    if startup {
        SyncTrigger::Startup
    } else {
        SyncTrigger::Webhook
    }
}

/// CLI application runner
pub struct CliApp {
    cli: Cli,
}

impl CliApp {
    pub fn new() -> Self {
        Self { cli: Cli::parse() }
    }

    pub fn is_verbose(&self) -> bool {
        self.cli.verbose
    }

    /// Run the selected command. Exits with status 1 on errors and when any
    /// selected repository failed.
    pub async fn run(self) -> anyhow::Result<()> {
        colored::control::set_override(!self.cli.no_color);

        match self.handle_command().await {
            Ok(true) => Ok(()),
            Ok(false) => exit(1),
            Err(e) => {
                eprintln!("{} {:#}", "Error:".red().bold(), e);
                exit(1);
            }
        }
    }

    fn context(&self) -> CommandContext {
        CommandContext {
            config_path: self.cli.config.clone(),
            output: self.cli.output,
            url: self.cli.url.clone(),
            branch: self.cli.branch.clone(),
            verbose: self.cli.verbose,
        }
    }

    async fn handle_command(&self) -> anyhow::Result<bool> {
        let context = self.context();
        match &self.cli.command {
            Commands::Validate => ValidateCommand::new(context).execute().await,
            Commands::Sync => SyncCommand::new(context, SyncMode::Startup).execute().await,
            Commands::Clone => {
                SyncCommand::new(context, SyncMode::Only(SyncOperation::Clone))
                    .execute()
                    .await
            }
            Commands::Init => {
                SyncCommand::new(context, SyncMode::Only(SyncOperation::Init))
                    .execute()
                    .await
            }
            Commands::Pull => {
                SyncCommand::new(context, SyncMode::Only(SyncOperation::Pull))
                    .execute()
                    .await
            }
            Commands::LoadKey => LoadKeyCommand::new(context).execute().await,
            Commands::Deploy => DeployCommand::new(context).execute().await,
            Commands::Trigger { startup } => {
                TriggerCommand::new(context, trigger_for(*startup))
                    .execute()
                    .await
            }
            Commands::Plan {
                operation,
                startup,
                platform,
            } => {
                PlanCommand::new(
                    context,
                    operation.map(SyncOperation::from),
                    trigger_for(*startup),
                    *platform,
                )
                .execute()
                .await
            }
        }
    }
}

impl Default for CliApp {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_global_options() {
        let cli = Cli::try_parse_from([
            "git-autodeploy",
            "deploy",
            "--config",
            "conf.json",
            "--output",
            "json",
            "--url",
            "git@host:r.git",
            "--branch",
            "main",
        ])
        .unwrap();

        assert_eq!(cli.config, PathBuf::from("conf.json"));
        assert_eq!(cli.output, OutputFormat::Json);
        assert_eq!(cli.url.as_deref(), Some("git@host:r.git"));
        assert_eq!(cli.branch.as_deref(), Some("main"));
        assert!(matches!(cli.command, Commands::Deploy));
    }

    #[test]
    fn test_parse_plan_options() {
        let cli = Cli::try_parse_from([
            "git-autodeploy",
            "plan",
            "--operation",
            "clone",
            "--platform",
            "windows",
        ])
        .unwrap();

        match cli.command {
            Commands::Plan {
                operation,
                startup,
                platform,
            } => {
                assert_eq!(operation, Some(OperationArg::Clone));
                assert!(!startup);
                assert_eq!(platform, Some(Platform::Windows));
            }
            _ => panic!("Expected plan command"),
        }
    }

    #[test]
    fn test_parse_rejects_unknown_platform() {
        assert!(Cli::try_parse_from(["git-autodeploy", "plan", "--platform", "beos"]).is_err());
    }

    #[test]
    fn test_trigger_for() {
        assert_eq!(trigger_for(true), SyncTrigger::Startup);
        assert_eq!(trigger_for(false), SyncTrigger::Webhook);
    }
}
