//! # git-autodeploy - Webhook-driven git auto-deploy
//!
//! `git-autodeploy` keeps local git working copies in sync with a configured
//! remote branch and runs deploy commands after every successful sync. It is
//! meant to be driven by a webhook receiver or run directly from the command
//! line.
//!
//! ## Features
//!
//! - **Repository Synchronization**: clone, re-initialize or hard-reset a working copy to `remote/branch`
//! - **Deploy Commands**: run an ordered list of shell commands and collect every exit code
//! - **SSH Keys**: per-repository keys through a `GIT_SSH_COMMAND` environment overlay
//! - **Hooks**: `prepull` / `postpull` commands around the pull pipeline
//! - **Dry Runs**: print the exact commands for POSIX or Windows hosts without running them
//!
//! ## Quick Start
//!
//! 1. Create a config file (`git-autodeploy.yaml`):
//!
//! ```yaml
//! repositories:
//!   - url: "git@github.com:example/app.git"
//!     branch: "main"
//!     path: "/srv/app"
//!     ssh_key: "/home/deploy/.ssh/id_ed25519"
//!     deploy_commands:
//!       - "make build"
//!       - "systemctl restart app"
//! ```
//!
//! 2. Clone or re-initialize the working copies:
//!
//! ```bash
//! git-autodeploy sync
//! ```
//!
//! 3. On every push, pull and deploy:
//!
//! ```bash
//! git-autodeploy trigger --url git@github.com:example/app.git --branch main
//! ```
//!
//! ## Architecture
//!
//! The crate is organized using clean architecture principles:
//!
//! - [`domain`]: repository config, command pipelines, platform and sync operation types
//! - [`application`]: fail-fast / run-all pipeline execution and the sync, deploy and key use cases
//! - [`infrastructure`]: shell command runner, git command templates, config files
//! - [`presentation`]: CLI interface and user interaction
//! - [`common`]: shared error handling
//!
//! ## Exit Codes
//!
//! Sync and deploy operations report shell exit codes rather than errors:
//! 0 is success, any other value is the code of the failing command. A command
//! that could not be started, or was killed by a signal, reports
//! [`infrastructure::process::UNKNOWN_EXIT_CODE`]. Configuration and I/O
//! problems are reported as [`AutodeployError`].
//!
//! ## Examples
//!
//! ### Using the Library
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use git_autodeploy::application::use_cases::AutoDeployUseCase;
//! use git_autodeploy::domain::value_objects::SyncTrigger;
//! use git_autodeploy::infrastructure::filesystem::ConfigStore;
//! use git_autodeploy::infrastructure::process::ShellCommandRunner;
//!
//! # async fn example() -> git_autodeploy::Result<()> {
//! let config = ConfigStore::new().load("git-autodeploy.yaml").await?;
//! let use_case = AutoDeployUseCase::new(Arc::new(ShellCommandRunner::default()));
//!
//! for repo in config.matching("git@github.com:example/app.git", Some("main")) {
//!     let report = use_case.execute(repo, SyncTrigger::Webhook).await;
//!     println!("{}: sync {} deploy {:?}", repo.url, report.sync_status, report.deploy_statuses);
//! }
//! # Ok(())
//! # }
//! ```

#![deny(rustdoc::broken_intra_doc_links)]

pub mod application;
pub mod common;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

// Re-export commonly used types for convenience
pub use crate::common::error::AutodeployError;
pub use crate::common::result::AutodeployResult as Result;
