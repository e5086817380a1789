//! 同期パイプラインの統合テスト
//!
//! RecordingRunnerでコマンド列・環境・作業ディレクトリを検証し、
//! gitが利用可能な環境ではローカルのbareリポジトリに対して
//! clone / init / pull を実際に実行する

mod common;

use std::sync::Arc;
use tempfile::TempDir;

use common::fixtures::{git_available, repo_config, LocalRemote, TEST_URL};
use common::recording_runner::RecordingRunner;
use git_autodeploy::application::use_cases::{RepositorySynchronizer, POSTCONDITION_FAILED_EXIT_CODE};
use git_autodeploy::domain::entities::RepositoryConfig;
use git_autodeploy::domain::value_objects::{Platform, SyncOperation, SyncTrigger};
use git_autodeploy::infrastructure::process::{ExecutionEnvironment, ShellCommandRunner};

fn synchronizer(runner: &RecordingRunner) -> RepositorySynchronizer {
    RepositorySynchronizer::new(runner.as_runner())
        .with_platform(Platform::Posix)
        .with_base_environment(ExecutionEnvironment::from_vars([
            ("PATH", "/usr/bin:/bin"),
            ("GIT_DIR", "/somewhere/else/.git"),
        ]))
}

#[tokio::test]
async fn test_operations_without_path_run_nothing() {
    let runner = RecordingRunner::new();
    let sync = synchronizer(&runner);
    let config = RepositoryConfig::new(TEST_URL).with_deploy("make");

    assert_eq!(sync.init_repository(&config).await, 0);
    assert_eq!(sync.pull_repository(&config).await, 0);
    assert_eq!(sync.clone_repository(&config).await, 0);

    let outcome = sync.synchronize(&config, SyncTrigger::Webhook).await;
    assert_eq!(outcome.operation, SyncOperation::Skip);
    assert_eq!(outcome.status, 0);

    assert_eq!(runner.call_count(), 0);
}

#[tokio::test]
async fn test_pull_runs_hooks_in_order_inside_working_copy() {
    let temp_dir = TempDir::new().unwrap();
    let runner = RecordingRunner::new();
    let sync = synchronizer(&runner);

    let config = repo_config(temp_dir.path())
        .with_prepull("./maintenance.sh on")
        .with_postpull("./maintenance.sh off");

    assert_eq!(sync.pull_repository(&config).await, 0);
    assert_eq!(
        runner.commands(),
        vec![
            "unset GIT_DIR",
            "./maintenance.sh on",
            "git fetch origin",
            "git reset --hard origin/main",
            "git submodule update --init --recursive",
            "./maintenance.sh off",
        ]
    );

    for spec in runner.calls() {
        assert_eq!(spec.working_directory.as_deref(), Some(temp_dir.path()));
        assert!(spec.suppress_stderr);
        let env = spec.environment.expect("sync commands carry an environment");
        assert!(!env.contains("GIT_DIR"));
        assert!(!env.contains("GIT_SSH_COMMAND"));
        assert!(env.contains("PATH"));
    }
}

#[tokio::test]
async fn test_ssh_key_is_overlaid_on_every_sync_command() {
    let temp_dir = TempDir::new().unwrap();
    let runner = RecordingRunner::new();
    let sync = synchronizer(&runner);

    let config = repo_config(temp_dir.path()).with_ssh_key("/home/deploy/.ssh/id_ed25519");
    assert_eq!(sync.init_repository(&config).await, 0);
    assert_eq!(sync.clone_repository(&config).await, 0);
    assert_eq!(runner.call_count(), 7);

    for spec in runner.calls() {
        let env = spec.environment.unwrap();
        let ssh = env.get("GIT_SSH_COMMAND").unwrap().to_string_lossy().to_string();
        assert_eq!(
            ssh,
            "ssh -i /home/deploy/.ssh/id_ed25519 -o UserKnownHostsFile=/dev/null -o StrictHostKeyChecking=no"
        );
    }
}

#[tokio::test]
async fn test_pull_stops_at_first_failure() {
    let temp_dir = TempDir::new().unwrap();
    let runner = RecordingRunner::new().fail_on("git fetch", 128);
    let sync = synchronizer(&runner);

    let config = repo_config(temp_dir.path()).with_postpull("./notify.sh");

    assert_eq!(sync.pull_repository(&config).await, 128);
    assert_eq!(runner.commands(), vec!["unset GIT_DIR", "git fetch origin"]);
}

#[tokio::test]
async fn test_clone_succeeds_when_directory_appears() {
    let temp_dir = TempDir::new().unwrap();
    let target = temp_dir.path().join("app");
    let runner = RecordingRunner::new().create_on("git clone", &target);
    let sync = synchronizer(&runner);

    assert_eq!(sync.clone_repository(&repo_config(&target)).await, 0);

    let calls = runner.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(
        calls[1].command,
        format!("git clone --recursive {} -b main {}", TEST_URL, target.display())
    );
    assert!(calls.iter().all(|spec| spec.working_directory.is_none()));
    assert!(calls.iter().all(|spec| !spec.suppress_stderr));
}

#[tokio::test]
async fn test_clone_fails_when_directory_is_missing_afterwards() {
    let temp_dir = TempDir::new().unwrap();
    let target = temp_dir.path().join("app");
    let runner = RecordingRunner::new();
    let sync = synchronizer(&runner);

    assert_eq!(
        sync.clone_repository(&repo_config(&target)).await,
        POSTCONDITION_FAILED_EXIT_CODE
    );
    assert_eq!(runner.call_count(), 2);
}

#[tokio::test]
async fn test_windows_commands_wrap_git_dir_reset_in_bash() {
    let temp_dir = TempDir::new().unwrap();
    let runner = RecordingRunner::new();
    let sync = RepositorySynchronizer::new(runner.as_runner()).with_platform(Platform::Windows);

    let config = repo_config(temp_dir.path());
    assert_eq!(sync.init_repository(&config).await, 0);

    let commands = runner.commands();
    let first = &commands[0];
    assert!(first.starts_with("bash -c \"cd "));
    assert!(first.ends_with("&& unset GIT_DIR\""));
}

#[tokio::test]
async fn test_webhook_on_plain_directory_clones() {
    let temp_dir = TempDir::new().unwrap();
    let runner = RecordingRunner::new();
    let sync = synchronizer(&runner);

    let outcome = sync
        .synchronize(&repo_config(temp_dir.path()), SyncTrigger::Webhook)
        .await;
    assert_eq!(outcome.operation, SyncOperation::Clone);
    assert!(runner.commands()[1].starts_with("git clone --recursive"));
}

#[cfg(unix)]
#[tokio::test]
async fn test_real_git_clone_init_and_pull() {
    if !git_available() {
        eprintln!("git not available, skipping");
        return;
    }

    let remote = LocalRemote::new();
    let path = remote.working_copy_path();
    let config = RepositoryConfig::new(remote.url())
        .with_path(&path)
        .with_branch("main");
    let sync = RepositorySynchronizer::new(Arc::new(ShellCommandRunner::new(Platform::Posix)))
        .with_platform(Platform::Posix);

    // 1. 作業コピーが無いのでclone
    let outcome = sync.synchronize(&config, SyncTrigger::Startup).await;
    assert_eq!(outcome.operation, SyncOperation::Clone);
    assert_eq!(outcome.status, 0);
    assert_eq!(std::fs::read_to_string(path.join("README.md")).unwrap(), "first\n");

    // 2. 起動時の同期は既存リポジトリをinit
    let outcome = sync.synchronize(&config, SyncTrigger::Startup).await;
    assert_eq!(outcome.operation, SyncOperation::Init);
    assert_eq!(outcome.status, 0);

    // 3. リモートの更新とローカルの変更をpullで上書き
    remote.commit("README.md", "second\n");
    std::fs::write(path.join("README.md"), "local edit\n").unwrap();

    let outcome = sync.synchronize(&config, SyncTrigger::Webhook).await;
    assert_eq!(outcome.operation, SyncOperation::Pull);
    assert_eq!(outcome.status, 0);
    assert_eq!(std::fs::read_to_string(path.join("README.md")).unwrap(), "second\n");
}

#[cfg(unix)]
#[tokio::test]
async fn test_real_git_pull_hooks_see_sync_environment() {
    if !git_available() {
        eprintln!("git not available, skipping");
        return;
    }

    let remote = LocalRemote::new();
    let path = remote.working_copy_path();
    let marker = remote.root.path().join("hook.txt");
    let sync = RepositorySynchronizer::new(Arc::new(ShellCommandRunner::new(Platform::Posix)))
        .with_platform(Platform::Posix);

    let config = RepositoryConfig::new(remote.url())
        .with_path(&path)
        .with_branch("main")
        .with_ssh_key("/nonexistent/key")
        .with_postpull(format!(
            "printf '%s|%s' \"${{GIT_DIR:-unset}}\" \"$GIT_SSH_COMMAND\" > {}",
            marker.display()
        ));

    assert_eq!(sync.clone_repository(&config).await, 0);
    assert_eq!(sync.pull_repository(&config).await, 0);

    let content = std::fs::read_to_string(&marker).unwrap();
    assert!(content.starts_with("unset|ssh -i /nonexistent/key"));
}

#[cfg(unix)]
#[tokio::test]
async fn test_real_git_pull_of_unknown_branch_fails() {
    if !git_available() {
        eprintln!("git not available, skipping");
        return;
    }

    let remote = LocalRemote::new();
    let path = remote.working_copy_path();
    let sync = RepositorySynchronizer::new(Arc::new(ShellCommandRunner::new(Platform::Posix)))
        .with_platform(Platform::Posix);

    let config = RepositoryConfig::new(remote.url()).with_path(&path).with_branch("main");
    assert_eq!(sync.clone_repository(&config).await, 0);

    let missing_branch = config.clone().with_branch("does-not-exist");
    assert_ne!(sync.pull_repository(&missing_branch).await, 0);
}
