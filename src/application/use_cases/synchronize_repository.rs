use std::path::Path;
use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::application::services::run_fail_fast;
use crate::domain::entities::RepositoryConfig;
use crate::domain::value_objects::{CommandPipeline, Platform, SyncOperation, SyncTrigger};
use crate::infrastructure::git::{apply_transport_overlay, inspect_working_copy, GitCommands, GIT_DIR_VAR};
use crate::infrastructure::process::{CommandRunner, CommandSpec, ExecutionEnvironment};

/// 全コマンドが成功したのに作業コピーが存在しない場合の終了コード
pub const POSTCONDITION_FAILED_EXIT_CODE: i32 = 1;

/// 同期操作の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncOutcome {
    /// 実行した操作
    pub operation: SyncOperation,
    /// 終了コード（0で成功）
    pub status: i32,
}

impl SyncOutcome {
    pub fn is_success(&self) -> bool {
        self.status == 0
    }
}

/// 作業コピーをリモートブランチに合わせるユースケース
///
/// init / pull / clone はいずれも
/// コマンド列の構築 → 環境オーバーレイ → 順次実行（最初の失敗で中断）→ ディレクトリ確認
/// という同じ形をとる。終了コードが0でも作業コピーのディレクトリが無ければ失敗とする。
pub struct RepositorySynchronizer {
    runner: Arc<dyn CommandRunner>,
    commands: GitCommands,
    base_environment: Option<ExecutionEnvironment>,
}

impl RepositorySynchronizer {
    /// 新しいRepositorySynchronizerインスタンスを作成（プラットフォームは自動判定）
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            runner,
            commands: GitCommands::new(Platform::detect()),
            base_environment: None,
        }
    }

    /// コマンド生成に使うプラットフォームを指定
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.commands = GitCommands::new(platform);
        self
    }

    /// 基になる環境を固定する（未指定なら呼び出しごとにプロセス環境を複製）
    pub fn with_base_environment(mut self, environment: ExecutionEnvironment) -> Self {
        self.base_environment = Some(environment);
        self
    }

    pub fn platform(&self) -> Platform {
        self.commands.platform()
    }

    /// 同期コマンド用の環境を構築
    ///
    /// 継承したGIT_DIRは除き、SSH鍵があればGIT_SSH_COMMANDを重ねる。
    pub fn environment_for(&self, config: &RepositoryConfig) -> ExecutionEnvironment {
        let base = self
            .base_environment
            .clone()
            .unwrap_or_else(ExecutionEnvironment::inherited)
            .without_var(GIT_DIR_VAR);
        apply_transport_overlay(base, config.ssh_key.as_deref())
    }

    /// 操作に対応するコマンド列（実行はしない）
    pub fn plan(&self, config: &RepositoryConfig, operation: SyncOperation) -> CommandPipeline {
        match (operation, config.path()) {
            (SyncOperation::Init, Some(path)) => self.commands.init_pipeline(config, path),
            (SyncOperation::Pull, Some(path)) => self.commands.pull_pipeline(config, path),
            (SyncOperation::Clone, Some(path)) => self.commands.clone_pipeline(config, path),
            _ => CommandPipeline::new(),
        }
    }

    /// 作業コピーの状態ときっかけから操作を選んで実行する
    pub async fn synchronize(&self, config: &RepositoryConfig, trigger: SyncTrigger) -> SyncOutcome {
        let operation = self.select_operation(config, trigger);
        let status = self.execute(config, operation).await;
        SyncOutcome { operation, status }
    }

    pub fn select_operation(&self, config: &RepositoryConfig, trigger: SyncTrigger) -> SyncOperation {
        match config.path() {
            Some(path) => SyncOperation::select(true, inspect_working_copy(path), trigger),
            None => SyncOperation::Skip,
        }
    }

    /// 指定した操作を実行する
    pub async fn execute(&self, config: &RepositoryConfig, operation: SyncOperation) -> i32 {
        match operation {
            SyncOperation::Init => self.init_repository(config).await,
            SyncOperation::Pull => self.pull_repository(config).await,
            SyncOperation::Clone => self.clone_repository(config).await,
            SyncOperation::Skip => {
                info!("No local repository path configured for {}, nothing to sync", config.url);
                0
            }
        }
    }

    /// 既存の作業コピーのリモートURLとブランチを初期化する
    #[instrument(skip_all, fields(url = %config.url, branch = %config.branch))]
    pub async fn init_repository(&self, config: &RepositoryConfig) -> i32 {
        let Some(path) = config.path() else {
            info!("No local repository path configured, no init will occur");
            return 0;
        };

        info!("Initializing repository {}", path.display());

        let pipeline = self.commands.init_pipeline(config, path);
        let template = CommandSpec::default()
            .with_working_directory(path)
            .with_environment(self.environment_for(config))
            .with_suppressed_stderr(true);
        let status = run_fail_fast(self.runner.as_ref(), &pipeline, &template).await;

        self.check_postcondition(path, status, |ok| {
            if ok {
                info!("Repository {} successfully initialized", path.display());
            } else {
                error!("Unable to init repository {}", path.display());
            }
        })
    }

    /// 作業コピーをリモートブランチの最新状態に更新する
    #[instrument(skip_all, fields(url = %config.url, branch = %config.branch))]
    pub async fn pull_repository(&self, config: &RepositoryConfig) -> i32 {
        let Some(path) = config.path() else {
            info!("No local repository path configured, no pull will occur");
            return 0;
        };

        info!("Updating repository {}", path.display());

        let pipeline = self.commands.pull_pipeline(config, path);
        let template = CommandSpec::default()
            .with_working_directory(path)
            .with_environment(self.environment_for(config))
            .with_suppressed_stderr(true);
        let status = run_fail_fast(self.runner.as_ref(), &pipeline, &template).await;

        self.check_postcondition(path, status, |ok| {
            if ok {
                info!("Repository {} successfully updated", path.display());
            } else {
                error!("Unable to update repository {}", path.display());
            }
        })
    }

    /// リモートリポジトリをpathにcloneする
    ///
    /// 対象ディレクトリはまだ存在しないため、カレントディレクトリから実行する。
    #[instrument(skip_all, fields(url = %config.url, branch = %config.branch))]
    pub async fn clone_repository(&self, config: &RepositoryConfig) -> i32 {
        let Some(path) = config.path() else {
            info!("No local repository path configured, no clone will occur");
            return 0;
        };

        info!("Cloning repository {} into {}", config.url, path.display());

        let pipeline = self.commands.clone_pipeline(config, path);
        let template = CommandSpec::default().with_environment(self.environment_for(config));
        let status = run_fail_fast(self.runner.as_ref(), &pipeline, &template).await;

        self.check_postcondition(path, status, |ok| {
            if ok {
                info!("Repository {} successfully cloned", config.url);
            } else {
                error!("Unable to clone repository {}", config.url);
            }
        })
    }

    /// 終了コードとディレクトリの存在の両方で成否を判定する
    fn check_postcondition(&self, path: &Path, status: i32, report: impl FnOnce(bool)) -> i32 {
        let result = if status != 0 {
            status
        } else if !path.is_dir() {
            error!("Working copy {} does not exist after sync", path.display());
            POSTCONDITION_FAILED_EXIT_CODE
        } else {
            0
        };
        report(result == 0);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::process::MockCommandRunner;
    use tempfile::TempDir;

    fn base_env() -> ExecutionEnvironment {
        ExecutionEnvironment::from_vars([("PATH", "/usr/bin"), ("GIT_DIR", "/elsewhere/.git")])
    }

    fn synchronizer(runner: MockCommandRunner) -> RepositorySynchronizer {
        RepositorySynchronizer::new(Arc::new(runner))
            .with_platform(Platform::Posix)
            .with_base_environment(base_env())
    }

    #[test]
    fn test_environment_without_key_has_no_transport_overlay() {
        let sync = synchronizer(MockCommandRunner::new());
        let env = sync.environment_for(&RepositoryConfig::new("git@host:r.git"));

        assert!(!env.contains("GIT_SSH_COMMAND"));
        assert!(!env.contains("GIT_DIR"));
        assert!(env.contains("PATH"));
    }

    #[test]
    fn test_environment_with_key_overlays_transport() {
        let sync = synchronizer(MockCommandRunner::new());
        let env = sync.environment_for(&RepositoryConfig::new("git@host:r.git").with_ssh_key("/k"));

        let value = env.get("GIT_SSH_COMMAND").unwrap().to_string_lossy().to_string();
        assert!(value.contains("-i /k"));
        assert!(value.contains("StrictHostKeyChecking=no"));
    }

    #[tokio::test]
    async fn test_pull_without_path_runs_nothing() {
        let mut runner = MockCommandRunner::new();
        runner.expect_run().times(0);
        let sync = synchronizer(runner);

        let config = RepositoryConfig::new("git@host:r.git");
        assert_eq!(sync.pull_repository(&config).await, 0);
        assert_eq!(sync.clone_repository(&config).await, 0);
        assert_eq!(sync.init_repository(&config).await, 0);
    }

    #[tokio::test]
    async fn test_init_runs_in_working_copy_with_suppressed_stderr() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().to_path_buf();
        let expected_dir = path.clone();

        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .withf(move |spec: &CommandSpec| {
                spec.working_directory.as_deref() == Some(expected_dir.as_path()) && spec.suppress_stderr
            })
            .times(5)
            .returning(|_| Ok(0));
        let sync = synchronizer(runner);

        let config = RepositoryConfig::new("git@host:r.git").with_path(&path).with_branch("main");
        assert_eq!(sync.init_repository(&config).await, 0);
    }

    #[tokio::test]
    async fn test_pull_stops_at_failing_fetch() {
        let temp_dir = TempDir::new().unwrap();

        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .times(2)
            .returning(|spec| Ok(if spec.command.starts_with("git fetch") { 128 } else { 0 }));
        let sync = synchronizer(runner);

        let config = RepositoryConfig::new("git@host:r.git").with_path(temp_dir.path());
        assert_eq!(sync.pull_repository(&config).await, 128);
    }

    #[tokio::test]
    async fn test_pull_fails_when_directory_missing_after_success() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("gone");

        let mut runner = MockCommandRunner::new();
        runner.expect_run().times(4).returning(|_| Ok(0));
        let sync = synchronizer(runner);

        let config = RepositoryConfig::new("git@host:r.git").with_path(&missing);
        assert_eq!(sync.pull_repository(&config).await, POSTCONDITION_FAILED_EXIT_CODE);
    }

    #[tokio::test]
    async fn test_clone_runs_from_ambient_directory() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("x");
        let created = target.clone();

        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .withf(|spec: &CommandSpec| spec.working_directory.is_none() && !spec.suppress_stderr)
            .times(2)
            .returning(move |spec| {
                if spec.command.starts_with("git clone") {
                    std::fs::create_dir_all(&created).unwrap();
                }
                Ok(0)
            });
        let sync = synchronizer(runner);

        let config = RepositoryConfig::new("git@host:r.git").with_path(&target).with_branch("main");
        assert_eq!(sync.clone_repository(&config).await, 0);
        assert!(target.is_dir());
    }

    #[test]
    fn test_plan_matches_operation() {
        let sync = synchronizer(MockCommandRunner::new());
        let config = RepositoryConfig::new("git@host:r.git").with_path("/tmp/x").with_branch("main");

        assert_eq!(sync.plan(&config, SyncOperation::Init).len(), 5);
        assert_eq!(sync.plan(&config, SyncOperation::Pull).len(), 4);
        assert_eq!(sync.plan(&config, SyncOperation::Clone).len(), 2);
        assert!(sync.plan(&config, SyncOperation::Skip).is_empty());
        assert!(sync
            .plan(&RepositoryConfig::new("git@host:r.git"), SyncOperation::Pull)
            .is_empty());
    }

    #[test]
    fn test_select_operation_uses_working_copy_state() {
        let temp_dir = TempDir::new().unwrap();
        let sync = synchronizer(MockCommandRunner::new());

        let missing = RepositoryConfig::new("git@host:r.git").with_path(temp_dir.path().join("absent"));
        assert_eq!(sync.select_operation(&missing, SyncTrigger::Webhook), SyncOperation::Clone);

        git2::Repository::init(temp_dir.path()).unwrap();
        let existing = RepositoryConfig::new("git@host:r.git").with_path(temp_dir.path());
        assert_eq!(sync.select_operation(&existing, SyncTrigger::Webhook), SyncOperation::Pull);
        assert_eq!(sync.select_operation(&existing, SyncTrigger::Startup), SyncOperation::Init);

        let no_path = RepositoryConfig::new("git@host:r.git");
        assert_eq!(sync.select_operation(&no_path, SyncTrigger::Startup), SyncOperation::Skip);
    }
}
