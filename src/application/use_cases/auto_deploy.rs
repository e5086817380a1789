use chrono::Utc;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::deploy_repository::DeployExecutor;
use super::load_ssh_key::TransportConfigurator;
use super::synchronize_repository::RepositorySynchronizer;
use crate::domain::entities::{DeployReport, RepositoryConfig};
use crate::domain::value_objects::{Platform, SyncTrigger};
use crate::infrastructure::process::{CommandRunner, ExecutionEnvironment};

/// 鍵の読み込み → 同期 → デプロイを一括で行うユースケース
///
/// 鍵の読み込みに失敗しても同期は続行する（同期自体は環境オーバーレイで鍵を使う）。
/// デプロイは同期が0で終了した場合のみ実行する。
pub struct AutoDeployUseCase {
    transport: TransportConfigurator,
    synchronizer: RepositorySynchronizer,
    executor: DeployExecutor,
}

impl AutoDeployUseCase {
    /// 同じCommandRunnerを共有する各ユースケースを組み立てる
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            transport: TransportConfigurator::new(Arc::clone(&runner)),
            synchronizer: RepositorySynchronizer::new(Arc::clone(&runner)),
            executor: DeployExecutor::new(runner),
        }
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.synchronizer = self.synchronizer.with_platform(platform);
        self
    }

    pub fn with_base_environment(mut self, environment: ExecutionEnvironment) -> Self {
        self.synchronizer = self.synchronizer.with_base_environment(environment);
        self
    }

    /// 1リポジトリ分の自動デプロイを実行してレポートを返す
    #[instrument(skip_all, fields(url = %config.url, branch = %config.branch, trigger = ?trigger))]
    pub async fn execute(&self, config: &RepositoryConfig, trigger: SyncTrigger) -> DeployReport {
        let started_at = Utc::now();

        let key_status = match config.ssh_key {
            Some(_) => {
                let status = self.transport.load_key(config).await;
                if status != 0 {
                    warn!("SSH key could not be loaded (exit code {}), continuing with sync", status);
                }
                Some(status)
            }
            None => None,
        };

        let outcome = self.synchronizer.synchronize(config, trigger).await;

        let deploy_statuses = if outcome.is_success() {
            self.executor.deploy(config).await
        } else {
            warn!(
                "{} of {} failed with exit code {}, skipping deploy",
                outcome.operation,
                config.display_name(),
                outcome.status
            );
            Vec::new()
        };

        let report = DeployReport {
            url: config.url.clone(),
            branch: config.branch.clone(),
            path: config.path.clone(),
            operation: outcome.operation,
            key_status,
            sync_status: outcome.status,
            deploy_statuses,
            started_at,
            finished_at: Utc::now(),
        };

        info!(
            success = report.is_success(),
            "Auto-deploy of {} finished",
            config.display_name()
        );
        report
    }
}
