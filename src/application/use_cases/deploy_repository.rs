use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::application::services::run_all;
use crate::domain::entities::RepositoryConfig;
use crate::infrastructure::process::{CommandRunner, CommandSpec};

/// デプロイコマンドを実行するユースケース
///
/// 同期とは異なり、途中のコマンドが失敗しても残りは全て実行する。
pub struct DeployExecutor {
    runner: Arc<dyn CommandRunner>,
}

impl DeployExecutor {
    /// 新しいDeployExecutorインスタンスを作成
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }

    /// 設定された順に全デプロイコマンドを実行し、終了コードを同じ順で返す
    ///
    /// pathがあればその中で実行し、無ければカレントディレクトリで実行する。
    #[instrument(skip_all, fields(url = %config.url, branch = %config.branch))]
    pub async fn deploy(&self, config: &RepositoryConfig) -> Vec<i32> {
        let commands = config.effective_deploy_commands();
        if commands.is_empty() {
            info!("No deploy commands configured for {}", config.url);
            return Vec::new();
        }

        info!("Executing {} deploy commands", commands.len());

        let mut template = CommandSpec::default();
        if let Some(path) = config.path() {
            template = template.with_working_directory(path);
        }

        let statuses = run_all(self.runner.as_ref(), &commands, &template).await;

        let failed = statuses.iter().filter(|status| **status != 0).count();
        if failed == 0 {
            info!("{} deploy commands executed with success", statuses.len());
        } else {
            warn!("{} of {} deploy commands failed: {:?}", failed, statuses.len(), statuses);
        }

        statuses
    }
}
