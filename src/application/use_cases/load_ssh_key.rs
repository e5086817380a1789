use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::application::services::run_fail_fast;
use crate::domain::entities::RepositoryConfig;
use crate::infrastructure::git::load_key_pipeline;
use crate::infrastructure::process::{CommandRunner, CommandSpec};

/// SSH鍵の読み込み（GIT_SSH_COMMANDの設定）を行うユースケース
///
/// シェル上でのexportはそのサブシェル内でしか効果がないため補助的なもの。
/// 実際の鍵の適用は同期操作ごとの環境オーバーレイで行われる。
pub struct TransportConfigurator {
    runner: Arc<dyn CommandRunner>,
}

impl TransportConfigurator {
    /// 新しいTransportConfiguratorインスタンスを作成
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }

    /// GIT_SSH_COMMANDを解除してから設定し直す
    ///
    /// 最初に失敗したコマンドの終了コードを返す。鍵が設定されていなければ0。
    #[instrument(skip_all, fields(url = %config.url))]
    pub async fn load_key(&self, config: &RepositoryConfig) -> i32 {
        let Some(key) = config.ssh_key.as_deref() else {
            info!("No SSH key configured for {}", config.url);
            return 0;
        };

        info!("Loading SSH key {}", key.display());

        let pipeline = load_key_pipeline(key);
        let status = run_fail_fast(self.runner.as_ref(), &pipeline, &CommandSpec::default()).await;

        if status == 0 {
            info!("SSH key {} successfully loaded", key.display());
        } else {
            error!("Unable to load SSH key {}", key.display());
        }

        status
    }
}
