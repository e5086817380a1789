use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::domain::value_objects::SyncOperation;

/// 1リポジトリ分の同期とデプロイの結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployReport {
    /// リモートURL
    pub url: String,

    /// 追跡ブランチ
    pub branch: String,

    /// 作業コピーのパス
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// 実行した同期操作
    pub operation: SyncOperation,

    /// SSH鍵読み込みの終了コード（鍵が無い場合はNone）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_status: Option<i32>,

    /// 同期の終了コード
    pub sync_status: i32,

    /// デプロイコマンドごとの終了コード（同期失敗時は空）
    pub deploy_statuses: Vec<i32>,

    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl DeployReport {
    /// 同期が成功し、全デプロイコマンドが0で終了したか
    pub fn is_success(&self) -> bool {
        self.sync_status == 0 && self.deploy_statuses.iter().all(|status| *status == 0)
    }

    /// 失敗したデプロイコマンドの数
    pub fn failed_deploy_count(&self) -> usize {
        self.deploy_statuses.iter().filter(|status| **status != 0).count()
    }
}
