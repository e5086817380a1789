use serde::{Deserialize, Serialize};
use std::fmt;

/// 同期のきっかけ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncTrigger {
    /// 起動時の同期（既存の作業コピーはリモート設定を初期化する）
    Startup,
    /// Webhookによる同期（既存の作業コピーはpullする）
    Webhook,
}

/// 作業コピーの状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkingCopyState {
    /// ディレクトリが存在しない
    Missing,
    /// ディレクトリは存在するがgitリポジトリではない
    Directory,
    /// gitリポジトリとして開ける
    Repository,
}

/// 実行する同期操作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncOperation {
    Clone,
    Init,
    Pull,
    /// pathが設定されていないため何もしない
    Skip,
}

impl SyncOperation {
    /// 設定と作業コピーの状態から同期操作を選択する
    ///
    /// pathが無い場合は常に`Skip`。存在しない、またはgit管理外の
    /// ディレクトリは`Clone`。既存リポジトリは起動時`Init`、Webhook時`Pull`。
    pub fn select(has_path: bool, state: WorkingCopyState, trigger: SyncTrigger) -> Self {
        if !has_path {
            return SyncOperation::Skip;
        }

        match (state, trigger) {
            (WorkingCopyState::Missing, _) | (WorkingCopyState::Directory, _) => SyncOperation::Clone,
            (WorkingCopyState::Repository, SyncTrigger::Startup) => SyncOperation::Init,
            (WorkingCopyState::Repository, SyncTrigger::Webhook) => SyncOperation::Pull,
        }
    }
}

impl fmt::Display for SyncOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncOperation::Clone => write!(f, "clone"),
            SyncOperation::Init => write!(f, "init"),
            SyncOperation::Pull => write!(f, "pull"),
            SyncOperation::Skip => write!(f, "skip"),
        }
    }
}
