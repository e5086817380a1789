use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use validator::Validate;

use crate::common::error::AutodeployError;
use crate::common::result::AutodeployResult;

fn default_remote() -> String {
    "origin".to_string()
}

fn default_branch() -> String {
    "master".to_string()
}

/// デプロイ対象リポジトリの設定
///
/// 1回の呼び出しの間は不変。各操作は設定を受け取り、終了コードを返す。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct RepositoryConfig {
    /// ローカル作業コピーのディレクトリ（未設定なら同期しない）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// リモートリポジトリのURL
    #[validate(length(min = 1, message = "repository url must not be empty"))]
    pub url: String,

    /// リモート名（例: origin）
    #[serde(default = "default_remote")]
    #[validate(length(min = 1, message = "remote name must not be empty"))]
    pub remote: String,

    /// 追跡するブランチ名
    #[serde(default = "default_branch")]
    #[validate(length(min = 1, message = "branch must not be empty"))]
    pub branch: String,

    /// 転送時に使用するSSH秘密鍵のパス
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssh_key: Option<PathBuf>,

    /// pull時にfetchの前に実行するコマンド
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prepull: Option<String>,

    /// pull時にresetの後に実行するコマンド
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postpull: Option<String>,

    /// 同期成功後に実行するデプロイコマンド
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub deploy_commands: Vec<String>,

    /// 旧形式の単一デプロイコマンド（deploy_commandsの後に実行）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deploy: Option<String>,
}

impl RepositoryConfig {
    /// 新しいRepositoryConfigインスタンスを作成
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            path: None,
            url: url.into(),
            remote: default_remote(),
            branch: default_branch(),
            ssh_key: None,
            prepull: None,
            postpull: None,
            deploy_commands: Vec::new(),
            deploy: None,
        }
    }

    /// 作業コピーのパスを設定
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// リモート名を設定
    pub fn with_remote(mut self, remote: impl Into<String>) -> Self {
        self.remote = remote.into();
        self
    }

    /// ブランチを設定
    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = branch.into();
        self
    }

    /// SSH鍵を設定
    pub fn with_ssh_key(mut self, ssh_key: impl Into<PathBuf>) -> Self {
        self.ssh_key = Some(ssh_key.into());
        self
    }

    pub fn with_prepull(mut self, command: impl Into<String>) -> Self {
        self.prepull = Some(command.into());
        self
    }

    pub fn with_postpull(mut self, command: impl Into<String>) -> Self {
        self.postpull = Some(command.into());
        self
    }

    /// デプロイコマンドを設定
    pub fn with_deploy_commands<I, S>(mut self, commands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.deploy_commands = commands.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_deploy(mut self, command: impl Into<String>) -> Self {
        self.deploy = Some(command.into());
        self
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// `remote/branch` 形式の追跡対象
    pub fn tracking_ref(&self) -> String {
        format!("{}/{}", self.remote, self.branch)
    }

    /// 実際に実行するデプロイコマンド（旧形式のdeployを末尾に追加）
    pub fn effective_deploy_commands(&self) -> Vec<String> {
        let mut commands = self.deploy_commands.clone();
        if let Some(deploy) = &self.deploy {
            commands.push(deploy.clone());
        }
        commands
    }

    /// ログ表示用の名前（pathがあればpath、なければURL）
    pub fn display_name(&self) -> String {
        match &self.path {
            Some(path) => path.display().to_string(),
            None => self.url.clone(),
        }
    }

    /// URLとブランチが一致するか
    pub fn matches(&self, url: &str, branch: Option<&str>) -> bool {
        self.url == url && branch.map_or(true, |branch| self.branch == branch)
    }

    /// フィールド制約とコマンドの検証
    pub fn validate_config(&self) -> AutodeployResult<()> {
        self.validate()?;

        for (field, command) in [("prepull", &self.prepull), ("postpull", &self.postpull), ("deploy", &self.deploy)] {
            if let Some(command) = command {
                if command.trim().is_empty() {
                    return Err(AutodeployError::validation_error(
                        field,
                        "command must not be blank",
                        Some(command.clone()),
                    ));
                }
            }
        }

        if let Some(index) = self.deploy_commands.iter().position(|c| c.trim().is_empty()) {
            return Err(AutodeployError::validation_error(
                "deploy_commands",
                format!("command #{} must not be blank", index + 1),
                None,
            ));
        }

        Ok(())
    }
}
