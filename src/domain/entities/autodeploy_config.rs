use serde::{Deserialize, Serialize};

use super::repository_config::RepositoryConfig;
use crate::common::error::AutodeployError;
use crate::common::result::AutodeployResult;

/// git-autodeploy設定ファイルの構造
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutodeployConfig {
    /// 管理対象リポジトリのリスト
    #[serde(default)]
    pub repositories: Vec<RepositoryConfig>,
}

impl AutodeployConfig {
    pub fn new(repositories: Vec<RepositoryConfig>) -> Self {
        Self { repositories }
    }

    /// URLとブランチが一致するリポジトリを取得（Webhookの振り分け用）
    pub fn matching(&self, url: &str, branch: Option<&str>) -> Vec<&RepositoryConfig> {
        self.repositories
            .iter()
            .filter(|repo| repo.matches(url, branch))
            .collect()
    }

    /// 全リポジトリ設定を検証
    pub fn validate(&self) -> AutodeployResult<()> {
        if self.repositories.is_empty() {
            return Err(AutodeployError::validation_error(
                "repositories",
                "at least one repository must be configured",
                None,
            ));
        }

        for repo in &self.repositories {
            repo.validate_config()?;
        }

        Ok(())
    }
}
