use std::path::Path;
use tokio::fs as async_fs;
use tracing::debug;

use crate::common::error::AutodeployError;
use crate::common::result::AutodeployResult;
use crate::domain::entities::AutodeployConfig;

/// Config file name looked up when none is given
pub const DEFAULT_CONFIG_FILE: &str = "git-autodeploy.yaml";

/// On-disk format of a config file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
}

impl ConfigFormat {
    /// `.json` files are JSON, everything else is YAML
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ConfigFormat::Json,
            _ => ConfigFormat::Yaml,
        }
    }
}

/// Loads and validates repository configuration files
#[derive(Debug, Clone, Default)]
pub struct ConfigStore {
    skip_validation: bool,
}

impl ConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load without running validation rules
    pub fn without_validation(mut self) -> Self {
        self.skip_validation = true;
        self
    }

    /// Read, parse and validate a config file
    pub async fn load<P: AsRef<Path>>(&self, config_path: P) -> AutodeployResult<AutodeployConfig> {
        let config_path = config_path.as_ref();

        if !config_path.exists() {
            return Err(AutodeployError::config_error(
                format!("Config file not found: {}", config_path.display()),
                Some(config_path.to_path_buf()),
            ));
        }

        let content = async_fs::read_to_string(config_path).await.map_err(|e| {
            AutodeployError::filesystem_error_with_source(
                "Failed to read config file",
                Some(config_path.to_path_buf()),
                e,
            )
        })?;

        let format = ConfigFormat::from_path(config_path);
        debug!(path = %config_path.display(), ?format, "parsing config file");

        let config = self.parse(&content, format).map_err(|e| match e {
            AutodeployError::SerializationError { message, source } => AutodeployError::ConfigError {
                message: format!("{} in {}", message, config_path.display()),
                file_path: Some(config_path.to_path_buf()),
                source,
            },
            other => other,
        })?;

        Ok(config)
    }

    /// Parse config content in the given format and validate it
    pub fn parse(&self, content: &str, format: ConfigFormat) -> AutodeployResult<AutodeployConfig> {
        let config: AutodeployConfig = match format {
            ConfigFormat::Yaml => serde_yaml::from_str(content)?,
            ConfigFormat::Json => serde_json::from_str(content)?,
        };

        if !self.skip_validation {
            config.validate()?;
        }

        Ok(config)
    }

    pub fn parse_yaml(&self, content: &str) -> AutodeployResult<AutodeployConfig> {
        self.parse(content, ConfigFormat::Yaml)
    }

    pub fn parse_json(&self, content: &str) -> AutodeployResult<AutodeployConfig> {
        self.parse(content, ConfigFormat::Json)
    }
}
