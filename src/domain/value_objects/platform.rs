use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Shell family of the host that runs the pipelines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// POSIX shells (`sh -c`)
    Posix,
    /// Windows command interpreter (`cmd /C`)
    Windows,
}

impl Default for Platform {
    fn default() -> Self {
        Self::detect()
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Posix => write!(f, "posix"),
            Platform::Windows => write!(f, "windows"),
        }
    }
}

impl FromStr for Platform {
    type Err = PlatformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "posix" | "unix" | "linux" | "macos" => Ok(Platform::Posix),
            "windows" | "win" => Ok(Platform::Windows),
            _ => Err(PlatformError::UnsupportedPlatform(s.to_string())),
        }
    }
}

impl Platform {
    /// Detect the platform of the running process
    pub fn detect() -> Self {
        if cfg!(target_os = "windows") {
            Platform::Windows
        } else {
            Platform::Posix
        }
    }

    /// Shell program and the flag that makes it execute a command string
    pub fn shell(&self) -> (&'static str, &'static str) {
        match self {
            Platform::Posix => ("sh", "-c"),
            Platform::Windows => ("cmd", "/C"),
        }
    }

    pub fn is_windows(&self) -> bool {
        matches!(self, Platform::Windows)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(String),
}
