use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ForwarderError, Result};

/// Contents of `zabbix2opsgenie.json`. Missing keys read as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// OpsGenie API key, used when the event does not carry its own.
    pub api_key: String,
    /// Base URL of the edge encryption app (or the OpsGenie API itself).
    pub edge_app_url: String,
    /// Comma separated default responder teams.
    pub teams: String,
    /// Comma separated default tags.
    pub tags: String,
    /// One of DEBUG, WARN, ERROR.
    pub log_level: String,
}

impl Settings {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ForwarderError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content).map_err(|source| ForwarderError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }

    pub fn log_level(&self) -> LogLevel {
        LogLevel::from_config(&self.log_level)
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.edge_app_url.trim_end_matches('/')
    }
}

/// Minimum level written to the log file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    #[default]
    Debug,
    Warn,
    Error,
}

impl LogLevel {
    /// Unknown or empty values disable filtering, like an unset minimum level.
    pub fn from_config(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "WARN" | "WARNING" => Self::Warn,
            "ERROR" => Self::Error,
            _ => Self::Debug,
        }
    }

    /// Filter directive understood by `tracing_subscriber::EnvFilter`.
    pub fn directive(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Debug => write!(f, "DEBUG"),
            Self::Warn => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}
