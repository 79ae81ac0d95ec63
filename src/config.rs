//! Configuration management for the Service Order Report server

use serde::Deserialize;
use std::env;
use std::path::PathBuf;

use crate::report::DEFAULT_ORGANIZATION;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    /// Regular weight of the report typeface
    pub font_regular: PathBuf,
    /// Bold weight of the report typeface
    pub font_bold: PathBuf,
    /// Organisation name printed at the top of every header
    pub organization: String,
    /// File name offered in `Content-Disposition`
    pub file_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            report: ReportConfig::default(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            font_regular: PathBuf::from("public/fonts/AngsanaNew.ttf"),
            font_bold: PathBuf::from("public/fonts/AngsanaNew-Bold.ttf"),
            organization: DEFAULT_ORGANIZATION.to_string(),
            file_name: "Service-Order-Report.pdf".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = ReportConfig::default();
        let port = match env::var("SERVER_PORT") {
            Ok(port) => port
                .parse()
                .map_err(|_| ConfigError::InvalidPort(port))?,
            Err(_) => 3000,
        };

        Ok(Config {
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port,
            },
            report: ReportConfig {
                font_regular: env::var("REPORT_FONT_REGULAR")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.font_regular),
                font_bold: env::var("REPORT_FONT_BOLD")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.font_bold),
                organization: env::var("REPORT_ORGANIZATION").unwrap_or(defaults.organization),
                file_name: env::var("REPORT_FILE_NAME").unwrap_or(defaults.file_name),
            },
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid SERVER_PORT: {0}")]
    InvalidPort(String),
}
