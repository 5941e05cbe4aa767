use crate::export::ExportFormat;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

/// Defaults read from `<config_dir>/mfa-report/config.toml`.
/// Command line arguments take precedence over every key.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub output_dir: Option<PathBuf>,
    pub format: Option<ExportFormat>,
    pub tenant_domain: Option<String>,
    pub ca_certificate: Option<PathBuf>,
    pub concurrency: Option<usize>,
    pub timeout_secs: Option<u64>,
    pub api_version: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Config::default()),
        }
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid config file {}", path.display()))
    }

    fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    fn config_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir()?;
        path.push("mfa-report");
        path.push("config.toml");
        Some(path)
    }
}
