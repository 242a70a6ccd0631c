use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::cli::Cli;
use crate::error::{Error, Result};

pub const DEFAULT_CONFIG_FILE: &str = "careerpact.toml";
pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_SAMPLE_ISSUER: &str = "株式会社サンプル";
pub const API_URL_ENV: &str = "CAREERPACT_API_URL";

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub api_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub sample_issuer: Option<String>,
    pub certificate_template: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_url: String,
    /// No timeout when unset; a hung request blocks its command.
    pub timeout_secs: Option<u64>,
    pub sample_issuer: String,
    pub certificate_template: Option<PathBuf>,
}

impl Config {
    /// Load `--config` (which must exist) or `careerpact.toml` in the
    /// working directory (which may be absent), then apply env and CLI
    /// overrides.
    pub fn load(cli: &Cli) -> Result<Self> {
        let file_config = match cli.config {
            Some(ref path) => {
                let path = Path::new(path);
                if !path.exists() {
                    return Err(Error::ConfigNotFound(path.to_path_buf()));
                }
                parse_config(&std::fs::read_to_string(path)?)?
            }
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    parse_config(&std::fs::read_to_string(path)?)?
                } else {
                    ConfigFile::default()
                }
            }
        };

        let env_url = std::env::var(API_URL_ENV).ok().filter(|v| !v.is_empty());
        let config = merge(file_config, env_url, cli);
        validate_api_url(&config.api_url)?;
        Ok(config)
    }
}

pub fn parse_config(content: &str) -> Result<ConfigFile> {
    let config: ConfigFile = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &ConfigFile) -> Result<()> {
    if let Some(ref url) = config.api_url {
        validate_api_url(url)?;
    }
    if let Some(timeout) = config.timeout_secs
        && timeout == 0
    {
        return Err(Error::ConfigValidation(
            "timeout_secs must be > 0".to_string(),
        ));
    }
    if let Some(ref issuer) = config.sample_issuer
        && issuer.trim().is_empty()
    {
        return Err(Error::ConfigValidation(
            "sample_issuer must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_api_url(url: &str) -> Result<()> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(Error::ConfigValidation(format!(
            "api_url must start with http:// or https://, got: {url}"
        )))
    }
}

/// Precedence: CLI flag, then environment, then file, then default.
pub fn merge(file: ConfigFile, env_url: Option<String>, cli: &Cli) -> Config {
    Config {
        api_url: cli
            .api_url
            .clone()
            .or(env_url)
            .or(file.api_url)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        timeout_secs: cli.timeout_secs.or(file.timeout_secs),
        sample_issuer: file
            .sample_issuer
            .unwrap_or_else(|| DEFAULT_SAMPLE_ISSUER.to_string()),
        certificate_template: file.certificate_template.map(PathBuf::from),
    }
}
