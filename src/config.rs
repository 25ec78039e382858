//! Client configuration.
//!
//! An explicit config object threaded into the registry client - never
//! ambient global state. Values come from an optional `config.json` in the
//! platform config directory, overridden by `BLOCKFORGE_*` env vars.

use crate::error::{BlockforgeError, Result};
use crate::project_identity;
use directories::ProjectDirs;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub registry_url: String,
    pub timeout: Duration,
    /// Bearer token for authenticated endpoints. Acquiring and refreshing it
    /// is the auth collaborator's job; we only forward it.
    pub token: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            registry_url: project_identity::DEFAULT_REGISTRY_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            token: None,
        }
    }
}

/// On-disk shape of config.json. All fields optional.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    registry_url: Option<String>,
    timeout_secs: Option<u64>,
    token: Option<String>,
}

pub fn config_dir() -> Result<PathBuf> {
    let proj = ProjectDirs::from("dev", "blockforge", project_identity::CONFIG_DIR_NAME)
        .ok_or_else(|| {
            BlockforgeError::ConfigError("Could not determine config directory".to_string())
        })?;
    Ok(proj.config_dir().to_path_buf())
}

pub fn config_file() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.json"))
}

/// Load config: defaults <- config file <- environment.
pub fn load() -> Result<ClientConfig> {
    let mut file_cfg = ConfigFile::default();
    if let Ok(path) = config_file()
        && path.exists()
    {
        let data = fs::read_to_string(&path).map_err(|e| BlockforgeError::IoError {
            path: path.clone(),
            source: e,
        })?;
        file_cfg = serde_json::from_str(&data).map_err(|e| {
            BlockforgeError::ConfigError(format!("Invalid config at {}: {}", path.display(), e))
        })?;
    }

    let mut cfg = ClientConfig::default();

    if let Some(url) = file_cfg.registry_url {
        cfg.registry_url = url;
    }
    if let Some(secs) = file_cfg.timeout_secs {
        cfg.timeout = Duration::from_secs(secs);
    }
    cfg.token = file_cfg.token;

    if let Ok(url) = std::env::var(project_identity::env_key("REGISTRY_URL")) {
        cfg.registry_url = url;
    }
    if let Ok(secs) = std::env::var(project_identity::env_key("TIMEOUT_SECS")) {
        let secs: u64 = secs.parse().map_err(|_| {
            BlockforgeError::ConfigError(format!(
                "{} must be an integer number of seconds",
                project_identity::env_key("TIMEOUT_SECS")
            ))
        })?;
        cfg.timeout = Duration::from_secs(secs);
    }
    if let Ok(token) = std::env::var(project_identity::env_key("TOKEN")) {
        if !token.is_empty() {
            cfg.token = Some(token);
        }
    }

    Ok(cfg)
}
