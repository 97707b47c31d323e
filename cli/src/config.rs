// SPDX-FileCopyrightText: 2025-2026 Edudesk Developers
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, path::PathBuf, str::FromStr};

use edudesk_api::ApiConfig;
use edudesk_core::{APP_NAME, ValidationRules};
use tokio::fs;

const EDUDESK_CONFIG_ENV: &str = "EDUDESK_CONFIG";

/// Locates and parses the configuration.
///
/// The path is taken from `--config`, then `EDUDESK_CONFIG`, then the user
/// config directory. Only a missing default file falls back to defaults.
#[tracing::instrument]
pub async fn parse_config(path: Option<PathBuf>) -> Result<Config, Box<dyn Error>> {
    let path = if let Some(path) = path {
        path
    } else if let Ok(env_path) = std::env::var(EDUDESK_CONFIG_ENV) {
        PathBuf::from(env_path)
    } else {
        let config = get_config_dir()?.join(format!("{APP_NAME}/config.toml"));
        if !config.exists() {
            tracing::info!(path = %config.display(), "no config file, using defaults");
            return Ok(Config::default());
        }
        config
    };

    let config = fs::read_to_string(&path)
        .await
        .map_err(|e| format!("Failed to read config file at {}: {}", path.display(), e))?
        .parse::<Config>()?;
    config.check();
    Ok(config)
}

/// Configuration for the Edudesk application.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct Config {
    /// Backend connection.
    #[serde(default)]
    pub api: ApiConfig,

    /// Optional validation rules.
    #[serde(default)]
    pub validation: ValidationRules,

    /// Directory holding the session file.
    #[serde(default)]
    pub state_dir: Option<PathBuf>,
}

impl FromStr for Config {
    type Err = Box<dyn Error>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut config: Config = toml::from_str(s)?;
        config.state_dir = config.state_dir.map(|p| expand_path(&p));
        Ok(config)
    }
}

impl Config {
    /// The state directory, defaulting to `$XDG_STATE_HOME/edudesk`.
    pub fn state_dir(&self) -> Result<PathBuf, Box<dyn Error>> {
        match &self.state_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(get_state_dir()?.join(APP_NAME)),
        }
    }

    fn check(&self) {
        let url = &self.api.base_url;
        if !url.starts_with("http://") && !url.starts_with("https://") {
            tracing::warn!(base_url = %url, "api.base_url has no http(s) scheme");
        }
        if self.api.timeout_secs == 0 {
            tracing::warn!("api.timeout_secs is 0, every request will time out");
        }
    }
}

fn expand_path(path: &std::path::Path) -> PathBuf {
    let Some(s) = path.to_str() else {
        return path.to_path_buf();
    };
    let rest = s
        .strip_prefix("~/")
        .or_else(|| s.strip_prefix("$HOME/"));
    match (rest, dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        (Some(_), None) => {
            tracing::warn!("home directory not found");
            path.to_path_buf()
        }
        (None, _) => path.to_path_buf(),
    }
}

fn get_config_dir() -> Result<PathBuf, Box<dyn Error>> {
    #[cfg(unix)]
    let config_dir = xdg::BaseDirectories::new().get_config_home();
    #[cfg(windows)]
    let config_dir = dirs::config_dir();
    config_dir.ok_or_else(|| "User-specific home directory not found".into())
}

fn get_state_dir() -> Result<PathBuf, Box<dyn Error>> {
    #[cfg(unix)]
    let state_dir = xdg::BaseDirectories::new().get_state_home();
    #[cfg(windows)]
    let state_dir = dirs::data_local_dir();
    state_dir.ok_or_else(|| "User-specific state directory not found".into())
}
