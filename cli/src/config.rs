// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, path::PathBuf, str::FromStr};

use tokio::fs;

use eventdesk_core::{APP_NAME, Config};

const CONFIG_ENV: &str = "EVENTDESK_CONFIG";
const DEV_ENV: &str = "EVENTDESK_DEV";

const DEV_VALID_TRUE: &[&str] = &["1", "true", "yes"];
const DEV_VALID_FALSE: &[&str] = &["0", "false", "no"];

/// Resolves and reads the configuration: `--config`, then `EVENTDESK_CONFIG`,
/// then the user config directory. A missing default file yields the defaults.
#[tracing::instrument]
pub async fn parse_config(path: Option<PathBuf>) -> Result<Config, Box<dyn Error>> {
    let path = if let Some(path) = path {
        path
    } else if let Ok(env_path) = std::env::var(CONFIG_ENV) {
        PathBuf::from(env_path)
    } else {
        if let Some(true) = is_dev_mode() {
            return Err(format!(
                "Development environment detected ({DEV_ENV} is set): config must be explicitly specified via --config or {CONFIG_ENV} environment variable",
            ).into());
        }

        let config = get_config_dir()?.join(format!("{APP_NAME}/config.toml"));
        if !config.exists() {
            tracing::debug!(path = %config.display(), "no config file, using defaults");
            return Ok(Config::default());
        }
        config
    };

    fs::read_to_string(&path)
        .await
        .map_err(|e| format!("Failed to read config file at {}: {}", path.display(), e))?
        .parse::<ConfigRaw>()
        .map(|a| a.core)
}

#[derive(Debug, serde::Deserialize)]
struct ConfigRaw {
    core: Config,
}

impl FromStr for ConfigRaw {
    type Err = Box<dyn Error>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}

fn get_config_dir() -> Result<PathBuf, Box<dyn Error>> {
    #[cfg(unix)]
    let config_dir = xdg::BaseDirectories::new().get_config_home();
    #[cfg(windows)]
    let config_dir = dirs::config_dir();
    config_dir.ok_or_else(|| "User-specific home directory not found".into())
}

fn is_dev_mode() -> Option<bool> {
    let val = std::env::var(DEV_ENV).ok()?;
    let lower = val.to_lowercase();
    if DEV_VALID_TRUE.contains(&lower.as_str()) {
        Some(true)
    } else if DEV_VALID_FALSE.contains(&lower.as_str()) {
        Some(false)
    } else {
        tracing::warn!(
            "Unrecognized value for {}: '{}'. Expected one of: true: {}, false: {}. Treating as unset.",
            DEV_ENV,
            val,
            DEV_VALID_TRUE.join(", "),
            DEV_VALID_FALSE.join(", ")
        );
        None
    }
}
