// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::path::{Path, PathBuf};

use jiff::tz::TimeZone;

use crate::event::Category;

/// The name of the application.
pub const APP_NAME: &str = "eventdesk";

/// Configuration for the eventdesk core.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    /// Directory holding the event documents.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// IANA time zone used to display dates, e.g. "Asia/Shanghai".
    /// Defaults to the system time zone.
    #[serde(default)]
    pub timezone: Option<String>,

    /// Categories offered by the event form.
    #[serde(default = "default_categories")]
    pub categories: Vec<Category>,
}

impl Config {
    /// Normalize the configuration.
    pub fn normalize(&mut self) -> Result<(), Box<dyn Error>> {
        self.data_dir = Some(match &self.data_dir {
            Some(a) => {
                expand_path(a).map_err(|e| format!("Failed to expand data directory path: {e}"))?
            }
            None => get_data_dir()?.join(APP_NAME),
        });
        Ok(())
    }

    /// Resolves the configured time zone.
    pub fn time_zone(&self) -> Result<TimeZone, Box<dyn Error>> {
        match &self.timezone {
            Some(name) => TimeZone::get(name)
                .map_err(|e| format!("Unknown time zone {name}: {e}").into()),
            None => Ok(TimeZone::system()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            timezone: None,
            categories: default_categories(),
        }
    }
}

fn default_categories() -> Vec<Category> {
    [
        ("web-dev", "Web Dev"),
        ("design", "Design"),
        ("remix", "Remix"),
        ("vite", "Vite"),
        ("nuxt", "Nuxt"),
        ("vue", "Vue"),
        ("svelte", "Svelte"),
        ("angular", "Angular"),
        ("ember", "Ember"),
        ("gatsby", "Gatsby"),
        ("astro", "Astro"),
    ]
    .into_iter()
    .map(|(id, label)| Category::new(id, label))
    .collect()
}

/// Handle tilde (~) and environment variables in the path
fn expand_path(path: &Path) -> Result<PathBuf, Box<dyn Error>> {
    if path.is_absolute() {
        return Ok(path.to_owned());
    }

    let path = path.to_str().ok_or("Invalid path")?;

    // Handle tilde and home directory
    let home_prefixes: &[&str] = if cfg!(unix) {
        &["~/", "$HOME/", "${HOME}/"]
    } else {
        &[r"~\", "~/", r"%UserProfile%\", r"%UserProfile%/"]
    };
    for prefix in home_prefixes {
        if let Some(stripped) = path.strip_prefix(prefix) {
            return Ok(get_home_dir()?.join(stripped));
        }
    }

    // Handle data directories
    let data_prefixes: &[&str] = if cfg!(unix) {
        &["$XDG_DATA_HOME/", "${XDG_DATA_HOME}/"]
    } else {
        &[r"%LOCALAPPDATA%\", "%LOCALAPPDATA%/"]
    };
    for prefix in data_prefixes {
        if let Some(stripped) = path.strip_prefix(prefix) {
            return Ok(get_data_dir()?.join(stripped));
        }
    }

    Ok(path.into())
}

fn get_home_dir() -> Result<PathBuf, Box<dyn Error>> {
    dirs::home_dir().ok_or("User-specific home directory not found".into())
}

fn get_data_dir() -> Result<PathBuf, Box<dyn Error>> {
    #[cfg(unix)]
    let data_dir = xdg::BaseDirectories::new().get_data_home();
    #[cfg(windows)]
    let data_dir = dirs::data_local_dir();
    data_dir.ok_or("User-specific data directory not found".into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_path_home_env() {
        let home = get_home_dir().unwrap();
        let home_prefixes: &[&str] = if cfg!(unix) {
            &["~", "$HOME", "${HOME}"]
        } else {
            &[r"~", r"%UserProfile%"]
        };
        for prefix in home_prefixes {
            let result = expand_path(&PathBuf::from(format!("{prefix}/events"))).unwrap();
            assert_eq!(result, home.join("events"));
            assert!(result.is_absolute());
        }
    }

    #[test]
    fn test_expand_path_data() {
        let data_dir = get_data_dir().unwrap();
        let data_prefixes: &[&str] = if cfg!(unix) {
            &["$XDG_DATA_HOME", "${XDG_DATA_HOME}"]
        } else {
            &[r"%LOCALAPPDATA%"]
        };
        for prefix in data_prefixes {
            let result = expand_path(&PathBuf::from(format!("{prefix}/eventdesk"))).unwrap();
            assert_eq!(result, data_dir.join("eventdesk"));
        }
    }

    #[test]
    fn test_expand_path_absolute_and_relative() {
        let absolute_path = PathBuf::from("/srv/events");
        assert_eq!(expand_path(&absolute_path).unwrap(), absolute_path);

        let relative_path = PathBuf::from("relative/path");
        assert_eq!(expand_path(&relative_path).unwrap(), relative_path);
    }

    #[test]
    fn test_normalize_fills_data_dir() {
        let mut config = Config::default();
        config.normalize().unwrap();
        let data_dir = config.data_dir.unwrap();
        assert!(data_dir.ends_with(APP_NAME));
    }

    #[test]
    fn test_time_zone() {
        let config = Config {
            timezone: Some("UTC".to_string()),
            ..Config::default()
        };
        assert_eq!(config.time_zone().unwrap().iana_name(), Some("UTC"));

        let config = Config {
            timezone: Some("Mars/Olympus_Mons".to_string()),
            ..Config::default()
        };
        assert!(config.time_zone().is_err());
    }

    #[test]
    fn test_deserialize_defaults() {
        let config: Config = toml::from_str(r#"data_dir = "/tmp/eventdesk""#).unwrap();
        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/eventdesk")));
        assert_eq!(config.categories.len(), 11);
        assert_eq!(config.categories[0], Category::new("web-dev", "Web Dev"));
    }
}
