use std::{
    env::{self, VarError},
    fs::File,
    path::PathBuf,
    time::Duration,
};

use platform_dirs::AppDirs;
use serde::{Deserialize, Serialize};

use crate::{error::Error, storage::mkdir_if_not_exists};

const APP_NAME: &str = "Arcadia";
const CONFIG_FILENAME: &str = "config.json";
const PROXY_ENV_VAR: &str = "HTTPS_PROXY";

const CATALOG_URL: &str =
    "https://raw.githubusercontent.com/GLITCHED-OVERRIDE/Hypper-Drive-2/refs/heads/main/Games/Zones.json";
const NOT_FOUND_URL: &str =
    "https://raw.githubusercontent.com/GLITCHED-OVERRIDE/Malfunction/refs/heads/main/Pages/404.html";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub catalog_url: String,
    pub not_found_url: String,
    /// Origin that share links are built against.
    pub base_url: String,
    pub route_prefix: String,
    pub fetch_timeout_secs: u64,
    pub loader_threads: usize,
    pub share_notice_millis: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_url: CATALOG_URL.to_string(),
            not_found_url: NOT_FOUND_URL.to_string(),
            base_url: "http://localhost:3000".to_string(),
            route_prefix: "games".to_string(),
            fetch_timeout_secs: 30,
            loader_threads: 4,
            share_notice_millis: 2000,
        }
    }
}

impl Config {
    fn app_dirs() -> Option<AppDirs> {
        const USE_XDG_ON_MACOS: bool = false;

        AppDirs::new(Some(APP_NAME), USE_XDG_ON_MACOS)
    }

    pub fn config_dir() -> Option<PathBuf> {
        Self::app_dirs().map(|dirs| dirs.config_dir)
    }

    /// Where the recents and favorites lists are kept.
    pub fn data_dir() -> Option<PathBuf> {
        Self::app_dirs().map(|dirs| dirs.data_dir)
    }

    fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join(CONFIG_FILENAME))
    }

    pub fn load() -> Option<Config> {
        let path = Self::config_path()?;
        let file = File::open(&path).ok()?;
        log::info!("loading config: {:?}", &path);
        match serde_json::from_reader(file) {
            Ok(config) => Some(config),
            Err(err) => {
                log::error!("failed to read config {:?}: {}", &path, err);
                None
            }
        }
    }

    pub fn save(&self) -> Result<(), Error> {
        let dir = Self::config_dir().ok_or_else(no_config_dir)?;
        let path = Self::config_path().ok_or_else(no_config_dir)?;
        mkdir_if_not_exists(&dir)?;
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn share_notice(&self) -> Duration {
        Duration::from_millis(self.share_notice_millis)
    }

    pub fn proxy() -> Option<String> {
        env::var(PROXY_ENV_VAR).map_or_else(
            |err| match err {
                VarError::NotPresent => None,
                VarError::NotUnicode(_) => {
                    log::error!("proxy URL is not a valid unicode");
                    None
                }
            },
            Some,
        )
    }
}

fn no_config_dir() -> Error {
    Error::IoError(std::io::Error::new(
        std::io::ErrorKind::NotFound,
        "no config directory",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"base_url":"https://arcade.example","loader_threads":2}"#)
                .unwrap();
        assert_eq!(config.base_url, "https://arcade.example");
        assert_eq!(config.loader_threads, 2);
        assert_eq!(config.route_prefix, "games");
        assert_eq!(config.fetch_timeout(), Duration::from_secs(30));
        assert_eq!(config.share_notice(), Duration::from_secs(2));
    }
}
