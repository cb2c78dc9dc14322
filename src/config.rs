use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::error::{Error, ErrorKind, Result};
use crate::locale::Locale;

const CONFIG_PATH_ENV_VAR: &str = "MONCAL_CONFIG_FILE";

const DEFAULT_TICK_RATE_MS: u64 = 500;

pub(crate) fn find_configfile_locations() -> Result<Vec<PathBuf>> {
    let home = dirs::home_dir()
        .ok_or_else(|| Error::new(ErrorKind::ConfigParse, "Unable to find home directory"))?;

    let home_config: PathBuf = [home.as_path(), Path::new(".moncal.toml")].iter().collect();

    let config_xdg: PathBuf = if let Some(dir) = dirs::config_dir() {
        [dir.as_path(), Path::new("moncal"), Path::new("config.toml")]
            .iter()
            .collect()
    } else {
        [
            home.as_path(),
            Path::new(".config"),
            Path::new("moncal"),
            Path::new("config.toml"),
        ]
        .iter()
        .collect()
    };

    let mut locations = vec![config_xdg, home_config];

    if let Ok(path) = env::var(CONFIG_PATH_ENV_VAR) {
        locations.insert(0, PathBuf::from(path));
    }

    Ok(locations)
}

/// A marker as written in the configuration file.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct MarkerSpec {
    pub name: String,
    #[serde(default)]
    pub category: String,
    pub date: String,
    #[serde(default)]
    pub done: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tick_rate_ms: u64,
    pub locale: Locale,
    pub markers: Vec<MarkerSpec>,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            tick_rate_ms: DEFAULT_TICK_RATE_MS,
            locale: Locale::default(),
            markers: Vec::new(),
        }
    }
}

impl Config {
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms.max(1))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        content.parse::<Config>().map_err(|e| {
            let msg = format!(
                "{}: {}",
                path.display(),
                e.message.as_deref().unwrap_or_default()
            );
            e.with_msg(&msg)
        })
    }
}

impl FromStr for Config {
    type Err = Error;

    fn from_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

/// Loads the config from `path` if given. Otherwise the first existing file
/// of the default locations is used, falling back to the defaults.
pub fn load_suitable_config(path: Option<&Path>) -> Result<Config> {
    if let Some(path) = path {
        log::info!("Using config file {}", path.display());
        return Config::from_file(path);
    }

    let locations = match find_configfile_locations() {
        Ok(locations) => locations,
        Err(e) => {
            log::warn!("{}", e);
            Vec::new()
        }
    };

    for location in locations {
        if location.is_file() {
            log::info!("Using config file {}", location.display());
            return Config::from_file(&location);
        }
        log::debug!("No config file at {}", location.display());
    }

    log::info!("No config file found, using defaults");
    Ok(Config::default())
}
