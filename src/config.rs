use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::provider::{file, Error, ErrorKind, Result};

const CONFIG_PATH_ENV_VAR: &str = "MIGRACAL_CONFIG_FILE";

pub(crate) fn find_configfile_locations() -> Vec<PathBuf> {
    let mut locations = Vec::new();

    if let Ok(path) = env::var(CONFIG_PATH_ENV_VAR) {
        locations.push(PathBuf::from(path));
    }

    if let Some(dir) = dirs::config_dir() {
        locations.push(dir.join("migracal").join("config.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        locations.push(home.join(".migracal.toml"));
    }

    locations
}

/// Expands a leading `~` to the home directory.
pub(crate) fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_owned(),
    }
}

fn default_provider() -> String {
    file::PROVIDER_NAME.to_owned()
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DiaryConfig {
    pub name: String,
    pub path: PathBuf,
    #[serde(default = "default_provider")]
    pub provider: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub today_symbol: char,
    pub item_symbol: char,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            today_symbol: '*',
            item_symbol: '+',
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Config {
    #[serde(rename = "diary", default)]
    pub diaries: Vec<DiaryConfig>,
    #[serde(default)]
    pub display: DisplayConfig,
}

impl Config {
    pub fn from_toml(content: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(content)
            .map_err(|e| Error::new(ErrorKind::ConfigParse, &e.to_string()))?;

        for diary in config.diaries.iter_mut() {
            diary.path = expand_home(&diary.path);
        }

        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Config::from_toml(&content).map_err(|e| {
            let msg = format!(
                "{}: {}",
                path.display(),
                e.message.as_deref().unwrap_or_default()
            );
            e.with_msg(&msg)
        })
    }

    pub fn diary(&self, name: &str) -> Option<&DiaryConfig> {
        self.diaries.iter().find(|diary| diary.name == name)
    }
}

/// Uses `path` if given, otherwise the first existing default location.
/// Falls back to the built-in defaults when nothing is found.
pub fn load_suitable_config(path: Option<&Path>) -> Result<Config> {
    if let Some(path) = path {
        return Config::from_file(path);
    }

    for location in find_configfile_locations() {
        if location.is_file() {
            log::info!("Using config file '{}'", location.display());
            return Config::from_file(&location);
        }
    }

    log::info!("No config file found, using defaults");
    Ok(Config::default())
}
