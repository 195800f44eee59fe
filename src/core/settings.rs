use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Read},
    net::{Ipv4Addr, SocketAddr},
    path::{Path, PathBuf},
};
use thiserror::Error;

use crate::core::data::DEFAULT_BODY_LIMIT;

pub const DEFAULT_SETTINGS_PATH: &str = "core/settings.json";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("could not read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("settings file {path} is malformed: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// A stored value together with the label shown when settings are listed.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Setting<T> {
    pub name: String,
    pub value: T,
}

impl<T> Setting<T> {
    fn new(name: &str, value: T) -> Self {
        Setting {
            name: name.to_string(),
            value,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub bind_addr: Setting<SocketAddr>,
    pub api_base_url: Setting<String>,
    pub log_level: Setting<String>,
    pub log_json: Setting<bool>,
    pub body_limit_bytes: Setting<usize>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings::new()
    }
}

impl Settings {
    pub fn new() -> Self {
        Settings {
            bind_addr: Setting::new(
                "Bind Address",
                SocketAddr::new(Ipv4Addr::new(127, 0, 0, 1).into(), 4010),
            ),
            api_base_url: Setting::new("Project API Base URL", "http://127.0.0.1:3000".to_string()),
            log_level: Setting::new("Log Level", "info".to_string()),
            log_json: Setting::new("JSON Logs", false),
            body_limit_bytes: Setting::new("Response Body Limit", DEFAULT_BODY_LIMIT),
        }
    }

    /// Reads a settings file. Keys missing from the file keep their defaults.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let file = File::open(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut buffer = Vec::new();
        BufReader::new(file)
            .read_to_end(&mut buffer)
            .map_err(|source| SettingsError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        serde_json::from_slice::<Settings>(&buffer).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// An explicit path must load. Without one, the default location is used
    /// only if a file exists there.
    pub fn discover(path: Option<&Path>) -> Result<Self, SettingsError> {
        match path {
            Some(path) => Settings::load(path),
            None => {
                let default_path = Path::new(DEFAULT_SETTINGS_PATH);
                if default_path.is_file() {
                    Settings::load(default_path)
                } else {
                    Ok(Settings::new())
                }
            }
        }
    }
}
