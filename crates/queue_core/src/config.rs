use std::path::{Path, PathBuf};
use std::time::Duration;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::session::SessionOptions;

pub fn config_root() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("queue-player"))
}

pub fn config_path() -> Option<PathBuf> {
    config_root().map(|root| root.join("config.json"))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Step used by rewind and fast-forward.
    pub seek_interval_secs: f64,
    /// How often the host should call `tick`.
    #[serde(with = "millis_serde", rename = "tick_interval_ms")]
    pub tick_interval: Duration,
    pub session: SessionOptions,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            seek_interval_secs: 15.0,
            tick_interval: Duration::from_millis(500),
            session: SessionOptions::default(),
        }
    }
}

impl PlayerConfig {
    /// Load from the per-user config file, falling back to defaults when it
    /// does not exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = config_path().ok_or(ConfigError::NoConfigDir)?;
        Self::load_from(path)
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("no config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, json).map_err(io_err)
    }
}

mod millis_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(
        duration: &Duration,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        (duration.as_millis() as u64).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = PlayerConfig::load_from(dir.path().join("absent.json")).unwrap();

        assert_eq!(config, PlayerConfig::default());
        assert_eq!(config.seek_interval_secs, 15.0);
        assert_eq!(config.tick_interval, Duration::from_millis(500));
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{ "seek_interval_secs": 30.0, "session": { "mix_with_others": false } }"#,
        )
        .unwrap();

        let config = PlayerConfig::load_from(&path).unwrap();

        assert_eq!(config.seek_interval_secs, 30.0);
        assert_eq!(config.tick_interval, Duration::from_millis(500));
        assert!(!config.session.mix_with_others);
        assert!(config.session.allow_air_play);
    }

    #[test]
    fn save_then_load_keeps_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = PlayerConfig {
            tick_interval: Duration::from_millis(250),
            ..PlayerConfig::default()
        };

        config.save_to(&path).unwrap();

        assert_eq!(PlayerConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(matches!(
            PlayerConfig::load_from(&path),
            Err(ConfigError::Parse { .. })
        ));
    }
}
