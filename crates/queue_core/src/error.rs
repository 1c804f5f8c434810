use std::path::PathBuf;

pub type Result<T, E = PlayerError> = std::result::Result<T, E>;

/// Errors returned by queue and controller setup.
#[derive(Debug, thiserror::Error)]
pub enum PlayerError {
    #[error("start index {index} is out of range for a queue of {len} items")]
    InvalidIndex { index: usize, len: usize },

    #[error("failed to activate audio session: {0}")]
    SessionActivation(#[source] SessionError),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("audio session unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to access config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("no config directory available on this platform")]
    NoConfigDir,
}
