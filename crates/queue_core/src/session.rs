use log::info;
use serde::{Deserialize, Serialize};

use crate::error::SessionError;

/// Category options requested from the platform session on activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionOptions {
    pub mix_with_others: bool,
    pub allow_air_play: bool,
    pub default_to_speaker: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            mix_with_others: true,
            allow_air_play: true,
            default_to_speaker: true,
        }
    }
}

/// The platform playback session that must be active while audio plays.
pub trait AudioSession {
    fn activate(&mut self, options: &SessionOptions) -> Result<(), SessionError>;
    fn deactivate(&mut self) -> Result<(), SessionError>;
}

/// Session for hosts without session negotiation (desktop platforms).
#[derive(Debug, Default)]
pub struct NullSession {
    active: bool,
}

impl NullSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl AudioSession for NullSession {
    fn activate(&mut self, options: &SessionOptions) -> Result<(), SessionError> {
        info!("audio session active ({:?})", options);
        self.active = true;
        Ok(())
    }

    fn deactivate(&mut self) -> Result<(), SessionError> {
        if self.active {
            info!("audio session deactivated");
        }
        self.active = false;
        Ok(())
    }
}
