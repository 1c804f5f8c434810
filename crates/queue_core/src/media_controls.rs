use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use log::warn;
use souvlaki::{
    MediaControlEvent, MediaControls, MediaMetadata, MediaPlayback, MediaPosition, PlatformConfig,
};

use crate::remote::{RemoteAdapter, RemoteCommand, RemoteConfig, RemoteTransportState};

/// [`RemoteAdapter`] publishing to the OS media controls through `souvlaki`.
pub struct MediaControlsHandler {
    controls: MediaControls,
    receiver: Receiver<RemoteCommand>,
    position: Option<Duration>,
}

#[derive(Debug, thiserror::Error)]
pub enum MediaControlsError {
    #[error("Failed to initialize media controls: {0}")]
    InitFailed(String),
    #[error("Failed to attach media controls: {0}")]
    AttachFailed(String),
    #[error("Failed to update media controls: {0}")]
    UpdateFailed(String),
}

impl MediaControlsHandler {
    pub fn new(display_name: &str) -> Result<Self, MediaControlsError> {
        let config = PlatformConfig {
            dbus_name: "queue_player",
            display_name,
            hwnd: None,
        };

        let mut controls = MediaControls::new(config)
            .map_err(|e| MediaControlsError::InitFailed(e.to_string()))?;

        let (sender, receiver) = mpsc::channel::<RemoteCommand>();

        Self::attach_handler(&mut controls, sender)?;

        Ok(Self {
            controls,
            receiver,
            position: None,
        })
    }

    fn attach_handler(
        controls: &mut MediaControls,
        sender: Sender<RemoteCommand>,
    ) -> Result<(), MediaControlsError> {
        controls
            .attach(move |event: MediaControlEvent| {
                let command = match event {
                    MediaControlEvent::Play => Some(RemoteCommand::Play),
                    MediaControlEvent::Pause => Some(RemoteCommand::Pause),
                    MediaControlEvent::Next => Some(RemoteCommand::Next),
                    MediaControlEvent::Previous => Some(RemoteCommand::Previous),
                    _ => None,
                };

                if let Some(command) = command {
                    let _ = sender.send(command);
                }
            })
            .map_err(|e| MediaControlsError::AttachFailed(e.to_string()))
    }

    fn set_playback(&mut self, playback: MediaPlayback) -> Result<(), MediaControlsError> {
        self.controls
            .set_playback(playback)
            .map_err(|e| MediaControlsError::UpdateFailed(e.to_string()))
    }

    fn try_publish(&mut self, config: &RemoteConfig) -> Result<(), MediaControlsError> {
        let duration = seconds_to_duration(config.total_duration);
        self.position = seconds_to_duration(config.elapsed_duration);

        self.controls
            .set_metadata(MediaMetadata {
                title: Some(config.title.as_str()),
                cover_url: config.artwork.as_ref().map(|artwork| artwork.url()),
                duration,
                ..Default::default()
            })
            .map_err(|e| MediaControlsError::UpdateFailed(e.to_string()))?;

        let progress = self.position.map(MediaPosition);
        if config.rate > 0.0 {
            self.set_playback(MediaPlayback::Playing { progress })
        } else {
            self.set_playback(MediaPlayback::Paused { progress })
        }
    }

    fn try_clear(&mut self) -> Result<(), MediaControlsError> {
        self.position = None;
        self.controls
            .set_metadata(MediaMetadata::default())
            .map_err(|e| MediaControlsError::UpdateFailed(e.to_string()))?;
        self.set_playback(MediaPlayback::Stopped)
    }
}

impl RemoteAdapter for MediaControlsHandler {
    fn publish(&mut self, config: &RemoteConfig) {
        if let Err(e) = self.try_publish(config) {
            warn!("{}", e);
        }
    }

    fn set_transport_state(&mut self, state: RemoteTransportState) {
        let progress = self.position.map(MediaPosition);
        let playback = match state {
            RemoteTransportState::Playing => MediaPlayback::Playing { progress },
            RemoteTransportState::Paused => MediaPlayback::Paused { progress },
            RemoteTransportState::Stopped => MediaPlayback::Stopped,
        };
        if let Err(e) = self.set_playback(playback) {
            warn!("{}", e);
        }
    }

    fn clear(&mut self) {
        if let Err(e) = self.try_clear() {
            warn!("{}", e);
        }
    }

    fn poll_commands(&mut self) -> Vec<RemoteCommand> {
        self.receiver.try_iter().collect()
    }
}

fn seconds_to_duration(seconds: f64) -> Option<Duration> {
    if seconds.is_finite() && seconds >= 0.0 {
        Some(Duration::from_secs_f64(seconds))
    } else {
        None
    }
}
