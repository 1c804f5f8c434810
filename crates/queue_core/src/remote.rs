use crate::audio::Artwork;

/// Snapshot of what the OS now-playing surface should show.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteConfig {
    pub rate: f32,
    pub title: String,
    pub artwork: Option<Artwork>,
    pub total_duration: f64,
    pub elapsed_duration: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteTransportState {
    Playing,
    Paused,
    Stopped,
}

/// Transport commands coming from media keys or the lock screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteCommand {
    Play,
    Pause,
    Next,
    Previous,
}

/// OS lock-screen / media-key integration.
pub trait RemoteAdapter {
    fn publish(&mut self, config: &RemoteConfig);
    fn set_transport_state(&mut self, state: RemoteTransportState);

    /// Remove all now-playing information.
    fn clear(&mut self);

    /// Drain commands received since the last call.
    fn poll_commands(&mut self) -> Vec<RemoteCommand>;
}

/// Adapter that discards everything, for hosts without media keys.
#[derive(Debug, Default)]
pub struct NoRemote;

impl RemoteAdapter for NoRemote {
    fn publish(&mut self, _config: &RemoteConfig) {}

    fn set_transport_state(&mut self, _state: RemoteTransportState) {}

    fn clear(&mut self) {}

    fn poll_commands(&mut self) -> Vec<RemoteCommand> {
        Vec::new()
    }
}

impl<R: RemoteAdapter + ?Sized> RemoteAdapter for Box<R> {
    fn publish(&mut self, config: &RemoteConfig) {
        (**self).publish(config)
    }

    fn set_transport_state(&mut self, state: RemoteTransportState) {
        (**self).set_transport_state(state)
    }

    fn clear(&mut self) {
        (**self).clear()
    }

    fn poll_commands(&mut self) -> Vec<RemoteCommand> {
        (**self).poll_commands()
    }
}
