use std::rc::{Rc, Weak};

use log::{debug, info, warn};

use crate::audio::{PlaybackPosition, QueueItem};
use crate::config::PlayerConfig;
use crate::delegate::{PlayerDataSource, PlayerDelegate};
use crate::error::{PlayerError, Result};
use crate::playback::{ItemEndAction, PlaybackState, PlaybackStateMachine};
use crate::queue::PlaybackQueue;
use crate::remote::{RemoteAdapter, RemoteCommand, RemoteConfig, RemoteTransportState};
use crate::session::AudioSession;
use crate::transport::Transport;

/// Repeats one queue entry until looping is turned off.
#[derive(Debug, Clone)]
struct Looper {
    template: QueueItem,
    index: usize,
}

/// Sequential playback over a [`PlaybackQueue`], driving a transport, an
/// audio session and the OS now-playing surface.
///
/// The controller is single threaded. The host calls [`tick`](Self::tick)
/// every `config.tick_interval` and forwards media-key commands from the
/// same thread.
pub struct PlayerController<T, S, R> {
    transport: T,
    session: S,
    remote: R,
    config: PlayerConfig,

    queue: PlaybackQueue,
    machine: PlaybackStateMachine,
    looper: Option<Looper>,

    delegate: Option<Weak<dyn PlayerDelegate>>,
    data_source: Option<Weak<dyn PlayerDataSource>>,

    observing: bool,
    remote_routing: bool,
}

impl<T, S, R> PlayerController<T, S, R>
where
    T: Transport,
    S: AudioSession,
    R: RemoteAdapter,
{
    pub fn new(transport: T, session: S, remote: R, config: PlayerConfig) -> Self {
        Self {
            transport,
            session,
            remote,
            config,
            queue: PlaybackQueue::new(),
            machine: PlaybackStateMachine::new(),
            looper: None,
            delegate: None,
            data_source: None,
            observing: false,
            remote_routing: false,
        }
    }

    pub fn set_delegate<D: PlayerDelegate + 'static>(&mut self, delegate: &Rc<D>) {
        let delegate: Rc<dyn PlayerDelegate> = delegate.clone();
        self.delegate = Some(Rc::downgrade(&delegate));
    }

    pub fn clear_delegate(&mut self) {
        self.delegate = None;
    }

    pub fn set_data_source<D: PlayerDataSource + 'static>(&mut self, data_source: &Rc<D>) {
        let data_source: Rc<dyn PlayerDataSource> = data_source.clone();
        self.data_source = Some(Rc::downgrade(&data_source));
    }

    pub fn clear_data_source(&mut self) {
        self.data_source = None;
    }

    pub fn state(&self) -> PlaybackState {
        self.machine.state()
    }

    pub fn queue(&self) -> &PlaybackQueue {
        &self.queue
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    pub fn remote_mut(&mut self) -> &mut R {
        &mut self.remote
    }

    pub fn is_paused(&self) -> bool {
        self.transport.rate() == 0.0
    }

    pub fn is_repeat_enabled(&self) -> bool {
        self.looper.is_some()
    }

    pub fn current_item(&self) -> Option<&QueueItem> {
        self.queue.current()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.queue.current_index()
    }

    pub fn position(&self) -> PlaybackPosition {
        PlaybackPosition {
            elapsed: self.transport.current_time(),
            total: self.transport.current_duration(),
        }
    }

    pub fn is_at_last_item(&self) -> bool {
        self.queue.is_at_last()
    }

    /// Identifier of the current item, asking the data source first.
    pub fn current_item_id(&self) -> Option<String> {
        let item = self.queue.current()?;
        self.data_source()
            .and_then(|source| source.id_for_item(item))
            .or_else(|| item.id().map(String::from))
    }

    /// Replace the queue with `items` and position playback at `start_index`.
    pub fn load_items(&mut self, items: Vec<QueueItem>, start_index: usize) -> Result<()> {
        if start_index >= items.len() {
            return Err(PlayerError::InvalidIndex {
                index: start_index,
                len: items.len(),
            });
        }

        self.session
            .activate(&self.config.session)
            .map_err(PlayerError::SessionActivation)?;
        info!("loading {} items at index {}", items.len(), start_index);

        self.queue.load(items, start_index)?;
        self.looper = None;
        self.configure_transport(start_index);
        self.machine.reset();
        if self.machine.is_playing() {
            self.transport.play();
        }

        self.observing = true;
        self.remote_routing = true;
        self.handle_item_changed();
        Ok(())
    }

    /// Toggle between playing and paused.
    ///
    /// With an empty queue the controller becomes `Invalid` instead.
    pub fn play(&mut self) {
        self.publish_remote_config();

        let target = self.machine.toggle_target(self.queue.is_empty());
        self.transition(target);
        if target == PlaybackState::Invalid {
            return;
        }

        if let (Some(item), Some(index)) = (self.queue.current(), self.queue.current_index()) {
            if let Some(delegate) = self.delegate() {
                delegate.on_item_changed(item, index);
            }
        }
    }

    pub fn pause(&mut self) {
        if self.machine.is_playing() {
            self.play();
        }
    }

    pub fn stop(&mut self) {
        self.transition(PlaybackState::Invalid);

        self.transport.pause();
        self.transport.clear();
        self.queue.clear();
        self.looper = None;
        self.observing = false;
        self.remote_routing = false;

        if let Err(e) = self.session.deactivate() {
            warn!("failed to deactivate audio session: {}", e);
        }
        self.remote.clear();
    }

    /// Seek by `delta_seconds` from the current position.
    ///
    /// Seeking backwards from exactly zero does nothing. The target is not
    /// clamped to the item's duration.
    pub fn seek_relative(&mut self, delta_seconds: f64) {
        let current = self.transport.current_time();
        if delta_seconds < 0.0 && current == 0.0 {
            return;
        }
        self.seek_absolute(current + delta_seconds);
    }

    pub fn rewind(&mut self) {
        self.seek_relative(-self.config.seek_interval_secs);
    }

    pub fn fast_forward(&mut self) {
        self.seek_relative(self.config.seek_interval_secs);
    }

    pub fn seek_absolute(&mut self, seconds: f64) {
        debug!("seek to {:.1}s", seconds);
        self.transport.seek(seconds);
        self.queue.set_elapsed(seconds);
    }

    /// Flip repeat for the current item and return the new setting.
    ///
    /// Repeat cannot be enabled while nothing is queued.
    pub fn toggle_looping(&mut self) -> bool {
        if self.looper.take().is_some() {
            debug!("looping disabled");
            return false;
        }

        match (self.queue.current(), self.queue.current_index()) {
            (Some(item), Some(index)) => {
                debug!("looping item {}", index);
                self.looper = Some(Looper {
                    template: item.clone(),
                    index,
                });
                true
            }
            _ => {
                warn!("cannot enable looping without a current item");
                false
            }
        }
    }

    pub fn skip_forward(&mut self) {
        if self.queue.is_at_last() {
            return;
        }
        if self.queue.advance() {
            self.transport.advance_to_next_item();
            self.handle_item_changed();
        }
    }

    /// Restart the previous item, or the current one when already first.
    ///
    /// Moving back rebuilds the whole transport queue at the new index.
    pub fn skip_back(&mut self) {
        let before = self.queue.current_index();
        self.queue.retreat_and_restart();

        let after = self.queue.current_index();
        if let Some(index) = after.filter(|_| after != before) {
            self.configure_transport(index);
            if self.machine.is_playing() {
                self.transport.play();
            }
            self.handle_item_changed();
        }
        self.transport.seek(0.0);
    }

    /// Periodic position observer.
    pub fn tick(&mut self) {
        if !self.observing {
            return;
        }
        if self.transport.item_finished() {
            self.handle_item_end();
        }

        let elapsed = self.transport.current_time();
        if !elapsed.is_finite() {
            return;
        }
        self.queue.set_elapsed(elapsed);

        let total = self.transport.current_duration();
        if !total.is_finite() {
            return;
        }
        self.publish_remote_config();
        if let Some(delegate) = self.delegate() {
            delegate.on_duration_update(whole_seconds(elapsed), whole_seconds(total));
        }
    }

    pub fn handle_remote_command(&mut self, command: RemoteCommand) {
        if !self.remote_routing {
            debug!("ignoring remote {:?}, nothing loaded", command);
            return;
        }
        debug!("remote command {:?}", command);

        match command {
            RemoteCommand::Next => self.skip_forward(),
            RemoteCommand::Previous => self.skip_back(),
            RemoteCommand::Play => self.transition(PlaybackState::Playing),
            RemoteCommand::Pause => self.transition(PlaybackState::Paused),
        }
    }

    /// Drain and route every command the remote adapter has received.
    pub fn pump_remote_commands(&mut self) {
        for command in self.remote.poll_commands() {
            self.handle_remote_command(command);
        }
    }

    fn transition(&mut self, to: PlaybackState) {
        if !self.machine.transition(to) {
            return;
        }

        match to {
            PlaybackState::Playing => {
                self.transport.play();
                self.remote.set_transport_state(RemoteTransportState::Playing);
                if let Some(delegate) = self.delegate() {
                    delegate.on_playing(to);
                }
            }
            PlaybackState::Paused => {
                self.transport.pause();
                self.remote.set_transport_state(RemoteTransportState::Paused);
                if let Some(delegate) = self.delegate() {
                    delegate.on_paused(to);
                }
            }
            PlaybackState::Invalid => {
                self.remote.set_transport_state(RemoteTransportState::Stopped);
                if let Some(delegate) = self.delegate() {
                    delegate.on_became_invalid(to);
                }
            }
            PlaybackState::Pending => {}
        }
    }

    fn configure_transport(&mut self, start_index: usize) {
        self.transport.replace_queue(self.queue.items());
        for _ in 0..start_index {
            self.transport.advance_to_next_item();
        }
    }

    fn handle_item_changed(&mut self) {
        let (Some(item), Some(index)) = (self.queue.current(), self.queue.current_index()) else {
            return;
        };

        if let Some(delegate) = self.delegate() {
            delegate.on_item_changed(item, index);
        }
        let action = if self.queue.is_at_last() {
            ItemEndAction::Pause
        } else {
            ItemEndAction::Advance
        };
        self.transport.set_action_at_item_end(action);
        self.publish_remote_config();
    }

    fn handle_item_end(&mut self) {
        let looping = match (&self.looper, self.queue.current()) {
            (Some(looper), Some(current)) => {
                self.queue.current_index() == Some(looper.index) && *current == looper.template
            }
            _ => false,
        };

        if looping {
            debug!("looping current item");
            self.seek_absolute(0.0);
            self.transport.play();
        } else if !self.machine.is_playing() {
            debug!("item ended while not playing, staying put");
        } else if !self.queue.is_at_last() {
            self.skip_forward();
        } else {
            debug!("reached end of queue");
            self.transition(PlaybackState::Paused);
        }
    }

    fn publish_remote_config(&mut self) {
        let Some(index) = self.queue.current_index() else {
            return;
        };
        let source = self.data_source();
        let config = RemoteConfig {
            rate: self.transport.rate(),
            title: source
                .as_ref()
                .and_then(|source| source.title_for_index(index))
                .unwrap_or_default(),
            artwork: source.and_then(|source| source.artwork_for_index(index)),
            total_duration: self.transport.current_duration(),
            elapsed_duration: self.transport.current_time(),
        };
        self.remote.publish(&config);
    }

    fn delegate(&self) -> Option<Rc<dyn PlayerDelegate>> {
        self.delegate.as_ref().and_then(Weak::upgrade)
    }

    fn data_source(&self) -> Option<Rc<dyn PlayerDataSource>> {
        self.data_source.as_ref().and_then(Weak::upgrade)
    }
}

fn whole_seconds(seconds: f64) -> u64 {
    seconds.max(0.0) as u64
}
