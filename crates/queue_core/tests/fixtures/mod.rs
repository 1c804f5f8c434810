#![allow(dead_code)]

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use queue_core::{
    Artwork, ItemEndAction, NullSession, PlaybackState, PlayerConfig, PlayerController,
    PlayerDataSource, PlayerDelegate, QueueItem, RemoteAdapter, RemoteCommand, RemoteConfig,
    RemoteTransportState, Transport,
};

pub type TestController = PlayerController<FakeTransport, NullSession, RecordingRemote>;

pub fn controller() -> TestController {
    PlayerController::new(
        FakeTransport::default(),
        NullSession::new(),
        RecordingRemote::default(),
        PlayerConfig::default(),
    )
}

pub fn items(names: &[&str]) -> Vec<QueueItem> {
    names
        .iter()
        .map(|name| QueueItem::new(format!("{name}.mp3")).with_id(*name))
        .collect()
}

pub fn current_id(controller: &TestController) -> Option<&str> {
    controller.current_item().and_then(|item| item.id())
}

#[derive(Debug, Clone, PartialEq)]
pub enum TransportCall {
    Play,
    Pause,
    ReplaceQueue(usize),
    Clear,
    Advance,
    Seek(f64),
    EndAction(ItemEndAction),
}

/// In-memory transport whose clock only moves when a test moves it.
#[derive(Debug)]
pub struct FakeTransport {
    pub calls: Vec<TransportCall>,
    pub items: Vec<QueueItem>,
    pub index: Option<usize>,
    pub playing: bool,
    pub time: f64,
    pub duration: f64,
    pub finished: bool,
    pub end_action: ItemEndAction,
}

impl Default for FakeTransport {
    fn default() -> Self {
        Self {
            calls: Vec::new(),
            items: Vec::new(),
            index: None,
            playing: false,
            time: 0.0,
            duration: f64::NAN,
            finished: false,
            end_action: ItemEndAction::Advance,
        }
    }
}

impl FakeTransport {
    pub fn current(&self) -> Option<&QueueItem> {
        self.index.and_then(|index| self.items.get(index))
    }

    pub fn take_calls(&mut self) -> Vec<TransportCall> {
        std::mem::take(&mut self.calls)
    }

    fn restart_item(&mut self) {
        self.time = 0.0;
        self.finished = false;
    }
}

impl Transport for FakeTransport {
    fn play(&mut self) {
        self.calls.push(TransportCall::Play);
        self.playing = true;
    }

    fn pause(&mut self) {
        self.calls.push(TransportCall::Pause);
        self.playing = false;
    }

    fn rate(&self) -> f32 {
        if self.playing {
            1.0
        } else {
            0.0
        }
    }

    fn replace_queue(&mut self, items: &[QueueItem]) {
        self.calls.push(TransportCall::ReplaceQueue(items.len()));
        self.items = items.to_vec();
        self.index = if items.is_empty() { None } else { Some(0) };
        self.restart_item();
    }

    fn clear(&mut self) {
        self.calls.push(TransportCall::Clear);
        self.items.clear();
        self.index = None;
        self.restart_item();
    }

    fn advance_to_next_item(&mut self) {
        self.calls.push(TransportCall::Advance);
        if let Some(index) = self.index {
            if index + 1 < self.items.len() {
                self.index = Some(index + 1);
                self.restart_item();
            }
        }
    }

    fn seek(&mut self, seconds: f64) {
        self.calls.push(TransportCall::Seek(seconds));
        self.time = seconds;
        self.finished = false;
    }

    fn current_time(&self) -> f64 {
        self.time
    }

    fn current_duration(&self) -> f64 {
        self.duration
    }

    fn set_action_at_item_end(&mut self, action: ItemEndAction) {
        self.calls.push(TransportCall::EndAction(action));
        self.end_action = action;
    }

    fn item_finished(&self) -> bool {
        self.finished
    }
}

#[derive(Debug, Default)]
pub struct RecordingRemote {
    pub published: Vec<RemoteConfig>,
    pub states: Vec<RemoteTransportState>,
    pub cleared: usize,
    pub incoming: Vec<RemoteCommand>,
}

impl RemoteAdapter for RecordingRemote {
    fn publish(&mut self, config: &RemoteConfig) {
        self.published.push(config.clone());
    }

    fn set_transport_state(&mut self, state: RemoteTransportState) {
        self.states.push(state);
    }

    fn clear(&mut self) {
        self.cleared += 1;
    }

    fn poll_commands(&mut self) -> Vec<RemoteCommand> {
        std::mem::take(&mut self.incoming)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    ItemChanged(Option<String>, usize),
    Duration(u64, u64),
    BecameInvalid,
    Paused,
    Playing,
}

#[derive(Debug, Default)]
pub struct RecordingDelegate {
    events: RefCell<Vec<Event>>,
}

impl RecordingDelegate {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    pub fn take(&self) -> Vec<Event> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    fn record(&self, event: Event) {
        self.events.borrow_mut().push(event);
    }
}

impl PlayerDelegate for RecordingDelegate {
    fn on_item_changed(&self, item: &QueueItem, index: usize) {
        self.record(Event::ItemChanged(item.id().map(String::from), index));
    }

    fn on_duration_update(&self, current_secs: u64, total_secs: u64) {
        self.record(Event::Duration(current_secs, total_secs));
    }

    fn on_became_invalid(&self, state: PlaybackState) {
        assert_eq!(state, PlaybackState::Invalid);
        self.record(Event::BecameInvalid);
    }

    fn on_paused(&self, state: PlaybackState) {
        assert_eq!(state, PlaybackState::Paused);
        self.record(Event::Paused);
    }

    fn on_playing(&self, state: PlaybackState) {
        assert_eq!(state, PlaybackState::Playing);
        self.record(Event::Playing);
    }
}

pub struct StaticDataSource {
    pub titles: Vec<String>,
    pub artwork: Vec<Option<Artwork>>,
}

impl PlayerDataSource for StaticDataSource {
    fn id_for_item(&self, item: &QueueItem) -> Option<String> {
        item.id().map(|id| format!("source-{id}"))
    }

    fn title_for_index(&self, index: usize) -> Option<String> {
        self.titles.get(index).cloned()
    }

    fn artwork_for_index(&self, index: usize) -> Option<Artwork> {
        self.artwork.get(index).cloned().flatten()
    }
}

pub fn write_file(dir: &Path, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, contents).unwrap();
    path
}
