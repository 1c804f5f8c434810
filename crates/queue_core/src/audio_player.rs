use std::io::BufReader;
use std::time::Duration;

use log::{debug, warn};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};

use crate::audio::QueueItem;
use crate::playback::ItemEndAction;
use crate::transport::Transport;

/// [`Transport`] backed by a `rodio` output stream, one sink per item.
pub struct AudioPlayer {
    _stream: OutputStream,
    stream_handle: OutputStreamHandle,
    sink: Option<Sink>,
    items: Vec<QueueItem>,
    index: Option<usize>,
    duration: Option<Duration>,
    playing: bool,
    load_failed: bool,
    end_action: ItemEndAction,
}

impl AudioPlayer {
    pub fn new() -> Result<Self, AudioPlayerError> {
        let (stream, stream_handle) = OutputStream::try_default()
            .map_err(|e| AudioPlayerError::OutputStreamError(e.to_string()))?;

        Ok(Self {
            _stream: stream,
            stream_handle,
            sink: None,
            items: Vec::new(),
            index: None,
            duration: None,
            playing: false,
            load_failed: false,
            end_action: ItemEndAction::Advance,
        })
    }

    fn load_current(&mut self) {
        self.stop_internal();
        let Some(item) = self.index.and_then(|index| self.items.get(index)) else {
            return;
        };

        match self.open_sink(item) {
            Ok((sink, duration)) => {
                debug!("queued {}", item.asset().display());
                self.sink = Some(sink);
                self.duration = duration;
            }
            Err(e) => {
                warn!("cannot play {}: {}", item.asset().display(), e);
                self.load_failed = true;
            }
        }
    }

    fn open_sink(&self, item: &QueueItem) -> Result<(Sink, Option<Duration>), AudioPlayerError> {
        let file = std::fs::File::open(item.asset())
            .map_err(|e| AudioPlayerError::FileError(e.to_string()))?;
        let source = Decoder::new(BufReader::new(file))
            .map_err(|e| AudioPlayerError::DecodeError(e.to_string()))?;
        let duration = source.total_duration();

        let sink = Sink::try_new(&self.stream_handle)
            .map_err(|e| AudioPlayerError::SinkError(e.to_string()))?;
        if !self.playing {
            sink.pause();
        }
        sink.append(source);

        Ok((sink, duration))
    }

    fn stop_internal(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        self.duration = None;
        self.load_failed = false;
    }
}

impl Transport for AudioPlayer {
    fn play(&mut self) {
        self.playing = true;
        if let Some(sink) = &self.sink {
            sink.play();
        }
    }

    fn pause(&mut self) {
        self.playing = false;
        if let Some(sink) = &self.sink {
            sink.pause();
        }
    }

    fn rate(&self) -> f32 {
        let stalled = self.item_finished() && self.end_action == ItemEndAction::Pause;
        if self.playing && self.sink.is_some() && !stalled {
            1.0
        } else {
            0.0
        }
    }

    fn replace_queue(&mut self, items: &[QueueItem]) {
        self.items = items.to_vec();
        self.index = if self.items.is_empty() { None } else { Some(0) };
        self.load_current();
    }

    fn clear(&mut self) {
        self.stop_internal();
        self.items.clear();
        self.index = None;
    }

    fn advance_to_next_item(&mut self) {
        match self.index {
            Some(index) if index + 1 < self.items.len() => {
                self.index = Some(index + 1);
                self.load_current();
            }
            _ => debug!("no item to advance to"),
        }
    }

    fn seek(&mut self, seconds: f64) {
        if self.item_finished() {
            self.load_current();
        }
        let Some(sink) = &self.sink else {
            return;
        };

        let position = Duration::try_from_secs_f64(seconds.max(0.0)).unwrap_or_default();
        if let Err(e) = sink.try_seek(position) {
            debug!("seek to {:?} ignored: {}", position, e);
        }
    }

    fn current_time(&self) -> f64 {
        self.sink
            .as_ref()
            .map(|sink| sink.get_pos().as_secs_f64())
            .unwrap_or(0.0)
    }

    fn current_duration(&self) -> f64 {
        self.duration
            .map(|duration| duration.as_secs_f64())
            .unwrap_or(f64::NAN)
    }

    fn set_action_at_item_end(&mut self, action: ItemEndAction) {
        self.end_action = action;
    }

    fn item_finished(&self) -> bool {
        self.load_failed || self.sink.as_ref().is_some_and(|sink| sink.empty())
    }
}

impl Drop for AudioPlayer {
    fn drop(&mut self) {
        self.stop_internal();
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum AudioPlayerError {
    #[error("Output stream error: {0}")]
    OutputStreamError(String),
    #[error("File error: {0}")]
    FileError(String),
    #[error("Decode error: {0}")]
    DecodeError(String),
    #[error("Sink error: {0}")]
    SinkError(String),
}
