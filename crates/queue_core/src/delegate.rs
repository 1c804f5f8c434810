use crate::audio::{Artwork, QueueItem};
use crate::playback::PlaybackState;

/// Notifications fired by the controller. All methods default to no-ops.
pub trait PlayerDelegate {
    fn on_item_changed(&self, _item: &QueueItem, _index: usize) {}

    /// Whole seconds, fired only once the total duration is known.
    fn on_duration_update(&self, _current_secs: u64, _total_secs: u64) {}

    fn on_became_invalid(&self, _state: PlaybackState) {}
    fn on_paused(&self, _state: PlaybackState) {}
    fn on_playing(&self, _state: PlaybackState) {}
}

/// Pull-based item metadata, queried whenever the controller needs it.
pub trait PlayerDataSource {
    fn id_for_item(&self, item: &QueueItem) -> Option<String>;
    fn title_for_index(&self, index: usize) -> Option<String>;
    fn artwork_for_index(&self, index: usize) -> Option<Artwork>;
}
