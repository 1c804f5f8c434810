use crate::audio::QueueItem;
use crate::playback::ItemEndAction;

/// The media engine that actually decodes and outputs audio.
///
/// Times are in seconds. Implementations never report errors back: a failed
/// seek or decode is logged and otherwise ignored.
pub trait Transport {
    fn play(&mut self);
    fn pause(&mut self);

    /// Playback rate, `0.0` while paused.
    fn rate(&self) -> f32;

    /// Drop everything queued and enqueue `items`, positioned at the first.
    fn replace_queue(&mut self, items: &[QueueItem]);
    fn clear(&mut self);
    fn advance_to_next_item(&mut self);

    fn seek(&mut self, seconds: f64);
    fn current_time(&self) -> f64;

    /// Duration of the current item; non-finite while unknown.
    fn current_duration(&self) -> f64;

    fn set_action_at_item_end(&mut self, action: ItemEndAction);

    /// Whether the current item has played to its end since it was queued.
    fn item_finished(&self) -> bool;
}
