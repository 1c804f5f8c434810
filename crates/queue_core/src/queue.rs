use crate::audio::QueueItem;
use crate::error::{PlayerError, Result};

/// Ordered list of items plus the position of the one being played.
///
/// `current_index` is `None` exactly when the queue is empty, otherwise it
/// always points at a valid item.
#[derive(Debug, Default)]
pub struct PlaybackQueue {
    items: Vec<QueueItem>,
    current_index: Option<usize>,
    elapsed: f64,
}

impl PlaybackQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the queue contents and start at `start_index`.
    ///
    /// On error the queue is left untouched.
    pub fn load(&mut self, items: Vec<QueueItem>, start_index: usize) -> Result<()> {
        if start_index >= items.len() {
            return Err(PlayerError::InvalidIndex {
                index: start_index,
                len: items.len(),
            });
        }

        self.items = items;
        self.current_index = Some(start_index);
        self.elapsed = 0.0;
        Ok(())
    }

    /// Move to the next item. Returns `false` when already at the last item.
    pub fn advance(&mut self) -> bool {
        match self.current_index {
            Some(index) if index + 1 < self.items.len() => {
                self.current_index = Some(index + 1);
                self.elapsed = 0.0;
                true
            }
            _ => false,
        }
    }

    /// Step back one item if possible; the position always restarts at zero.
    pub fn retreat_and_restart(&mut self) {
        if let Some(index) = self.current_index {
            if index > 0 {
                self.current_index = Some(index - 1);
            }
        }
        self.elapsed = 0.0;
    }

    pub fn is_at_last(&self) -> bool {
        match self.current_index {
            Some(index) => index + 1 == self.items.len(),
            None => false,
        }
    }

    pub fn current(&self) -> Option<&QueueItem> {
        self.current_index.and_then(|index| self.items.get(index))
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.current_index = None;
        self.elapsed = 0.0;
    }

    pub fn items(&self) -> &[QueueItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Elapsed seconds on the current item.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn set_elapsed(&mut self, seconds: f64) {
        if self.current_index.is_some() {
            self.elapsed = seconds;
        }
    }
}
