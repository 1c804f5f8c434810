use std::path::Path;

use log::warn;

use crate::audio::{Artwork, QueueItem};
use crate::delegate::PlayerDataSource;
use crate::import::{import_directory, import_file, ImportError, ImportedTrack};

/// Imported tracks in queue order, doubling as the controller's data source.
#[derive(Debug, Default)]
pub struct TrackList {
    tracks: Vec<ImportedTrack>,
}

impl TrackList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Import every path in order; directories are scanned recursively.
    ///
    /// Individual files that cannot be imported are logged and skipped.
    pub fn from_paths<P: AsRef<Path>>(paths: &[P]) -> Result<Self, ImportError> {
        let mut list = Self::new();
        for path in paths {
            let path = path.as_ref();
            if path.is_dir() {
                list.tracks.extend(import_directory(path)?);
            } else {
                match import_file(path) {
                    Ok(track) => list.push(track),
                    Err(e) => warn!("skipping {}: {}", path.display(), e),
                }
            }
        }
        Ok(list)
    }

    pub fn push(&mut self, track: ImportedTrack) {
        self.tracks.push(track);
    }

    pub fn tracks(&self) -> &[ImportedTrack] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn queue_items(&self) -> Vec<QueueItem> {
        self.tracks.iter().map(ImportedTrack::to_queue_item).collect()
    }
}

impl PlayerDataSource for TrackList {
    fn id_for_item(&self, item: &QueueItem) -> Option<String> {
        self.tracks
            .iter()
            .find(|track| track.path == item.asset())
            .map(ImportedTrack::stem)
    }

    fn title_for_index(&self, index: usize) -> Option<String> {
        let track = self.tracks.get(index)?;
        track.metadata.title.clone().or_else(|| Some(track.stem()))
    }

    fn artwork_for_index(&self, index: usize) -> Option<Artwork> {
        let track = self.tracks.get(index)?;
        let dir = track.path.parent()?;
        ["cover.jpg", "cover.png", "folder.jpg"]
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file())
            .map(|cover| Artwork::from_path(&cover))
    }
}
