use std::path::{Path, PathBuf};
use std::time::Duration;

use id3::TagLike;
use log::debug;

use crate::audio::{AudioFormat, QueueItem};

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("unsupported audio format")]
    UnknownFormat,
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    #[error(transparent)]
    Id3Error(#[from] id3::Error),
}

#[derive(Debug, Clone, Default)]
pub struct Metadata {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub track_number: Option<u32>,
    pub duration: Option<Duration>,
}

#[derive(Debug, Clone)]
pub struct ImportedTrack {
    pub path: PathBuf,
    pub format: AudioFormat,
    pub metadata: Metadata,
}

impl ImportedTrack {
    /// File name without extension, used as the track's stable id.
    pub fn stem(&self) -> String {
        self.path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn to_queue_item(&self) -> QueueItem {
        QueueItem::new(&self.path).with_id(self.stem())
    }
}

pub trait MetadataReader {
    type Error;

    fn read(path: &Path) -> Result<Metadata, Self::Error>;
}

pub struct Mp3MetadataReader;

impl MetadataReader for Mp3MetadataReader {
    type Error = ImportError;

    fn read(path: &Path) -> Result<Metadata, Self::Error> {
        let tag = id3::Tag::read_from_path(path)?;

        Ok(Metadata {
            title: tag.title().map(String::from),
            artist: tag.artist().map(String::from),
            album: tag.album().map(String::from),
            track_number: tag.track(),
            duration: tag.duration().map(|secs| Duration::from_secs(secs as u64)),
        })
    }
}

pub fn import_file(path: impl AsRef<Path>) -> Result<ImportedTrack, ImportError> {
    let path = path.as_ref();
    let format = AudioFormat::from_path(path).ok_or(ImportError::UnknownFormat)?;

    let metadata = match format {
        AudioFormat::Mp3 => Mp3MetadataReader::read(path)?,
        AudioFormat::M4b => Metadata::default(),
    };

    Ok(ImportedTrack {
        path: path.to_path_buf(),
        format,
        metadata,
    })
}

/// Recursively scans a directory for audio files and imports them, sorted by
/// path. Files that fail to import are skipped.
pub fn import_directory(path: impl AsRef<Path>) -> Result<Vec<ImportedTrack>, ImportError> {
    let path = path.as_ref();
    let mut imported = Vec::new();
    let mut paths_to_scan: Vec<PathBuf> = vec![path.to_path_buf()];

    while let Some(current_path) = paths_to_scan.pop() {
        let entries = std::fs::read_dir(&current_path)?;

        for entry in entries.flatten() {
            let entry_path = entry.path();

            if entry_path.is_dir() {
                paths_to_scan.push(entry_path);
            } else if entry_path.is_file() {
                match import_file(&entry_path) {
                    Ok(track) => imported.push(track),
                    Err(e) => debug!("skipping {}: {}", entry_path.display(), e),
                }
            }
        }
    }

    imported.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(imported)
}
