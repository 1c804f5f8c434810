use std::path::{Path, PathBuf};

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

/// Bytes escaped in `file://` artwork URLs.
const URL_PATH: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    Mp3,
    M4b,
}

impl AudioFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "mp3" => Some(AudioFormat::Mp3),
            "m4b" => Some(AudioFormat::M4b),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }
}

/// One playable unit in the queue.
///
/// The asset is an opaque path handed to the transport; `id` is an optional
/// stable identifier the host can use to recognise the item later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueItem {
    asset: PathBuf,
    id: Option<String>,
}

impl QueueItem {
    pub fn new(asset: impl Into<PathBuf>) -> Self {
        Self {
            asset: asset.into(),
            id: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn asset(&self) -> &Path {
        &self.asset
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

/// Reference to cover art the remote adapter can forward to the OS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artwork(pub String);

impl Artwork {
    pub fn from_path(path: &Path) -> Self {
        let path = path.to_string_lossy();
        Artwork(format!("file://{}", utf8_percent_encode(&path, URL_PATH)))
    }

    pub fn url(&self) -> &str {
        &self.0
    }
}

/// Elapsed and total time of the current item, in seconds.
///
/// `total` is NaN or infinite until the transport knows the duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackPosition {
    pub elapsed: f64,
    pub total: f64,
}

impl PlaybackPosition {
    pub fn is_total_known(&self) -> bool {
        self.total.is_finite()
    }
}
