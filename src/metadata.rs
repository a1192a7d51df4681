// Unified metadata record and parse report

use serde::Serialize;
use std::fmt;
use std::path::Path;

use crate::error::MetadataError;

/// Container formats this crate can read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    Mp3,
    Flac,
    Unknown,
}

impl AudioFormat {
    /// Pick a format from the text after the last `.` in the path.
    ///
    /// The comparison is exact: `song.MP3` is `Unknown`.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_string_lossy();
        match path.rsplit_once('.') {
            Some((_, "mp3")) => AudioFormat::Mp3,
            Some((_, "flac")) => AudioFormat::Flac,
            _ => AudioFormat::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AudioFormat::Mp3 => "mp3",
            AudioFormat::Flac => "flac",
            AudioFormat::Unknown => "unknown",
        }
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Descriptive tags plus derived playback statistics.
///
/// Text fields are empty when the file does not provide them; `duration`
/// (seconds) and `bitrate` (kbps) are zero when they could not be derived.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MetadataRecord {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub year: String,
    pub track: String,
    pub genre: String,
    pub duration: f64,
    pub bitrate: u32,
}

impl MetadataRecord {
    /// True when no field has been populated
    pub fn is_empty(&self) -> bool {
        *self == MetadataRecord::default()
    }
}

/// Outcome of a parse that got past the file's magic bytes.
///
/// `issues` lists the recoverable problems (truncation, overrunning frames)
/// met along the way; `record` holds whatever was read before them.
#[derive(Debug)]
pub struct ParseReport {
    pub format: AudioFormat,
    pub record: MetadataRecord,
    pub issues: Vec<MetadataError>,
}

impl ParseReport {
    pub fn new(format: AudioFormat) -> Self {
        Self {
            format,
            record: MetadataRecord::default(),
            issues: Vec::new(),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}
