//! tagprobe - read audio tags, duration and bitrate straight from file bytes.
//!
//! Two containers are understood: MP3 (a leading ID3v2 tag followed by MPEG
//! audio frames) and FLAC (STREAMINFO and VORBIS_COMMENT metadata blocks).
//! The format is picked from the file extension.
//!
//! [`probe`] returns an explicit result; [`read_audio_metadata`] never fails
//! and falls back to whatever fields were read, logging the rest.

use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

pub mod error;
pub mod field_mapping;
pub mod flac;
pub mod id3;
pub mod metadata;
pub mod mpeg;
mod utils;

pub use error::{MetadataError, Result};
pub use field_mapping::StandardField;
pub use metadata::{AudioFormat, MetadataRecord, ParseReport};

use id3::Id3v2Tag;

/// An audio file on disk and the format its extension selects
#[derive(Debug, Clone)]
pub struct AudioFile {
    pub path: PathBuf,
    pub format: AudioFormat,
}

impl AudioFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let format = AudioFormat::from_path(&path);
        AudioFile { path, format }
    }

    /// Parse the file, keeping fatal and recoverable problems apart.
    ///
    /// An unsupported extension is not an error: the report comes back with
    /// `AudioFormat::Unknown` and an empty record, without touching the file.
    pub fn probe(&self) -> Result<ParseReport> {
        match self.format {
            AudioFormat::Mp3 => {
                let mut reader = self.open()?;
                read_mp3(&mut reader)
            }
            AudioFormat::Flac => {
                let mut reader = self.open()?;
                let file_size = reader.get_ref().metadata()?.len();
                flac::read_flac(&mut reader, file_size)
            }
            AudioFormat::Unknown => Ok(ParseReport::new(AudioFormat::Unknown)),
        }
    }

    /// Parse the file, logging problems instead of returning them
    pub fn read_metadata(&self) -> MetadataRecord {
        match self.probe() {
            Ok(report) => {
                for issue in &report.issues {
                    if issue.is_recoverable() {
                        debug!(path = %self.path.display(), "recovered from: {issue}");
                    } else {
                        warn!(path = %self.path.display(), "stopped early: {issue}");
                    }
                }
                report.record
            }
            Err(e) => {
                warn!(path = %self.path.display(), "{e}");
                MetadataRecord::default()
            }
        }
    }

    fn open(&self) -> Result<BufReader<File>> {
        File::open(&self.path)
            .map(BufReader::new)
            .map_err(|e| MetadataError::file_open(&self.path, e))
    }
}

/// Parse `path` and return its metadata, or an error naming what failed
pub fn probe(path: impl AsRef<Path>) -> Result<ParseReport> {
    AudioFile::new(path.as_ref()).probe()
}

/// Parse `path` and return its metadata.
///
/// Never fails: missing files, unsupported extensions and corrupt data all
/// yield a record holding whatever was read (possibly nothing).
pub fn read_audio_metadata(path: impl AsRef<Path>) -> MetadataRecord {
    AudioFile::new(path.as_ref()).read_metadata()
}

/// Read the ID3v2 tag, then scan the MPEG frames that follow it
pub fn read_mp3<R: Read + Seek>(reader: &mut R) -> Result<ParseReport> {
    let mut report = ParseReport::new(AudioFormat::Mp3);

    let Some(tag) = Id3v2Tag::read(reader, &mut report.issues)? else {
        return Ok(report);
    };
    tag.apply_to(&mut report.record, &mut report.issues);

    // Bytes read before an I/O failure are still scanned
    let mut audio = Vec::new();
    let read = reader
        .seek(SeekFrom::Start(tag.end_offset()))
        .and_then(|_| reader.read_to_end(&mut audio));
    if let Err(e) = read {
        warn!("reading MPEG frames: {e}");
        report.issues.push(e.into());
    }

    let summary = mpeg::scan_frames(&audio);
    if summary.frames > 0 {
        report.record.bitrate = summary.average_bitrate();
        report.record.duration = summary.duration_secs();
    }

    debug!(
        frames = summary.frames,
        duration = report.record.duration,
        bitrate = report.record.bitrate,
        "scanned MPEG frames"
    );
    Ok(report)
}
