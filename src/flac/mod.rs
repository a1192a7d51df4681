// FLAC metadata handling module

pub mod metadata;
pub mod streaminfo;
pub mod vorbis;

use std::io::Read;

use tracing::{debug, warn};

pub use metadata::{FlacMetadataBlock, FlacMetadataBlockHeader, FlacMetadataBlockType, FLAC_SIGNATURE};
pub use streaminfo::StreamInfo;
pub use vorbis::VorbisComment;

use crate::error::Result;
use crate::metadata::{AudioFormat, ParseReport};

/// Walk the metadata blocks of a FLAC stream.
///
/// `file_size` is the full length of the file in bytes and feeds the
/// whole-file average bitrate.
pub fn read_flac<R: Read>(reader: &mut R, file_size: u64) -> Result<ParseReport> {
    metadata::read_signature(reader)?;

    let mut report = ParseReport::new(AudioFormat::Flac);
    let mut stream_info = StreamInfo::default();

    loop {
        let block = match FlacMetadataBlock::read(reader) {
            Ok(Some(block)) => block,
            Ok(None) => break,
            // Past the signature every failure ends the walk but keeps the fields
            Err(e) => {
                warn!("{e}");
                report.issues.push(e);
                break;
            }
        };

        match block.header.block_type {
            FlacMetadataBlockType::StreamInfo => match StreamInfo::parse(&block.data) {
                Some(info) => stream_info = info,
                None => warn!(
                    length = block.data.len(),
                    "STREAMINFO block shorter than {} bytes, skipped",
                    StreamInfo::MIN_SIZE
                ),
            },
            FlacMetadataBlockType::VorbisComment => {
                vorbis::apply_block(&block.data, &mut report.record, &mut report.issues);
            }
            _ => {}
        }

        if block.header.is_last {
            break;
        }
    }

    let duration = stream_info.duration_secs();
    if duration > 0.0 {
        report.record.duration = duration;
        report.record.bitrate = ((file_size * 8) as f64 / (duration * 1000.0)) as u32;
    }

    debug!(
        sample_rate = stream_info.sample_rate,
        total_samples = stream_info.total_samples,
        duration = report.record.duration,
        bitrate = report.record.bitrate,
        "walked FLAC metadata"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MetadataError;
    use std::io::{self, Cursor};

    /// Serves `limit` bytes, then fails every read
    struct FailAfter {
        inner: Cursor<Vec<u8>>,
        limit: u64,
    }

    impl Read for FailAfter {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let left = self.limit.saturating_sub(self.inner.position());
            if left == 0 {
                return Err(io::Error::other("device lost"));
            }
            let n = buf.len().min(left as usize);
            self.inner.read(&mut buf[..n])
        }
    }

    fn block(kind: u8, last: bool, payload: &[u8]) -> Vec<u8> {
        let len = payload.len() as u32;
        let flag = if last { 0x80 } else { 0x00 };
        let mut out = vec![kind | flag, (len >> 16) as u8, (len >> 8) as u8, len as u8];
        out.extend_from_slice(payload);
        out
    }

    // 44.1 kHz stereo 16-bit, `total` samples
    fn streaminfo(total: u32) -> Vec<u8> {
        let mut data = vec![0u8; 34];
        data[10] = 0x0A;
        data[11] = 0xC4;
        data[12] = 0x42;
        data[13] = 0xF0;
        data[14..18].copy_from_slice(&total.to_be_bytes());
        data
    }

    fn comments(entries: &[&str]) -> Vec<u8> {
        let mut out = 0u32.to_le_bytes().to_vec();
        out.extend_from_slice(&(entries.len() as u32).to_le_bytes());
        for e in entries {
            out.extend_from_slice(&(e.len() as u32).to_le_bytes());
            out.extend_from_slice(e.as_bytes());
        }
        out
    }

    #[test]
    fn test_walk_blocks() {
        let mut bytes = b"fLaC".to_vec();
        bytes.extend(block(0, false, &streaminfo(441_000)));
        bytes.extend(block(1, false, &[0u8; 8]));
        bytes.extend(block(4, true, &comments(&["TITLE=Song", "artist=Foo"])));
        // Audio frames after the last block are never read
        bytes.extend(block(4, true, &comments(&["TITLE=Ignored"])));

        let file_size = 1_000_000;
        let report = read_flac(&mut Cursor::new(bytes), file_size).unwrap();
        assert!(report.is_clean());
        assert_eq!(report.format, AudioFormat::Flac);
        assert_eq!(report.record.title, "Song");
        assert_eq!(report.record.artist, "Foo");
        assert_eq!(report.record.duration, 10.0);
        // 8,000,000 bits over 10,000 ms
        assert_eq!(report.record.bitrate, 800);
    }

    #[test]
    fn test_short_streaminfo_skipped() {
        let mut bytes = b"fLaC".to_vec();
        bytes.extend(block(0, false, &[0u8; 20]));
        bytes.extend(block(4, true, &comments(&["GENRE=Ambient"])));

        let report = read_flac(&mut Cursor::new(bytes), 5000).unwrap();
        assert_eq!(report.record.genre, "Ambient");
        assert_eq!(report.record.duration, 0.0);
        assert_eq!(report.record.bitrate, 0);
    }

    #[test]
    fn test_truncated_block_keeps_prior_fields() {
        let mut bytes = b"fLaC".to_vec();
        bytes.extend(block(4, false, &comments(&["ALBUM=Kept"])));
        let mut cut = block(4, true, &comments(&["ALBUM=Lost"]));
        cut.truncate(cut.len() - 3);
        bytes.extend(cut);

        let report = read_flac(&mut Cursor::new(bytes), 100).unwrap();
        assert_eq!(report.record.album, "Kept");
        assert!(matches!(
            report.issues[..],
            [MetadataError::TruncatedData { .. }]
        ));
    }

    #[test]
    fn test_io_error_keeps_prior_fields() {
        let mut bytes = b"fLaC".to_vec();
        bytes.extend(block(0, false, &streaminfo(44_100)));
        bytes.extend(block(4, false, &comments(&["ALBUM=Kept"])));
        let limit = bytes.len() as u64 + 2;
        bytes.extend(block(4, true, &comments(&["ALBUM=Unread"])));

        let mut reader = FailAfter {
            inner: Cursor::new(bytes),
            limit,
        };
        let report = read_flac(&mut reader, 1000).unwrap();
        assert_eq!(report.record.album, "Kept");
        assert_eq!(report.record.duration, 1.0);
        assert!(matches!(report.issues[..], [MetadataError::Io(_)]));
    }

    #[test]
    fn test_eof_without_last_flag() {
        let mut bytes = b"fLaC".to_vec();
        bytes.extend(block(4, false, &comments(&["TITLE=Only"])));
        let report = read_flac(&mut Cursor::new(bytes), 100).unwrap();
        assert_eq!(report.record.title, "Only");
        assert!(report.is_clean());
    }

    #[test]
    fn test_missing_signature() {
        let err = read_flac(&mut Cursor::new(b"OggS....".to_vec()), 8).unwrap_err();
        assert!(matches!(err, MetadataError::Format { .. }));
    }
}
