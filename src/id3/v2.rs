// ID3v2 tag implementation

use std::io::{Read, Seek, SeekFrom};

use tracing::{debug, warn};

use super::frames::Frames;
use crate::error::{MetadataError, Result};
use crate::field_mapping;
use crate::metadata::MetadataRecord;
use crate::utils::io::{read_up_to, synchsafe_u32};

/// ID3v2 header structure
#[derive(Debug, Clone, Copy)]
pub struct Id3v2Header {
    pub version: (u8, u8),
    pub flags: u8,
    pub size: u32,
}

/// ID3v2 tag: header plus the raw tag bytes as read from the file
#[derive(Debug)]
pub struct Id3v2Tag {
    pub header: Id3v2Header,
    data: Vec<u8>,
}

impl Id3v2Header {
    pub const SIZE: usize = 10;
    const ID: [u8; 3] = *b"ID3";

    /// Parse a header, `None` if the `ID3` signature is missing
    pub fn parse(buffer: &[u8; Self::SIZE]) -> Option<Self> {
        if buffer[0..3] != Self::ID {
            return None;
        }
        Some(Id3v2Header {
            version: (buffer[3], buffer[4]),
            flags: buffer[5],
            size: synchsafe_u32([buffer[6], buffer[7], buffer[8], buffer[9]]),
        })
    }

    /// Header plus tag body, in bytes
    pub fn total_size(&self) -> u64 {
        Self::SIZE as u64 + self.size as u64
    }
}

impl Id3v2Tag {
    /// Read the tag at the start of `reader`.
    ///
    /// A tag that claims more bytes than the file holds is kept with what
    /// could be read, and a `TruncatedData` issue is pushed. A header cut
    /// short by EOF leaves nothing to parse: the issue is pushed and
    /// `Ok(None)` returned.
    pub fn read<R: Read + Seek>(
        reader: &mut R,
        issues: &mut Vec<MetadataError>,
    ) -> Result<Option<Self>> {
        let mut buffer = [0u8; Id3v2Header::SIZE];
        let read = read_up_to(reader, &mut buffer)?;
        if read < 3 || buffer[0..3] != Id3v2Header::ID {
            return Err(MetadataError::Format {
                expected: "ID3v2",
                magic: "ID3",
            });
        }
        if read < Id3v2Header::SIZE {
            let issue =
                MetadataError::truncated("ID3v2 header", Id3v2Header::SIZE as u64, read as u64);
            warn!("{issue}");
            issues.push(issue);
            return Ok(None);
        }
        let header = Id3v2Header::parse(&buffer).ok_or(MetadataError::Format {
            expected: "ID3v2",
            magic: "ID3",
        })?;

        let total = header.total_size();
        let mut data = Vec::new();
        let body = reader
            .seek(SeekFrom::Start(0))
            .and_then(|_| reader.by_ref().take(total).read_to_end(&mut data));
        if let Err(e) = body {
            warn!("reading ID3v2 tag: {e}");
            issues.push(e.into());
        } else if (data.len() as u64) < total {
            let issue = MetadataError::truncated("ID3v2 tag", total, data.len() as u64);
            warn!("{issue}");
            issues.push(issue);
        }

        debug!(
            version = ?header.version,
            size = header.size,
            "read ID3v2 tag"
        );
        Ok(Some(Id3v2Tag { header, data }))
    }

    /// File offset of the first byte after the tag
    pub fn end_offset(&self) -> u64 {
        self.header.total_size()
    }

    pub fn frames(&self) -> Frames<'_> {
        Frames::new(&self.data, Id3v2Header::SIZE, self.end_offset() as usize)
    }

    /// Copy recognized text frames into `record`, later frames winning
    pub fn apply_to(&self, record: &mut MetadataRecord, issues: &mut Vec<MetadataError>) {
        for frame in self.frames() {
            let frame = match frame {
                Ok(frame) => frame,
                Err(e) => {
                    warn!("{e}");
                    issues.push(e);
                    break;
                }
            };
            let Some(field) = frame.id_str().and_then(field_mapping::from_id3v2) else {
                continue;
            };
            if let Some(text) = frame.text() {
                record.set(field, text);
            }
        }
    }
}
