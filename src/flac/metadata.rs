// FLAC metadata block implementation

use std::io::Read;

use crate::error::{MetadataError, Result};
use crate::utils::io::{be_u24, read_up_to};

/// FLAC file signature
pub const FLAC_SIGNATURE: &[u8; 4] = b"fLaC";

/// FLAC metadata block types
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlacMetadataBlockType {
    StreamInfo,
    Padding,
    Application,
    SeekTable,
    VorbisComment,
    CueSheet,
    Picture,
    Other(u8),
}

impl FlacMetadataBlockType {
    pub fn from_byte(byte: u8) -> Self {
        match byte & 0x7F {
            0 => FlacMetadataBlockType::StreamInfo,
            1 => FlacMetadataBlockType::Padding,
            2 => FlacMetadataBlockType::Application,
            3 => FlacMetadataBlockType::SeekTable,
            4 => FlacMetadataBlockType::VorbisComment,
            5 => FlacMetadataBlockType::CueSheet,
            6 => FlacMetadataBlockType::Picture,
            other => FlacMetadataBlockType::Other(other),
        }
    }
}

/// FLAC metadata block header
#[derive(Debug, Clone, Copy)]
pub struct FlacMetadataBlockHeader {
    pub is_last: bool,
    pub block_type: FlacMetadataBlockType,
    pub length: u32,
}

/// FLAC metadata block
#[derive(Debug)]
pub struct FlacMetadataBlock {
    pub header: FlacMetadataBlockHeader,
    pub data: Vec<u8>,
}

impl FlacMetadataBlockHeader {
    pub const SIZE: usize = 4;

    pub fn parse(buffer: [u8; Self::SIZE]) -> Self {
        FlacMetadataBlockHeader {
            is_last: (buffer[0] & 0x80) != 0,
            block_type: FlacMetadataBlockType::from_byte(buffer[0]),
            length: be_u24([buffer[1], buffer[2], buffer[3]]),
        }
    }
}

impl FlacMetadataBlock {
    /// Read the next block.
    ///
    /// `Ok(None)` means the stream ended cleanly before another header.
    /// A header or payload cut short yields `TruncatedData`.
    pub fn read<R: Read>(reader: &mut R) -> Result<Option<Self>> {
        let mut buffer = [0u8; FlacMetadataBlockHeader::SIZE];
        match read_up_to(reader, &mut buffer)? {
            0 => return Ok(None),
            n if n < buffer.len() => {
                return Err(MetadataError::truncated(
                    "FLAC block header",
                    buffer.len() as u64,
                    n as u64,
                ))
            }
            _ => {}
        }
        let header = FlacMetadataBlockHeader::parse(buffer);

        let mut data = Vec::new();
        reader
            .by_ref()
            .take(header.length as u64)
            .read_to_end(&mut data)?;
        if data.len() < header.length as usize {
            return Err(MetadataError::truncated(
                "FLAC metadata block",
                header.length as u64,
                data.len() as u64,
            ));
        }

        Ok(Some(FlacMetadataBlock { header, data }))
    }
}

/// Check the stream signature
pub fn read_signature<R: Read>(reader: &mut R) -> Result<()> {
    let mut signature = [0u8; 4];
    let read = read_up_to(reader, &mut signature)?;
    if read < signature.len() || &signature != FLAC_SIGNATURE {
        return Err(MetadataError::Format {
            expected: "FLAC",
            magic: "fLaC",
        });
    }
    Ok(())
}
