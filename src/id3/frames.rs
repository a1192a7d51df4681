// ID3v2 frame layout and text frame decoding

use crate::error::MetadataError;
use crate::utils::encoding::{decode_text, TextEncoding};
use crate::utils::io::ByteCursor;

/// Frame header: 4-byte ID, 4-byte synchsafe size, 2 flag bytes
pub const FRAME_HEADER_SIZE: usize = 10;

/// One frame borrowed from the tag buffer
#[derive(Debug)]
pub struct TagFrame<'a> {
    pub id: [u8; 4],
    pub size: u32,
    pub payload: &'a [u8],
}

impl<'a> TagFrame<'a> {
    /// Frame ID as text, if it is valid ASCII
    pub fn id_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.id).ok()
    }

    /// Decoded text, `None` when nothing is left after stripping
    pub fn text(&self) -> Option<String> {
        decode_text_frame(self.payload)
    }
}

/// Decode a text frame payload.
///
/// The first byte selects the encoding; trailing NUL terminators are dropped.
pub fn decode_text_frame(payload: &[u8]) -> Option<String> {
    let (&marker, text) = payload.split_first()?;
    let decoded = decode_text(text, TextEncoding::from_byte(marker));
    let trimmed = decoded.trim_end_matches('\0');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Iterator over the frames of a tag buffer.
///
/// `data` starts at the tag header; `declared_end` is the tag size the
/// header announced, which may exceed `data.len()` when the file is short.
/// Yields an error at most once, then stops.
pub struct Frames<'a> {
    cursor: ByteCursor<'a>,
    declared_end: usize,
    done: bool,
}

impl<'a> Frames<'a> {
    pub fn new(data: &'a [u8], start: usize, declared_end: usize) -> Self {
        let mut cursor = ByteCursor::new(data);
        let done = cursor.skip(start).is_none();
        Self {
            cursor,
            declared_end,
            done,
        }
    }

    fn read_frame(&mut self) -> Option<Result<TagFrame<'a>, MetadataError>> {
        let offset = self.cursor.position();
        if self.declared_end.saturating_sub(offset) < FRAME_HEADER_SIZE
            || self.cursor.remaining() < FRAME_HEADER_SIZE
        {
            return None;
        }

        let id: [u8; 4] = self.cursor.array()?;
        // Padding
        if id[0] == 0 {
            return None;
        }
        let size = self.cursor.synchsafe_u32()?;
        self.cursor.skip(2)?;

        let payload_start = self.cursor.position();
        let available = self.declared_end - payload_start;
        if size as usize > available {
            let name = String::from_utf8_lossy(&id);
            return Some(Err(MetadataError::malformed(
                format!("ID3v2 frame {name}"),
                offset,
                size as u64,
                available as u64,
            )));
        }

        // Inside the declared tag but past the bytes actually read; the tag
        // itself has already been reported as truncated.
        let payload = self.cursor.take(size as usize)?;
        Some(Ok(TagFrame { id, size, payload }))
    }
}

impl<'a> Iterator for Frames<'a> {
    type Item = Result<TagFrame<'a>, MetadataError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let item = self.read_frame();
        if !matches!(item, Some(Ok(_))) {
            self.done = true;
        }
        item
    }
}
