// Byte-level integer decoders and a bounds-checked cursor over a byte slice

use std::io::{self, Read};

/// Decode a synchsafe 32-bit integer (7 significant bits per byte)
pub fn synchsafe_u32(bytes: [u8; 4]) -> u32 {
    bytes
        .iter()
        .fold(0u32, |acc, &b| (acc << 7) | (b & 0x7F) as u32)
}

/// Decode a big-endian 24-bit integer
pub fn be_u24(bytes: [u8; 3]) -> u32 {
    ((bytes[0] as u32) << 16) | ((bytes[1] as u32) << 8) | (bytes[2] as u32)
}

/// Decode a big-endian 20-bit integer stored in the top bits of three bytes
pub fn be_u20(bytes: [u8; 3]) -> u32 {
    ((bytes[0] as u32) << 12) | ((bytes[1] as u32) << 4) | ((bytes[2] as u32) >> 4)
}

/// Read into `buf` until it is full or the reader is exhausted.
///
/// Returns the number of bytes actually read. Unlike `read_exact`, a short
/// stream is not an error here; callers compare the count against what
/// they asked for.
pub fn read_up_to<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// A read cursor over a borrowed byte slice.
///
/// Every read checks the remaining length first and returns `None` instead of
/// indexing out of range.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Take the next `len` bytes as a sub-slice
    pub fn take(&mut self, len: usize) -> Option<&'a [u8]> {
        if len > self.remaining() {
            return None;
        }
        let slice = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Some(slice)
    }

    pub fn skip(&mut self, len: usize) -> Option<()> {
        self.take(len).map(|_| ())
    }

    pub fn array<const N: usize>(&mut self) -> Option<[u8; N]> {
        self.take(N).and_then(|s| s.try_into().ok())
    }

    pub fn le_u32(&mut self) -> Option<u32> {
        self.array::<4>().map(u32::from_le_bytes)
    }

    pub fn synchsafe_u32(&mut self) -> Option<u32> {
        self.array::<4>().map(synchsafe_u32)
    }
}
