// Text decoding for ID3v2 text frames

use encoding_rs::{UTF_16BE, UTF_16LE, UTF_8, WINDOWS_1252};

/// ID3v2 text encoding marker (first byte of a text frame)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TextEncoding {
    Iso8859_1 = 0,
    Utf16 = 1,
    Utf16BE = 2,
    Utf8 = 3,
}

impl TextEncoding {
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            1 => TextEncoding::Utf16,
            2 => TextEncoding::Utf16BE,
            3 => TextEncoding::Utf8,
            _ => TextEncoding::Iso8859_1,
        }
    }
}

/// Decode text with specified encoding
pub fn decode_text(data: &[u8], encoding: TextEncoding) -> String {
    match encoding {
        TextEncoding::Iso8859_1 => WINDOWS_1252.decode_without_bom_handling(data).0.into_owned(),
        TextEncoding::Utf16 => match data {
            [0xFF, 0xFE, rest @ ..] => UTF_16LE.decode_without_bom_handling(rest).0.into_owned(),
            [0xFE, 0xFF, rest @ ..] => UTF_16BE.decode_without_bom_handling(rest).0.into_owned(),
            _ => UTF_16LE.decode_without_bom_handling(data).0.into_owned(),
        },
        TextEncoding::Utf16BE => UTF_16BE.decode_without_bom_handling(data).0.into_owned(),
        TextEncoding::Utf8 => UTF_8.decode_without_bom_handling(data).0.into_owned(),
    }
}
