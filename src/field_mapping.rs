// Mapping from format-specific tag keys to record fields
//
// Each format names the same fields differently:
// - ID3v2: Frame IDs (TIT2, TPE1, TALB, etc.)
// - FLAC: Vorbis Comment keys (TITLE, ARTIST, ALBUM, etc.)
//
// Both are kept as flat lookup tables so that supporting a new key is a
// table edit rather than another branch in a parser.

use crate::metadata::MetadataRecord;

/// Textual fields of a [`MetadataRecord`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardField {
    Title,
    Artist,
    Album,
    Year,
    Track,
    Genre,
}

/// ID3v2 text frame identifiers
pub const ID3V2_FIELDS: &[(&str, StandardField)] = &[
    ("TIT2", StandardField::Title),
    ("TPE1", StandardField::Artist),
    ("TALB", StandardField::Album),
    ("TYER", StandardField::Year),
    ("TRCK", StandardField::Track),
    ("TCON", StandardField::Genre),
];

/// Vorbis comment keys, already uppercased
pub const VORBIS_FIELDS: &[(&str, StandardField)] = &[
    ("TITLE", StandardField::Title),
    ("ARTIST", StandardField::Artist),
    ("ALBUM", StandardField::Album),
    ("DATE", StandardField::Year),
    ("TRACKNUMBER", StandardField::Track),
    ("GENRE", StandardField::Genre),
];

fn lookup(table: &[(&str, StandardField)], key: &str) -> Option<StandardField> {
    table.iter().find(|(k, _)| *k == key).map(|&(_, field)| field)
}

/// Convert an ID3v2 frame ID to a standard field (exact match)
pub fn from_id3v2(frame_id: &str) -> Option<StandardField> {
    lookup(ID3V2_FIELDS, frame_id)
}

/// Convert a Vorbis comment key to a standard field (case-insensitive)
pub fn from_vorbis(key: &str) -> Option<StandardField> {
    lookup(VORBIS_FIELDS, &key.to_ascii_uppercase())
}

impl MetadataRecord {
    /// Overwrite one textual field
    pub fn set(&mut self, field: StandardField, value: String) {
        let slot = match field {
            StandardField::Title => &mut self.title,
            StandardField::Artist => &mut self.artist,
            StandardField::Album => &mut self.album,
            StandardField::Year => &mut self.year,
            StandardField::Track => &mut self.track,
            StandardField::Genre => &mut self.genre,
        };
        *slot = value;
    }
}
