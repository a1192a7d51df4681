// VORBIS_COMMENT implementation for FLAC

use tracing::warn;

use crate::error::MetadataError;
use crate::field_mapping;
use crate::metadata::MetadataRecord;
use crate::utils::io::ByteCursor;

/// Vorbis comment structure
#[derive(Debug, Default)]
pub struct VorbisComment {
    pub vendor_string: String,
    /// Comments in file order, keys uppercased
    pub comments: Vec<(String, String)>,
}

impl VorbisComment {
    /// Parse a VORBIS_COMMENT block payload.
    ///
    /// Returns the comments decoded so far together with the error that
    /// stopped the walk, if a length prefix ran past the block.
    pub fn parse(data: &[u8]) -> (Self, Option<MetadataError>) {
        let mut cursor = ByteCursor::new(data);
        let mut vorbis = VorbisComment::default();
        let error = vorbis.parse_into(&mut cursor).err();
        (vorbis, error)
    }

    fn parse_into(&mut self, cursor: &mut ByteCursor<'_>) -> Result<(), MetadataError> {
        let vendor = read_string(cursor, "vendor string")?;
        self.vendor_string = String::from_utf8_lossy(vendor).into_owned();

        let count = cursor
            .le_u32()
            .ok_or_else(|| overrun(cursor, "comment count", 4))?;

        for _ in 0..count {
            let comment = String::from_utf8_lossy(read_string(cursor, "comment")?).into_owned();
            // Format: FIELD=value, split at the first '='
            if let Some((field, value)) = comment.split_once('=') {
                self.comments
                    .push((field.to_ascii_uppercase(), value.to_string()));
            }
        }
        Ok(())
    }

    /// Copy recognized comments into `record`, later comments winning
    pub fn apply_to(&self, record: &mut MetadataRecord) {
        for (key, value) in &self.comments {
            if let Some(field) = field_mapping::from_vorbis(key) {
                record.set(field, value.clone());
            }
        }
    }
}

/// Parse a block and apply it, pushing any overrun onto `issues`
pub fn apply_block(data: &[u8], record: &mut MetadataRecord, issues: &mut Vec<MetadataError>) {
    let (vorbis, error) = VorbisComment::parse(data);
    vorbis.apply_to(record);
    if let Some(e) = error {
        warn!("{e}");
        issues.push(e);
    }
}

fn read_string<'a>(cursor: &mut ByteCursor<'a>, what: &str) -> Result<&'a [u8], MetadataError> {
    let len = cursor
        .le_u32()
        .ok_or_else(|| overrun(cursor, what, 4))?;
    cursor
        .take(len as usize)
        .ok_or_else(|| overrun(cursor, what, len as u64))
}

fn overrun(cursor: &ByteCursor<'_>, what: &str, declared: u64) -> MetadataError {
    MetadataError::malformed(
        format!("Vorbis {what}"),
        cursor.position(),
        declared,
        cursor.remaining() as u64,
    )
}
