//! Error types for metadata parsing.
//!
//! `FileOpen` and `Format` end a parse before anything is read.
//! `TruncatedData` and `MalformedFrame` are recoverable: the parser stops at
//! the bad structure, keeps the fields it already collected and reports the
//! problem in [`ParseReport::issues`](crate::ParseReport). An `Io` failure
//! once the magic bytes matched lands in `issues` as well.

use std::path::PathBuf;

/// Crate-wide result type.
pub type Result<T> = std::result::Result<T, MetadataError>;

#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    /// Path missing or unreadable
    #[error("cannot open {path}: {source}")]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Required magic bytes not found
    #[error("not a {expected} stream: missing {magic:?} signature")]
    Format {
        expected: &'static str,
        magic: &'static str,
    },

    /// Fewer bytes available than a header declared
    #[error("truncated {what}: expected {expected} bytes, found {found}")]
    TruncatedData {
        what: &'static str,
        expected: u64,
        found: u64,
    },

    /// A declared length runs past the enclosing structure
    #[error("malformed {what} at offset {offset}: declared {declared} bytes, {available} available")]
    MalformedFrame {
        what: String,
        offset: usize,
        declared: u64,
        available: u64,
    },

    /// I/O failure after the file was opened
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MetadataError {
    pub fn file_open(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileOpen {
            path: path.into(),
            source,
        }
    }

    pub fn truncated(what: &'static str, expected: u64, found: u64) -> Self {
        Self::TruncatedData {
            what,
            expected,
            found,
        }
    }

    pub fn malformed(what: impl Into<String>, offset: usize, declared: u64, available: u64) -> Self {
        Self::MalformedFrame {
            what: what.into(),
            offset,
            declared,
            available,
        }
    }

    /// True for the kinds that leave a usable partial record behind
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::TruncatedData { .. } | Self::MalformedFrame { .. })
    }
}
