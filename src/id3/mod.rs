// ID3v2 tag handling module
pub mod frames;
pub mod v2;

pub use frames::TagFrame;
pub use v2::{Id3v2Header, Id3v2Tag};
