// MPEG audio frame scanning module

pub mod header;
pub mod scan;

pub use header::{Layer, MpegFrameHeader, MpegVersion};
pub use scan::{scan_frames, ScanSummary};
