// Frame-by-frame walk over MPEG audio data

use super::header::{is_sync, MpegFrameHeader};

/// Totals collected over the accepted frames
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanSummary {
    pub frames: u32,
    pub bitrate_sum: u64,
    pub duration_ms: f64,
}

impl ScanSummary {
    fn add(&mut self, header: &MpegFrameHeader) {
        self.frames += 1;
        self.bitrate_sum += header.bitrate as u64;
        self.duration_ms += header.duration_ms();
    }

    /// Integer mean of per-frame bitrates in kbps, 0 without frames
    pub fn average_bitrate(&self) -> u32 {
        if self.frames == 0 {
            return 0;
        }
        (self.bitrate_sum / self.frames as u64) as u32
    }

    pub fn duration_secs(&self) -> f64 {
        self.duration_ms / 1000.0
    }
}

/// Walk the frames in `data`, which starts right after any ID3v2 tag.
///
/// A window without the sync pattern moves one byte forward; an accepted
/// frame moves by its full size. The first synced header with an unusable
/// version, bitrate or sample rate ends the walk.
pub fn scan_frames(data: &[u8]) -> ScanSummary {
    let mut summary = ScanSummary::default();
    let mut pos = 0usize;

    while let Some(window) = data.get(pos..pos + MpegFrameHeader::SIZE) {
        let window: [u8; 4] = match window.try_into() {
            Ok(w) => w,
            Err(_) => break,
        };
        if !is_sync(&window) {
            pos += 1;
            continue;
        }
        let Some(header) = MpegFrameHeader::parse(window) else {
            break;
        };
        summary.add(&header);
        pos += header.frame_size().max(MpegFrameHeader::SIZE as u32) as usize;
    }

    summary
}
