// MPEG audio frame header decoding

/// MPEG audio version, from bits 4-3 of the second header byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MpegVersion {
    V1,
    V2,
    V2_5,
}

/// MPEG audio layer, from bits 2-1 of the second header byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    I,
    II,
    III,
}

impl MpegVersion {
    fn from_bits(bits: u8) -> Option<Self> {
        match bits & 0x03 {
            0b00 => Some(MpegVersion::V2_5),
            0b10 => Some(MpegVersion::V2),
            0b11 => Some(MpegVersion::V1),
            _ => None,
        }
    }
}

impl Layer {
    fn from_bits(bits: u8) -> Option<Self> {
        match bits & 0x03 {
            0b01 => Some(Layer::III),
            0b10 => Some(Layer::II),
            0b11 => Some(Layer::I),
            _ => None,
        }
    }

    /// Samples carried by one frame.
    ///
    /// Layer III uses 1152 for every version, which overstates the frame
    /// count for MPEG-2/2.5 streams (their frames hold 576 samples).
    pub fn samples_per_frame(&self) -> u32 {
        match self {
            Layer::I => 384,
            Layer::II | Layer::III => 1152,
        }
    }
}

// Bitrates in kbps, indexed by the 4-bit bitrate index. 0 marks "free" and "bad".
const BITRATES_V1_L1: [u32; 16] = [
    0, 32, 64, 96, 128, 160, 192, 224, 256, 288, 320, 352, 384, 416, 448, 0,
];
const BITRATES_V1_L2: [u32; 16] = [
    0, 32, 48, 56, 64, 80, 96, 112, 128, 160, 192, 224, 256, 320, 384, 0,
];
const BITRATES_V1_L3: [u32; 16] = [
    0, 32, 40, 48, 56, 64, 80, 96, 112, 128, 160, 192, 224, 256, 320, 0,
];
const BITRATES_V2_L1: [u32; 16] = [
    0, 32, 48, 56, 64, 80, 96, 112, 128, 144, 160, 176, 192, 224, 256, 0,
];
const BITRATES_V2_L23: [u32; 16] = [
    0, 8, 16, 24, 32, 40, 48, 56, 64, 80, 96, 112, 128, 144, 160, 0,
];

// Sample rates in Hz, indexed by the 2-bit sample rate index
const SAMPLE_RATES_V1: [u32; 4] = [44100, 48000, 32000, 0];
const SAMPLE_RATES_V2: [u32; 4] = [22050, 24000, 16000, 0];
const SAMPLE_RATES_V2_5: [u32; 4] = [11025, 12000, 8000, 0];

fn bitrate_table(version: MpegVersion, layer: Layer) -> &'static [u32; 16] {
    match (version, layer) {
        (MpegVersion::V1, Layer::I) => &BITRATES_V1_L1,
        (MpegVersion::V1, Layer::II) => &BITRATES_V1_L2,
        (MpegVersion::V1, Layer::III) => &BITRATES_V1_L3,
        (_, Layer::I) => &BITRATES_V2_L1,
        (_, Layer::II | Layer::III) => &BITRATES_V2_L23,
    }
}

fn sample_rate_table(version: MpegVersion) -> &'static [u32; 4] {
    match version {
        MpegVersion::V1 => &SAMPLE_RATES_V1,
        MpegVersion::V2 => &SAMPLE_RATES_V2,
        MpegVersion::V2_5 => &SAMPLE_RATES_V2_5,
    }
}

/// True when the window starts with the 11-bit frame sync
pub fn is_sync(window: &[u8; 4]) -> bool {
    window[0] == 0xFF && (window[1] & 0xE0) == 0xE0
}

/// Decoded fields of a 4-byte frame header
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MpegFrameHeader {
    pub version: MpegVersion,
    pub layer: Layer,
    /// kbps
    pub bitrate: u32,
    /// Hz
    pub sample_rate: u32,
    pub padding: bool,
}

impl MpegFrameHeader {
    pub const SIZE: usize = 4;

    /// Decode a synced header.
    ///
    /// Returns `None` for reserved version or layer bits and for indexes
    /// whose table entry is zero; any of those ends a scan.
    pub fn parse(window: [u8; 4]) -> Option<Self> {
        if !is_sync(&window) {
            return None;
        }
        let version = MpegVersion::from_bits(window[1] >> 3)?;
        let layer = Layer::from_bits(window[1] >> 1)?;
        let bitrate = bitrate_table(version, layer)[(window[2] >> 4) as usize];
        let sample_rate = sample_rate_table(version)[((window[2] >> 2) & 0x03) as usize];
        if bitrate == 0 || sample_rate == 0 {
            return None;
        }
        Some(MpegFrameHeader {
            version,
            layer,
            bitrate,
            sample_rate,
            padding: (window[2] >> 1) & 0x01 == 1,
        })
    }

    /// Frame length in bytes, header included
    pub fn frame_size(&self) -> u32 {
        let padding = self.padding as u32;
        match self.layer {
            Layer::I => (12 * self.bitrate * 1000 / self.sample_rate + padding) * 4,
            Layer::II | Layer::III => 144 * self.bitrate * 1000 / self.sample_rate + padding,
        }
    }

    /// Playback time of one frame in milliseconds
    pub fn duration_ms(&self) -> f64 {
        self.layer.samples_per_frame() as f64 * 1000.0 / self.sample_rate as f64
    }
}
