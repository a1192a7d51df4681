// STREAMINFO block decoding

use crate::utils::io::be_u20;

/// Audio properties from the mandatory first FLAC block
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StreamInfo {
    pub sample_rate: u32,
    pub channels: u8,
    pub bits_per_sample: u8,
    /// Low 32 bits of the 36-bit sample count
    pub total_samples: u32,
}

impl StreamInfo {
    pub const MIN_SIZE: usize = 34;

    /// Decode a STREAMINFO payload, `None` if it is shorter than 34 bytes.
    ///
    /// Layout after the block/frame size fields (bytes 0-9): 20 bits sample
    /// rate, 3 bits channels-1, 5 bits bits-per-sample-1, 36 bits total
    /// samples. Only bytes 14-17 of the sample count are read, so streams
    /// longer than 2^32 samples wrap.
    pub fn parse(data: &[u8]) -> Option<Self> {
        if data.len() < Self::MIN_SIZE {
            return None;
        }
        let sample_rate = be_u20([data[10], data[11], data[12]]);
        let channels = ((data[12] >> 1) & 0x07) + 1;
        let bits_per_sample = (((data[12] & 0x01) << 4) | (data[13] >> 4)) + 1;
        let total_samples = u32::from_be_bytes([data[14], data[15], data[16], data[17]]);

        Some(StreamInfo {
            sample_rate,
            channels,
            bits_per_sample,
            total_samples,
        })
    }

    /// Length in seconds, 0 when either count is zero
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 || self.total_samples == 0 {
            return 0.0;
        }
        self.total_samples as f64 / self.sample_rate as f64
    }
}
