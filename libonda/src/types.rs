// Stream-level constants and the wire header

use std::io::{Read, Write};

use crate::bitstream::{BitReader, BitWriter};
use crate::error::{OndaError, Result};

/// Samples per transform block. Fixed for every stream this build produces
/// and the only block size this build will decode.
pub const BLOCK_SIZE: usize = 1024;

/// Wire width of the stream header.
pub const HEADER_BITS: u32 = 80;

/// Wire width of the per-block frame count field.
pub const FRAME_COUNT_BITS: u8 = 16;

/// Wire width of the per-block magnitude width field.
pub const MAGNITUDE_WIDTH_BITS: u8 = 6;

/// Largest magnitude width a conforming stream may declare.
pub const MAX_MAGNITUDE_BITS: u8 = 32;

/// Stream header, written once at the start of every onda stream.
///
/// Wire layout (bit-packed, most significant bit first, no padding):
///
/// | Field          | Bits | Meaning                          |
/// |----------------|------|----------------------------------|
/// | `sample_rate`  | 32   | source sample rate in Hz         |
/// | `total_frames` | 32   | PCM frames declared, pre-padding |
/// | `block_size`   | 16   | samples per block                |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamHeader {
    pub sample_rate: u32,
    pub total_frames: u32,
    pub block_size: u16,
}

impl StreamHeader {
    pub fn write_to<W: Write>(&self, bits: &mut BitWriter<W>) -> Result<()> {
        bits.write_bits(self.sample_rate as u64, 32)?;
        bits.write_bits(self.total_frames as u64, 32)?;
        bits.write_bits(self.block_size as u64, 16)?;
        Ok(())
    }

    pub fn read_from<R: Read>(bits: &mut BitReader<R>) -> Result<Self> {
        let sample_rate = bits.read_bits(32)? as u32;
        let total_frames = bits.read_bits(32)? as u32;
        let block_size = bits.read_bits(16)? as u16;
        Ok(StreamHeader {
            sample_rate,
            total_frames,
            block_size,
        })
    }

    /// Reject a stream whose block size this build cannot decode.
    pub fn validate_block_size(&self) -> Result<()> {
        if self.block_size as usize != BLOCK_SIZE {
            return Err(OndaError::BlockSizeMismatch {
                expected: BLOCK_SIZE as u16,
                found: self.block_size,
            });
        }
        Ok(())
    }

    /// Duration in seconds implied by the declared frame count.
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.total_frames as f64 / self.sample_rate as f64
    }
}
