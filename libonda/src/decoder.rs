// Decode pipeline: bit-packed block records -> dequantize -> inverse DCT -> PCM

use std::io::Read;

use log::{debug, trace, warn};

use crate::bitstream::BitReader;
use crate::dct::Dct;
use crate::error::{OndaError, Result};
use crate::quantizer::{Quantizer, STEP_TABLE};
use crate::types::{
    StreamHeader, BLOCK_SIZE, FRAME_COUNT_BITS, MAGNITUDE_WIDTH_BITS, MAX_MAGNITUDE_BITS,
};

/// A fully decoded onda stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedAudio {
    /// Sample rate declared by the stream header.
    pub sample_rate: u32,
    /// Frame count declared by the stream header.
    pub total_frames: u32,
    /// Frames actually reconstructed. Can exceed `total_frames` when the
    /// final record of an inconsistent stream overshoots the declared total;
    /// that discrepancy is reportable but not an error.
    pub frames_decoded: u64,
    /// Reconstructed mono PCM, `frames_decoded` samples long.
    pub samples: Vec<i16>,
}

/// Upper bound on the output frames preallocated from the header's declared
/// total. The header is unvalidated input, so a hostile 10-byte stream could
/// otherwise demand gigabytes before the first record is even read; beyond
/// this the vector grows as real records arrive.
const MAX_PREALLOC_FRAMES: usize = 1 << 22;

/// Streaming decoder for the onda format.
pub struct Decoder {
    dct: Dct,
    quantizer: Quantizer,
}

impl Decoder {
    pub fn new() -> Self {
        Decoder {
            dct: Dct::new(BLOCK_SIZE),
            quantizer: Quantizer::new(&STEP_TABLE),
        }
    }

    /// Decode a complete onda stream from `source`.
    ///
    /// The loop is driven by the header's declared frame total, not by end
    /// of stream, so a source that runs dry mid-record is reported as
    /// truncation ([`OndaError::UnexpectedEof`]).
    pub fn decode<R: Read>(&self, source: R) -> Result<DecodedAudio> {
        let mut bits = BitReader::new(source);
        let header = StreamHeader::read_from(&mut bits)?;
        header.validate_block_size()?;
        debug!(
            "decoding stream: {} Hz, {} frames declared, block size {}",
            header.sample_rate, header.total_frames, header.block_size
        );

        let mut quantized = vec![0i32; BLOCK_SIZE];
        let mut coefficients = vec![0.0f64; BLOCK_SIZE];
        let mut block = vec![0.0f64; BLOCK_SIZE];
        let mut samples =
            Vec::with_capacity((header.total_frames as usize).min(MAX_PREALLOC_FRAMES));

        let mut frames_decoded = 0u64;
        let mut blocks = 0u64;
        while frames_decoded < header.total_frames as u64 {
            let frame_count = read_block_record(&mut bits, &mut quantized)?;

            self.quantizer.dequantize(&quantized, &mut coefficients);
            self.dct.inverse(&coefficients, &mut block);
            samples.extend(block[..frame_count as usize].iter().map(|&s| clamp_to_i16(s)));

            frames_decoded += frame_count as u64;
            blocks += 1;
            trace!("block {blocks}: {frame_count} frames");
        }

        if frames_decoded != header.total_frames as u64 {
            warn!(
                "stream declared {} frames but its records held {}",
                header.total_frames, frames_decoded
            );
        }
        debug!("decoded {frames_decoded} frames from {blocks} blocks");

        Ok(DecodedAudio {
            sample_rate: header.sample_rate,
            total_frames: header.total_frames,
            frames_decoded,
            samples,
        })
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Decoder::new()
    }
}

/// Read one block record into `quantized` and return its frame count.
///
/// Validation order matches the field order on the wire: the frame count is
/// checked before anything further in the record is consumed, then the
/// magnitude width, then each coefficient as it arrives.
fn read_block_record<R: Read>(bits: &mut BitReader<R>, quantized: &mut [i32]) -> Result<u16> {
    let frame_count = bits.read_bits(FRAME_COUNT_BITS)? as u16;
    if frame_count == 0 || frame_count as usize > quantized.len() {
        return Err(OndaError::InvalidFrameCount(frame_count));
    }

    let width = bits.read_bits(MAGNITUDE_WIDTH_BITS)? as u8;
    if width > MAX_MAGNITUDE_BITS {
        return Err(OndaError::InvalidMagnitudeWidth(width));
    }

    for slot in quantized.iter_mut() {
        let sign = bits.read_bit()?;
        // A width-0 record still carries one sign bit per coefficient; the
        // value stays 0 whatever that bit says.
        *slot = 0;
        if width > 0 {
            let magnitude = bits.read_bits(width)?;
            if magnitude > i32::MAX as u64 {
                return Err(OndaError::MagnitudeOverflow(magnitude));
            }
            *slot = if sign != 0 {
                -(magnitude as i32)
            } else {
                magnitude as i32
            };
        }
    }
    Ok(frame_count)
}

/// Round to nearest (ties away from zero) and saturate into 16-bit PCM.
fn clamp_to_i16(sample: f64) -> i16 {
    sample.round().clamp(i16::MIN as f64, i16::MAX as f64) as i16
}
