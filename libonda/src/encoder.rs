// Encode pipeline: PCM frames -> DCT -> quantize -> bit-packed block records

use std::io::Write;

use log::{debug, trace};

use crate::bitstream::BitWriter;
use crate::dct::Dct;
use crate::error::{OndaError, Result};
use crate::quantizer::{Quantizer, STEP_TABLE};
use crate::types::{StreamHeader, BLOCK_SIZE, FRAME_COUNT_BITS, MAGNITUDE_WIDTH_BITS};

/// Totals reported by a successful encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeStats {
    /// PCM frames consumed (after downmix, before zero padding).
    pub frames: u32,
    /// Block records written.
    pub blocks: u32,
    /// Bits emitted before the final byte is zero padded.
    pub bits_written: u64,
}

impl EncodeStats {
    /// Size of the finished stream in bytes, padding included.
    pub fn encoded_bytes(&self) -> u64 {
        (self.bits_written + 7) / 8
    }
}

/// Streaming encoder for the onda format.
///
/// One instance holds the transform tables and step table and can encode any
/// number of independent streams at the same sample rate.
pub struct Encoder {
    sample_rate: u32,
    dct: Dct,
    quantizer: Quantizer,
}

impl Encoder {
    pub fn new(sample_rate: u32) -> Self {
        Encoder {
            sample_rate,
            dct: Dct::new(BLOCK_SIZE),
            quantizer: Quantizer::new(&STEP_TABLE),
        }
    }

    /// Encode interleaved 16-bit PCM into an onda stream written to `sink`.
    ///
    /// Stereo input is downmixed to mono by per-frame integer average. The
    /// final short block is zero padded on the wire while its true frame
    /// count is preserved in the record. The sink has received the complete,
    /// byte-padded stream by the time this returns.
    pub fn encode<W: Write>(&self, samples: &[i16], channels: u16, sink: W) -> Result<EncodeStats> {
        if channels == 0 || channels > 2 {
            return Err(OndaError::UnsupportedChannels(channels));
        }
        let channel_count = channels as usize;
        if samples.len() % channel_count != 0 {
            return Err(OndaError::RaggedSampleBuffer {
                length: samples.len(),
                channels,
            });
        }
        let total_frames = samples.len() / channel_count;
        if total_frames > u32::MAX as usize {
            return Err(OndaError::StreamTooLong(total_frames));
        }

        let header = StreamHeader {
            sample_rate: self.sample_rate,
            total_frames: total_frames as u32,
            block_size: BLOCK_SIZE as u16,
        };
        let mut bits = BitWriter::new(sink);
        header.write_to(&mut bits)?;

        let mut block = vec![0.0f64; BLOCK_SIZE];
        let mut coefficients = vec![0.0f64; BLOCK_SIZE];
        let mut quantized = vec![0i32; BLOCK_SIZE];

        let mut blocks = 0u32;
        for chunk in samples.chunks(BLOCK_SIZE * channel_count) {
            let frame_count = chunk.len() / channel_count;
            for (slot, frame) in block.iter_mut().zip(chunk.chunks_exact(channel_count)) {
                *slot = downmix_frame(frame);
            }
            block[frame_count..].fill(0.0);

            self.dct.forward(&block, &mut coefficients);
            self.quantizer.quantize(&coefficients, &mut quantized);

            let width = magnitude_width(&quantized);
            write_block_record(&mut bits, frame_count as u16, width, &quantized)?;

            blocks += 1;
            trace!("block {blocks}: {frame_count} frames, magnitude width {width}");
        }

        let stats = EncodeStats {
            frames: total_frames as u32,
            blocks,
            bits_written: bits.bit_position(),
        };
        bits.finish()?;

        debug!(
            "encoded {} frames in {} blocks, {} bytes",
            stats.frames,
            stats.blocks,
            stats.encoded_bytes()
        );
        Ok(stats)
    }
}

/// Collapse one interleaved frame to a single sample. Stereo averages the
/// two channels in integer arithmetic, truncating toward zero.
fn downmix_frame(frame: &[i16]) -> f64 {
    if frame.len() == 2 {
        ((frame[0] as i32 + frame[1] as i32) / 2) as f64
    } else {
        frame[0] as f64
    }
}

/// Minimum bit width that holds the largest absolute value in the block;
/// 0 when every value is zero.
fn magnitude_width(quantized: &[i32]) -> u8 {
    let max = quantized
        .iter()
        .map(|value| value.unsigned_abs())
        .max()
        .unwrap_or(0);
    (u32::BITS - max.leading_zeros()) as u8
}

fn write_block_record<W: Write>(
    bits: &mut BitWriter<W>,
    frame_count: u16,
    width: u8,
    quantized: &[i32],
) -> Result<()> {
    bits.write_bits(frame_count as u64, FRAME_COUNT_BITS)?;
    bits.write_bits(width as u64, MAGNITUDE_WIDTH_BITS)?;
    // TODO: a width-0 record still spends one sign bit per coefficient, so a
    // silent block costs block_size bits. Dropping them needs a format rev.
    for &value in quantized {
        bits.write_bit((value < 0) as u32)?;
        if width > 0 {
            bits.write_bits(value.unsigned_abs() as u64, width)?;
        }
    }
    Ok(())
}
