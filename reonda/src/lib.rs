//! reonda - Command-line converter library for the onda audio format
//!
//! File-level encoding and decoding between WAV and onda streams, plus
//! stream inspection. Shared by the reonda binary and the integration tests.

pub mod audio;

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;

use anyhow::{Context, Result};
use libonda_audio::{DecodedAudio, EncodeStats};
use log::debug;

/// Information about an onda stream, read from its header.
#[derive(Debug, Clone, serde::Serialize)]
pub struct OndaInfo {
    pub sample_rate: u32,
    pub total_frames: u32,
    pub block_size: u16,
    pub duration_secs: f64,
    pub file_size: u64,
    pub avg_bitrate_kbps: f64,
}

/// Encode already-read WAV audio into an onda file.
///
/// # Arguments
/// * `wav` - Interleaved 16-bit PCM from [`audio::read_wav_file`]
/// * `output` - Path of the onda file to create
///
/// # Returns
/// Encoder statistics for the written stream
pub fn encode_to_file(wav: &audio::WavAudio, output: &Path) -> Result<EncodeStats> {
    let file = File::create(output)
        .with_context(|| format!("Failed to create output file: {}", output.display()))?;
    let sink = BufWriter::new(file);

    let stats = libonda_audio::encode(&wav.samples, wav.channels, wav.sample_rate, sink)
        .context("Failed to encode audio")?;

    debug!(
        "encoded {} ({} frames, {} blocks, {} bytes)",
        output.display(),
        stats.frames,
        stats.blocks,
        stats.encoded_bytes()
    );
    Ok(stats)
}

/// Decode an onda file to PCM samples.
///
/// # Arguments
/// * `input` - Path of the onda file
///
/// # Returns
/// Decoded mono audio, ready for [`audio::write_wav_file`]
pub fn decode_file(input: &Path) -> Result<DecodedAudio> {
    let file = File::open(input)
        .with_context(|| format!("Failed to open onda file: {}", input.display()))?;

    let decoded = libonda_audio::decode(BufReader::new(file))
        .with_context(|| format!("Failed to decode {}", input.display()))?;

    debug!(
        "decoded {} ({} frames at {} Hz)",
        input.display(),
        decoded.frames_decoded,
        decoded.sample_rate
    );
    Ok(decoded)
}

/// Read stream information from an onda file without decoding it.
pub fn read_info(path: &Path) -> Result<OndaInfo> {
    let file_size = fs::metadata(path)
        .with_context(|| format!("Failed to stat {}", path.display()))?
        .len();

    let file = File::open(path)
        .with_context(|| format!("Failed to open onda file: {}", path.display()))?;
    let header = libonda_audio::read_header(BufReader::new(file))
        .with_context(|| format!("Failed to read onda header from {}", path.display()))?;

    let duration_secs = header.duration_secs();
    let avg_bitrate_kbps = if duration_secs > 0.0 {
        file_size as f64 * 8.0 / duration_secs / 1000.0
    } else {
        0.0
    };

    Ok(OndaInfo {
        sample_rate: header.sample_rate,
        total_frames: header.total_frames,
        block_size: header.block_size,
        duration_secs,
        file_size,
        avg_bitrate_kbps,
    })
}
