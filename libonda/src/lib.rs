//! libonda: encoder/decoder for the onda lossy audio format.
//!
//! The format cuts audio into fixed 1024-sample blocks, transforms each with
//! an orthonormal DCT-II, quantizes the coefficients against a
//! frequency-weighted step table and bit-packs them with a per-block
//! adaptive magnitude width. Stereo input is downmixed to mono on encode;
//! decoding always yields mono 16-bit PCM.
//!
//! ```no_run
//! use std::io::Cursor;
//!
//! let samples: Vec<i16> = vec![0; 44_100];
//! let mut stream = Vec::new();
//! let stats = libonda_audio::encode(&samples, 1, 44_100, &mut stream)?;
//! let decoded = libonda_audio::decode(Cursor::new(&stream))?;
//! assert_eq!(decoded.frames_decoded, stats.frames as u64);
//! # Ok::<(), libonda_audio::OndaError>(())
//! ```

pub mod bitstream;
pub mod dct;
pub mod quantizer;

mod decoder;
mod encoder;
mod error;
mod types;

pub use decoder::{DecodedAudio, Decoder};
pub use dct::Dct;
pub use encoder::{EncodeStats, Encoder};
pub use error::{OndaError, Result};
pub use quantizer::{Quantizer, STEP_TABLE};
pub use types::{StreamHeader, BLOCK_SIZE, HEADER_BITS};

use std::io::{Read, Write};

/// Encode interleaved 16-bit PCM (mono or stereo) into an onda stream.
pub fn encode<W: Write>(
    samples: &[i16],
    channels: u16,
    sample_rate: u32,
    sink: W,
) -> Result<EncodeStats> {
    Encoder::new(sample_rate).encode(samples, channels, sink)
}

/// Decode a complete onda stream into mono 16-bit PCM.
pub fn decode<R: Read>(source: R) -> Result<DecodedAudio> {
    Decoder::new().decode(source)
}

/// Read only the 10-byte stream header from `source`.
pub fn read_header<R: Read>(source: R) -> Result<StreamHeader> {
    let mut bits = bitstream::BitReader::new(source);
    StreamHeader::read_from(&mut bits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn encode_then_decode_smoke() {
        let samples: Vec<i16> = (0..2048).map(|i| ((i % 64) * 100 - 3200) as i16).collect();

        let mut stream = Vec::new();
        let stats = encode(&samples, 1, 8_000, &mut stream).unwrap();
        assert_eq!(stats.frames, 2048);
        assert_eq!(stats.blocks, 2);
        assert_eq!(stream.len() as u64, stats.encoded_bytes());

        let decoded = decode(Cursor::new(&stream)).unwrap();
        assert_eq!(decoded.sample_rate, 8_000);
        assert_eq!(decoded.total_frames, 2048);
        assert_eq!(decoded.samples.len(), 2048);
    }

    #[test]
    fn header_helper_matches_the_encoded_header() {
        let mut stream = Vec::new();
        encode(&[0i16; 100], 1, 48_000, &mut stream).unwrap();

        let header = read_header(Cursor::new(&stream)).unwrap();
        assert_eq!(header.sample_rate, 48_000);
        assert_eq!(header.total_frames, 100);
        assert_eq!(header.block_size as usize, BLOCK_SIZE);
    }
}
