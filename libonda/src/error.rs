use thiserror::Error;

/// Everything that can go wrong while encoding or decoding an onda stream.
///
/// The set is closed on purpose: I/O failures, rejections of input the
/// format cannot represent, and corruption found while decoding. Nothing is
/// retried; every variant aborts the run that produced it.
#[derive(Debug, Error)]
pub enum OndaError {
    /// The underlying byte sink or source failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The stream ended while more bits were expected.
    #[error("unexpected end of stream")]
    UnexpectedEof,

    /// Encoder input with a channel count the format cannot hold.
    #[error("unsupported channel count {0} (expected mono or stereo)")]
    UnsupportedChannels(u16),

    /// Interleaved sample buffer that is not a whole number of frames.
    #[error("sample buffer of length {length} does not divide into {channels}-channel frames")]
    RaggedSampleBuffer { length: usize, channels: u16 },

    /// More input frames than the header's 32-bit frame count can declare.
    #[error("input of {0} frames exceeds the format's frame-count limit")]
    StreamTooLong(usize),

    /// Header block size differs from the decoder's fixed block size.
    #[error("stream uses block size {found}, this decoder expects {expected}")]
    BlockSizeMismatch { expected: u16, found: u16 },

    /// Block record declaring a frame count of zero or above the block size.
    #[error("invalid frame count {0} in block record")]
    InvalidFrameCount(u16),

    /// Block record declaring a magnitude width above 32 bits.
    #[error("invalid magnitude bit width {0} in block record")]
    InvalidMagnitudeWidth(u8),

    /// Decoded coefficient magnitude that does not fit a signed 32-bit value.
    #[error("coefficient magnitude {0} exceeds the representable range")]
    MagnitudeOverflow(u64),
}

impl OndaError {
    /// True when the stream bytes themselves are bad (truncation or mangled
    /// records), as opposed to I/O failures or unsupported input. Decoding is
    /// driven by the declared frame total rather than by end-of-stream, so an
    /// EOF seen mid-decode always means truncation.
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            OndaError::UnexpectedEof
                | OndaError::InvalidFrameCount(_)
                | OndaError::InvalidMagnitudeWidth(_)
                | OndaError::MagnitudeOverflow(_)
        )
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, OndaError>;
