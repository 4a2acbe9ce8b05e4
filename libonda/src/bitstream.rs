// Bit-level stream primitives shared by the encoder and decoder

use std::io::{ErrorKind, Read, Write};

use crate::error::{OndaError, Result};

/// Bit-level writer over a byte sink.
///
/// Bits pack MSB-first within each byte and multi-bit fields are emitted
/// most-significant-bit first, so the wire layout is independent of host
/// endianness. Completed bytes are handed to the sink as soon as they fill;
/// the trailing partial byte is held back until [`finish`](Self::finish).
pub struct BitWriter<W: Write> {
    sink: W,
    current_byte: u8,
    bit_pos: u8,
    bits_written: u64,
}

impl<W: Write> BitWriter<W> {
    pub fn new(sink: W) -> Self {
        BitWriter {
            sink,
            current_byte: 0,
            bit_pos: 0,
            bits_written: 0,
        }
    }

    /// Append a single bit; any nonzero value counts as 1.
    pub fn write_bit(&mut self, bit: u32) -> Result<()> {
        if bit != 0 {
            self.current_byte |= 1 << (7 - self.bit_pos);
        }

        self.bit_pos += 1;
        self.bits_written += 1;
        if self.bit_pos == 8 {
            self.sink.write_all(&[self.current_byte])?;
            self.current_byte = 0;
            self.bit_pos = 0;
        }
        Ok(())
    }

    /// Write the `count` least-significant bits of `value`, most significant
    /// first. `count` may be anything from 0 (writes nothing) to 64.
    pub fn write_bits(&mut self, value: u64, count: u8) -> Result<()> {
        debug_assert!(count <= 64, "bit count {count} out of range");
        for i in (0..count).rev() {
            self.write_bit(((value >> i) & 1) as u32)?;
        }
        Ok(())
    }

    /// Bit offset from the start of the stream: bits written so far.
    pub fn bit_position(&self) -> u64 {
        self.bits_written
    }

    /// Pad the trailing partial byte with zero bits, flush the sink and hand
    /// it back. Every successfully written stream must end with this call,
    /// otherwise the last few bits never reach the sink.
    pub fn finish(mut self) -> Result<W> {
        if self.bit_pos > 0 {
            self.sink.write_all(&[self.current_byte])?;
        }
        self.sink.flush()?;
        Ok(self.sink)
    }
}

/// Bit-level reader over a byte source; the mirror of [`BitWriter`].
///
/// Asking for more bits than the source holds yields
/// [`OndaError::UnexpectedEof`].
pub struct BitReader<R: Read> {
    source: R,
    current_byte: u8,
    bit_pos: u8,
    bits_read: u64,
}

impl<R: Read> BitReader<R> {
    pub fn new(source: R) -> Self {
        BitReader {
            source,
            current_byte: 0,
            bit_pos: 8,
            bits_read: 0,
        }
    }

    /// Read a single bit, 0 or 1.
    pub fn read_bit(&mut self) -> Result<u32> {
        if self.bit_pos == 8 {
            let mut byte = [0u8; 1];
            self.source.read_exact(&mut byte).map_err(|err| {
                if err.kind() == ErrorKind::UnexpectedEof {
                    OndaError::UnexpectedEof
                } else {
                    OndaError::Io(err)
                }
            })?;
            self.current_byte = byte[0];
            self.bit_pos = 0;
        }

        let bit = (self.current_byte >> (7 - self.bit_pos)) & 1;
        self.bit_pos += 1;
        self.bits_read += 1;
        Ok(bit as u32)
    }

    /// Read `count` bits (0 to 64) into the low bits of the result, in the
    /// same order [`BitWriter::write_bits`] emitted them.
    pub fn read_bits(&mut self, count: u8) -> Result<u64> {
        debug_assert!(count <= 64, "bit count {count} out of range");
        let mut value = 0u64;
        for _ in 0..count {
            value = (value << 1) | self.read_bit()? as u64;
        }
        Ok(value)
    }

    /// Bit offset from the start of the stream: bits consumed so far.
    pub fn bit_position(&self) -> u64 {
        self.bits_read
    }
}
