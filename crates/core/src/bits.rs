//! Conversion between textual bit strings and packed bytes.
//!
//! The codec works on bit strings made of the characters '0' and '1'. The
//! packed container layout stores the same bits eight to a byte, MSB-first,
//! with the final byte padded with zeros. The exact bit length travels in the
//! container header, so padding is never mistaken for data.
//!
//! # Example
//! ```
//! use huffpack_core::bits::{pack, unpack};
//!
//! let bytes = pack("10111").unwrap();
//! assert_eq!(bytes, vec![0b1011_1000]);
//! assert_eq!(unpack(&bytes, 5).unwrap(), "10111");
//! ```

use crate::error::{Error, FormatError, Result};

/// Writes bits MSB-first into a byte buffer.
///
/// # Invariants
/// - `bit_count` is always < 8
#[derive(Debug, Clone, Default)]
pub struct BitWriter {
    /// Completed bytes
    bytes: Vec<u8>,
    /// Accumulator for the current partial byte (MSB-aligned)
    bit_buffer: u8,
    /// Number of bits in bit_buffer (0-7)
    bit_count: u8,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer sized for `bit_len` bits.
    pub fn with_bit_capacity(bit_len: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bit_len.div_ceil(8)),
            ..Self::default()
        }
    }

    /// Append a single bit.
    pub fn write_bit(&mut self, bit: bool) {
        if bit {
            self.bit_buffer |= 0x80 >> self.bit_count;
        }
        self.bit_count += 1;

        if self.bit_count == 8 {
            self.bytes.push(self.bit_buffer);
            self.bit_buffer = 0;
            self.bit_count = 0;
        }
    }

    /// Append every bit of a '0'/'1' string.
    ///
    /// # Errors
    /// `Error::InvalidBit` on any other character; `offset` is added to the
    /// reported position so callers can report positions in a larger string.
    pub fn write_str(&mut self, bits: &str, offset: usize) -> Result<()> {
        for (i, ch) in bits.chars().enumerate() {
            match ch {
                '0' => self.write_bit(false),
                '1' => self.write_bit(true),
                found => {
                    return Err(Error::InvalidBit {
                        position: offset + i,
                        found,
                    })
                }
            }
        }
        Ok(())
    }

    /// Total number of bits written (including the partial byte).
    pub fn bit_len(&self) -> usize {
        self.bytes.len() * 8 + self.bit_count as usize
    }

    /// Finish writing, zero-padding the final partial byte.
    pub fn finish(mut self) -> Vec<u8> {
        if self.bit_count > 0 {
            self.bytes.push(self.bit_buffer);
        }
        self.bytes
    }
}

/// Reads bits MSB-first from a byte buffer.
///
/// Caller supplies how many bits are valid; trailing padding is never read.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    data: &'a [u8],
    bit_len: usize,
    /// Current bit position (0 = MSB of first byte)
    bit_position: usize,
}

impl<'a> BitReader<'a> {
    /// Create a reader over the first `bit_len` bits of `data`.
    ///
    /// # Errors
    /// `FormatError::PayloadLengthMismatch` if `data` is not exactly
    /// `ceil(bit_len / 8)` bytes long.
    pub fn new(data: &'a [u8], bit_len: usize) -> Result<Self> {
        let expected = bit_len.div_ceil(8);
        if data.len() != expected {
            return Err(FormatError::PayloadLengthMismatch {
                expected,
                actual: data.len(),
            }
            .into());
        }
        Ok(Self {
            data,
            bit_len,
            bit_position: 0,
        })
    }

    /// Number of bits not yet read.
    pub fn bits_remaining(&self) -> usize {
        self.bit_len - self.bit_position
    }
}

impl Iterator for BitReader<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        if self.bit_position >= self.bit_len {
            return None;
        }
        let byte = self.data[self.bit_position / 8];
        let bit = byte & (0x80 >> (self.bit_position % 8)) != 0;
        self.bit_position += 1;
        Some(bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.bits_remaining();
        (n, Some(n))
    }
}

/// Pack a '0'/'1' string into bytes.
pub fn pack(bits: &str) -> Result<Vec<u8>> {
    let mut writer = BitWriter::with_bit_capacity(bits.len());
    writer.write_str(bits, 0)?;
    Ok(writer.finish())
}

/// Unpack the first `bit_len` bits of `data` into a '0'/'1' string.
pub fn unpack(data: &[u8], bit_len: usize) -> Result<String> {
    let reader = BitReader::new(data, bit_len)?;
    Ok(reader.map(|b| if b { '1' } else { '0' }).collect())
}
