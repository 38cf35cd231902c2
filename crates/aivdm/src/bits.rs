//! Append-only bit buffer built from six-bit armored payloads.
//!
//! Bits are addressed in MSB-first order: bit 0 is the high bit of the first byte.

use crate::errors::FormatError;

/// Six-bit value to character table used by text fields.
pub const SIXBIT_TEXT: &[u8; 64] =
    b"@ABCDEFGHIJKLMNOPQRSTUVWXYZ[\\]^- !\"#$%&`()*+,-./0123456789:;<=>?";

/// Maps an armor character to its six-bit value.
///
/// Valid characters are `'0'..='W'` (0-39) and `` '`'..='w' `` (40-63).
pub fn armor_value(ch: char) -> Result<u8, FormatError> {
    let code = ch as u32;
    match code {
        48..=87 => Ok((code - 48) as u8),
        96..=119 => Ok((code - 56) as u8),
        _ => Err(FormatError::InvalidArmorChar(ch)),
    }
}

/// Maps a six-bit value (low six bits of `value`) to its armor character.
pub fn armor_char(value: u8) -> char {
    let value = value & 0x3F;
    if value < 40 {
        (value + 48) as char
    } else {
        (value + 56) as char
    }
}

/// Maps a six-bit value to its text character.
pub fn text_char(value: u8) -> char {
    SIXBIT_TEXT[(value & 0x3F) as usize] as char
}

/// Inverse of [text_char]. Lower-case letters are folded to upper case; the first
/// table position wins for characters that appear twice.
pub fn text_value(ch: char) -> Option<u8> {
    let ch = ch.to_ascii_uppercase();
    if !ch.is_ascii() {
        return None;
    }

    SIXBIT_TEXT
        .iter()
        .position(|&c| c == ch as u8)
        .map(|p| p as u8)
}

/// Sign-extends the low `bits` of `value` to a full `i64`.
pub fn sign_extend(value: u64, bits: usize) -> i64 {
    if bits == 0 {
        return 0;
    }

    let shift = 64 - bits;
    ((value << shift) as i64) >> shift
}

/// Growable byte buffer with a logical bit length.
///
/// `bit_len` never exceeds `8 * bytes.len()`, and bits past `bit_len` in the last
/// byte are always zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BitBuffer {
    bytes: Vec<u8>,
    bit_len: usize,
}

impl BitBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(bits: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bits.div_ceil(8)),
            bit_len: 0,
        }
    }

    /// Wraps `bytes`, keeping only the first `bit_len` bits (clamped to the data).
    pub fn from_bytes(mut bytes: Vec<u8>, bit_len: usize) -> Self {
        let bit_len = bit_len.min(bytes.len() * 8);
        bytes.truncate(bit_len.div_ceil(8));

        let used = bit_len % 8;
        if used != 0 {
            if let Some(last) = bytes.last_mut() {
                *last &= 0xFF << (8 - used);
            }
        }

        Self { bytes, bit_len }
    }

    /// Builds a buffer from a six-bit armored payload.
    pub fn from_armored(text: &str) -> Result<Self, FormatError> {
        let mut buffer = Self::with_capacity(text.len() * 6);
        buffer.append_armored(text)?;
        Ok(buffer)
    }

    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    pub fn is_empty(&self) -> bool {
        self.bit_len == 0
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Appends six bits per character of `text`. On error the buffer is unchanged.
    pub fn append_armored(&mut self, text: &str) -> Result<(), FormatError> {
        let values = text
            .chars()
            .map(armor_value)
            .collect::<Result<Vec<u8>, FormatError>>()?;

        self.bytes.reserve((values.len() * 6).div_ceil(8));
        for value in values {
            self.push_bits(value as u64, 6);
        }

        Ok(())
    }

    pub fn push_bit(&mut self, bit: bool) {
        if self.bit_len % 8 == 0 {
            self.bytes.push(0);
        }

        if bit {
            self.bytes[self.bit_len / 8] |= 1 << (7 - self.bit_len % 8);
        }

        self.bit_len += 1;
    }

    /// Appends the low `width` bits of `value`, MSB first. `width` is at most 64.
    pub fn push_bits(&mut self, value: u64, width: usize) {
        debug_assert!(width <= 64);

        for i in (0..width).rev() {
            self.push_bit((value >> i) & 1 == 1);
        }
    }

    pub fn extend_from(&mut self, other: &BitBuffer) {
        let mut pos = 0;
        while pos < other.bit_len {
            let width = (other.bit_len - pos).min(32);
            self.push_bits(other.unsigned(pos, width), width);
            pos += width;
        }
    }

    /// Reads `width` bits (at most 64) starting at `start` as an unsigned value.
    ///
    /// Only the covering bytes are read. The caller guarantees
    /// `start + width <= bit_len`; reading past the data panics.
    pub fn unsigned(&self, start: usize, width: usize) -> u64 {
        debug_assert!(width <= 64);
        debug_assert!(start + width <= self.bit_len);

        if width == 0 {
            return 0;
        }

        let first = start / 8;
        let last = (start + width - 1) / 8;

        let mut acc = 0u128;
        for &byte in &self.bytes[first..=last] {
            acc = (acc << 8) | byte as u128;
        }

        let end = (start + width) % 8;
        if end != 0 {
            acc >>= 8 - end;
        }

        (acc & ((1u128 << width) - 1)) as u64
    }

    /// Reads the same window as [BitBuffer::unsigned] as a two's-complement value.
    pub fn signed(&self, start: usize, width: usize) -> i64 {
        sign_extend(self.unsigned(start, width), width)
    }

    /// Reads `width / 6` six-bit characters, maps `@` to space and trims trailing spaces.
    pub fn text(&self, start: usize, width: usize) -> String {
        let count = width / 6;
        let mut text = String::with_capacity(count);

        for i in 0..count {
            let ch = text_char(self.unsigned(start + 6 * i, 6) as u8);
            text.push(if ch == '@' { ' ' } else { ch });
        }

        let trimmed = text.trim_end_matches(' ').len();
        text.truncate(trimmed);
        text
    }

    /// Copies every bit from `start` to the end into a new buffer.
    pub fn raw_tail(&self, start: usize) -> BitBuffer {
        let mut tail = BitBuffer::with_capacity(self.bit_len.saturating_sub(start));
        let mut pos = start;

        while pos < self.bit_len {
            let width = (self.bit_len - pos).min(32);
            tail.push_bits(self.unsigned(pos, width), width);
            pos += width;
        }

        tail
    }

    /// Armors the buffer, zero-padding the last character. Returns the payload and
    /// the number of fill bits added.
    pub fn to_armored(&self) -> (String, usize) {
        let fill = (6 - self.bit_len % 6) % 6;
        let mut text = String::with_capacity(self.bit_len.div_ceil(6));
        let mut pos = 0;

        while pos < self.bit_len {
            let width = (self.bit_len - pos).min(6);
            let value = self.unsigned(pos, width) << (6 - width);
            text.push(armor_char(value as u8));
            pos += width;
        }

        (text, fill)
    }
}
