//! # Endian-Aware Byte Buffer
//!
//! This module provides [`Buf`], the growable byte container every codec
//! operation reads from and writes into. A `Buf` pairs an owned byte vector
//! with a monotonic read cursor and an endianness mode fixed at construction.
//!
//! ## Why big-endian on the wire
//!
//! Keys are compared bytewise from low address to high address, so multibyte
//! integers must land most-significant byte first for the comparison to agree
//! with numeric order:
//!
//! ```text
//! number:         1234567 (0x12d687)   <   2234500 (0x221884)
//! little endian:  87 d6 12             >   84 18 22   -- compares wrong
//! big endian:     12 d6 87             <   22 18 84   -- compares right
//! ```
//!
//! ## The `is_le` flag
//!
//! The flag names the **host** byte order the producer assumed, not the
//! stream's. With `is_le == true` multibyte integers are byte-swapped into
//! most-significant-byte-first stream order; with `is_le == false` they are
//! written in memory order, which on an actual big-endian host is the same
//! stream layout. When the flag is accurate the wire is big-endian either
//! way. [`host_is_le`] supplies the correct default.
//!
//! ## Cursor discipline
//!
//! Readers and writers with a position parameter never move the read cursor;
//! only the sequential variants advance it. Reading past the end, writing
//! past the end through a positional writer, and setting the cursor at or
//! past the end all fail with [`CodecError::Malformed`], never a panic.

use crate::error::{CodecError, Result};

/// Host byte order detected at compile time.
///
/// Used as the default for every codec's `is_le` construction parameter.
pub const fn host_is_le() -> bool {
    cfg!(target_endian = "little")
}

/// Growable byte buffer with a monotonic read cursor and an endianness mode.
#[derive(Debug, Clone)]
pub struct Buf {
    data: Vec<u8>,
    read_offset: usize,
    is_le: bool,
}

impl Default for Buf {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            read_offset: 0,
            is_le: host_is_le(),
        }
    }
}

impl Buf {
    /// Creates an empty buffer with the given capacity and endianness mode.
    pub fn with_capacity(capacity: usize, is_le: bool) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            read_offset: 0,
            is_le,
        }
    }

    /// Creates a buffer over a copy of `bytes`, cursor at the start.
    pub fn from_slice(bytes: &[u8], is_le: bool) -> Self {
        Self {
            data: bytes.to_vec(),
            read_offset: 0,
            is_le,
        }
    }

    /// Creates a buffer that takes ownership of `bytes`, cursor at the start.
    pub fn from_vec(bytes: Vec<u8>, is_le: bool) -> Self {
        Self {
            data: bytes,
            read_offset: 0,
            is_le,
        }
    }

    /// Consumes the buffer and transfers the bytes out without copying.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    pub fn is_le(&self) -> bool {
        self.is_le
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// True when the read cursor has consumed every byte.
    pub fn is_end(&self) -> bool {
        self.read_offset == self.data.len()
    }

    pub fn read_offset(&self) -> usize {
        self.read_offset
    }

    /// Bytes left between the read cursor and the end.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.read_offset
    }

    /// Moves the read cursor to an absolute offset strictly inside the buffer.
    pub fn set_read_offset(&mut self, offset: usize) -> Result<()> {
        if offset >= self.data.len() {
            return Err(CodecError::Malformed("read offset out of range"));
        }
        self.read_offset = offset;
        Ok(())
    }

    /// Grows or shrinks the buffer to `len` bytes, zero-filling new space.
    pub fn resize(&mut self, len: usize) {
        self.data.resize(len, 0);
    }

    /// Drops all bytes and resets the read cursor.
    pub fn clear(&mut self) {
        self.data.clear();
        self.read_offset = 0;
    }

    /// Advances the read cursor by `n` bytes.
    pub fn skip(&mut self, n: usize) -> Result<()> {
        let end = self
            .read_offset
            .checked_add(n)
            .ok_or(CodecError::Malformed("skip past end of buffer"))?;
        if end > self.data.len() {
            return Err(CodecError::Malformed("skip past end of buffer"));
        }
        self.read_offset = end;
        Ok(())
    }

    // ---- byte writers ----

    pub fn write_u8(&mut self, b: u8) {
        self.data.push(b);
    }

    /// Writes the bitwise complement of `b`.
    pub fn write_u8_negated(&mut self, b: u8) {
        self.data.push(!b);
    }

    pub fn write_u8_at(&mut self, pos: usize, b: u8) -> Result<()> {
        if pos >= self.data.len() {
            return Err(CodecError::Malformed("positional write out of range"));
        }
        self.data[pos] = b;
        Ok(())
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.data.extend_from_slice(bytes);
    }

    pub fn write_string(&mut self, text: &str) {
        self.data.extend_from_slice(text.as_bytes());
    }

    // ---- multibyte writers ----

    pub fn write_i16(&mut self, v: i16) {
        let bytes = if self.is_le {
            v.to_be_bytes()
        } else {
            v.to_ne_bytes()
        };
        self.data.extend_from_slice(&bytes);
    }

    pub fn write_i32(&mut self, v: i32) {
        let bytes = if self.is_le {
            v.to_be_bytes()
        } else {
            v.to_ne_bytes()
        };
        self.data.extend_from_slice(&bytes);
    }

    pub fn write_i64(&mut self, v: i64) {
        let bytes = if self.is_le {
            v.to_be_bytes()
        } else {
            v.to_ne_bytes()
        };
        self.data.extend_from_slice(&bytes);
    }

    /// Writes the bitwise complement of every byte of `v`.
    pub fn write_i64_negated(&mut self, v: i64) {
        self.write_i64(!v);
    }

    /// Writes `v` with the most significant bit flipped.
    ///
    /// Maps signed 64-bit integers onto an unsigned lexicographic order that
    /// preserves numeric order.
    pub fn write_i64_first_bit_flipped(&mut self, v: i64) {
        self.write_i64((v as u64 ^ 0x8000_0000_0000_0000) as i64);
    }

    pub fn write_i16_at(&mut self, pos: usize, v: i16) -> Result<()> {
        if pos + 2 > self.data.len() {
            return Err(CodecError::Malformed("positional write out of range"));
        }
        let bytes = if self.is_le {
            v.to_be_bytes()
        } else {
            v.to_ne_bytes()
        };
        self.data[pos..pos + 2].copy_from_slice(&bytes);
        Ok(())
    }

    pub fn write_i32_at(&mut self, pos: usize, v: i32) -> Result<()> {
        if pos + 4 > self.data.len() {
            return Err(CodecError::Malformed("positional write out of range"));
        }
        let bytes = if self.is_le {
            v.to_be_bytes()
        } else {
            v.to_ne_bytes()
        };
        self.data[pos..pos + 4].copy_from_slice(&bytes);
        Ok(())
    }

    // ---- byte readers ----

    pub fn read_u8(&mut self) -> Result<u8> {
        let b = self.peek_u8()?;
        self.read_offset += 1;
        Ok(b)
    }

    /// Returns the byte under the read cursor without consuming it.
    pub fn peek_u8(&self) -> Result<u8> {
        self.data
            .get(self.read_offset)
            .copied()
            .ok_or(CodecError::Malformed("read past end of buffer"))
    }

    pub fn read_u8_at(&self, pos: usize) -> Result<u8> {
        self.data
            .get(pos)
            .copied()
            .ok_or(CodecError::Malformed("read past end of buffer"))
    }

    /// Consumes `n` bytes and returns them as an owned vector.
    pub fn read_bytes(&mut self, n: usize) -> Result<Vec<u8>> {
        if self.read_offset + n > self.data.len() {
            return Err(CodecError::Malformed("read past end of buffer"));
        }
        let bytes = self.data[self.read_offset..self.read_offset + n].to_vec();
        self.read_offset += n;
        Ok(bytes)
    }

    /// Consumes `N` bytes and returns them as an array in stream order.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let array = self.array_at::<N>(self.read_offset)?;
        self.read_offset += N;
        Ok(array)
    }

    fn array_at<const N: usize>(&self, pos: usize) -> Result<[u8; N]> {
        if pos + N > self.data.len() {
            return Err(CodecError::Malformed("read past end of buffer"));
        }
        let mut array = [0u8; N];
        array.copy_from_slice(&self.data[pos..pos + N]);
        Ok(array)
    }

    // ---- multibyte readers ----

    pub fn read_i16(&mut self) -> Result<i16> {
        let bytes = self.read_array::<2>()?;
        Ok(self.decode_i16(bytes))
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        let bytes = self.read_array::<4>()?;
        Ok(self.decode_i32(bytes))
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        let bytes = self.read_array::<8>()?;
        Ok(self.decode_i64(bytes))
    }

    pub fn read_i16_at(&self, pos: usize) -> Result<i16> {
        Ok(self.decode_i16(self.array_at::<2>(pos)?))
    }

    pub fn read_i32_at(&self, pos: usize) -> Result<i32> {
        Ok(self.decode_i32(self.array_at::<4>(pos)?))
    }

    pub fn read_i64_at(&self, pos: usize) -> Result<i64> {
        Ok(self.decode_i64(self.array_at::<8>(pos)?))
    }

    /// Inverse of [`Buf::write_i64_first_bit_flipped`].
    pub fn read_i64_first_bit_flipped(&mut self) -> Result<i64> {
        Ok((self.read_i64()? as u64 ^ 0x8000_0000_0000_0000) as i64)
    }

    fn decode_i16(&self, bytes: [u8; 2]) -> i16 {
        if self.is_le {
            i16::from_be_bytes(bytes)
        } else {
            i16::from_ne_bytes(bytes)
        }
    }

    fn decode_i32(&self, bytes: [u8; 4]) -> i32 {
        if self.is_le {
            i32::from_be_bytes(bytes)
        } else {
            i32::from_ne_bytes(bytes)
        }
    }

    fn decode_i64(&self, bytes: [u8; 8]) -> i64 {
        if self.is_le {
            i64::from_be_bytes(bytes)
        } else {
            i64::from_ne_bytes(bytes)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buf() -> Buf {
        Buf::with_capacity(64, host_is_le())
    }

    #[test]
    fn write_and_read_round_trips_all_widths() {
        let mut b = buf();
        b.write_u8(0xAB);
        b.write_i16(-2);
        b.write_i32(123_456_789);
        b.write_i64(-987_654_321_012_345);

        assert_eq!(b.read_u8().unwrap(), 0xAB);
        assert_eq!(b.read_i16().unwrap(), -2);
        assert_eq!(b.read_i32().unwrap(), 123_456_789);
        assert_eq!(b.read_i64().unwrap(), -987_654_321_012_345);
        assert!(b.is_end());
    }

    #[test]
    fn multibyte_integers_land_most_significant_byte_first() {
        let mut b = Buf::with_capacity(8, true);
        b.write_i32(0x0012_d687);
        assert_eq!(b.into_bytes(), vec![0x00, 0x12, 0xd6, 0x87]);
    }

    #[test]
    fn positional_writers_do_not_move_the_cursor() {
        let mut b = buf();
        b.write_i32(0);
        b.write_i32(0);
        b.write_i16_at(0, 7).unwrap();
        b.write_i32_at(4, -1).unwrap();

        assert_eq!(b.read_offset(), 0);
        assert_eq!(b.read_i16_at(0).unwrap(), 7);
        assert_eq!(b.read_i32_at(4).unwrap(), -1);
    }

    #[test]
    fn positional_write_past_end_fails() {
        let mut b = buf();
        b.write_u8(0);
        assert!(matches!(
            b.write_i32_at(0, 1),
            Err(CodecError::Malformed(_))
        ));
        assert!(matches!(b.write_u8_at(1, 1), Err(CodecError::Malformed(_))));
    }

    #[test]
    fn read_past_end_fails() {
        let mut b = Buf::from_slice(&[1, 2], host_is_le());
        assert!(b.read_i32().is_err());
        assert_eq!(b.read_u8().unwrap(), 1);
        assert_eq!(b.read_u8().unwrap(), 2);
        assert!(b.read_u8().is_err());
    }

    #[test]
    fn set_read_offset_rejects_end_and_beyond() {
        let mut b = Buf::from_slice(&[1, 2, 3], host_is_le());
        b.set_read_offset(2).unwrap();
        assert_eq!(b.read_u8().unwrap(), 3);
        assert!(b.set_read_offset(3).is_err());
        assert!(b.set_read_offset(100).is_err());
    }

    #[test]
    fn peek_does_not_consume() {
        let mut b = Buf::from_slice(&[9], host_is_le());
        assert_eq!(b.peek_u8().unwrap(), 9);
        assert_eq!(b.read_u8().unwrap(), 9);
        assert!(b.peek_u8().is_err());
    }

    #[test]
    fn negated_writers_complement_every_byte() {
        let mut b = Buf::with_capacity(16, true);
        b.write_u8_negated(0x0F);
        b.write_i64_negated(0);
        let bytes = b.into_bytes();
        assert_eq!(bytes[0], 0xF0);
        assert_eq!(&bytes[1..], &[0xFF; 8]);
    }

    #[test]
    fn first_bit_flipped_round_trip_preserves_order() {
        for (a, b) in [(-5i64, 0i64), (0, 5), (i64::MIN, i64::MAX), (-1, 1)] {
            let mut ba = Buf::with_capacity(8, true);
            let mut bb = Buf::with_capacity(8, true);
            ba.write_i64_first_bit_flipped(a);
            bb.write_i64_first_bit_flipped(b);
            let (ea, eb) = (ba.clone().into_bytes(), bb.clone().into_bytes());
            assert!(ea < eb, "{a} should sort before {b}");

            assert_eq!(ba.read_i64_first_bit_flipped().unwrap(), a);
            assert_eq!(bb.read_i64_first_bit_flipped().unwrap(), b);
        }
    }

    #[test]
    fn skip_is_bounded() {
        let mut b = Buf::from_slice(&[0; 4], host_is_le());
        b.skip(4).unwrap();
        assert!(b.is_end());
        assert!(b.skip(1).is_err());
    }

    #[test]
    fn resize_zero_fills_and_clear_resets() {
        let mut b = buf();
        b.write_u8(1);
        b.resize(4);
        assert_eq!(b.len(), 4);
        assert_eq!(b.read_u8_at(3).unwrap(), 0);

        b.clear();
        assert!(b.is_empty());
        assert_eq!(b.read_offset(), 0);
    }

    #[test]
    fn remaining_tracks_the_cursor() {
        let mut b = Buf::from_slice(&[0; 10], host_is_le());
        assert_eq!(b.remaining(), 10);
        b.skip(3).unwrap();
        assert_eq!(b.remaining(), 7);
    }
}
