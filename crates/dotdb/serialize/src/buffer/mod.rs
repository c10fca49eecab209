// Dotlanth
// Copyright (C) 2025 Synerthink

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.

// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

// Buffer module
// A heap-backed byte buffer that grows on demand. Every primitive is encoded
// big-endian and composed from single-byte puts and gets, so growth and limit
// tracking happen in exactly one place.

mod io;

use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::BufferConfig;
use crate::error::{BufferError, BufferResult};

/// Starting capacity of a buffer built with [`Buffer::new`]
pub const DEFAULT_CAPACITY: usize = 256;
/// Largest byte count accepted by the N-byte int forms
pub const INT_MAX_LENGTH: usize = 4;
/// Largest byte count accepted by the N-byte long forms
pub const LONG_MAX_LENGTH: usize = 8;

/// Reason the backing storage was reallocated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Resize {
    /// Sequential access reached the end of the storage
    Doubling,
    /// Position or limit was set past the capacity
    Explicit,
    /// Storage shrunk to the limit
    Trim,
}

impl Resize {
    fn as_str(self) -> &'static str {
        match self {
            Resize::Doubling => "doubling",
            Resize::Explicit => "explicit",
            Resize::Trim => "trim",
        }
    }
}

/// Growable byte buffer with a position/limit cursor
///
/// `position` is the index of the next byte to be read or written and
/// `limit` is the high-water mark of the content. The logical content is
/// `storage[0..limit)`; bytes past the limit are unspecified.
///
/// Reads and writes share the same cursor rules: accessing the byte at the
/// limit extends the limit, and accessing the byte at the capacity doubles
/// the capacity first. A read past the written content therefore returns
/// whatever the storage holds there (zero for fresh storage) and extends the
/// content instead of failing. Use the [`std::io::Read`] implementation for
/// reads that stop at the limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    /// Backing storage; its length is the capacity
    data: Vec<u8>,
    /// Index of the next byte to read or write
    position: usize,
    /// Number of bytes of logical content
    limit: usize,
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Vec<u8>> for Buffer {
    fn from(data: Vec<u8>) -> Self {
        Self::from_vec(data)
    }
}

impl Buffer {
    /// Creates an empty buffer with [`DEFAULT_CAPACITY`] bytes of storage
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty buffer with the given capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: vec![0; capacity],
            position: 0,
            limit: 0,
        }
    }

    /// Creates an empty buffer sized from a configuration
    pub fn with_config(config: &BufferConfig) -> Self {
        Self::with_capacity(config.initial_capacity)
    }

    /// Adopts `data` as the backing storage without copying it
    ///
    /// The capacity is the vector's length and both position and limit start
    /// at zero, so the existing bytes are readable but not yet part of the
    /// content. [`Buffer::into_vec`] hands the storage back.
    pub fn from_vec(data: Vec<u8>) -> Self {
        Self { data, position: 0, limit: 0 }
    }

    /// Returns the number of bytes of backing storage
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Returns the index of the next byte to be read or written
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns the number of bytes of logical content
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Returns the number of content bytes between the position and the limit
    pub fn remaining(&self) -> usize {
        self.limit.saturating_sub(self.position)
    }

    /// Moves the cursor to `position`
    ///
    /// Grows the storage to exactly `position` bytes when it is smaller.
    /// The limit is raised to `position` if it was below it.
    pub fn set_position(&mut self, position: usize) -> &mut Self {
        if position > self.capacity() {
            self.resize(position, Resize::Explicit);
        }
        if self.limit < position {
            self.limit = position;
        }
        self.position = position;
        self
    }

    /// Sets the content length to `limit`
    ///
    /// Grows the storage to exactly `limit` bytes when it is smaller. If the
    /// position had already run past the previous limit it is pulled back to
    /// the new one.
    pub fn set_limit(&mut self, limit: usize) -> &mut Self {
        if limit > self.capacity() {
            self.resize(limit, Resize::Explicit);
        }
        if self.limit < self.position {
            self.position = limit;
        }
        self.limit = limit;
        self
    }

    /// Resets position and limit to zero, keeping the storage
    pub fn clear(&mut self) -> &mut Self {
        self.position = 0;
        self.limit = 0;
        self
    }

    pub fn put_byte(&mut self, value: u8) -> &mut Self {
        let index = self.advance();
        self.data[index] = value;
        self
    }

    pub fn get_byte(&mut self) -> u8 {
        let index = self.advance();
        self.data[index]
    }

    /// Writes `1` for true and `0` for false
    pub fn put_bool(&mut self, value: bool) -> &mut Self {
        self.put_byte(u8::from(value))
    }

    /// Reads one byte; any nonzero value is true
    pub fn get_bool(&mut self) -> bool {
        self.get_byte() != 0
    }

    pub fn put_short(&mut self, value: i16) -> &mut Self {
        self.put_byte((value >> 8) as u8);
        self.put_byte(value as u8)
    }

    pub fn get_short(&mut self) -> i16 {
        let high = self.get_byte() as i8 as i16;
        let low = self.get_byte() as i16;
        (high << 8) | (low & 0xFF)
    }

    pub fn put_int(&mut self, value: i32) -> &mut Self {
        self.put_byte((value >> 24) as u8);
        self.put_byte((value >> 16) as u8);
        self.put_byte((value >> 8) as u8);
        self.put_byte(value as u8)
    }

    pub fn get_int(&mut self) -> i32 {
        self.read_be(INT_MAX_LENGTH) as u32 as i32
    }

    /// Writes the low `length` bytes of `value`, most significant first
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::InvalidLength`] if `length` exceeds
    /// [`INT_MAX_LENGTH`]. Nothing is written in that case.
    pub fn put_int_n(&mut self, value: i32, length: usize) -> BufferResult<&mut Self> {
        check_length("int", length, INT_MAX_LENGTH)?;
        self.write_be(value as u32 as u64, length);
        Ok(self)
    }

    /// Reads `length` bytes into the low bytes of an int
    ///
    /// Bytes are accumulated unsigned, so a partial width is never sign
    /// extended. `length == 0` reads nothing and returns zero.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::InvalidLength`] if `length` exceeds
    /// [`INT_MAX_LENGTH`]. The cursor is left untouched in that case.
    pub fn get_int_n(&mut self, length: usize) -> BufferResult<i32> {
        check_length("int", length, INT_MAX_LENGTH)?;
        Ok(self.read_be(length) as u32 as i32)
    }

    /// Writes the high 32 bits then the low 32 bits
    pub fn put_long(&mut self, value: i64) -> &mut Self {
        self.put_int((value >> 32) as i32);
        self.put_int(value as i32)
    }

    pub fn get_long(&mut self) -> i64 {
        self.read_be(LONG_MAX_LENGTH) as i64
    }

    /// Writes the low `length` bytes of `value`, most significant first
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::InvalidLength`] if `length` exceeds
    /// [`LONG_MAX_LENGTH`].
    pub fn put_long_n(&mut self, value: i64, length: usize) -> BufferResult<&mut Self> {
        check_length("long", length, LONG_MAX_LENGTH)?;
        self.write_be(value as u64, length);
        Ok(self)
    }

    /// Reads `length` bytes into the low bytes of a long, without sign
    /// extension
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::InvalidLength`] if `length` exceeds
    /// [`LONG_MAX_LENGTH`].
    pub fn get_long_n(&mut self, length: usize) -> BufferResult<i64> {
        check_length("long", length, LONG_MAX_LENGTH)?;
        Ok(self.read_be(length) as i64)
    }

    /// Writes the raw IEEE-754 bits of `value`; NaN payloads are preserved
    pub fn put_float(&mut self, value: f32) -> &mut Self {
        self.put_int(value.to_bits() as i32)
    }

    pub fn get_float(&mut self) -> f32 {
        f32::from_bits(self.get_int() as u32)
    }

    /// Writes the raw IEEE-754 bits of `value`; NaN payloads are preserved
    pub fn put_double(&mut self, value: f64) -> &mut Self {
        self.put_long(value.to_bits() as i64)
    }

    pub fn get_double(&mut self) -> f64 {
        f64::from_bits(self.get_long() as u64)
    }

    /// Writes the most significant 64 bits then the least significant 64 bits
    pub fn put_uuid(&mut self, value: Uuid) -> &mut Self {
        let (high, low) = value.as_u64_pair();
        self.put_long(high as i64);
        self.put_long(low as i64)
    }

    pub fn get_uuid(&mut self) -> Uuid {
        let high = self.get_long() as u64;
        let low = self.get_long() as u64;
        Uuid::from_u64_pair(high, low)
    }

    /// Writes `value` verbatim; no length is stored
    pub fn put_array(&mut self, value: &[u8]) -> &mut Self {
        for &byte in value {
            self.put_byte(byte);
        }
        self
    }

    pub fn get_array(&mut self, length: usize) -> Vec<u8> {
        (0..length).map(|_| self.get_byte()).collect()
    }

    /// Writes the UTF-8 bytes of `value`; no length is stored
    pub fn put_string(&mut self, value: &str) -> &mut Self {
        self.put_array(value.as_bytes())
    }

    /// Writes at most `max_chars` characters of `value`
    ///
    /// Truncation counts characters, not bytes, so a multi-byte character is
    /// never split.
    pub fn put_string_bounded(&mut self, value: &str, max_chars: usize) -> &mut Self {
        let truncated = match value.char_indices().nth(max_chars) {
            Some((end, _)) => &value[..end],
            None => value,
        };
        self.put_string(truncated)
    }

    /// Reads `length` bytes and decodes them as UTF-8
    ///
    /// Invalid sequences are replaced with U+FFFD.
    pub fn get_string(&mut self, length: usize) -> String {
        let bytes = self.get_array(length);
        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// Shrinks the storage to exactly `limit` bytes
    ///
    /// Position and limit are not changed.
    pub fn trim_to_size(&mut self) {
        self.resize(self.limit, Resize::Trim);
    }

    /// Returns a borrowed view of the content
    pub fn as_slice(&self) -> &[u8] {
        &self.data[..self.limit]
    }

    /// Copies the content into a new vector
    pub fn to_vec(&self) -> Vec<u8> {
        self.as_slice().to_vec()
    }

    /// Consumes the buffer and returns its storage truncated to the content
    pub fn into_vec(mut self) -> Vec<u8> {
        self.data.truncate(self.limit);
        self.data
    }

    /// Claims the byte at the position for one access and returns its index
    fn advance(&mut self) -> usize {
        // The position can sit past the capacity after a limit cut followed
        // by a trim, so keep doubling until it fits.
        while self.position >= self.capacity() {
            let doubled = self.capacity().saturating_mul(2).max(1);
            self.resize(doubled, Resize::Doubling);
        }
        let index = self.position;
        if self.limit == index {
            self.limit += 1;
        }
        self.position += 1;
        index
    }

    fn write_be(&mut self, value: u64, length: usize) {
        for i in (0..length).rev() {
            self.put_byte((value >> (i * 8)) as u8);
        }
    }

    fn read_be(&mut self, length: usize) -> u64 {
        let mut result = 0u64;
        for _ in 0..length {
            result = (result << 8) | u64::from(self.get_byte());
        }
        result
    }

    fn resize(&mut self, capacity: usize, cause: Resize) {
        let old_capacity = self.capacity();
        self.data.resize(capacity, 0);
        if capacity < old_capacity {
            self.data.shrink_to_fit();
        }
        debug!(old_capacity, new_capacity = capacity, cause = cause.as_str(), "Buffer storage resized");
    }
}

fn check_length(kind: &'static str, length: usize, max: usize) -> BufferResult<()> {
    if length > max {
        warn!(kind, length, max, "Rejected variable-width length");
        return Err(BufferError::InvalidLength { kind, length, max });
    }
    Ok(())
}
