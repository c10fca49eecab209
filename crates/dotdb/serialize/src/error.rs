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

// Error types for the serialization buffer

use std::io;

/// Error types produced by [`crate::Buffer`] and its configuration
#[derive(Debug, thiserror::Error)]
pub enum BufferError {
    #[error("Invalid {kind} length {length}: expected 0..={max} bytes")]
    InvalidLength { kind: &'static str, length: usize, max: usize },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Result type for buffer operations
pub type BufferResult<T> = std::result::Result<T, BufferError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_length_message() {
        let err = BufferError::InvalidLength { kind: "int", length: 5, max: 4 };
        assert_eq!(err.to_string(), "Invalid int length 5: expected 0..=4 bytes");
    }

    #[test]
    fn test_io_error_conversion() {
        let err: BufferError = io::Error::new(io::ErrorKind::NotFound, "missing").into();
        assert!(matches!(err, BufferError::Io(_)));
    }
}
