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

//! Binary record encoding for the storage layer.
//!
//! The central type is [`Buffer`], a growable byte buffer with a
//! position/limit cursor pair and big-endian put/get operations for the
//! primitive types records are built from.

pub mod buffer; // Auto-growing byte buffer and primitive codecs
pub mod config; // Buffer configuration
pub mod error; // Error and result types

pub use buffer::{Buffer, DEFAULT_CAPACITY, INT_MAX_LENGTH, LONG_MAX_LENGTH};
pub use config::BufferConfig;
pub use error::{BufferError, BufferResult};
