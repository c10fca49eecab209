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

// Buffer configuration
// Settings can be built in code or read from a JSON document. Missing
// fields fall back to their defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::buffer::DEFAULT_CAPACITY;
use crate::error::{BufferError, BufferResult};

/// Buffer configuration options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BufferConfig {
    /// Number of bytes allocated when the buffer is created
    pub initial_capacity: usize,
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self { initial_capacity: DEFAULT_CAPACITY }
    }
}

impl BufferConfig {
    /// Creates a configuration with the given starting capacity
    pub fn with_initial_capacity(initial_capacity: usize) -> Self {
        Self { initial_capacity }
    }

    /// Parses a configuration from a JSON string
    pub fn from_json_str(json: &str) -> BufferResult<Self> {
        serde_json::from_str(json).map_err(|e| BufferError::Config(e.to_string()))
    }

    /// Loads a configuration from a JSON file
    ///
    /// Lets a host process size its record buffers from the same settings
    /// file as the rest of its storage configuration. The buffer itself
    /// never persists or reloads settings.
    pub fn load<P: AsRef<Path>>(path: P) -> BufferResult<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&contents)
    }
}
