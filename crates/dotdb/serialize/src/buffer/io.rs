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

// std::io adapters
// Writing appends through the byte path. Reading is bounded by the limit and
// reports end of data there, unlike the get_* operations.

use std::io::{self, Read, Write};

use super::Buffer;

impl Write for Buffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.put_array(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Read for Buffer {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let count = self.remaining().min(buf.len());
        if count == 0 {
            return Ok(0);
        }
        let start = self.position;
        buf[..count].copy_from_slice(&self.data[start..start + count]);
        self.position += count;
        Ok(count)
    }
}
