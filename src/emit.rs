// Script emitter
//
//  Copyright (C) 2014-2022 Ryan Specialty Group, LLC.
//
//  This file is part of mcd2m.
//
//  This program is free software: you can redistribute it and/or modify
//  it under the terms of the GNU General Public License as published by
//  the Free Software Foundation, either version 3 of the License, or
//  (at your option) any later version.
//
//  This program is distributed in the hope that it will be useful,
//  but WITHOUT ANY WARRANTY; without even the implied warranty of
//  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
//  GNU General Public License for more details.
//
//  You should have received a copy of the GNU General Public License
//  along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! Append-only sink for generated scripts.
//!
//! Every conversion rule writes through a single [`Emitter`] in the order
//!   its logic executes;
//!     nothing written is ever revisited.
//! Output order is therefore a pre-order,
//!   left-to-right walk of the worksheet.
//!
//! Conversion itself cannot fail,
//!   but the underlying [`Write`] can.
//! The first I/O error is retained and all subsequent writes are
//!   discarded;
//!     the error is surfaced by [`Emitter::finish`].

use std::io::{self, Write};

/// Append-only text sink.
#[derive(Debug)]
pub struct Emitter<W: Write> {
    sink: W,
    err: Option<io::Error>,
}

impl Emitter<Vec<u8>> {
    /// Emitter writing into memory.
    pub fn buffer() -> Self {
        Self::new(Vec::new())
    }

    /// Text written so far.
    ///
    /// All emitted text originates from `&str`,
    ///   and so is valid UTF-8.
    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.sink).unwrap_or_default()
    }
}

impl<W: Write> Emitter<W> {
    pub fn new(sink: W) -> Self {
        Self { sink, err: None }
    }

    /// Append `s` to the output.
    pub fn write_str(&mut self, s: &str) {
        if self.err.is_none() {
            if let Err(e) = self.sink.write_all(s.as_bytes()) {
                self.err.replace(e);
            }
        }
    }

    pub fn write_char(&mut self, c: char) {
        self.write_str(c.encode_utf8(&mut [0; 4]));
    }

    /// Flush the sink and yield it,
    ///   or the first error encountered while writing.
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(e) = self.err.take() {
            return Err(e);
        }

        self.sink.flush()?;
        Ok(self.sink)
    }
}

impl<W: Write> std::fmt::Write for Emitter<W> {
    fn write_str(&mut self, s: &str) -> std::fmt::Result {
        Emitter::write_str(self, s);
        Ok(())
    }
}
