// Dweve GEDCOM - Streaming GEDCOM Codec
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Source positions for GEDCOM diagnostics.
//!
//! Lines are 1-based and count CR, LF and CRLF as one terminator each.
//! Columns are 0-based character offsets from the start of the line.

use std::fmt;

/// A position in the input stream (line and column).
///
/// # Examples
///
/// ```
/// use gedcom_core::lex::SourcePos;
///
/// let pos = SourcePos::new(3, 7);
/// assert_eq!(pos.line(), 3);
/// assert_eq!(pos.column(), 7);
/// assert_eq!(pos.to_string(), "line 3, column 7");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourcePos {
    line: usize,
    column: usize,
}

impl SourcePos {
    /// Creates a new source position.
    #[inline]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Position of the first character of a stream.
    #[inline]
    pub const fn start() -> Self {
        Self { line: 1, column: 0 }
    }

    /// Returns the 1-based line number.
    #[inline]
    pub const fn line(&self) -> usize {
        self.line
    }

    /// Returns the 0-based column.
    #[inline]
    pub const fn column(&self) -> usize {
        self.column
    }
}

impl Default for SourcePos {
    fn default() -> Self {
        Self::start()
    }
}

impl fmt::Display for SourcePos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_pos_start() {
        let pos = SourcePos::start();
        assert_eq!(pos.line(), 1);
        assert_eq!(pos.column(), 0);
        assert_eq!(pos, SourcePos::default());
    }

    #[test]
    fn test_source_pos_display() {
        assert_eq!(SourcePos::new(12, 4).to_string(), "line 12, column 4");
    }

    #[test]
    fn test_source_pos_ordering_fields() {
        let a = SourcePos::new(2, 1);
        let b = SourcePos::new(2, 1);
        assert_eq!(a, b);
        assert_ne!(a, SourcePos::new(2, 2));
    }
}
