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

//! Error types for GEDCOM lexing and parsing.
//!
//! Syntax errors carry an [`ErrorKind`], the offending character and the
//! position where it was seen. Use [`GedcomError::line`] and
//! [`GedcomError::column`] to extract the location uniformly.
//!
//! ```rust
//! use gedcom_core::{ErrorKind, GedcomError, SourcePos};
//!
//! let err = GedcomError::syntax(ErrorKind::BadLevel, ' ', SourcePos::new(2, 3));
//! assert_eq!(err.line(), Some(2));
//! assert_eq!(err.to_string(), "BAD LEVEL at line 2, column 3: ' '");
//! ```

use std::fmt;

use thiserror::Error;

use crate::lex::SourcePos;

/// Result type for GEDCOM operations.
pub type GedcomResult<T> = Result<T, GedcomError>;

/// Category of a syntax error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A level number with more than two digits.
    BadLevel,
    /// A non-digit where a level was expected.
    BadLevelChar,
    /// A character not allowed in a tag.
    BadTagChar,
    /// A character not allowed inside `@...@`.
    BadXrefChar,
    /// An `@` in a line value followed by something other than `@` or `#`.
    BadEscapeChar,
    /// A character not allowed in a line value.
    BadLinevalueChar,
    /// A token that may not follow the previous one.
    UnexpectedToken,
    /// Input ended in the middle of a construct.
    UnexpectedEof,
}

impl ErrorKind {
    /// Returns the diagnostic label of this kind.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::BadLevel => "BAD LEVEL",
            ErrorKind::BadLevelChar => "BAD LEVEL CHAR",
            ErrorKind::BadTagChar => "BAD TAG CHAR",
            ErrorKind::BadXrefChar => "BAD XREF CHAR",
            ErrorKind::BadEscapeChar => "BAD ESCAPE CHAR",
            ErrorKind::BadLinevalueChar => "BAD LINEVALUE CHAR",
            ErrorKind::UnexpectedToken => "UNEXPECTED TOKEN",
            ErrorKind::UnexpectedEof => "UNEXPECTED EOF",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised while reading or writing GEDCOM.
#[derive(Error, Debug)]
pub enum GedcomError {
    /// IO error from the underlying stream.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed input.
    #[error("{kind} at {pos}: {}", Printable(.character))]
    Syntax {
        kind: ErrorKind,
        character: char,
        pos: SourcePos,
    },
}

impl GedcomError {
    /// Create a syntax error.
    #[inline]
    pub fn syntax(kind: ErrorKind, character: char, pos: SourcePos) -> Self {
        Self::Syntax {
            kind,
            character,
            pos,
        }
    }

    /// Get the error kind if this is a syntax error.
    #[inline]
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Syntax { kind, .. } => Some(*kind),
            Self::Io(_) => None,
        }
    }

    /// Get the line number if available.
    #[inline]
    pub fn line(&self) -> Option<usize> {
        self.pos().map(|pos| pos.line())
    }

    /// Get the column if available.
    #[inline]
    pub fn column(&self) -> Option<usize> {
        self.pos().map(|pos| pos.column())
    }

    /// Get the offending character if available.
    #[inline]
    pub fn character(&self) -> Option<char> {
        match self {
            Self::Syntax { character, .. } => Some(*character),
            Self::Io(_) => None,
        }
    }

    fn pos(&self) -> Option<SourcePos> {
        match self {
            Self::Syntax { pos, .. } => Some(*pos),
            Self::Io(_) => None,
        }
    }
}

/// Renders a character for diagnostics, escaping control characters.
struct Printable<'a>(&'a char);

impl fmt::Display for Printable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self.0 {
            '\0' => f.write_str("end of input"),
            c if c.is_control() => write!(f, "{}", c.escape_default()),
            c => write!(f, "'{c}'"),
        }
    }
}
