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

//! GEDCOM lexical layer
//!
//! This crate turns a byte stream of GEDCOM lines into tokens. It is the
//! foundation of `gedcom-stream`, which builds the node reader and writer
//! on top of it.
//!
//! # Pipeline
//!
//! 1. A [`CharDecoder`] turns raw bytes into characters (UTF-8 by default).
//! 2. The [`Scanner`] buffers decoded text and tracks lines and columns.
//! 3. The [`Tokenizer`] produces [`Token`]s for levels, tags,
//!    cross-references, line values and escapes.
//!
//! # Example
//!
//! ```rust
//! use gedcom_core::{TokenKind, Tokenizer};
//! use std::io::Cursor;
//!
//! let mut tokenizer = Tokenizer::from_reader(Cursor::new("0 @I1@ INDI\n")).unwrap();
//! let mut kinds = Vec::new();
//! loop {
//!     let token = tokenizer.next_token().unwrap();
//!     kinds.push(token.kind);
//!     if token.kind == TokenKind::EndOfInput {
//!         break;
//!     }
//! }
//! assert_eq!(
//!     kinds,
//!     [TokenKind::Level, TokenKind::CrossRef, TokenKind::Tag, TokenKind::EndOfLine, TokenKind::EndOfInput]
//! );
//! ```

pub mod error;
pub mod lex;

pub use error::{ErrorKind, GedcomError, GedcomResult};
pub use lex::{
    CharDecoder, Encoding, Latin1Decoder, Scanner, ScannerConfig, SourcePos, Token, TokenKind,
    Tokenizer, Utf8Decoder, END_OF_INPUT,
};
