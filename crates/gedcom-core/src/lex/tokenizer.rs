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

//! GEDCOM line tokenizer.
//!
//! Splits the character stream into the tokens of
//! `LEVEL SP [@XREF@ SP] TAG [SP @XREF@] [SP VALUE] EOL`.
//! The tokenizer is a state machine keyed by the kind of the previous
//! token. Spaces between tokens are skipped and blank lines produce no
//! tokens at all.
//!
//! Outside strict mode, lines starting with `//` are comments and a stray
//! `@` in a line value is kept as text.

use std::fmt;
use std::io::Read;

use tracing::debug;

use super::char_class::{is_level_char, is_line_value_char, is_tag_char, is_xref_char};
use super::decoder::Utf8Decoder;
use super::scanner::{Scanner, ScannerConfig, END_OF_INPUT};
use super::span::SourcePos;
use crate::error::{ErrorKind, GedcomError, GedcomResult};

/// Maximum number of digits in a level number.
pub const MAX_LEVEL_DIGITS: usize = 2;

/// Kind of a GEDCOM token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// No token read yet.
    None,
    Level,
    Tag,
    /// Cross-reference, without the surrounding `@`.
    CrossRef,
    /// Line value, with `@@` still doubled.
    Text,
    /// Escape sequence from `#` up to the closing `@`.
    Escape,
    EndOfLine,
    EndOfInput,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TokenKind::None => "NONE",
            TokenKind::Level => "LEVEL",
            TokenKind::Tag => "TAG",
            TokenKind::CrossRef => "XREF",
            TokenKind::Text => "TEXT",
            TokenKind::Escape => "ESCAPE",
            TokenKind::EndOfLine => "EOL",
            TokenKind::EndOfInput => "EOF",
        })
    }
}

/// A token borrowed from the tokenizer's buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub lexeme: &'a str,
    /// Position where scanning of the token began.
    pub pos: SourcePos,
}

/// Pull tokenizer over a [`Scanner`].
#[derive(Debug)]
pub struct Tokenizer<R> {
    scanner: Scanner<R>,
    strict: bool,
    state: TokenKind,
    consumed_tag: bool,
    consumed_xref: bool,
    token_pos: SourcePos,
}

impl<R: Read> Tokenizer<R> {
    /// Creates a tokenizer over an existing scanner.
    pub fn new(scanner: Scanner<R>, strict: bool) -> Self {
        Self {
            scanner,
            strict,
            state: TokenKind::None,
            consumed_tag: false,
            consumed_xref: false,
            token_pos: SourcePos::start(),
        }
    }

    /// Creates a lenient UTF-8 tokenizer with default buffering.
    pub fn from_reader(reader: R) -> GedcomResult<Self> {
        let scanner = Scanner::new(reader, Box::new(Utf8Decoder::new()), ScannerConfig::default())?;
        Ok(Self::new(scanner, false))
    }

    /// Kind of the last token returned.
    pub fn state(&self) -> TokenKind {
        self.state
    }

    /// Returns true in strict mode.
    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Position of the scanner cursor.
    pub fn position(&self) -> SourcePos {
        self.scanner.position()
    }

    /// Releases the underlying source.
    pub fn close(&mut self) {
        self.scanner.close();
    }

    /// Reads the next token.
    ///
    /// After the input is exhausted every call returns
    /// [`TokenKind::EndOfInput`].
    pub fn next_token(&mut self) -> GedcomResult<Token<'_>> {
        let kind = self.scan_token()?;
        self.state = kind;
        Ok(Token {
            kind,
            lexeme: self.scanner.lexeme(),
            pos: self.token_pos,
        })
    }

    fn scan_token(&mut self) -> GedcomResult<TokenKind> {
        loop {
            self.token_pos = self.scanner.position();
            match self.scanner.current() {
                ' ' => self.scanner.advance()?,
                '\r' | '\n' => {
                    self.scanner.mark_lexeme_start();
                    self.scanner.advance()?;
                    self.scanner.mark_lexeme_end();
                    self.scanner.mark_line_start();
                    if !matches!(self.state, TokenKind::EndOfLine | TokenKind::None) {
                        return Ok(TokenKind::EndOfLine);
                    }
                }
                END_OF_INPUT => {
                    self.scanner.mark_lexeme_start();
                    return Ok(TokenKind::EndOfInput);
                }
                _ => {
                    if let Some(kind) = self.scan_after_state()? {
                        return Ok(kind);
                    }
                }
            }
        }
    }

    /// Scans the token allowed after the current state.
    ///
    /// Returns `None` when a comment line was skipped.
    fn scan_after_state(&mut self) -> GedcomResult<Option<TokenKind>> {
        let c = self.scanner.current();
        let kind = match self.state {
            TokenKind::None | TokenKind::EndOfLine => {
                self.consumed_tag = false;
                self.consumed_xref = false;
                if !self.strict && c == '/' {
                    self.skip_comment()?;
                    return Ok(None);
                }
                self.scan_level()?;
                TokenKind::Level
            }
            TokenKind::Level => {
                if c == '@' {
                    self.scan_xref()?;
                    TokenKind::CrossRef
                } else {
                    self.scan_tag()?;
                    TokenKind::Tag
                }
            }
            TokenKind::Tag => {
                if c == '@' && !self.consumed_xref {
                    self.scan_xref()?;
                    TokenKind::CrossRef
                } else {
                    self.scan_text()?;
                    TokenKind::Text
                }
            }
            TokenKind::CrossRef => {
                if self.consumed_tag {
                    self.scan_text()?;
                    TokenKind::Text
                } else {
                    self.scan_tag()?;
                    TokenKind::Tag
                }
            }
            TokenKind::Text => {
                if c == '#' {
                    self.scan_escape()?;
                    TokenKind::Escape
                } else {
                    return Err(self.error(ErrorKind::UnexpectedToken));
                }
            }
            TokenKind::Escape => {
                self.scan_text()?;
                TokenKind::Text
            }
            TokenKind::EndOfInput => return Err(self.error(ErrorKind::UnexpectedToken)),
        };
        Ok(Some(kind))
    }

    fn skip_comment(&mut self) -> GedcomResult<()> {
        self.scanner.advance()?;
        if self.scanner.current() != '/' {
            return Err(self.error(ErrorKind::BadLevelChar));
        }
        let line = self.scanner.position().line();
        while !matches!(self.scanner.current(), '\r' | '\n' | END_OF_INPUT) {
            self.scanner.advance()?;
        }
        debug!(line, "skipped comment line");
        Ok(())
    }

    fn scan_level(&mut self) -> GedcomResult<()> {
        self.scanner.mark_lexeme_start();
        loop {
            let c = self.scanner.current();
            if c == ' ' {
                if self.scanner.marked_len() > MAX_LEVEL_DIGITS {
                    return Err(self.error(ErrorKind::BadLevel));
                }
                self.scanner.mark_lexeme_end();
                return Ok(());
            }
            if !is_level_char(c) {
                return Err(self.error(ErrorKind::BadLevelChar));
            }
            self.scanner.advance()?;
        }
    }

    fn scan_tag(&mut self) -> GedcomResult<()> {
        self.scanner.mark_lexeme_start();
        loop {
            match self.scanner.current() {
                ' ' | '\r' | '\n' | END_OF_INPUT => {
                    self.scanner.mark_lexeme_end();
                    self.consumed_tag = true;
                    return Ok(());
                }
                c if is_tag_char(c) => self.scanner.advance()?,
                _ => return Err(self.error(ErrorKind::BadTagChar)),
            }
        }
    }

    fn scan_xref(&mut self) -> GedcomResult<()> {
        self.consumed_xref = true;
        self.scanner.advance()?;
        self.scanner.mark_lexeme_start();
        loop {
            match self.scanner.current() {
                '@' => {
                    self.scanner.mark_lexeme_end();
                    self.scanner.advance()?;
                    return Ok(());
                }
                ' ' | '\r' | '\n' | END_OF_INPUT => {
                    self.scanner.mark_lexeme_end();
                    debug!(
                        line = self.token_pos.line(),
                        column = self.token_pos.column(),
                        xref = self.scanner.lexeme(),
                        "unterminated cross-reference"
                    );
                    return Ok(());
                }
                c if is_xref_char(c) => self.scanner.advance()?,
                _ => return Err(self.error(ErrorKind::BadXrefChar)),
            }
        }
    }

    fn scan_text(&mut self) -> GedcomResult<()> {
        self.scanner.mark_lexeme_start();
        loop {
            match self.scanner.current() {
                '\r' | '\n' | END_OF_INPUT => {
                    self.scanner.mark_lexeme_end();
                    return Ok(());
                }
                '@' => {
                    self.scanner.mark_lexeme_end();
                    let at = self.scanner.position();
                    self.scanner.advance()?;
                    match self.scanner.current() {
                        '#' => return Ok(()),
                        '@' => self.scanner.advance()?,
                        c if self.strict => {
                            return Err(GedcomError::syntax(ErrorKind::BadEscapeChar, c, at));
                        }
                        _ => {}
                    }
                }
                c if is_line_value_char(c) => self.scanner.advance()?,
                _ => return Err(self.error(ErrorKind::BadLinevalueChar)),
            }
        }
    }

    fn scan_escape(&mut self) -> GedcomResult<()> {
        self.scanner.mark_lexeme_start();
        loop {
            match self.scanner.current() {
                '@' => {
                    self.scanner.mark_lexeme_end();
                    self.scanner.advance()?;
                    return Ok(());
                }
                '\r' | '\n' | END_OF_INPUT => {
                    self.scanner.mark_lexeme_end();
                    return Ok(());
                }
                _ => self.scanner.advance()?,
            }
        }
    }

    fn error(&self, kind: ErrorKind) -> GedcomError {
        GedcomError::syntax(kind, self.scanner.current(), self.scanner.position())
    }
}
