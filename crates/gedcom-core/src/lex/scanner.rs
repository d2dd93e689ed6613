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

//! Buffered character scanner.
//!
//! The scanner pulls bytes from a [`Read`] source in fixed-size chunks,
//! decodes them and exposes a one-character cursor with lexeme marks.
//! Text before the current lexeme start is discarded when the buffer is
//! refilled, so memory use stays bounded by the chunk size plus the longest
//! lexeme.
//!
//! When the source is exhausted a single `'\0'` sentinel is appended. The
//! cursor never advances past a `'\0'`.

use std::io::{ErrorKind as IoErrorKind, Read};

use tracing::trace;

use super::decoder::CharDecoder;
use super::span::SourcePos;
use crate::error::GedcomResult;

/// Character reported once the input is exhausted.
pub const END_OF_INPUT: char = '\0';

/// Buffering parameters for [`Scanner`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScannerConfig {
    /// Number of bytes requested from the source per read.
    pub chunk_size: usize,
    /// The buffer is refilled once fewer than this many bytes remain ahead
    /// of the cursor.
    pub refill_margin: usize,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            chunk_size: 4096,
            refill_margin: 1024,
        }
    }
}

/// Buffered cursor over a decoded character stream.
pub struct Scanner<R> {
    source: Option<R>,
    decoder: Box<dyn CharDecoder>,
    config: ScannerConfig,
    chunk: Vec<u8>,
    buf: String,
    /// Byte offset of the current character in `buf`.
    pos: usize,
    current: char,
    previous: char,
    lexeme_start: usize,
    lexeme_end: usize,
    /// Characters consumed since the start of the stream.
    consumed: usize,
    line_start: usize,
    line: usize,
    exhausted: bool,
}

impl<R: Read> Scanner<R> {
    /// Creates a scanner and fills the first chunk.
    pub fn new(source: R, decoder: Box<dyn CharDecoder>, config: ScannerConfig) -> GedcomResult<Self> {
        let chunk_size = config.chunk_size.max(1);
        let mut scanner = Self {
            source: Some(source),
            decoder,
            config,
            chunk: vec![0; chunk_size],
            buf: String::with_capacity(chunk_size),
            pos: 0,
            current: END_OF_INPUT,
            previous: END_OF_INPUT,
            lexeme_start: 0,
            lexeme_end: 0,
            consumed: 0,
            line_start: 0,
            line: 1,
            exhausted: false,
        };
        scanner.ensure_lookahead()?;
        scanner.current = scanner.char_at_pos();
        Ok(scanner)
    }

    /// Returns the character under the cursor.
    #[inline]
    pub fn current(&self) -> char {
        self.current
    }

    /// Moves the cursor one character forward.
    ///
    /// Refills the buffer when the look-ahead drops below the refill margin.
    /// Staying on `'\0'` is not an error.
    pub fn advance(&mut self) -> GedcomResult<()> {
        if self.current == END_OF_INPUT {
            return Ok(());
        }

        match self.current {
            '\r' => self.line += 1,
            '\n' if self.previous != '\r' => self.line += 1,
            _ => {}
        }
        self.previous = self.current;
        self.pos += self.current.len_utf8();
        self.consumed += 1;

        self.ensure_lookahead()?;
        self.current = self.char_at_pos();
        Ok(())
    }

    /// Marks the current character as the first of the lexeme.
    #[inline]
    pub fn mark_lexeme_start(&mut self) {
        self.lexeme_start = self.pos;
        self.lexeme_end = self.pos;
    }

    /// Marks the current character as one past the end of the lexeme.
    #[inline]
    pub fn mark_lexeme_end(&mut self) {
        self.lexeme_end = self.pos;
    }

    /// Records the current character as column zero.
    #[inline]
    pub fn mark_line_start(&mut self) {
        self.line_start = self.consumed;
    }

    /// Returns the text between the lexeme marks.
    pub fn lexeme(&self) -> &str {
        if self.lexeme_end <= self.lexeme_start {
            return "";
        }
        &self.buf[self.lexeme_start..self.lexeme_end]
    }

    /// Number of characters from the lexeme start up to the cursor.
    pub fn marked_len(&self) -> usize {
        self.buf[self.lexeme_start.min(self.pos)..self.pos].chars().count()
    }

    /// Position of the character under the cursor.
    pub fn position(&self) -> SourcePos {
        SourcePos::new(self.line, self.consumed - self.line_start)
    }

    /// Name of the active decoder.
    pub fn encoding_name(&self) -> &'static str {
        self.decoder.name()
    }

    /// Releases the source. Further reads see end of input.
    pub fn close(&mut self) {
        if self.source.take().is_some() {
            trace!("scanner source released");
        }
        self.buf.truncate(self.pos);
        self.buf.push(END_OF_INPUT);
        self.exhausted = true;
        self.current = END_OF_INPUT;
    }

    /// Returns true once [`close`](Self::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.source.is_none()
    }

    #[inline]
    fn char_at_pos(&self) -> char {
        self.buf[self.pos..].chars().next().unwrap_or(END_OF_INPUT)
    }

    fn ensure_lookahead(&mut self) -> GedcomResult<()> {
        if self.buf.len() - self.pos < self.config.refill_margin {
            self.fill()?;
        }
        while self.pos >= self.buf.len() && !self.exhausted {
            self.fill()?;
        }
        Ok(())
    }

    /// Drops consumed text before the lexeme start and reads one chunk.
    fn fill(&mut self) -> GedcomResult<()> {
        if self.exhausted {
            return Ok(());
        }
        self.relocate();

        let read = match self.source.as_mut() {
            Some(source) => loop {
                match source.read(&mut self.chunk) {
                    Ok(n) => break n,
                    Err(e) if e.kind() == IoErrorKind::Interrupted => continue,
                    Err(e) => return Err(e.into()),
                }
            },
            None => 0,
        };

        let before = self.buf.len();
        let last = read == 0;
        self.decoder.decode(&self.chunk[..read], &mut self.buf, last);
        if last {
            self.buf.push(END_OF_INPUT);
            self.exhausted = true;
        }
        trace!(
            bytes = read,
            decoded = self.buf.len() - before,
            buffered = self.buf.len(),
            "scanner refill"
        );
        Ok(())
    }

    fn relocate(&mut self) {
        let keep_from = self.lexeme_start.min(self.pos);
        if keep_from == 0 {
            return;
        }
        self.buf.drain(..keep_from);
        self.pos -= keep_from;
        self.lexeme_start -= keep_from;
        self.lexeme_end = self.lexeme_end.saturating_sub(keep_from);
        trace!(dropped = keep_from, "scanner relocate");
    }
}

impl<R> std::fmt::Debug for Scanner<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scanner")
            .field("current", &self.current)
            .field("line", &self.line)
            .field("column", &(self.consumed - self.line_start))
            .field("buffered", &self.buf.len())
            .field("exhausted", &self.exhausted)
            .finish()
    }
}
