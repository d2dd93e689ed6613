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

//! Byte-to-character decoders.
//!
//! The scanner reads raw bytes in chunks and hands them to a
//! [`CharDecoder`], which appends the decoded characters to the scanner's
//! buffer. Decoders keep whatever state they need to handle sequences that
//! are split across chunk boundaries.

use std::fmt;
use std::str::FromStr;

/// Converts raw bytes into characters, chunk by chunk.
pub trait CharDecoder {
    /// Decodes `bytes` and appends the result to `out`.
    ///
    /// `last` is true for the final call, after which no more bytes follow.
    /// Incomplete sequences still pending at that point must be flushed.
    fn decode(&mut self, bytes: &[u8], out: &mut String, last: bool);

    /// Short name used in diagnostics.
    fn name(&self) -> &'static str;
}

/// Streaming UTF-8 decoder.
///
/// A leading byte order mark is dropped. Invalid sequences decode to
/// U+FFFD REPLACEMENT CHARACTER.
#[derive(Debug, Default)]
pub struct Utf8Decoder {
    pending: Vec<u8>,
    started: bool,
}

impl Utf8Decoder {
    /// Creates a decoder positioned at the start of a stream.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Number of trailing bytes that form an incomplete UTF-8 sequence.
fn incomplete_tail(bytes: &[u8]) -> usize {
    for back in 1..=bytes.len().min(3) {
        let byte = bytes[bytes.len() - back];
        if byte & 0xC0 != 0x80 {
            let needed = match byte {
                0xC0..=0xDF => 2,
                0xE0..=0xEF => 3,
                0xF0..=0xF7 => 4,
                _ => 1,
            };
            return if needed > back { back } else { 0 };
        }
    }
    0
}

impl CharDecoder for Utf8Decoder {
    fn decode(&mut self, bytes: &[u8], out: &mut String, last: bool) {
        self.pending.extend_from_slice(bytes);
        let keep = if last {
            0
        } else {
            incomplete_tail(&self.pending)
        };
        let split = self.pending.len() - keep;
        if split == 0 {
            return;
        }

        let decoded = String::from_utf8_lossy(&self.pending[..split]);
        let mut text: &str = &decoded;
        if !self.started {
            text = text.strip_prefix('\u{FEFF}').unwrap_or(text);
            self.started = true;
        }
        out.push_str(text);
        drop(decoded);
        self.pending.drain(..split);
    }

    fn name(&self) -> &'static str {
        "UTF-8"
    }
}

/// ISO-8859-1 decoder. Every byte maps to the code point of the same value.
#[derive(Debug, Default, Clone, Copy)]
pub struct Latin1Decoder;

impl CharDecoder for Latin1Decoder {
    fn decode(&mut self, bytes: &[u8], out: &mut String, _last: bool) {
        out.extend(bytes.iter().map(|&b| b as char));
    }

    fn name(&self) -> &'static str {
        "ISO-8859-1"
    }
}

/// Built-in input encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    /// UTF-8, which also covers plain ASCII input.
    #[default]
    Utf8,
    /// ISO-8859-1.
    Latin1,
}

impl Encoding {
    /// Creates a fresh decoder for this encoding.
    pub fn decoder(self) -> Box<dyn CharDecoder> {
        match self {
            Encoding::Utf8 => Box::new(Utf8Decoder::new()),
            Encoding::Latin1 => Box::new(Latin1Decoder),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Encoding::Utf8 => "utf-8",
            Encoding::Latin1 => "latin1",
        })
    }
}

impl FromStr for Encoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" | "ascii" => Ok(Encoding::Utf8),
            "latin1" | "latin-1" | "iso-8859-1" => Ok(Encoding::Latin1),
            other => Err(format!("unsupported encoding: {other}")),
        }
    }
}
