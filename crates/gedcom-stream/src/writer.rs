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

//! GEDCOM writer.
//!
//! Turns node calls back into GEDCOM lines. Each element opens a new line
//! `LEVEL TAG`, attributes append ` @VALUE@` and text appends the value.
//! The [`ROOT_ELEMENT`] wrapper produces no output.
//!
//! Text is written as given: a literal `@` read back through
//! [`GedcomReader`](crate::GedcomReader) is not doubled again.

use std::io::{self, Write};

use gedcom_core::{GedcomError, GedcomResult};

use crate::event::ROOT_ELEMENT;
use crate::node::NodeWriter;

/// What the writer emitted last.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteState {
    /// Nothing written yet.
    Start,
    /// A tag or a closed attribute; the next value needs a leading space.
    Element,
    /// Inside `@...@`.
    Attribute,
    /// A line value.
    Content,
    /// An escape; a following value needs a leading space, another escape
    /// does not.
    Escape,
}

/// Streaming GEDCOM writer over any [`Write`] sink.
///
/// # Examples
///
/// ```rust
/// use gedcom_stream::GedcomWriter;
///
/// let mut writer = GedcomWriter::new(Vec::new());
/// writer.start_element("GED").unwrap();
/// writer.start_element("INDI").unwrap();
/// writer.start_attribute("ID").unwrap();
/// writer.text("I1").unwrap();
/// writer.end_attribute().unwrap();
/// writer.start_element("NAME").unwrap();
/// writer.text("Ann").unwrap();
/// writer.end_element_full().unwrap();
/// writer.end_element_full().unwrap();
/// writer.end_element_full().unwrap();
///
/// let out = writer.into_inner().unwrap();
/// assert_eq!(String::from_utf8(out).unwrap(), "0 INDI @I1@\n1 NAME Ann\n");
/// ```
#[derive(Debug)]
pub struct GedcomWriter<W: Write> {
    out: Option<W>,
    level: i32,
    state: WriteState,
    wrote_line: bool,
}

impl<W: Write> GedcomWriter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Some(out),
            level: 0,
            state: WriteState::Start,
            wrote_line: false,
        }
    }

    /// Level the next element line will get.
    pub fn level(&self) -> i32 {
        self.level
    }

    pub fn state(&self) -> WriteState {
        self.state
    }

    fn out(&mut self) -> GedcomResult<&mut W> {
        self.out.as_mut().ok_or_else(closed)
    }

    pub fn start_document(&mut self) -> GedcomResult<()> {
        Ok(())
    }

    pub fn start_element(&mut self, name: &str) -> GedcomResult<()> {
        if name == ROOT_ELEMENT {
            return Ok(());
        }
        if self.level < 0 {
            return Err(GedcomError::Io(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("element {name} written after its parent was closed"),
            )));
        }
        let level = self.level;
        let first = !self.wrote_line;
        let out = self.out()?;
        if !first {
            out.write_all(b"\n")?;
        }
        write!(out, "{level} {name}")?;
        self.level += 1;
        self.state = WriteState::Element;
        self.wrote_line = true;
        Ok(())
    }

    /// Opens a cross-reference. The attribute name is implied by its
    /// position on the line and not written.
    pub fn start_attribute(&mut self, _name: &str) -> GedcomResult<()> {
        self.out()?.write_all(b" @")?;
        self.state = WriteState::Attribute;
        Ok(())
    }

    pub fn end_attribute(&mut self) -> GedcomResult<()> {
        self.out()?.write_all(b"@")?;
        self.state = WriteState::Element;
        Ok(())
    }

    /// Writes a value. Empty values write nothing, not even a separator.
    pub fn text(&mut self, value: &str) -> GedcomResult<()> {
        if value.is_empty() {
            return Ok(());
        }
        let state = self.state;
        let out = self.out()?;
        if matches!(state, WriteState::Element | WriteState::Escape) {
            out.write_all(b" ")?;
        }
        out.write_all(value.as_bytes())?;
        if state != WriteState::Attribute {
            self.state = WriteState::Content;
        }
        Ok(())
    }

    /// Writes `@content@`, where content normally starts with `#`.
    pub fn escape(&mut self, content: &str) -> GedcomResult<()> {
        let state = self.state;
        let out = self.out()?;
        if state == WriteState::Element {
            out.write_all(b" ")?;
        }
        write!(out, "@{content}@")?;
        self.state = WriteState::Escape;
        Ok(())
    }

    pub fn end_element(&mut self) -> GedcomResult<()> {
        self.level -= 1;
        self.state = WriteState::Content;
        Ok(())
    }

    /// Closes an element. Closing the root writes the trailing newline,
    /// so an empty document comes out as a single `\n`.
    pub fn end_element_full(&mut self) -> GedcomResult<()> {
        if self.level > 0 {
            self.level -= 1;
            self.state = WriteState::Content;
        } else {
            self.out()?.write_all(b"\n")?;
        }
        Ok(())
    }

    pub fn end_document(&mut self) -> GedcomResult<()> {
        self.level -= 1;
        Ok(())
    }

    pub fn flush(&mut self) -> GedcomResult<()> {
        self.out()?.flush()?;
        Ok(())
    }

    /// Flushes and releases the sink. Calling it again is a no-op.
    pub fn close(&mut self) -> GedcomResult<()> {
        if let Some(mut out) = self.out.take() {
            out.flush()?;
        }
        Ok(())
    }

    /// Flushes and returns the sink.
    pub fn into_inner(mut self) -> GedcomResult<W> {
        let mut out = self.out.take().ok_or_else(closed)?;
        out.flush()?;
        Ok(out)
    }
}

fn closed() -> GedcomError {
    GedcomError::Io(io::Error::new(io::ErrorKind::BrokenPipe, "writer is closed"))
}

impl<W: Write> NodeWriter for GedcomWriter<W> {
    type Error = GedcomError;

    fn start_document(&mut self) -> GedcomResult<()> {
        GedcomWriter::start_document(self)
    }

    fn start_element(&mut self, name: &str) -> GedcomResult<()> {
        GedcomWriter::start_element(self, name)
    }

    fn start_attribute(&mut self, name: &str) -> GedcomResult<()> {
        GedcomWriter::start_attribute(self, name)
    }

    fn end_attribute(&mut self) -> GedcomResult<()> {
        GedcomWriter::end_attribute(self)
    }

    fn text(&mut self, value: &str) -> GedcomResult<()> {
        GedcomWriter::text(self, value)
    }

    fn escape(&mut self, content: &str) -> GedcomResult<()> {
        GedcomWriter::escape(self, content)
    }

    fn end_element(&mut self) -> GedcomResult<()> {
        GedcomWriter::end_element(self)
    }

    fn end_element_full(&mut self) -> GedcomResult<()> {
        GedcomWriter::end_element_full(self)
    }

    fn end_document(&mut self) -> GedcomResult<()> {
        GedcomWriter::end_document(self)
    }

    fn flush(&mut self) -> GedcomResult<()> {
        GedcomWriter::flush(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn written(f: impl FnOnce(&mut GedcomWriter<Vec<u8>>) -> GedcomResult<()>) -> String {
        let mut writer = GedcomWriter::new(Vec::new());
        f(&mut writer).unwrap();
        String::from_utf8(writer.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn test_empty_root_writes_newline() {
        let out = written(|w| {
            w.start_document()?;
            w.start_element("GED")?;
            w.end_element_full()?;
            w.end_document()
        });
        assert_eq!(out, "\n");
    }

    #[test]
    fn test_nested_elements() {
        let out = written(|w| {
            w.start_element("GED")?;
            w.start_element("Items")?;
            w.start_element("Item")?;
            w.text("first item")?;
            w.end_element_full()?;
            w.start_element("Item")?;
            w.end_element_full()?;
            w.end_element_full()?;
            w.end_element_full()
        });
        assert_eq!(out, "0 Items\n1 Item first item\n1 Item\n");
    }

    #[test]
    fn test_attribute_then_text() {
        let out = written(|w| {
            w.start_element("SubItem")?;
            w.start_attribute("REF")?;
            w.text("attr1")?;
            w.end_attribute()?;
            w.text("subitem with attribute")
        });
        assert_eq!(out, "0 SubItem @attr1@ subitem with attribute");
    }

    #[test]
    fn test_text_escape_text_spacing() {
        let out = written(|w| {
            w.start_element("DATE")?;
            w.text("ABT ")?;
            w.escape("#DJULIAN")?;
            w.text("1700")
        });
        assert_eq!(out, "0 DATE ABT @#DJULIAN@ 1700");
    }

    #[test]
    fn test_adjacent_escapes_stay_together() {
        let out = written(|w| {
            w.start_element("N")?;
            w.text("a ")?;
            w.escape("#X")?;
            w.text("")?;
            w.escape("#Y")?;
            w.text("b")
        });
        assert_eq!(out, "0 N a @#X@@#Y@ b");
    }

    #[test]
    fn test_escape_directly_after_tag() {
        let out = written(|w| {
            w.start_element("DATE")?;
            w.escape("#DGREGORIAN")
        });
        assert_eq!(out, "0 DATE @#DGREGORIAN@");
    }

    #[test]
    fn test_text_is_not_reescaped() {
        let out = written(|w| {
            w.start_element("EMAIL")?;
            w.text("me@example.com")
        });
        assert_eq!(out, "0 EMAIL me@example.com");
    }

    #[test]
    fn test_levels_and_state() {
        let mut w = GedcomWriter::new(Vec::new());
        assert_eq!(w.state(), WriteState::Start);
        w.start_element("A").unwrap();
        assert_eq!((w.level(), w.state()), (1, WriteState::Element));
        w.start_attribute("ID").unwrap();
        assert_eq!(w.state(), WriteState::Attribute);
        w.text("X").unwrap();
        assert_eq!(w.state(), WriteState::Attribute);
        w.end_attribute().unwrap();
        assert_eq!(w.state(), WriteState::Element);
        w.end_element().unwrap();
        assert_eq!((w.level(), w.state()), (0, WriteState::Content));
    }

    #[test]
    fn test_negative_level_rejected() {
        let mut w = GedcomWriter::new(Vec::new());
        w.end_document().unwrap();
        assert!(w.start_element("X").is_err());
    }

    #[test]
    fn test_close_is_idempotent() {
        let mut w = GedcomWriter::new(Vec::new());
        w.start_element("HEAD").unwrap();
        w.close().unwrap();
        w.close().unwrap();
        assert!(w.text("late").is_err());
        assert!(w.into_inner().is_err());
    }
}
