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

//! XML to GEDCOM conversion

use std::borrow::Cow;
use std::io::{BufRead, Write};

use gedcom_stream::{copy_nodes, GedcomWriter, NodeKind, NodeReader};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::debug;

use crate::error::XmlError;
use crate::ESCAPE_TARGET;

/// What one XML event turned into.
enum Step {
    Start {
        name: String,
        attributes: Vec<(String, String)>,
        empty: bool,
    },
    End(String),
    Text(String),
    Escape(String),
    Eof,
}

/// [`NodeReader`] over an XML document.
///
/// Whitespace-only text, comments and unrelated processing instructions are
/// skipped. `<?GEDCOM-ESCAPE content?>` reads back as an escape node.
pub struct XmlReader<R: BufRead> {
    reader: Reader<R>,
    buf: Vec<u8>,
    kind: NodeKind,
    name: String,
    value: String,
    attributes: Vec<(String, String)>,
    attribute_index: Option<usize>,
    attribute_value_read: bool,
    open: Vec<String>,
    pending_end: Option<String>,
    finished: bool,
}

impl<R: BufRead> XmlReader<R> {
    pub fn new(input: R) -> Self {
        Self {
            reader: Reader::from_reader(input),
            buf: Vec::new(),
            kind: NodeKind::None,
            name: String::new(),
            value: String::new(),
            attributes: Vec::new(),
            attribute_index: None,
            attribute_value_read: false,
            open: Vec::new(),
            pending_end: None,
            finished: false,
        }
    }

    /// Byte offset of the XML parser.
    pub fn position(&self) -> usize {
        self.reader.buffer_position()
    }

    fn next_step(&mut self) -> Result<Step, XmlError> {
        loop {
            self.buf.clear();
            let step = match self.reader.read_event_into(&mut self.buf) {
                Ok(Event::Start(e)) => element_step(&e, false)?,
                Ok(Event::Empty(e)) => element_step(&e, true)?,
                Ok(Event::End(e)) => Step::End(utf8(e.name().as_ref()).into_owned()),
                Ok(Event::Text(e)) => {
                    let pos = self.reader.buffer_position();
                    let text = e
                        .unescape()
                        .map_err(|err| XmlError::parse(pos, err.to_string()))?;
                    if text.trim().is_empty() {
                        continue;
                    }
                    Step::Text(text.into_owned())
                }
                Ok(Event::CData(e)) => Step::Text(utf8(&e).into_owned()),
                Ok(Event::PI(e)) => {
                    let body = utf8(&e);
                    match escape_content(&body) {
                        Some(content) => Step::Escape(content.to_string()),
                        None => {
                            debug!(instruction = %body, "skipping processing instruction");
                            continue;
                        }
                    }
                }
                Ok(Event::Eof) => Step::Eof,
                Ok(_) => continue,
                Err(e) => return Err(XmlError::parse(self.reader.buffer_position(), e.to_string())),
            };
            return Ok(step);
        }
    }

    pub fn read(&mut self) -> Result<bool, XmlError> {
        self.attribute_index = None;
        self.attribute_value_read = false;

        if let Some(name) = self.pending_end.take() {
            self.open.pop();
            self.set_node(NodeKind::EndElement, name, String::new());
            return Ok(true);
        }
        if self.finished {
            return Ok(false);
        }

        match self.next_step()? {
            Step::Start {
                name,
                attributes,
                empty,
            } => {
                self.open.push(name.clone());
                if empty {
                    self.pending_end = Some(name.clone());
                }
                self.set_node(NodeKind::Element, name, String::new());
                self.attributes = attributes;
            }
            Step::End(name) => {
                self.open.pop();
                self.set_node(NodeKind::EndElement, name, String::new());
            }
            Step::Text(text) => self.set_node(NodeKind::Text, String::new(), text),
            Step::Escape(content) => self.set_node(NodeKind::Escape, String::new(), content),
            Step::Eof => {
                if let Some(name) = self.open.last() {
                    return Err(XmlError::parse(
                        self.reader.buffer_position(),
                        format!("unclosed element <{name}>"),
                    ));
                }
                self.finished = true;
                self.set_node(NodeKind::None, String::new(), String::new());
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn set_node(&mut self, kind: NodeKind, name: String, value: String) {
        self.kind = kind;
        self.name = name;
        self.value = value;
        self.attributes.clear();
    }

    fn current_attribute(&self) -> Option<&(String, String)> {
        self.attribute_index.and_then(|i| self.attributes.get(i))
    }
}

fn utf8(bytes: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}

fn element_step(start: &BytesStart<'_>, empty: bool) -> Result<Step, XmlError> {
    let name = utf8(start.name().as_ref()).into_owned();
    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| XmlError::parse(0, format!("attribute on <{name}>: {e}")))?;
        let key = utf8(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| XmlError::parse(0, format!("attribute {key} on <{name}>: {e}")))?
            .into_owned();
        attributes.push((key, value));
    }
    Ok(Step::Start {
        name,
        attributes,
        empty,
    })
}

/// Content of a `GEDCOM-ESCAPE` processing instruction.
fn escape_content(body: &str) -> Option<&str> {
    let rest = body.strip_prefix(ESCAPE_TARGET)?;
    if rest.is_empty() {
        return Some(rest);
    }
    rest.strip_prefix(|c: char| c.is_ascii_whitespace())
        .map(str::trim_start)
}

impl<R: BufRead> NodeReader for XmlReader<R> {
    type Error = XmlError;

    fn read(&mut self) -> Result<bool, XmlError> {
        XmlReader::read(self)
    }

    fn node_kind(&self) -> NodeKind {
        match self.attribute_index {
            Some(_) if self.attribute_value_read => NodeKind::Text,
            Some(_) => NodeKind::Attribute,
            None => self.kind,
        }
    }

    fn name(&self) -> &str {
        match self.current_attribute() {
            Some((key, _)) => key,
            None => &self.name,
        }
    }

    fn value(&self) -> &str {
        match self.current_attribute() {
            Some((_, value)) => value,
            None => &self.value,
        }
    }

    fn depth(&self) -> usize {
        self.open.len() + usize::from(self.attribute_index.is_some())
    }

    fn attribute_count(&self) -> usize {
        if self.kind == NodeKind::Element {
            self.attributes.len()
        } else {
            0
        }
    }

    fn move_to_attribute(&mut self, index: usize) -> bool {
        if index < self.attribute_count() {
            self.attribute_index = Some(index);
            self.attribute_value_read = false;
            true
        } else {
            false
        }
    }

    fn move_to_attribute_named(&mut self, name: &str) -> bool {
        match self.attributes.iter().position(|(key, _)| key == name) {
            Some(index) => self.move_to_attribute(index),
            None => false,
        }
    }

    fn move_to_next_attribute(&mut self) -> bool {
        match self.attribute_index {
            None => self.move_to_attribute(0),
            Some(index) => self.move_to_attribute(index + 1),
        }
    }

    fn move_to_element(&mut self) -> bool {
        self.attribute_value_read = false;
        self.attribute_index.take().is_some()
    }

    fn read_attribute_value(&mut self) -> bool {
        if self.attribute_index.is_some() && !self.attribute_value_read {
            self.attribute_value_read = true;
            true
        } else {
            false
        }
    }

    fn close(&mut self) {
        self.finished = true;
        self.pending_end = None;
        self.open.clear();
        self.set_node(NodeKind::None, String::new(), String::new());
    }
}

/// Converts an XML stream back to GEDCOM written into `output`.
pub fn xml_to_gedcom<R: BufRead, W: Write>(input: R, output: W) -> Result<W, XmlError> {
    let mut reader = XmlReader::new(input);
    let mut writer = GedcomWriter::new(output);
    copy_nodes::<_, _, XmlError>(&mut reader, &mut writer)?;
    reader.close();
    Ok(writer.into_inner()?)
}

/// Convert an XML string to GEDCOM text
pub fn from_xml(xml: &str) -> Result<String, XmlError> {
    let bytes = xml_to_gedcom(xml.as_bytes(), Vec::new())?;
    String::from_utf8(bytes).map_err(|e| XmlError::write("GEDCOM string", e))
}
