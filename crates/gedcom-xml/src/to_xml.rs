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

//! GEDCOM to XML conversion

use std::io::{Read, Write};

use gedcom_stream::{copy_nodes, GedcomReader, NodeWriter, ReaderConfig};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::XmlError;
use crate::ESCAPE_TARGET;

/// Configuration for XML output
#[derive(Debug, Clone)]
pub struct ToXmlConfig {
    /// Pretty-print with indentation
    pub pretty: bool,
    /// Indentation string (e.g., "  ")
    pub indent: String,
    /// Write an `<?xml ...?>` declaration first
    pub declaration: bool,
    /// How the GEDCOM input is read
    pub reader: ReaderConfig,
}

impl Default for ToXmlConfig {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: "  ".to_string(),
            declaration: true,
            reader: ReaderConfig::default(),
        }
    }
}

impl ToXmlConfig {
    /// Single-line output without declaration.
    pub fn compact() -> Self {
        Self {
            pretty: false,
            declaration: false,
            ..Self::default()
        }
    }
}

/// [`NodeWriter`] producing XML.
///
/// Start tags are held back until the first child, text or end arrives so
/// that attributes can still be added. Escapes become
/// `<?GEDCOM-ESCAPE content?>` processing instructions.
pub struct XmlWriter<W: Write> {
    writer: Writer<W>,
    config: ToXmlConfig,
    pending: Option<BytesStart<'static>>,
    attribute: Option<(String, String)>,
    open: Vec<String>,
}

impl<W: Write> XmlWriter<W> {
    pub fn new(out: W, config: ToXmlConfig) -> Self {
        let writer = if config.pretty {
            Writer::new_with_indent(out, b' ', config.indent.len())
        } else {
            Writer::new(out)
        };
        Self {
            writer,
            config,
            pending: None,
            attribute: None,
            open: Vec::new(),
        }
    }

    /// Returns the sink. Unclosed elements stay unclosed.
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    fn emit(&mut self, event: Event<'_>, context: &str) -> Result<(), XmlError> {
        self.writer
            .write_event(event)
            .map_err(|e| XmlError::write(context, e))
    }

    fn flush_pending(&mut self) -> Result<(), XmlError> {
        if let Some(start) = self.pending.take() {
            self.emit(Event::Start(start), "start tag")?;
        }
        Ok(())
    }

    fn pop_open(&mut self) -> Result<String, XmlError> {
        self.open
            .pop()
            .ok_or_else(|| XmlError::write("end tag", "no open element"))
    }
}

impl<W: Write> NodeWriter for XmlWriter<W> {
    type Error = XmlError;

    fn start_document(&mut self) -> Result<(), XmlError> {
        if self.config.declaration {
            self.emit(
                Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
                "XML declaration",
            )?;
        }
        Ok(())
    }

    fn start_element(&mut self, name: &str) -> Result<(), XmlError> {
        self.flush_pending()?;
        self.pending = Some(BytesStart::new(name.to_string()));
        self.open.push(name.to_string());
        Ok(())
    }

    fn start_attribute(&mut self, name: &str) -> Result<(), XmlError> {
        self.attribute = Some((name.to_string(), String::new()));
        Ok(())
    }

    fn end_attribute(&mut self) -> Result<(), XmlError> {
        let Some((key, value)) = self.attribute.take() else {
            return Ok(());
        };
        match self.pending.as_mut() {
            Some(start) => {
                start.push_attribute((key.as_str(), value.as_str()));
                Ok(())
            }
            None => Err(XmlError::write(
                "attribute",
                format!("{key} after element content"),
            )),
        }
    }

    fn text(&mut self, value: &str) -> Result<(), XmlError> {
        if let Some((_, attribute_value)) = self.attribute.as_mut() {
            attribute_value.push_str(value);
            return Ok(());
        }
        self.flush_pending()?;
        self.emit(Event::Text(BytesText::new(value)), "text")
    }

    /// Fails on content containing `?>`, which cannot appear inside a
    /// processing instruction.
    fn escape(&mut self, content: &str) -> Result<(), XmlError> {
        if content.contains("?>") {
            return Err(XmlError::write(
                "escape",
                format!("@{content}@ contains '?>'"),
            ));
        }
        self.flush_pending()?;
        let body = format!("{ESCAPE_TARGET} {content}");
        self.emit(Event::PI(BytesText::from_escaped(body)), "escape")
    }

    fn end_element(&mut self) -> Result<(), XmlError> {
        let name = self.pop_open()?;
        match self.pending.take() {
            Some(start) => self.emit(Event::Empty(start), "empty element"),
            None => self.emit(Event::End(BytesEnd::new(name)), "end tag"),
        }
    }

    fn end_element_full(&mut self) -> Result<(), XmlError> {
        let name = self.pop_open()?;
        self.flush_pending()?;
        self.emit(Event::End(BytesEnd::new(name)), "end tag")
    }

    fn end_document(&mut self) -> Result<(), XmlError> {
        self.flush_pending()?;
        if self.config.pretty {
            self.writer.get_mut().write_all(b"\n")?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), XmlError> {
        self.writer.get_mut().flush()?;
        Ok(())
    }
}

/// Converts a GEDCOM stream to XML written into `output`.
pub fn gedcom_to_xml<R: Read, W: Write>(
    input: R,
    output: W,
    config: &ToXmlConfig,
) -> Result<W, XmlError> {
    let mut reader = GedcomReader::with_config(input, config.reader)?;
    let mut writer = XmlWriter::new(output, config.clone());
    copy_nodes::<_, _, XmlError>(&mut reader, &mut writer)?;
    reader.close();
    Ok(writer.into_inner())
}

/// Convert GEDCOM text to an XML string
pub fn to_xml(gedcom: &str, config: &ToXmlConfig) -> Result<String, XmlError> {
    let bytes = gedcom_to_xml(gedcom.as_bytes(), Vec::new(), config)?;
    String::from_utf8(bytes).map_err(|e| XmlError::write("XML string", e))
}
