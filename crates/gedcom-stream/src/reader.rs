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

//! Pull reader presenting GEDCOM lines as a document tree.
//!
//! The reader consumes one GEDCOM line at a time from the [`Tokenizer`] and
//! queues the nodes it produces: element ends for every open element at the
//! same or a deeper level, the new element with its optional cross-reference
//! attribute, then text and escape nodes for the line value.
//!
//! # Nesting
//!
//! The open-element stack always starts with [`ROOT_ELEMENT`]. A line with
//! level `n` is a child of the element at stack depth `n + 1`, so before it
//! opens, every element deeper than that is closed. Levels that jump ahead
//! by more than one nest under the innermost open element.
//!
//! # Examples
//!
//! ```rust
//! use gedcom_stream::{DocumentEvent, GedcomReader};
//! use std::io::Cursor;
//!
//! let mut reader = GedcomReader::new(Cursor::new("0 @I1@ INDI\n1 NAME Ann\n")).unwrap();
//! let events: Vec<DocumentEvent> = reader.events().collect::<Result<_, _>>().unwrap();
//! assert_eq!(events[1], DocumentEvent::ElementStart("INDI".into()));
//! assert_eq!(events.len(), 8);
//! ```

use std::collections::VecDeque;
use std::io::Read;

use gedcom_core::{
    CharDecoder, Encoding, ErrorKind, GedcomError, GedcomResult, Scanner, ScannerConfig,
    SourcePos, TokenKind, Tokenizer,
};
use tracing::debug;

use crate::event::{Attribute, DocumentEvent, NodeKind, ROOT_ELEMENT};
use crate::node::NodeReader;

/// Configuration for [`GedcomReader`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReaderConfig {
    /// Reject `//` comment lines and stray `@` characters in values.
    ///
    /// Default: false
    pub strict: bool,

    /// Input encoding.
    ///
    /// Default: UTF-8
    pub encoding: Encoding,

    /// Buffering parameters.
    ///
    /// Default: 4096-byte chunks with a 1024-byte refill margin
    pub scanner: ScannerConfig,
}

impl ReaderConfig {
    /// Default configuration with strict mode enabled.
    pub fn strict() -> Self {
        Self {
            strict: true,
            ..Self::default()
        }
    }
}

/// A node produced by one GEDCOM line and waiting to be read.
#[derive(Debug, Clone, PartialEq, Eq)]
enum QueuedNode {
    ElementStart {
        name: String,
        attribute: Option<Attribute>,
    },
    ElementEnd(String),
    Text(String),
    Escape(String),
}

impl QueuedNode {
    fn root() -> Self {
        QueuedNode::ElementStart {
            name: ROOT_ELEMENT.to_string(),
            attribute: None,
        }
    }
}

/// Streaming GEDCOM reader.
///
/// Implements [`NodeReader`]; use [`events`](Self::events) for an
/// iterator of owned [`DocumentEvent`]s instead.
#[derive(Debug)]
pub struct GedcomReader<R> {
    tokenizer: Tokenizer<R>,
    stack: Vec<String>,
    queue: VecDeque<(QueuedNode, SourcePos)>,
    current: Option<QueuedNode>,
    current_pos: SourcePos,
    line_pos: SourcePos,
    pending_id: Option<String>,
    started: bool,
    finished: bool,
    on_attribute: bool,
    attribute_value_read: bool,
}

impl<R: Read> GedcomReader<R> {
    /// Creates a lenient UTF-8 reader.
    pub fn new(reader: R) -> GedcomResult<Self> {
        Self::with_config(reader, ReaderConfig::default())
    }

    /// Creates a reader with the given configuration.
    pub fn with_config(reader: R, config: ReaderConfig) -> GedcomResult<Self> {
        Self::with_decoder(reader, config, config.encoding.decoder())
    }

    /// Creates a reader with a custom decoder. `config.encoding` is ignored.
    pub fn with_decoder(
        reader: R,
        config: ReaderConfig,
        decoder: Box<dyn CharDecoder>,
    ) -> GedcomResult<Self> {
        let scanner = Scanner::new(reader, decoder, config.scanner)?;
        Ok(Self::from_tokenizer(Tokenizer::new(scanner, config.strict)))
    }

    /// Creates a reader over an existing tokenizer.
    pub fn from_tokenizer(tokenizer: Tokenizer<R>) -> Self {
        Self {
            tokenizer,
            stack: Vec::new(),
            queue: VecDeque::new(),
            current: None,
            current_pos: SourcePos::start(),
            line_pos: SourcePos::start(),
            pending_id: None,
            started: false,
            finished: false,
            on_attribute: false,
            attribute_value_read: false,
        }
    }

    /// Advances to the next node.
    ///
    /// The first call always yields the [`ROOT_ELEMENT`] start. Returns
    /// `Ok(false)` once the root has been closed or the reader was closed.
    pub fn read(&mut self) -> GedcomResult<bool> {
        self.on_attribute = false;
        self.attribute_value_read = false;

        if !self.started {
            self.started = true;
            self.stack.push(ROOT_ELEMENT.to_string());
            self.current = Some(QueuedNode::root());
            return Ok(true);
        }

        while self.queue.is_empty() && !self.finished {
            self.read_line()?;
        }

        match self.queue.pop_front() {
            Some((node, pos)) => {
                match &node {
                    QueuedNode::ElementStart { name, .. } => self.stack.push(name.clone()),
                    QueuedNode::ElementEnd(_) => {
                        self.stack.pop();
                    }
                    _ => {}
                }
                self.current = Some(node);
                self.current_pos = pos;
                Ok(true)
            }
            None => {
                self.current = None;
                Ok(false)
            }
        }
    }

    /// Tokenizes one line and queues its nodes.
    ///
    /// Only called with an empty queue, so the stack reflects every node
    /// handed out so far.
    fn read_line(&mut self) -> GedcomResult<()> {
        loop {
            let token = self.tokenizer.next_token()?;
            match token.kind {
                TokenKind::Level => {
                    let level: usize = token.lexeme.parse().map_err(|_| {
                        GedcomError::syntax(ErrorKind::BadLevel, ' ', token.pos)
                    })?;
                    let target = level + 2;
                    if target > self.stack.len() + 1 {
                        debug!(
                            line = token.pos.line(),
                            level,
                            depth = self.stack.len(),
                            "level skips ahead, nesting under innermost element"
                        );
                    }
                    self.line_pos = token.pos;
                    let keep = (target - 1).min(self.stack.len());
                    for name in self.stack[keep..].iter().rev() {
                        self.queue
                            .push_back((QueuedNode::ElementEnd(name.clone()), token.pos));
                    }
                }
                TokenKind::Tag => {
                    let attribute = self.pending_id.take().map(Attribute::id);
                    let node = QueuedNode::ElementStart {
                        name: token.lexeme.to_string(),
                        attribute,
                    };
                    self.queue.push_back((node, self.line_pos));
                }
                TokenKind::CrossRef => match self.queue.back_mut().map(|(node, _)| node) {
                    Some(QueuedNode::ElementStart { attribute, .. }) => {
                        *attribute = Some(Attribute::reference(token.lexeme));
                    }
                    None | Some(QueuedNode::ElementEnd(_)) => {
                        self.pending_id = Some(token.lexeme.to_string());
                    }
                    Some(_) => {
                        return Err(GedcomError::syntax(
                            ErrorKind::UnexpectedToken,
                            '@',
                            token.pos,
                        ));
                    }
                },
                TokenKind::Text => {
                    let node = QueuedNode::Text(unescape_at(token.lexeme));
                    self.queue.push_back((node, self.line_pos));
                }
                TokenKind::Escape => {
                    let node = QueuedNode::Escape(token.lexeme.to_string());
                    self.queue.push_back((node, self.line_pos));
                }
                TokenKind::EndOfLine => {
                    if let Some(id) = self.pending_id.take() {
                        debug!(
                            line = token.pos.line(),
                            id = %id,
                            "cross-reference without tag dropped"
                        );
                    }
                    return Ok(());
                }
                TokenKind::EndOfInput => {
                    if let Some(id) = self.pending_id.take() {
                        debug!(
                            line = token.pos.line(),
                            id = %id,
                            "cross-reference without tag dropped"
                        );
                    }
                    for name in self.stack.iter().rev() {
                        self.queue
                            .push_back((QueuedNode::ElementEnd(name.clone()), token.pos));
                    }
                    self.finished = true;
                    return Ok(());
                }
                TokenKind::None => {
                    return Err(GedcomError::syntax(
                        ErrorKind::UnexpectedToken,
                        '\0',
                        token.pos,
                    ));
                }
            }
        }
    }

    /// Kind of the current node.
    pub fn node_kind(&self) -> NodeKind {
        if self.on_attribute {
            return if self.attribute_value_read {
                NodeKind::Text
            } else {
                NodeKind::Attribute
            };
        }
        match &self.current {
            None => NodeKind::None,
            Some(QueuedNode::ElementStart { .. }) => NodeKind::Element,
            Some(QueuedNode::ElementEnd(_)) => NodeKind::EndElement,
            Some(QueuedNode::Text(_)) => NodeKind::Text,
            Some(QueuedNode::Escape(_)) => NodeKind::Escape,
        }
    }

    /// Element or attribute name of the current node.
    pub fn name(&self) -> &str {
        if self.on_attribute {
            return self.attribute().map_or("", Attribute::name);
        }
        match &self.current {
            Some(QueuedNode::ElementStart { name, .. }) | Some(QueuedNode::ElementEnd(name)) => {
                name
            }
            _ => "",
        }
    }

    /// Text, escape content or attribute value of the current node.
    pub fn value(&self) -> &str {
        if self.on_attribute {
            return self.attribute().map_or("", Attribute::value);
        }
        match &self.current {
            Some(QueuedNode::Text(value)) | Some(QueuedNode::Escape(value)) => value,
            _ => "",
        }
    }

    /// Number of open elements, plus one while on an attribute.
    pub fn depth(&self) -> usize {
        self.stack.len() + usize::from(self.on_attribute)
    }

    /// The cross-reference attribute of the current element.
    pub fn attribute(&self) -> Option<&Attribute> {
        match &self.current {
            Some(QueuedNode::ElementStart { attribute, .. }) => attribute.as_ref(),
            _ => None,
        }
    }

    /// Value of the attribute called `name` on the current element.
    pub fn attribute_value(&self, name: &str) -> Option<&str> {
        self.attribute()
            .filter(|attr| attr.name() == name)
            .map(Attribute::value)
    }

    pub fn attribute_count(&self) -> usize {
        usize::from(self.attribute().is_some())
    }

    pub fn move_to_attribute(&mut self, index: usize) -> bool {
        if index == 0 && self.attribute().is_some() {
            self.on_attribute = true;
            self.attribute_value_read = false;
            true
        } else {
            false
        }
    }

    pub fn move_to_attribute_named(&mut self, name: &str) -> bool {
        if self.attribute_value(name).is_some() {
            self.move_to_attribute(0)
        } else {
            false
        }
    }

    pub fn move_to_first_attribute(&mut self) -> bool {
        self.move_to_attribute(0)
    }

    /// Moves to the first attribute from the element. Elements carry at most
    /// one attribute, so from an attribute this leaves attribute mode and
    /// returns `false`.
    pub fn move_to_next_attribute(&mut self) -> bool {
        if self.on_attribute {
            self.on_attribute = false;
            false
        } else {
            self.move_to_attribute(0)
        }
    }

    pub fn move_to_element(&mut self) -> bool {
        let was_on_attribute = self.on_attribute;
        self.on_attribute = false;
        self.attribute_value_read = false;
        was_on_attribute
    }

    /// Turns the current attribute into a text node. Succeeds once per
    /// attribute visit.
    pub fn read_attribute_value(&mut self) -> bool {
        if self.on_attribute && !self.attribute_value_read {
            self.attribute_value_read = true;
            true
        } else {
            false
        }
    }

    /// Start of the GEDCOM line that produced the current node.
    ///
    /// Element ends report the line that closed them.
    pub fn position(&self) -> SourcePos {
        self.current_pos
    }

    /// 1-based line of the current node.
    pub fn line_number(&self) -> usize {
        self.current_pos.line()
    }

    /// 0-based column of the current node.
    pub fn line_position(&self) -> usize {
        self.current_pos.column()
    }

    /// Returns true once the document has been fully read or the reader closed.
    pub fn is_finished(&self) -> bool {
        self.finished && self.queue.is_empty()
    }

    /// Releases the input. Subsequent reads return `Ok(false)`.
    pub fn close(&mut self) {
        self.tokenizer.close();
        self.started = true;
        self.finished = true;
        self.queue.clear();
        self.stack.clear();
        self.current = None;
        self.on_attribute = false;
    }

    /// Iterates over owned document events.
    ///
    /// The iterator stops after the first error.
    pub fn events(&mut self) -> Events<'_, R> {
        Events {
            reader: self,
            pending_attribute: None,
            done: false,
        }
    }

    fn current_event(&self) -> Option<(DocumentEvent, Option<Attribute>)> {
        let event = match self.current.as_ref()? {
            QueuedNode::ElementStart { name, attribute } => {
                return Some((DocumentEvent::ElementStart(name.clone()), attribute.clone()));
            }
            QueuedNode::ElementEnd(name) => DocumentEvent::ElementEnd(name.clone()),
            QueuedNode::Text(value) => DocumentEvent::Text(value.clone()),
            QueuedNode::Escape(content) => DocumentEvent::Escape(content.clone()),
        };
        Some((event, None))
    }
}

/// Collapses `@@` to a literal `@`.
fn unescape_at(lexeme: &str) -> String {
    if lexeme.contains("@@") {
        lexeme.replace("@@", "@")
    } else {
        lexeme.to_string()
    }
}

impl<R: Read> NodeReader for GedcomReader<R> {
    type Error = GedcomError;

    fn read(&mut self) -> GedcomResult<bool> {
        GedcomReader::read(self)
    }

    fn node_kind(&self) -> NodeKind {
        GedcomReader::node_kind(self)
    }

    fn name(&self) -> &str {
        GedcomReader::name(self)
    }

    fn value(&self) -> &str {
        GedcomReader::value(self)
    }

    fn depth(&self) -> usize {
        GedcomReader::depth(self)
    }

    fn attribute_count(&self) -> usize {
        GedcomReader::attribute_count(self)
    }

    fn move_to_attribute(&mut self, index: usize) -> bool {
        GedcomReader::move_to_attribute(self, index)
    }

    fn move_to_attribute_named(&mut self, name: &str) -> bool {
        GedcomReader::move_to_attribute_named(self, name)
    }

    fn move_to_next_attribute(&mut self) -> bool {
        GedcomReader::move_to_next_attribute(self)
    }

    fn move_to_element(&mut self) -> bool {
        GedcomReader::move_to_element(self)
    }

    fn read_attribute_value(&mut self) -> bool {
        GedcomReader::read_attribute_value(self)
    }

    fn close(&mut self) {
        GedcomReader::close(self)
    }
}

/// Iterator returned by [`GedcomReader::events`].
pub struct Events<'a, R> {
    reader: &'a mut GedcomReader<R>,
    pending_attribute: Option<Attribute>,
    done: bool,
}

impl<R: Read> Iterator for Events<'_, R> {
    type Item = GedcomResult<DocumentEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(attribute) = self.pending_attribute.take() {
            return Some(Ok(DocumentEvent::Attribute(attribute)));
        }
        if self.done {
            return None;
        }
        match self.reader.read() {
            Ok(true) => {}
            Ok(false) => {
                self.done = true;
                return None;
            }
            Err(e) => {
                self.done = true;
                return Some(Err(e));
            }
        }
        let (event, attribute) = self.reader.current_event()?;
        self.pending_attribute = attribute;
        Some(Ok(event))
    }
}

impl<R: Read> std::iter::FusedIterator for Events<'_, R> {}
