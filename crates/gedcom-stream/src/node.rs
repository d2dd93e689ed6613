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

//! Node-level reader and writer abstractions.
//!
//! [`NodeReader`] is a pull cursor over a document tree and [`NodeWriter`]
//! is the matching push sink. Any reader can be pumped into any writer with
//! [`copy_nodes`], which is how GEDCOM is converted to XML and back.

use crate::event::NodeKind;

/// Pull cursor over document nodes.
///
/// After [`read`](Self::read) returns `true` the reader is positioned on a
/// node whose kind, name and value can be inspected. Attributes are visited
/// with the `move_to_*` methods and left again with
/// [`move_to_element`](Self::move_to_element).
pub trait NodeReader {
    /// Error produced by the underlying source.
    type Error;

    /// Advances to the next node. Returns `false` at the end of the document.
    fn read(&mut self) -> Result<bool, Self::Error>;

    /// Kind of the current node.
    fn node_kind(&self) -> NodeKind;

    /// Name of the current element or attribute. Empty for text nodes.
    fn name(&self) -> &str;

    /// Value of the current text, escape or attribute.
    fn value(&self) -> &str;

    /// Nesting depth of the current node.
    fn depth(&self) -> usize;

    /// Number of attributes on the current element.
    fn attribute_count(&self) -> usize;

    /// Moves to the attribute at `index`.
    fn move_to_attribute(&mut self, index: usize) -> bool;

    /// Moves to the attribute called `name`.
    fn move_to_attribute_named(&mut self, name: &str) -> bool;

    /// Moves to the next attribute, or the first when on the element.
    fn move_to_next_attribute(&mut self) -> bool;

    /// Leaves attribute mode. Returns `true` if the reader was on an attribute.
    fn move_to_element(&mut self) -> bool;

    /// Exposes the current attribute's value as a text node, once.
    fn read_attribute_value(&mut self) -> bool;

    /// Releases the underlying source.
    fn close(&mut self);

    fn move_to_first_attribute(&mut self) -> bool {
        self.move_to_attribute(0)
    }

    fn has_value(&self) -> bool {
        matches!(
            self.node_kind(),
            NodeKind::Text | NodeKind::Escape | NodeKind::Attribute
        )
    }
}

/// Push sink for document nodes.
pub trait NodeWriter {
    /// Error produced by the underlying sink.
    type Error;

    fn start_document(&mut self) -> Result<(), Self::Error>;
    fn start_element(&mut self, name: &str) -> Result<(), Self::Error>;
    fn start_attribute(&mut self, name: &str) -> Result<(), Self::Error>;
    fn end_attribute(&mut self) -> Result<(), Self::Error>;

    /// Writes a text value. Inside an attribute it becomes the attribute value.
    fn text(&mut self, value: &str) -> Result<(), Self::Error>;

    /// Writes an escape sequence verbatim.
    fn escape(&mut self, content: &str) -> Result<(), Self::Error>;

    /// Closes the current element, allowing a compact form.
    fn end_element(&mut self) -> Result<(), Self::Error>;

    /// Closes the current element with an explicit end.
    fn end_element_full(&mut self) -> Result<(), Self::Error>;

    fn end_document(&mut self) -> Result<(), Self::Error>;
    fn flush(&mut self) -> Result<(), Self::Error>;
}

/// Pumps every node from `reader` into `writer`.
///
/// Attributes are copied through `start_attribute`, one `text` call per
/// attribute value and `end_attribute`. Element ends are always written in
/// full form.
///
/// # Examples
///
/// ```rust
/// use gedcom_stream::{copy_nodes, GedcomReader, GedcomResult, GedcomWriter};
/// use std::io::Cursor;
///
/// let input = "0 INDI\n1 NAME John /Doe/\n1 FAMS @F1@\n";
/// let mut reader = GedcomReader::new(Cursor::new(input)).unwrap();
/// let mut writer = GedcomWriter::new(Vec::new());
/// let copied: GedcomResult<()> = copy_nodes(&mut reader, &mut writer);
/// copied.unwrap();
/// assert_eq!(String::from_utf8(writer.into_inner().unwrap()).unwrap(), input);
/// ```
pub fn copy_nodes<Rd, Wr, E>(reader: &mut Rd, writer: &mut Wr) -> Result<(), E>
where
    Rd: NodeReader + ?Sized,
    Wr: NodeWriter + ?Sized,
    E: From<Rd::Error> + From<Wr::Error>,
{
    writer.start_document()?;
    while reader.read()? {
        match reader.node_kind() {
            NodeKind::Element => {
                writer.start_element(reader.name())?;
                if reader.move_to_first_attribute() {
                    loop {
                        writer.start_attribute(reader.name())?;
                        while reader.read_attribute_value() {
                            writer.text(reader.value())?;
                        }
                        writer.end_attribute()?;
                        if !reader.move_to_next_attribute() {
                            break;
                        }
                    }
                    reader.move_to_element();
                }
            }
            NodeKind::Text => writer.text(reader.value())?,
            NodeKind::Escape => writer.escape(reader.value())?,
            NodeKind::EndElement => writer.end_element_full()?,
            NodeKind::None | NodeKind::Attribute => {}
        }
    }
    writer.end_document()?;
    writer.flush()?;
    Ok(())
}
