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

//! Document events and node kinds.
//!
//! A GEDCOM file reads as a tree rooted at the synthetic [`ROOT_ELEMENT`]:
//! every line opens an element named after its tag, its cross-reference
//! becomes the element's single attribute and its value becomes a text
//! child.

use std::fmt;

/// Name of the synthetic element that wraps the whole document.
pub const ROOT_ELEMENT: &str = "GED";

/// Kind of the node a reader is positioned on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NodeKind {
    /// Not positioned on a node (before the first read or after the last).
    #[default]
    None,
    Element,
    EndElement,
    Text,
    Attribute,
    /// An `@#...@` escape sequence kept verbatim.
    Escape,
}

/// Which side of a cross-reference an attribute represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    /// `@X@` before the tag: the record's own identifier.
    Id,
    /// `@X@` after the tag: a pointer to another record.
    Ref,
}

impl AttributeKind {
    /// Attribute name as exposed to consumers.
    pub const fn name(&self) -> &'static str {
        match self {
            AttributeKind::Id => "ID",
            AttributeKind::Ref => "REF",
        }
    }

    /// Parses an attribute name back into its kind.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ID" => Some(AttributeKind::Id),
            "REF" => Some(AttributeKind::Ref),
            _ => None,
        }
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A cross-reference attached to an element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Attribute {
    kind: AttributeKind,
    value: String,
}

impl Attribute {
    /// Creates an attribute of the given kind.
    pub fn new(kind: AttributeKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }

    /// Creates an `ID` attribute.
    pub fn id(value: impl Into<String>) -> Self {
        Self::new(AttributeKind::Id, value)
    }

    /// Creates a `REF` attribute.
    pub fn reference(value: impl Into<String>) -> Self {
        Self::new(AttributeKind::Ref, value)
    }

    pub fn kind(&self) -> AttributeKind {
        self.kind
    }

    /// `"ID"` or `"REF"`.
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Owned event produced by [`GedcomReader::events`](crate::GedcomReader::events).
///
/// An element with an attribute is reported as `ElementStart` immediately
/// followed by `Attribute`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentEvent {
    ElementStart(String),
    Attribute(Attribute),
    Text(String),
    Escape(String),
    ElementEnd(String),
}

impl DocumentEvent {
    /// Kind of node this event corresponds to.
    pub fn node_kind(&self) -> NodeKind {
        match self {
            DocumentEvent::ElementStart(_) => NodeKind::Element,
            DocumentEvent::Attribute(_) => NodeKind::Attribute,
            DocumentEvent::Text(_) => NodeKind::Text,
            DocumentEvent::Escape(_) => NodeKind::Escape,
            DocumentEvent::ElementEnd(_) => NodeKind::EndElement,
        }
    }
}

impl fmt::Display for DocumentEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentEvent::ElementStart(name) => write!(f, "<{name}>"),
            DocumentEvent::Attribute(attr) => write!(f, "{}={:?}", attr.name(), attr.value()),
            DocumentEvent::Text(text) => write!(f, "{text:?}"),
            DocumentEvent::Escape(content) => write!(f, "@{content}@"),
            DocumentEvent::ElementEnd(name) => write!(f, "</{name}>"),
        }
    }
}
