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

//! GEDCOM XML Conversion
//!
//! Converts between GEDCOM and an XML view of the same tree. Each GEDCOM
//! line becomes an element named after its tag, the record identifier or
//! pointer becomes an `ID` or `REF` attribute and the line value becomes
//! text. Everything is wrapped in a `<GED>` root element.
//!
//! # Examples
//!
//! ```rust
//! use gedcom_xml::{from_xml, to_xml, ToXmlConfig};
//!
//! let gedcom = "0 @I1@ INDI\n1 NAME Ann /Smith/\n";
//! let xml = to_xml(gedcom, &ToXmlConfig::compact()).unwrap();
//! assert_eq!(xml, r#"<GED><INDI ID="I1"><NAME>Ann /Smith/</NAME></INDI></GED>"#);
//!
//! // Cross-references come back after the tag.
//! assert_eq!(from_xml(&xml).unwrap(), "0 INDI @I1@\n1 NAME Ann /Smith/\n");
//! ```

mod error;
mod from_xml;
mod to_xml;

pub use error::XmlError;
pub use from_xml::{from_xml, xml_to_gedcom, XmlReader};
pub use to_xml::{gedcom_to_xml, to_xml, ToXmlConfig, XmlWriter};

/// Target of the processing instruction that carries a GEDCOM escape.
pub const ESCAPE_TARGET: &str = "GEDCOM-ESCAPE";
