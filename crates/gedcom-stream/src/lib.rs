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

//! Streaming GEDCOM reader and writer
//!
//! This crate presents GEDCOM as a stream of document nodes. A file is read
//! as a tree under a synthetic `GED` root element: each line becomes an
//! element named after its tag, a cross-reference becomes an `ID` or `REF`
//! attribute and the line value becomes text.
//!
//! # Reading
//!
//! ```rust
//! use gedcom_stream::{GedcomReader, NodeKind};
//! use std::io::Cursor;
//!
//! let mut reader = GedcomReader::new(Cursor::new("0 HEAD\n1 SOUR demo\n")).unwrap();
//! let mut names = Vec::new();
//! while reader.read().unwrap() {
//!     if reader.node_kind() == NodeKind::Element {
//!         names.push(reader.name().to_string());
//!     }
//! }
//! assert_eq!(names, ["GED", "HEAD", "SOUR"]);
//! ```
//!
//! # Round trip
//!
//! [`copy_nodes`] pumps any [`NodeReader`] into any [`NodeWriter`]. Reading
//! GEDCOM and writing it back with [`GedcomWriter`] reproduces the input
//! for files with one space between fields and a final newline.

pub mod event;
pub mod node;
pub mod reader;
pub mod trace;
pub mod writer;

pub use event::{Attribute, AttributeKind, DocumentEvent, NodeKind, ROOT_ELEMENT};
pub use gedcom_core::{Encoding, ErrorKind, GedcomError, GedcomResult, ScannerConfig, SourcePos};
pub use node::{copy_nodes, NodeReader, NodeWriter};
pub use reader::{Events, GedcomReader, ReaderConfig};
pub use trace::{TracingReader, TracingWriter};
pub use writer::{GedcomWriter, WriteState};

/// Reads GEDCOM from `input` and writes it back to `output`.
///
/// Useful to normalize spacing and line endings.
pub fn normalize<R, W>(input: R, output: W, config: ReaderConfig) -> GedcomResult<W>
where
    R: std::io::Read,
    W: std::io::Write,
{
    let mut reader = GedcomReader::with_config(input, config)?;
    let mut writer = GedcomWriter::new(output);
    copy_nodes::<_, _, GedcomError>(&mut reader, &mut writer)?;
    reader.close();
    writer.into_inner()
}
