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

//! Error types for XML conversion

use gedcom_stream::GedcomError;
use thiserror::Error;

/// Errors that can occur during XML conversion operations.
#[derive(Error, Debug)]
pub enum XmlError {
    /// XML parsing failed due to malformed syntax.
    ///
    /// ```text
    /// XML parse error at position 42: unclosed element <Item>
    /// ```
    #[error("XML parse error at position {pos}: {message}")]
    ParseError {
        /// Byte offset in the XML input
        pos: usize,
        message: String,
    },

    /// Writing XML output failed.
    #[error("Failed to write {context}: {message}")]
    WriteError { context: String, message: String },

    /// The GEDCOM side failed.
    #[error(transparent)]
    Gedcom(#[from] GedcomError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl XmlError {
    /// Create a parse error.
    pub fn parse(pos: usize, message: impl Into<String>) -> Self {
        Self::ParseError {
            pos,
            message: message.into(),
        }
    }

    /// Create a write error.
    pub fn write(context: impl Into<String>, message: impl ToString) -> Self {
        Self::WriteError {
            context: context.into(),
            message: message.to_string(),
        }
    }
}
