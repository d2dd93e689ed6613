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

//! Structured error types for the GEDCOM CLI.

use std::io;
use std::path::PathBuf;

use gedcom_stream::GedcomError;
use gedcom_xml::XmlError;
use thiserror::Error;

/// The main error type for CLI operations.
#[derive(Error, Debug)]
pub enum CliError {
    /// I/O operation failed (file open, create or write).
    #[error("I/O error for '{path}': {message}")]
    Io {
        /// The file path that caused the error
        path: PathBuf,
        /// The error message
        message: String,
    },

    /// The input file is missing.
    #[error("File {} does not exist", .0.display())]
    NotFound(PathBuf),

    /// The GEDCOM input or output failed.
    #[error("GEDCOM error: {0}")]
    Gedcom(#[from] GedcomError),

    /// XML conversion error.
    #[error("XML conversion error: {0}")]
    Xml(#[from] XmlError),
}

impl CliError {
    /// Create an I/O error with file path context.
    pub fn io_error(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }
}
