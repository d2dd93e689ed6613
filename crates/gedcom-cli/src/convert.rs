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

//! The conversion command.
//!
//! Reads GEDCOM (or XML when the input ends in `.xml`) and writes XML or
//! GEDCOM. Any reader is pumped into any writer through
//! [`copy_nodes`], optionally wrapped in the tracing decorators.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use gedcom_stream::{
    copy_nodes, GedcomError, GedcomReader, GedcomWriter, NodeReader, NodeWriter, TracingReader, TracingWriter,
};
use gedcom_xml::{ToXmlConfig, XmlError, XmlReader, XmlWriter};
use tracing::info;

use crate::error::CliError;

/// Output format of a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Xml,
    Gedcom,
}

/// Options of a single conversion.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Output file. Writes to stdout when `None`.
    pub output: Option<PathBuf>,
    /// Parse and discard the output.
    pub silent: bool,
    pub format: OutputFormat,
    /// XML layout and GEDCOM reader settings.
    pub xml: ToXmlConfig,
    /// Log every node call at TRACE level.
    pub trace: bool,
}

/// Returns true when `path` should be read as XML.
pub fn is_xml_input(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xml"))
}

/// Converts `input` according to `options`.
pub fn convert(input: &Path, options: &ConvertOptions) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::NotFound(input.to_path_buf()));
    }
    let file = File::open(input).map_err(|e| CliError::io_error(input, e))?;
    let sink = open_sink(options)?;
    let started = Instant::now();
    info!(input = %input.display(), format = ?options.format, "converting");

    if is_xml_input(input) {
        pump(XmlReader::new(BufReader::new(file)), sink, options)?;
    } else {
        pump(GedcomReader::with_config(file, options.xml.reader)?, sink, options)?;
    }

    info!(elapsed_ms = started.elapsed().as_millis() as u64, "conversion finished");
    Ok(())
}

fn open_sink(options: &ConvertOptions) -> Result<Box<dyn Write>, CliError> {
    if options.silent {
        return Ok(Box::new(io::sink()));
    }
    match &options.output {
        Some(path) => {
            let file = File::create(path).map_err(|e| CliError::io_error(path, e))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}

fn pump<Rd>(reader: Rd, sink: Box<dyn Write>, options: &ConvertOptions) -> Result<(), CliError>
where
    Rd: NodeReader,
    CliError: From<Rd::Error> + From<XmlError> + From<GedcomError>,
{
    match options.format {
        OutputFormat::Xml => run(reader, XmlWriter::new(sink, options.xml.clone()), options.trace),
        OutputFormat::Gedcom => run(reader, GedcomWriter::new(sink), options.trace),
    }
}

fn run<Rd, Wr>(reader: Rd, writer: Wr, trace: bool) -> Result<(), CliError>
where
    Rd: NodeReader,
    Wr: NodeWriter,
    CliError: From<Rd::Error> + From<Wr::Error>,
{
    if trace {
        copy_and_close(TracingReader::new(reader), TracingWriter::new(writer))
    } else {
        copy_and_close(reader, writer)
    }
}

fn copy_and_close<Rd, Wr>(mut reader: Rd, mut writer: Wr) -> Result<(), CliError>
where
    Rd: NodeReader,
    Wr: NodeWriter,
    CliError: From<Rd::Error> + From<Wr::Error>,
{
    copy_nodes::<_, _, CliError>(&mut reader, &mut writer)?;
    reader.close();
    Ok(())
}
