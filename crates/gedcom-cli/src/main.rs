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

//! GEDCOM to XML command line converter

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use gedcom_cli::{convert, ConvertOptions, OutputFormat};
use gedcom_stream::{Encoding, ReaderConfig};
use gedcom_xml::ToXmlConfig;
use tracing_subscriber::EnvFilter;

/// Crates whose logs the verbosity flags control.
const LOG_TARGETS: &[&str] = &["gedcom_core", "gedcom_stream", "gedcom_xml", "gedcom_cli", "gedcom2xml"];

/// Convert GEDCOM files to XML and back
///
/// # Examples
///
/// ```bash
/// # Print the XML view of a GEDCOM file
/// gedcom2xml family.ged
///
/// # Only check that a file parses, rejecting lenient constructs
/// gedcom2xml -s --strict family.ged
///
/// # Convert XML back to GEDCOM
/// gedcom2xml --to-gedcom -o family.ged family.xml
/// ```
#[derive(Parser)]
#[command(name = "gedcom2xml")]
#[command(author, version, about = "Convert GEDCOM files to XML and back", long_about = None)]
struct Cli {
    /// Input file; a .xml extension reads XML instead of GEDCOM
    file: PathBuf,

    /// Parse only, suppress output
    #[arg(short = 's', long)]
    silent: bool,

    /// Reject comment lines and stray '@' in values
    #[arg(long)]
    strict: bool,

    /// Input encoding (utf-8, latin1)
    #[arg(long, default_value = "utf-8")]
    encoding: Encoding,

    /// Write GEDCOM instead of XML
    #[arg(long)]
    to_gedcom: bool,

    /// Single-line XML without declaration
    #[arg(long)]
    compact: bool,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log parser decisions to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Log every node read and written to stderr
    #[arg(long)]
    trace: bool,
}

impl Cli {
    fn options(&self) -> ConvertOptions {
        let reader = ReaderConfig {
            strict: self.strict,
            encoding: self.encoding,
            ..ReaderConfig::default()
        };
        let layout = if self.compact {
            ToXmlConfig::compact()
        } else {
            ToXmlConfig::default()
        };
        ConvertOptions {
            output: self.output.clone(),
            silent: self.silent,
            format: if self.to_gedcom {
                OutputFormat::Gedcom
            } else {
                OutputFormat::Xml
            },
            xml: ToXmlConfig { reader, ..layout },
            trace: self.trace,
        }
    }
}

fn init_tracing(cli: &Cli) {
    let level = if cli.trace {
        "trace"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };
    let directives = LOG_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match convert(&cli.file, &cli.options()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
