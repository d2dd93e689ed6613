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

//! Property-based tests for the GEDCOM reader and writer.
//!
//! # Properties Tested
//!
//! 1. **Exact Roundtrip**: canonical documents are reproduced byte for byte
//! 2. **Balance**: every element start has a matching end
//! 3. **Chunking Independence**: buffer sizes never change the events

use std::io::Cursor;

use gedcom_stream::{
    copy_nodes, DocumentEvent, GedcomReader, GedcomResult, GedcomWriter, ReaderConfig,
    ScannerConfig,
};
use proptest::prelude::*;

/// One canonical line: level, tag, optional reference, optional value.
type Line = (usize, String, Option<String>, Option<String>);

fn line_strategy() -> impl Strategy<Value = Line> {
    (
        0usize..4,
        "[A-Z_][A-Z0-9_]{0,7}".prop_filter("root element name", |tag| tag != "GED"),
        proptest::option::of("[A-Za-z0-9_]{1,6}"),
        proptest::option::of("[A-Za-z0-9é☺][A-Za-z0-9 ,./é☺]{0,24}"),
    )
}

fn document_strategy() -> impl Strategy<Value = Vec<Line>> {
    prop::collection::vec(line_strategy(), 1..40).prop_map(|mut lines| {
        let mut previous: Option<usize> = None;
        for line in &mut lines {
            let max = previous.map_or(0, |p| p + 1);
            line.0 = line.0.min(max);
            previous = Some(line.0);
        }
        lines
    })
}

fn render(lines: &[Line]) -> String {
    let mut out = String::new();
    for (level, tag, reference, value) in lines {
        out.push_str(&format!("{level} {tag}"));
        if let Some(reference) = reference {
            out.push_str(&format!(" @{reference}@"));
        }
        if let Some(value) = value {
            out.push(' ');
            out.push_str(value);
        }
        out.push('\n');
    }
    out
}

fn roundtrip(input: &str) -> String {
    let mut reader = GedcomReader::new(Cursor::new(input.as_bytes().to_vec())).unwrap();
    let mut writer = GedcomWriter::new(Vec::new());
    let copied: GedcomResult<()> = copy_nodes(&mut reader, &mut writer);
    copied.unwrap();
    String::from_utf8(writer.into_inner().unwrap()).unwrap()
}

fn collect(input: &str, config: ReaderConfig) -> Vec<DocumentEvent> {
    let mut reader = GedcomReader::with_config(Cursor::new(input.as_bytes().to_vec()), config).unwrap();
    reader.events().collect::<GedcomResult<_>>().unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Property: canonical documents survive read → write unchanged.
    #[test]
    fn prop_canonical_roundtrip(lines in document_strategy()) {
        let doc = render(&lines);
        prop_assert_eq!(roundtrip(&doc), doc);
    }

    /// Property: starts and ends balance and the root wraps everything.
    #[test]
    fn prop_events_balanced(lines in document_strategy()) {
        let doc = render(&lines);
        let events = collect(&doc, ReaderConfig::default());

        let mut depth = 0i64;
        for event in &events {
            match event {
                DocumentEvent::ElementStart(_) => depth += 1,
                DocumentEvent::ElementEnd(_) => depth -= 1,
                _ => {}
            }
            prop_assert!(depth >= 0);
        }
        prop_assert_eq!(depth, 0);
        prop_assert_eq!(events.first(), Some(&DocumentEvent::ElementStart("GED".into())));
        prop_assert_eq!(events.last(), Some(&DocumentEvent::ElementEnd("GED".into())));
    }

    /// Property: the chunk size of the scanner is invisible to consumers.
    #[test]
    fn prop_chunking_independent(
        lines in document_strategy(),
        chunk_size in 1usize..64,
        refill_margin in 0usize..16,
    ) {
        let doc = render(&lines);
        let small = ReaderConfig {
            scanner: ScannerConfig { chunk_size, refill_margin },
            ..ReaderConfig::default()
        };
        prop_assert_eq!(collect(&doc, small), collect(&doc, ReaderConfig::default()));
    }
}
