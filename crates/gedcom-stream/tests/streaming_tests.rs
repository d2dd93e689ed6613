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

//! Integration tests for the streaming GEDCOM reader.

use std::io::{Cursor, Write};

use gedcom_stream::{
    Attribute, DocumentEvent, ErrorKind, GedcomReader, GedcomResult, NodeKind, ReaderConfig,
    ScannerConfig,
};

fn events_with(input: &[u8], config: ReaderConfig) -> GedcomResult<Vec<DocumentEvent>> {
    let mut reader = GedcomReader::with_config(Cursor::new(input.to_vec()), config)?;
    let events = reader.events().collect();
    reader.close();
    events
}

fn events(input: &str) -> Vec<DocumentEvent> {
    events_with(input.as_bytes(), ReaderConfig::default()).unwrap()
}

fn start(name: &str) -> DocumentEvent {
    DocumentEvent::ElementStart(name.to_string())
}

fn end(name: &str) -> DocumentEvent {
    DocumentEvent::ElementEnd(name.to_string())
}

fn text(value: &str) -> DocumentEvent {
    DocumentEvent::Text(value.to_string())
}

const TRANSMISSION: &str = "0 Items\n\
1 Item @attr1@ Test with an entity: \n\
1 @attr2@ Item test with a child element \n\
2 more\n\
1 Item test with a CDATA section  def\n\
1 Item Test with an char entity: &\n\
1 Item 1234567890ABCD\n";

#[test]
fn test_two_line_event_order() {
    assert_eq!(
        events("0 Items\n1 Item first item\n"),
        vec![
            start("GED"),
            start("Items"),
            start("Item"),
            text("first item"),
            end("Item"),
            end("Items"),
            end("GED"),
        ]
    );
}

#[test]
fn test_transmission_structure() {
    let evts = events(TRANSMISSION);
    assert_eq!(
        &evts[..12],
        &[
            start("GED"),
            start("Items"),
            start("Item"),
            DocumentEvent::Attribute(Attribute::reference("attr1")),
            text("Test with an entity: "),
            end("Item"),
            start("Item"),
            DocumentEvent::Attribute(Attribute::id("attr2")),
            text("test with a child element "),
            start("more"),
            end("more"),
            end("Item"),
        ]
    );
    assert!(evts.contains(&text("test with a CDATA section  def")));
    assert!(evts.contains(&text("Test with an char entity: &")));
    assert_eq!(evts.last(), Some(&end("GED")));
}

#[test]
fn test_element_starts_and_ends_balance() {
    let evts = events(TRANSMISSION);
    let starts = evts.iter().filter(|e| matches!(e, DocumentEvent::ElementStart(_))).count();
    let ends = evts.iter().filter(|e| matches!(e, DocumentEvent::ElementEnd(_))).count();
    assert_eq!(starts, ends);
    assert_eq!(starts, 8);
}

#[test]
fn test_utf8_with_bom_and_no_final_newline() {
    let input = "\u{FEFF}0 Items\n1 Item Test with Unicode char: ☺";
    let evts = events_with(input.as_bytes(), ReaderConfig::default()).unwrap();
    assert_eq!(evts[1], start("Items"));
    assert_eq!(evts[3], text("Test with Unicode char: ☺"));
    assert_eq!(evts.len(), 7);
}

#[test]
fn test_crlf_and_cr_line_endings() {
    let lf = events("0 HEAD\n1 SOUR x\n0 TRLR\n");
    assert_eq!(events("0 HEAD\r\n1 SOUR x\r\n0 TRLR\r\n"), lf);
    assert_eq!(events("0 HEAD\r1 SOUR x\r0 TRLR\r"), lf);
}

#[test]
fn test_small_buffers_give_same_events() {
    let mut input = String::new();
    for i in 0..200 {
        input.push_str(&format!("0 @I{i}@ INDI\n1 NAME Person {i} /Family/\n2 GIVN Person\n"));
        input.push_str("1 NOTE caf\u{e9} \u{263a} @@home\n");
    }
    let expected = events(&input);
    let config = ReaderConfig {
        scanner: ScannerConfig {
            chunk_size: 7,
            refill_margin: 5,
        },
        ..ReaderConfig::default()
    };
    let actual = events_with(input.as_bytes(), config).unwrap();
    assert_eq!(actual, expected);
    assert!(actual.contains(&text("café ☺ @home")));
}

#[test]
fn test_long_lexeme_across_chunks() {
    let long = "x".repeat(10_000);
    let input = format!("0 NOTE {long}\n");
    let config = ReaderConfig {
        scanner: ScannerConfig {
            chunk_size: 16,
            refill_margin: 4,
        },
        ..ReaderConfig::default()
    };
    let evts = events_with(input.as_bytes(), config).unwrap();
    assert_eq!(evts[2], text(&long));
}

#[test]
fn test_read_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(TRANSMISSION.as_bytes()).unwrap();
    file.flush().unwrap();

    let handle = std::fs::File::open(file.path()).unwrap();
    let mut reader = GedcomReader::new(handle).unwrap();
    let mut elements = 0;
    while reader.read().unwrap() {
        if reader.node_kind() == NodeKind::Element {
            elements += 1;
        }
    }
    assert_eq!(elements, 8);
}

#[test]
fn test_strict_mode_errors() {
    let err = events_with(b"0 HEAD\n1 NOTE a@b\n", ReaderConfig::strict()).unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::BadEscapeChar));
    assert_eq!(err.line(), Some(2));

    let lenient = events("0 HEAD\n1 NOTE a@b\n");
    assert!(lenient.contains(&text("a@b")));
}

#[test]
fn test_comments_are_skipped_when_lenient() {
    assert_eq!(
        events("// exported by hand\n0 HEAD\n// trailing\n"),
        vec![start("GED"), start("HEAD"), end("HEAD"), end("GED")]
    );
}

#[test]
fn test_error_reports_line_and_column() {
    let err = events_with(b"0 HEAD\n1 SOUR ok\n1 SO*R bad\n", ReaderConfig::default()).unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::BadTagChar));
    assert_eq!(err.line(), Some(3));
    assert_eq!(err.column(), Some(4));
    assert_eq!(err.character(), Some('*'));
}

#[test]
fn test_three_digit_level_is_rejected() {
    let err = events_with(b"0 A\n100 Item\n", ReaderConfig::default()).unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::BadLevel));
}
