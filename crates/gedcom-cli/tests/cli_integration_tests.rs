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

//! CLI integration tests

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::NamedTempFile;

fn gedcom2xml() -> Command {
    Command::cargo_bin("gedcom2xml").expect("Failed to find gedcom2xml binary")
}

fn create_temp_file(content: &[u8], suffix: &str) -> NamedTempFile {
    let file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("Failed to create temp file");
    fs::write(file.path(), content).expect("Failed to write temp file");
    file
}

const FAMILY: &str = "0 HEAD\n1 SOUR demo\n0 @I1@ INDI\n1 NAME Ann /Smith/\n1 FAMS @F1@\n0 TRLR\n";

#[test]
fn test_help_output() {
    gedcom2xml()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Convert GEDCOM files to XML and back"))
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn test_missing_argument_fails() {
    gedcom2xml().assert().failure();
}

#[test]
fn test_missing_file_reports_and_fails() {
    gedcom2xml()
        .arg("no-such-file.ged")
        .assert()
        .failure()
        .stderr(predicate::str::contains("File no-such-file.ged does not exist"));
}

#[test]
fn test_convert_to_pretty_xml() {
    let file = create_temp_file(FAMILY.as_bytes(), ".ged");
    gedcom2xml()
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("<?xml"))
        .stdout(predicate::str::contains("<INDI ID=\"I1\">"))
        .stdout(predicate::str::contains("<NAME>Ann /Smith/</NAME>"));
}

#[test]
fn test_convert_to_compact_xml() {
    let file = create_temp_file(b"0 HEAD\n1 SOUR demo\n", ".ged");
    gedcom2xml()
        .arg("--compact")
        .arg(file.path())
        .assert()
        .success()
        .stdout("<GED><HEAD><SOUR>demo</SOUR></HEAD></GED>");
}

#[test]
fn test_silent_mode_prints_nothing() {
    let file = create_temp_file(FAMILY.as_bytes(), ".ged");
    gedcom2xml()
        .arg("-s")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_output_file() {
    let file = create_temp_file(FAMILY.as_bytes(), ".ged");
    let out = tempfile::Builder::new().suffix(".xml").tempfile().unwrap();
    gedcom2xml()
        .arg("-o")
        .arg(out.path())
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    let xml = fs::read_to_string(out.path()).unwrap();
    assert!(xml.contains("<FAMS REF=\"F1\">"));
}

#[test]
fn test_xml_input_back_to_gedcom() {
    let file = create_temp_file(
        br#"<GED><INDI ID="I1"><NAME>Ann /Smith/</NAME></INDI></GED>"#,
        ".xml",
    );
    gedcom2xml()
        .arg("--to-gedcom")
        .arg(file.path())
        .assert()
        .success()
        .stdout("0 INDI @I1@\n1 NAME Ann /Smith/\n");
}

#[test]
fn test_gedcom_to_gedcom_normalizes() {
    let file = create_temp_file(b"// comment\r\n0 HEAD\r\n1 SOUR demo\r\n", ".ged");
    gedcom2xml()
        .arg("--to-gedcom")
        .arg(file.path())
        .assert()
        .success()
        .stdout("0 HEAD\n1 SOUR demo\n");
}

#[test]
fn test_syntax_error_fails_with_location() {
    let file = create_temp_file(b"0 HEAD\n1 SO-UR demo\n", ".ged");
    gedcom2xml()
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("BAD TAG CHAR at line 2, column 4"));
}

#[test]
fn test_strict_mode_rejects_comments() {
    let file = create_temp_file(b"// comment\n0 HEAD\n", ".ged");
    gedcom2xml().arg("-s").arg(file.path()).assert().success();
    gedcom2xml()
        .arg("-s")
        .arg("--strict")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("BAD LEVEL CHAR"));
}

#[test]
fn test_latin1_encoding() {
    let file = create_temp_file(b"0 NOTE caf\xE9\n", ".ged");
    gedcom2xml()
        .args(["--compact", "--encoding", "latin1"])
        .arg(file.path())
        .assert()
        .success()
        .stdout("<GED><NOTE>café</NOTE></GED>");
}

#[test]
fn test_unknown_encoding_rejected() {
    let file = create_temp_file(FAMILY.as_bytes(), ".ged");
    gedcom2xml()
        .args(["--encoding", "ebcdic"])
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported encoding"));
}

#[test]
fn test_trace_logs_to_stderr() {
    let file = create_temp_file(b"0 HEAD\n", ".ged");
    gedcom2xml()
        .args(["--compact", "--trace"])
        .arg(file.path())
        .env_remove("RUST_LOG")
        .assert()
        .success()
        .stdout("<GED><HEAD></HEAD></GED>")
        .stderr(predicate::str::contains("start_element"));
}
