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

//! Character classes of the GEDCOM line grammar.
//!
//! ASCII characters are looked up in a table built at compile time.
//! Everything at or above U+0080 is accepted in cross-references and
//! line values, except the noncharacter U+FFFF.

const LEVEL: u8 = 1 << 0;
const TAG: u8 = 1 << 1;
const XREF: u8 = 1 << 2;
const LINE_VALUE: u8 = 1 << 3;

/// Inclusive ASCII ranges allowed in cross-references besides `[A-Za-z0-9_]`.
const XREF_PUNCTUATION: &[(u8, u8)] = &[
    (b' ', b'#'),
    (b'$', b'/'),
    (b':', b'@'),
    (b'[', b'^'),
    (b'`', b'`'),
    (b'{', b'~'),
];

static ASCII_CLASSES: [u8; 128] = build_ascii_classes();

const fn build_ascii_classes() -> [u8; 128] {
    let mut table = [0u8; 128];
    let mut index = 0;
    while index < 128 {
        let byte = index as u8;
        let mut class = 0;

        if byte.is_ascii_digit() {
            class |= LEVEL;
        }
        if byte.is_ascii_alphanumeric() || byte == b'_' {
            class |= TAG | XREF | LINE_VALUE;
        }

        let mut range = 0;
        while range < XREF_PUNCTUATION.len() {
            let (low, high) = XREF_PUNCTUATION[range];
            if byte >= low && byte <= high {
                class |= XREF | LINE_VALUE;
            }
            range += 1;
        }

        if byte == b'\t' {
            class |= LINE_VALUE;
        }

        table[index] = class;
        index += 1;
    }
    table
}

#[inline]
fn class_of(c: char) -> u8 {
    if c.is_ascii() {
        ASCII_CLASSES[c as usize]
    } else if c == '\u{FFFF}' {
        0
    } else {
        XREF | LINE_VALUE
    }
}

/// Returns true for the decimal digits that make up a level number.
#[inline]
pub fn is_level_char(c: char) -> bool {
    class_of(c) & LEVEL != 0
}

/// Returns true for characters allowed in a tag: ASCII letters, digits and `_`.
#[inline]
pub fn is_tag_char(c: char) -> bool {
    class_of(c) & TAG != 0
}

/// Returns true for characters allowed inside `@...@`.
#[inline]
pub fn is_xref_char(c: char) -> bool {
    class_of(c) & XREF != 0
}

/// Returns true for characters allowed in a line value.
///
/// This is the cross-reference set plus horizontal tab.
#[inline]
pub fn is_line_value_char(c: char) -> bool {
    class_of(c) & LINE_VALUE != 0
}
