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

//! Lexical layer: character classes, decoding, scanning and tokenizing.

pub mod char_class;
pub mod decoder;
pub mod scanner;
pub mod span;
pub mod tokenizer;

pub use char_class::{is_level_char, is_line_value_char, is_tag_char, is_xref_char};
pub use decoder::{CharDecoder, Encoding, Latin1Decoder, Utf8Decoder};
pub use scanner::{Scanner, ScannerConfig, END_OF_INPUT};
pub use span::SourcePos;
pub use tokenizer::{Token, TokenKind, Tokenizer, MAX_LEVEL_DIGITS};
