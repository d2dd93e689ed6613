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

//! Throughput of reading and rewriting GEDCOM.

use std::io::Cursor;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use gedcom_stream::{copy_nodes, GedcomReader, GedcomResult, GedcomWriter, NodeKind};

fn generate(people: usize) -> String {
    let mut out = String::from("0 HEAD\n1 SOUR bench\n1 CHAR UTF-8\n");
    for i in 0..people {
        out.push_str(&format!(
            "0 @I{i}@ INDI\n1 NAME Person {i} /Family/\n1 BIRT\n2 DATE 1 JAN 1900\n2 PLAC Somewhere\n1 FAMS @F{i}@\n"
        ));
    }
    out.push_str("0 TRLR\n");
    out
}

fn bench_read(c: &mut Criterion) {
    let mut group = c.benchmark_group("read");
    for people in [100, 10_000] {
        let doc = generate(people);
        group.throughput(Throughput::Bytes(doc.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(people), &doc, |b, doc| {
            b.iter(|| {
                let mut reader = GedcomReader::new(Cursor::new(doc.as_bytes())).unwrap();
                let mut elements = 0usize;
                while reader.read().unwrap() {
                    if reader.node_kind() == NodeKind::Element {
                        elements += 1;
                    }
                }
                black_box(elements)
            })
        });
    }
    group.finish();
}

fn bench_roundtrip(c: &mut Criterion) {
    let doc = generate(10_000);
    let mut group = c.benchmark_group("roundtrip");
    group.throughput(Throughput::Bytes(doc.len() as u64));
    group.bench_function("gedcom_to_gedcom", |b| {
        b.iter(|| {
            let mut reader = GedcomReader::new(Cursor::new(doc.as_bytes())).unwrap();
            let mut writer = GedcomWriter::new(Vec::with_capacity(doc.len()));
            let copied: GedcomResult<()> = copy_nodes(&mut reader, &mut writer);
            copied.unwrap();
            black_box(writer.into_inner().unwrap())
        })
    });
    group.finish();
}

criterion_group!(benches, bench_read, bench_roundtrip);
criterion_main!(benches);
