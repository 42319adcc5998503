// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the textwerk-outline crate: normalization and
// outline building on a synthetic multi-section document.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use textwerk_outline::{build_outline, normalize_lines};

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// Generate a document with `sections` numbered sections, each carrying a
/// label line, a short bullet run, and a paragraph — the line mix the
/// classifier sees on real extractions.
fn synthetic_document(sections: usize) -> String {
    let mut text = String::new();
    for n in 1..=sections {
        text.push_str(&format!("{n}. Section title number {n}\n"));
        text.push_str("Summary: a short labelled overview line\n");
        text.push_str("* first bullet item\n");
        text.push_str("* second bullet item\n");
        text.push_str("- third bullet item\n");
        text.push_str("A trailing paragraph that closes out the section.\n");
    }
    text
}

fn bench_normalize_lines(c: &mut Criterion) {
    let raw = synthetic_document(200).replace(' ', "  \t");

    c.bench_function("normalize_lines (200 sections)", |b| {
        b.iter(|| black_box(normalize_lines(black_box(&raw))));
    });
}

fn bench_build_outline(c: &mut Criterion) {
    let text = synthetic_document(200);

    c.bench_function("build_outline (200 sections)", |b| {
        b.iter(|| black_box(build_outline(black_box(&text))));
    });
}

criterion_group!(benches, bench_normalize_lines, bench_build_outline);
criterion_main!(benches);
