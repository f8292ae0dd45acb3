//! Benchmarks for marktex translation performance.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// Creates a synthetic deck with the given number of sections.
fn create_test_deck(section_count: usize) -> String {
    let mut deck = String::new();

    for i in 0..section_count {
        deck.push_str(&format!("# Part {}\n\n", i + 1));

        deck.push_str(&format!("## Overview {}\n", i + 1));
        deck.push_str("Costs **50%** of the *budget*, see [docs](http://example.org/#top).\n");
        deck.push_str("- first point with `inline_code()`\n");
        deck.push_str("...\n");
        deck.push_str("- second point with $$(a+b)/2$$\n");
        deck.push_str("---\n");
        deck.push_str("{Continued}(same title) after a frame break\n\n");

        deck.push_str("## Numbers\n\n");
        deck.push_str("| Name | Value | Note |\n");
        deck.push_str("|:-----|------:|:----:|\n");
        for row in 0..5 {
            deck.push_str(&format!("| row {} | {} | #{} |\n", row, row * 10, row));
        }
        deck.push('\n');

        deck.push_str("## Listing\n\n");
        deck.push_str("  fn main() {\n");
        deck.push_str("      println!(\"# not a heading\");\n");
        deck.push_str("  }\n\n");

        deck.push_str("## Math\n$$\nx = log n\ny = a*b/c\n$$\n\n");
        deck.push_str("## Break\n\n\n");
    }

    deck
}

/// Benchmark full translation at various sizes.
fn bench_translate(c: &mut Criterion) {
    let mut group = c.benchmark_group("translate");

    for section_count in [1, 10, 50].iter() {
        let deck = create_test_deck(*section_count);
        let translator = marktex::Marktex::new().offline();

        group.bench_function(format!("{}_sections", section_count), |b| {
            b.iter(|| translator.translate(black_box(&deck)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark parsing alone.
fn bench_parse(c: &mut Criterion) {
    let deck = create_test_deck(10);
    let options = marktex::ParseOptions::new().offline();

    c.bench_function("parse_10_sections", |b| {
        b.iter(|| marktex::parser::parse_document(black_box(&deck), &options).unwrap());
    });
}

/// Benchmark the math rewriting pass.
fn bench_math_rewrite(c: &mut Criterion) {
    let source = "(a+b)/[c*d] + log x - \\left( y \\right) / 2";

    c.bench_function("math_rewrite", |b| {
        b.iter(|| marktex::render::math::rewrite(black_box(source)));
    });
}

criterion_group!(benches, bench_translate, bench_parse, bench_math_rewrite);
criterion_main!(benches);
