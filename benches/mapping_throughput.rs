//! Mapping throughput benchmarks
//!
//! Measures, over generated catalogs of 1 to 1000 books:
//! - rule inference from a sample document
//! - conversion with a fixed rule set
//! - the tree write engine on its own
//!
//! Run benchmarks: `cargo bench --bench mapping_throughput`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use jsonize::{Jsonizer, parse_path, put_in_place};
use serde_json::{Value, json};
use std::fmt::Write;
use std::hint::black_box;

/// Generate a catalog document with `count` books
fn generate_catalog(count: usize) -> String {
    let mut xml = String::from(r#"<?xml version="1.0"?><catalog xmlns:p="urn:price">"#);
    for i in 0..count {
        let _ = write!(
            xml,
            r#"<book id="bk{i}"><title>Book {i}</title><author>Author {}</author><p:price currency="EUR">{}.95</p:price></book>"#,
            i % 17,
            i % 50
        );
    }
    xml.push_str("</catalog>");
    xml
}

/// Benchmark inferring rules from documents of growing size
fn benchmark_infer_map(c: &mut Criterion) {
    let mut group = c.benchmark_group("infer_map");
    let jsonizer = Jsonizer::new();

    for count in [1, 10, 100, 1000] {
        group.throughput(Throughput::Elements(count as u64));
        let xml = generate_catalog(count);

        group.bench_with_input(BenchmarkId::new("books", count), &xml, |b, xml| {
            b.iter(|| jsonizer.infer_map(black_box(xml)).expect("Failed to infer rules"));
        });
    }

    group.finish();
}

/// Benchmark converting documents with rules inferred once up front
fn benchmark_convert(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert");
    let jsonizer = Jsonizer::builder().with_value_marker("").build();
    let rules = jsonizer.infer_map(&generate_catalog(2)).expect("Failed to infer rules");

    for count in [1, 10, 100, 1000] {
        group.throughput(Throughput::Elements(count as u64));
        let xml = generate_catalog(count);

        group.bench_with_input(BenchmarkId::new("books", count), &xml, |b, xml| {
            b.iter(|| jsonizer.convert(black_box(xml), &rules).expect("Failed to convert"));
        });
    }

    group.finish();
}

/// Benchmark the write engine appending records to a growing array
fn benchmark_tree_writes(c: &mut Criterion) {
    let mut group = c.benchmark_group("tree_writes");
    let path = parse_path("$.data.records[-1]").expect("Failed to parse path");

    for count in [10, 100, 1000] {
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("appends", count), &count, |b, &count| {
            b.iter(|| {
                let mut tree = Value::Null;
                for i in 0..count {
                    put_in_place(json!({"id": i, "name": "record"}), &path, &mut tree).expect("Failed to write");
                }
                tree
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_infer_map, benchmark_convert, benchmark_tree_writes);
criterion_main!(benches);
