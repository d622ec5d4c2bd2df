//! Loader performance benchmarks.
//!
//! Measures load time across file sizes and column counts.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use hygiene::Loader;
use std::io::Write;
use tempfile::NamedTempFile;

/// Generate synthetic CSV data with the specified number of rows and columns.
fn generate_csv_data(rows: usize, cols: usize) -> String {
    let mut data = String::new();

    let header: Vec<String> = (0..cols).map(|i| format!("column_{}", i + 1)).collect();
    data.push_str(&header.join(","));
    data.push('\n');

    for row in 0..rows {
        let fields: Vec<String> = (0..cols)
            .map(|col| match col % 4 {
                0 => format!("{}", row),
                1 => format!("{:.2}", row as f64 * 1.5),
                2 => (if row % 2 == 0 { "true" } else { "false" }).to_string(),
                // Every seventh text field is empty and loads as missing
                _ if row % 7 == 0 => String::new(),
                _ => format!("Category_{}", row % 10),
            })
            .collect();
        data.push_str(&fields.join(","));
        data.push('\n');
    }

    data
}

fn write_temp(data: &str) -> NamedTempFile {
    let mut temp = NamedTempFile::with_suffix(".csv").unwrap();
    temp.write_all(data.as_bytes()).unwrap();
    temp
}

/// Benchmark loading CSV files of various sizes.
fn bench_load_csv(c: &mut Criterion) {
    let mut group = c.benchmark_group("load_csv");

    for rows in [100, 1_000, 10_000].iter() {
        let data = generate_csv_data(*rows, 10);
        let temp = write_temp(&data);

        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &temp, |b, temp| {
            let loader = Loader::new();
            b.iter(|| black_box(loader.load(temp.path()).unwrap()))
        });
    }

    group.finish();
}

/// Benchmark loading with varying column counts.
fn bench_load_column_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("load_column_scaling");

    let rows = 1_000;
    for cols in [5, 10, 20, 50].iter() {
        let data = generate_csv_data(rows, *cols);

        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::new("cols", cols), &data, |b, data| {
            let loader = Loader::new();
            b.iter(|| black_box(loader.parse_str(data).unwrap()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_load_csv, bench_load_column_scaling);
criterion_main!(benches);
