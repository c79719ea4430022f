//! Formula decoding and file loading benchmarks.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use std::io::Write;
use tempfile::NamedTempFile;
use vibeplot::{Parser, VibeplotConfig, Workbook, decode};

/// Generate a telemetry log where every row carries both formula shapes.
fn generate_log(rows: usize) -> String {
    let mut data = String::from("time,stamp,alt,roll\n");
    for row in 0..rows {
        data.push_str(&format!(
            "{},\"=TEXT({}/86400 + 25569, \"\"ddd dd mmm yyyy hh:mm:ss\"\")&\"\".\"\"&{}\",\"={}&\"\".\"\"&TEXT({},\"\"000000\"\")\",{:.3}\n",
            row,
            1_700_000_000 + row,
            row % 1000,
            row / 10,
            row % 1_000_000,
            (row as f64 * 0.01).sin()
        ));
    }
    data
}

fn bench_decode_cells(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_cell");

    let cells = [
        ("plain", "1234.5678"),
        (
            "timestamp",
            "=TEXT(1700000000/86400 + 25569, \"ddd dd mmm yyyy hh:mm:ss\")&\".\"&250",
        ),
        ("concat", "=123&\".\"&TEXT(7,\"000000\")"),
        ("malformed", "=TEXT(garbage"),
    ];

    for (name, cell) in cells.iter() {
        group.bench_with_input(BenchmarkId::new("shape", name), cell, |b, cell| {
            b.iter(|| black_box(decode(black_box(cell))))
        });
    }

    group.finish();
}

fn bench_decode_table(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_table");

    for rows in [100, 1_000, 10_000].iter() {
        let data = generate_log(*rows);
        let table = Parser::new().parse_bytes(data.as_bytes(), b',').unwrap();

        group.throughput(Throughput::Elements((*rows * 4) as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &table, |b, table| {
            b.iter_with_setup(|| table.clone(), |mut table| black_box(table.decode_formulas()))
        });
    }

    group.finish();
}

fn bench_workbook_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("workbook_load");

    let files: Vec<NamedTempFile> = (0..8)
        .map(|_| {
            let mut temp = NamedTempFile::with_suffix(".csv").unwrap();
            temp.write_all(generate_log(2_000).as_bytes()).unwrap();
            temp
        })
        .collect();
    let paths: Vec<_> = files.iter().map(|f| f.path().to_path_buf()).collect();

    for workers in [1, 2, 4, 8].iter() {
        let config = VibeplotConfig {
            workers: *workers,
            ..VibeplotConfig::default()
        };
        group.bench_with_input(BenchmarkId::new("workers", workers), &config, |b, config| {
            b.iter(|| black_box(Workbook::load(&paths, config).unwrap()))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_decode_cells,
    bench_decode_table,
    bench_workbook_load
);
criterion_main!(benches);
