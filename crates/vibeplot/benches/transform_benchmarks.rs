//! Transform and figure building benchmarks.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use vibeplot::{
    DataTable, Expression, FigureBuilder, LoadedFile, PlotConfig, SeriesConfig, Transform,
    Workbook,
};

fn stick_series(len: usize) -> Vec<f64> {
    (0..len)
        .map(|i| ((i as f64) * 0.001).sin() * 100.0)
        .collect()
}

fn bench_presets(c: &mut Criterion) {
    let mut group = c.benchmark_group("preset");
    let series = stick_series(100_000);
    group.throughput(Throughput::Elements(series.len() as u64));

    for transform in Transform::catalog().iter() {
        group.bench_with_input(
            BenchmarkId::new("apply", transform.name()),
            transform,
            |b, transform| b.iter(|| black_box(transform.apply(black_box(&series)).unwrap())),
        );
    }

    group.finish();
}

fn bench_expressions(c: &mut Criterion) {
    let mut group = c.benchmark_group("expression");
    let series = stick_series(100_000);
    group.throughput(Throughput::Elements(series.len() as u64));

    let sources = [
        ("linear", "x * 0.01 + 3"),
        ("numpy", "np.log(np.abs(x) + 1)"),
        ("nested", "clamp(scale(x, -100, 100, 0, 1) ** 2, 0, 1)"),
    ];

    for (name, source) in sources.iter() {
        group.bench_with_input(BenchmarkId::new("parse", name), source, |b, source| {
            b.iter(|| black_box(Expression::parse(black_box(source)).unwrap()))
        });

        let expr = Expression::parse(source).unwrap();
        group.bench_with_input(BenchmarkId::new("apply", name), &expr, |b, expr| {
            b.iter(|| black_box(expr.apply(black_box(&series)).unwrap()))
        });
    }

    group.finish();
}

fn bench_figure_build(c: &mut Criterion) {
    let rows = 10_000;
    let table = DataTable::new(
        vec!["time".to_string(), "ch1".to_string(), "ch2".to_string()],
        (0..rows)
            .map(|i| {
                vec![
                    i.to_string(),
                    format!("{:.2}", ((i as f64) * 0.01).sin() * 100.0),
                    format!("{:.2}", ((i as f64) * 0.01).cos() * 100.0),
                ]
            })
            .collect(),
        b',',
    );

    let mut workbook = Workbook::new();
    workbook.insert(LoadedFile::from_table("log.csv", table));

    let config = PlotConfig::new()
        .with_series(SeriesConfig::new("log.csv", "ch1").with_transform(Transform::ScaleThrottle))
        .with_series(SeriesConfig::new("log.csv", "ch2").with_transform(Transform::LeftElevon));

    c.bench_function("figure_build_10k", |b| {
        b.iter(|| black_box(FigureBuilder::new().build(&workbook, &config)))
    });
}

criterion_group!(benches, bench_presets, bench_expressions, bench_figure_build);
criterion_main!(benches);
