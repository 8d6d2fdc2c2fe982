use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use sqlforge::{SelectBuilder, Table};

/// Build a SELECT with `n` joins and `n` scanned parameters.
fn build_select(n: usize) -> SelectBuilder {
    let mut qb = SelectBuilder::new();
    qb.from(Table::aliased("dbo.root", "t0"));
    for i in 1..=n {
        let table = Table::aliased(format!("dbo.t{i}"), format!("t{i}"));
        let on = format!("t{}.id = t{}.parent_id AND t{}.kind = @kind{}", i - 1, i, i, i);
        qb.inner_join(table, &on);
    }
    qb
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("select/render");

    for n in [1, 5, 10, 50] {
        let qb = build_select(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &qb, |b, qb| {
            b.iter(|| black_box(qb.sql_string().unwrap()));
        });
    }

    group.finish();
}

fn bench_build_and_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("select/build_and_render");

    for n in [1, 5, 10, 50] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                let qb = build_select(n);
                black_box(qb.sql_string().unwrap());
            });
        });
    }

    group.finish();
}

fn bench_parameters(c: &mut Criterion) {
    let mut group = c.benchmark_group("select/parameters");

    for n in [1, 10, 50] {
        let qb = build_select(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &qb, |b, qb| {
            b.iter(|| black_box(qb.parameters()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_render, bench_build_and_render, bench_parameters);
criterion_main!(benches);
