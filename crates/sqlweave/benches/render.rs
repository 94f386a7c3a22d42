use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use sqlweave::{PostgreSqlQuery, QueryBuilder, Table, TermOps, Value, values};

/// SELECT with `n` projected columns and `n` AND-ed predicates.
fn build_select(n: usize) -> QueryBuilder {
    let t = Table::new("t");
    let mut qb = PostgreSqlQuery::from_(&t).select((0..n).map(|i| format!("col{i}")));
    for i in 0..n {
        qb = qb.where_(t.field(format!("col{i}")).eq(i as i64));
    }
    qb
}

fn bench_to_sql(c: &mut Criterion) {
    let mut group = c.benchmark_group("render/select_to_sql");

    for n in [1, 5, 10, 50, 100] {
        let qb = build_select(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &qb, |b, qb| {
            b.iter(|| black_box(qb.to_sql()));
        });
    }

    group.finish();
}

fn bench_build_and_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render/select_build_and_render");

    for n in [1, 5, 10, 50, 100] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| black_box(build_select(n).to_sql()));
        });
    }

    group.finish();
}

fn bench_insert_rows(c: &mut Criterion) {
    let mut group = c.benchmark_group("render/insert_rows");
    let t = Table::new("t");

    for n in [10, 100, 1000] {
        let mut qb = PostgreSqlQuery::into(&t).columns(["id", "name", "tags"]);
        for i in 0..n {
            qb = qb.insert(values![i as i64, format!("name{i}"), values!["a", "b"]]);
        }
        group.bench_with_input(BenchmarkId::from_parameter(n), &qb, |b, qb| {
            b.iter(|| black_box(qb.to_sql()));
        });
    }

    group.finish();
}

fn bench_json_document(c: &mut Criterion) {
    let mut group = c.benchmark_group("render/json_contains");
    let t = Table::new("t");

    for n in [1, 10, 100] {
        let doc = Value::mapping((0..n).map(|i| (format!("k{i}"), Value::from(i as i64))));
        let qb = PostgreSqlQuery::from_(&t)
            .select(["*"])
            .where_(t.field("doc").contains(doc));
        group.bench_with_input(BenchmarkId::from_parameter(n), &qb, |b, qb| {
            b.iter(|| black_box(qb.to_sql()));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_to_sql,
    bench_build_and_render,
    bench_insert_rows,
    bench_json_document
);
criterion_main!(benches);
