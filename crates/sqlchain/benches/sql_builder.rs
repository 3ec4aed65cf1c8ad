use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use sqlchain::{Builder, Condition, JoinKind, Record};

/// Build a SELECT with `n` columns and `n` equality conditions:
/// SELECT `col0`,`col1`,... FROM `t` WHERE `col0` = ? AND `col1` = ? ...
fn build_select(n: usize) -> Builder {
    let columns: Vec<String> = (0..n).map(|i| format!("col{i}")).collect();
    let mut b = Builder::new("t").select(columns);
    for i in 0..n {
        b = b.where_eq(format!("col{i}"), i as i64);
    }
    b
}

fn bench_to_sql(c: &mut Criterion) {
    let mut group = c.benchmark_group("sql_builder/to_sql");

    for n in [1, 5, 10, 50, 100] {
        let b = build_select(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &b, |bench, b| {
            bench.iter(|| black_box(b.clone().to_sql()));
        });
    }

    group.finish();
}

fn bench_build_and_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("sql_builder/build_and_render");

    for n in [1, 5, 10, 50, 100] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |bench, &n| {
            bench.iter(|| {
                let mut b = build_select(n);
                black_box(b.to_sql())
            });
        });
    }

    group.finish();
}

fn bench_where_in(c: &mut Criterion) {
    let mut group = c.benchmark_group("sql_builder/where_in");

    for n in [5, 20, 100, 500] {
        let values: Vec<i64> = (0..n).collect();
        group.bench_with_input(BenchmarkId::from_parameter(n), &values, |bench, values| {
            bench.iter(|| {
                let mut b = Builder::new("t").where_in("id", values.iter().copied());
                black_box(b.to_sql())
            });
        });
    }

    group.finish();
}

fn bench_condition_compile(c: &mut Criterion) {
    let mut group = c.benchmark_group("sql_builder/condition_compile");

    for n in [1, 5, 10, 50] {
        let conditions: Vec<Condition> = (0..n)
            .map(|i| Condition::eq(format!("col{i}"), i as i64))
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(n), &conditions, |bench, conds| {
            bench.iter(|| {
                let mut b = Builder::new("t");
                for cond in conds.iter().cloned() {
                    b = b.where_cond(cond);
                }
                black_box(b.to_sql())
            });
        });
    }

    group.finish();
}

fn bench_sub_queries(c: &mut Criterion) {
    c.bench_function("sql_builder/sub_queries", |bench| {
        bench.iter(|| {
            let mut b = Builder::new("user")
                .alias("u")
                .table_sub(|m| m.table("m_users").select("sex").group("sex"))
                .join_sub(
                    JoinKind::Inner,
                    |j| j.table("contacts").where_op("id", ">", 10),
                    "ON tmp2.user_id = u.user_id",
                )
                .where_in_sub("id", Builder::new("vip").select("user_id"));
            black_box(b.to_sql())
        });
    });
}

fn bench_insert_rows(c: &mut Criterion) {
    let mut group = c.benchmark_group("sql_builder/insert_rows");

    for n in [1, 10, 100, 1000] {
        let rows: Vec<Record> = (0..n)
            .map(|i| Record::new().set("name", format!("user{i}")).set("age", i))
            .collect();
        group.bench_with_input(BenchmarkId::from_parameter(n), &rows, |bench, rows| {
            bench.iter(|| black_box(Builder::new("user").insert(rows.clone())));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_to_sql,
    bench_build_and_render,
    bench_where_in,
    bench_condition_compile,
    bench_sub_queries,
    bench_insert_rows
);
criterion_main!(benches);
