//! Route lookup benchmarks.
//!
//! Run with: `cargo bench -p rou-router`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use http::Method;
use rou_router::{match_path, RouteTable};

fn build_table(num_routes: usize) -> RouteTable<String> {
    let mut table = RouteTable::new();

    for i in 0..num_routes / 3 {
        table.register(Method::GET, format!("/api/v1/resource{i}"), format!("list{i}"));
        table.register(Method::GET, format!("/api/v1/resource{i}/:id"), format!("get{i}"));
        table.register(
            Method::POST,
            format!("/api/v1/org/:org/resource{i}/:id"),
            format!("create{i}"),
        );
    }

    table
}

fn bench_match_path(c: &mut Criterion) {
    c.bench_function("match_path_params", |b| {
        b.iter(|| {
            black_box(match_path(
                black_box("/users/:id/friends/:name"),
                black_box("/users/10/friends/melony"),
            ))
        });
    });
}

fn bench_literal_find(c: &mut Criterion) {
    let table = build_table(99);

    c.bench_function("literal_find", |b| {
        b.iter(|| black_box(table.find(&Method::GET, "/api/v1/resource20")));
    });
}

fn bench_param_find(c: &mut Criterion) {
    let table = build_table(99);

    c.bench_function("param_find", |b| {
        b.iter(|| black_box(table.find(&Method::GET, "/api/v1/resource20/12345")));
    });
}

fn bench_method_not_allowed(c: &mut Criterion) {
    let table = build_table(99);

    c.bench_function("method_not_allowed", |b| {
        b.iter(|| {
            let path = "/api/v1/org/acme/resource10/1";
            let found = table.find(&Method::GET, path).is_some();
            black_box(found || table.path_exists(path))
        });
    });
}

fn bench_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("scaling");

    for num_routes in [12, 48, 96, 480, 960] {
        let table = build_table(num_routes);

        group.bench_with_input(
            BenchmarkId::new("last_route", num_routes),
            &num_routes,
            |b, &n| {
                let path = format!("/api/v1/resource{}/12345", n / 3 - 1);
                b.iter(|| black_box(table.find(&Method::GET, &path)));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_match_path,
    bench_literal_find,
    bench_param_find,
    bench_method_not_allowed,
    bench_scaling
);
criterion_main!(benches);
