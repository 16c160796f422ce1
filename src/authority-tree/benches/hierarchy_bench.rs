//! Authority hierarchy benchmarks
//!
//! Measures the full analysis pipeline and tree rendering for role counts in
//! the range seen in practice (tens of authorities) and beyond.

use cretoai_authority_tree::{report, Hierarchy, ReportOptions, RoleSet};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

/// Layered role set: role `i` holds keys `0..=i % 10` of its group plus a
/// group-specific key, giving long subset chains and many siblings
fn create_test_roles(count: usize) -> RoleSet {
    let mut mapping = vec![(
        "ROLE_ADMIN".to_string(),
        (0..count)
            .map(|i| format!("key_{}", i))
            .chain((0..=count / 10).map(|g| format!("group_{}", g)))
            .collect::<Vec<_>>(),
    )];

    for i in 0..count {
        let group = i / 10;
        let keys = (0..=i % 10)
            .map(|k| format!("key_{}", group * 10 + k))
            .chain(std::iter::once(format!("group_{}", group)))
            .collect::<Vec<_>>();
        mapping.push((format!("ROLE_{}", i), keys));
    }

    RoleSet::normalize(mapping)
}

fn bench_analyze(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze");

    for role_count in [10, 50, 200].iter() {
        let roles = create_test_roles(*role_count);
        group.bench_with_input(BenchmarkId::new("roles", role_count), &roles, |b, roles| {
            b.iter(|| Hierarchy::analyze(black_box(roles)).unwrap());
        });
    }

    group.finish();
}

fn bench_report(c: &mut Criterion) {
    let mut group = c.benchmark_group("report");
    let options = ReportOptions::default().with_diff(true);

    for role_count in [10, 50, 200].iter() {
        let roles = create_test_roles(*role_count);
        group.bench_with_input(BenchmarkId::new("roles", role_count), &roles, |b, roles| {
            b.iter(|| report(black_box(roles), &options).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_analyze, bench_report);
criterion_main!(benches);
