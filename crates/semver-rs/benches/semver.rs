use std::str::FromStr;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use semver_rs::{Range, Version};

fn bench_parse_version(c: &mut Criterion) {
    let versions = [
        "0.0.0",
        "1.2.3",
        "10.20.30",
        "1.2.3-beta.1",
        "2.4.0+build.5",
        "1.0.0-alpha.beta.2+build.5",
        "2020.4.20",
        "1.2.3----RC-SNAPSHOT.12.9.1--.12+788",
    ];

    c.bench_function("parse_version", |b| {
        b.iter(|| {
            for version in versions {
                black_box(Version::from_str(black_box(version)).ok());
            }
        })
    });
}

fn bench_compare(c: &mut Criterion) {
    let pairs: Vec<(Version, Version)> = [
        ("1.2.3", "1.2.4"),
        ("2.4.0-alpha", "2.4.0"),
        ("1.2.3+build.1", "1.2.3+build.2"),
        ("1.0.0-alpha.1", "1.0.0-alpha.beta"),
        ("1.0.0-beta.2", "1.0.0-beta.11"),
    ]
    .iter()
    .map(|(left, right)| {
        (
            Version::from_str(left).unwrap(),
            Version::from_str(right).unwrap(),
        )
    })
    .collect();

    c.bench_function("compare_versions", |b| {
        b.iter(|| {
            for (left, right) in &pairs {
                black_box(black_box(left).cmp(black_box(right)));
            }
        })
    });
}

fn bench_parse_range(c: &mut Criterion) {
    let ranges = [
        ">=1.2.3 <2.0.0",
        "^1.2.3 || ~2.4",
        "1.2.* || 2.*",
        "1.2.3 - 2.0.0",
        ">1.0 <3.0 || >=4.0",
        "~1.2.1 >=1.2.3",
    ];

    c.bench_function("parse_range", |b| {
        b.iter(|| {
            for range in ranges {
                black_box(Range::from_str(black_box(range)).ok());
            }
        })
    });
}

fn bench_satisfies(c: &mut Criterion) {
    let cases: Vec<(Version, Range)> = [
        ("1.2.3", "^1.2.0"),
        ("1.2.3-beta", "^1.2.3"),
        ("2.4.5", "~2.4"),
        ("1.2.3", ">=1.2.3 <2.0.0"),
        ("1.9999.9999", "<2.0.0"),
        ("1.2.3", "1.2.* || 2.*"),
    ]
    .iter()
    .map(|(version, range)| {
        (
            Version::from_str(version).unwrap(),
            Range::from_str(range).unwrap(),
        )
    })
    .collect();

    c.bench_function("range_contains", |b| {
        b.iter(|| {
            for (version, range) in &cases {
                black_box(black_box(range).contains(black_box(version)));
            }
        })
    });
}

fn bench_intersects(c: &mut Criterion) {
    let pairs: Vec<(Range, Range)> = [
        (">=1.0.0 <2.0.0", ">=1.2.3 <1.2.4"),
        (">=1.0.0 <1.2.3", ">=1.2.3 <2.0.0"),
        ("^1.2.3 || ~2.4", "1.x"),
    ]
    .iter()
    .map(|(left, right)| {
        (
            Range::from_str(left).unwrap(),
            Range::from_str(right).unwrap(),
        )
    })
    .collect();

    c.bench_function("range_intersects", |b| {
        b.iter(|| {
            for (left, right) in &pairs {
                black_box(black_box(left).intersects(black_box(right)));
            }
        })
    });
}

criterion_group!(
    benches,
    bench_parse_version,
    bench_compare,
    bench_parse_range,
    bench_satisfies,
    bench_intersects
);
criterion_main!(benches);
