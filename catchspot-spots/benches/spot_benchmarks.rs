//! Criterion benchmarks for spot clustering and leaderboards.
//!
//! Measures query time across candidate set sizes (50, 100, 200 catches),
//! the range the caller-side row limit keeps requests in.
//!
//! Run benchmarks with:
//! ```bash
//! cargo bench --package catchspot-spots
//! ```

// Criterion macros generate code that triggers missing_docs warnings.
#![allow(missing_docs, reason = "Criterion macros generate undocumented code")]

use std::hint::black_box;

use catchspot_core::RTreeCatchIndex;
use catchspot_spots::{
    FavoriteSpotQuery, HotSpotQuery, LeaderboardCategory, LeaderboardQuery, favorite_spots,
    hot_spots, leaderboard, leaderboard_in,
};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use geo::Coord;


use bench_support::{AREA_CENTRE, BENCHMARK_SEED, generate_catches};

/// Candidate set sizes to benchmark.
const PROBLEM_SIZES: &[usize] = &[50, 100, 200];

fn throughput(size: usize) -> Throughput {
    Throughput::Elements(u64::try_from(size).unwrap_or(u64::MAX))
}

fn bench_clustering(c: &mut Criterion) {
    let mut group = c.benchmark_group("clustering");
    for &size in PROBLEM_SIZES {
        let catches = generate_catches(size, BENCHMARK_SEED);
        group.throughput(throughput(size));
        group.bench_with_input(BenchmarkId::new("favorite_spots", size), &catches, |b, input| {
            b.iter(|| favorite_spots(black_box(input), &FavoriteSpotQuery::default()));
        });
        group.bench_with_input(BenchmarkId::new("hot_spots", size), &catches, |b, input| {
            b.iter(|| hot_spots(black_box(input), &HotSpotQuery::default()));
        });
    }
    group.finish();
}

fn bench_leaderboard(c: &mut Criterion) {
    let mut group = c.benchmark_group("leaderboard");
    let (latitude, longitude) = AREA_CENTRE;
    let query = LeaderboardQuery::new(
        Coord {
            x: longitude,
            y: latitude,
        },
        LeaderboardCategory::HighestTotalScore,
    )
    .with_radius(5_000.0);
    for &size in PROBLEM_SIZES {
        let catches = generate_catches(size, BENCHMARK_SEED);
        let index = RTreeCatchIndex::new(&catches);
        group.throughput(throughput(size));
        group.bench_with_input(BenchmarkId::new("linear_scan", size), &catches, |b, input| {
            b.iter(|| leaderboard(black_box(input), &query));
        });
        group.bench_with_input(BenchmarkId::new("rtree", size), &index, |b, input| {
            b.iter(|| leaderboard_in(black_box(input), &query));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_clustering, bench_leaderboard);
criterion_main!(benches);
