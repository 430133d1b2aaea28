//! Candle aggregation benchmarks: in-process aggregation versus SQL.
//!
//! Run with: `cargo bench --package tickstore-bench --bench aggregate_benchmark`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use tempfile::TempDir;
use tickstore_bench::SyntheticTicks;
use tickstore_lib::{AggregationMode, StoreConfig, TickStore, TimeRange, aggregate_candles};

fn aggregate_in_process(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");

    for ticks_per_token in [1_000, 10_000, 100_000] {
        let config = SyntheticTicks {
            tokens: 1,
            ticks_per_token,
            ..Default::default()
        };
        let ticks = config.generate();
        group.throughput(Throughput::Elements(ticks.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(ticks_per_token),
            &ticks,
            |b, ticks| b.iter(|| aggregate_candles(black_box(ticks.iter().copied()))),
        );
    }

    group.finish();
}

fn candle_query(c: &mut Criterion) {
    let config = SyntheticTicks::default();
    let ticks = config.generate();
    let token = config.instrument_tokens()[0];
    let range = TimeRange::new(ticks[0].timestamp, ticks[ticks.len() - 1].timestamp).unwrap();

    let runtime = tokio::runtime::Runtime::new().unwrap();
    let dir = TempDir::new().unwrap();
    let store = TickStore::open(StoreConfig::new(dir.path().join("bench.db"))).unwrap();
    runtime.block_on(store.insert_batch(ticks)).unwrap();

    let mut group = c.benchmark_group("candle_query");
    group.throughput(Throughput::Elements(config.ticks_per_token as u64));
    for mode in [AggregationMode::Store, AggregationMode::Client] {
        let store = &store;
        group.bench_function(mode.as_str(), |b| {
            b.to_async(&runtime).iter(|| async move {
                store.candles(black_box(token), range, mode).await.unwrap()
            });
        });
    }
    group.finish();
}

criterion_group!(benches, aggregate_in_process, candle_query);
criterion_main!(benches);
