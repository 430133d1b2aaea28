//! Ingestion benchmarks: batch persistence and end-to-end pipeline throughput.
//!
//! Run with: `cargo bench --package tickstore-bench --bench pipeline_benchmark`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::time::Duration;
use tempfile::TempDir;
use tickstore_bench::SyntheticTicks;
use tickstore_lib::{Pipeline, PipelineConfig, StoreConfig, TickStore};

fn persist_batch(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let mut group = c.benchmark_group("persist_batch");

    for batch_size in [51, 501, 5_001] {
        let config = SyntheticTicks {
            tokens: 1,
            ticks_per_token: batch_size,
            ..Default::default()
        };
        let batch = config.generate();
        group.throughput(Throughput::Elements(batch_size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(batch_size), &batch, |b, batch| {
            let dir = TempDir::new().unwrap();
            let store = TickStore::open(StoreConfig::new(dir.path().join("bench.db"))).unwrap();
            let store = &store;
            b.to_async(&runtime)
                .iter(|| async move { store.insert_batch(batch.clone()).await.unwrap() });
        });
    }

    group.finish();
}

fn pipeline_throughput(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let ticks = SyntheticTicks {
        ticks_per_token: 2_000,
        ..Default::default()
    };
    let stream = ticks.generate();
    let tokens = ticks.instrument_tokens();
    let tokens = &tokens;

    let mut group = c.benchmark_group("pipeline");
    group.sample_size(10);
    group.measurement_time(Duration::from_secs(20));
    group.throughput(Throughput::Elements(stream.len() as u64));

    for dump_size in [50, 500] {
        group.bench_with_input(BenchmarkId::new("dump_size", dump_size), &stream, |b, stream| {
            b.to_async(&runtime).iter_custom(|iters| async move {
                let mut total = Duration::ZERO;
                for _ in 0..iters {
                    let dir = TempDir::new().unwrap();
                    let store =
                        TickStore::open(StoreConfig::new(dir.path().join("bench.db"))).unwrap();
                    let config = PipelineConfig::new(tokens.clone())
                        .with_dump_size(dump_size)
                        .with_flush_on_close(true);

                    let started = std::time::Instant::now();
                    let (sender, handle) = Pipeline::start(&config, store).unwrap();
                    for tick in stream {
                        sender.send(*tick).await.unwrap();
                    }
                    drop(sender);
                    handle.join().await.unwrap();
                    total += started.elapsed();
                }
                total
            });
        });
    }

    group.finish();
}

criterion_group!(benches, persist_batch, pipeline_throughput);
criterion_main!(benches);
