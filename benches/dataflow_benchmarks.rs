//! Throughput of dataflow stream writes/reads and operator firings.

use concurro::prelude::*;
use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use std::sync::Arc;
use tokio::runtime::Runtime;

fn bench_stream_write_read(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    c.bench_function("stream_1000_write_read", |b| {
        b.to_async(&rt).iter_batched(
            || {
                let group = Group::new(GroupConfig::default());
                let stream: DataflowStream<u64> = group.stream();
                let reader = stream.reader();
                (stream, reader)
            },
            |(stream, reader)| async move {
                for i in 0..1000u64 {
                    stream.write(i).await.unwrap();
                    reader.read().await;
                }
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_operator_firing(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    c.bench_function("operator_1000_firings", |b| {
        b.to_async(&rt).iter_batched(
            || {
                let group = Group::new(GroupConfig::default());
                let input: DataflowStream<u64> = group.stream();
                let output: Arc<DataflowStream<u64>> = Arc::new(group.stream());
                let out_reader = output.reader();
                let _operator = group.operator(vec![input.reader()], vec![output.clone()], |values| {
                    Ok(vec![values[0] * 2])
                });
                (input, out_reader)
            },
            |(input, out_reader)| async move {
                for i in 0..1000u64 {
                    input.write(i).await.unwrap();
                    out_reader.read().await;
                }
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_stream_write_read, bench_operator_firing);
criterion_main!(benches);
