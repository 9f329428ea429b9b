// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use criterion::{BenchmarkId, Criterion, Throughput};
use futures::StreamExt;
use rivulet::{Observable, ObservableExt};
use std::hint::black_box;
use tokio::runtime::Runtime;

pub fn bench_into_stream(c: &mut Criterion) {
    let mut group = c.benchmark_group("into_stream");
    let rt = Runtime::new().expect("failed to build tokio runtime");

    for &count in &[100u32, 1_000, 10_000] {
        group.throughput(Throughput::Elements(u64::from(count)));
        let id = BenchmarkId::from_parameter(format!("events_{count}"));
        let source = Observable::from_iter(0..count);
        group.bench_with_input(id, &source, |bencher, source| {
            bencher.iter(|| {
                rt.block_on(async {
                    let mut stream = source.clone().into_stream();
                    while let Some(event) = stream.next().await {
                        black_box(event);
                    }
                });
            });
        });
    }

    group.finish();
}
