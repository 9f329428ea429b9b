// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::absorb_bench::{bench_absorb_subscribe, bench_absorb_throughput};
use crate::into_stream_bench::bench_into_stream;
use criterion::{criterion_group, criterion_main};

mod absorb_bench;
mod into_stream_bench;

criterion_group!(
    benches,
    bench_absorb_throughput,
    bench_absorb_subscribe,
    bench_into_stream
);
criterion_main!(benches);
