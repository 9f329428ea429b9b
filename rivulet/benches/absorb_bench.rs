// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use criterion::{BenchmarkId, Criterion, Throughput};
use rivulet::{absorb, Observable, Subject, Subscription};
use std::hint::black_box;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

pub fn bench_absorb_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("absorb_throughput");

    for &count in &[100u64, 1_000, 10_000] {
        group.throughput(Throughput::Elements(count));
        let id = BenchmarkId::from_parameter(format!("values_{count}"));
        group.bench_with_input(id, &count, |bencher, &count| {
            bencher.iter(|| {
                let a = Subject::<u64>::new();
                let b = Subject::<u64>::new();
                let sum = Arc::new(AtomicU64::new(0));
                let sink = Arc::clone(&sum);
                let subscription = absorb(&a.observable(), &b.observable())
                    .subscribe_fn(move |value| {
                        sink.fetch_add(value, Ordering::Relaxed);
                    });

                // Alternate sources so the gate sees both
                for i in 0..count {
                    let subject = if i % 2 == 0 { &a } else { &b };
                    let _ = subject.next(i);
                }
                let _ = a.complete();

                black_box(sum.load(Ordering::Relaxed));
                subscription.unsubscribe();
            });
        });
    }

    group.finish();
}

pub fn bench_absorb_subscribe(c: &mut Criterion) {
    let mut group = c.benchmark_group("absorb_subscribe");

    // Synchronous termination of the first source: the second is never subscribed
    group.bench_function("sync_terminating_first", |bencher| {
        let combined = absorb(&Observable::from_iter(vec![1u32, 2, 3]), &Observable::never());
        bencher.iter(|| {
            let subscription = combined.subscribe_fn(|value| {
                black_box(value);
            });
            black_box(subscription.is_closed());
        });
    });

    group.bench_function("subscribe_then_cancel", |bencher| {
        let combined = absorb(&Observable::<u32>::never(), &Observable::never());
        bencher.iter(|| {
            let subscription = combined.subscribe_fn(|value| {
                black_box(value);
            });
            subscription.unsubscribe();
        });
    });

    group.finish();
}
