use criterion::{criterion_group, criterion_main, Criterion};
use herald_core::config::EmitterConfig;
use herald_core::event::{EventEmitter, Listener};
use std::cell::Cell;
use std::hint::black_box;
use std::rc::Rc;

fn bench_emit(c: &mut Criterion) {
    let counter = Rc::new(Cell::new(0u64));

    let emitter: EventEmitter<&str, u64> =
        EventEmitter::with_config(EmitterConfig { max_listeners: 64 });
    for _ in 0..32 {
        let counter = Rc::clone(&counter);
        emitter
            .on("tick", Listener::from_fn(move |v: &u64| counter.set(counter.get() + v)))
            .expect("32 listeners fit under the configured limit");
    }

    let mut group = c.benchmark_group("Emission");

    group.bench_function("32 persistent listeners", |b| {
        b.iter(|| {
            black_box(emitter.emit(black_box(&"tick"), black_box(&1)).unwrap());
        });
    });

    group.bench_function("32 persistent + 32 once listeners", |b| {
        b.iter(|| {
            for _ in 0..32 {
                let counter = Rc::clone(&counter);
                emitter
                    .once("tick", Listener::from_fn(move |v: &u64| counter.set(counter.get() + v)))
                    .unwrap();
            }
            black_box(emitter.emit(black_box(&"tick"), black_box(&1)).unwrap());
        });
    });

    group.bench_function("no listeners", |b| {
        b.iter(|| {
            black_box(emitter.emit(black_box(&"idle"), black_box(&1)).unwrap());
        });
    });

    group.finish();
    black_box(counter.get());
}

criterion_group!(benches, bench_emit);
criterion_main!(benches);
