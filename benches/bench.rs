use criterion::{Criterion, criterion_group, criterion_main};
use wellspring::Builder;

fn fetch_release(c: &mut Criterion) {
    let pool = Builder::new(1024)
        .minimum(0)
        .allocator(|| Ok(vec![0u8; 1024]))
        .build()
        .unwrap();
    c.bench_function("fetch_release", |b| {
        b.iter(|| {
            let buffer = pool.fetch().unwrap();
            pool.release(buffer);
        })
    });
}

fn fetch_release_contended(c: &mut Criterion) {
    use std::sync::Arc;

    let pool = Arc::new(
        Builder::new(1024)
            .minimum(16)
            .allocator(|| Ok(vec![0u8; 1024]))
            .build()
            .unwrap(),
    );
    c.bench_function("fetch_release_contended", |b| {
        b.iter(|| {
            let mut held = Vec::with_capacity(8);
            for _ in 0..8 {
                held.push(pool.fetch().unwrap());
            }
            for buffer in held {
                pool.release(buffer);
            }
        })
    });
}

criterion_group!(benches, fetch_release, fetch_release_contended);
criterion_main!(benches);
