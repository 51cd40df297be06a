#[macro_use]
extern crate criterion;

use criterion::{black_box, Criterion};

use growvec::{capacity::GrowExact, storage::Global, vec::Custom, Vector};

fn push_compare(c: &mut Criterion) {
    const SMALL_COUNT: usize = 100;
    const LARGE_COUNT: usize = 1000;

    for count in [SMALL_COUNT, LARGE_COUNT] {
        c.bench_function(&format!("vector push {} values", count), |b| {
            b.iter(|| {
                let mut buf = Vector::<usize>::new();
                for value in 0..count {
                    buf.push(black_box(value));
                }
            });
        });

        c.bench_function(&format!("vector exact push {} values", count), |b| {
            b.iter(|| {
                let mut buf = Vector::<usize, Custom<Global, GrowExact>>::new();
                for value in 0..count {
                    buf.push(black_box(value));
                }
            });
        });

        c.bench_function(
            &format!("vector with_capacity({0}) push {0} values", count),
            |b| {
                b.iter(|| {
                    let mut buf = Vector::<usize>::with_capacity(count);
                    for value in 0..count {
                        buf.push(black_box(value));
                    }
                });
            },
        );

        c.bench_function(&format!("stdvec push {} values", count), |b| {
            b.iter(|| {
                let mut buf = Vec::<usize>::new();
                for value in 0..count {
                    buf.push(black_box(value));
                }
            });
        });

        c.bench_function(
            &format!("stdvec with_capacity({0}) push {0} values", count),
            |b| {
                b.iter(|| {
                    let mut buf = Vec::<usize>::with_capacity(count);
                    for value in 0..count {
                        buf.push(black_box(value));
                    }
                });
            },
        );

        c.bench_function(&format!("vector extend {} values", count), |b| {
            b.iter(|| {
                let mut buf = Vector::<usize>::new();
                buf.extend(black_box(0..count));
            });
        });

        c.bench_function(&format!("stdvec extend {} values", count), |b| {
            b.iter(|| {
                let mut buf = Vec::<usize>::new();
                buf.extend(black_box(0..count));
            });
        });
    }
}

fn insert_compare(c: &mut Criterion) {
    const COUNT: usize = 500;

    c.bench_function(&format!("vector insert front {} values", COUNT), |b| {
        b.iter(|| {
            let mut buf = Vector::<usize>::new();
            for value in 0..COUNT {
                buf.insert(0, black_box(value));
            }
        });
    });

    c.bench_function(&format!("stdvec insert front {} values", COUNT), |b| {
        b.iter(|| {
            let mut buf = Vec::<usize>::new();
            for value in 0..COUNT {
                buf.insert(0, black_box(value));
            }
        });
    });

    c.bench_function(&format!("vector insert_slice middle {} values", COUNT), |b| {
        let data = [7usize; 16];
        b.iter(|| {
            let mut buf = Vector::<usize>::from_elem(0, COUNT);
            buf.insert_slice(COUNT / 2, black_box(&data[..]));
        });
    });

    c.bench_function(&format!("stdvec splice middle {} values", COUNT), |b| {
        let data = [7usize; 16];
        b.iter(|| {
            let mut buf = vec![0usize; COUNT];
            buf.splice(COUNT / 2..COUNT / 2, black_box(&data[..]).iter().copied())
                .for_each(drop);
        });
    });

    c.bench_function(&format!("vector erase front {} values", COUNT), |b| {
        b.iter(|| {
            let mut buf = Vector::<usize>::from_elem(1, COUNT);
            while !buf.is_empty() {
                black_box(buf.erase(0));
            }
        });
    });
}

criterion_group!(benches, push_compare, insert_compare);
criterion_main!(benches);
