// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Benchmarks for element access and view derivation.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use flat_tensor::Tensor;

fn bench_get_set(c: &mut Criterion) {
    let t = Tensor::new(&[16, 32, 64]).unwrap();
    let coords = [7usize, 13, 42];
    c.bench_function("set_get_3d", |b| {
        b.iter(|| {
            t.set(black_box(1.0), black_box(&coords[..])).unwrap();
            black_box(t.get(black_box(&coords[..])).unwrap())
        })
    });
}

fn bench_sub_tensor(c: &mut Criterion) {
    let t = Tensor::new(&[16, 32, 64]).unwrap();
    c.bench_function("sub_tensor_3d", |b| {
        b.iter(|| {
            Tensor::sub_tensor(&t, black_box(vec![2, 4, 8]), black_box(vec![10, 20, 40])).unwrap()
        })
    });
}

fn bench_to_vec(c: &mut Criterion) {
    let t = Tensor::new(&[64, 64]).unwrap();
    let view = Tensor::sub_tensor(&t, vec![8, 8], vec![56, 56]).unwrap();
    c.bench_function("to_vec_48x48_view", |b| b.iter(|| black_box(view.to_vec().unwrap())));
}

criterion_group!(benches, bench_get_set, bench_sub_tensor, bench_to_vec);
criterion_main!(benches);
