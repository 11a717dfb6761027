//! Elementwise kernel benchmarks.
//!
//! Run: `cargo bench -p lanewise`
//! Per tier: `cargo bench -p lanewise -- tiers`
//!
//! This benchmarks:
//! - Main dispatch path (active tier) for representative operations
//! - Every available tier for the same operation, scalar included

use core::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use lanewise::{Add, DispatchInfo, Operand, __internal::kernel_test};

/// Element counts: tails only, one register, cache-resident, L2-sized.
const SIZES: [usize; 6] = [7, 64, 1000, 4096, 16384, 262144];

fn bench_dispatch(c: &mut Criterion) {
  eprintln!("lanewise: {}", DispatchInfo::current());

  let mut group = c.benchmark_group("dispatch/add_f32");
  for size in SIZES {
    let a: Vec<f32> = (0..size).map(|i| i as f32).collect();
    let b = vec![0.5f32; size];
    let mut out = vec![0.0f32; size];
    group.throughput(Throughput::Bytes((size * 4) as u64));
    group.bench_with_input(BenchmarkId::from_parameter(size), &size, |bench, _| {
      bench.iter(|| lanewise::add(black_box(&a), Operand::from(b.as_slice()), black_box(&mut out)));
    });
  }
  group.finish();

  let mut group = c.benchmark_group("dispatch/add_saturating_u8");
  for size in SIZES {
    let mut buf: Vec<u8> = (0..size).map(|i| i as u8).collect();
    group.throughput(Throughput::Bytes(size as u64));
    group.bench_with_input(BenchmarkId::from_parameter(size), &size, |bench, _| {
      bench.iter(|| lanewise::add_saturating_in_place(black_box(&mut buf), Operand::Scalar(1)));
    });
  }
  group.finish();

  let mut group = c.benchmark_group("dispatch/shift_right_arithmetic_i32");
  for size in SIZES {
    let a: Vec<i32> = (0..size).map(|i| -(i as i32)).collect();
    let mut out = vec![0i32; size];
    group.throughput(Throughput::Bytes((size * 4) as u64));
    group.bench_with_input(BenchmarkId::from_parameter(size), &size, |bench, _| {
      bench.iter(|| lanewise::shift_right_arithmetic(black_box(&a), 3, black_box(&mut out)));
    });
  }
  group.finish();

  let mut group = c.benchmark_group("dispatch/multiply_widening_u32");
  for size in SIZES {
    let a: Vec<u32> = (0..size).map(|i| i as u32).collect();
    let mut out = vec![0u64; size];
    group.throughput(Throughput::Bytes((size * 4) as u64));
    group.bench_with_input(BenchmarkId::from_parameter(size), &size, |bench, _| {
      bench.iter(|| lanewise::multiply_widening(black_box(&a), Operand::Scalar(0x9E37_79B9), black_box(&mut out)));
    });
  }
  group.finish();
}

/// Same operation started at each tier the CPU supports.
fn bench_tiers(c: &mut Criterion) {
  const SIZE: usize = 16384;
  let a: Vec<u32> = (0..SIZE as u32).collect();
  let mut out = vec![0u32; SIZE];

  let mut group = c.benchmark_group("tiers/add_u32");
  group.throughput(Throughput::Bytes((SIZE * 4) as u64));
  for tier in kernel_test::available_tiers() {
    group.bench_with_input(BenchmarkId::from_parameter(tier), &tier, |bench, &tier| {
      bench.iter(|| kernel_test::binary_on::<u32, Add>(tier, black_box(&a), Operand::Scalar(7), black_box(&mut out)));
    });
  }
  group.finish();
}

criterion_group!(benches, bench_dispatch, bench_tiers);
criterion_main!(benches);
