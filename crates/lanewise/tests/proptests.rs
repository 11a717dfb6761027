//! Property-based tests for the public API.
//!
//! Results are checked against Rust's own integer and float operators, so
//! these also pin down the scalar semantics the kernels are built on.

use lanewise::Operand;
use proptest::prelude::*;

// Test Strategies

fn arb_pair<T: Arbitrary + Clone + core::fmt::Debug>() -> impl Strategy<Value = (Vec<T>, Vec<T>)> {
  (0usize..300).prop_flat_map(|len| {
    (
      prop::collection::vec(any::<T>(), len),
      prop::collection::vec(any::<T>(), len),
    )
  })
}

proptest! {
  #[test]
  fn add_wraps_like_wrapping_add((a, b) in arb_pair::<u16>()) {
    let mut out = vec![0u16; a.len()];
    lanewise::add(&a, Operand::from(b.as_slice()), &mut out);
    for i in 0..a.len() {
      prop_assert_eq!(out[i], a[i].wrapping_add(b[i]));
    }
  }

  #[test]
  fn subtract_wraps_like_wrapping_sub((a, b) in arb_pair::<i64>()) {
    let mut out = vec![0i64; a.len()];
    lanewise::subtract(&a, Operand::from(b.as_slice()), &mut out);
    for i in 0..a.len() {
      prop_assert_eq!(out[i], a[i].wrapping_sub(b[i]));
    }
  }

  #[test]
  fn multiply_low_is_wrapping_mul((a, b) in arb_pair::<i32>(), (c, d) in arb_pair::<u64>()) {
    let mut out = vec![0i32; a.len()];
    lanewise::multiply_low(&a, Operand::from(b.as_slice()), &mut out);
    for i in 0..a.len() {
      prop_assert_eq!(out[i], a[i].wrapping_mul(b[i]));
    }
    let mut out = vec![0u64; c.len()];
    lanewise::multiply_low(&c, Operand::from(d.as_slice()), &mut out);
    for i in 0..c.len() {
      prop_assert_eq!(out[i], c[i].wrapping_mul(d[i]));
    }
  }

  #[test]
  fn saturating_add_matches_std((a, b) in arb_pair::<i8>(), (c, d) in arb_pair::<u16>()) {
    let mut out = vec![0i8; a.len()];
    lanewise::add_saturating(&a, Operand::from(b.as_slice()), &mut out);
    for i in 0..a.len() {
      prop_assert_eq!(out[i], a[i].saturating_add(b[i]));
    }
    let mut out = vec![0u16; c.len()];
    lanewise::add_saturating(&c, Operand::from(d.as_slice()), &mut out);
    for i in 0..c.len() {
      prop_assert_eq!(out[i], c[i].saturating_add(d[i]));
    }
  }

  #[test]
  fn float_multiply_is_ieee(a in prop::collection::vec(-1.0e30f32..1.0e30, 0..200), s in -1.0e9f32..1.0e9) {
    let mut out = vec![0.0f32; a.len()];
    lanewise::multiply(&a, Operand::Scalar(s), &mut out);
    for i in 0..a.len() {
      prop_assert_eq!(out[i].to_bits(), (a[i] * s).to_bits());
    }
  }

  #[test]
  fn bitwise_matches_operators((a, b) in arb_pair::<u32>()) {
    let mut out = vec![0u32; a.len()];
    lanewise::and_not(&a, Operand::from(b.as_slice()), &mut out);
    for i in 0..a.len() {
      prop_assert_eq!(out[i], a[i] & !b[i]);
    }
    lanewise::or(&a, Operand::from(b.as_slice()), &mut out);
    for i in 0..a.len() {
      prop_assert_eq!(out[i], a[i] | b[i]);
    }
  }

  #[test]
  fn float_bitwise_is_reinterpretation((a, b) in arb_pair::<f64>()) {
    let mut out = vec![0.0f64; a.len()];
    lanewise::and(&a, Operand::from(b.as_slice()), &mut out);
    for i in 0..a.len() {
      prop_assert_eq!(out[i].to_bits(), a[i].to_bits() & b[i].to_bits());
    }
  }

  #[test]
  fn uniform_shift_uses_masked_count(a in prop::collection::vec(any::<i16>(), 0..300), count in any::<u32>()) {
    let mut out = vec![0i16; a.len()];
    lanewise::shift_right_arithmetic(&a, count, &mut out);
    for i in 0..a.len() {
      prop_assert_eq!(out[i], a[i].wrapping_shr(count));
    }
    lanewise::shift_left(&a, count, &mut out);
    for i in 0..a.len() {
      prop_assert_eq!(out[i], a[i].wrapping_shl(count));
    }
    lanewise::shift_right_logical(&a, count, &mut out);
    for i in 0..a.len() {
      prop_assert_eq!(out[i], (a[i] as u16).wrapping_shr(count) as i16);
    }
  }

  #[test]
  fn variable_shift_uses_masked_lane_counts((a, b) in arb_pair::<u64>(), (c, d) in arb_pair::<i32>()) {
    let mut out = vec![0u64; a.len()];
    lanewise::shift_left_variable(&a, &b, &mut out);
    for i in 0..a.len() {
      prop_assert_eq!(out[i], a[i].wrapping_shl(b[i] as u32));
    }
    let mut out = vec![0i32; c.len()];
    lanewise::shift_right_arithmetic_variable(&c, &d, &mut out);
    for i in 0..c.len() {
      prop_assert_eq!(out[i], c[i].wrapping_shr(d[i] as u32));
    }
  }

  #[test]
  fn widening_multiply_is_exact((a, b) in arb_pair::<i32>()) {
    let mut out = vec![0i64; a.len()];
    lanewise::multiply_widening(&a, Operand::from(b.as_slice()), &mut out);
    for i in 0..a.len() {
      prop_assert_eq!(out[i], i64::from(a[i]) * i64::from(b[i]));
    }
  }

  #[test]
  fn reinterpret_round_trips(v in any::<f32>()) {
    let bits: u32 = lanewise::reinterpret(v);
    prop_assert_eq!(bits, v.to_bits());
    let back: f32 = lanewise::reinterpret(bits);
    prop_assert_eq!(back.to_bits(), v.to_bits());
  }
}
