use alloc::vec::Vec;

use proptest::prelude::*;

use crate::{
  element::Element,
  kernel_test::{self, first_mismatch},
  op::*,
  operand::Operand,
};

/// Lengths straddling every register width plus some slack.
fn arb_len() -> impl Strategy<Value = usize> {
  prop_oneof![0usize..=8, 9usize..=70, 120usize..=260]
}

fn pair<T: core::fmt::Debug>(element: impl Strategy<Value = T> + Clone) -> impl Strategy<Value = (Vec<T>, Vec<T>)> {
  arb_len().prop_flat_map(move |len| {
    (
      proptest::collection::vec(element.clone(), len),
      proptest::collection::vec(element.clone(), len),
    )
  })
}

fn finite_f32() -> impl Strategy<Value = f32> + Clone {
  -1.0e18f32..1.0e18f32
}

fn finite_f64() -> impl Strategy<Value = f64> + Clone {
  -1.0e150f64..1.0e150f64
}

fn agree_binary<T: Element, O: crate::kernels::BinaryKernel<T>>(a: &[T], b: &[T]) -> Result<(), TestCaseError> {
  let results = kernel_test::run_all_binary::<T, O>(a, Operand::Buffer(b));
  prop_assert_eq!(first_mismatch(&results), None, "{} {}", O::NAME, T::NAME);
  if let Some(&s) = b.first() {
    let results = kernel_test::run_all_binary::<T, O>(a, Operand::Scalar(s));
    prop_assert_eq!(first_mismatch(&results), None, "{} {} broadcast", O::NAME, T::NAME);
  }
  Ok(())
}

fn agree_bitwise<T: Element>(a: &[T], b: &[T]) -> Result<(), TestCaseError>
where
  And: crate::kernels::BinaryKernel<T::Bits>,
  Or: crate::kernels::BinaryKernel<T::Bits>,
  Xor: crate::kernels::BinaryKernel<T::Bits>,
  AndNot: crate::kernels::BinaryKernel<T::Bits>,
{
  prop_assert_eq!(first_mismatch(&kernel_test::run_all_bitwise::<T, And>(a, Operand::Buffer(b))), None);
  prop_assert_eq!(first_mismatch(&kernel_test::run_all_bitwise::<T, Or>(a, Operand::Buffer(b))), None);
  prop_assert_eq!(first_mismatch(&kernel_test::run_all_bitwise::<T, Xor>(a, Operand::Buffer(b))), None);
  prop_assert_eq!(first_mismatch(&kernel_test::run_all_bitwise::<T, AndNot>(a, Operand::Buffer(b))), None);
  Ok(())
}

fn agree_shift<T: Element, O: crate::kernels::ShiftKernel<T>>(a: &[T], count: u32) -> Result<(), TestCaseError> {
  let results = kernel_test::run_all_shift::<T, O>(a, count);
  prop_assert_eq!(first_mismatch(&results), None, "{} {} count={}", O::NAME, T::NAME, count);
  Ok(())
}

fn in_place_agrees<T: Element, O: crate::kernels::BinaryKernel<T>>(a: &[T], b: &[T]) -> Result<(), TestCaseError> {
  for tier in kernel_test::available_tiers() {
    let mut expected = alloc::vec![T::default(); a.len()];
    let planned = kernel_test::binary_on::<T, O>(tier, a, Operand::Buffer(b), &mut expected);
    let mut buf = a.to_vec();
    let coverage = kernel_test::binary_in_place_on::<T, O>(tier, &mut buf, Operand::Buffer(b));
    prop_assert_eq!(coverage, planned, "{} {} at {}", O::NAME, T::NAME, tier);
    for (i, (x, y)) in buf.iter().zip(&expected).enumerate() {
      prop_assert_eq!(x.to_bits(), y.to_bits(), "{} {} at {} index {}", O::NAME, T::NAME, tier, i);
    }
  }
  Ok(())
}

fn shift_in_place_agrees<T: Element, O: crate::kernels::ShiftKernel<T>>(a: &[T], count: u32) -> Result<(), TestCaseError> {
  for tier in kernel_test::available_tiers() {
    let mut expected = alloc::vec![T::default(); a.len()];
    let planned = kernel_test::shift_on::<T, O>(tier, a, count, &mut expected);
    let mut buf = a.to_vec();
    let coverage = kernel_test::shift_in_place_on::<T, O>(tier, &mut buf, count);
    prop_assert_eq!(coverage, planned, "{} {} at {}", O::NAME, T::NAME, tier);
    for (i, (x, y)) in buf.iter().zip(&expected).enumerate() {
      prop_assert_eq!(x.to_bits(), y.to_bits(), "{} {} at {} index {}", O::NAME, T::NAME, tier, i);
    }
  }
  Ok(())
}

proptest! {
  #[test]
  fn add_subtract_match_scalar_8((a, b) in pair(any::<u8>()), (c, d) in pair(any::<i8>())) {
    agree_binary::<u8, Add>(&a, &b)?;
    agree_binary::<u8, Subtract>(&a, &b)?;
    agree_binary::<u8, AddSaturating>(&a, &b)?;
    agree_binary::<u8, MultiplyLow>(&a, &b)?;
    agree_binary::<i8, Add>(&c, &d)?;
    agree_binary::<i8, Subtract>(&c, &d)?;
    agree_binary::<i8, AddSaturating>(&c, &d)?;
  }

  #[test]
  fn arithmetic_matches_scalar_16((a, b) in pair(any::<u16>()), (c, d) in pair(any::<i16>())) {
    agree_binary::<u16, Add>(&a, &b)?;
    agree_binary::<u16, Subtract>(&a, &b)?;
    agree_binary::<u16, MultiplyLow>(&a, &b)?;
    agree_binary::<u16, AddSaturating>(&a, &b)?;
    agree_binary::<i16, Add>(&c, &d)?;
    agree_binary::<i16, MultiplyLow>(&c, &d)?;
    agree_binary::<i16, AddSaturating>(&c, &d)?;
  }

  #[test]
  fn arithmetic_matches_scalar_32((a, b) in pair(any::<u32>()), (c, d) in pair(any::<i32>())) {
    agree_binary::<u32, Add>(&a, &b)?;
    agree_binary::<u32, Subtract>(&a, &b)?;
    agree_binary::<u32, MultiplyLow>(&a, &b)?;
    agree_binary::<i32, Add>(&c, &d)?;
    agree_binary::<i32, Subtract>(&c, &d)?;
    agree_binary::<i32, MultiplyLow>(&c, &d)?;
  }

  #[test]
  fn arithmetic_matches_scalar_64((a, b) in pair(any::<u64>()), (c, d) in pair(any::<i64>())) {
    agree_binary::<u64, Add>(&a, &b)?;
    agree_binary::<u64, MultiplyLow>(&a, &b)?;
    agree_binary::<i64, Subtract>(&c, &d)?;
    agree_binary::<i64, MultiplyLow>(&c, &d)?;
  }

  #[test]
  fn float_arithmetic_matches_scalar((a, b) in pair(finite_f32()), (c, d) in pair(finite_f64())) {
    agree_binary::<f32, Add>(&a, &b)?;
    agree_binary::<f32, Subtract>(&a, &b)?;
    agree_binary::<f32, Multiply>(&a, &b)?;
    agree_binary::<f64, Add>(&c, &d)?;
    agree_binary::<f64, Subtract>(&c, &d)?;
    agree_binary::<f64, Multiply>(&c, &d)?;
  }

  #[test]
  fn bitwise_matches_scalar(
    (a, b) in pair(any::<i8>()),
    (c, d) in pair(any::<u16>()),
    (e, f) in pair(any::<f32>()),
    (g, h) in pair(any::<f64>()),
  ) {
    agree_bitwise(&a, &b)?;
    agree_bitwise(&c, &d)?;
    agree_bitwise(&e, &f)?;
    agree_bitwise(&g, &h)?;
  }

  #[test]
  fn uniform_shifts_match_scalar(
    (a, _) in pair(any::<i16>()),
    (b, _) in pair(any::<u32>()),
    (c, _) in pair(any::<i64>()),
    (d, _) in pair(any::<i8>()),
    count in 0u32..=80,
  ) {
    agree_shift::<i16, ShiftLeft>(&a, count)?;
    agree_shift::<i16, ShiftRightArithmetic>(&a, count)?;
    agree_shift::<u32, ShiftRightLogical>(&b, count)?;
    agree_shift::<i64, ShiftRightArithmetic>(&c, count)?;
    agree_shift::<i64, ShiftRightLogical>(&c, count)?;
    agree_shift::<i8, ShiftRightArithmetic>(&d, count)?;
  }

  #[test]
  fn variable_shifts_match_scalar((a, b) in pair(any::<i32>()), (c, d) in pair(any::<u64>())) {
    agree_binary::<i32, ShiftLeftVariable>(&a, &b)?;
    agree_binary::<i32, ShiftRightLogicalVariable>(&a, &b)?;
    agree_binary::<i32, ShiftRightArithmeticVariable>(&a, &b)?;
    agree_binary::<u64, ShiftLeftVariable>(&c, &d)?;
    agree_binary::<u64, ShiftRightLogicalVariable>(&c, &d)?;
    let signed: Vec<i64> = c.iter().map(|&v| v as i64).collect();
    agree_binary::<i64, ShiftRightArithmeticVariable>(&signed, &d.iter().map(|&v| v as i64).collect::<Vec<_>>())?;
  }

  #[test]
  fn widening_matches_scalar((a, b) in pair(any::<i32>()), (c, d) in pair(any::<u32>())) {
    let results = kernel_test::run_all_widen::<i32, MultiplyWidening>(&a, Operand::Buffer(&b));
    prop_assert_eq!(first_mismatch(&results), None);
    for (i, w) in results[0].output.iter().enumerate() {
      prop_assert_eq!(*w, i64::from(a[i]) * i64::from(b[i]));
    }
    let results = kernel_test::run_all_widen::<u32, MultiplyWidening>(&c, Operand::Buffer(&d));
    prop_assert_eq!(first_mismatch(&results), None);
  }

  #[test]
  fn coverage_accounts_for_every_element((a, b) in pair(any::<u16>())) {
    for r in kernel_test::run_all_binary::<u16, Add>(&a, Operand::Buffer(&b)) {
      prop_assert_eq!(r.coverage.total(), a.len());
      prop_assert_eq!(r.coverage, kernel_test::plan_binary::<u16, Add>(r.tier, a.len()));
    }
  }

  #[test]
  fn in_place_matches_out_of_place_at_every_tier(
    (a, b) in pair(any::<i8>()),
    (c, d) in pair(any::<u16>()),
    (e, f) in pair(any::<i64>()),
    (g, h) in pair(any::<u32>()),
    (x, y) in pair(finite_f32()),
    count in 0u32..=70,
  ) {
    in_place_agrees::<i8, AddSaturating>(&a, &b)?;
    in_place_agrees::<u16, Subtract>(&c, &d)?;
    in_place_agrees::<u16, MultiplyLow>(&c, &d)?;
    in_place_agrees::<i64, ShiftRightArithmeticVariable>(&e, &f)?;
    in_place_agrees::<u32, ShiftLeftVariable>(&g, &h)?;
    in_place_agrees::<u32, Xor>(&g, &h)?;
    in_place_agrees::<f32, Add>(&x, &y)?;
    let signed: Vec<i32> = g.iter().map(|&v| v as i32).collect();
    shift_in_place_agrees::<i32, ShiftRightArithmetic>(&signed, count)?;
    shift_in_place_agrees::<u64, ShiftLeft>(&e.iter().map(|&v| v as u64).collect::<Vec<_>>(), count)?;
    shift_in_place_agrees::<i8, ShiftRightLogical>(&a, count)?;
  }
}
