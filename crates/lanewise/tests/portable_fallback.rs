//! Known-answer tests for the dispatched API and the scalar reference.
//!
//! Expected values are written out by hand; both paths must reproduce them
//! on every target, vector unit or not.

use lanewise::{Add, AddSaturating, MultiplyLow, Operand, ShiftRightArithmetic, ShiftRightLogical, scalar};

#[test]
fn integer_arithmetic_wraps() {
  let mut out = [0u8; 4];
  lanewise::add(&[255u8, 1, 128, 0], Operand::Scalar(1), &mut out);
  assert_eq!(out, [0, 2, 129, 1]);

  let mut out = [0i16; 3];
  lanewise::subtract(&[i16::MIN, 0, 5], Operand::Scalar(1), &mut out);
  assert_eq!(out, [i16::MAX, -1, 4]);

  let mut out = [0i32; 3];
  lanewise::multiply_low(&[0x1_0000, -3, i32::MAX], Operand::from(&[0x1_0000, 7, 2]), &mut out);
  assert_eq!(out, [0, -21, -2]);

  let mut out = [0u64; 2];
  lanewise::multiply_low(&[u64::MAX, 1 << 40], Operand::Scalar(1 << 30), &mut out);
  assert_eq!(out, [u64::MAX.wrapping_mul(1 << 30), 0]);
}

#[test]
fn float_arithmetic_is_ieee() {
  let mut out = [0.0f32; 4];
  lanewise::add(&[0.1, 1.0e30, -0.0, f32::INFINITY], Operand::Scalar(0.2), &mut out);
  assert_eq!(out, [0.1 + 0.2, 1.0e30 + 0.2, 0.2, f32::INFINITY]);

  let mut out = [0.0f64; 3];
  lanewise::multiply(&[1.5, -2.0, 1.0e300], Operand::from(&[2.0, 0.25, 1.0e10]), &mut out);
  assert_eq!(out, [3.0, -0.5, f64::INFINITY]);

  let mut out = [0.0f32; 1];
  lanewise::subtract(&[f32::NAN], Operand::Scalar(1.0), &mut out);
  assert!(out[0].is_nan());
}

#[test]
fn saturating_add_clamps_both_ends() {
  let mut out = [0i8; 4];
  lanewise::add_saturating(&[100i8, -100, 5, i8::MIN], Operand::from(&[100, -100, -5, -1]), &mut out);
  assert_eq!(out, [127, -128, 0, -128]);

  let mut out = [0u16; 3];
  lanewise::add_saturating(&[u16::MAX, 65_000, 1], Operand::Scalar(1000), &mut out);
  assert_eq!(out, [u16::MAX, u16::MAX, 1001]);
}

#[test]
fn bitwise_on_every_type() {
  let mut out = [0u32; 2];
  lanewise::and(&[0xF0F0_F0F0, 0x1234_5678], Operand::Scalar(0x0FF0_0FF0), &mut out);
  assert_eq!(out, [0x00F0_00F0, 0x0230_0670]);

  let mut out = [0i8; 2];
  lanewise::or(&[0x01, -128], Operand::Scalar(0x10), &mut out);
  assert_eq!(out, [0x11, -112]);

  let mut out = [0u16; 1];
  lanewise::xor(&[0xAAAA], Operand::Scalar(0xFFFF), &mut out);
  assert_eq!(out, [0x5555]);

  // and_not clears the operand's bits from the input.
  let mut out = [0.0f32; 2];
  lanewise::and_not(&[-3.5, 2.0], Operand::Scalar(-0.0), &mut out);
  assert_eq!(out, [3.5, 2.0]);

  let mut out = [0.0f64; 1];
  lanewise::xor(&[1.0], Operand::Scalar(-0.0), &mut out);
  assert_eq!(out, [-1.0]);
}

#[test]
fn uniform_shifts() {
  let mut out = [0u16; 3];
  lanewise::shift_left(&[1, 0x8001, 3], 15, &mut out);
  assert_eq!(out, [0x8000, 0x8000, 0x8000]);

  let mut out = [0i32; 3];
  lanewise::shift_right_logical(&[-1, 256, i32::MIN], 4, &mut out);
  assert_eq!(out, [0x0FFF_FFFF, 16, 0x0800_0000]);

  let mut out = [0i64; 2];
  lanewise::shift_right_arithmetic(&[-1024, 1024], 3, &mut out);
  assert_eq!(out, [-128, 128]);

  let mut out = [0i8; 2];
  lanewise::shift_right_arithmetic(&[-128, 64], 7, &mut out);
  assert_eq!(out, [-1, 0]);
}

#[test]
fn shift_counts_wrap_at_width() {
  let mut out = [0u32; 1];
  lanewise::shift_left(&[1], 32, &mut out);
  assert_eq!(out, [1]);
  lanewise::shift_left(&[1], 33, &mut out);
  assert_eq!(out, [2]);

  let mut out = [0u8; 1];
  lanewise::shift_right_logical(&[0x80], 9, &mut out);
  assert_eq!(out, [0x40]);
}

#[test]
fn variable_shifts() {
  let mut out = [0u32; 5];
  lanewise::shift_left_variable(&[1; 5], &[0, 1, 31, 32, 33], &mut out);
  assert_eq!(out, [1, 2, 1 << 31, 1, 2]);

  let mut out = [0u64; 3];
  lanewise::shift_right_logical_variable(&[u64::MAX; 3], &[63, 64, 1], &mut out);
  assert_eq!(out, [1, u64::MAX, u64::MAX >> 1]);

  let mut out = [0i64; 3];
  lanewise::shift_right_arithmetic_variable(&[i64::MIN; 3], &[63, 1, 0], &mut out);
  assert_eq!(out, [-1, i64::MIN / 2, i64::MIN]);
}

#[test]
fn widening_multiply_is_exact() {
  let mut out = [0i64; 3];
  lanewise::multiply_widening(&[i32::MIN, i32::MAX, -1], Operand::Scalar(i32::MIN), &mut out);
  assert_eq!(
    out,
    [
      i64::from(i32::MIN) * i64::from(i32::MIN),
      i64::from(i32::MAX) * i64::from(i32::MIN),
      -i64::from(i32::MIN)
    ]
  );

  let mut out = [0u64; 2];
  lanewise::multiply_widening(&[u32::MAX, 2], Operand::from(&[u32::MAX, 3]), &mut out);
  assert_eq!(out, [0xFFFF_FFFE_0000_0001, 6]);
}

#[test]
fn scalar_reference_agrees_with_dispatch() {
  let input: Vec<i16> = (0..100).map(|i| (i * 700 - 30_000) as i16).collect();
  let operand: Vec<i16> = (0..100).map(|i| (i * -311) as i16).collect();

  let mut dispatched = vec![0i16; 100];
  let mut reference = vec![0i16; 100];
  lanewise::add_saturating(&input, Operand::from(operand.as_slice()), &mut dispatched);
  scalar::binary::<i16, AddSaturating>(&input, Operand::from(operand.as_slice()), &mut reference);
  assert_eq!(dispatched, reference);

  lanewise::multiply_low(&input, Operand::Scalar(3), &mut dispatched);
  scalar::binary::<i16, MultiplyLow>(&input, Operand::Scalar(3), &mut reference);
  assert_eq!(dispatched, reference);

  lanewise::shift_right_arithmetic(&input, 5, &mut dispatched);
  scalar::shift::<i16, ShiftRightArithmetic>(&input, 5, &mut reference);
  assert_eq!(dispatched, reference);

  lanewise::shift_right_logical(&input, 21, &mut dispatched);
  scalar::shift::<i16, ShiftRightLogical>(&input, 21, &mut reference);
  assert_eq!(dispatched, reference);

  let mut dispatched = vec![0i32; 7];
  let mut reference = vec![0i32; 7];
  lanewise::add(&[i32::MAX; 7], Operand::Scalar(1), &mut dispatched);
  scalar::binary::<i32, Add>(&[i32::MAX; 7], Operand::Scalar(1), &mut reference);
  assert_eq!(dispatched, reference);
  assert_eq!(dispatched, [i32::MIN; 7]);
}

#[test]
fn in_place_forms() {
  let mut buf = [1u32, 2, 3];
  lanewise::add_in_place(&mut buf, Operand::Scalar(10));
  assert_eq!(buf, [11, 12, 13]);
  lanewise::shift_left_variable_in_place(&mut buf, &[1, 2, 3]);
  assert_eq!(buf, [22, 48, 104]);
  lanewise::xor_in_place(&mut buf, Operand::Scalar(1));
  assert_eq!(buf, [23, 49, 105]);
}
