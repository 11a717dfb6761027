//! Safe elementwise API.
//!
//! Every operation has an out-of-place form `op(input, operand, output)` and
//! an in-place form `op_in_place(buf, operand)`. The active tier comes from
//! [`backend::active_tier`] and is resolved once per process.
//!
//! # Panics
//!
//! Buffer lengths are caller preconditions. An `output` or buffer operand
//! shorter than `input` panics with a message naming the operation; extra
//! elements past `input.len()` are left untouched.
//!
//! # Example
//!
//! ```
//! use lanewise::Operand;
//!
//! let input = [1.5f32, 2.0, -4.0];
//! let mut out = [0.0f32; 3];
//! lanewise::multiply(&input, Operand::Scalar(2.0), &mut out);
//! assert_eq!(out, [3.0, 4.0, -8.0]);
//!
//! let mut bytes = [250u8, 10, 128];
//! lanewise::add_saturating_in_place(&mut bytes, Operand::Scalar(10));
//! assert_eq!(bytes, [255, 20, 138]);
//! ```

use crate::{
  dispatch,
  element::{Element, Integer, Signed, Widening, bits_of, bits_of_mut},
  kernels::{BinaryKernel, ShiftKernel, WidenKernel},
  op::*,
  operand::Operand,
};

#[inline]
#[track_caller]
pub(crate) fn check_output(name: &str, input_len: usize, output_len: usize) {
  assert!(
    output_len >= input_len,
    "{name}: output holds {output_len} elements, input has {input_len}"
  );
}

#[inline]
#[track_caller]
pub(crate) fn check_binary<T>(name: &str, input_len: usize, operand: &Operand<'_, T>, output_len: usize) {
  if let Operand::Buffer(buf) = operand {
    assert!(
      buf.len() >= input_len,
      "{name}: operand holds {} elements, input has {input_len}",
      buf.len()
    );
  }
  check_output(name, input_len, output_len);
}

// ─────────────────────────────────────────────────────────────────────────────
// Generic entry points
// ─────────────────────────────────────────────────────────────────────────────

/// `output[i] = O(input[i], operand[i])` on the active tier.
///
/// # Panics
///
/// Panics if `output` or a buffer operand is shorter than `input`.
#[inline]
#[track_caller]
pub fn binary<T: Element, O: BinaryKernel<T>>(input: &[T], operand: Operand<'_, T>, output: &mut [T]) {
  check_binary(O::NAME, input.len(), &operand, output.len());
  // SAFETY: active tier never exceeds the detected one; lengths checked.
  unsafe {
    dispatch::binary::<T, O>(
      backend::active_tier(),
      input.as_ptr(),
      operand.as_raw(),
      output.as_mut_ptr(),
      input.len(),
    );
  }
}

/// `buf[i] = O(buf[i], operand[i])` on the active tier.
///
/// # Panics
///
/// Panics if a buffer operand is shorter than `buf`.
#[inline]
#[track_caller]
pub fn binary_in_place<T: Element, O: BinaryKernel<T>>(buf: &mut [T], operand: Operand<'_, T>) {
  check_binary(O::NAME, buf.len(), &operand, buf.len());
  let len = buf.len();
  let ptr = buf.as_mut_ptr();
  // SAFETY: active tier never exceeds the detected one; output aliases the
  // input exactly, which the drivers allow.
  unsafe {
    dispatch::binary::<T, O>(backend::active_tier(), ptr.cast_const(), operand.as_raw(), ptr, len);
  }
}

/// Uniform shift on the active tier. `count` is taken modulo `T::BITS`.
///
/// # Panics
///
/// Panics if `output` is shorter than `input`.
#[inline]
#[track_caller]
pub fn shift<T: Element, O: ShiftKernel<T>>(input: &[T], count: u32, output: &mut [T]) {
  check_output(O::NAME, input.len(), output.len());
  // SAFETY: active tier never exceeds the detected one; lengths checked.
  unsafe {
    dispatch::shift::<T, O>(
      backend::active_tier(),
      input.as_ptr(),
      count,
      output.as_mut_ptr(),
      input.len(),
    );
  }
}

/// In-place uniform shift. `count` is taken modulo `T::BITS`.
#[inline]
pub fn shift_in_place<T: Element, O: ShiftKernel<T>>(buf: &mut [T], count: u32) {
  let len = buf.len();
  let ptr = buf.as_mut_ptr();
  // SAFETY: active tier never exceeds the detected one; exact aliasing.
  unsafe {
    dispatch::shift::<T, O>(backend::active_tier(), ptr.cast_const(), count, ptr, len);
  }
}

/// Widening operation on the active tier.
///
/// # Panics
///
/// Panics if `output` or a buffer operand is shorter than `input`.
#[inline]
#[track_caller]
pub fn widen<T: Widening, O: WidenKernel<T>>(input: &[T], operand: Operand<'_, T>, output: &mut [T::Wide]) {
  check_binary(O::NAME, input.len(), &operand, output.len());
  // SAFETY: active tier never exceeds the detected one; lengths checked; a
  // `&mut [T::Wide]` cannot overlap the shared inputs.
  unsafe {
    dispatch::widen::<T, O>(
      backend::active_tier(),
      input.as_ptr(),
      operand.as_raw(),
      output.as_mut_ptr(),
      input.len(),
    );
  }
}

/// Bitwise operation on any element type, through its unsigned bit pattern.
///
/// # Panics
///
/// Panics if `output` or a buffer operand is shorter than `input`.
#[inline]
#[track_caller]
pub fn bitwise<T: Element, O: BinaryKernel<T::Bits>>(input: &[T], operand: Operand<'_, T>, output: &mut [T]) {
  binary::<T::Bits, O>(bits_of(input), operand.to_bits(), bits_of_mut(output));
}

/// In-place bitwise operation on any element type.
///
/// # Panics
///
/// Panics if a buffer operand is shorter than `buf`.
#[inline]
#[track_caller]
pub fn bitwise_in_place<T: Element, O: BinaryKernel<T::Bits>>(buf: &mut [T], operand: Operand<'_, T>) {
  binary_in_place::<T::Bits, O>(bits_of_mut(buf), operand.to_bits());
}

// ─────────────────────────────────────────────────────────────────────────────
// Named operations
// ─────────────────────────────────────────────────────────────────────────────

macro_rules! named_binary {
  ($($(#[$doc:meta])* $op:ident => $name:ident, $in_place:ident;)+) => {$(
    $(#[$doc])*
    ///
    /// # Panics
    ///
    /// Panics if `output` or a buffer operand is shorter than `input`.
    #[inline]
    #[track_caller]
    pub fn $name<T: Element>(input: &[T], operand: Operand<'_, T>, output: &mut [T])
    where
      $op: BinaryKernel<T>,
    {
      binary::<T, $op>(input, operand, output);
    }

    #[doc = concat!("In-place [`", stringify!($name), "`].")]
    ///
    /// # Panics
    ///
    /// Panics if a buffer operand is shorter than `buf`.
    #[inline]
    #[track_caller]
    pub fn $in_place<T: Element>(buf: &mut [T], operand: Operand<'_, T>)
    where
      $op: BinaryKernel<T>,
    {
      binary_in_place::<T, $op>(buf, operand);
    }
  )+};
}

named_binary! {
  /// Elementwise sum. Integers wrap; floats follow IEEE-754.
  Add => add, add_in_place;
  /// Elementwise difference. Integers wrap; floats follow IEEE-754.
  Subtract => subtract, subtract_in_place;
  /// Elementwise floating-point product. Integers use [`multiply_low`].
  Multiply => multiply, multiply_in_place;
  /// Elementwise integer product, keeping the low half.
  MultiplyLow => multiply_low, multiply_low_in_place;
  /// Elementwise sum clamped to `[T::MIN, T::MAX]` (8 and 16-bit integers).
  AddSaturating => add_saturating, add_saturating_in_place;
}

macro_rules! named_bitwise {
  ($($(#[$doc:meta])* $op:ident => $name:ident, $in_place:ident;)+) => {$(
    $(#[$doc])*
    ///
    /// Floats are processed through their bit pattern, never converted.
    ///
    /// # Panics
    ///
    /// Panics if `output` or a buffer operand is shorter than `input`.
    #[inline]
    #[track_caller]
    pub fn $name<T: Element>(input: &[T], operand: Operand<'_, T>, output: &mut [T])
    where
      $op: BinaryKernel<T::Bits>,
    {
      bitwise::<T, $op>(input, operand, output);
    }

    #[doc = concat!("In-place [`", stringify!($name), "`].")]
    ///
    /// # Panics
    ///
    /// Panics if a buffer operand is shorter than `buf`.
    #[inline]
    #[track_caller]
    pub fn $in_place<T: Element>(buf: &mut [T], operand: Operand<'_, T>)
    where
      $op: BinaryKernel<T::Bits>,
    {
      bitwise_in_place::<T, $op>(buf, operand);
    }
  )+};
}

named_bitwise! {
  /// Elementwise `input & operand`.
  And => and, and_in_place;
  /// Elementwise `input | operand`.
  Or => or, or_in_place;
  /// Elementwise `input ^ operand`.
  Xor => xor, xor_in_place;
  /// Elementwise `input & !operand`.
  AndNot => and_not, and_not_in_place;
}

macro_rules! named_shift {
  ($($(#[$doc:meta])* $op:ident: $bound:ident => $name:ident, $in_place:ident;)+) => {$(
    $(#[$doc])*
    ///
    /// `count` is taken modulo the bit width, so shifting by `T::BITS` is
    /// the identity.
    ///
    /// # Panics
    ///
    /// Panics if `output` is shorter than `input`.
    #[inline]
    #[track_caller]
    pub fn $name<T: $bound>(input: &[T], count: u32, output: &mut [T])
    where
      $op: ShiftKernel<T>,
    {
      shift::<T, $op>(input, count, output);
    }

    #[doc = concat!("In-place [`", stringify!($name), "`].")]
    #[inline]
    pub fn $in_place<T: $bound>(buf: &mut [T], count: u32)
    where
      $op: ShiftKernel<T>,
    {
      shift_in_place::<T, $op>(buf, count);
    }
  )+};
}

named_shift! {
  /// Logical left shift of every element by `count`.
  ShiftLeft: Integer => shift_left, shift_left_in_place;
  /// Logical right shift of every element by `count` (zeros shifted in,
  /// also for signed types).
  ShiftRightLogical: Integer => shift_right_logical, shift_right_logical_in_place;
  /// Arithmetic right shift of every element by `count`.
  ShiftRightArithmetic: Signed => shift_right_arithmetic, shift_right_arithmetic_in_place;
}

macro_rules! named_variable_shift {
  ($($(#[$doc:meta])* $op:ident => $name:ident, $in_place:ident;)+) => {$(
    $(#[$doc])*
    ///
    /// Each count is read as its unsigned bit pattern modulo the bit width.
    ///
    /// # Panics
    ///
    /// Panics if `counts` or `output` is shorter than `input`.
    #[inline]
    #[track_caller]
    pub fn $name<T: Integer>(input: &[T], counts: &[T], output: &mut [T])
    where
      $op: BinaryKernel<T>,
    {
      binary::<T, $op>(input, Operand::Buffer(counts), output);
    }

    #[doc = concat!("In-place [`", stringify!($name), "`].")]
    ///
    /// # Panics
    ///
    /// Panics if `counts` is shorter than `buf`.
    #[inline]
    #[track_caller]
    pub fn $in_place<T: Integer>(buf: &mut [T], counts: &[T])
    where
      $op: BinaryKernel<T>,
    {
      binary_in_place::<T, $op>(buf, Operand::Buffer(counts));
    }
  )+};
}

named_variable_shift! {
  /// `output[i] = input[i] << counts[i]` (32 and 64-bit integers).
  ShiftLeftVariable => shift_left_variable, shift_left_variable_in_place;
  /// `output[i] = input[i] >> counts[i]`, zeros shifted in (32 and 64-bit integers).
  ShiftRightLogicalVariable => shift_right_logical_variable, shift_right_logical_variable_in_place;
  /// `output[i] = input[i] >> counts[i]`, sign replicated (`i32`, `i64`).
  ShiftRightArithmeticVariable => shift_right_arithmetic_variable, shift_right_arithmetic_variable_in_place;
}

/// Exact 32 x 32 -> 64-bit product: `i32 -> i64`, `u32 -> u64`.
///
/// ```
/// use lanewise::Operand;
///
/// let mut wide = [0i64; 2];
/// lanewise::multiply_widening(&[i32::MAX, -1], Operand::Scalar(i32::MAX), &mut wide);
/// assert_eq!(wide, [i64::from(i32::MAX).pow(2), -i64::from(i32::MAX)]);
/// ```
///
/// # Panics
///
/// Panics if `output` or a buffer operand is shorter than `input`.
#[inline]
#[track_caller]
pub fn multiply_widening<T: Widening>(input: &[T], operand: Operand<'_, T>, output: &mut [T::Wide])
where
  MultiplyWidening: WidenKernel<T>,
{
  widen::<T, MultiplyWidening>(input, operand, output);
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn add_scalar_and_buffer() {
    let mut out = [0i32; 4];
    add(&[1, 2, 3, 4], Operand::Scalar(10), &mut out);
    assert_eq!(out, [11, 12, 13, 14]);
    add(&[1, 2, 3, 4], Operand::Buffer(&[4, 3, 2, 1]), &mut out);
    assert_eq!(out, [5; 4]);
  }

  #[test]
  fn longer_output_tail_is_untouched() {
    let mut out = [7u16; 5];
    subtract(&[5u16, 5], Operand::Scalar(1), &mut out);
    assert_eq!(out, [4, 4, 7, 7, 7]);
  }

  #[test]
  fn bitwise_on_floats_preserves_bits() {
    let input = [1.0f32, -2.5, f32::NAN];
    let mut out = [0.0f32; 3];
    and(&input, Operand::Scalar(f32::from_bits(u32::MAX)), &mut out);
    for (a, b) in input.iter().zip(&out) {
      assert_eq!(a.to_bits(), b.to_bits());
    }
    xor_in_place(&mut out, Operand::Buffer(&input));
    assert!(out.iter().all(|v| v.to_bits() == 0));
  }

  #[test]
  fn and_not_on_signed() {
    let mut out = [0i8; 2];
    and_not(&[-1i8, 0x0F], Operand::Scalar(0x0F), &mut out);
    assert_eq!(out, [-16, 0]);
  }

  #[test]
  fn shifts_named() {
    let mut out = [0i16; 3];
    shift_right_arithmetic(&[-8i16, 8, i16::MIN], 2, &mut out);
    assert_eq!(out, [-2, 2, i16::MIN >> 2]);
    shift_right_logical(&[-8i16, 8, i16::MIN], 2, &mut out);
    assert_eq!(out, [((-8i16) as u16 >> 2) as i16, 2, 0x2000]);
  }

  #[test]
  fn variable_shift_in_place() {
    let mut buf = [1u64, 1, 1, u64::MAX];
    shift_left_variable_in_place(&mut buf, &[0, 1, 64, 63]);
    assert_eq!(buf, [1, 2, 1, 1 << 63]);
  }

  #[test]
  #[should_panic(expected = "multiply_low: operand holds 1 elements, input has 2")]
  fn short_operand_panics() {
    let mut out = [0u32; 2];
    multiply_low(&[1u32, 2], Operand::Buffer(&[1]), &mut out);
  }

  #[test]
  #[should_panic(expected = "shift_left: output holds 0 elements")]
  fn short_shift_output_panics() {
    shift_left(&[1u32], 1, &mut []);
  }
}
