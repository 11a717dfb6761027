//! Pointer-level API.
//!
//! Same operations as [`crate::ops`] on raw pointers and an explicit
//! length, for callers that manage their own buffers (FFI, arenas,
//! strided views split into contiguous runs).
//!
//! # Safety
//!
//! For every function here:
//!
//! - `input` and a [`RawOperand::Buffer`] must be valid for `len` reads
//! - `output` must be valid for `len` writes
//! - `output` may alias `input` or the operand buffer only exactly (same
//!   base pointer); partial overlap is undefined behavior
//! - no alignment beyond that of the element type is required

use crate::{
  dispatch,
  element::{Element, Widening},
  kernels::{BinaryKernel, ShiftKernel, WidenKernel},
  op::*,
  operand::RawOperand,
};

/// `output[i] = O(input[i], operand[i])` for `i < len`.
///
/// # Safety
///
/// See the [module documentation](self).
#[inline]
pub unsafe fn binary<T: Element, O: BinaryKernel<T>>(
  input: *const T,
  operand: RawOperand<T>,
  output: *mut T,
  len: usize,
) {
  debug_assert!(len == 0 || (!input.is_null() && !output.is_null()));
  // SAFETY: active tier never exceeds the detected one; pointer contract
  // forwarded from the caller.
  unsafe {
    dispatch::binary::<T, O>(backend::active_tier(), input, operand, output, len);
  }
}

/// Uniform shift of `len` elements; `count` taken modulo `T::BITS`.
///
/// # Safety
///
/// See the [module documentation](self).
#[inline]
pub unsafe fn shift<T: Element, O: ShiftKernel<T>>(input: *const T, count: u32, output: *mut T, len: usize) {
  debug_assert!(len == 0 || (!input.is_null() && !output.is_null()));
  // SAFETY: as in `binary`.
  unsafe {
    dispatch::shift::<T, O>(backend::active_tier(), input, count, output, len);
  }
}

/// Widening operation over `len` elements.
///
/// # Safety
///
/// See the [module documentation](self). `output` must not overlap the
/// inputs at all.
#[inline]
pub unsafe fn widen<T: Widening, O: WidenKernel<T>>(
  input: *const T,
  operand: RawOperand<T>,
  output: *mut T::Wide,
  len: usize,
) {
  debug_assert!(len == 0 || (!input.is_null() && !output.is_null()));
  // SAFETY: as in `binary`.
  unsafe {
    dispatch::widen::<T, O>(backend::active_tier(), input, operand, output, len);
  }
}

/// Bitwise operation through the unsigned bit pattern of `T`.
///
/// # Safety
///
/// See the [module documentation](self).
#[inline]
pub unsafe fn bitwise<T: Element, O: BinaryKernel<T::Bits>>(
  input: *const T,
  operand: RawOperand<T>,
  output: *mut T,
  len: usize,
) {
  // SAFETY: `T` and `T::Bits` share size, alignment and validity.
  unsafe { binary::<T::Bits, O>(input.cast(), operand.to_bits(), output.cast(), len) }
}

macro_rules! raw_binary {
  ($($(#[$doc:meta])* $op:ident => $name:ident;)+) => {$(
    $(#[$doc])*
    ///
    /// # Safety
    ///
    /// See the [module documentation](self).
    #[inline]
    pub unsafe fn $name<T: Element>(input: *const T, operand: RawOperand<T>, output: *mut T, len: usize)
    where
      $op: BinaryKernel<T>,
    {
      // SAFETY: forwarded from the caller.
      unsafe { binary::<T, $op>(input, operand, output, len) }
    }
  )+};
}

raw_binary! {
  /// Raw [`crate::add`].
  Add => add;
  /// Raw [`crate::subtract`].
  Subtract => subtract;
  /// Raw [`crate::multiply`].
  Multiply => multiply;
  /// Raw [`crate::multiply_low`].
  MultiplyLow => multiply_low;
  /// Raw [`crate::add_saturating`].
  AddSaturating => add_saturating;
}

macro_rules! raw_bitwise {
  ($($(#[$doc:meta])* $op:ident => $name:ident;)+) => {$(
    $(#[$doc])*
    ///
    /// # Safety
    ///
    /// See the [module documentation](self).
    #[inline]
    pub unsafe fn $name<T: Element>(input: *const T, operand: RawOperand<T>, output: *mut T, len: usize)
    where
      $op: BinaryKernel<T::Bits>,
    {
      // SAFETY: forwarded from the caller.
      unsafe { bitwise::<T, $op>(input, operand, output, len) }
    }
  )+};
}

raw_bitwise! {
  /// Raw [`crate::and`].
  And => and;
  /// Raw [`crate::or`].
  Or => or;
  /// Raw [`crate::xor`].
  Xor => xor;
  /// Raw [`crate::and_not`].
  AndNot => and_not;
}

macro_rules! raw_shift {
  ($($(#[$doc:meta])* $op:ident => $name:ident;)+) => {$(
    $(#[$doc])*
    ///
    /// # Safety
    ///
    /// See the [module documentation](self).
    #[inline]
    pub unsafe fn $name<T: Element>(input: *const T, count: u32, output: *mut T, len: usize)
    where
      $op: ShiftKernel<T>,
    {
      // SAFETY: forwarded from the caller.
      unsafe { shift::<T, $op>(input, count, output, len) }
    }
  )+};
}

raw_shift! {
  /// Raw [`crate::shift_left`].
  ShiftLeft => shift_left;
  /// Raw [`crate::shift_right_logical`].
  ShiftRightLogical => shift_right_logical;
  /// Raw [`crate::shift_right_arithmetic`].
  ShiftRightArithmetic => shift_right_arithmetic;
}

macro_rules! raw_variable_shift {
  ($($(#[$doc:meta])* $op:ident => $name:ident;)+) => {$(
    $(#[$doc])*
    ///
    /// # Safety
    ///
    /// See the [module documentation](self); `counts` must be valid for
    /// `len` reads.
    #[inline]
    pub unsafe fn $name<T: Element>(input: *const T, counts: *const T, output: *mut T, len: usize)
    where
      $op: BinaryKernel<T>,
    {
      // SAFETY: forwarded from the caller.
      unsafe { binary::<T, $op>(input, RawOperand::Buffer(counts), output, len) }
    }
  )+};
}

raw_variable_shift! {
  /// Raw [`crate::shift_left_variable`].
  ShiftLeftVariable => shift_left_variable;
  /// Raw [`crate::shift_right_logical_variable`].
  ShiftRightLogicalVariable => shift_right_logical_variable;
  /// Raw [`crate::shift_right_arithmetic_variable`].
  ShiftRightArithmeticVariable => shift_right_arithmetic_variable;
}

/// Raw [`crate::multiply_widening`].
///
/// # Safety
///
/// See the [module documentation](self). `output` must not overlap the
/// inputs at all.
#[inline]
pub unsafe fn multiply_widening<T: Widening>(input: *const T, operand: RawOperand<T>, output: *mut T::Wide, len: usize)
where
  MultiplyWidening: WidenKernel<T>,
{
  // SAFETY: forwarded from the caller.
  unsafe { widen::<T, MultiplyWidening>(input, operand, output, len) }
}
