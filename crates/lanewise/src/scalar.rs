//! Scalar reference loops.
//!
//! These loops define the result of every operation. The vector drivers use
//! them for the tail that does not fill a register, and on targets (or
//! forced tiers) without vector kernels they do all the work.

use crate::{
  element::{Element, Widening},
  op::{BinaryOp, ShiftOp, WidenOp},
  operand::{Operand, RawOperand},
};

/// Apply `O` to elements `cursor..len`.
///
/// # Safety
///
/// `input`, `output` and a buffer operand must be valid for `len` elements.
/// `output` may alias `input` or the operand exactly (same base pointer).
#[inline(always)]
pub(crate) unsafe fn binary_tail<T: Element, O: BinaryOp<T>>(
  input: *const T,
  operand: RawOperand<T>,
  output: *mut T,
  cursor: usize,
  len: usize,
) {
  for i in cursor..len {
    // SAFETY: `i < len` and the caller guarantees `len` elements.
    unsafe {
      let a = input.add(i).read();
      let b = operand.get(i);
      output.add(i).write(O::apply(a, b));
    }
  }
}

/// Apply shift `O` to elements `cursor..len`. `count` is already reduced.
///
/// # Safety
///
/// As [`binary_tail`].
#[inline(always)]
pub(crate) unsafe fn shift_tail<T: Element, O: ShiftOp<T>>(
  input: *const T,
  count: u32,
  output: *mut T,
  cursor: usize,
  len: usize,
) {
  for i in cursor..len {
    // SAFETY: `i < len` and the caller guarantees `len` elements.
    unsafe {
      output.add(i).write(O::apply(input.add(i).read(), count));
    }
  }
}

/// Apply widening `O` to elements `cursor..len`.
///
/// # Safety
///
/// `input` and a buffer operand valid for `len` reads, `output` valid for
/// `len` writes of the wide type. The output never aliases the inputs.
#[inline(always)]
pub(crate) unsafe fn widen_tail<T: Widening, O: WidenOp<T>>(
  input: *const T,
  operand: RawOperand<T>,
  output: *mut T::Wide,
  cursor: usize,
  len: usize,
) {
  for i in cursor..len {
    // SAFETY: `i < len` and the caller guarantees `len` elements.
    unsafe {
      let a = input.add(i).read();
      let b = operand.get(i);
      output.add(i).write(O::apply(a, b));
    }
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Safe reference API
// ─────────────────────────────────────────────────────────────────────────────

/// Reference `output[i] = O(input[i], operand[i])`, no vector instructions.
///
/// # Panics
///
/// Panics if `output` or a buffer operand is shorter than `input`.
pub fn binary<T: Element, O: BinaryOp<T>>(input: &[T], operand: Operand<'_, T>, output: &mut [T]) {
  crate::ops::check_binary(O::NAME, input.len(), &operand, output.len());
  // SAFETY: lengths checked above; slices do not overlap.
  unsafe { binary_tail::<T, O>(input.as_ptr(), operand.as_raw(), output.as_mut_ptr(), 0, input.len()) }
}

/// Reference uniform shift, no vector instructions.
///
/// # Panics
///
/// Panics if `output` is shorter than `input`.
pub fn shift<T: Element, O: ShiftOp<T>>(input: &[T], count: u32, output: &mut [T]) {
  crate::ops::check_output(O::NAME, input.len(), output.len());
  let count = count & (T::BITS - 1);
  // SAFETY: lengths checked above.
  unsafe { shift_tail::<T, O>(input.as_ptr(), count, output.as_mut_ptr(), 0, input.len()) }
}

/// Reference widening operation, no vector instructions.
///
/// # Panics
///
/// Panics if `output` or a buffer operand is shorter than `input`.
pub fn widen<T: Widening, O: WidenOp<T>>(input: &[T], operand: Operand<'_, T>, output: &mut [T::Wide]) {
  crate::ops::check_binary(O::NAME, input.len(), &operand, output.len());
  // SAFETY: lengths checked above.
  unsafe { widen_tail::<T, O>(input.as_ptr(), operand.as_raw(), output.as_mut_ptr(), 0, input.len()) }
}
