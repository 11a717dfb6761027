//! Cascade drivers.
//!
//! One driver per operand shape. Each walks the tiers from `tier` down,
//! widest first, lets every tier that has a step consume as many whole
//! registers as fit, then finishes with the scalar loop. The returned
//! [`Coverage`] records how many elements each tier processed.
//!
//! Callers guarantee `tier` never exceeds the detected tier: the steps are
//! `#[target_feature]` functions.

use backend::{Coverage, VectorTier};

use crate::{
  element::{Element, Widening},
  kernels::{BinaryKernel, ShiftKernel, WidenKernel},
  operand::RawOperand,
  scalar,
};

/// # Safety
///
/// - `tier <= backend::config().detected`
/// - `input`, `output` and a buffer operand valid for `len` elements
/// - `output` either does not overlap the inputs or aliases them exactly
#[inline]
pub(crate) unsafe fn binary<T: Element, O: BinaryKernel<T>>(
  tier: VectorTier,
  input: *const T,
  operand: RawOperand<T>,
  output: *mut T,
  len: usize,
) -> Coverage {
  let mut coverage = Coverage::default();
  let mut cursor = 0usize;
  for step_tier in tier.cascade() {
    if let Some(step) = O::STEPS.get(step_tier) {
      // SAFETY: the tier is supported (caller contract); pointers forwarded.
      let next = unsafe { step(input, operand, output, cursor, len) };
      coverage.add(step_tier, next - cursor);
      cursor = next;
    }
  }
  coverage.scalar = len - cursor;
  // SAFETY: forwarded from the caller.
  unsafe { scalar::binary_tail::<T, O>(input, operand, output, cursor, len) };
  coverage
}

/// # Safety
///
/// As [`binary`].
#[inline]
pub(crate) unsafe fn shift<T: Element, O: ShiftKernel<T>>(
  tier: VectorTier,
  input: *const T,
  count: u32,
  output: *mut T,
  len: usize,
) -> Coverage {
  let count = count & (T::BITS - 1);
  let mut coverage = Coverage::default();
  let mut cursor = 0usize;
  for step_tier in tier.cascade() {
    if let Some(step) = O::STEPS.get(step_tier) {
      // SAFETY: the tier is supported (caller contract); pointers forwarded.
      let next = unsafe { step(input, count, output, cursor, len) };
      coverage.add(step_tier, next - cursor);
      cursor = next;
    }
  }
  coverage.scalar = len - cursor;
  // SAFETY: forwarded from the caller.
  unsafe { scalar::shift_tail::<T, O>(input, count, output, cursor, len) };
  coverage
}

/// # Safety
///
/// As [`binary`], with `output` valid for `len` wide elements and not
/// overlapping the inputs.
#[inline]
pub(crate) unsafe fn widen<T: Widening, O: WidenKernel<T>>(
  tier: VectorTier,
  input: *const T,
  operand: RawOperand<T>,
  output: *mut T::Wide,
  len: usize,
) -> Coverage {
  let mut coverage = Coverage::default();
  let mut cursor = 0usize;
  for step_tier in tier.cascade() {
    if let Some(step) = O::STEPS.get(step_tier) {
      // SAFETY: the tier is supported (caller contract); pointers forwarded.
      let next = unsafe { step(input, operand, output, cursor, len) };
      coverage.add(step_tier, next - cursor);
      cursor = next;
    }
  }
  coverage.scalar = len - cursor;
  // SAFETY: forwarded from the caller.
  unsafe { scalar::widen_tail::<T, O>(input, operand, output, cursor, len) };
  coverage
}

/// Clamp a requested tier to what the CPU supports.
#[inline]
#[must_use]
pub(crate) fn clamp(tier: VectorTier) -> VectorTier {
  tier.min(backend::config().detected)
}
