//! Second operand of a binary operation.

use crate::element::Element;

/// Broadcast scalar or lockstep buffer.
///
/// A `Buffer` operand must be at least as long as the input it is paired
/// with; only the first `input.len()` elements are read.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Operand<'a, T> {
  /// Same value for every element.
  Scalar(T),
  /// `operand[i]` pairs with `input[i]`.
  Buffer(&'a [T]),
}

impl<'a, T: Element> Operand<'a, T> {
  /// Number of elements a buffer operand provides; `None` for a scalar.
  #[inline]
  #[must_use]
  pub fn len(&self) -> Option<usize> {
    match self {
      Self::Scalar(_) => None,
      Self::Buffer(buf) => Some(buf.len()),
    }
  }

  /// Same operand viewed as its unsigned bit pattern.
  #[inline]
  pub(crate) fn to_bits(self) -> Operand<'a, T::Bits> {
    match self {
      Self::Scalar(v) => Operand::Scalar(v.to_bits()),
      Self::Buffer(buf) => Operand::Buffer(crate::element::bits_of(buf)),
    }
  }

  #[inline]
  pub(crate) fn as_raw(self) -> RawOperand<T> {
    match self {
      Self::Scalar(v) => RawOperand::Scalar(v),
      Self::Buffer(buf) => RawOperand::Buffer(buf.as_ptr()),
    }
  }
}

impl<'a, T> From<&'a [T]> for Operand<'a, T> {
  #[inline]
  fn from(buf: &'a [T]) -> Self {
    Self::Buffer(buf)
  }
}

impl<'a, T, const N: usize> From<&'a [T; N]> for Operand<'a, T> {
  #[inline]
  fn from(buf: &'a [T; N]) -> Self {
    Self::Buffer(buf)
  }
}

/// Pointer form of [`Operand`] used by the raw API and the kernels.
///
/// A `Buffer` pointer must be valid for reads of as many elements as the
/// operation's `len`. It may alias the input or the output.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RawOperand<T> {
  /// Same value for every element.
  Scalar(T),
  /// Lockstep buffer.
  Buffer(*const T),
}

impl<T: Element> RawOperand<T> {
  /// Element `i` of the operand.
  ///
  /// # Safety
  ///
  /// For a buffer operand, `i` must be within the readable range.
  #[inline(always)]
  pub(crate) unsafe fn get(self, i: usize) -> T {
    match self {
      Self::Scalar(v) => v,
      // SAFETY: caller guarantees `i` is in bounds.
      Self::Buffer(ptr) => unsafe { ptr.add(i).read() },
    }
  }

  /// Same operand viewed as its unsigned bit pattern.
  #[inline]
  #[must_use]
  pub fn to_bits(self) -> RawOperand<T::Bits> {
    match self {
      Self::Scalar(v) => RawOperand::Scalar(v.to_bits()),
      Self::Buffer(ptr) => RawOperand::Buffer(ptr.cast()),
    }
  }
}
