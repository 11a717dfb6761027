//! Operation markers and their scalar semantics.
//!
//! Each operation is a zero-sized type. Which element types an operation
//! accepts is decided by which of [`BinaryOp`], [`ShiftOp`] and [`WidenOp`]
//! it implements, so an illegal pairing such as saturating add on `f32` is
//! a compile error rather than a runtime one.
//!
//! The `apply` functions here are the ground truth every vector kernel is
//! tested against.
//!
//! # Semantics
//!
//! | Operation | Types | Result |
//! |-----------|-------|--------|
//! | [`Add`], [`Subtract`] | all | wrapping (integers), IEEE-754 (floats) |
//! | [`Multiply`] | `f32 f64` | IEEE-754 product |
//! | [`MultiplyLow`] | integers | low half of the product |
//! | [`And`], [`Or`], [`Xor`], [`AndNot`] | unsigned bit types | bitwise; `and_not(a, b) = a & !b` |
//! | [`AddSaturating`] | 8/16-bit integers | clamped to `[MIN, MAX]` |
//! | [`ShiftLeft`], [`ShiftRightLogical`] | integers | count modulo bit width |
//! | [`ShiftRightArithmetic`] | signed integers | count modulo bit width |
//! | `*Variable` shifts | 32/64-bit integers | per-lane count modulo bit width |
//! | [`MultiplyWidening`] | `i32 u32` | exact double-width product |

use crate::element::{Element, Widening};

/// Name shared by every operation marker.
pub trait Op: Copy + Default + 'static {
  /// Operation name, for diagnostics.
  const NAME: &'static str;
}

/// `output[i] = apply(input[i], operand[i])`.
pub trait BinaryOp<T: Element>: Op {
  /// Scalar semantics.
  fn apply(a: T, b: T) -> T;
}

/// `output[i] = apply(input[i], count)` with one count for the whole buffer.
pub trait ShiftOp<T: Element>: Op {
  /// Scalar semantics. `count` is already reduced modulo `T::BITS`.
  fn apply(a: T, count: u32) -> T;
}

/// `output[i] = apply(input[i], operand[i])` into a double-width buffer.
pub trait WidenOp<T: Widening>: Op {
  /// Scalar semantics.
  fn apply(a: T, b: T) -> T::Wide;
}

macro_rules! ops {
  ($($(#[$meta:meta])* $name:ident => $label:literal;)+) => {$(
    $(#[$meta])*
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct $name;

    impl Op for $name {
      const NAME: &'static str = $label;
    }
  )+};
}

ops! {
  /// Elementwise addition.
  Add => "add";
  /// Elementwise subtraction.
  Subtract => "subtract";
  /// Floating-point multiplication.
  Multiply => "multiply";
  /// Integer multiplication keeping the low half.
  MultiplyLow => "multiply_low";
  /// Bitwise AND.
  And => "and";
  /// Bitwise OR.
  Or => "or";
  /// Bitwise XOR.
  Xor => "xor";
  /// `input & !operand`.
  AndNot => "and_not";
  /// Addition clamped to the type's range.
  AddSaturating => "add_saturating";
  /// Logical left shift by a uniform count.
  ShiftLeft => "shift_left";
  /// Logical right shift by a uniform count (zeros shifted in).
  ShiftRightLogical => "shift_right_logical";
  /// Arithmetic right shift by a uniform count (sign bit replicated).
  ShiftRightArithmetic => "shift_right_arithmetic";
  /// Logical left shift by a per-lane count.
  ShiftLeftVariable => "shift_left_variable";
  /// Logical right shift by a per-lane count.
  ShiftRightLogicalVariable => "shift_right_logical_variable";
  /// Arithmetic right shift by a per-lane count.
  ShiftRightArithmeticVariable => "shift_right_arithmetic_variable";
  /// 32 x 32 -> 64-bit multiplication.
  MultiplyWidening => "multiply_widening";
}

// ─────────────────────────────────────────────────────────────────────────────
// Arithmetic
// ─────────────────────────────────────────────────────────────────────────────

macro_rules! integer_arith {
  ($($t:ty)+) => {$(
    impl BinaryOp<$t> for Add {
      #[inline(always)]
      fn apply(a: $t, b: $t) -> $t {
        a.wrapping_add(b)
      }
    }

    impl BinaryOp<$t> for Subtract {
      #[inline(always)]
      fn apply(a: $t, b: $t) -> $t {
        a.wrapping_sub(b)
      }
    }

    impl BinaryOp<$t> for MultiplyLow {
      #[inline(always)]
      fn apply(a: $t, b: $t) -> $t {
        a.wrapping_mul(b)
      }
    }
  )+};
}

integer_arith!(i8 u8 i16 u16 i32 u32 i64 u64);

macro_rules! float_arith {
  ($($t:ty)+) => {$(
    impl BinaryOp<$t> for Add {
      #[inline(always)]
      fn apply(a: $t, b: $t) -> $t {
        a + b
      }
    }

    impl BinaryOp<$t> for Subtract {
      #[inline(always)]
      fn apply(a: $t, b: $t) -> $t {
        a - b
      }
    }

    impl BinaryOp<$t> for Multiply {
      #[inline(always)]
      fn apply(a: $t, b: $t) -> $t {
        a * b
      }
    }
  )+};
}

float_arith!(f32 f64);

macro_rules! saturating {
  ($($t:ty)+) => {$(
    impl BinaryOp<$t> for AddSaturating {
      #[inline(always)]
      fn apply(a: $t, b: $t) -> $t {
        a.saturating_add(b)
      }
    }
  )+};
}

saturating!(i8 u8 i16 u16);

// ─────────────────────────────────────────────────────────────────────────────
// Bitwise (unsigned bit types; other types reach these through `Element::Bits`)
// ─────────────────────────────────────────────────────────────────────────────

macro_rules! bitwise {
  ($($t:ty)+) => {$(
    impl BinaryOp<$t> for And {
      #[inline(always)]
      fn apply(a: $t, b: $t) -> $t {
        a & b
      }
    }

    impl BinaryOp<$t> for Or {
      #[inline(always)]
      fn apply(a: $t, b: $t) -> $t {
        a | b
      }
    }

    impl BinaryOp<$t> for Xor {
      #[inline(always)]
      fn apply(a: $t, b: $t) -> $t {
        a ^ b
      }
    }

    impl BinaryOp<$t> for AndNot {
      #[inline(always)]
      fn apply(a: $t, b: $t) -> $t {
        a & !b
      }
    }
  )+};
}

bitwise!(u8 u16 u32 u64);

// ─────────────────────────────────────────────────────────────────────────────
// Shifts
// ─────────────────────────────────────────────────────────────────────────────

macro_rules! shifts {
  ($($t:ty => $u:ty),+ $(,)?) => {$(
    impl ShiftOp<$t> for ShiftLeft {
      #[inline(always)]
      fn apply(a: $t, count: u32) -> $t {
        a.wrapping_shl(count)
      }
    }

    impl ShiftOp<$t> for ShiftRightLogical {
      #[inline(always)]
      fn apply(a: $t, count: u32) -> $t {
        (a as $u).wrapping_shr(count) as $t
      }
    }
  )+};
}

shifts!(i8 => u8, u8 => u8, i16 => u16, u16 => u16, i32 => u32, u32 => u32, i64 => u64, u64 => u64);

macro_rules! arithmetic_shift {
  ($($t:ty)+) => {$(
    impl ShiftOp<$t> for ShiftRightArithmetic {
      #[inline(always)]
      fn apply(a: $t, count: u32) -> $t {
        a.wrapping_shr(count)
      }
    }
  )+};
}

arithmetic_shift!(i8 i16 i32 i64);

macro_rules! variable_shifts {
  ($($t:ty => $u:ty),+ $(,)?) => {$(
    impl BinaryOp<$t> for ShiftLeftVariable {
      #[inline(always)]
      fn apply(a: $t, count: $t) -> $t {
        a.wrapping_shl(count as u32)
      }
    }

    impl BinaryOp<$t> for ShiftRightLogicalVariable {
      #[inline(always)]
      fn apply(a: $t, count: $t) -> $t {
        (a as $u).wrapping_shr(count as u32) as $t
      }
    }
  )+};
}

variable_shifts!(i32 => u32, u32 => u32, i64 => u64, u64 => u64);

impl BinaryOp<i32> for ShiftRightArithmeticVariable {
  #[inline(always)]
  fn apply(a: i32, count: i32) -> i32 {
    a.wrapping_shr(count as u32)
  }
}

impl BinaryOp<i64> for ShiftRightArithmeticVariable {
  #[inline(always)]
  fn apply(a: i64, count: i64) -> i64 {
    a.wrapping_shr(count as u32)
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Widening
// ─────────────────────────────────────────────────────────────────────────────

impl<T: Widening> WidenOp<T> for MultiplyWidening {
  #[inline(always)]
  fn apply(a: T, b: T) -> T::Wide {
    a.mul_wide(b)
  }
}
