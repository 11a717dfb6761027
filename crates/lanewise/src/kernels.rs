//! Kernel tables: which tiers have a vector step for each (operation, type).
//!
//! Every legal pairing gets a [`TierTable`]; a `None` slot means that tier
//! has no instruction for the pair and its share of the buffer goes to the
//! next narrower tier (ultimately the scalar loop).
//!
//! # Coverage on x86_64
//!
//! | Operation | Narrow | Medium | Wide |
//! |-----------|--------|--------|------|
//! | add, subtract | all | all | all |
//! | multiply (float) | f32 f64 | f32 f64 | f32 f64 |
//! | multiply_low | 16/32-bit | 16/32-bit | 16/32/64-bit |
//! | and, or, xor, and_not | all | all | all |
//! | add_saturating | 8/16-bit | 8/16-bit | 8/16-bit |
//! | shift (uniform) | 16/32/64-bit, sra 16/32 | same | + sra 64 |
//! | shift (variable) | - | 32/64-bit, srav 32 | + srav 64 |
//! | multiply_widening | i32 u32 | i32 u32 | i32 u32 |

use backend::TierTable;

use crate::{
  element::{Element, Widening},
  op::*,
  operand::RawOperand,
};

/// Vector step over `[cursor, len)`; returns the first unprocessed index.
pub type BinaryStep<T> = unsafe fn(*const T, RawOperand<T>, *mut T, usize, usize) -> usize;

/// Vector shift step; the count is already reduced modulo the bit width.
pub type ShiftStep<T> = unsafe fn(*const T, u32, *mut T, usize, usize) -> usize;

/// Vector widening step writing double-width results.
pub type WidenStep<T> = unsafe fn(*const T, RawOperand<T>, *mut <T as Widening>::Wide, usize, usize) -> usize;

/// A binary operation with per-tier vector steps.
pub trait BinaryKernel<T: Element>: BinaryOp<T> {
  /// Vector steps by tier.
  const STEPS: TierTable<BinaryStep<T>>;
}

/// A uniform-count shift with per-tier vector steps.
pub trait ShiftKernel<T: Element>: ShiftOp<T> {
  /// Vector steps by tier.
  const STEPS: TierTable<ShiftStep<T>>;
}

/// A widening operation with per-tier vector steps.
pub trait WidenKernel<T: Widening>: WidenOp<T> {
  /// Vector steps by tier.
  const STEPS: TierTable<WidenStep<T>>;
}

#[cfg(target_arch = "x86_64")]
use crate::simd::x86_64;

macro_rules! kernel {
  ($trait:ident, $step:ident, $entry:ident, $op:ident, $t:ty, [$($tier:ident),*]) => {
    impl $trait<$t> for $op {
      const STEPS: TierTable<$step<$t>> = {
        #[allow(unused_mut)]
        let mut table = TierTable::EMPTY;
        #[cfg(target_arch = "x86_64")]
        {
          $( table.$tier = Some(x86_64::$tier::$entry::<$t, $op> as $step<$t>); )*
        }
        table
      };
    }
  };
}

macro_rules! binary_kernels {
  ($($op:ident $tiers:tt: $($t:ty),+;)+) => {$($(
    kernel!(BinaryKernel, BinaryStep, binary, $op, $t, $tiers);
  )+)+};
}

macro_rules! shift_kernels {
  ($($op:ident $tiers:tt: $($t:ty),+;)+) => {$($(
    kernel!(ShiftKernel, ShiftStep, shift, $op, $t, $tiers);
  )+)+};
}

binary_kernels! {
  Add [narrow, medium, wide]: i8, u8, i16, u16, i32, u32, i64, u64, f32, f64;
  Subtract [narrow, medium, wide]: i8, u8, i16, u16, i32, u32, i64, u64, f32, f64;
  Multiply [narrow, medium, wide]: f32, f64;
  MultiplyLow [narrow, medium, wide]: i16, u16, i32, u32;
  MultiplyLow [wide]: i64, u64;
  MultiplyLow []: i8, u8;
  And [narrow, medium, wide]: u8, u16, u32, u64;
  Or [narrow, medium, wide]: u8, u16, u32, u64;
  Xor [narrow, medium, wide]: u8, u16, u32, u64;
  AndNot [narrow, medium, wide]: u8, u16, u32, u64;
  AddSaturating [narrow, medium, wide]: i8, u8, i16, u16;
  ShiftLeftVariable [medium, wide]: i32, u32, i64, u64;
  ShiftRightLogicalVariable [medium, wide]: i32, u32, i64, u64;
  ShiftRightArithmeticVariable [medium, wide]: i32;
  ShiftRightArithmeticVariable [wide]: i64;
}

shift_kernels! {
  ShiftLeft [narrow, medium, wide]: i16, u16, i32, u32, i64, u64;
  ShiftLeft []: i8, u8;
  ShiftRightLogical [narrow, medium, wide]: i16, u16, i32, u32, i64, u64;
  ShiftRightLogical []: i8, u8;
  ShiftRightArithmetic [narrow, medium, wide]: i16, i32;
  ShiftRightArithmetic [wide]: i64;
  ShiftRightArithmetic []: i8;
}

macro_rules! widen_kernel {
  ($($t:ty),+) => {$(
    impl WidenKernel<$t> for MultiplyWidening {
      const STEPS: TierTable<WidenStep<$t>> = {
        #[allow(unused_mut)]
        let mut table = TierTable::EMPTY;
        #[cfg(target_arch = "x86_64")]
        {
          table.narrow = Some(x86_64::narrow::widen::<$t> as WidenStep<$t>);
          table.medium = Some(x86_64::medium::widen::<$t> as WidenStep<$t>);
          table.wide = Some(x86_64::wide::widen::<$t> as WidenStep<$t>);
        }
        table
      };
    }
  )+};
}

widen_kernel!(i32, u32);
