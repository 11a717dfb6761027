//! Elementwise numeric kernels with runtime vector-width dispatch.
//!
//! `lanewise` applies one operation to every element of a buffer, pairing
//! each element with either a broadcast scalar or the element at the same
//! index of a second buffer. The widest register width the CPU supports is
//! detected once per process; buffers are then processed widest tier first,
//! with narrower tiers and finally a scalar loop covering the remainder.
//!
//! # Quick Start
//!
//! ```
//! use lanewise::Operand;
//!
//! let a = [1i32, 2, 3, 4, 5];
//! let b = [10i32, 20, 30, 40, 50];
//! let mut out = [0i32; 5];
//!
//! lanewise::add(&a, Operand::from(&b), &mut out);
//! assert_eq!(out, [11, 22, 33, 44, 55]);
//!
//! lanewise::shift_left_in_place(&mut out, 1);
//! assert_eq!(out, [22, 44, 66, 88, 110]);
//! ```
//!
//! # Operations
//!
//! | Family | Functions | Element types |
//! |--------|-----------|---------------|
//! | Arithmetic | [`add`], [`subtract`] | all |
//! | | [`multiply`] | `f32`, `f64` |
//! | | [`multiply_low`] | all integers |
//! | | [`add_saturating`] | 8- and 16-bit integers |
//! | | [`multiply_widening`] | `i32`, `u32` (64-bit output) |
//! | Bitwise | [`and`], [`or`], [`xor`], [`and_not`] | all (on the bit pattern) |
//! | Shifts | [`shift_left`], [`shift_right_logical`] | all integers |
//! | | [`shift_right_arithmetic`] | signed integers |
//! | | [`shift_left_variable`], [`shift_right_logical_variable`] | 32- and 64-bit integers |
//! | | [`shift_right_arithmetic_variable`] | `i32`, `i64` |
//!
//! Pairs outside this table do not compile. Integer arithmetic wraps.
//! Shift counts are taken modulo the element width.
//!
//! # Tiers
//!
//! | Tier | Register | x86_64 instruction set |
//! |------|----------|------------------------|
//! | [`VectorTier::Wide`] | 512-bit | AVX-512 F/BW/DQ |
//! | [`VectorTier::Medium`] | 256-bit | AVX2 |
//! | [`VectorTier::Narrow`] | 128-bit | SSE4.1 |
//! | [`VectorTier::None`] | scalar | |
//!
//! Other architectures run the scalar loop. Set `LANEWISE_FORCE` (or call
//! [`set_force`] before the first operation) to cap the tier.
//!
//! # Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `std` | Yes | Runtime CPU detection and `LANEWISE_FORCE` |
//! | `alloc` | Yes | Kernel test harness (implied by `std`) |
//! | `log` | Yes | Tier resolution diagnostics through the `log` facade |
//!
//! Without `std`, tiers come from compile-time target features only.

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![no_std]

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(any(feature = "std", test))]
extern crate std;

mod dispatch;
mod element;
mod introspect;
pub mod kernels;
mod op;
mod operand;
mod ops;
pub mod raw;
pub mod scalar;
mod simd;


#[cfg(all(test, feature = "alloc"))]
mod proptests;

#[doc(hidden)]
pub mod __internal {
  #[cfg(feature = "alloc")]
  pub use crate::kernel_test;
}

pub use backend::{ConfigError, Coverage, ForceTier, TierConfig, VectorTier, active_tier, set_force};
pub use element::{Element, Float, Integer, Kind, Signed, Widening, reinterpret};
pub use introspect::{DispatchInfo, kernel_name, lanes_for, shift_kernel_name, widen_kernel_name};
pub use kernels::{BinaryKernel, ShiftKernel, WidenKernel};
pub use op::{
  Add, AddSaturating, And, AndNot, BinaryOp, Multiply, MultiplyLow, MultiplyWidening, Op, Or, ShiftLeft,
  ShiftLeftVariable, ShiftOp, ShiftRightArithmetic, ShiftRightArithmeticVariable, ShiftRightLogical,
  ShiftRightLogicalVariable, Subtract, WidenOp, Xor,
};
pub use operand::{Operand, RawOperand};
pub use ops::{
  add, add_in_place, add_saturating, add_saturating_in_place, and, and_in_place, and_not, and_not_in_place, binary,
  binary_in_place, bitwise, bitwise_in_place, multiply, multiply_in_place, multiply_low, multiply_low_in_place,
  multiply_widening, or, or_in_place, shift, shift_in_place, shift_left, shift_left_in_place, shift_left_variable,
  shift_left_variable_in_place, shift_right_arithmetic, shift_right_arithmetic_in_place,
  shift_right_arithmetic_variable, shift_right_arithmetic_variable_in_place, shift_right_logical,
  shift_right_logical_in_place, shift_right_logical_variable, shift_right_logical_variable_in_place, subtract,
  subtract_in_place, widen, xor, xor_in_place,
};
