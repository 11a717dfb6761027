//! x86_64 vector kernels.
//!
//! # Layout
//!
//! Each ISA is a zero-sized token ([`sse41::Sse41`], [`avx2::Avx2`],
//! [`avx512::Avx512`]) that implements [`Lanes<T>`] for the element types
//! it can load and store, and
//! each operation marker implements [`VectorBinary`] / [`VectorShift`] for
//! the (type, ISA) pairs that have an instruction. The loops below are
//! generic over all three and are instantiated inside per-ISA
//! `#[target_feature]` entry points, so one loop body serves every tier.
//!
//! | Tier | Token | Target features |
//! |------|-------|-----------------|
//! | narrow | [`sse41::Sse41`] | `sse4.1` |
//! | medium | [`avx2::Avx2`] | `avx2` |
//! | wide | [`avx512::Avx512`] | `avx512f,avx512bw,avx512dq` |
//!
//! Every loop processes whole registers while `cursor + LANES <= len` and
//! returns the new cursor. Nothing is read or written past `len`.

// Baseline SSE2 intrinsics are safe to call; the shared macros wrap every
// intrinsic in `unsafe` regardless of its feature.
#![allow(unused_unsafe)]

use core::arch::x86_64::__m128i;

use crate::{
  element::{Element, Widening},
  operand::RawOperand,
};

pub(crate) mod avx2;
pub(crate) mod avx512;
pub(crate) mod sse41;

pub(crate) use avx2 as medium;
pub(crate) use avx512 as wide;
pub(crate) use sse41 as narrow;

// ─────────────────────────────────────────────────────────────────────────────
// Register Abstraction
// ─────────────────────────────────────────────────────────────────────────────

/// Registers of one ISA holding lanes of `T`.
pub(crate) trait Lanes<T: Element> {
  /// Register type.
  type Reg: Copy;
  /// Elements per register.
  const LANES: usize;

  /// Unaligned load of `LANES` elements.
  unsafe fn load(ptr: *const T) -> Self::Reg;
  /// Unaligned store of `LANES` elements.
  unsafe fn store(ptr: *mut T, v: Self::Reg);
  /// Broadcast `v` to every lane.
  unsafe fn splat(v: T) -> Self::Reg;
}

/// Lanewise `a op b` on registers of ISA `I`.
pub(crate) trait VectorBinary<T: Element, I: Lanes<T>> {
  unsafe fn apply(a: I::Reg, b: I::Reg) -> I::Reg;
}

/// Lanewise shift by a count held in the low 64 bits of `count`.
pub(crate) trait VectorShift<T: Element, I: Lanes<T>> {
  unsafe fn apply(a: I::Reg, count: __m128i) -> I::Reg;
}

/// 32-bit lanes loaded, sign- or zero-extended, multiplied at 64 bits.
pub(crate) trait WidenLanes<T: Widening> {
  /// Register of 64-bit lanes.
  type Reg: Copy;
  /// Input elements per step (= output lanes).
  const LANES: usize;

  /// Load `LANES` narrow elements, extended to 64-bit lanes.
  unsafe fn load_extend(ptr: *const T) -> Self::Reg;
  /// Broadcast `v`, extended to 64 bits.
  unsafe fn splat_extend(v: T) -> Self::Reg;
  /// Full 64-bit product of the low 32 bits of each lane.
  unsafe fn mul(a: Self::Reg, b: Self::Reg) -> Self::Reg;
  /// Store `LANES` wide elements.
  unsafe fn store(ptr: *mut T::Wide, v: Self::Reg);
}

// ─────────────────────────────────────────────────────────────────────────────
// Impl Macros
// ─────────────────────────────────────────────────────────────────────────────

/// `VectorBinary` impls: `Op { types => |a, b| body; }`.
macro_rules! vector_binary {
  ($isa:ty { $( $op:ty { $( $($t:ty),+ => |$a:ident, $b:ident| $body:expr; )+ } )+ }) => {
    $( $( $(
      impl $crate::simd::x86_64::VectorBinary<$t, $isa> for $op {
        #[inline(always)]
        unsafe fn apply(
          $a: <$isa as $crate::simd::x86_64::Lanes<$t>>::Reg,
          $b: <$isa as $crate::simd::x86_64::Lanes<$t>>::Reg,
        ) -> <$isa as $crate::simd::x86_64::Lanes<$t>>::Reg {
          // SAFETY: only reached from entry points with the ISA's features enabled.
          unsafe { $body }
        }
      }
    )+ )+ )+
  };
}

/// `VectorShift` impls: `Op { types => intrinsic; }`.
macro_rules! vector_shift {
  ($isa:ty { $( $op:ty { $( $($t:ty),+ => $f:path; )+ } )+ }) => {
    $( $( $(
      impl $crate::simd::x86_64::VectorShift<$t, $isa> for $op {
        #[inline(always)]
        unsafe fn apply(
          a: <$isa as $crate::simd::x86_64::Lanes<$t>>::Reg,
          count: core::arch::x86_64::__m128i,
        ) -> <$isa as $crate::simd::x86_64::Lanes<$t>>::Reg {
          // SAFETY: only reached from entry points with the ISA's features enabled.
          unsafe { $f(a, count) }
        }
      }
    )+ )+ )+
  };
}

pub(crate) use {vector_binary, vector_shift};

// ─────────────────────────────────────────────────────────────────────────────
// Generic Loops
// ─────────────────────────────────────────────────────────────────────────────

/// # Safety
///
/// The ISA's target features are enabled; pointers valid for `len` elements;
/// `cursor <= len`.
#[inline(always)]
pub(crate) unsafe fn binary_loop<T, O, I>(
  input: *const T,
  operand: RawOperand<T>,
  output: *mut T,
  mut cursor: usize,
  len: usize,
) -> usize
where
  T: Element,
  I: Lanes<T>,
  O: VectorBinary<T, I>,
{
  debug_assert!(cursor <= len);
  // SAFETY: each iteration touches `[cursor, cursor + LANES)` with
  // `cursor + LANES <= len`. Loads precede the store at the same index, so
  // exact aliasing of output with input or operand is fine.
  unsafe {
    match operand {
      RawOperand::Scalar(s) => {
        let b = I::splat(s);
        while len - cursor >= I::LANES {
          let a = I::load(input.add(cursor));
          I::store(output.add(cursor), O::apply(a, b));
          cursor += I::LANES;
        }
      }
      RawOperand::Buffer(rhs) => {
        while len - cursor >= I::LANES {
          let a = I::load(input.add(cursor));
          let b = I::load(rhs.add(cursor));
          I::store(output.add(cursor), O::apply(a, b));
          cursor += I::LANES;
        }
      }
    }
  }
  cursor
}

/// # Safety
///
/// As [`binary_loop`]; `count < T::BITS`.
#[inline(always)]
pub(crate) unsafe fn shift_loop<T, O, I>(input: *const T, count: u32, output: *mut T, mut cursor: usize, len: usize) -> usize
where
  T: Element,
  I: Lanes<T>,
  O: VectorShift<T, I>,
{
  debug_assert!(cursor <= len);
  debug_assert!(count < T::BITS);
  // SAFETY: as in `binary_loop`.
  unsafe {
    let count = core::arch::x86_64::_mm_cvtsi32_si128(count as i32);
    while len - cursor >= I::LANES {
      let a = I::load(input.add(cursor));
      I::store(output.add(cursor), O::apply(a, count));
      cursor += I::LANES;
    }
  }
  cursor
}

/// # Safety
///
/// The ISA's target features are enabled; `input` and a buffer operand
/// valid for `len` reads, `output` for `len` wide writes; `cursor <= len`.
#[inline(always)]
pub(crate) unsafe fn widen_loop<T, I>(
  input: *const T,
  operand: RawOperand<T>,
  output: *mut T::Wide,
  mut cursor: usize,
  len: usize,
) -> usize
where
  T: Widening,
  I: WidenLanes<T>,
{
  debug_assert!(cursor <= len);
  // SAFETY: each iteration touches `[cursor, cursor + LANES)` of all three
  // buffers with `cursor + LANES <= len`.
  unsafe {
    match operand {
      RawOperand::Scalar(s) => {
        let b = I::splat_extend(s);
        while len - cursor >= I::LANES {
          let a = I::load_extend(input.add(cursor));
          I::store(output.add(cursor), I::mul(a, b));
          cursor += I::LANES;
        }
      }
      RawOperand::Buffer(rhs) => {
        while len - cursor >= I::LANES {
          let a = I::load_extend(input.add(cursor));
          let b = I::load_extend(rhs.add(cursor));
          I::store(output.add(cursor), I::mul(a, b));
          cursor += I::LANES;
        }
      }
    }
  }
  cursor
}
