//! 128-bit kernels (SSE4.1).
//!
//! SSE4.1 adds `pmulld` (32-bit multiply-low) and `pmuldq` / `pmovsxdq`
//! (signed widening) on top of SSE2. There is no 8-bit shift, no 8-bit or
//! 64-bit multiply-low, no 64-bit arithmetic shift and no per-lane shift
//! count at this width; those pairs fall through to the scalar loop.

use core::arch::x86_64::*;

use backend::VectorTier;

use super::{Lanes, VectorBinary, VectorShift, WidenLanes, vector_binary, vector_shift};
use crate::{
  element::{Element, Widening},
  op::*,
  operand::RawOperand,
};

/// SSE4.1 token.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Sse41;

// ─────────────────────────────────────────────────────────────────────────────
// Registers
// ─────────────────────────────────────────────────────────────────────────────

macro_rules! int_lanes {
  ($($t:ty => $set1:ident as $cast:ty;)+) => {$(
    impl Lanes<$t> for Sse41 {
      type Reg = __m128i;
      const LANES: usize = VectorTier::Narrow.lanes(<$t as Element>::BYTES);

      #[inline(always)]
      unsafe fn load(ptr: *const $t) -> __m128i {
        unsafe { _mm_loadu_si128(ptr.cast()) }
      }

      #[inline(always)]
      unsafe fn store(ptr: *mut $t, v: __m128i) {
        unsafe { _mm_storeu_si128(ptr.cast(), v) }
      }

      #[inline(always)]
      unsafe fn splat(v: $t) -> __m128i {
        unsafe { $set1(v as $cast) }
      }
    }
  )+};
}

int_lanes! {
  i8 => _mm_set1_epi8 as i8;
  u8 => _mm_set1_epi8 as i8;
  i16 => _mm_set1_epi16 as i16;
  u16 => _mm_set1_epi16 as i16;
  i32 => _mm_set1_epi32 as i32;
  u32 => _mm_set1_epi32 as i32;
  i64 => _mm_set1_epi64x as i64;
  u64 => _mm_set1_epi64x as i64;
}

impl Lanes<f32> for Sse41 {
  type Reg = __m128;
  const LANES: usize = VectorTier::Narrow.lanes(4);

  #[inline(always)]
  unsafe fn load(ptr: *const f32) -> __m128 {
    unsafe { _mm_loadu_ps(ptr) }
  }

  #[inline(always)]
  unsafe fn store(ptr: *mut f32, v: __m128) {
    unsafe { _mm_storeu_ps(ptr, v) }
  }

  #[inline(always)]
  unsafe fn splat(v: f32) -> __m128 {
    unsafe { _mm_set1_ps(v) }
  }
}

impl Lanes<f64> for Sse41 {
  type Reg = __m128d;
  const LANES: usize = VectorTier::Narrow.lanes(8);

  #[inline(always)]
  unsafe fn load(ptr: *const f64) -> __m128d {
    unsafe { _mm_loadu_pd(ptr) }
  }

  #[inline(always)]
  unsafe fn store(ptr: *mut f64, v: __m128d) {
    unsafe { _mm_storeu_pd(ptr, v) }
  }

  #[inline(always)]
  unsafe fn splat(v: f64) -> __m128d {
    unsafe { _mm_set1_pd(v) }
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Operations
// ─────────────────────────────────────────────────────────────────────────────

vector_binary! { Sse41 {
  Add {
    i8, u8 => |a, b| _mm_add_epi8(a, b);
    i16, u16 => |a, b| _mm_add_epi16(a, b);
    i32, u32 => |a, b| _mm_add_epi32(a, b);
    i64, u64 => |a, b| _mm_add_epi64(a, b);
    f32 => |a, b| _mm_add_ps(a, b);
    f64 => |a, b| _mm_add_pd(a, b);
  }
  Subtract {
    i8, u8 => |a, b| _mm_sub_epi8(a, b);
    i16, u16 => |a, b| _mm_sub_epi16(a, b);
    i32, u32 => |a, b| _mm_sub_epi32(a, b);
    i64, u64 => |a, b| _mm_sub_epi64(a, b);
    f32 => |a, b| _mm_sub_ps(a, b);
    f64 => |a, b| _mm_sub_pd(a, b);
  }
  Multiply {
    f32 => |a, b| _mm_mul_ps(a, b);
    f64 => |a, b| _mm_mul_pd(a, b);
  }
  MultiplyLow {
    i16, u16 => |a, b| _mm_mullo_epi16(a, b);
    i32, u32 => |a, b| _mm_mullo_epi32(a, b);
  }
  And {
    u8, u16, u32, u64 => |a, b| _mm_and_si128(a, b);
  }
  Or {
    u8, u16, u32, u64 => |a, b| _mm_or_si128(a, b);
  }
  Xor {
    u8, u16, u32, u64 => |a, b| _mm_xor_si128(a, b);
  }
  AndNot {
    // pandn computes !first & second.
    u8, u16, u32, u64 => |a, b| _mm_andnot_si128(b, a);
  }
  AddSaturating {
    i8 => |a, b| _mm_adds_epi8(a, b);
    u8 => |a, b| _mm_adds_epu8(a, b);
    i16 => |a, b| _mm_adds_epi16(a, b);
    u16 => |a, b| _mm_adds_epu16(a, b);
  }
}}

vector_shift! { Sse41 {
  ShiftLeft {
    i16, u16 => _mm_sll_epi16;
    i32, u32 => _mm_sll_epi32;
    i64, u64 => _mm_sll_epi64;
  }
  ShiftRightLogical {
    i16, u16 => _mm_srl_epi16;
    i32, u32 => _mm_srl_epi32;
    i64, u64 => _mm_srl_epi64;
  }
  ShiftRightArithmetic {
    i16 => _mm_sra_epi16;
    i32 => _mm_sra_epi32;
  }
}}

impl WidenLanes<i32> for Sse41 {
  type Reg = __m128i;
  const LANES: usize = VectorTier::Narrow.lanes(8);

  #[inline(always)]
  unsafe fn load_extend(ptr: *const i32) -> __m128i {
    unsafe { _mm_cvtepi32_epi64(_mm_loadl_epi64(ptr.cast())) }
  }

  #[inline(always)]
  unsafe fn splat_extend(v: i32) -> __m128i {
    unsafe { _mm_set1_epi64x(i64::from(v)) }
  }

  #[inline(always)]
  unsafe fn mul(a: __m128i, b: __m128i) -> __m128i {
    unsafe { _mm_mul_epi32(a, b) }
  }

  #[inline(always)]
  unsafe fn store(ptr: *mut i64, v: __m128i) {
    unsafe { _mm_storeu_si128(ptr.cast(), v) }
  }
}

impl WidenLanes<u32> for Sse41 {
  type Reg = __m128i;
  const LANES: usize = VectorTier::Narrow.lanes(8);

  #[inline(always)]
  unsafe fn load_extend(ptr: *const u32) -> __m128i {
    unsafe { _mm_cvtepu32_epi64(_mm_loadl_epi64(ptr.cast())) }
  }

  #[inline(always)]
  unsafe fn splat_extend(v: u32) -> __m128i {
    unsafe { _mm_set1_epi64x(i64::from(v)) }
  }

  #[inline(always)]
  unsafe fn mul(a: __m128i, b: __m128i) -> __m128i {
    unsafe { _mm_mul_epu32(a, b) }
  }

  #[inline(always)]
  unsafe fn store(ptr: *mut u64, v: __m128i) {
    unsafe { _mm_storeu_si128(ptr.cast(), v) }
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Entry Points
// ─────────────────────────────────────────────────────────────────────────────

/// # Safety
///
/// CPU supports SSE4.1; pointers valid for `len` elements; `cursor <= len`.
#[target_feature(enable = "sse4.1")]
pub(crate) unsafe fn binary<T, O>(
  input: *const T,
  operand: RawOperand<T>,
  output: *mut T,
  cursor: usize,
  len: usize,
) -> usize
where
  T: Element,
  Sse41: Lanes<T>,
  O: VectorBinary<T, Sse41>,
{
  // SAFETY: forwarded from the caller.
  unsafe { super::binary_loop::<T, O, Sse41>(input, operand, output, cursor, len) }
}

/// # Safety
///
/// As [`binary`]; `count < T::BITS`.
#[target_feature(enable = "sse4.1")]
pub(crate) unsafe fn shift<T, O>(input: *const T, count: u32, output: *mut T, cursor: usize, len: usize) -> usize
where
  T: Element,
  Sse41: Lanes<T>,
  O: VectorShift<T, Sse41>,
{
  // SAFETY: forwarded from the caller.
  unsafe { super::shift_loop::<T, O, Sse41>(input, count, output, cursor, len) }
}

/// # Safety
///
/// As [`binary`], with `output` valid for `len` wide elements.
#[target_feature(enable = "sse4.1")]
pub(crate) unsafe fn widen<T>(
  input: *const T,
  operand: RawOperand<T>,
  output: *mut T::Wide,
  cursor: usize,
  len: usize,
) -> usize
where
  T: Widening,
  Sse41: WidenLanes<T>,
{
  // SAFETY: forwarded from the caller.
  unsafe { super::widen_loop::<T, Sse41>(input, operand, output, cursor, len) }
}
