//! 256-bit kernels (AVX2).
//!
//! AVX2 brings per-lane shift counts (`vpsllv` / `vpsrlv` for 32 and 64-bit
//! lanes, `vpsrav` for 32-bit only). Counts are masked to `BITS - 1` before
//! shifting: the hardware zeroes (or sign-fills) lanes whose count is out of
//! range, which would disagree with the scalar loop.

use core::arch::x86_64::*;

use backend::VectorTier;

use super::{Lanes, VectorBinary, VectorShift, WidenLanes, vector_binary, vector_shift};
use crate::{
  element::{Element, Widening},
  op::*,
  operand::RawOperand,
};

/// AVX2 token.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Avx2;

// ─────────────────────────────────────────────────────────────────────────────
// Registers
// ─────────────────────────────────────────────────────────────────────────────

macro_rules! int_lanes {
  ($($t:ty => $set1:ident as $cast:ty;)+) => {$(
    impl Lanes<$t> for Avx2 {
      type Reg = __m256i;
      const LANES: usize = VectorTier::Medium.lanes(<$t as Element>::BYTES);

      #[inline(always)]
      unsafe fn load(ptr: *const $t) -> __m256i {
        unsafe { _mm256_loadu_si256(ptr.cast()) }
      }

      #[inline(always)]
      unsafe fn store(ptr: *mut $t, v: __m256i) {
        unsafe { _mm256_storeu_si256(ptr.cast(), v) }
      }

      #[inline(always)]
      unsafe fn splat(v: $t) -> __m256i {
        unsafe { $set1(v as $cast) }
      }
    }
  )+};
}

int_lanes! {
  i8 => _mm256_set1_epi8 as i8;
  u8 => _mm256_set1_epi8 as i8;
  i16 => _mm256_set1_epi16 as i16;
  u16 => _mm256_set1_epi16 as i16;
  i32 => _mm256_set1_epi32 as i32;
  u32 => _mm256_set1_epi32 as i32;
  i64 => _mm256_set1_epi64x as i64;
  u64 => _mm256_set1_epi64x as i64;
}

impl Lanes<f32> for Avx2 {
  type Reg = __m256;
  const LANES: usize = VectorTier::Medium.lanes(4);

  #[inline(always)]
  unsafe fn load(ptr: *const f32) -> __m256 {
    unsafe { _mm256_loadu_ps(ptr) }
  }

  #[inline(always)]
  unsafe fn store(ptr: *mut f32, v: __m256) {
    unsafe { _mm256_storeu_ps(ptr, v) }
  }

  #[inline(always)]
  unsafe fn splat(v: f32) -> __m256 {
    unsafe { _mm256_set1_ps(v) }
  }
}

impl Lanes<f64> for Avx2 {
  type Reg = __m256d;
  const LANES: usize = VectorTier::Medium.lanes(8);

  #[inline(always)]
  unsafe fn load(ptr: *const f64) -> __m256d {
    unsafe { _mm256_loadu_pd(ptr) }
  }

  #[inline(always)]
  unsafe fn store(ptr: *mut f64, v: __m256d) {
    unsafe { _mm256_storeu_pd(ptr, v) }
  }

  #[inline(always)]
  unsafe fn splat(v: f64) -> __m256d {
    unsafe { _mm256_set1_pd(v) }
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Operations
// ─────────────────────────────────────────────────────────────────────────────

vector_binary! { Avx2 {
  Add {
    i8, u8 => |a, b| _mm256_add_epi8(a, b);
    i16, u16 => |a, b| _mm256_add_epi16(a, b);
    i32, u32 => |a, b| _mm256_add_epi32(a, b);
    i64, u64 => |a, b| _mm256_add_epi64(a, b);
    f32 => |a, b| _mm256_add_ps(a, b);
    f64 => |a, b| _mm256_add_pd(a, b);
  }
  Subtract {
    i8, u8 => |a, b| _mm256_sub_epi8(a, b);
    i16, u16 => |a, b| _mm256_sub_epi16(a, b);
    i32, u32 => |a, b| _mm256_sub_epi32(a, b);
    i64, u64 => |a, b| _mm256_sub_epi64(a, b);
    f32 => |a, b| _mm256_sub_ps(a, b);
    f64 => |a, b| _mm256_sub_pd(a, b);
  }
  Multiply {
    f32 => |a, b| _mm256_mul_ps(a, b);
    f64 => |a, b| _mm256_mul_pd(a, b);
  }
  MultiplyLow {
    i16, u16 => |a, b| _mm256_mullo_epi16(a, b);
    i32, u32 => |a, b| _mm256_mullo_epi32(a, b);
  }
  And {
    u8, u16, u32, u64 => |a, b| _mm256_and_si256(a, b);
  }
  Or {
    u8, u16, u32, u64 => |a, b| _mm256_or_si256(a, b);
  }
  Xor {
    u8, u16, u32, u64 => |a, b| _mm256_xor_si256(a, b);
  }
  AndNot {
    u8, u16, u32, u64 => |a, b| _mm256_andnot_si256(b, a);
  }
  AddSaturating {
    i8 => |a, b| _mm256_adds_epi8(a, b);
    u8 => |a, b| _mm256_adds_epu8(a, b);
    i16 => |a, b| _mm256_adds_epi16(a, b);
    u16 => |a, b| _mm256_adds_epu16(a, b);
  }
  ShiftLeftVariable {
    i32, u32 => |a, b| _mm256_sllv_epi32(a, _mm256_and_si256(b, _mm256_set1_epi32(31)));
    i64, u64 => |a, b| _mm256_sllv_epi64(a, _mm256_and_si256(b, _mm256_set1_epi64x(63)));
  }
  ShiftRightLogicalVariable {
    i32, u32 => |a, b| _mm256_srlv_epi32(a, _mm256_and_si256(b, _mm256_set1_epi32(31)));
    i64, u64 => |a, b| _mm256_srlv_epi64(a, _mm256_and_si256(b, _mm256_set1_epi64x(63)));
  }
  ShiftRightArithmeticVariable {
    i32 => |a, b| _mm256_srav_epi32(a, _mm256_and_si256(b, _mm256_set1_epi32(31)));
  }
}}

vector_shift! { Avx2 {
  ShiftLeft {
    i16, u16 => _mm256_sll_epi16;
    i32, u32 => _mm256_sll_epi32;
    i64, u64 => _mm256_sll_epi64;
  }
  ShiftRightLogical {
    i16, u16 => _mm256_srl_epi16;
    i32, u32 => _mm256_srl_epi32;
    i64, u64 => _mm256_srl_epi64;
  }
  ShiftRightArithmetic {
    i16 => _mm256_sra_epi16;
    i32 => _mm256_sra_epi32;
  }
}}

impl WidenLanes<i32> for Avx2 {
  type Reg = __m256i;
  const LANES: usize = VectorTier::Medium.lanes(8);

  #[inline(always)]
  unsafe fn load_extend(ptr: *const i32) -> __m256i {
    unsafe { _mm256_cvtepi32_epi64(_mm_loadu_si128(ptr.cast())) }
  }

  #[inline(always)]
  unsafe fn splat_extend(v: i32) -> __m256i {
    unsafe { _mm256_set1_epi64x(i64::from(v)) }
  }

  #[inline(always)]
  unsafe fn mul(a: __m256i, b: __m256i) -> __m256i {
    unsafe { _mm256_mul_epi32(a, b) }
  }

  #[inline(always)]
  unsafe fn store(ptr: *mut i64, v: __m256i) {
    unsafe { _mm256_storeu_si256(ptr.cast(), v) }
  }
}

impl WidenLanes<u32> for Avx2 {
  type Reg = __m256i;
  const LANES: usize = VectorTier::Medium.lanes(8);

  #[inline(always)]
  unsafe fn load_extend(ptr: *const u32) -> __m256i {
    unsafe { _mm256_cvtepu32_epi64(_mm_loadu_si128(ptr.cast())) }
  }

  #[inline(always)]
  unsafe fn splat_extend(v: u32) -> __m256i {
    unsafe { _mm256_set1_epi64x(i64::from(v)) }
  }

  #[inline(always)]
  unsafe fn mul(a: __m256i, b: __m256i) -> __m256i {
    unsafe { _mm256_mul_epu32(a, b) }
  }

  #[inline(always)]
  unsafe fn store(ptr: *mut u64, v: __m256i) {
    unsafe { _mm256_storeu_si256(ptr.cast(), v) }
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Entry Points
// ─────────────────────────────────────────────────────────────────────────────

/// # Safety
///
/// CPU supports AVX2; pointers valid for `len` elements; `cursor <= len`.
#[target_feature(enable = "avx2")]
pub(crate) unsafe fn binary<T, O>(
  input: *const T,
  operand: RawOperand<T>,
  output: *mut T,
  cursor: usize,
  len: usize,
) -> usize
where
  T: Element,
  Avx2: Lanes<T>,
  O: VectorBinary<T, Avx2>,
{
  // SAFETY: forwarded from the caller.
  unsafe { super::binary_loop::<T, O, Avx2>(input, operand, output, cursor, len) }
}

/// # Safety
///
/// As [`binary`]; `count < T::BITS`.
#[target_feature(enable = "avx2")]
pub(crate) unsafe fn shift<T, O>(input: *const T, count: u32, output: *mut T, cursor: usize, len: usize) -> usize
where
  T: Element,
  Avx2: Lanes<T>,
  O: VectorShift<T, Avx2>,
{
  // SAFETY: forwarded from the caller.
  unsafe { super::shift_loop::<T, O, Avx2>(input, count, output, cursor, len) }
}

/// # Safety
///
/// As [`binary`], with `output` valid for `len` wide elements.
#[target_feature(enable = "avx2")]
pub(crate) unsafe fn widen<T>(
  input: *const T,
  operand: RawOperand<T>,
  output: *mut T::Wide,
  cursor: usize,
  len: usize,
) -> usize
where
  T: Widening,
  Avx2: WidenLanes<T>,
{
  // SAFETY: forwarded from the caller.
  unsafe { super::widen_loop::<T, Avx2>(input, operand, output, cursor, len) }
}
