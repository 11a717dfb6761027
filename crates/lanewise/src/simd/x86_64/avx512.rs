//! 512-bit kernels (AVX-512 F + BW + DQ).
//!
//! The wide tier requires all three subsets: F for 32/64-bit lanes and
//! floats, BW for 8/16-bit lanes, DQ for `vpmullq`. It is the only tier with
//! a 64-bit multiply-low and 64-bit arithmetic shifts (uniform and
//! per-lane).

use core::arch::x86_64::*;

use backend::VectorTier;

use super::{Lanes, VectorBinary, VectorShift, WidenLanes, vector_binary, vector_shift};
use crate::{
  element::{Element, Widening},
  op::*,
  operand::RawOperand,
};

/// AVX-512 token.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Avx512;

// ─────────────────────────────────────────────────────────────────────────────
// Registers
// ─────────────────────────────────────────────────────────────────────────────

macro_rules! int_lanes {
  ($($t:ty => $set1:ident as $cast:ty;)+) => {$(
    impl Lanes<$t> for Avx512 {
      type Reg = __m512i;
      const LANES: usize = VectorTier::Wide.lanes(<$t as Element>::BYTES);

      #[inline(always)]
      unsafe fn load(ptr: *const $t) -> __m512i {
        unsafe { _mm512_loadu_epi64(ptr.cast()) }
      }

      #[inline(always)]
      unsafe fn store(ptr: *mut $t, v: __m512i) {
        unsafe { _mm512_storeu_epi64(ptr.cast(), v) }
      }

      #[inline(always)]
      unsafe fn splat(v: $t) -> __m512i {
        unsafe { $set1(v as $cast) }
      }
    }
  )+};
}

int_lanes! {
  i8 => _mm512_set1_epi8 as i8;
  u8 => _mm512_set1_epi8 as i8;
  i16 => _mm512_set1_epi16 as i16;
  u16 => _mm512_set1_epi16 as i16;
  i32 => _mm512_set1_epi32 as i32;
  u32 => _mm512_set1_epi32 as i32;
  i64 => _mm512_set1_epi64 as i64;
  u64 => _mm512_set1_epi64 as i64;
}

impl Lanes<f32> for Avx512 {
  type Reg = __m512;
  const LANES: usize = VectorTier::Wide.lanes(4);

  #[inline(always)]
  unsafe fn load(ptr: *const f32) -> __m512 {
    unsafe { _mm512_loadu_ps(ptr) }
  }

  #[inline(always)]
  unsafe fn store(ptr: *mut f32, v: __m512) {
    unsafe { _mm512_storeu_ps(ptr, v) }
  }

  #[inline(always)]
  unsafe fn splat(v: f32) -> __m512 {
    unsafe { _mm512_set1_ps(v) }
  }
}

impl Lanes<f64> for Avx512 {
  type Reg = __m512d;
  const LANES: usize = VectorTier::Wide.lanes(8);

  #[inline(always)]
  unsafe fn load(ptr: *const f64) -> __m512d {
    unsafe { _mm512_loadu_pd(ptr) }
  }

  #[inline(always)]
  unsafe fn store(ptr: *mut f64, v: __m512d) {
    unsafe { _mm512_storeu_pd(ptr, v) }
  }

  #[inline(always)]
  unsafe fn splat(v: f64) -> __m512d {
    unsafe { _mm512_set1_pd(v) }
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Operations
// ─────────────────────────────────────────────────────────────────────────────

vector_binary! { Avx512 {
  Add {
    i8, u8 => |a, b| _mm512_add_epi8(a, b);
    i16, u16 => |a, b| _mm512_add_epi16(a, b);
    i32, u32 => |a, b| _mm512_add_epi32(a, b);
    i64, u64 => |a, b| _mm512_add_epi64(a, b);
    f32 => |a, b| _mm512_add_ps(a, b);
    f64 => |a, b| _mm512_add_pd(a, b);
  }
  Subtract {
    i8, u8 => |a, b| _mm512_sub_epi8(a, b);
    i16, u16 => |a, b| _mm512_sub_epi16(a, b);
    i32, u32 => |a, b| _mm512_sub_epi32(a, b);
    i64, u64 => |a, b| _mm512_sub_epi64(a, b);
    f32 => |a, b| _mm512_sub_ps(a, b);
    f64 => |a, b| _mm512_sub_pd(a, b);
  }
  Multiply {
    f32 => |a, b| _mm512_mul_ps(a, b);
    f64 => |a, b| _mm512_mul_pd(a, b);
  }
  MultiplyLow {
    i16, u16 => |a, b| _mm512_mullo_epi16(a, b);
    i32, u32 => |a, b| _mm512_mullo_epi32(a, b);
    i64, u64 => |a, b| _mm512_mullo_epi64(a, b);
  }
  And {
    u8, u16, u32, u64 => |a, b| _mm512_and_si512(a, b);
  }
  Or {
    u8, u16, u32, u64 => |a, b| _mm512_or_si512(a, b);
  }
  Xor {
    u8, u16, u32, u64 => |a, b| _mm512_xor_si512(a, b);
  }
  AndNot {
    u8, u16, u32, u64 => |a, b| _mm512_andnot_si512(b, a);
  }
  AddSaturating {
    i8 => |a, b| _mm512_adds_epi8(a, b);
    u8 => |a, b| _mm512_adds_epu8(a, b);
    i16 => |a, b| _mm512_adds_epi16(a, b);
    u16 => |a, b| _mm512_adds_epu16(a, b);
  }
  ShiftLeftVariable {
    i32, u32 => |a, b| _mm512_sllv_epi32(a, _mm512_and_si512(b, _mm512_set1_epi32(31)));
    i64, u64 => |a, b| _mm512_sllv_epi64(a, _mm512_and_si512(b, _mm512_set1_epi64(63)));
  }
  ShiftRightLogicalVariable {
    i32, u32 => |a, b| _mm512_srlv_epi32(a, _mm512_and_si512(b, _mm512_set1_epi32(31)));
    i64, u64 => |a, b| _mm512_srlv_epi64(a, _mm512_and_si512(b, _mm512_set1_epi64(63)));
  }
  ShiftRightArithmeticVariable {
    i32 => |a, b| _mm512_srav_epi32(a, _mm512_and_si512(b, _mm512_set1_epi32(31)));
    i64 => |a, b| _mm512_srav_epi64(a, _mm512_and_si512(b, _mm512_set1_epi64(63)));
  }
}}

vector_shift! { Avx512 {
  ShiftLeft {
    i16, u16 => _mm512_sll_epi16;
    i32, u32 => _mm512_sll_epi32;
    i64, u64 => _mm512_sll_epi64;
  }
  ShiftRightLogical {
    i16, u16 => _mm512_srl_epi16;
    i32, u32 => _mm512_srl_epi32;
    i64, u64 => _mm512_srl_epi64;
  }
  ShiftRightArithmetic {
    i16 => _mm512_sra_epi16;
    i32 => _mm512_sra_epi32;
    i64 => _mm512_sra_epi64;
  }
}}

impl WidenLanes<i32> for Avx512 {
  type Reg = __m512i;
  const LANES: usize = VectorTier::Wide.lanes(8);

  #[inline(always)]
  unsafe fn load_extend(ptr: *const i32) -> __m512i {
    unsafe { _mm512_cvtepi32_epi64(_mm256_loadu_si256(ptr.cast())) }
  }

  #[inline(always)]
  unsafe fn splat_extend(v: i32) -> __m512i {
    unsafe { _mm512_set1_epi64(i64::from(v)) }
  }

  #[inline(always)]
  unsafe fn mul(a: __m512i, b: __m512i) -> __m512i {
    unsafe { _mm512_mul_epi32(a, b) }
  }

  #[inline(always)]
  unsafe fn store(ptr: *mut i64, v: __m512i) {
    unsafe { _mm512_storeu_epi64(ptr, v) }
  }
}

impl WidenLanes<u32> for Avx512 {
  type Reg = __m512i;
  const LANES: usize = VectorTier::Wide.lanes(8);

  #[inline(always)]
  unsafe fn load_extend(ptr: *const u32) -> __m512i {
    unsafe { _mm512_cvtepu32_epi64(_mm256_loadu_si256(ptr.cast())) }
  }

  #[inline(always)]
  unsafe fn splat_extend(v: u32) -> __m512i {
    unsafe { _mm512_set1_epi64(i64::from(v)) }
  }

  #[inline(always)]
  unsafe fn mul(a: __m512i, b: __m512i) -> __m512i {
    unsafe { _mm512_mul_epu32(a, b) }
  }

  #[inline(always)]
  unsafe fn store(ptr: *mut u64, v: __m512i) {
    unsafe { _mm512_storeu_epi64(ptr.cast(), v) }
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Entry Points
// ─────────────────────────────────────────────────────────────────────────────

/// # Safety
///
/// CPU supports AVX-512 F, BW and DQ; pointers valid for `len` elements;
/// `cursor <= len`.
#[target_feature(enable = "avx512f,avx512bw,avx512dq")]
pub(crate) unsafe fn binary<T, O>(
  input: *const T,
  operand: RawOperand<T>,
  output: *mut T,
  cursor: usize,
  len: usize,
) -> usize
where
  T: Element,
  Avx512: Lanes<T>,
  O: VectorBinary<T, Avx512>,
{
  // SAFETY: forwarded from the caller.
  unsafe { super::binary_loop::<T, O, Avx512>(input, operand, output, cursor, len) }
}

/// # Safety
///
/// As [`binary`]; `count < T::BITS`.
#[target_feature(enable = "avx512f,avx512bw,avx512dq")]
pub(crate) unsafe fn shift<T, O>(input: *const T, count: u32, output: *mut T, cursor: usize, len: usize) -> usize
where
  T: Element,
  Avx512: Lanes<T>,
  O: VectorShift<T, Avx512>,
{
  // SAFETY: forwarded from the caller.
  unsafe { super::shift_loop::<T, O, Avx512>(input, count, output, cursor, len) }
}

/// # Safety
///
/// As [`binary`], with `output` valid for `len` wide elements.
#[target_feature(enable = "avx512f,avx512bw,avx512dq")]
pub(crate) unsafe fn widen<T>(
  input: *const T,
  operand: RawOperand<T>,
  output: *mut T::Wide,
  cursor: usize,
  len: usize,
) -> usize
where
  T: Widening,
  Avx512: WidenLanes<T>,
{
  // SAFETY: forwarded from the caller.
  unsafe { super::widen_loop::<T, Avx512>(input, operand, output, cursor, len) }
}
