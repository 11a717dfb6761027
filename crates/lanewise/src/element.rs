//! Element types and bit reinterpretation.
//!
//! The ten primitive numeric types the kernels operate on all implement
//! [`Element`]. The trait is sealed: kernels rely on the exact layout of
//! each type and on there being a same-width unsigned bit type.

use core::fmt;

mod sealed {
  pub trait Sealed {}
}

/// Numeric family of an element type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
  /// Two's-complement signed integer.
  Signed,
  /// Unsigned integer.
  Unsigned,
  /// IEEE-754 binary floating point.
  Float,
}

/// A primitive numeric lane type.
pub trait Element: sealed::Sealed + Copy + PartialEq + Default + fmt::Debug + Send + Sync + 'static {
  /// Width in bits.
  const BITS: u32;
  /// Width in bytes.
  const BYTES: usize;
  /// Numeric family.
  const KIND: Kind;
  /// Type name, for diagnostics.
  const NAME: &'static str;

  /// Unsigned integer of the same width.
  type Bits: Element<Bits = Self::Bits> + Integer;

  /// Raw bit pattern.
  fn to_bits(self) -> Self::Bits;
  /// Value with the given bit pattern.
  fn from_bits(bits: Self::Bits) -> Self;
}

/// Integer element types.
pub trait Integer: Element {
  /// Smallest value.
  const MIN: Self;
  /// Largest value.
  const MAX: Self;
  /// Zero.
  const ZERO: Self;
  /// One.
  const ONE: Self;
  /// Every bit set.
  const ALL_ONES: Self;

  /// Truncating conversion from a shift count or test value.
  fn from_u32(value: u32) -> Self;
  /// Low 32 bits of the unsigned pattern, used as a shift count.
  fn low_u32(self) -> u32;
}

/// Signed integer element types.
pub trait Signed: Integer {}

/// Floating-point element types.
pub trait Float: Element {}

/// 32-bit integers whose products are produced at double width.
pub trait Widening: Integer {
  /// Double-width result type.
  type Wide: Integer;

  /// Exact double-width product.
  fn mul_wide(self, rhs: Self) -> Self::Wide;
}

macro_rules! integer_element {
  ($($t:ty => $bits:ty, $kind:ident;)+) => {$(
    impl sealed::Sealed for $t {}

    impl Element for $t {
      const BITS: u32 = <$t>::BITS;
      const BYTES: usize = core::mem::size_of::<$t>();
      const KIND: Kind = Kind::$kind;
      const NAME: &'static str = stringify!($t);

      type Bits = $bits;

      #[inline(always)]
      fn to_bits(self) -> $bits {
        self as $bits
      }

      #[inline(always)]
      fn from_bits(bits: $bits) -> Self {
        bits as $t
      }
    }

    impl Integer for $t {
      const MIN: Self = <$t>::MIN;
      const MAX: Self = <$t>::MAX;
      const ZERO: Self = 0;
      const ONE: Self = 1;
      const ALL_ONES: Self = !0;

      #[inline(always)]
      fn from_u32(value: u32) -> Self {
        value as $t
      }

      #[inline(always)]
      fn low_u32(self) -> u32 {
        (self as $bits) as u32
      }
    }
  )+};
}

integer_element! {
  i8 => u8, Signed;
  u8 => u8, Unsigned;
  i16 => u16, Signed;
  u16 => u16, Unsigned;
  i32 => u32, Signed;
  u32 => u32, Unsigned;
  i64 => u64, Signed;
  u64 => u64, Unsigned;
}

impl Signed for i8 {}
impl Signed for i16 {}
impl Signed for i32 {}
impl Signed for i64 {}

macro_rules! float_element {
  ($($t:ty => $bits:ty;)+) => {$(
    impl sealed::Sealed for $t {}

    impl Element for $t {
      const BITS: u32 = <$bits>::BITS;
      const BYTES: usize = core::mem::size_of::<$t>();
      const KIND: Kind = Kind::Float;
      const NAME: &'static str = stringify!($t);

      type Bits = $bits;

      #[inline(always)]
      fn to_bits(self) -> $bits {
        <$t>::to_bits(self)
      }

      #[inline(always)]
      fn from_bits(bits: $bits) -> Self {
        <$t>::from_bits(bits)
      }
    }

    impl Float for $t {}
  )+};
}

float_element! {
  f32 => u32;
  f64 => u64;
}

impl Widening for i32 {
  type Wide = i64;

  #[inline(always)]
  fn mul_wide(self, rhs: Self) -> i64 {
    i64::from(self) * i64::from(rhs)
  }
}

impl Widening for u32 {
  type Wide = u64;

  #[inline(always)]
  fn mul_wide(self, rhs: Self) -> u64 {
    u64::from(self) * u64::from(rhs)
  }
}

/// Reinterpret the bit pattern of `value` as another type of the same width.
///
/// The pattern is preserved exactly: `reinterpret::<f32, u32>(-0.0)` is
/// `0x8000_0000`, and NaN payloads survive a round trip.
///
/// ```
/// let bits: u32 = lanewise::reinterpret(1.0f32);
/// assert_eq!(bits, 0x3F80_0000);
/// let back: f32 = lanewise::reinterpret(bits);
/// assert_eq!(back, 1.0);
/// ```
#[inline(always)]
#[must_use]
pub fn reinterpret<F, T>(value: F) -> T
where
  F: Element,
  T: Element<Bits = F::Bits>,
{
  T::from_bits(value.to_bits())
}

/// View a slice as its same-width unsigned bit pattern.
#[inline(always)]
pub(crate) fn bits_of<T: Element>(values: &[T]) -> &[T::Bits] {
  const {
    assert!(size_of::<T>() == size_of::<T::Bits>());
    assert!(align_of::<T>() == align_of::<T::Bits>());
  }
  // SAFETY: `T` and `T::Bits` have identical size and alignment, and every
  // bit pattern is a valid value of both.
  unsafe { core::slice::from_raw_parts(values.as_ptr().cast(), values.len()) }
}

/// Mutable variant of [`bits_of`].
#[inline(always)]
pub(crate) fn bits_of_mut<T: Element>(values: &mut [T]) -> &mut [T::Bits] {
  const {
    assert!(size_of::<T>() == size_of::<T::Bits>());
    assert!(align_of::<T>() == align_of::<T::Bits>());
  }
  // SAFETY: as in `bits_of`; the borrow is exclusive for its whole lifetime.
  unsafe { core::slice::from_raw_parts_mut(values.as_mut_ptr().cast(), values.len()) }
}
