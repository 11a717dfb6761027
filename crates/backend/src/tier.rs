//! Vector width tiers.
//!
//! Tiers represent levels of vector-instruction width, from scalar-only to
//! 512-bit registers. Higher tiers process more elements per instruction but
//! have stricter hardware requirements.
//!
//! # Tier Overview
//!
//! | Tier | Width | x86_64 | Lanes (8/16/32/64-bit) |
//! |------|-------|--------|------------------------|
//! | None | - | any | - |
//! | Narrow | 128-bit | SSE4.1 | 16 / 8 / 4 / 2 |
//! | Medium | 256-bit | AVX2 | 32 / 16 / 8 / 4 |
//! | Wide | 512-bit | AVX-512 F+BW+DQ | 64 / 32 / 16 / 8 |

use core::fmt;

use platform::{Arch, Caps};

/// Vector width tier.
///
/// Tiers are ordered from lowest (always available) to highest. Ordering
/// allows `tier >= VectorTier::Medium` style checks and lets a forced tier be
/// clamped to the detected one with `min`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum VectorTier {
  /// No vector instructions: every element goes through the scalar loop.
  #[default]
  None = 0,
  /// 128-bit registers.
  Narrow = 1,
  /// 256-bit registers.
  Medium = 2,
  /// 512-bit registers.
  Wide = 3,
}

/// Elements per register, indexed by `[tier][log2(element bytes)]`.
///
/// Row 0 is the scalar tier, which has no lanes.
pub const LANE_TABLE: [[usize; 4]; 4] = [
  [0, 0, 0, 0],
  [16, 8, 4, 2],
  [32, 16, 8, 4],
  [64, 32, 16, 8],
];

impl VectorTier {
  /// All tiers in ascending order.
  pub const ALL: [Self; 4] = [Self::None, Self::Narrow, Self::Medium, Self::Wide];

  /// Convert to numeric value.
  #[inline]
  #[must_use]
  pub const fn as_u8(self) -> u8 {
    self as u8
  }

  /// Inverse of [`as_u8`](Self::as_u8); out-of-range values yield `None`.
  #[inline]
  #[must_use]
  pub const fn from_u8(value: u8) -> Option<Self> {
    match value {
      0 => Some(Self::None),
      1 => Some(Self::Narrow),
      2 => Some(Self::Medium),
      3 => Some(Self::Wide),
      _ => None,
    }
  }

  /// Human-readable tier name.
  #[inline]
  #[must_use]
  pub const fn name(self) -> &'static str {
    match self {
      Self::None => "none",
      Self::Narrow => "narrow",
      Self::Medium => "medium",
      Self::Wide => "wide",
    }
  }

  /// Register width in bits (0 for the scalar tier).
  #[inline]
  #[must_use]
  pub const fn bits(self) -> usize {
    match self {
      Self::None => 0,
      Self::Narrow => 128,
      Self::Medium => 256,
      Self::Wide => 512,
    }
  }

  /// Register width in bytes (0 for the scalar tier).
  #[inline]
  #[must_use]
  pub const fn bytes(self) -> usize {
    self.bits() / 8
  }

  /// Elements of `elem_bytes` bytes per register at this tier.
  ///
  /// # Panics
  ///
  /// Panics if `elem_bytes` is not 1, 2, 4 or 8.
  #[inline]
  #[must_use]
  pub const fn lanes(self, elem_bytes: usize) -> usize {
    let col = match elem_bytes {
      1 => 0,
      2 => 1,
      4 => 2,
      8 => 3,
      _ => panic!("element width must be 1, 2, 4 or 8 bytes"),
    };
    LANE_TABLE[self as usize][col]
  }

  /// The next narrower vector tier, or `None` below Narrow.
  #[inline]
  #[must_use]
  pub const fn narrower(self) -> Option<Self> {
    match self {
      Self::Wide => Some(Self::Medium),
      Self::Medium => Some(Self::Narrow),
      Self::Narrow | Self::None => None,
    }
  }

  /// Check if this tier executes vector instructions.
  #[inline]
  #[must_use]
  pub const fn is_vector(self) -> bool {
    !matches!(self, Self::None)
  }

  /// Vector tiers from `self` down to Narrow, widest first.
  #[inline]
  #[must_use]
  pub const fn cascade(self) -> Cascade {
    Cascade {
      next: if self.is_vector() { Some(self) } else { None },
    }
  }

  /// Map detected capabilities to the widest usable tier.
  #[must_use]
  pub const fn from_caps(caps: Caps, arch: Arch) -> Self {
    match arch {
      Arch::X86_64 => {
        use platform::caps::x86;

        if caps.has(x86::WIDE_READY) {
          Self::Wide
        } else if caps.has(x86::MEDIUM_READY) {
          Self::Medium
        } else if caps.has(x86::NARROW_READY) {
          Self::Narrow
        } else {
          Self::None
        }
      }
      _ => Self::None,
    }
  }
}

impl fmt::Display for VectorTier {
  #[inline]
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

/// Iterator over vector tiers in strictly descending width.
///
/// This is the single place where the widest-first policy lives: a driver
/// walks the cascade, packs as many whole lanes as fit at each tier, and
/// leaves the remainder for the next one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cascade {
  next: Option<VectorTier>,
}

impl Iterator for Cascade {
  type Item = VectorTier;

  #[inline]
  fn next(&mut self) -> Option<VectorTier> {
    let current = self.next?;
    self.next = current.narrower();
    Some(current)
  }
}
