//! Per-tier kernel tables.
//!
//! An operation registers at most one step function per vector tier in a
//! [`TierTable`]. The driver walks [`VectorTier::cascade`] from the active
//! tier and calls every step present, widest first. A missing entry simply
//! means that tier has no instruction for the (operation, element) pair and
//! its share of the buffer falls to the next narrower tier.
//!
//! # Usage
//!
//! ```ignore
//! use backend::{TierTable, VectorTier};
//!
//! const STEPS: TierTable<Step> = {
//!   let mut table = TierTable::EMPTY;
//!   table.medium = Some(avx2_step as Step);
//!   table
//! };
//!
//! for tier in backend::active_tier().cascade() {
//!   if let Some(step) = STEPS.get(tier) {
//!     cursor = step(cursor);
//!   }
//! }
//! ```

use crate::tier::VectorTier;

/// Optional kernel per vector tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TierTable<F> {
  /// 128-bit step.
  pub narrow: Option<F>,
  /// 256-bit step.
  pub medium: Option<F>,
  /// 512-bit step.
  pub wide: Option<F>,
}

impl<F: Copy> TierTable<F> {
  /// Table with no vector kernels: everything runs through the scalar loop.
  pub const EMPTY: Self = Self {
    narrow: None,
    medium: None,
    wide: None,
  };

  /// Kernel registered for `tier`. The scalar tier never has one.
  #[inline]
  #[must_use]
  pub const fn get(&self, tier: VectorTier) -> Option<F> {
    match tier {
      VectorTier::None => None,
      VectorTier::Narrow => self.narrow,
      VectorTier::Medium => self.medium,
      VectorTier::Wide => self.wide,
    }
  }

  /// Widest tier at or below `active` with a registered kernel.
  #[inline]
  #[must_use]
  pub fn best(&self, active: VectorTier) -> Option<(VectorTier, F)> {
    active.cascade().find_map(|tier| self.get(tier).map(|f| (tier, f)))
  }

  /// Check if no tier has a kernel.
  #[inline]
  #[must_use]
  pub const fn is_empty(&self) -> bool {
    self.narrow.is_none() && self.medium.is_none() && self.wide.is_none()
  }
}

impl<F: Copy> Default for TierTable<F> {
  fn default() -> Self {
    Self::EMPTY
  }
}

/// Element counts each tier would cover for a buffer of `len` elements.
///
/// This is the model the drivers implement: for each tier in the cascade
/// that has a kernel, whole registers are consumed while they fit, then the
/// remainder moves on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Coverage {
  /// Elements handled by 512-bit steps.
  pub wide: usize,
  /// Elements handled by 256-bit steps.
  pub medium: usize,
  /// Elements handled by 128-bit steps.
  pub narrow: usize,
  /// Elements left to the scalar loop.
  pub scalar: usize,
}

impl Coverage {
  /// Compute coverage for `len` elements of `elem_bytes` each.
  #[must_use]
  pub fn plan<F: Copy>(table: &TierTable<F>, active: VectorTier, elem_bytes: usize, len: usize) -> Self {
    let mut coverage = Self::default();
    let mut cursor = 0usize;
    for tier in active.cascade() {
      if table.get(tier).is_none() {
        continue;
      }
      let lanes = tier.lanes(elem_bytes);
      let take = (len - cursor) / lanes * lanes;
      coverage.add(tier, take);
      cursor += take;
    }
    coverage.scalar = len - cursor;
    coverage
  }

  /// Credit `count` elements to `tier`.
  #[inline]
  pub fn add(&mut self, tier: VectorTier, count: usize) {
    match tier {
      VectorTier::None => self.scalar += count,
      VectorTier::Narrow => self.narrow += count,
      VectorTier::Medium => self.medium += count,
      VectorTier::Wide => self.wide += count,
    }
  }

  /// Elements handled by any vector tier.
  #[inline]
  #[must_use]
  pub const fn vector(&self) -> usize {
    self.wide + self.medium + self.narrow
  }

  /// Total elements covered.
  #[inline]
  #[must_use]
  pub const fn total(&self) -> usize {
    self.vector() + self.scalar
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  type Step = fn(usize) -> usize;

  fn step(cursor: usize) -> usize {
    cursor
  }

  const ALL_TIERS: TierTable<Step> = TierTable {
    narrow: Some(step as Step),
    medium: Some(step as Step),
    wide: Some(step as Step),
  };

  #[test]
  fn empty_table_has_no_kernels() {
    let table: TierTable<Step> = TierTable::EMPTY;
    assert!(table.is_empty());
    for tier in VectorTier::ALL {
      assert!(table.get(tier).is_none());
    }
    assert!(table.best(VectorTier::Wide).is_none());
  }

  #[test]
  fn best_respects_active_tier() {
    let table = TierTable {
      narrow: Some(step as Step),
      medium: None,
      wide: Some(step as Step),
    };
    assert_eq!(table.best(VectorTier::Wide).map(|(t, _)| t), Some(VectorTier::Wide));
    assert_eq!(table.best(VectorTier::Medium).map(|(t, _)| t), Some(VectorTier::Narrow));
    assert!(table.best(VectorTier::None).is_none());
  }

  #[test]
  fn plan_packs_widest_first() {
    // 4-byte lanes: wide 16, medium 8, narrow 4.
    let c = Coverage::plan(&ALL_TIERS, VectorTier::Wide, 4, 16 + 8 + 4 + 3);
    assert_eq!(
      c,
      Coverage {
        wide: 16,
        medium: 8,
        narrow: 4,
        scalar: 3
      }
    );
    assert_eq!(c.total(), 31);
  }

  #[test]
  fn plan_short_buffer_is_scalar_only() {
    for len in 0..2 {
      let c = Coverage::plan(&ALL_TIERS, VectorTier::Wide, 8, len);
      assert_eq!(c.vector(), 0);
      assert_eq!(c.scalar, len);
    }
  }

  #[test]
  fn plan_skips_missing_tiers() {
    let table = TierTable {
      narrow: None,
      medium: Some(step as Step),
      wide: None,
    };
    let c = Coverage::plan(&table, VectorTier::Wide, 1, 100);
    assert_eq!(c.wide, 0);
    assert_eq!(c.medium, 96);
    assert_eq!(c.narrow, 0);
    assert_eq!(c.scalar, 4);
  }

  #[test]
  fn plan_at_scalar_tier() {
    let c = Coverage::plan(&ALL_TIERS, VectorTier::None, 2, 1000);
    assert_eq!(c.vector(), 0);
    assert_eq!(c.scalar, 1000);
  }
}
