//! Dispatch introspection for verifying which kernels run.
//!
//! # Examples
//!
//! ```
//! use lanewise::{Add, DispatchInfo, kernel_name};
//!
//! let info = DispatchInfo::current();
//! println!("{info}");
//! println!("add<f32>: {}", kernel_name::<f32, Add>());
//! ```

use core::fmt;

use backend::{TierConfig, TierTable, VectorTier};

use crate::{
  element::{Element, Widening},
  kernels::{BinaryKernel, ShiftKernel, WidenKernel},
  simd,
};

/// Detected platform plus the resolved tier configuration.
#[derive(Clone, Copy)]
pub struct DispatchInfo {
  platform: platform::Description,
  config: TierConfig,
}

impl DispatchInfo {
  /// Dispatch info for the current process. Cached after the first call.
  #[inline]
  #[must_use]
  pub fn current() -> Self {
    Self {
      platform: platform::describe(),
      config: backend::config(),
    }
  }

  /// Platform description (architecture and features).
  #[inline]
  #[must_use]
  pub fn platform(&self) -> platform::Description {
    self.platform
  }

  /// Requested, effective and detected tiers.
  #[inline]
  #[must_use]
  pub fn config(&self) -> TierConfig {
    self.config
  }

  /// Tier the drivers start from.
  #[inline]
  #[must_use]
  pub fn tier(&self) -> VectorTier {
    self.config.effective
  }
}

impl fmt::Display for DispatchInfo {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let tier = self.config.effective;
    write!(
      f,
      "{} {} lanes(8/16/32/64-bit)={}/{}/{}/{}",
      self.platform,
      self.config,
      tier.lanes(1),
      tier.lanes(2),
      tier.lanes(4),
      tier.lanes(8)
    )
  }
}

impl fmt::Debug for DispatchInfo {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("DispatchInfo")
      .field("platform", &format_args!("{}", self.platform))
      .field("config", &self.config)
      .finish()
  }
}

/// Elements of `T` per register at the active tier (0 when scalar).
#[inline]
#[must_use]
pub fn lanes_for<T: Element>() -> usize {
  backend::active_tier().lanes(T::BYTES)
}

fn widest<F: Copy>(table: &TierTable<F>, tier: VectorTier) -> &'static str {
  table
    .best(tier)
    .map_or(simd::isa_name(VectorTier::None), |(t, _)| simd::isa_name(t))
}

/// Widest kernel a buffer of `T` would start with under `O`.
///
/// Returns e.g. `"x86_64/avx2"`, or `"scalar"` when no tier has a vector
/// step for the pair.
#[inline]
#[must_use]
pub fn kernel_name<T: Element, O: BinaryKernel<T>>() -> &'static str {
  widest(&O::STEPS, backend::active_tier())
}

/// [`kernel_name`] for uniform shifts.
#[inline]
#[must_use]
pub fn shift_kernel_name<T: Element, O: ShiftKernel<T>>() -> &'static str {
  widest(&O::STEPS, backend::active_tier())
}

/// [`kernel_name`] for widening operations.
#[inline]
#[must_use]
pub fn widen_kernel_name<T: Widening, O: WidenKernel<T>>() -> &'static str {
  widest(&O::STEPS, backend::active_tier())
}

#[cfg(test)]
mod tests {
  extern crate alloc;

  use alloc::{format, string::ToString};

  use super::*;
  use crate::op::{Add, MultiplyLow, MultiplyWidening, ShiftLeft};

  #[test]
  fn display_includes_tier() {
    let info = DispatchInfo::current();
    let text = info.to_string();
    assert!(text.contains(info.tier().name()));
    assert!(text.contains("lanes"));
    assert!(format!("{info:?}").contains("DispatchInfo"));
  }

  #[test]
  fn lanes_follow_active_tier() {
    let tier = backend::active_tier();
    assert_eq!(lanes_for::<u8>(), tier.bytes());
    assert_eq!(lanes_for::<f64>(), tier.bytes() / 8);
  }

  #[test]
  fn scalar_only_pairs_report_scalar() {
    assert_eq!(kernel_name::<u8, MultiplyLow>(), "scalar");
    assert_eq!(shift_kernel_name::<i8, ShiftLeft>(), "scalar");
  }

  #[test]
  fn names_match_active_tier() {
    let expected = simd::isa_name(if cfg!(target_arch = "x86_64") {
      backend::active_tier()
    } else {
      VectorTier::None
    });
    assert_eq!(kernel_name::<f32, Add>(), expected);
    assert_eq!(widen_kernel_name::<i32, MultiplyWidening>(), expected);
  }
}
