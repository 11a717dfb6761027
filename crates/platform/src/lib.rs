//! CPU capability detection for lanewise.
//!
//! This crate is the **single source of truth** for which vector instructions
//! may run on the current machine. Kernel crates never probe the CPU
//! themselves; they ask `platform::get()` and map the answer to a tier.
//!
//! # Main Entry Point
//!
//! ```
//! let det = platform::get();
//! println!("{}", platform::describe());
//!
//! #[cfg(target_arch = "x86_64")]
//! if det.caps.has(platform::caps::x86::MEDIUM_READY) {
//!   // 256-bit kernels are legal here
//! }
//! ```
//!
//! # Design Philosophy
//!
//! 1. **One API**: callers query `platform::get()` instead of doing ad-hoc detection.
//! 2. **Detected once**: the first call decides; the result never changes afterwards.
//! 3. **Overridable before first use**: tests and bare-metal builds can pin caps.
//! 4. **Miri-safe**: under Miri, always returns portable-only caps.

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![no_std]

#[cfg(any(feature = "std", test))]
extern crate std;

use core::fmt;

pub mod caps;
mod detect;

pub use caps::{Arch, Caps};
pub use detect::{
  Detected, OverrideError, arch, caps, caps_static, detect_uncached, get, has_override, set_override, try_set_override,
};

/// Human-readable summary of the detected platform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Description {
  detected: Detected,
}

impl Description {
  /// The detection result being described.
  #[inline]
  #[must_use]
  pub const fn detected(&self) -> Detected {
    self.detected
  }
}

impl fmt::Display for Description {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Caps({}, [{}])", self.detected.arch, self.detected.caps)
  }
}

/// Describe the detected platform (cached after the first call).
#[inline]
#[must_use]
pub fn describe() -> Description {
  Description { detected: get() }
}

#[cfg(test)]
mod tests {
  use std::string::ToString;

  use super::*;

  #[test]
  fn describe_names_arch() {
    let text = describe().to_string();
    assert!(text.starts_with("Caps("));
    assert!(text.contains(get().arch.name()));
  }

  #[test]
  fn describe_portable() {
    let d = Description {
      detected: Detected {
        caps: Caps::NONE,
        arch: Arch::Other,
      },
    };
    assert_eq!(d.to_string(), "Caps(other, [none])");
  }
}
