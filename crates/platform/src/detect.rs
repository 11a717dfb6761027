//! Runtime CPU detection.
//!
//! This module provides the unified `get()` function that returns the detected
//! CPU capabilities. It handles:
//!
//! - Compile-time detection (via `cfg!(target_feature = "...")`)
//! - Runtime detection (via `is_x86_feature_detected!` under `std`)
//! - Caching (via `OnceLock` with `std`, an atomic state machine without)
//! - User-supplied overrides for bare metal and testing
//! - Miri fallback (always returns portable caps)
//!
//! # Overrides
//!
//! ```ignore
//! // Pin capabilities before the first get()
//! platform::set_override(Some(Detected::portable()));
//! ```
//!
//! Overrides are pre-init only: once detection has been cached the answer is
//! fixed for the life of the process, so every kernel sees the same tier.

use core::fmt;

use crate::caps::{Arch, Caps};

// ─────────────────────────────────────────────────────────────────────────────
// Detected
// ─────────────────────────────────────────────────────────────────────────────

/// The outcome of capability detection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Detected {
  /// Available CPU features.
  pub caps: Caps,
  /// Architecture the features belong to.
  pub arch: Arch,
}

impl Detected {
  /// Scalar-only detection result for the current architecture.
  #[inline]
  #[must_use]
  pub const fn portable() -> Self {
    Self {
      caps: Caps::NONE,
      arch: Arch::current(),
    }
  }

  /// Detection result with explicit capabilities on the current architecture.
  #[inline]
  #[must_use]
  pub const fn with_caps(caps: Caps) -> Self {
    Self {
      caps,
      arch: Arch::current(),
    }
  }
}

/// Error returned when an override cannot be installed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum OverrideError {
  /// Detection has already been cached; the answer can no longer change.
  AlreadyInitialized,
  /// This target has no storage for overrides (no `std`, no 64-bit atomics).
  Unsupported,
}

impl fmt::Display for OverrideError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::AlreadyInitialized => f.write_str("capability detection already initialized"),
      Self::Unsupported => f.write_str("capability overrides are not supported on this target"),
    }
  }
}

impl core::error::Error for OverrideError {}

// ─────────────────────────────────────────────────────────────────────────────
// Main API
// ─────────────────────────────────────────────────────────────────────────────

/// Get detected CPU capabilities.
///
/// The first call performs detection (or takes the override); every later call
/// returns the cached value. Under Miri this always returns [`Detected::portable`].
#[inline]
#[must_use]
pub fn get() -> Detected {
  #[cfg(miri)]
  {
    Detected::portable()
  }

  #[cfg(all(not(miri), feature = "std"))]
  {
    *STD_CACHE.get_or_init(detect_with_override)
  }

  #[cfg(all(not(miri), not(feature = "std"), target_has_atomic = "64"))]
  {
    atomic_cache::get_or_init(detect_with_override)
  }

  #[cfg(all(not(miri), not(feature = "std"), not(target_has_atomic = "64")))]
  {
    detect_uncached()
  }
}

/// Get just the capabilities.
#[inline]
#[must_use]
pub fn caps() -> Caps {
  get().caps
}

/// Get just the architecture.
#[inline]
#[must_use]
pub fn arch() -> Arch {
  get().arch
}

/// Detect capabilities without caching or overrides.
#[must_use]
pub fn detect_uncached() -> Detected {
  #[cfg(target_arch = "x86_64")]
  {
    detect_x86_64()
  }

  #[cfg(not(target_arch = "x86_64"))]
  {
    Detected::portable()
  }
}

/// Capabilities known at compile time from `-C target-feature` / `target-cpu`.
#[inline]
#[must_use]
pub const fn caps_static() -> Caps {
  #[allow(unused_mut)]
  let mut caps = Caps::NONE;

  #[cfg(target_arch = "x86_64")]
  {
    use crate::caps::x86;

    // SSE2 is part of the x86_64 baseline.
    caps = caps.union(x86::SSE2);

    #[cfg(target_feature = "sse3")]
    {
      caps = caps.union(x86::SSE3);
    }
    #[cfg(target_feature = "ssse3")]
    {
      caps = caps.union(x86::SSSE3);
    }
    #[cfg(target_feature = "sse4.1")]
    {
      caps = caps.union(x86::SSE41);
    }
    #[cfg(target_feature = "avx")]
    {
      caps = caps.union(x86::AVX);
    }
    #[cfg(target_feature = "avx2")]
    {
      caps = caps.union(x86::AVX2);
    }
    #[cfg(target_feature = "avx512f")]
    {
      caps = caps.union(x86::AVX512F);
    }
    #[cfg(target_feature = "avx512bw")]
    {
      caps = caps.union(x86::AVX512BW);
    }
    #[cfg(target_feature = "avx512dq")]
    {
      caps = caps.union(x86::AVX512DQ);
    }
  }

  caps
}

// ─────────────────────────────────────────────────────────────────────────────
// x86_64 Detection
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(target_arch = "x86_64")]
fn detect_x86_64() -> Detected {
  #[allow(unused_mut)]
  let mut caps = caps_static();

  #[cfg(feature = "std")]
  {
    caps |= runtime_x86_64();
  }

  Detected {
    caps,
    arch: Arch::X86_64,
  }
}

/// Runtime-detected x86_64 features.
///
/// `is_x86_feature_detected!` already gates AVX and AVX-512 on the OS saving
/// YMM/ZMM state (OSXSAVE + XCR0), so a reported feature is safe to execute.
#[cfg(all(target_arch = "x86_64", feature = "std"))]
fn runtime_x86_64() -> Caps {
  use std::arch::is_x86_feature_detected;

  use crate::caps::x86;

  let mut caps = Caps::NONE;

  if is_x86_feature_detected!("sse3") {
    caps |= x86::SSE3;
  }
  if is_x86_feature_detected!("ssse3") {
    caps |= x86::SSSE3;
  }
  if is_x86_feature_detected!("sse4.1") {
    caps |= x86::SSE41;
  }
  if is_x86_feature_detected!("avx") {
    caps |= x86::AVX;
  }
  if is_x86_feature_detected!("avx2") {
    caps |= x86::AVX2;
  }
  if is_x86_feature_detected!("avx512f") {
    caps |= x86::AVX512F;
  }
  if is_x86_feature_detected!("avx512bw") {
    caps |= x86::AVX512BW;
  }
  if is_x86_feature_detected!("avx512dq") {
    caps |= x86::AVX512DQ;
  }

  caps
}

// ─────────────────────────────────────────────────────────────────────────────
// Override System
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(feature = "std")]
use std::sync::{OnceLock, RwLock};

#[cfg(all(feature = "std", not(miri)))]
static STD_CACHE: OnceLock<Detected> = OnceLock::new();

#[cfg(feature = "std")]
static OVERRIDE: RwLock<Option<Detected>> = RwLock::new(None);

/// Set detection override.
///
/// Must be called **before** the first call to [`get()`].
///
/// # Panics
///
/// Panics if detection has already been cached.
#[cold]
pub fn set_override(value: Option<Detected>) {
  if let Err(err) = try_set_override(value) {
    panic!("platform::set_override failed: {err}");
  }
}

/// Try to set detection override.
///
/// Contract: pre-init only. Once [`get()`] has initialized detection state,
/// this returns [`OverrideError::AlreadyInitialized`].
#[cold]
pub fn try_set_override(value: Option<Detected>) -> Result<(), OverrideError> {
  #[cfg(feature = "std")]
  {
    #[cfg(not(miri))]
    if STD_CACHE.get().is_some() {
      return Err(OverrideError::AlreadyInitialized);
    }

    match OVERRIDE.write() {
      Ok(mut guard) => {
        *guard = value;
        Ok(())
      }
      Err(_) => Err(OverrideError::Unsupported),
    }
  }

  #[cfg(all(not(feature = "std"), target_has_atomic = "64"))]
  {
    atomic_cache::try_set_override(value)
  }

  #[cfg(all(not(feature = "std"), not(target_has_atomic = "64")))]
  {
    let _ = value;
    Err(OverrideError::Unsupported)
  }
}

/// Check if an override is set.
#[inline]
#[must_use]
pub fn has_override() -> bool {
  #[cfg(feature = "std")]
  {
    OVERRIDE.read().map(|g| g.is_some()).unwrap_or(false)
  }

  #[cfg(all(not(feature = "std"), target_has_atomic = "64"))]
  {
    atomic_cache::has_override()
  }

  #[cfg(all(not(feature = "std"), not(target_has_atomic = "64")))]
  {
    false
  }
}

#[cold]
#[cfg(not(miri))]
#[allow(dead_code)] // unused on no_std targets without 64-bit atomics
fn detect_with_override() -> Detected {
  #[cfg(feature = "std")]
  {
    if let Ok(guard) = OVERRIDE.read()
      && let Some(ov) = *guard
    {
      return ov;
    }
  }

  #[cfg(all(not(feature = "std"), target_has_atomic = "64"))]
  {
    if let Some(ov) = atomic_cache::get_override() {
      return ov;
    }
  }

  detect_uncached()
}

// ─────────────────────────────────────────────────────────────────────────────
// Atomic Cache (no_std with 64-bit atomics)
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(all(not(feature = "std"), target_has_atomic = "64"))]
mod atomic_cache {
  use core::{
    cell::UnsafeCell,
    sync::atomic::{AtomicBool, AtomicU8, Ordering},
  };

  use super::*;

  const STATE_UNINIT: u8 = 0;
  const STATE_INITING: u8 = 1;
  const STATE_READY: u8 = 2;

  struct Slot<T>(UnsafeCell<T>);

  // SAFETY: Slot access is synchronized by explicit atomic state transitions in this module.
  unsafe impl<T> Sync for Slot<T> {}

  impl<T> Slot<T> {
    const fn new(value: T) -> Self {
      Self(UnsafeCell::new(value))
    }
  }

  static STATE: AtomicU8 = AtomicU8::new(STATE_UNINIT);
  static CACHED: Slot<Detected> = Slot::new(Detected::portable());

  static OVERRIDE_SET: AtomicBool = AtomicBool::new(false);
  static OVERRIDE_VALUE: Slot<Option<Detected>> = Slot::new(None);

  pub fn get_or_init(f: fn() -> Detected) -> Detected {
    if STATE.load(Ordering::Acquire) == STATE_READY {
      return load_cached();
    }

    match STATE.compare_exchange(STATE_UNINIT, STATE_INITING, Ordering::AcqRel, Ordering::Acquire) {
      Ok(_) => {
        let result = f();
        store_cached(&result);
        STATE.store(STATE_READY, Ordering::Release);
        result
      }
      Err(STATE_INITING) => {
        while STATE.load(Ordering::Acquire) == STATE_INITING {
          core::hint::spin_loop();
        }
        load_cached()
      }
      Err(_) => load_cached(),
    }
  }

  fn load_cached() -> Detected {
    // SAFETY: Readers only access after STATE_READY with Acquire ordering.
    unsafe { *CACHED.0.get() }
  }

  fn store_cached(det: &Detected) {
    // SAFETY: Single writer while STATE_INITING; readers are blocked until STATE_READY.
    unsafe {
      *CACHED.0.get() = *det;
    }
  }

  pub fn try_set_override(value: Option<Detected>) -> Result<(), OverrideError> {
    if STATE.load(Ordering::Acquire) != STATE_UNINIT {
      return Err(OverrideError::AlreadyInitialized);
    }

    // SAFETY: Override writes are pre-init only; readers gate on OVERRIDE_SET.
    unsafe {
      *OVERRIDE_VALUE.0.get() = value;
    }
    OVERRIDE_SET.store(value.is_some(), Ordering::Release);
    Ok(())
  }

  pub fn has_override() -> bool {
    OVERRIDE_SET.load(Ordering::Acquire)
  }

  pub fn get_override() -> Option<Detected> {
    if !OVERRIDE_SET.load(Ordering::Acquire) {
      return None;
    }
    // SAFETY: OVERRIDE_SET is observed true with Acquire before reading payload.
    unsafe { *OVERRIDE_VALUE.0.get() }
  }
}
