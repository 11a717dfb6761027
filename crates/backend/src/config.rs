//! Runtime tier configuration (overrides + clamping).
//!
//! This module centralizes the one selection knob lanewise has: which vector
//! tier the drivers start their cascade from.
//!
//! - `LANEWISE_FORCE` environment variable (read once, `std` only)
//! - [`set_force`] programmatic override (before first use)
//!
//! Safety note: forced tiers are always clamped to the detected tier. Forcing
//! can only narrow the instruction set, never widen it.

use core::{
  fmt,
  sync::atomic::{AtomicU8, Ordering},
};

use crate::{cache::OnceCache, tier::VectorTier};

/// Environment variable consulted for a forced tier.
pub const FORCE_ENV: &str = "LANEWISE_FORCE";

/// Forced tier selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ForceTier {
  /// Use the widest detected tier.
  #[default]
  Auto,
  /// Scalar loop only.
  None,
  /// Cap the cascade at 128-bit.
  Narrow,
  /// Cap the cascade at 256-bit.
  Medium,
  /// Cap the cascade at 512-bit (equivalent to auto on current hardware).
  Wide,
}

impl ForceTier {
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Auto => "auto",
      Self::None => "none",
      Self::Narrow => "narrow",
      Self::Medium => "medium",
      Self::Wide => "wide",
    }
  }

  /// The tier cap this force requests, or `None` for auto.
  #[inline]
  #[must_use]
  pub const fn tier(self) -> Option<VectorTier> {
    match self {
      Self::Auto => None,
      Self::None => Some(VectorTier::None),
      Self::Narrow => Some(VectorTier::Narrow),
      Self::Medium => Some(VectorTier::Medium),
      Self::Wide => Some(VectorTier::Wide),
    }
  }

  const fn to_u8(self) -> u8 {
    match self {
      Self::Auto => 0,
      Self::None => 1,
      Self::Narrow => 2,
      Self::Medium => 3,
      Self::Wide => 4,
    }
  }

  const fn from_u8(value: u8) -> Option<Self> {
    match value {
      0 => Some(Self::Auto),
      1 => Some(Self::None),
      2 => Some(Self::Narrow),
      3 => Some(Self::Medium),
      4 => Some(Self::Wide),
      _ => None,
    }
  }
}

impl From<VectorTier> for ForceTier {
  fn from(tier: VectorTier) -> Self {
    match tier {
      VectorTier::None => Self::None,
      VectorTier::Narrow => Self::Narrow,
      VectorTier::Medium => Self::Medium,
      VectorTier::Wide => Self::Wide,
    }
  }
}

impl fmt::Display for ForceTier {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Configuration failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
  /// The force value is not one of the recognized spellings.
  UnknownForce,
  /// The configuration was already resolved and cached.
  AlreadyResolved,
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::UnknownForce => f.write_str(
        "unknown tier force (expected auto, none, scalar, portable, narrow, sse, medium, avx2, wide or avx512)",
      ),
      Self::AlreadyResolved => f.write_str("tier configuration already resolved"),
    }
  }
}

impl core::error::Error for ConfigError {}

/// Parse a force spelling. Case-insensitive, surrounding whitespace ignored.
///
/// An empty string is auto.
pub fn parse_force(value: &str) -> Result<ForceTier, ConfigError> {
  let value = value.trim();
  if value.is_empty() || value.eq_ignore_ascii_case("auto") {
    return Ok(ForceTier::Auto);
  }
  if value.eq_ignore_ascii_case("none") || value.eq_ignore_ascii_case("scalar") || value.eq_ignore_ascii_case("portable")
  {
    return Ok(ForceTier::None);
  }
  if value.eq_ignore_ascii_case("narrow") || value.eq_ignore_ascii_case("sse") || value.eq_ignore_ascii_case("sse4.1") {
    return Ok(ForceTier::Narrow);
  }
  if value.eq_ignore_ascii_case("medium") || value.eq_ignore_ascii_case("avx2") {
    return Ok(ForceTier::Medium);
  }
  if value.eq_ignore_ascii_case("wide") || value.eq_ignore_ascii_case("avx512") {
    return Ok(ForceTier::Wide);
  }
  Err(ConfigError::UnknownForce)
}

/// Full tier configuration (after applying overrides).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TierConfig {
  /// Requested force (programmatic, then env, then auto).
  pub requested: ForceTier,
  /// Tier the drivers start from.
  pub effective: VectorTier,
  /// Widest tier the CPU supports.
  pub detected: VectorTier,
}

impl fmt::Display for TierConfig {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "tier {} (requested {}, detected {})",
      self.effective, self.requested, self.detected
    )
  }
}

/// Clamp a requested force to the detected tier.
#[inline]
#[must_use]
pub fn resolve(requested: ForceTier, detected: VectorTier) -> VectorTier {
  match requested.tier() {
    Some(cap) => cap.min(detected),
    None => detected,
  }
}

const UNSET: u8 = 0x7F;
/// High bit set once resolution has read the force. Later writes are rejected.
const SEALED: u8 = 0x80;

static PROGRAMMATIC: AtomicU8 = AtomicU8::new(UNSET);
static CONFIG: OnceCache<TierConfig> = OnceCache::new();

/// Force a tier for this process.
///
/// Must be called before the first kernel runs (or before [`config`] is
/// first queried). Returns [`ConfigError::AlreadyResolved`] afterwards.
///
/// `Ok` means resolution will see this force, even when another thread is
/// resolving at the same moment.
pub fn set_force(force: ForceTier) -> Result<(), ConfigError> {
  store_force(&PROGRAMMATIC, force)
}

fn store_force(slot: &AtomicU8, force: ForceTier) -> Result<(), ConfigError> {
  let mut current = slot.load(Ordering::Acquire);
  loop {
    if current & SEALED != 0 {
      return Err(ConfigError::AlreadyResolved);
    }
    match slot.compare_exchange_weak(current, force.to_u8(), Ordering::AcqRel, Ordering::Acquire) {
      Ok(_) => return Ok(()),
      Err(actual) => current = actual,
    }
  }
}

/// Read the programmatic force and reject every later [`set_force`].
fn seal_force(slot: &AtomicU8) -> Option<ForceTier> {
  ForceTier::from_u8(slot.fetch_or(SEALED, Ordering::AcqRel) & !SEALED)
}

#[cfg(feature = "std")]
fn env_force() -> ForceTier {
  let Ok(value) = std::env::var(FORCE_ENV) else {
    return ForceTier::Auto;
  };
  match parse_force(&value) {
    Ok(force) => force,
    Err(_err) => {
      #[cfg(feature = "log")]
      log::warn!("ignoring {FORCE_ENV}={value:?}: {_err}");
      ForceTier::Auto
    }
  }
}

#[cfg(not(feature = "std"))]
fn env_force() -> ForceTier {
  ForceTier::Auto
}

fn requested_force() -> ForceTier {
  seal_force(&PROGRAMMATIC).unwrap_or_else(env_force)
}

/// Widest tier the running CPU supports.
#[inline]
#[must_use]
pub fn probe() -> VectorTier {
  let detected = platform::get();
  VectorTier::from_caps(detected.caps, detected.arch)
}

fn resolve_config() -> TierConfig {
  let detected = probe();
  let requested = requested_force();
  let effective = resolve(requested, detected);

  #[cfg(feature = "log")]
  {
    log::debug!("lanewise tier resolved: detected={detected} requested={requested} effective={effective}");
    if requested.tier().is_some_and(|cap| cap > detected) {
      log::trace!("forced tier {requested} clamped to {detected}");
    }
  }

  TierConfig {
    requested,
    effective,
    detected,
  }
}

/// Get the effective tier configuration. Resolved once, then cached.
#[inline]
#[must_use]
pub fn config() -> TierConfig {
  CONFIG.get_or_init(resolve_config)
}

/// Tier the drivers start their cascade from.
#[inline]
#[must_use]
pub fn active_tier() -> VectorTier {
  config().effective
}
