//! Backend crate: tier model and dispatch primitives for lanewise.
//!
//! This crate sits between capability detection (`platform`) and the
//! kernels (`lanewise`):
//!
//! - **Tiers**: [`VectorTier`], the lane-width table and the widest-first [`Cascade`]
//! - **Dispatch**: [`TierTable`], one optional step function per tier, and [`Coverage`]
//! - **Configuration**: forced tiers from `LANEWISE_FORCE` or [`set_force`], clamped to what the CPU
//!   supports
//!
//! # Architecture
//!
//! The tier is resolved once per process:
//!
//! ```text
//! platform::get() ──► VectorTier::from_caps ──► detected
//!                                                  │
//! LANEWISE_FORCE / set_force ──► requested ──► min ──► effective (cached)
//! ```
//!
//! Kernels then walk `effective.cascade()` and call whatever their
//! `TierTable` provides at each step.

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![no_std]

#[cfg(any(feature = "std", test))]
extern crate std;

pub mod cache;
pub mod config;
pub mod dispatch;
pub mod tier;

pub use cache::OnceCache;
pub use config::{ConfigError, ForceTier, TierConfig, active_tier, config, parse_force, probe, set_force};
pub use dispatch::{Coverage, TierTable};
// Re-export platform types for convenience.
pub use platform;
pub use tier::{Cascade, LANE_TABLE, VectorTier};
