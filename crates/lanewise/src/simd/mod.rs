//! Vector kernels by architecture.
//!
//! Only x86_64 carries vector kernels. On every other target the kernel
//! tables are empty and the drivers run the scalar loop for the whole
//! buffer.

use backend::VectorTier;

#[cfg(target_arch = "x86_64")]
pub(crate) mod x86_64;

/// Kernel family name for `tier` on the current target.
#[must_use]
pub(crate) const fn isa_name(tier: VectorTier) -> &'static str {
  match tier {
    VectorTier::None => "scalar",
    #[cfg(target_arch = "x86_64")]
    VectorTier::Narrow => "x86_64/sse4.1",
    #[cfg(target_arch = "x86_64")]
    VectorTier::Medium => "x86_64/avx2",
    #[cfg(target_arch = "x86_64")]
    VectorTier::Wide => "x86_64/avx512",
    #[cfg(not(target_arch = "x86_64"))]
    _ => "scalar",
  }
}
