//! Low-level building blocks for custom scan loops.
//!
//! Most users should stay with [`crate::find`] or [`crate::Matcher`]; these
//! exports let callers drive a specific kernel directly, e.g. to impose their
//! own deadline between windows.

pub use crate::kernel::scalar::ScalarKernel;
pub use crate::kernel::WindowKernel;

#[cfg(feature = "simd")]
pub use crate::kernel::simd::SimdKernel;

#[cfg(feature = "rayon")]
pub use crate::kernel::rayon::{scan_best_par, scan_first_par};
