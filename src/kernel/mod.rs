//! Per-window pixel comparison kernels.

use crate::ImageView;

/// Kernel trait for counting mismatched pixels in one window.
///
/// Implementations must agree exactly: a pixel is mismatched when any of its
/// four channel differences exceeds `tolerance`.
pub trait WindowKernel {
    /// Counts mismatched needle pixels with the window's top-left at `(x, y)`.
    ///
    /// The caller guarantees the window fits inside `haystack`; a window
    /// that does not fit panics.
    fn mismatches_at(
        haystack: ImageView<'_>,
        needle: ImageView<'_>,
        x: usize,
        y: usize,
        tolerance: u8,
    ) -> usize;
}

pub mod scalar;

#[cfg(feature = "simd")]
pub mod simd;

#[cfg(feature = "rayon")]
pub mod rayon;

/// Kernel used by the high-level search; SIMD when the feature is enabled.
#[cfg(not(feature = "simd"))]
pub(crate) type DefaultKernel = scalar::ScalarKernel;
#[cfg(feature = "simd")]
pub(crate) type DefaultKernel = simd::SimdKernel;
