//! Scalar reference kernel.

use crate::image::CHANNELS;
use crate::kernel::WindowKernel;
use crate::ImageView;

/// Straightforward per-pixel, per-channel comparison.
pub struct ScalarKernel;

/// Returns true if any channel of the two pixels differs by more than `tolerance`.
#[inline]
pub(crate) fn pixel_mismatch(a: &[u8], b: &[u8], tolerance: u8) -> bool {
    // Stops at the first offending channel.
    a.iter()
        .zip(b)
        .take(CHANNELS)
        .any(|(&ca, &cb)| ca.abs_diff(cb) > tolerance)
}

impl WindowKernel for ScalarKernel {
    fn mismatches_at(
        haystack: ImageView<'_>,
        needle: ImageView<'_>,
        x: usize,
        y: usize,
        tolerance: u8,
    ) -> usize {
        debug_assert!(haystack.fits(x, y, needle.width(), needle.height()));
        let mut mismatched = 0usize;
        let offset = x * CHANNELS;
        let row_len = needle.width() * CHANNELS;

        for py in 0..needle.height() {
            let hay_row = haystack.row(y + py).expect("row within bounds for scan");
            let hay_row = &hay_row[offset..offset + row_len];
            let needle_row = needle.row(py).expect("needle row within bounds");
            mismatched += hay_row
                .chunks_exact(CHANNELS)
                .zip(needle_row.chunks_exact(CHANNELS))
                .filter(|(h, n)| pixel_mismatch(h, n, tolerance))
                .count();
        }

        mismatched
    }
}
