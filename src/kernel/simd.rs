//! SIMD-accelerated kernel using the `wide` crate.
//!
//! Each row is compared 4 pixels (16 bytes) at a time with `u8x16`. The
//! per-lane excess over the tolerance is folded per pixel, so the mismatch
//! count is identical to the scalar kernel's.

use crate::image::CHANNELS;
use crate::kernel::scalar::pixel_mismatch;
use crate::kernel::WindowKernel;
use crate::ImageView;
use wide::u8x16;

const LANES: usize = 16;
const PIXELS_PER_VECTOR: usize = LANES / CHANNELS;

#[inline]
fn load_u8x16(slice: &[u8]) -> u8x16 {
    let mut lanes = [0u8; LANES];
    lanes.copy_from_slice(&slice[..LANES]);
    u8x16::from(lanes)
}

/// Counts pixels in a 16-byte block whose channels exceed the tolerance.
#[inline]
fn block_mismatches(hay: &[u8], needle: &[u8], tolerance: u8x16) -> usize {
    let a = load_u8x16(hay);
    let b = load_u8x16(needle);
    let diff = a.max(b) - a.min(b);
    let excess = diff.saturating_sub(tolerance).to_array();
    excess
        .chunks_exact(CHANNELS)
        .filter(|px| px.iter().any(|&c| c != 0))
        .count()
}

/// SIMD-accelerated mismatch counter.
pub struct SimdKernel;

impl WindowKernel for SimdKernel {
    fn mismatches_at(
        haystack: ImageView<'_>,
        needle: ImageView<'_>,
        x: usize,
        y: usize,
        tolerance: u8,
    ) -> usize {
        debug_assert!(haystack.fits(x, y, needle.width(), needle.height()));
        let tol = u8x16::splat(tolerance);
        let offset = x * CHANNELS;
        let row_len = needle.width() * CHANNELS;
        let simd_end = needle.width() / PIXELS_PER_VECTOR * PIXELS_PER_VECTOR * CHANNELS;
        let mut mismatched = 0usize;

        for py in 0..needle.height() {
            let hay_row = haystack.row(y + py).expect("row within bounds for scan");
            let hay_row = &hay_row[offset..offset + row_len];
            let needle_row = needle.row(py).expect("needle row within bounds");

            let mut i = 0;
            while i < simd_end {
                mismatched += block_mismatches(&hay_row[i..], &needle_row[i..], tol);
                i += LANES;
            }
            mismatched += hay_row[simd_end..]
                .chunks_exact(CHANNELS)
                .zip(needle_row[simd_end..].chunks_exact(CHANNELS))
                .filter(|(h, n)| pixel_mismatch(h, n, tolerance))
                .count();
        }

        mismatched
    }
}

#[cfg(test)]
mod tests {
    use super::SimdKernel;
    use crate::kernel::scalar::ScalarKernel;
    use crate::kernel::WindowKernel;
    use crate::RasterImage;

    #[test]
    fn agrees_with_scalar_on_ragged_widths() {
        let hay = RasterImage::from_fn(23, 9, |x, y| {
            let r = (x * 37 + y) as u8;
            let g = ((x ^ y) * 9) as u8;
            [r, g, (y * 51) as u8, 255 - x as u8]
        })
        .unwrap();
        let needle = RasterImage::from_fn(7, 4, |x, y| [(x * 5) as u8, (y * 70) as u8, 128, 250]);
        let needle = needle.unwrap();
        for tol in [0u8, 10, 25, 128, 255] {
            for y in 0..=5 {
                for x in 0..=16 {
                    let scalar = ScalarKernel::mismatches_at(hay.view(), needle.view(), x, y, tol);
                    let simd = SimdKernel::mismatches_at(hay.view(), needle.view(), x, y, tol);
                    assert_eq!(scalar, simd, "x={x} y={y} tol={tol}");
                }
            }
        }
    }
}
