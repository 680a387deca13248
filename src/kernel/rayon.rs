//! Rayon-parallel scans (feature-gated).
//!
//! Work is split over window rows. Results are reduced so that the reported
//! window is exactly the one the sequential scan would report.

use crate::kernel::WindowKernel;
use crate::search::scan::{evaluate, placement_range};
use crate::search::Match;
use crate::threshold::Threshold;
use crate::ImageView;
use rayon::prelude::*;

/// Row-parallel search for the first qualifying window in row-major order.
pub fn scan_first_par<K: WindowKernel>(
    haystack: ImageView<'_>,
    needle: ImageView<'_>,
    threshold: Threshold,
) -> Option<Match> {
    let (max_x, max_y) = placement_range(haystack, needle)?;
    (0..=max_y).into_par_iter().find_map_first(|y| {
        (0..=max_x)
            .find_map(|x| evaluate::<K>(haystack, needle, x, y, threshold))
    })
}

/// Row-parallel search for the qualifying window with the fewest mismatches.
pub fn scan_best_par<K: WindowKernel>(
    haystack: ImageView<'_>,
    needle: ImageView<'_>,
    threshold: Threshold,
) -> Option<Match> {
    let (max_x, max_y) = placement_range(haystack, needle)?;
    (0..=max_y)
        .into_par_iter()
        .filter_map(|y| {
            (0..=max_x)
                .filter_map(|x| evaluate::<K>(haystack, needle, x, y, threshold))
                .min_by_key(|m| (m.mismatched, m.y, m.x))
        })
        .min_by_key(|m| (m.mismatched, m.y, m.x))
}

#[cfg(test)]
mod tests {
    use super::{scan_best_par, scan_first_par};
    use crate::kernel::scalar::ScalarKernel;
    use crate::threshold::Threshold;
    use crate::RasterImage;

    #[test]
    fn first_par_reports_the_earliest_row() {
        let mut hay = RasterImage::filled(12, 12, [0, 0, 0, 255]).unwrap();
        hay.fill_rect(8, 3, 2, 2, [0, 255, 0, 255]);
        hay.fill_rect(1, 9, 2, 2, [0, 255, 0, 255]);
        let needle = RasterImage::filled(2, 2, [0, 255, 0, 255]).unwrap();
        let t = Threshold::EXACT;
        let found = scan_first_par::<ScalarKernel>(hay.view(), needle.view(), t).unwrap();
        assert_eq!((found.x, found.y), (8, 3));
        let best = scan_best_par::<ScalarKernel>(hay.view(), needle.view(), t).unwrap();
        assert_eq!((best.x, best.y), (8, 3));
    }
}
