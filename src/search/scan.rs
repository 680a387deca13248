//! Sequential sliding-window scans.
//!
//! Windows are visited row-major: `y` outer, `x` inner, both ascending. That
//! order decides which window is reported when several qualify.

use crate::kernel::WindowKernel;
use crate::search::Match;
use crate::threshold::Threshold;
use crate::ImageView;

/// Last valid top-left placement, or `None` when the needle does not fit.
pub(crate) fn placement_range(
    haystack: ImageView<'_>,
    needle: ImageView<'_>,
) -> Option<(usize, usize)> {
    let max_x = haystack.width().checked_sub(needle.width())?;
    let max_y = haystack.height().checked_sub(needle.height())?;
    Some((max_x, max_y))
}

/// Evaluates a single window and returns it if the threshold accepts it.
#[inline]
pub(crate) fn evaluate<K: WindowKernel>(
    haystack: ImageView<'_>,
    needle: ImageView<'_>,
    x: usize,
    y: usize,
    threshold: Threshold,
) -> Option<Match> {
    let mismatched = K::mismatches_at(haystack, needle, x, y, threshold.channel_tolerance());
    let total = needle.area();
    threshold
        .accepts(mismatched, total)
        .then(|| Match::new(x, y, mismatched, total))
}

/// Returns the first qualifying window in row-major order.
pub(crate) fn scan_first<K: WindowKernel>(
    haystack: ImageView<'_>,
    needle: ImageView<'_>,
    threshold: Threshold,
) -> Option<Match> {
    let (max_x, max_y) = placement_range(haystack, needle)?;
    for y in 0..=max_y {
        for x in 0..=max_x {
            if let Some(found) = evaluate::<K>(haystack, needle, x, y, threshold) {
                return Some(found);
            }
        }
    }
    None
}

/// Returns the qualifying window with the fewest mismatched pixels.
///
/// Ties go to the row-major-first window; a perfect window ends the scan.
pub(crate) fn scan_best<K: WindowKernel>(
    haystack: ImageView<'_>,
    needle: ImageView<'_>,
    threshold: Threshold,
) -> Option<Match> {
    let (max_x, max_y) = placement_range(haystack, needle)?;
    let mut best: Option<Match> = None;
    for y in 0..=max_y {
        for x in 0..=max_x {
            let Some(candidate) = evaluate::<K>(haystack, needle, x, y, threshold) else {
                continue;
            };
            if best.map_or(true, |b| candidate.mismatched < b.mismatched) {
                if candidate.mismatched == 0 {
                    return Some(candidate);
                }
                best = Some(candidate);
            }
        }
    }
    best
}

/// Collects up to `limit` qualifying windows in row-major order.
pub(crate) fn scan_all<K: WindowKernel>(
    haystack: ImageView<'_>,
    needle: ImageView<'_>,
    threshold: Threshold,
    limit: usize,
) -> Vec<Match> {
    let mut out = Vec::new();
    if limit == 0 {
        return out;
    }
    let Some((max_x, max_y)) = placement_range(haystack, needle) else {
        return out;
    };
    for y in 0..=max_y {
        for x in 0..=max_x {
            if let Some(found) = evaluate::<K>(haystack, needle, x, y, threshold) {
                out.push(found);
                if out.len() == limit {
                    return out;
                }
            }
        }
    }
    out
}
