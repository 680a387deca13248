//! Assertion helpers for screenshot-driven tests.
//!
//! These wrap [`find`] and turn its outcome into a `Result`, so a test
//! harness can use `?` or map the error onto its own pass/fail reporting.

use crate::search::{find, Match};
use crate::util::{PixelFindError, PixelFindResult};
use crate::ImageView;

/// Succeeds with the reported window if `needle` appears in `haystack`.
pub fn assert_contains(
    haystack: ImageView<'_>,
    needle: ImageView<'_>,
    threshold: f64,
) -> PixelFindResult<Match> {
    find(haystack, needle, threshold)?.ok_or_else(|| PixelFindError::NotFound {
        reason: format!(
            "{}x{} needle not found in {}x{} haystack at threshold {threshold}",
            needle.width(),
            needle.height(),
            haystack.width(),
            haystack.height()
        ),
    })
}

/// Succeeds if no window of `haystack` matches `needle`.
pub fn assert_not_contains(
    haystack: ImageView<'_>,
    needle: ImageView<'_>,
    threshold: f64,
) -> PixelFindResult<()> {
    match find(haystack, needle, threshold)? {
        None => Ok(()),
        Some(m) => Err(PixelFindError::NotFound {
            reason: format!(
                "needle unexpectedly found at ({}, {}) with {:.2}% mismatch",
                m.x, m.y, m.mismatch_percent
            ),
        }),
    }
}
