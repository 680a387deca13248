//! Sub-image search over RGBA rasters.
//!
//! Every window of the haystack with the needle's size is compared pixel by
//! pixel. A pixel is mismatched when any channel differs by more than
//! `255 * threshold`; a window qualifies when its mismatched share is at most
//! `threshold * 100` percent. The default [`SearchMode::First`] reports the
//! first qualifying window in row-major order, which is not necessarily the
//! window with the fewest mismatches.

pub(crate) mod scan;

use crate::kernel::DefaultKernel;
use crate::kernel::WindowKernel;
use crate::threshold::{mismatch_percent, Threshold};
use crate::trace::{trace_event, trace_span};
use crate::util::PixelFindResult;
use crate::ImageView;

/// A qualifying window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Match {
    /// X coordinate (column) of the window's top-left corner.
    pub x: usize,
    /// Y coordinate (row) of the window's top-left corner.
    pub y: usize,
    /// Number of mismatched needle pixels.
    pub mismatched: usize,
    /// Number of pixels in the window.
    pub total: usize,
    /// `mismatched / total * 100`.
    pub mismatch_percent: f64,
}

impl Match {
    pub(crate) fn new(x: usize, y: usize, mismatched: usize, total: usize) -> Self {
        Self {
            x,
            y,
            mismatched,
            total,
            mismatch_percent: mismatch_percent(mismatched, total),
        }
    }
}

/// Which qualifying window to report.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SearchMode {
    /// First qualifying window in row-major order; stops at the first hit.
    #[default]
    First,
    /// Qualifying window with the fewest mismatched pixels, ties row-major.
    Best,
}

/// Search configuration.
#[derive(Clone, Debug, Default)]
pub struct MatchConfig {
    /// Per-channel and per-window tolerance.
    pub threshold: Threshold,
    /// Which qualifying window to report.
    pub mode: SearchMode,
    /// Use the row-parallel scan when the `rayon` feature is enabled.
    ///
    /// Results are identical to the sequential scan; without the feature
    /// this flag is ignored.
    pub parallel: bool,
}

/// Configured sub-image matcher.
#[derive(Clone, Debug, Default)]
pub struct Matcher {
    cfg: MatchConfig,
}

impl Matcher {
    /// Creates a matcher with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, cfg: MatchConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Replaces the threshold.
    pub fn with_threshold(mut self, threshold: Threshold) -> Self {
        self.cfg.threshold = threshold;
        self
    }

    /// Replaces the search mode.
    pub fn with_mode(mut self, mode: SearchMode) -> Self {
        self.cfg.mode = mode;
        self
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &MatchConfig {
        &self.cfg
    }

    /// Searches `haystack` for `needle`.
    ///
    /// Returns `None` when no window qualifies, including when the needle is
    /// wider or taller than the haystack.
    pub fn find(&self, haystack: ImageView<'_>, needle: ImageView<'_>) -> Option<Match> {
        let _span = trace_span!(
            "find",
            haystack_w = haystack.width(),
            haystack_h = haystack.height(),
            needle_w = needle.width(),
            needle_h = needle.height(),
            threshold = self.cfg.threshold.value()
        )
        .entered();

        let found = self.dispatch(haystack, needle);
        match &found {
            Some(m) => {
                trace_event!(
                    "match_found",
                    x = m.x,
                    y = m.y,
                    mismatch_percent = m.mismatch_percent
                );
            }
            None => {
                trace_event!("match_not_found", windows = window_count(haystack, needle));
            }
        }
        found
    }

    /// Collects up to `limit` qualifying windows in row-major order.
    pub fn find_all(
        &self,
        haystack: ImageView<'_>,
        needle: ImageView<'_>,
        limit: usize,
    ) -> Vec<Match> {
        let _span = trace_span!("find_all", limit = limit).entered();
        let matches = scan::scan_all::<DefaultKernel>(haystack, needle, self.cfg.threshold, limit);
        trace_event!("matches_collected", count = matches.len());
        matches
    }

    /// Counts mismatched pixels for the window at `(x, y)`.
    ///
    /// Returns `None` if the window does not fit inside the haystack.
    pub fn mismatch_at(
        &self,
        haystack: ImageView<'_>,
        needle: ImageView<'_>,
        x: usize,
        y: usize,
    ) -> Option<usize> {
        if !haystack.fits(x, y, needle.width(), needle.height()) {
            return None;
        }
        Some(DefaultKernel::mismatches_at(
            haystack,
            needle,
            x,
            y,
            self.cfg.threshold.channel_tolerance(),
        ))
    }

    #[cfg(feature = "rayon")]
    fn dispatch(&self, haystack: ImageView<'_>, needle: ImageView<'_>) -> Option<Match> {
        use crate::kernel::rayon::{scan_best_par, scan_first_par};

        let t = self.cfg.threshold;
        match (self.cfg.mode, self.cfg.parallel) {
            (SearchMode::First, true) => scan_first_par::<DefaultKernel>(haystack, needle, t),
            (SearchMode::Best, true) => scan_best_par::<DefaultKernel>(haystack, needle, t),
            (SearchMode::First, false) => scan::scan_first::<DefaultKernel>(haystack, needle, t),
            (SearchMode::Best, false) => scan::scan_best::<DefaultKernel>(haystack, needle, t),
        }
    }

    #[cfg(not(feature = "rayon"))]
    fn dispatch(&self, haystack: ImageView<'_>, needle: ImageView<'_>) -> Option<Match> {
        let threshold = self.cfg.threshold;
        match self.cfg.mode {
            SearchMode::First => scan::scan_first::<DefaultKernel>(haystack, needle, threshold),
            SearchMode::Best => scan::scan_best::<DefaultKernel>(haystack, needle, threshold),
        }
    }
}

fn window_count(haystack: ImageView<'_>, needle: ImageView<'_>) -> usize {
    scan::placement_range(haystack, needle)
        .map_or(0, |(max_x, max_y)| (max_x + 1) * (max_y + 1))
}

/// Looks for `needle` inside `haystack`, reporting the first row-major window
/// that qualifies under `threshold`.
///
/// Fails only when `threshold` is NaN or outside `[0, 1]`.
///
/// ```
/// use pixelfind::{find, RasterImage};
///
/// let mut page = RasterImage::filled(10, 10, [255, 255, 255, 255]).unwrap();
/// page.fill_rect(5, 5, 3, 3, [0, 255, 0, 255]);
/// let icon = RasterImage::filled(3, 3, [0, 255, 0, 255]).unwrap();
///
/// let found = find(page.view(), icon.view(), 0.0).unwrap().unwrap();
/// assert_eq!((found.x, found.y), (5, 5));
/// ```
pub fn find(
    haystack: ImageView<'_>,
    needle: ImageView<'_>,
    threshold: f64,
) -> PixelFindResult<Option<Match>> {
    let matcher = Matcher::new().with_threshold(Threshold::new(threshold)?);
    Ok(matcher.find(haystack, needle))
}
