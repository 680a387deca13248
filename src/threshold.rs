//! Validated match tolerance.
//!
//! One value drives two limits: the largest per-channel difference (as a
//! fraction of 255) a pixel may show before it counts as mismatched, and the
//! largest fraction of mismatched pixels a window may contain.

use crate::util::{PixelFindError, PixelFindResult};

/// Tolerance in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Threshold(f64);

impl Threshold {
    /// Exact matching: any channel difference mismatches a pixel and any
    /// mismatched pixel rejects a window.
    pub const EXACT: Threshold = Threshold(0.0);

    /// Tolerance used by the screenshot assertions this crate grew out of.
    pub const DEFAULT: Threshold = Threshold(0.1);

    /// Validates `value`; NaN and values outside `[0, 1]` are rejected.
    pub fn new(value: f64) -> PixelFindResult<Self> {
        if (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(PixelFindError::InvalidThreshold { value })
        }
    }

    /// Clamps `value` into `[0, 1]`; NaN maps to [`Threshold::EXACT`].
    pub fn clamped(value: f64) -> Self {
        if value.is_nan() {
            return Self::EXACT;
        }
        Self(value.clamp(0.0, 1.0))
    }

    /// Returns the raw tolerance.
    pub fn value(self) -> f64 {
        self.0
    }

    /// Largest absolute channel difference that still counts as equal.
    ///
    /// A pixel mismatches when a difference exceeds `255 * t`. Differences
    /// are integers, so `d > 255 * t` holds exactly when `d > floor(255 * t)`.
    pub fn channel_tolerance(self) -> u8 {
        (255.0 * self.0).floor() as u8
    }

    /// Highest mismatch percentage a window may have and still match.
    pub fn max_mismatch_percent(self) -> f64 {
        self.0 * 100.0
    }

    /// Returns true if `mismatched` out of `total` pixels is acceptable.
    pub fn accepts(self, mismatched: usize, total: usize) -> bool {
        if total == 0 {
            return true;
        }
        mismatch_percent(mismatched, total) <= self.max_mismatch_percent()
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<f64> for Threshold {
    type Error = PixelFindError;

    fn try_from(value: f64) -> PixelFindResult<Self> {
        Self::new(value)
    }
}

/// Percentage of mismatched pixels in a window of `total` pixels.
pub(crate) fn mismatch_percent(mismatched: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    mismatched as f64 / total as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::{mismatch_percent, Threshold};
    use crate::PixelFindError;

    #[test]
    fn rejects_out_of_range_values() {
        assert_eq!(
            Threshold::new(-0.01).unwrap_err(),
            PixelFindError::InvalidThreshold { value: -0.01 }
        );
        assert!(Threshold::new(1.5).is_err());
        assert!(Threshold::new(f64::NAN).is_err());
        assert!(Threshold::new(1.0).is_ok());
    }

    #[test]
    fn clamped_saturates() {
        assert_eq!(Threshold::clamped(2.0).value(), 1.0);
        assert_eq!(Threshold::clamped(-3.0).value(), 0.0);
        assert_eq!(Threshold::clamped(f64::NAN), Threshold::EXACT);
    }

    #[test]
    fn channel_tolerance_floors() {
        assert_eq!(Threshold::EXACT.channel_tolerance(), 0);
        assert_eq!(Threshold::DEFAULT.channel_tolerance(), 25);
        assert_eq!(Threshold::new(1.0).unwrap().channel_tolerance(), 255);
    }

    #[test]
    fn accepts_compares_percentages() {
        let t = Threshold::DEFAULT;
        assert!(t.accepts(1, 10));
        assert!(!t.accepts(2, 10));
        assert!(Threshold::EXACT.accepts(0, 4));
        assert!(!Threshold::EXACT.accepts(1, 4));
        assert_eq!(mismatch_percent(1, 4), 25.0);
    }

    #[test]
    fn accepts_shares_exactly_at_the_limit() {
        let cases = [
            (57, 100, 0.57),
            (7, 20, 0.35),
            (29, 100, 0.29),
            (3, 10, 0.3),
        ];
        for (mismatched, total, t) in cases {
            let threshold = Threshold::new(t).unwrap();
            let over = mismatched + 1;
            assert!(threshold.accepts(mismatched, total), "{mismatched} at {t}");
            assert!(!threshold.accepts(over, total), "{over}/{total} at {t}");
        }
    }

    #[test]
    fn channel_tolerance_at_integral_products() {
        // 255 * 0.2 = 51: a difference of 51 is tolerated, 52 is not.
        assert_eq!(Threshold::new(0.2).unwrap().channel_tolerance(), 51);
        assert_eq!(Threshold::new(0.6).unwrap().channel_tolerance(), 153);
    }
}
