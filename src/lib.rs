//! pixelfind locates a small RGBA reference image inside a larger screenshot.
//!
//! The core is a brute-force sliding-window comparison with a single
//! tolerance, meant for visual assertions over test screenshots. Optional
//! features add a row-parallel scan (`rayon`), a vectorized kernel (`simd`),
//! file decoding (`image-io`) and structured logging (`tracing`).

pub mod assert;
pub mod image;
pub mod kernel;
pub mod lowlevel;
pub mod search;
pub mod threshold;
mod trace;
pub mod util;

pub use assert::{assert_contains, assert_not_contains};
pub use crate::image::{ImageView, RasterImage, Rgba, CHANNELS};
pub use search::{find, Match, MatchConfig, Matcher, SearchMode};
pub use threshold::Threshold;
pub use util::{PixelFindError, PixelFindResult};

#[cfg(feature = "image-io")]
pub use crate::image::io;
