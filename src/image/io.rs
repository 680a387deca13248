//! Convenience helpers for decoding and encoding rasters via the `image` crate.
//!
//! Available when the `image-io` feature is enabled. Every decoded image is
//! converted to RGBA8 so the matcher always sees four channels.

use crate::image::{ImageView, RasterImage};
use crate::search::{find, Match};
use crate::util::{PixelFindError, PixelFindResult};
use std::path::Path;

/// Creates a borrowed view from an RGBA image buffer.
pub fn view_from_rgba_image(img: &image::RgbaImage) -> PixelFindResult<ImageView<'_>> {
    ImageView::from_slice(img.as_raw(), img.width() as usize, img.height() as usize)
}

/// Creates an owned raster from an RGBA image buffer.
pub fn raster_from_rgba_image(img: &image::RgbaImage) -> PixelFindResult<RasterImage> {
    let (width, height) = (img.width() as usize, img.height() as usize);
    RasterImage::new(img.as_raw().clone(), width, height)
}

/// Converts any decoded image to an RGBA raster.
pub fn raster_from_dynamic_image(img: &image::DynamicImage) -> PixelFindResult<RasterImage> {
    let rgba = img.to_rgba8();
    let width = rgba.width() as usize;
    let height = rgba.height() as usize;
    RasterImage::new(rgba.into_raw(), width, height)
}

/// Loads an image from disk and converts it to an RGBA raster.
pub fn load_rgba_image<P: AsRef<Path>>(path: P) -> PixelFindResult<RasterImage> {
    let path = path.as_ref();
    let img = image::open(path).map_err(|err| PixelFindError::ImageIo {
        reason: format!("{}: {err}", path.display()),
    })?;
    raster_from_dynamic_image(&img)
}

/// Encodes a raster to disk; the format follows the file extension.
pub fn save_rgba_image<P: AsRef<Path>>(raster: &RasterImage, path: P) -> PixelFindResult<()> {
    let path = path.as_ref();
    let too_large = || PixelFindError::InvalidDimensions {
        width: raster.width(),
        height: raster.height(),
    };
    let width = u32::try_from(raster.width()).map_err(|_| too_large())?;
    let height = u32::try_from(raster.height()).map_err(|_| too_large())?;
    let data = raster.data().to_vec();
    let Some(buffer) = image::RgbaImage::from_raw(width, height, data) else {
        return Err(PixelFindError::BufferTooSmall {
            needed: raster.width() * raster.height() * 4,
            got: raster.data().len(),
        });
    };
    buffer.save(path).map_err(|err| PixelFindError::ImageIo {
        reason: format!("{}: {err}", path.display()),
    })
}

/// Loads a screenshot and a reference image and searches for the reference.
///
/// Decode failures surface as [`PixelFindError::ImageIo`]; a reference that
/// is simply absent yields `Ok(None)`.
pub fn find_in_files<P, Q>(
    haystack_path: P,
    needle_path: Q,
    threshold: f64,
) -> PixelFindResult<Option<Match>>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let haystack = load_rgba_image(haystack_path)?;
    let needle = load_rgba_image(needle_path)?;
    find(haystack.view(), needle.view(), threshold)
}
