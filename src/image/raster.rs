//! Owned contiguous RGBA8 rasters.

use crate::image::{ImageView, Rgba, CHANNELS};
use crate::util::{PixelFindError, PixelFindResult};

/// Owned contiguous RGBA8 image buffer (row-major, 4 bytes per pixel).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterImage {
    data: Vec<u8>,
    width: usize,
    height: usize,
}

impl RasterImage {
    /// Wraps a packed RGBA8 buffer of exactly `width * height * 4` bytes.
    pub fn new(data: Vec<u8>, width: usize, height: usize) -> PixelFindResult<Self> {
        if width == 0 || height == 0 {
            return Err(PixelFindError::InvalidDimensions { width, height });
        }
        let needed = width
            .checked_mul(height)
            .and_then(|v| v.checked_mul(CHANNELS))
            .ok_or(PixelFindError::InvalidDimensions { width, height })?;
        if data.len() < needed {
            return Err(PixelFindError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        if data.len() > needed {
            return Err(PixelFindError::InvalidDimensions { width, height });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Creates an image where every pixel is `color`.
    pub fn filled(width: usize, height: usize, color: Rgba) -> PixelFindResult<Self> {
        let count = width
            .checked_mul(height)
            .ok_or(PixelFindError::InvalidDimensions { width, height })?;
        Self::new(color.repeat(count), width, height)
    }

    /// Builds an image by evaluating `f(x, y)` for every pixel.
    pub fn from_fn<F>(width: usize, height: usize, mut f: F) -> PixelFindResult<Self>
    where
        F: FnMut(usize, usize) -> Rgba,
    {
        let count = width
            .checked_mul(height)
            .ok_or(PixelFindError::InvalidDimensions { width, height })?;
        let mut data = Vec::with_capacity(count * CHANNELS);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&f(x, y));
            }
        }
        Self::new(data, width, height)
    }

    /// Copies an arbitrary (possibly strided) view into a packed raster.
    pub fn from_view(view: ImageView<'_>) -> PixelFindResult<Self> {
        let mut data = Vec::with_capacity(view.area() * CHANNELS);
        for y in 0..view.height() {
            let row = view.row(y).ok_or(PixelFindError::BufferTooSmall {
                needed: (y * view.stride() + view.width()) * CHANNELS,
                got: view.as_bytes().len(),
            })?;
            data.extend_from_slice(row);
        }
        Self::new(data, view.width(), view.height())
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the packed RGBA8 bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the image and returns its packed RGBA8 bytes.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Returns a borrowed view of the whole image.
    pub fn view(&self) -> ImageView<'_> {
        ImageView {
            data: &self.data,
            width: self.width,
            height: self.height,
            stride: self.width,
        }
    }

    /// Returns the pixel at `(x, y)` if it is within bounds.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgba> {
        self.view().pixel(x, y)
    }

    /// Overwrites the pixel at `(x, y)`; out-of-bounds writes are ignored.
    pub fn set_pixel(&mut self, x: usize, y: usize, color: Rgba) {
        if x >= self.width || y >= self.height {
            return;
        }
        let start = (y * self.width + x) * CHANNELS;
        self.data[start..start + CHANNELS].copy_from_slice(&color);
    }

    /// Paints a rectangle, clipped to the image bounds.
    pub fn fill_rect(&mut self, x: usize, y: usize, width: usize, height: usize, color: Rgba) {
        let end_x = x.saturating_add(width).min(self.width);
        let end_y = y.saturating_add(height).min(self.height);
        for py in y..end_y {
            for px in x..end_x {
                self.set_pixel(px, py, color);
            }
        }
    }

    /// Copies a sub-rectangle into a new packed raster.
    pub fn crop(&self, x: usize, y: usize, width: usize, height: usize) -> PixelFindResult<Self> {
        Self::from_view(self.view().roi(x, y, width, height)?)
    }
}

#[cfg(test)]
mod tests {
    use super::RasterImage;
    use crate::PixelFindError;

    #[test]
    fn new_rejects_oversized_buffers() {
        let err = RasterImage::new(vec![0u8; 20], 2, 2).unwrap_err();
        assert_eq!(
            err,
            PixelFindError::InvalidDimensions {
                width: 2,
                height: 2,
            }
        );
    }

    #[test]
    fn fill_rect_clips_to_bounds() {
        let mut img = RasterImage::filled(3, 3, [0, 0, 0, 255]).unwrap();
        img.fill_rect(2, 2, 5, 5, [1, 2, 3, 4]);
        assert_eq!(img.pixel(2, 2), Some([1, 2, 3, 4]));
        assert_eq!(img.pixel(1, 2), Some([0, 0, 0, 255]));
    }

    #[test]
    fn crop_copies_the_requested_window() {
        let img = RasterImage::from_fn(4, 3, |x, y| [x as u8, y as u8, 0, 255]).unwrap();
        let crop = img.crop(1, 1, 2, 2).unwrap();
        assert_eq!(crop.width(), 2);
        assert_eq!(crop.height(), 2);
        assert_eq!(crop.pixel(0, 0), Some([1, 1, 0, 255]));
        assert_eq!(crop.pixel(1, 1), Some([2, 2, 0, 255]));
    }
}
