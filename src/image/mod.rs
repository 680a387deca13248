//! RGBA image views and owned rasters.
//!
//! `ImageView` is a borrowed 2D view into a packed RGBA8 byte buffer. The
//! stride counts *pixels* between the starts of consecutive rows, so a stride
//! larger than the width represents padded rows. ROI slices are zero-copy
//! views into the same backing slice and retain the original stride.

use crate::util::{PixelFindError, PixelFindResult};

#[cfg(feature = "image-io")]
pub mod io;
mod raster;

pub use raster::RasterImage;

/// Number of interleaved channels per pixel (red, green, blue, alpha).
pub const CHANNELS: usize = 4;

/// A single RGBA8 pixel.
pub type Rgba = [u8; CHANNELS];

/// Borrowed RGBA8 view with an explicit stride.
#[derive(Copy, Clone, Debug)]
pub struct ImageView<'a> {
    data: &'a [u8],
    width: usize,
    height: usize,
    stride: usize,
}

impl<'a> ImageView<'a> {
    /// Creates a contiguous view with `stride == width`.
    pub fn from_slice(data: &'a [u8], width: usize, height: usize) -> PixelFindResult<Self> {
        Self::new(data, width, height, width)
    }

    /// Creates a view with an explicit stride in pixels.
    pub fn new(
        data: &'a [u8],
        width: usize,
        height: usize,
        stride: usize,
    ) -> PixelFindResult<Self> {
        let needed = required_len(width, height, stride)?;
        if data.len() < needed {
            return Err(PixelFindError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            stride,
        })
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the stride in pixels between row starts.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Returns the number of pixels covered by the view.
    pub fn area(&self) -> usize {
        self.width * self.height
    }

    /// Returns the backing byte slice including any row padding.
    pub fn as_bytes(&self) -> &'a [u8] {
        self.data
    }

    /// Returns the pixel at `(x, y)` if it is within bounds.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let start = y
            .checked_mul(self.stride)?
            .checked_add(x)?
            .checked_mul(CHANNELS)?;
        let px = self.data.get(start..start + CHANNELS)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Returns the bytes of row `y`, `width * 4` long.
    pub fn row(&self, y: usize) -> Option<&'a [u8]> {
        if y >= self.height {
            return None;
        }
        let start = y.checked_mul(self.stride)?.checked_mul(CHANNELS)?;
        let end = start.checked_add(self.width * CHANNELS)?;
        self.data.get(start..end)
    }

    /// Returns a zero-copy ROI view into the same backing buffer.
    pub fn roi(
        &self,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    ) -> PixelFindResult<ImageView<'a>> {
        if width == 0 || height == 0 {
            return Err(PixelFindError::InvalidDimensions { width, height });
        }

        let out_of_bounds = PixelFindError::RoiOutOfBounds {
            x,
            y,
            width,
            height,
            img_width: self.width,
            img_height: self.height,
        };
        let end_x = x.checked_add(width).ok_or_else(|| out_of_bounds.clone())?;
        let end_y = y.checked_add(height).ok_or_else(|| out_of_bounds.clone())?;
        if end_x > self.width || end_y > self.height {
            return Err(out_of_bounds);
        }

        let start = (y * self.stride + x) * CHANNELS;
        let data = self
            .data
            .get(start..)
            .ok_or(PixelFindError::BufferTooSmall {
                needed: start.saturating_add(CHANNELS),
                got: self.data.len(),
            })?;

        ImageView::new(data, width, height, self.stride)
    }

    /// Returns true if a `width x height` window fits at `(x, y)`.
    pub fn fits(&self, x: usize, y: usize, width: usize, height: usize) -> bool {
        x.checked_add(width).is_some_and(|end| end <= self.width)
            && y.checked_add(height).is_some_and(|end| end <= self.height)
    }
}

fn required_len(width: usize, height: usize, stride: usize) -> PixelFindResult<usize> {
    if width == 0 || height == 0 {
        return Err(PixelFindError::InvalidDimensions { width, height });
    }
    if stride < width {
        return Err(PixelFindError::InvalidStride { width, stride });
    }
    (height - 1)
        .checked_mul(stride)
        .and_then(|v| v.checked_add(width))
        .and_then(|v| v.checked_mul(CHANNELS))
        .ok_or(PixelFindError::InvalidDimensions { width, height })
}

#[cfg(test)]
mod tests {
    use super::ImageView;

    #[test]
    fn padded_rows_skip_stride_bytes() {
        // 2x2 image stored with a stride of 3 pixels.
        let mut data = vec![0u8; (3 + 2) * 4];
        data[12..16].copy_from_slice(&[9, 8, 7, 6]);
        let view = ImageView::new(&data, 2, 2, 3).unwrap();
        assert_eq!(view.pixel(0, 1), Some([9, 8, 7, 6]));
        assert_eq!(view.row(1).unwrap().len(), 8);
        assert!(view.pixel(2, 0).is_none());
    }

    #[test]
    fn fits_rejects_overflowing_windows() {
        let data = vec![0u8; 16];
        let view = ImageView::from_slice(&data, 2, 2).unwrap();
        assert!(view.fits(0, 0, 2, 2));
        assert!(!view.fits(1, 0, 2, 1));
        assert!(!view.fits(usize::MAX, 0, 2, 1));
    }
}
