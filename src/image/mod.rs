//! Rasters and borrowed image views.
//!
//! `Raster` is the owned, immutable RGB buffer handed to the search. Its
//! pixels live in a reference-counted slice, so cloning a raster shares the
//! buffer instead of copying it. Scans never touch a raster directly: they
//! read through `ImageView`, a borrowed 2D view with an explicit stride.
//! The stride counts elements between the starts of consecutive rows; ROI
//! views are zero-copy and keep the parent stride.

use crate::geometry::Rect;
use crate::util::{FindImgError, FindImgResult};
use std::sync::Arc;

#[cfg(feature = "image-io")]
pub mod io;
pub mod resize;

/// One RGB pixel. Alpha is dropped when a raster is built.
pub type Rgb = [u8; 3];

/// Borrowed 2D image view with an explicit stride.
#[derive(Copy, Clone, Debug)]
pub struct ImageView<'a, T> {
    data: &'a [T],
    width: usize,
    height: usize,
    stride: usize,
}

impl<'a, T> ImageView<'a, T> {
    /// Creates a contiguous view with `stride == width`.
    pub fn from_slice(data: &'a [T], width: usize, height: usize) -> FindImgResult<Self> {
        Self::new(data, width, height, width)
    }

    /// Creates a view with an explicit stride.
    pub fn new(data: &'a [T], width: usize, height: usize, stride: usize) -> FindImgResult<Self> {
        let needed = required_len(width, height, stride)?;
        if data.len() < needed {
            return Err(FindImgError::BufferTooSmall {
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

    /// Returns the stride in elements between row starts.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Returns the element at `(x, y)` if it is within bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<&'a T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = y.checked_mul(self.stride)?.checked_add(x)?;
        self.data.get(idx)
    }

    /// Returns a contiguous slice for row `y` with length `width`.
    pub fn row(&self, y: usize) -> Option<&'a [T]> {
        if y >= self.height {
            return None;
        }
        let start = y.checked_mul(self.stride)?;
        let end = start.checked_add(self.width)?;
        self.data.get(start..end)
    }

    /// Returns a zero-copy ROI view into the same backing buffer.
    pub fn roi(
        &self,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    ) -> FindImgResult<ImageView<'a, T>> {
        if width == 0 || height == 0 {
            return Err(FindImgError::InvalidDimensions { width, height });
        }

        let out_of_bounds = FindImgError::RoiOutOfBounds {
            x,
            y,
            width,
            height,
            img_width: self.width,
            img_height: self.height,
        };
        let fits = x
            .checked_add(width)
            .zip(y.checked_add(height))
            .is_some_and(|(end_x, end_y)| end_x <= self.width && end_y <= self.height);
        if !fits {
            return Err(out_of_bounds);
        }

        let start = y * self.stride + x;
        let data = self.data.get(start..).ok_or(FindImgError::BufferTooSmall {
            needed: start.saturating_add(1),
            got: self.data.len(),
        })?;

        ImageView::new(data, width, height, self.stride)
    }
}

fn required_len(width: usize, height: usize, stride: usize) -> FindImgResult<usize> {
    if width == 0 || height == 0 {
        return Err(FindImgError::InvalidDimensions { width, height });
    }
    if stride < width {
        return Err(FindImgError::InvalidStride { width, stride });
    }
    (height - 1)
        .checked_mul(stride)
        .and_then(|v| v.checked_add(width))
        .ok_or(FindImgError::InvalidDimensions { width, height })
}

/// Owned, immutable RGB raster.
#[derive(Clone, Debug)]
pub struct Raster {
    data: Arc<[Rgb]>,
    width: usize,
    height: usize,
}

impl Raster {
    /// Creates a raster from row-major pixels.
    pub fn from_pixels(data: Vec<Rgb>, width: usize, height: usize) -> FindImgResult<Self> {
        let expected = required_len(width, height, width)?;
        if data.len() != expected {
            return Err(FindImgError::BufferSizeMismatch {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            data: data.into(),
            width,
            height,
        })
    }

    /// Creates a raster from packed `RGBRGB...` bytes.
    pub fn from_rgb_bytes(bytes: &[u8], width: usize, height: usize) -> FindImgResult<Self> {
        Self::from_packed(bytes, width, height, 3)
    }

    /// Creates a raster from packed `RGBARGBA...` bytes, discarding alpha.
    pub fn from_rgba_bytes(bytes: &[u8], width: usize, height: usize) -> FindImgResult<Self> {
        Self::from_packed(bytes, width, height, 4)
    }

    /// Creates a raster by evaluating `f(x, y)` for every pixel.
    pub fn from_fn<F>(width: usize, height: usize, mut f: F) -> FindImgResult<Self>
    where
        F: FnMut(usize, usize) -> Rgb,
    {
        let len = required_len(width, height, width)?;
        let mut data = Vec::with_capacity(len);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self::from_pixels(data, width, height)
    }

    fn from_packed(
        bytes: &[u8],
        width: usize,
        height: usize,
        channels: usize,
    ) -> FindImgResult<Self> {
        let len = required_len(width, height, width)?;
        let expected = len
            .checked_mul(channels)
            .ok_or(FindImgError::InvalidDimensions { width, height })?;
        if bytes.len() != expected {
            return Err(FindImgError::BufferSizeMismatch {
                expected,
                got: bytes.len(),
            });
        }
        let data = bytes
            .chunks_exact(channels)
            .map(|px| [px[0], px[1], px[2]])
            .collect();
        Self::from_pixels(data, width, height)
    }

    /// Returns the raster width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the raster height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the full bounds `[0, width) x [0, height)`.
    pub fn bounds(&self) -> Rect {
        Rect::from_size(0, 0, self.width, self.height)
    }

    /// Returns the row-major pixel slice.
    pub fn pixels(&self) -> &[Rgb] {
        &self.data
    }

    /// Returns the pixel at `(x, y)` if it is within bounds.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        self.view().get(x, y).copied()
    }

    /// Returns a borrowed view of the whole raster.
    pub fn view(&self) -> ImageView<'_, Rgb> {
        ImageView {
            data: &self.data,
            width: self.width,
            height: self.height,
            stride: self.width,
        }
    }

    /// Copies the pixels inside `rect` into a new raster.
    pub fn crop(&self, rect: Rect) -> FindImgResult<Self> {
        let roi = self
            .view()
            .roi(rect.min_x, rect.min_y, rect.width(), rect.height())?;
        Self::from_view(roi)
    }

    /// Copies a (possibly strided) view into a new contiguous raster.
    pub fn from_view(view: ImageView<'_, Rgb>) -> FindImgResult<Self> {
        let mut data = Vec::with_capacity(view.width() * view.height());
        for y in 0..view.height() {
            let row = view.row(y).ok_or(FindImgError::BufferTooSmall {
                needed: (y + 1) * view.stride(),
                got: view.data.len(),
            })?;
            data.extend_from_slice(row);
        }
        Self::from_pixels(data, view.width(), view.height())
    }

    /// Returns true if both rasters share the same backing buffer.
    pub fn shares_buffer(&self, other: &Raster) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }
}

#[cfg(test)]
mod tests {
    use super::{ImageView, Raster};
    use crate::geometry::Rect;
    use crate::util::FindImgError;

    #[test]
    fn rgba_bytes_drop_alpha() {
        let bytes = [1u8, 2, 3, 255, 4, 5, 6, 0];
        let raster = Raster::from_rgba_bytes(&bytes, 2, 1).unwrap();
        assert_eq!(raster.pixels(), &[[1, 2, 3], [4, 5, 6]]);
    }

    #[test]
    fn packed_bytes_must_match_dimensions() {
        let err = Raster::from_rgb_bytes(&[0u8; 5], 2, 1).unwrap_err();
        assert_eq!(err, FindImgError::BufferSizeMismatch { expected: 6, got: 5 });
        let err = Raster::from_rgb_bytes(&[0u8; 9], 2, 1).unwrap_err();
        assert_eq!(err, FindImgError::BufferSizeMismatch { expected: 6, got: 9 });
    }

    #[test]
    fn crop_copies_expected_pixels() {
        let raster = Raster::from_fn(4, 3, |x, y| [x as u8, y as u8, 0]).unwrap();
        let crop = raster.crop(Rect::new(1, 1, 3, 3)).unwrap();
        assert_eq!(crop.width(), 2);
        assert_eq!(crop.height(), 2);
        assert_eq!(crop.pixel(0, 0), Some([1, 1, 0]));
        assert_eq!(crop.pixel(1, 1), Some([2, 2, 0]));
    }

    #[test]
    fn clones_share_the_buffer() {
        let raster = Raster::from_fn(2, 2, |_, _| [7, 7, 7]).unwrap();
        let clone = raster.clone();
        assert!(raster.shares_buffer(&clone));
    }

    #[test]
    fn strided_view_skips_padding() {
        let data = [1u8, 2, 99, 3, 4, 99];
        let view = ImageView::new(&data, 2, 2, 3).unwrap();
        assert_eq!(view.row(1).unwrap(), &[3, 4]);
        assert!(view.get(2, 0).is_none());
    }
}
