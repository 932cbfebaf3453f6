//! Raster resampling.
//!
//! Resampling is delegated to `image::imageops::resize` with a Catmull-Rom
//! filter. The raster buffer is wrapped as an `ImageBuffer` over a borrowed
//! slice, so the source pixels are not copied before filtering.

use crate::image::{Raster, Rgb};
use crate::util::{FindImgError, FindImgResult};
use image::imageops::{self, FilterType};
use image::ImageBuffer;

/// Resolves the target size, deriving a zero dimension from the source aspect
/// ratio. Both resolved dimensions are at least 1.
pub fn target_size(
    src_width: usize,
    src_height: usize,
    width: usize,
    height: usize,
) -> FindImgResult<(usize, usize)> {
    if src_width == 0 || src_height == 0 {
        return Err(FindImgError::InvalidDimensions {
            width: src_width,
            height: src_height,
        });
    }
    let (width, height) = match (width, height) {
        (0, 0) => return Err(FindImgError::InvalidDimensions { width, height }),
        (0, h) => ((h as f64 * src_width as f64 / src_height as f64) as usize, h),
        (w, 0) => (w, (w as f64 * src_height as f64 / src_width as f64) as usize),
        (w, h) => (w, h),
    };
    Ok((width.max(1), height.max(1)))
}

/// Resamples `src` to `width x height`; one of the two may be 0 to keep the
/// aspect ratio.
///
/// Resizing to the source's own size returns a clone sharing its buffer.
pub fn resize(src: &Raster, width: usize, height: usize) -> FindImgResult<Raster> {
    let (width, height) = target_size(src.width(), src.height(), width, height)?;
    if (width, height) == (src.width(), src.height()) {
        return Ok(src.clone());
    }

    let (dst_w, dst_h) = match (u32::try_from(width), u32::try_from(height)) {
        (Ok(w), Ok(h)) => (w, h),
        _ => return Err(FindImgError::InvalidDimensions { width, height }),
    };
    let view = ImageBuffer::<image::Rgb<u8>, &[u8]>::from_raw(
        src.width() as u32,
        src.height() as u32,
        src.pixels().as_flattened(),
    )
    .ok_or(FindImgError::BufferTooSmall {
        needed: src.width() * src.height() * 3,
        got: src.pixels().len() * 3,
    })?;

    let resized = imageops::resize(&view, dst_w, dst_h, FilterType::CatmullRom);
    let data: Vec<Rgb> = resized
        .into_raw()
        .chunks_exact(3)
        .map(|px| [px[0], px[1], px[2]])
        .collect();
    Raster::from_pixels(data, width, height)
}

#[cfg(test)]
mod tests {
    use super::{resize, target_size};
    use crate::image::Raster;
    use crate::util::FindImgError;

    #[test]
    fn zero_height_keeps_aspect_ratio() {
        assert_eq!(target_size(800, 600, 128, 0).unwrap(), (128, 96));
        assert_eq!(target_size(800, 600, 0, 30).unwrap(), (40, 30));
    }

    #[test]
    fn derived_dimension_is_at_least_one() {
        assert_eq!(target_size(1000, 10, 8, 0).unwrap(), (8, 1));
    }

    #[test]
    fn both_zero_is_rejected() {
        let err = target_size(10, 10, 0, 0).unwrap_err();
        assert_eq!(
            err,
            FindImgError::InvalidDimensions {
                width: 0,
                height: 0
            }
        );
    }

    #[test]
    fn same_size_returns_shared_buffer() {
        let src = Raster::from_fn(5, 4, |x, y| [x as u8, y as u8, 9]).unwrap();
        let out = resize(&src, 5, 4).unwrap();
        assert!(out.shares_buffer(&src));
    }

    #[test]
    fn constant_image_stays_constant() {
        let src = Raster::from_fn(40, 30, |_, _| [120, 60, 30]).unwrap();
        let out = resize(&src, 10, 0).unwrap();
        assert_eq!((out.width(), out.height()), (10, 7));
        assert!(out.pixels().iter().all(|&px| px == [120, 60, 30]));
    }
}
