//! Convenience helpers for loading and saving rasters via the `image` crate.
//!
//! Available when the `image-io` feature is enabled.

use crate::image::Raster;
use crate::util::{FindImgError, FindImgResult};
use std::path::Path;

/// Creates a raster from an RGB image buffer.
pub fn raster_from_rgb_image(img: &image::RgbImage) -> FindImgResult<Raster> {
    Raster::from_rgb_bytes(img.as_raw(), img.width() as usize, img.height() as usize)
}

/// Creates a raster from any decoded image; alpha is discarded.
pub fn raster_from_dynamic_image(img: &image::DynamicImage) -> FindImgResult<Raster> {
    raster_from_rgb_image(&img.to_rgb8())
}

/// Copies a raster into an RGB image buffer.
pub fn raster_to_rgb_image(raster: &Raster) -> FindImgResult<image::RgbImage> {
    let (width, height) = (raster.width(), raster.height());
    image::RgbImage::from_raw(
        width as u32,
        height as u32,
        raster.pixels().as_flattened().to_vec(),
    )
    .ok_or(FindImgError::InvalidDimensions { width, height })
}

/// Loads an image from disk as an RGB raster.
pub fn load_raster<P: AsRef<Path>>(path: P) -> FindImgResult<Raster> {
    let img = image::open(path).map_err(|err| FindImgError::ImageIo {
        reason: err.to_string(),
    })?;
    raster_from_dynamic_image(&img)
}

/// Saves a raster; the format follows the file extension.
pub fn save_raster<P: AsRef<Path>>(raster: &Raster, path: P) -> FindImgResult<()> {
    raster_to_rgb_image(raster)?
        .save(path)
        .map_err(|err| FindImgError::ImageIo {
            reason: err.to_string(),
        })
}

/// Saves a grayscale image such as a similarity map.
pub fn save_gray<P: AsRef<Path>>(img: &image::GrayImage, path: P) -> FindImgResult<()> {
    img.save(path).map_err(|err| FindImgError::ImageIo {
        reason: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::{raster_from_dynamic_image, raster_to_rgb_image};
    use crate::image::Raster;

    #[test]
    fn rgba_dynamic_image_drops_alpha() {
        let rgba = image::RgbaImage::from_raw(2, 1, vec![10, 20, 30, 0, 40, 50, 60, 255]).unwrap();
        let raster = raster_from_dynamic_image(&image::DynamicImage::ImageRgba8(rgba)).unwrap();
        assert_eq!(raster.pixels(), &[[10, 20, 30], [40, 50, 60]]);
    }

    #[test]
    fn rgb_image_conversion_keeps_pixels() {
        let raster = Raster::from_fn(3, 2, |x, y| [x as u8, y as u8, 5]).unwrap();
        let img = raster_to_rgb_image(&raster).unwrap();
        assert_eq!(img.get_pixel(2, 1).0, [2, 1, 5]);
    }
}
