use findimg::{resize, FindImgError, ImageView, Raster, Rect};

#[test]
fn image_view_rejects_invalid_dimensions() {
    let data = [0u8; 4];

    let err = ImageView::from_slice(&data, 0, 1).err().unwrap();
    assert_eq!(
        err,
        FindImgError::InvalidDimensions {
            width: 0,
            height: 1,
        }
    );
}

#[test]
fn image_view_rejects_invalid_stride() {
    let data = [0u8; 8];

    let err = ImageView::new(&data, 4, 1, 3).err().unwrap();
    assert_eq!(
        err,
        FindImgError::InvalidStride {
            width: 4,
            stride: 3,
        }
    );
}

#[test]
fn image_view_roi_matches_expected_values() {
    let data: Vec<u8> = (0u8..16).collect();
    let view = ImageView::from_slice(&data, 4, 4).unwrap();

    let roi = view.roi(1, 1, 2, 2).unwrap();
    assert_eq!(roi.width(), 2);
    assert_eq!(roi.stride(), 4);
    assert_eq!(roi.row(0).unwrap(), &[5u8, 6u8]);
    assert_eq!(roi.row(1).unwrap(), &[9u8, 10u8]);
    assert!(roi.get(2, 0).is_none());

    let err = view.roi(3, 3, 2, 2).err().unwrap();
    assert_eq!(
        err,
        FindImgError::RoiOutOfBounds {
            x: 3,
            y: 3,
            width: 2,
            height: 2,
            img_width: 4,
            img_height: 4,
        }
    );
}

#[test]
fn raster_rejects_zero_dimensions() {
    let err = Raster::from_pixels(Vec::new(), 0, 5).unwrap_err();
    assert_eq!(
        err,
        FindImgError::InvalidDimensions {
            width: 0,
            height: 5,
        }
    );
    assert!(Raster::from_rgb_bytes(&[], 3, 0).is_err());
}

#[test]
fn raster_rejects_wrong_pixel_count() {
    let err = Raster::from_pixels(vec![[0, 0, 0]; 5], 2, 3).unwrap_err();
    assert_eq!(err, FindImgError::BufferSizeMismatch { expected: 6, got: 5 });
}

#[test]
fn raster_rejects_extra_pixels() {
    let err = Raster::from_pixels(vec![[0, 0, 0]; 7], 2, 3).unwrap_err();
    assert_eq!(err, FindImgError::BufferSizeMismatch { expected: 6, got: 7 });
}

#[test]
fn crop_outside_raster_is_rejected() {
    let raster = Raster::from_fn(10, 10, |_, _| [0, 0, 0]).unwrap();
    assert!(matches!(
        raster.crop(Rect::new(5, 5, 12, 8)),
        Err(FindImgError::RoiOutOfBounds { .. })
    ));
}

#[test]
fn resize_derives_missing_dimension() {
    let raster = Raster::from_fn(800, 600, |x, y| [(x % 256) as u8, (y % 256) as u8, 0]).unwrap();
    let small = resize(&raster, 64, 0).unwrap();
    assert_eq!((small.width(), small.height()), (64, 48));
    let tiny = resize(&raster, 0, 1).unwrap();
    assert_eq!((tiny.width(), tiny.height()), (1, 1));
}
