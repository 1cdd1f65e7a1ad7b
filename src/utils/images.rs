use crate::error::{Error, Result};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageFormat};
use std::cmp::Ordering;
use std::fs;
use std::io::BufWriter;
use std::path::Path;

/// JPEG quality used for exported squares
pub const JPEG_QUALITY: u8 = 95;

/// Pixel window `[left, right) x [top, bottom)` of a crop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropBox {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl CropBox {
    pub fn width(&self) -> u32 {
        self.right - self.left
    }

    pub fn height(&self) -> u32 {
        self.bottom - self.top
    }
}

/// Largest centred square window of a `width` x `height` image
pub fn square_box(width: u32, height: u32) -> CropBox {
    match width.cmp(&height) {
        // Landscape: keep full height, centre horizontally
        Ordering::Greater => {
            let x = (width - height) / 2;
            CropBox {
                left: x,
                top: 0,
                right: x + height,
                bottom: height,
            }
        }
        // Portrait: keep full width, centre vertically
        Ordering::Less => {
            let y = (height - width) / 2;
            CropBox {
                left: 0,
                top: y,
                right: width,
                bottom: y + width,
            }
        }
        Ordering::Equal => CropBox {
            left: 0,
            top: 0,
            right: width,
            bottom: height,
        },
    }
}

/// Crop `img` to its centred square. Square inputs are returned as-is.
pub fn crop_square(img: DynamicImage) -> DynamicImage {
    let (width, height) = img.dimensions();
    if width == height {
        return img;
    }
    let b = square_box(width, height);
    img.crop_imm(b.left, b.top, b.width(), b.height())
}

/// Crop to a centred square, then resample to exactly `size` x `size`
/// with a Lanczos3 filter.
pub fn resize_and_crop_square(img: DynamicImage, size: u32) -> Result<DynamicImage> {
    if size == 0 {
        return Err(Error::InvalidSize(size));
    }
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return Err(Error::invalid_image(format!(
            "image has invalid dimensions ({}x{})",
            width, height
        )));
    }

    let square = crop_square(img);
    let resized = square.resize_exact(size, size, FilterType::Lanczos3);
    check_square(&resized, size)?;
    Ok(resized)
}

/// Fail unless `img` is exactly `size` x `size`
pub fn check_square(img: &DynamicImage, size: u32) -> Result<()> {
    let (width, height) = img.dimensions();
    if width != size || height != size {
        return Err(Error::WrongSize {
            width,
            height,
            expected: size,
        });
    }
    Ok(())
}

/// Save as 8-bit RGB in the format implied by the target extension.
/// JPEG output uses [`JPEG_QUALITY`].
pub fn save_rgb(img: &DynamicImage, target_path: &Path) -> Result<()> {
    let format = ImageFormat::from_path(target_path)?;
    let rgb = img.to_rgb8();

    match format {
        ImageFormat::Jpeg => {
            let file = fs::File::create(target_path)?;
            let encoder = JpegEncoder::new_with_quality(BufWriter::new(file), JPEG_QUALITY);
            rgb.write_with_encoder(encoder)?;
        }
        other => rgb.save_with_format(target_path, other)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use tempfile::tempdir;

    fn blank(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::new(width, height))
    }

    #[test]
    fn landscape_box_matches_reference_example() {
        assert_eq!(
            square_box(800, 600),
            CropBox {
                left: 100,
                top: 0,
                right: 700,
                bottom: 600
            }
        );
    }

    #[test]
    fn landscape_crop_keeps_height() {
        for (w, h) in [(800, 600), (101, 100), (1000, 3), (7, 2)] {
            let out = crop_square(blank(w, h));
            assert_eq!(out.dimensions(), (h, h), "{}x{}", w, h);
        }
    }

    #[test]
    fn portrait_crop_keeps_width() {
        for (w, h) in [(600, 800), (100, 101), (3, 1000), (2, 7)] {
            let out = crop_square(blank(w, h));
            assert_eq!(out.dimensions(), (w, w), "{}x{}", w, h);
        }
    }

    #[test]
    fn portrait_box_is_centred() {
        assert_eq!(
            square_box(600, 801),
            CropBox {
                left: 0,
                top: 100,
                right: 600,
                bottom: 700
            }
        );
    }

    #[test]
    fn square_input_is_untouched() {
        let mut src = RgbImage::new(5, 5);
        src.put_pixel(0, 0, Rgb([255, 0, 0]));
        let out = crop_square(DynamicImage::ImageRgb8(src.clone()));
        assert_eq!(out.to_rgb8(), src);
    }

    #[test]
    fn crop_takes_the_centre_pixels() {
        let mut src = RgbImage::new(5, 3);
        // Column 1 is the left edge of the centred 3x3 window
        src.put_pixel(1, 0, Rgb([9, 9, 9]));
        let out = crop_square(DynamicImage::ImageRgb8(src)).to_rgb8();
        assert_eq!(out.get_pixel(0, 0), &Rgb([9, 9, 9]));
    }

    #[test]
    fn reference_example_resizes_to_64() {
        let out = resize_and_crop_square(blank(800, 600), 64).unwrap();
        assert_eq!(out.dimensions(), (64, 64));
    }

    #[test]
    fn output_is_always_requested_size() {
        for (w, h) in [(1, 1), (640, 480), (480, 640), (33, 33), (2, 900)] {
            for size in [1, 16, 64, 128] {
                let out = resize_and_crop_square(blank(w, h), size).unwrap();
                assert_eq!(out.dimensions(), (size, size));
            }
        }
    }

    #[test]
    fn zero_size_is_rejected() {
        assert!(matches!(
            resize_and_crop_square(blank(10, 10), 0),
            Err(Error::InvalidSize(0))
        ));
    }

    #[test]
    fn empty_image_is_rejected() {
        assert!(matches!(
            resize_and_crop_square(blank(0, 10), 8),
            Err(Error::InvalidImage(_))
        ));
    }

    #[test]
    fn check_square_reports_mismatch() {
        let err = check_square(&blank(64, 63), 64).unwrap_err();
        assert!(matches!(
            err,
            Error::WrongSize {
                width: 64,
                height: 63,
                expected: 64
            }
        ));
    }

    #[test]
    fn saves_jpeg_and_png_by_extension() {
        let tmp = tempdir().unwrap();
        let img = DynamicImage::ImageRgba8(image::RgbaImage::new(8, 8));

        let jpg = tmp.path().join("out.jpg");
        save_rgb(&img, &jpg).unwrap();
        assert_eq!(
            image::ImageFormat::from_path(&jpg).unwrap(),
            ImageFormat::Jpeg
        );
        assert_eq!(image::open(&jpg).unwrap().dimensions(), (8, 8));

        let png = tmp.path().join("out.png");
        save_rgb(&img, &png).unwrap();
        let reopened = image::open(&png).unwrap();
        assert_eq!(reopened.color(), image::ColorType::Rgb8);
    }

    #[test]
    fn unknown_extension_fails() {
        let tmp = tempdir().unwrap();
        let target = tmp.path().join("out.notanimage");
        assert!(save_rgb(&blank(4, 4), &target).is_err());
        assert!(!target.exists());
    }
}
