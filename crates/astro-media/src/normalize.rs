//! Square-image normalization for the daily post.

use std::io::Cursor;

use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageOutputFormat, RgbImage};
use tracing::debug;

use astro_models::media::{CanonicalImage, JPEG_QUALITY, TARGET_IMAGE_SIZE};

use crate::error::{MediaError, MediaResult};

/// Normalize arbitrary image bytes into a centered square JPEG.
///
/// Decode failure is the only error path; every input geometry falls
/// through center-crop, exact resize, and a last-resort paste onto a black
/// canvas.
pub fn normalize_square(bytes: &[u8], target: u32) -> MediaResult<CanonicalImage> {
    let img = image::load_from_memory(bytes).map_err(|e| MediaError::Decode(e.to_string()))?;

    let (width, height) = img.dimensions();
    debug!(
        "Normalizing {}x{} image to {}x{}",
        width, height, target, target
    );

    let side = width.min(height);
    let x = (width - side) / 2;
    let y = (height - side) / 2;
    let square = img.crop_imm(x, y, side, side);

    let resized = square.resize_exact(target, target, FilterType::Lanczos3);

    // Guard: anything other than target x target breaks the post format.
    let mut rgb = resized.to_rgb8();
    if rgb.dimensions() != (target, target) {
        let mut canvas = RgbImage::new(target, target);
        image::imageops::overlay(&mut canvas, &rgb, 0, 0);
        rgb = canvas;
    }

    let mut buf = Vec::new();
    DynamicImage::ImageRgb8(rgb)
        .write_to(
            &mut Cursor::new(&mut buf),
            ImageOutputFormat::Jpeg(JPEG_QUALITY),
        )
        .map_err(|e| MediaError::Encode(e.to_string()))?;

    Ok(CanonicalImage::new(buf, target, target))
}

/// Normalize to the canonical post size.
pub fn normalize_post_image(bytes: &[u8]) -> MediaResult<CanonicalImage> {
    normalize_square(bytes, TARGET_IMAGE_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let mut img = RgbImage::new(width, height);
        for (x, _, p) in img.enumerate_pixels_mut() {
            *p = Rgb([(x % 256) as u8, 64, 128]);
        }
        let mut buf = Vec::new();
        DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut buf), ImageOutputFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn test_landscape_becomes_square() {
        let out = normalize_square(&png_bytes(192, 108), 64).unwrap();
        assert_eq!((out.width, out.height), (64, 64));
        let decoded = image::load_from_memory(&out.bytes).unwrap();
        assert_eq!(decoded.dimensions(), (64, 64));
    }

    #[test]
    fn test_portrait_becomes_square() {
        let out = normalize_square(&png_bytes(50, 120), 64).unwrap();
        let decoded = image::load_from_memory(&out.bytes).unwrap();
        assert_eq!(decoded.dimensions(), (64, 64));
    }

    #[test]
    fn test_square_input_resizes() {
        let out = normalize_square(&png_bytes(100, 100), 64).unwrap();
        let decoded = image::load_from_memory(&out.bytes).unwrap();
        assert_eq!(decoded.dimensions(), (64, 64));
    }

    #[test]
    fn test_output_is_jpeg() {
        let out = normalize_square(&png_bytes(80, 80), 32).unwrap();
        assert!(out.bytes.starts_with(&[0xFF, 0xD8]));
    }

    #[test]
    fn test_garbage_bytes_fail_decode() {
        let err = normalize_square(&[0u8; 64], 64).unwrap_err();
        assert!(matches!(err, MediaError::Decode(_)));
    }

    #[test]
    fn test_canonical_size_from_small_input() {
        let out = normalize_post_image(&png_bytes(96, 54)).unwrap();
        assert_eq!((out.width, out.height), (TARGET_IMAGE_SIZE, TARGET_IMAGE_SIZE));
        let decoded = image::load_from_memory(&out.bytes).unwrap();
        assert_eq!(decoded.dimensions(), (TARGET_IMAGE_SIZE, TARGET_IMAGE_SIZE));
    }
}
