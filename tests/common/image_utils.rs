//! Image utilities for testing.
//!
//! Helpers for decoding and inspecting legend images returned by the server.

use image::{ImageFormat, RgbaImage};

/// Decode PNG bytes into an RGBA image, checking the format on the way
pub fn decode_png(bytes: &[u8]) -> Result<RgbaImage, String> {
    match image::guess_format(bytes) {
        Ok(ImageFormat::Png) => {}
        Ok(other) => return Err(format!("Expected PNG, got {:?}", other)),
        Err(e) => return Err(format!("Could not detect image format: {}", e)),
    }

    image::load_from_memory(bytes)
        .map(|img| img.to_rgba8())
        .map_err(|e| format!("Failed to decode PNG: {}", e))
}

/// Check that every row of a legend repeats the first row
pub fn assert_rows_repeat(image: &RgbaImage) -> Result<(), String> {
    let (width, height) = image.dimensions();
    for y in 1..height {
        for x in 0..width {
            if image.get_pixel(x, y) != image.get_pixel(x, 0) {
                return Err(format!(
                    "Row {} differs from row 0 at column {}: {:?} vs {:?}",
                    y,
                    x,
                    image.get_pixel(x, y),
                    image.get_pixel(x, 0)
                ));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgba};

    #[test]
    fn test_decode_png_rejects_other_bytes() {
        assert!(decode_png(b"not an image").is_err());
    }

    #[test]
    fn test_assert_rows_repeat() {
        let striped = ImageBuffer::from_fn(3, 2, |x, _| Rgba([x as u8, 0, 0, 255]));
        assert!(assert_rows_repeat(&striped).is_ok());

        let mut broken = striped.clone();
        broken.put_pixel(1, 1, Rgba([9, 9, 9, 255]));
        assert!(assert_rows_repeat(&broken).is_err());
    }
}
