//! PNG encoding and decoding.

use inkpad_core::surface::{SurfaceError, SurfaceResult};

/// Encode unpremultiplied RGBA8 pixels as PNG.
pub fn encode_rgba_png(rgba: &[u8], width: u32, height: u32) -> SurfaceResult<Vec<u8>> {
    let expected = width as usize * height as usize * 4;
    if rgba.len() != expected {
        return Err(SurfaceError::Encode(format!(
            "expected {} bytes for {}x{}, got {}",
            expected,
            width,
            height,
            rgba.len()
        )));
    }

    let mut png_data = Vec::new();
    {
        let mut encoder = ::png::Encoder::new(&mut png_data, width, height);
        encoder.set_color(::png::ColorType::Rgba);
        encoder.set_depth(::png::BitDepth::Eight);
        let mut writer = encoder
            .write_header()
            .map_err(|e| SurfaceError::Encode(e.to_string()))?;
        writer
            .write_image_data(rgba)
            .map_err(|e| SurfaceError::Encode(e.to_string()))?;
        writer.finish().map_err(|e| SurfaceError::Encode(e.to_string()))?;
    }
    Ok(png_data)
}

/// Decode a PNG thumbnail, e.g. for a gallery listing.
pub fn decode_png(bytes: &[u8]) -> SurfaceResult<image::RgbaImage> {
    let decoded = image::load_from_memory_with_format(bytes, image::ImageFormat::Png)
        .map_err(|e| SurfaceError::Encode(format!("Failed to decode PNG: {}", e)))?;
    Ok(decoded.to_rgba8())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_decode() {
        let pixels = [
            255, 0, 0, 255, //
            0, 255, 0, 128, //
            0, 0, 255, 0, //
            10, 20, 30, 40,
        ];
        let png = encode_rgba_png(&pixels, 2, 2).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");

        let image = decode_png(&png).unwrap();
        assert_eq!(image.dimensions(), (2, 2));
        assert_eq!(image.as_raw().as_slice(), &pixels);
    }

    #[test]
    fn test_encode_rejects_wrong_length() {
        assert!(matches!(encode_rgba_png(&[0; 3], 1, 1), Err(SurfaceError::Encode(_))));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode_png(b"not a png").is_err());
    }
}
