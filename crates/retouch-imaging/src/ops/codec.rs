// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Upload decoding and download encoding.

use image::{DynamicImage, ImageFormat, RgbImage};
use retouch_core::error::RetouchError;
use retouch_core::types::{Download, OutputFormat};
use tracing::{debug, instrument};

/// Decode uploaded bytes (JPEG, PNG, ...) into an RGB image.
///
/// Alpha is dropped and grayscale sources are expanded so every session image
/// has three channels.
#[instrument(skip(data), fields(data_len = data.len()))]
pub fn decode_rgb(data: &[u8]) -> Result<RgbImage, RetouchError> {
    let img = image::load_from_memory(data)
        .map_err(|err| RetouchError::Decode(err.to_string()))?;
    debug!(
        width = img.width(),
        height = img.height(),
        color = ?img.color(),
        "Upload decoded"
    );
    Ok(img.to_rgb8())
}

/// Encode an RGB image as PNG bytes.
pub fn encode_png(image: &RgbImage) -> Result<Vec<u8>, RetouchError> {
    let mut buffer = Vec::new();
    let mut cursor = std::io::Cursor::new(&mut buffer);
    DynamicImage::ImageRgb8(image.clone())
        .write_to(&mut cursor, ImageFormat::Png)
        .map_err(|err| RetouchError::Encode(format!("PNG encoding failed: {}", err)))?;
    Ok(buffer)
}

/// Encode an RGB image as JPEG bytes with the given quality (1-100).
pub fn encode_jpeg(image: &RgbImage, quality: u8) -> Result<Vec<u8>, RetouchError> {
    let mut buffer = Vec::new();
    let encoder =
        image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buffer, quality.clamp(1, 100));
    image
        .write_with_encoder(encoder)
        .map_err(|err| RetouchError::Encode(format!("JPEG encoding failed: {}", err)))?;
    Ok(buffer)
}

/// Encode `image` in `format` and attach the fixed download name and MIME type.
#[instrument(skip(image), fields(width = image.width(), height = image.height()))]
pub fn encode_download(
    image: &RgbImage,
    format: OutputFormat,
    jpeg_quality: u8,
) -> Result<Download, RetouchError> {
    let bytes = match format {
        OutputFormat::Png => encode_png(image)?,
        OutputFormat::Jpeg => encode_jpeg(image, jpeg_quality)?,
    };
    debug!(bytes = bytes.len(), ?format, "Download encoded");
    Ok(Download {
        file_name: format.file_name(),
        mime_type: format.mime_type(),
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb, Rgba, RgbaImage};

    fn gradient() -> RgbImage {
        RgbImage::from_fn(8, 6, |x, y| Rgb([(x * 30) as u8, (y * 40) as u8, 200]))
    }

    #[test]
    fn png_download_is_lossless() {
        let image = gradient();
        let download = encode_download(&image, OutputFormat::Png, 95).expect("encode");
        assert_eq!(download.file_name, "processed_image.png");
        assert_eq!(download.mime_type, "image/png");
        assert_eq!(decode_rgb(&download.bytes).expect("decode"), image);
    }

    #[test]
    fn jpeg_download_keeps_dimensions() {
        let image = gradient();
        let download = encode_download(&image, OutputFormat::Jpeg, 90).expect("encode");
        assert_eq!(download.file_name, "enhanced_image.jpg");
        assert_eq!(download.mime_type, "image/jpeg");
        let decoded = decode_rgb(&download.bytes).expect("decode");
        assert_eq!(decoded.dimensions(), (8, 6));
    }

    #[test]
    fn decode_drops_alpha() {
        let rgba = RgbaImage::from_pixel(3, 2, Rgba([10, 20, 30, 0]));
        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(rgba)
            .write_to(&mut std::io::Cursor::new(&mut bytes), ImageFormat::Png)
            .expect("encode");
        let decoded = decode_rgb(&bytes).expect("decode");
        assert_eq!(*decoded.get_pixel(2, 1), Rgb([10, 20, 30]));
    }

    #[test]
    fn decode_expands_grayscale_to_rgb() {
        let gray = GrayImage::from_pixel(2, 2, Luma([77]));
        let mut bytes = Vec::new();
        DynamicImage::ImageLuma8(gray)
            .write_to(&mut std::io::Cursor::new(&mut bytes), ImageFormat::Png)
            .expect("encode");
        let decoded = decode_rgb(&bytes).expect("decode");
        assert_eq!(*decoded.get_pixel(0, 0), Rgb([77, 77, 77]));
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        let result = decode_rgb(b"definitely not an image");
        assert!(matches!(result, Err(RetouchError::Decode(_))));
    }
}
