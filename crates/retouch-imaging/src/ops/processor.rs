// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image processor — negative, grayscale, resize, threshold, sharpen,
// smoothing, and contrast on in-memory RGB images, plus the grayscale
// histogram. Uses the `image` and `imageproc` crates.

use image::imageops::{self, FilterType};
use image::{GrayImage, Luma, Rgb, RgbImage};
use imageproc::map::map_colors;
use retouch_core::error::RetouchError;
use retouch_core::types::{Download, OutputFormat};
use tracing::{debug, info, instrument};

use super::{codec, kernel};

// Fixed-point BT.601 luma weights; they sum to 1 << LUMA_SHIFT so a gray
// pixel maps back to itself.
const LUMA_SHIFT: u32 = 14;
const LUMA_R: u32 = 4899;
const LUMA_G: u32 = 9617;
const LUMA_B: u32 = 1868;

/// Image processing pipeline operating on a single in-memory RGB image.
///
/// All operations are non-destructive: each method consumes `self` and returns a
/// new `ImageProcessor` wrapping the transformed image, enabling method chaining.
/// Grayscale-producing operations expand their result back to three channels.
///
/// ```ignore
/// let bytes = ImageProcessor::from_bytes(&upload)?
///     .grayscale()
///     .sharpen(1)
///     .resize_exact(300, 300)
///     .to_png_bytes()?;
/// ```
pub struct ImageProcessor {
    /// The current working image.
    image: RgbImage,
}

impl ImageProcessor {
    // -- Construction ---------------------------------------------------------

    /// Create a processor from raw encoded bytes (JPEG, PNG, etc.).
    #[instrument(skip(data), fields(data_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self, RetouchError> {
        let image = codec::decode_rgb(data)?;
        info!(
            width = image.width(),
            height = image.height(),
            "Image loaded"
        );
        Ok(Self { image })
    }

    /// Wrap an already-decoded RGB image.
    pub fn from_rgb(image: RgbImage) -> Self {
        Self { image }
    }

    // -- Accessors ------------------------------------------------------------

    /// Current image width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Current image height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Borrow the underlying RGB image.
    pub fn as_rgb(&self) -> &RgbImage {
        &self.image
    }

    /// Consume the processor and return the underlying RGB image.
    pub fn into_rgb(self) -> RgbImage {
        self.image
    }

    // -- Transformations (consume self, return new Self) -----------------------

    /// Invert every channel (`v -> 255 - v`).
    #[instrument(skip(self))]
    pub fn negative(self) -> Self {
        info!("Inverting image");
        let mut image = self.image;
        imageops::invert(&mut image);
        Self { image }
    }

    /// Convert to BT.601 luma and replicate it to all three channels.
    #[instrument(skip(self))]
    pub fn grayscale(self) -> Self {
        info!("Converting to grayscale");
        Self {
            image: expand_gray(&to_gray(&self.image)),
        }
    }

    /// Resize the image to exactly `width` x `height`, ignoring aspect ratio.
    /// Uses bilinear (triangle) filtering.
    #[instrument(skip(self))]
    pub fn resize_exact(self, width: u32, height: u32) -> Self {
        info!(
            from_w = self.image.width(),
            from_h = self.image.height(),
            width,
            height,
            "Resizing image"
        );
        let resized = imageops::resize(&self.image, width, height, FilterType::Triangle);
        Self { image: resized }
    }

    /// Binary threshold on luma: values above `threshold` become white,
    /// everything else black. The result is replicated to three channels.
    #[instrument(skip(self))]
    pub fn threshold(self, threshold: u8) -> Self {
        info!(threshold, "Applying binary threshold");
        let gray = to_gray(&self.image);
        let binary: GrayImage = map_colors(&gray, |Luma([v])| {
            Luma([if v > threshold { 255u8 } else { 0u8 }])
        });
        Self {
            image: expand_gray(&binary),
        }
    }

    /// Sharpen with the kernel `[[-1,-1,-1],[-1,9+k,-1],[-1,-1,-1]]`.
    ///
    /// The kernel sums to `1 + k`, so `k = 0` is a pure edge boost and higher
    /// intensities also brighten. Output saturates at 0 and 255.
    #[instrument(skip(self))]
    pub fn sharpen(self, intensity: u8) -> Self {
        info!(intensity, "Sharpening image");
        Self {
            image: kernel::sharpen(&self.image, intensity),
        }
    }

    /// Gaussian blur with a `2 * intensity + 1` square kernel (see
    /// [`kernel::gaussian_kernel`] for the weights).
    #[instrument(skip(self))]
    pub fn smooth(self, intensity: u8) -> Self {
        let size = 2 * usize::from(intensity) + 1;
        info!(intensity, size, "Smoothing image");
        if size == 1 {
            return self;
        }
        Self {
            image: kernel::gaussian_blur(&self.image, size),
        }
    }

    /// Scale every channel by `alpha`, rounding halves away from zero and
    /// saturating (`v -> clamp(round(alpha * v), 0, 255)`). An `alpha` of 1.0
    /// is a no-op.
    #[instrument(skip(self))]
    pub fn adjust_contrast(self, alpha: f32) -> Self {
        info!(alpha, "Adjusting contrast");
        let scale = |channel: u8| -> u8 {
            (alpha * f32::from(channel)).round().clamp(0.0, 255.0) as u8
        };
        let contrasted: RgbImage =
            map_colors(&self.image, |Rgb([r, g, b])| Rgb([scale(r), scale(g), scale(b)]));
        Self { image: contrasted }
    }

    // -- Queries --------------------------------------------------------------

    /// 256-bin count of luma values. Does not change the image.
    pub fn histogram(&self) -> [u32; 256] {
        histogram(&self.image)
    }

    // -- Output ---------------------------------------------------------------

    /// Encode the current image as PNG bytes.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>, RetouchError> {
        codec::encode_png(&self.image)
    }

    /// Encode for download with the fixed filename and MIME type of `format`.
    pub fn to_download(
        &self,
        format: OutputFormat,
        jpeg_quality: u8,
    ) -> Result<Download, RetouchError> {
        codec::encode_download(&self.image, format, jpeg_quality)
    }
}

/// Luma of one RGB pixel with BT.601 weights, rounded to nearest.
pub fn luma(Rgb([r, g, b]): Rgb<u8>) -> u8 {
    let weighted = LUMA_R * u32::from(r) + LUMA_G * u32::from(g) + LUMA_B * u32::from(b);
    ((weighted + (1 << (LUMA_SHIFT - 1))) >> LUMA_SHIFT) as u8
}

/// Single-channel luma image.
pub fn to_gray(image: &RgbImage) -> GrayImage {
    map_colors(image, |pixel| Luma([luma(pixel)]))
}

/// Replicate a single channel into R, G and B.
pub fn expand_gray(gray: &GrayImage) -> RgbImage {
    map_colors(gray, |Luma([v])| Rgb([v, v, v]))
}

/// Count luma values into 256 bins. The counts sum to `width * height`.
pub fn histogram(image: &RgbImage) -> [u32; 256] {
    let gray = to_gray(image);
    let bins = imageproc::stats::histogram(&gray).channels[0];
    debug!(
        pixels = bins.iter().map(|&c| u64::from(c)).sum::<u64>(),
        "Histogram computed"
    );
    bins
}
