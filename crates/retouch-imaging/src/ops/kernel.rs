// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Neighbourhood filters over RGB images, built on `imageproc::filter`.
// Borders pad by continuity (edge pixels repeat) and every result saturates
// to [0, 255].

use image::{Rgb, RgbImage};
use imageproc::definitions::Image;
use imageproc::filter::{filter3x3, separable_filter_equal};
use imageproc::map::map_colors;

/// Row-major 3x3 sharpening kernel with `9 + intensity` at the centre.
pub fn sharpen_kernel(intensity: u8) -> [i32; 9] {
    let centre = 9 + i32::from(intensity);
    [-1, -1, -1, -1, centre, -1, -1, -1, -1]
}

/// Correlate every channel with the sharpening kernel. Sums are exact in
/// `i32` and saturate on the way back to `u8`.
pub fn sharpen(image: &RgbImage, intensity: u8) -> RgbImage {
    filter3x3::<_, i32, u8>(image, &sharpen_kernel(intensity))
}

/// Standard deviation used when only the kernel size is given.
pub fn sigma_for_size(size: usize) -> f32 {
    0.3 * ((size as f32 - 1.0) * 0.5 - 1.0) + 0.8
}

/// Normalised 1-D Gaussian weights for an odd `size`.
///
/// Sizes 3, 5 and 7 use the fixed binomial tables; wider kernels sample the
/// Gaussian at [`sigma_for_size`].
pub fn gaussian_kernel(size: usize) -> Vec<f32> {
    let binomial: &[f32] = match size {
        3 => &[1.0, 2.0, 1.0],
        5 => &[1.0, 4.0, 6.0, 4.0, 1.0],
        7 => &[1.0, 6.0, 15.0, 20.0, 15.0, 6.0, 1.0],
        _ => &[],
    };
    let weights: Vec<f32> = if binomial.is_empty() {
        let sigma = sigma_for_size(size);
        let centre = (size as f32 - 1.0) / 2.0;
        (0..size)
            .map(|i| {
                let d = i as f32 - centre;
                (-(d * d) / (2.0 * sigma * sigma)).exp()
            })
            .collect()
    } else {
        binomial.to_vec()
    };
    let total: f32 = weights.iter().sum();
    weights.into_iter().map(|w| w / total).collect()
}

/// Blur with a `size` x `size` Gaussian. `size` must be odd.
///
/// Both passes run on an `f32` copy so the result is rounded once at the end
/// rather than truncated after each pass.
pub fn gaussian_blur(image: &RgbImage, size: usize) -> RgbImage {
    let weights = gaussian_kernel(size);
    let float: Image<Rgb<f32>> = map_colors(image, |Rgb(c)| Rgb(c.map(f32::from)));
    let blurred = separable_filter_equal(&float, weights.as_slice());
    map_colors(&blurred, |Rgb(c)| Rgb(c.map(|v| v.round().clamp(0.0, 255.0) as u8)))
}
