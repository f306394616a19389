// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Operation dispatch — maps each mutating `OperationKind` to the transform that
// produces the next current image.

use image::RgbImage;
use retouch_core::config::ToolkitConfig;
use retouch_core::types::{Operation, OperationKind};

use super::state::ImageSession;
use crate::ops::processor::ImageProcessor;

/// Everything a transform may read. Transforms never see the session itself,
/// so they cannot mutate it.
#[derive(Debug, Clone, Copy)]
pub struct TransformInput<'a> {
    pub current: &'a RgbImage,
    pub original: &'a RgbImage,
    pub config: &'a ToolkitConfig,
}

/// A mutating operation: builds the next current image.
pub type Transform = fn(TransformInput<'_>, Operation) -> RgbImage;

/// Dispatch table keyed by operation kind. The read-only histogram has no
/// entry.
const DISPATCH: [(OperationKind, Transform); 8] = [
    (OperationKind::Negative, negative),
    (OperationKind::Grayscale, grayscale),
    (OperationKind::Resize, resize),
    (OperationKind::Reset, reset),
    (OperationKind::Threshold, threshold),
    (OperationKind::Sharpen, sharpen),
    (OperationKind::Smoothing, smoothing),
    (OperationKind::Contrast, contrast),
];

/// Look up the transform for `kind`; `None` for read-only kinds.
pub fn dispatch(kind: OperationKind) -> Option<Transform> {
    DISPATCH
        .iter()
        .find(|(entry, _)| *entry == kind)
        .map(|(_, transform)| *transform)
}

/// Apply `operation` to `session` and return the updated session.
///
/// Parameters are clamped to the session's slider ranges first. Mutating
/// operations replace the current image wholesale; the histogram leaves the
/// session untouched.
pub fn apply(mut session: ImageSession, operation: Operation) -> ImageSession {
    session.apply_in_place(operation);
    session
}

// -- Transforms ---------------------------------------------------------------

fn processor(input: TransformInput<'_>) -> ImageProcessor {
    ImageProcessor::from_rgb(input.current.clone())
}

fn negative(input: TransformInput<'_>, _: Operation) -> RgbImage {
    processor(input).negative().into_rgb()
}

fn grayscale(input: TransformInput<'_>, _: Operation) -> RgbImage {
    processor(input).grayscale().into_rgb()
}

fn resize(input: TransformInput<'_>, _: Operation) -> RgbImage {
    let (width, height) = (input.config.resize_width, input.config.resize_height);
    processor(input).resize_exact(width, height).into_rgb()
}

fn reset(input: TransformInput<'_>, _: Operation) -> RgbImage {
    input.original.clone()
}

// The table is keyed by `operation.kind()`, so each parameterised transform
// only ever receives its own variant.

fn threshold(input: TransformInput<'_>, operation: Operation) -> RgbImage {
    let Operation::Threshold { threshold } = operation else {
        unreachable!("threshold transform dispatched for {operation:?}")
    };
    processor(input).threshold(threshold).into_rgb()
}

fn sharpen(input: TransformInput<'_>, operation: Operation) -> RgbImage {
    let Operation::Sharpen { intensity } = operation else {
        unreachable!("sharpen transform dispatched for {operation:?}")
    };
    processor(input).sharpen(intensity).into_rgb()
}

fn smoothing(input: TransformInput<'_>, operation: Operation) -> RgbImage {
    let Operation::Smoothing { intensity } = operation else {
        unreachable!("smoothing transform dispatched for {operation:?}")
    };
    processor(input).smooth(intensity).into_rgb()
}

fn contrast(input: TransformInput<'_>, operation: Operation) -> RgbImage {
    let Operation::Contrast { alpha } = operation else {
        unreachable!("contrast transform dispatched for {operation:?}")
    };
    processor(input).adjust_contrast(alpha).into_rgb()
}
