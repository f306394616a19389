// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// retouch-imaging — Pixel transforms and edit sessions for Retouch.
//
// Provides the transform catalogue (negative, grayscale, resize, threshold,
// sharpen, smoothing, contrast), the read-only histogram query, PNG/JPEG
// codecs, and the `ImageSession` state machine that applies them.

pub mod ops;
pub mod session;

// Re-export the primary structs so callers can use `retouch_imaging::ImageSession` etc.
pub use ops::processor::ImageProcessor;
pub use session::dispatch::{Transform, TransformInput, apply, dispatch};
pub use session::state::ImageSession;
