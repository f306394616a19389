// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Transform module — per-pixel maps, 3x3 convolution, Gaussian blur,
// histogram, and PNG/JPEG codecs.

pub mod codec;
pub mod kernel;
pub mod processor;

pub use processor::{ImageProcessor, histogram};
