// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for Retouch edit sessions.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::config::ToolkitConfig;

/// Opaque token identifying an uploaded source file.
///
/// A session only compares tokens for equality: a different token means a
/// new upload and resets the session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceId(pub String);

impl SourceId {
    /// Content identity: lowercase hex SHA-256 of the uploaded bytes, so
    /// re-sending the same file keeps the session.
    pub fn fingerprint(data: &[u8]) -> Self {
        Self(hex::encode(Sha256::digest(data)))
    }

    /// Per-upload identity: a fresh token every time, even for identical bytes.
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl std::fmt::Display for SourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The fixed catalogue of operations a session understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Negative,
    Grayscale,
    Resize,
    Reset,
    Threshold,
    Sharpen,
    Smoothing,
    Contrast,
    /// Read-only: never changes the session.
    Histogram,
}

impl OperationKind {
    /// All kinds in toolbar order.
    pub const ALL: [OperationKind; 9] = [
        OperationKind::Negative,
        OperationKind::Grayscale,
        OperationKind::Resize,
        OperationKind::Reset,
        OperationKind::Threshold,
        OperationKind::Sharpen,
        OperationKind::Smoothing,
        OperationKind::Contrast,
        OperationKind::Histogram,
    ];

    /// Button label.
    pub fn label(self) -> &'static str {
        match self {
            OperationKind::Negative => "Convert to Negative",
            OperationKind::Grayscale => "Convert to Grayscale",
            OperationKind::Resize => "Resize to 300x300",
            OperationKind::Reset => "Reset Image",
            OperationKind::Threshold => "Apply Threshold",
            OperationKind::Sharpen => "Apply Sharpen",
            OperationKind::Smoothing => "Apply Smoothing",
            OperationKind::Contrast => "Apply Contrast",
            OperationKind::Histogram => "Show Histogram",
        }
    }

    /// Whether applying this kind replaces the current image.
    pub fn is_mutating(self) -> bool {
        !matches!(self, OperationKind::Histogram)
    }
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            OperationKind::Negative => "negative",
            OperationKind::Grayscale => "grayscale",
            OperationKind::Resize => "resize",
            OperationKind::Reset => "reset",
            OperationKind::Threshold => "threshold",
            OperationKind::Sharpen => "sharpen",
            OperationKind::Smoothing => "smoothing",
            OperationKind::Contrast => "contrast",
            OperationKind::Histogram => "histogram",
        };
        write!(f, "{name}")
    }
}

/// One operation invocation together with the slider value it was triggered with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    Negative,
    Grayscale,
    Resize,
    Reset,
    Threshold { threshold: u8 },
    Sharpen { intensity: u8 },
    Smoothing { intensity: u8 },
    Contrast { alpha: f32 },
    Histogram,
}

impl Operation {
    pub fn kind(&self) -> OperationKind {
        match self {
            Operation::Negative => OperationKind::Negative,
            Operation::Grayscale => OperationKind::Grayscale,
            Operation::Resize => OperationKind::Resize,
            Operation::Reset => OperationKind::Reset,
            Operation::Threshold { .. } => OperationKind::Threshold,
            Operation::Sharpen { .. } => OperationKind::Sharpen,
            Operation::Smoothing { .. } => OperationKind::Smoothing,
            Operation::Contrast { .. } => OperationKind::Contrast,
            Operation::Histogram => OperationKind::Histogram,
        }
    }

    /// The operation as triggered with every slider at its default position.
    pub fn with_defaults(kind: OperationKind, config: &ToolkitConfig) -> Self {
        match kind {
            OperationKind::Negative => Operation::Negative,
            OperationKind::Grayscale => Operation::Grayscale,
            OperationKind::Resize => Operation::Resize,
            OperationKind::Reset => Operation::Reset,
            OperationKind::Threshold => Operation::Threshold {
                threshold: config.threshold.default,
            },
            OperationKind::Sharpen => Operation::Sharpen {
                intensity: config.sharpen.default,
            },
            OperationKind::Smoothing => Operation::Smoothing {
                intensity: config.smoothing.default,
            },
            OperationKind::Contrast => Operation::Contrast {
                alpha: config.contrast.default,
            },
            OperationKind::Histogram => Operation::Histogram,
        }
    }

    /// Pull the parameter into its slider range. Out-of-range values are
    /// clamped to the nearest bound, never rejected.
    pub fn clamped(self, config: &ToolkitConfig) -> Self {
        match self {
            Operation::Threshold { threshold } => Operation::Threshold {
                threshold: config.threshold.clamp(threshold),
            },
            Operation::Sharpen { intensity } => Operation::Sharpen {
                intensity: config.sharpen.clamp(intensity),
            },
            Operation::Smoothing { intensity } => Operation::Smoothing {
                intensity: config.smoothing.clamp(intensity),
            },
            Operation::Contrast { alpha } => Operation::Contrast {
                alpha: config.contrast.clamp(alpha),
            },
            other => other,
        }
    }
}

/// Encoding used for the download buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Lossless; pixel values round-trip exactly.
    Png,
    Jpeg,
}

impl OutputFormat {
    /// Fixed filename offered to the browser.
    pub fn file_name(self) -> &'static str {
        match self {
            OutputFormat::Png => "processed_image.png",
            OutputFormat::Jpeg => "enhanced_image.jpg",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            OutputFormat::Png => "image/png",
            OutputFormat::Jpeg => "image/jpeg",
        }
    }
}

/// An encoded image ready to hand to a download button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub file_name: &'static str,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}
