// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Toolkit configuration — slider ranges, resize target, and download settings.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::Result;
use crate::types::OutputFormat;

/// Bounds and starting value of a single adjustment slider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SliderRange<T> {
    pub min: T,
    pub max: T,
    pub default: T,
}

impl<T: PartialOrd + Copy> SliderRange<T> {
    pub const fn new(min: T, max: T, default: T) -> Self {
        Self { min, max, default }
    }

    /// Pull `value` into `[min, max]`. Values that do not compare (NaN) fall
    /// back to the slider default.
    pub fn clamp(&self, value: T) -> T {
        if self.contains(value) {
            value
        } else if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            self.default
        }
    }

    /// Whether `value` already lies inside the slider bounds.
    pub fn contains(&self, value: T) -> bool {
        value >= self.min && value <= self.max
    }

    /// Swap inverted bounds and pull an out-of-range default back inside.
    fn repaired(self) -> Self {
        let (min, max) = if self.min > self.max {
            (self.max, self.min)
        } else {
            (self.min, self.max)
        };
        let fixed = Self {
            min,
            max,
            default: self.default,
        };
        Self {
            default: fixed.clamp(self.default),
            ..fixed
        }
    }
}

/// Persistent toolkit settings.
///
/// Loaded from a JSON file; every field has a default so a partial file is
/// fine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolkitConfig {
    /// Binary threshold limit.
    pub threshold: SliderRange<u8>,
    /// Sharpening intensity added to the kernel centre.
    pub sharpen: SliderRange<u8>,
    /// Smoothing intensity; the blur kernel is `2 * intensity + 1` wide.
    pub smoothing: SliderRange<u8>,
    /// Contrast gain.
    pub contrast: SliderRange<f32>,
    /// Width produced by the fixed resize operation.
    pub resize_width: u32,
    /// Height produced by the fixed resize operation.
    pub resize_height: u32,
    /// Encoding used for downloads.
    pub output_format: OutputFormat,
    /// JPEG quality (1-100) when `output_format` is JPEG.
    pub jpeg_quality: u8,
    /// Optional sidebar profile picture.
    pub profile_image: Option<PathBuf>,
}

impl Default for ToolkitConfig {
    fn default() -> Self {
        Self {
            threshold: SliderRange::new(0, 255, 128),
            sharpen: SliderRange::new(0, 10, 1),
            smoothing: SliderRange::new(1, 15, 1),
            contrast: SliderRange::new(0.5, 2.5, 1.0),
            resize_width: 300,
            resize_height: 300,
            output_format: OutputFormat::Png,
            jpeg_quality: 95,
            profile_image: None,
        }
    }
}

impl ToolkitConfig {
    /// Load settings from a JSON file.
    ///
    /// A missing file yields the defaults; an unreadable or malformed file is
    /// an error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            info!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&data)?;
        info!(path = %path.display(), "settings loaded");
        Ok(config.validated())
    }

    /// Write settings as pretty JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        Ok(())
    }

    /// Repair inconsistent values instead of rejecting them.
    pub fn validated(mut self) -> Self {
        let before = self.clone();
        self.threshold = self.threshold.repaired();
        self.sharpen = self.sharpen.repaired();
        // A zero-width blur would be a no-op; keep the smallest real kernel.
        self.smoothing = SliderRange {
            min: self.smoothing.min.max(1),
            ..self.smoothing
        }
        .repaired();
        if !self.contrast.min.is_finite() || !self.contrast.max.is_finite() {
            self.contrast = Self::default().contrast;
        }
        self.contrast = SliderRange {
            min: self.contrast.min.max(0.0),
            ..self.contrast
        }
        .repaired();
        self.resize_width = self.resize_width.max(1);
        self.resize_height = self.resize_height.max(1);
        self.jpeg_quality = self.jpeg_quality.clamp(1, 100);
        if self != before {
            warn!("settings contained out-of-range values; repaired");
        }
        self
    }
}
