// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Event scripts — the recorded button presses and slider values that the
// headless driver replays against a session.

use std::path::{Path, PathBuf};

use retouch_core::error::Result;
use retouch_core::types::{Operation, OperationKind, OutputFormat};
use serde::Deserialize;

/// How the driver tells one upload from the next.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentityMode {
    /// Identical bytes are the same upload (SHA-256 of the file).
    #[default]
    Content,
    /// Every upload event is new, even for the same file.
    PerUpload,
}

/// A whole session recording.
#[derive(Debug, Clone, Deserialize)]
pub struct Script {
    /// Optional settings file; defaults apply when absent.
    #[serde(default)]
    pub config: Option<PathBuf>,
    /// The first uploaded image.
    pub upload: PathBuf,
    #[serde(default)]
    pub identity: IdentityMode,
    /// Where download events write their file.
    #[serde(default = "default_download_dir")]
    pub download_dir: PathBuf,
    #[serde(default)]
    pub events: Vec<Event>,
}

fn default_download_dir() -> PathBuf {
    PathBuf::from(".")
}

/// One user interaction. Slider values are optional and fall back to the
/// slider default; out-of-range values are clamped later.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Event {
    Negative,
    Grayscale,
    Resize,
    Reset,
    Threshold {
        #[serde(default)]
        value: Option<f64>,
    },
    Sharpen {
        #[serde(default)]
        value: Option<f64>,
    },
    Smoothing {
        #[serde(default)]
        value: Option<f64>,
    },
    Contrast {
        #[serde(default)]
        value: Option<f64>,
    },
    Histogram,
    Upload {
        path: PathBuf,
    },
    Download {
        #[serde(default)]
        format: Option<OutputFormat>,
    },
}

impl Event {
    /// The session operation this event triggers, if it is one.
    ///
    /// `defaults` supplies the slider positions for events without a value.
    pub fn operation(&self, defaults: &retouch_core::ToolkitConfig) -> Option<Operation> {
        let (kind, value) = match self {
            Event::Negative => (OperationKind::Negative, None),
            Event::Grayscale => (OperationKind::Grayscale, None),
            Event::Resize => (OperationKind::Resize, None),
            Event::Reset => (OperationKind::Reset, None),
            Event::Threshold { value } => (OperationKind::Threshold, *value),
            Event::Sharpen { value } => (OperationKind::Sharpen, *value),
            Event::Smoothing { value } => (OperationKind::Smoothing, *value),
            Event::Contrast { value } => (OperationKind::Contrast, *value),
            Event::Histogram => (OperationKind::Histogram, None),
            Event::Upload { .. } | Event::Download { .. } => return None,
        };
        let op = match (Operation::with_defaults(kind, defaults), value) {
            (Operation::Threshold { .. }, Some(v)) => Operation::Threshold {
                threshold: slider_u8(v),
            },
            (Operation::Sharpen { .. }, Some(v)) => Operation::Sharpen {
                intensity: slider_u8(v),
            },
            (Operation::Smoothing { .. }, Some(v)) => Operation::Smoothing {
                intensity: slider_u8(v),
            },
            (Operation::Contrast { .. }, Some(v)) => Operation::Contrast { alpha: v as f32 },
            (op, _) => op,
        };
        Some(op)
    }
}

/// Integer slider reading, saturated to the `u8` range.
fn slider_u8(value: f64) -> u8 {
    if value.is_nan() {
        0
    } else {
        value.round().clamp(0.0, 255.0) as u8
    }
}

impl Script {
    /// Read a script from a JSON file. Relative paths inside it are resolved
    /// against the script's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let mut script: Script = serde_json::from_str(&data)?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        script.resolve(base);
        Ok(script)
    }

    fn resolve(&mut self, base: &Path) {
        let join = |p: &Path| {
            if p.is_relative() {
                base.join(p)
            } else {
                p.to_path_buf()
            }
        };
        self.config = self.config.as_deref().map(join);
        self.upload = join(&self.upload);
        self.download_dir = join(&self.download_dir);
        for event in &mut self.events {
            if let Event::Upload { path } = event {
                *path = join(path);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use retouch_core::ToolkitConfig;

    #[test]
    fn parses_events_with_and_without_values() {
        let script: Script = serde_json::from_str(
            r#"{
                "upload": "photo.png",
                "events": [
                    { "op": "negative" },
                    { "op": "threshold", "value": 90 },
                    { "op": "sharpen" },
                    { "op": "contrast", "value": 1.5 },
                    { "op": "download", "format": "jpeg" }
                ]
            }"#,
        )
        .expect("parse");
        assert_eq!(script.identity, IdentityMode::Content);
        assert_eq!(script.download_dir, PathBuf::from("."));
        assert_eq!(script.events.len(), 5);
        assert_eq!(
            script.events[4],
            Event::Download {
                format: Some(OutputFormat::Jpeg)
            }
        );
    }

    #[test]
    fn missing_values_use_slider_defaults() {
        let defaults = ToolkitConfig::default();
        assert_eq!(
            Event::Threshold { value: None }.operation(&defaults),
            Some(Operation::Threshold { threshold: 128 })
        );
        assert_eq!(
            Event::Smoothing { value: Some(3.0) }.operation(&defaults),
            Some(Operation::Smoothing { intensity: 3 })
        );
        assert_eq!(Event::Upload { path: "x.png".into() }.operation(&defaults), None);
    }

    #[test]
    fn missing_values_follow_configured_defaults() {
        let mut defaults = ToolkitConfig::default();
        defaults.sharpen.default = 4;
        defaults.contrast.default = 1.5;
        assert_eq!(
            Event::Sharpen { value: None }.operation(&defaults),
            Some(Operation::Sharpen { intensity: 4 })
        );
        assert_eq!(
            Event::Contrast { value: None }.operation(&defaults),
            Some(Operation::Contrast { alpha: 1.5 })
        );
        assert_eq!(
            Event::Contrast { value: Some(2.0) }.operation(&defaults),
            Some(Operation::Contrast { alpha: 2.0 })
        );
        assert_eq!(Event::Reset.operation(&defaults), Some(Operation::Reset));
    }

    #[test]
    fn wild_slider_values_saturate() {
        assert_eq!(slider_u8(-4.0), 0);
        assert_eq!(slider_u8(999.0), 255);
        assert_eq!(slider_u8(7.6), 8);
        assert_eq!(slider_u8(f64::NAN), 0);
    }

    #[test]
    fn relative_paths_follow_the_script() {
        let mut script: Script = serde_json::from_str(
            r#"{
                "upload": "in/photo.png",
                "config": "/etc/retouch.json",
                "download_dir": "out",
                "events": [{ "op": "upload", "path": "next.png" }]
            }"#,
        )
        .expect("parse");
        script.resolve(Path::new("/work"));
        assert_eq!(script.upload, PathBuf::from("/work/in/photo.png"));
        assert_eq!(script.config, Some(PathBuf::from("/etc/retouch.json")));
        assert_eq!(script.download_dir, PathBuf::from("/work/out"));
        assert_eq!(
            script.events[0],
            Event::Upload {
                path: PathBuf::from("/work/next.png")
            }
        );
    }
}
