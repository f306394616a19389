// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Headless driver — replays a script of uploads, button presses and downloads
// against one `ImageSession`, one event at a time.

use std::path::{Path, PathBuf};

use retouch_core::error::Result;
use retouch_core::human_errors::humanize_error;
use retouch_core::types::{Download, SourceId};
use retouch_core::ToolkitConfig;
use retouch_imaging::ImageSession;
use tracing::{error, info, instrument, warn};

use crate::profile;
use crate::script::{Event, IdentityMode, Script};

/// What happened during a replay.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    /// Events that reached the session (operations and uploads).
    pub events: usize,
    /// Uploads that replaced the session images.
    pub resets: usize,
    /// Files written by download events.
    pub downloads: Vec<PathBuf>,
    /// Events that failed and were skipped.
    pub failures: usize,
    /// Final size of the current image.
    pub final_size: (u32, u32),
}

/// Load `script_path` and replay it.
///
/// Only a failure before the session exists (unreadable script or settings,
/// undecodable first upload) is returned as an error; later failures are
/// logged and skipped.
#[instrument(skip_all, fields(script = %script_path.display()))]
pub fn run(script_path: &Path) -> Result<Summary> {
    let script = Script::load(script_path)?;
    let config = match &script.config {
        Some(path) => ToolkitConfig::load(path)?,
        None => ToolkitConfig::default(),
    };
    replay(&script, config)
}

/// Replay an already-loaded script with the given settings.
pub fn replay(script: &Script, config: ToolkitConfig) -> Result<Summary> {
    let _profile = profile::load_profile(config.profile_image.as_deref());

    let bytes = std::fs::read(&script.upload)?;
    let identity = identify(script.identity, &bytes);
    let mut session = ImageSession::open_with_config(&bytes, identity, config)?;
    info!(upload = %script.upload.display(), "session ready");

    let mut summary = Summary::default();
    for (index, event) in script.events.iter().enumerate() {
        match handle(&mut session, event, script) {
            Ok(outcome) => {
                summary.events += 1;
                match outcome {
                    Outcome::Reset => summary.resets += 1,
                    Outcome::Downloaded(path) => summary.downloads.push(path),
                    Outcome::Applied => {}
                }
            }
            Err(err) => {
                let human = humanize_error(&err);
                error!(index, ?event, error = %err, suggestion = %human.suggestion, "{}", human.message);
                summary.failures += 1;
            }
        }
    }

    summary.final_size = session.current().dimensions();
    info!(
        events = summary.events,
        failures = summary.failures,
        downloads = summary.downloads.len(),
        "replay finished"
    );
    Ok(summary)
}

enum Outcome {
    Applied,
    Reset,
    Downloaded(PathBuf),
}

fn handle(session: &mut ImageSession, event: &Event, script: &Script) -> Result<Outcome> {
    if let Some(operation) = event.operation(session.config()) {
        let kind = operation.kind();
        info!(button = kind.label(), ?operation, "button pressed");
        if kind.is_mutating() {
            session.apply_in_place(operation);
        } else {
            log_histogram(&session.histogram());
        }
        return Ok(Outcome::Applied);
    }

    match event {
        Event::Upload { path } => {
            let bytes = std::fs::read(path)?;
            let identity = identify(script.identity, &bytes);
            if session.upload(&bytes, identity)? {
                Ok(Outcome::Reset)
            } else {
                Ok(Outcome::Applied)
            }
        }
        Event::Download { format } => {
            let download = match format {
                Some(format) => session.download_as(*format)?,
                None => session.download()?,
            };
            let path = write_download(&script.download_dir, &download)?;
            Ok(Outcome::Downloaded(path))
        }
        _ => Ok(Outcome::Applied),
    }
}

fn identify(mode: IdentityMode, bytes: &[u8]) -> SourceId {
    match mode {
        IdentityMode::Content => SourceId::fingerprint(bytes),
        IdentityMode::PerUpload => SourceId::random(),
    }
}

fn write_download(dir: &Path, download: &Download) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(download.file_name);
    std::fs::write(&path, &download.bytes)?;
    info!(
        path = %path.display(),
        mime = download.mime_type,
        bytes = download.bytes.len(),
        "download written"
    );
    Ok(path)
}

/// Summarise the histogram in the log instead of plotting it.
fn log_histogram(bins: &[u32; 256]) {
    let total: u64 = bins.iter().map(|&c| u64::from(c)).sum();
    if total == 0 {
        warn!("histogram of an empty image");
        return;
    }
    let weighted: u64 = bins
        .iter()
        .enumerate()
        .map(|(value, &count)| value as u64 * u64::from(count))
        .sum();
    let peak = bins
        .iter()
        .enumerate()
        .max_by_key(|&(_, &count)| count)
        .map(|(value, _)| value)
        .unwrap_or(0);
    let darkest = bins.iter().position(|&c| c > 0).unwrap_or(0);
    let brightest = bins.iter().rposition(|&c| c > 0).unwrap_or(255);
    info!(
        pixels = total,
        mean = weighted as f64 / total as f64,
        peak,
        darkest,
        brightest,
        "histogram"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use retouch_core::error::RetouchError;
    use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

    fn write_png(path: &Path, image: RgbImage) {
        DynamicImage::ImageRgb8(image)
            .save_with_format(path, ImageFormat::Png)
            .expect("write png");
    }

    fn write_script(dir: &Path, json: &str) -> PathBuf {
        let path = dir.join("script.json");
        std::fs::write(&path, json).expect("write script");
        path
    }

    #[test]
    fn replays_operations_and_writes_download() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_png(
            &dir.path().join("gray.png"),
            RgbImage::from_pixel(4, 4, Rgb([128, 128, 128])),
        );
        let script = write_script(
            dir.path(),
            r#"{
                "upload": "gray.png",
                "download_dir": "out",
                "events": [
                    { "op": "negative" },
                    { "op": "histogram" },
                    { "op": "resize" },
                    { "op": "download" }
                ]
            }"#,
        );

        let summary = run(&script).expect("run");
        assert_eq!(summary.events, 4);
        assert_eq!(summary.failures, 0);
        assert_eq!(summary.final_size, (300, 300));
        assert_eq!(summary.downloads, vec![dir.path().join("out/processed_image.png")]);

        let written = image::open(&summary.downloads[0]).expect("open").to_rgb8();
        assert_eq!(written.dimensions(), (300, 300));
        assert_eq!(*written.get_pixel(150, 150), Rgb([127, 127, 127]));
    }

    #[test]
    fn reupload_of_same_file_keeps_edits_in_content_mode() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_png(&dir.path().join("a.png"), RgbImage::from_pixel(2, 2, Rgb([10, 10, 10])));
        let script = write_script(
            dir.path(),
            r#"{
                "upload": "a.png",
                "events": [
                    { "op": "negative" },
                    { "op": "upload", "path": "a.png" },
                    { "op": "download" }
                ]
            }"#,
        );

        let summary = run(&script).expect("run");
        assert_eq!(summary.resets, 0);
        let written = image::open(&summary.downloads[0]).expect("open").to_rgb8();
        assert_eq!(*written.get_pixel(0, 0), Rgb([245, 245, 245]));
    }

    #[test]
    fn per_upload_identity_resets_on_every_upload() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_png(&dir.path().join("a.png"), RgbImage::from_pixel(2, 2, Rgb([10, 10, 10])));
        let script = write_script(
            dir.path(),
            r#"{
                "upload": "a.png",
                "identity": "per_upload",
                "events": [
                    { "op": "negative" },
                    { "op": "upload", "path": "a.png" },
                    { "op": "download" }
                ]
            }"#,
        );

        let summary = run(&script).expect("run");
        assert_eq!(summary.resets, 1);
        let written = image::open(&summary.downloads[0]).expect("open").to_rgb8();
        assert_eq!(*written.get_pixel(0, 0), Rgb([10, 10, 10]));
    }

    #[test]
    fn bad_later_upload_is_skipped_not_fatal() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_png(&dir.path().join("a.png"), RgbImage::from_pixel(3, 3, Rgb([1, 2, 3])));
        std::fs::write(dir.path().join("broken.png"), b"not a png").expect("write");
        let script = write_script(
            dir.path(),
            r#"{
                "upload": "a.png",
                "events": [
                    { "op": "upload", "path": "broken.png" },
                    { "op": "grayscale" }
                ]
            }"#,
        );

        let summary = run(&script).expect("run");
        assert_eq!(summary.failures, 1);
        assert_eq!(summary.events, 1);
        assert_eq!(summary.final_size, (3, 3));
    }

    #[test]
    fn undecodable_first_upload_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("broken.png"), b"not a png").expect("write");
        let script = write_script(dir.path(), r#"{ "upload": "broken.png" }"#);
        assert!(matches!(run(&script), Err(RetouchError::Decode(_))));
    }

    #[test]
    fn missing_profile_and_jpeg_settings_are_honoured() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_png(&dir.path().join("a.png"), RgbImage::from_pixel(5, 5, Rgb([90, 60, 30])));
        std::fs::write(
            dir.path().join("settings.json"),
            r#"{ "output_format": "jpeg", "profile_image": "nobody.jpg" }"#,
        )
        .expect("write settings");
        let script = write_script(
            dir.path(),
            r#"{
                "upload": "a.png",
                "config": "settings.json",
                "events": [
                    { "op": "contrast", "value": 7.0 },
                    { "op": "download" }
                ]
            }"#,
        );

        let summary = run(&script).expect("run");
        assert_eq!(summary.failures, 0);
        assert_eq!(summary.downloads, vec![dir.path().join("enhanced_image.jpg")]);
    }
}
