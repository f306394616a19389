// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Optional display assets (the sidebar profile picture).

use std::io::ErrorKind;
use std::path::Path;

use retouch_core::error::{Result, RetouchError};
use retouch_core::human_errors::humanize_error;
use tracing::{info, warn};

/// Read an asset file, reporting a missing file as `MissingAsset`.
pub fn load_asset(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|err| match err.kind() {
        ErrorKind::NotFound => RetouchError::MissingAsset(path.to_path_buf()),
        _ => RetouchError::Io(err),
    })
}

/// Load the configured profile picture, if any.
///
/// A missing or unreadable picture is logged as a warning and skipped; it
/// never affects the edit session.
pub fn load_profile(path: Option<&Path>) -> Option<Vec<u8>> {
    let path = path?;
    match load_asset(path) {
        Ok(bytes) => {
            info!(path = %path.display(), bytes = bytes.len(), "profile image loaded");
            Some(bytes)
        }
        Err(err) => {
            let human = humanize_error(&err);
            warn!(error = %err, "{}", human.message);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_asset_is_reported_as_such() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("Partho.JPG");
        match load_asset(&path) {
            Err(RetouchError::MissingAsset(missing)) => assert_eq!(missing, path),
            other => panic!("expected MissingAsset, got {other:?}"),
        }
    }

    #[test]
    fn missing_profile_is_skipped() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(load_profile(Some(&dir.path().join("absent.jpg"))).is_none());
        assert!(load_profile(None).is_none());
    }

    #[test]
    fn present_profile_is_loaded() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("me.jpg");
        std::fs::write(&path, b"jpeg bytes").expect("write");
        assert_eq!(load_profile(Some(&path)), Some(b"jpeg bytes".to_vec()));
    }
}
