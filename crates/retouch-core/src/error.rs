// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Retouch.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for all Retouch operations.
///
/// None of the pixel transforms can fail: parameters are clamped to their
/// slider ranges instead. Errors only arise at the edges of a session
/// (decoding an upload, encoding a download, loading assets and config).
#[derive(Debug, Error)]
pub enum RetouchError {
    // -- Session boundary --
    #[error("failed to decode image: {0}")]
    Decode(String),

    #[error("failed to encode image: {0}")]
    Encode(String),

    // -- Display assets --
    #[error("display asset not found: {}", .0.display())]
    MissingAsset(PathBuf),

    // -- Storage / configuration --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, RetouchError>;
