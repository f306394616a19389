// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for the interactive front end.
//
// Every technical error is mapped to plain English with a clear suggestion.
// Severity drives whether the front end shows a banner or a quiet warning.

use crate::error::RetouchError;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Recovered locally; the session carries on (e.g. a missing profile picture).
    Warning,
    /// Disk hiccup or similar — trying the same thing again may work.
    Transient,
    /// User must do something (pick another file, fix a settings file).
    ActionRequired,
    /// Cannot be fixed by retrying or user action.
    Permanent,
}

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary (shown as a heading).
    pub message: String,
    /// What the user should try (shown as body text).
    pub suggestion: String,
    /// Whether the front end may retry the same action automatically.
    pub retriable: bool,
    /// Severity level (drives icon/colour in UI).
    pub severity: Severity,
}

/// Convert a `RetouchError` into a `HumanError` for display.
pub fn humanize_error(err: &RetouchError) -> HumanError {
    match err {
        RetouchError::Decode(detail) => {
            if detail.contains("format") || detail.contains("Unsupported") {
                HumanError {
                    message: "That file type isn't supported.".into(),
                    suggestion: "Upload a JPEG or PNG image.".into(),
                    retriable: false,
                    severity: Severity::ActionRequired,
                }
            } else {
                HumanError {
                    message: "We couldn't read that image.".into(),
                    suggestion: "The file may be damaged. Try exporting it again or pick a different image.".into(),
                    retriable: false,
                    severity: Severity::ActionRequired,
                }
            }
        }
        RetouchError::Encode(_) => HumanError {
            message: "We couldn't prepare the download.".into(),
            suggestion: "Try downloading again, or switch to PNG.".into(),
            retriable: true,
            severity: Severity::Transient,
        },
        RetouchError::MissingAsset(path) => HumanError {
            message: format!("Profile image ({}) not found.", display_name(path)),
            suggestion: "Place the image next to the application to show it in the sidebar.".into(),
            retriable: false,
            severity: Severity::Warning,
        },
        RetouchError::Io(_) => HumanError {
            message: "A file couldn't be read or written.".into(),
            suggestion: "Check that the folder exists and you have permission to use it.".into(),
            retriable: true,
            severity: Severity::Transient,
        },
        RetouchError::Serialization(_) => HumanError {
            message: "The settings file is not valid.".into(),
            suggestion: "Fix the JSON or delete the file to go back to the defaults.".into(),
            retriable: false,
            severity: Severity::Permanent,
        },
    }
}

fn display_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn corrupt_upload_requires_action() {
        let err = RetouchError::Decode("unexpected end of file".into());
        let human = humanize_error(&err);
        assert_eq!(human.severity, Severity::ActionRequired);
        assert!(!human.retriable);
        assert!(human.message.contains("couldn't read"));
    }

    #[test]
    fn unsupported_format_names_accepted_types() {
        let err = RetouchError::Decode("The image format could not be determined".into());
        let human = humanize_error(&err);
        assert!(human.suggestion.contains("JPEG or PNG"));
    }

    #[test]
    fn missing_asset_is_only_a_warning() {
        let err = RetouchError::MissingAsset(PathBuf::from("assets/Partho.JPG"));
        let human = humanize_error(&err);
        assert_eq!(human.severity, Severity::Warning);
        assert!(human.message.contains("Partho.JPG"));
        assert!(!human.message.contains("assets/"));
    }

    #[test]
    fn io_failure_is_transient() {
        let err = RetouchError::Io(std::io::Error::other("disk full"));
        let human = humanize_error(&err);
        assert_eq!(human.severity, Severity::Transient);
        assert!(human.retriable);
    }
}
