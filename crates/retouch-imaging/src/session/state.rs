// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image session — owns the decoded original and the current processed image.

use image::RgbImage;
use retouch_core::config::ToolkitConfig;
use retouch_core::error::RetouchError;
use retouch_core::types::{Download, Operation, OperationKind, OutputFormat, SourceId};
use tracing::{debug, info, instrument};

use super::dispatch::{TransformInput, dispatch};
use crate::ops::{codec, processor};

/// State of one interactive editing session.
///
/// `original` is fixed until a different upload arrives; `current` is
/// replaced wholesale by every mutating operation. Both are always
/// three-channel RGB.
#[derive(Debug, Clone)]
pub struct ImageSession {
    original: RgbImage,
    current: RgbImage,
    identity: SourceId,
    config: ToolkitConfig,
    /// Mutating operations since the last upload or reset.
    applied: usize,
}

impl ImageSession {
    // -- Construction ---------------------------------------------------------

    /// Start a session from uploaded bytes with default settings.
    ///
    /// Fails with `RetouchError::Decode` if the bytes are not an image; no
    /// session exists in that case.
    pub fn open(data: &[u8], identity: SourceId) -> Result<Self, RetouchError> {
        Self::open_with_config(data, identity, ToolkitConfig::default())
    }

    /// Start a session from uploaded bytes with explicit settings.
    #[instrument(skip(data, config), fields(data_len = data.len(), %identity))]
    pub fn open_with_config(
        data: &[u8],
        identity: SourceId,
        config: ToolkitConfig,
    ) -> Result<Self, RetouchError> {
        let original = codec::decode_rgb(data)?;
        info!(
            width = original.width(),
            height = original.height(),
            "Session opened"
        );
        Ok(Self::from_rgb(original, identity, config))
    }

    /// Start a session from an already-decoded image.
    pub fn from_rgb(original: RgbImage, identity: SourceId, config: ToolkitConfig) -> Self {
        Self {
            current: original.clone(),
            original,
            identity,
            config: config.validated(),
            applied: 0,
        }
    }

    // -- Accessors ------------------------------------------------------------

    /// The image as decoded from the upload.
    pub fn original(&self) -> &RgbImage {
        &self.original
    }

    /// The result of the most recent operation.
    pub fn current(&self) -> &RgbImage {
        &self.current
    }

    pub fn identity(&self) -> &SourceId {
        &self.identity
    }

    pub fn config(&self) -> &ToolkitConfig {
        &self.config
    }

    /// Mutating operations applied since the last upload or reset.
    pub fn applied(&self) -> usize {
        self.applied
    }

    // -- Upload ---------------------------------------------------------------

    /// Offer a (possibly) new upload to the session.
    ///
    /// A different `identity` decodes `data` and replaces both images,
    /// discarding all edits; returns `true`. The same identity keeps the
    /// current edits and returns `false` without decoding. A decode failure
    /// leaves the session unchanged.
    #[instrument(skip(self, data), fields(data_len = data.len(), %identity))]
    pub fn upload(&mut self, data: &[u8], identity: SourceId) -> Result<bool, RetouchError> {
        if identity == self.identity {
            debug!("same upload, keeping edits");
            return Ok(false);
        }
        let original = codec::decode_rgb(data)?;
        info!(
            previous = %self.identity,
            width = original.width(),
            height = original.height(),
            "New upload, session reset"
        );
        self.current = original.clone();
        self.original = original;
        self.identity = identity;
        self.applied = 0;
        Ok(true)
    }

    // -- Operations -----------------------------------------------------------

    /// Apply `operation` to the current image.
    ///
    /// Parameters outside their slider range are clamped. The histogram is
    /// read-only and leaves the session as it is.
    #[instrument(skip(self), fields(identity = %self.identity))]
    pub fn apply_in_place(&mut self, operation: Operation) {
        let operation = operation.clamped(&self.config);
        let kind = operation.kind();
        let Some(transform) = dispatch(kind) else {
            debug!(%kind, "read-only operation, session unchanged");
            return;
        };
        let next = transform(self.transform_input(), operation);
        self.replace_current(next, kind);
    }

    /// 256-bin luma histogram of the current image.
    pub fn histogram(&self) -> [u32; 256] {
        processor::histogram(&self.current)
    }

    // -- Output ---------------------------------------------------------------

    /// Encode the current image in the configured download format.
    pub fn download(&self) -> Result<Download, RetouchError> {
        self.download_as(self.config.output_format)
    }

    /// Encode the current image in `format`.
    pub fn download_as(&self, format: OutputFormat) -> Result<Download, RetouchError> {
        codec::encode_download(&self.current, format, self.config.jpeg_quality)
    }

    // -- Internals ------------------------------------------------------------

    pub(crate) fn transform_input(&self) -> TransformInput<'_> {
        TransformInput {
            current: &self.current,
            original: &self.original,
            config: &self.config,
        }
    }

    fn replace_current(&mut self, next: RgbImage, kind: OperationKind) {
        self.applied = match kind {
            OperationKind::Reset => 0,
            _ => self.applied + 1,
        };
        debug!(
            %kind,
            width = next.width(),
            height = next.height(),
            applied = self.applied,
            "Current image replaced"
        );
        self.current = next;
    }
}
