// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Edit sessions — the original/current image pair, identity-based reset on a
// new upload, and the operation dispatch table.

pub mod dispatch;
pub mod state;

pub use dispatch::{Transform, TransformInput, apply, dispatch};
pub use state::ImageSession;
