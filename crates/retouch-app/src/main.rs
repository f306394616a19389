// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Retouch — headless image-edit session driver.
//
// Entry point. Initialises logging, then replays the event script named by the
// single argument against one edit session.

mod driver;
mod profile;
mod script;

use std::path::PathBuf;
use std::process::ExitCode;

use retouch_core::human_errors::humanize_error;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let Some(script) = std::env::args_os().nth(1).map(PathBuf::from) else {
        eprintln!("usage: retouch <script.json>");
        return ExitCode::from(2);
    };

    tracing::info!(script = %script.display(), "Retouch starting");

    match driver::run(&script) {
        Ok(summary) => {
            tracing::info!(
                events = summary.events,
                resets = summary.resets,
                failures = summary.failures,
                width = summary.final_size.0,
                height = summary.final_size.1,
                "session finished"
            );
            for path in &summary.downloads {
                println!("{}", path.display());
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            let human = humanize_error(&e);
            tracing::error!(error = %e, "session could not start");
            eprintln!("{}\n{}", human.message, human.suggestion);
            ExitCode::FAILURE
        }
    }
}
