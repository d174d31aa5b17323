// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Tracing subscriber setup for the binary.
//!
//! The library only emits `tracing` events. Filtering comes from the
//! `TAXON_LOG` environment variable (`EnvFilter` syntax), falling back to
//! `taxon=info`, or `taxon=debug` when verbose output was requested.

use std::sync::Once;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "TAXON_LOG";

static INIT: Once = Once::new();

/// Install the global subscriber. Later calls are no-ops.
///
/// Logs go to stderr so query output on stdout stays machine-readable.
pub fn init_tracing(verbose: bool) {
    INIT.call_once(|| {
        let fallback = if verbose { "taxon=debug" } else { "taxon=info" };
        let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));

        // Another subscriber may already be installed by an embedding application.
        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .with(filter)
            .try_init();
    });
}
