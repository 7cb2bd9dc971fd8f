// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Personal finance tracking: transactions, categories, needs/wants/savings
//! budgeting and investment projections, backed by a local SQLite file.
//!
//! The calculators in [`analysis`] and [`currency`] are pure and can be used
//! without the store or the CLI.

pub mod analysis;
pub mod categories;
pub mod cli;
pub mod commands;
pub mod currency;
pub mod db;
pub mod error;
pub mod models;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Installs the global fmt subscriber. `RUST_LOG` overrides the default
/// `fintrack=warn` filter.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        use tracing_subscriber::{EnvFilter, fmt};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("fintrack=warn"));
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}
