//! RPAL driver library.
//!
//! The `rpal` binary is a thin argument parser over [`commands`]. Loading a
//! program is a two-step pipeline:
//!
//! ```text
//! .st file ──read_tree──► StNode ──build_control──► ControlStructure ──► Machine
//! ```

pub mod commands;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install the tracing subscriber once per process.
///
/// Nothing is installed unless `RPAL_LOG` (or, failing that, `RUST_LOG`)
/// holds a filter, e.g. `RPAL_LOG=rpal_eval=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};

        let filter =
            EnvFilter::try_from_env("RPAL_LOG").or_else(|_| EnvFilter::try_from_default_env());
        if let Ok(filter) = filter {
            tracing_subscriber::registry()
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_targets(true)
                        .with_bracketed_fields(true),
                )
                .with(filter)
                .init();
        }
    });
}
