//! Monthly per-account AWS cost reports, ranked by service and sent by email

pub mod cli;
pub mod services;
pub mod types;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the stderr log subscriber (`RUST_LOG` overrides the `info` default)
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}
