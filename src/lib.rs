#![allow(clippy::uninlined_format_args)]
#![deny(unused_qualifications)]

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod messaging;
pub mod pool;
pub mod queue;
pub mod sender;
pub mod server;

pub use config::{LoadConfig, Message};
pub use dispatcher::{Dispatcher, TaskResult};
pub use error::{Error, Result};
pub use sender::Outcome;

/// Install the stdout `tracing` subscriber used by both binaries.
/// `RUST_LOG` overrides the default `info` level.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}
