// Main library entry point for ava2jest.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod ports;

pub use application::{Conversion, ConvertUsecase, FileOutcome};
pub use domain::config::Config;
pub use domain::language::SourceKind;
pub use error::{ConvertError, ConvertResult};

/// Install the global `tracing` subscriber. `RUST_LOG` still takes
/// precedence over the default level.
pub fn init_tracing(verbose: bool) {
    let level = if verbose { "ava2jest=debug" } else { "ava2jest=info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    // A second call (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
