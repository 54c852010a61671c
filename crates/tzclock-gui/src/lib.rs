use flexi_logger::LogSpecification;
use log::warn;

mod views;

pub mod app;

pub use app::{App, Message};
pub use views::clock::ZoneChoice;

/// Parses a log specification, letting `RUST_LOG` take precedence.
///
/// Falls back to `warn` when the configured level cannot be parsed.
pub fn get_log_spec(log_level: &str) -> LogSpecification {
    LogSpecification::env_or_parse(log_level).unwrap_or_else(|err| {
        warn!("Failed to parse log level '{log_level}': {err}");
        LogSpecification::warn()
    })
}

