//! Input/output operations and error handling for the CLI tool

/// Command-line interface and pipeline orchestration
pub mod cli;
/// Tool constants and configuration defaults
pub mod configuration;
/// Error types and the crate `Result` alias
pub mod error;
/// PNG import and result-map export
pub mod image;
/// Progress display
pub mod progress;
