//! Result type alias shared across the workspace.
//!
//! Defaults the error type to `ConfigError`, so startup functions can simply return
//! `Result<T>`. Fetch paths spell out `Result<T, FetchError>`.
use crate::error::ConfigError;

/// Workspace-wide `Result` alias with `ConfigError` as the default error.
pub type Result<T, E = ConfigError> = std::result::Result<T, E>;
