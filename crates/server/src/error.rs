//! Error types for the MCP server.

use thiserror::Error;

/// Startup-time errors of the server. Tool-call failures never surface here; they become error
/// envelopes.
#[derive(Error, Debug)]
pub enum ServerError {
    /// Configuration errors (bad log filter directive)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Tool catalog errors (duplicate tool names, schemas that fail to compile)
    #[error("Catalog error: {0}")]
    Catalog(String),
}

/// Result type alias for server operations.
pub type Result<T> = std::result::Result<T, ServerError>;
