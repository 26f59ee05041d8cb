//! Error types for OrderKV
//!
//! Provides a unified error type for the fallible edges of the system.
//! Store operations are total and never produce one of these.

use thiserror::Error;

/// Result type alias using OrderKvError
pub type Result<T> = std::result::Result<T, OrderKvError>;

/// Unified error type for OrderKV operations
#[derive(Debug, Error)]
pub enum OrderKvError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Wire Format Errors
    // -------------------------------------------------------------------------
    #[error("Malformed payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Encoding error: {0}")]
    Encode(String),

    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    // -------------------------------------------------------------------------
    // Sink Errors
    // -------------------------------------------------------------------------
    #[error("Outcome sink error: {0}")]
    Sink(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // -------------------------------------------------------------------------
    // Concurrency Errors
    // -------------------------------------------------------------------------
    #[error("Worker thread failed: {0}")]
    Worker(String),
}
