//! Configuration for OrderKV
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

use crate::error::{OrderKvError, Result};

/// Main configuration for an OrderKV server instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Outcome Log Configuration
    // -------------------------------------------------------------------------
    /// File receiving one outcome line per processed command.
    /// Opened in create + append mode.
    pub log_file: PathBuf,

    // -------------------------------------------------------------------------
    // Command Source Configuration
    // -------------------------------------------------------------------------
    /// Newline-delimited JSON payloads to consume (None = stdin)
    pub input: Option<PathBuf>,

    /// Name of the command queue (used for logging and thread names)
    pub queue_name: String,

    /// Capacity of the channel between the source reader and the
    /// pipeline worker (None = unbounded)
    pub queue_capacity: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_file: PathBuf::from("server.log"),
            input: None,
            queue_name: "requests".to_string(),
            queue_capacity: None,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Check the configuration for values the server cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.log_file.as_os_str().is_empty() {
            return Err(OrderKvError::Config("log file path is empty".to_string()));
        }
        if self.queue_capacity == Some(0) {
            return Err(OrderKvError::Config(
                "queue capacity must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the outcome log file
    pub fn log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.log_file = path.into();
        self
    }

    /// Read payloads from a file instead of stdin
    pub fn input(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.input = Some(path.into());
        self
    }

    /// Set the queue name
    pub fn queue_name(mut self, name: impl Into<String>) -> Self {
        self.config.queue_name = name.into();
        self
    }

    /// Bound the producer/consumer channel
    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.config.queue_capacity = Some(capacity);
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
