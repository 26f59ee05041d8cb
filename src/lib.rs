//! # OrderKV
//!
//! An insertion-ordered in-memory key-value store driven by a command queue:
//! - O(1) average point add/get/remove with insertion order preserved
//! - Point-in-time ordered snapshots safe under concurrent writes
//! - Single-consumer pipeline applying commands in arrival order
//! - One human-readable outcome line per processed command
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Command Source                           │
//! │          (queue consumer, JSON payload decoding)             │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ Command (FIFO)
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                   Command Pipeline                           │
//! │               (single worker, sole writer)                   │
//! └──────────┬──────────────────────────────────┬───────────────┘
//!            │                                  │
//!            ▼                                  ▼
//!   ┌─────────────────┐                ┌─────────────────┐
//!   │  OrderedStore   │                │  Outcome Sink   │
//!   │    (RwLock)     │                │ (append-only)   │
//!   └────────▲────────┘                └─────────────────┘
//!            │
//!   ┌────────┴────────┐
//!   │   StoreReader   │
//!   │  (any thread)   │
//!   └─────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod store;
pub mod protocol;
pub mod source;
pub mod sink;
pub mod pipeline;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{OrderKvError, Result};
pub use config::Config;
pub use store::{OrderedStore, StoreReader};
pub use protocol::{Action, Command, Outcome};
pub use pipeline::{CommandPipeline, PipelineHandle, PipelineReport, PipelineState};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of OrderKV
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
