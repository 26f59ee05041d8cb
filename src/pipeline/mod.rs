//! Pipeline Module
//!
//! Single-consumer worker applying a command stream to the store.
//!
//! ## Responsibilities
//! - Drain the command source one command at a time, in arrival order
//! - Apply each command to the store it owns
//! - Emit one outcome line per recognized command
//! - Stop once the source signals end-of-stream, then close the sink
//!
//! ## Single Writer
//! ```text
//!   CommandSource ──► CommandPipeline ──► OutcomeSink
//!                          │  ▲
//!                    write │  │ outcome
//!                          ▼  │
//!                      OrderedStore ◄──── StoreReader (read-only, any thread)
//! ```
//!
//! The pipeline is the only holder of a writable store handle. Ordering of
//! the store (and of the log) relies on that: introducing a second writer
//! would need its own ordering argument.

mod worker;

pub use worker::{CommandPipeline, PipelineHandle};

/// Lifecycle of a pipeline worker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    /// Waiting for or applying commands
    Running,

    /// Source ended and the sink has been closed
    Stopped,
}

/// Counters collected over one pipeline run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineReport {
    /// Commands applied to the store
    pub applied: u64,

    /// Commands dropped for an unknown action
    pub ignored: u64,

    /// Malformed payloads the source skipped
    pub skipped: u64,

    /// Outcome lines the sink refused
    pub sink_failures: u64,
}
