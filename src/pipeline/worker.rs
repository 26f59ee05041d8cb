//! Pipeline worker
//!
//! Dispatches commands to the store and records their outcomes.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::error::{OrderKvError, Result};
use crate::protocol::{Action, Command, Outcome};
use crate::sink::OutcomeSink;
use crate::source::CommandSource;
use crate::store::{OrderedStore, StoreReader};
use super::{PipelineReport, PipelineState};

/// Applies commands to an owned store and logs one line per command
pub struct CommandPipeline<S> {
    /// Writes happen only through this handle
    store: Arc<OrderedStore>,

    sink: S,

    report: PipelineReport,
}

impl<S: OutcomeSink> CommandPipeline<S> {
    /// Create a pipeline that takes ownership of the store and sink
    pub fn new(store: OrderedStore, sink: S) -> Self {
        Self {
            store: Arc::new(store),
            sink,
            report: PipelineReport::default(),
        }
    }

    /// Read-only handle for callers on other threads
    pub fn reader(&self) -> StoreReader {
        StoreReader::new(Arc::clone(&self.store))
    }

    /// Counters so far
    pub fn report(&self) -> PipelineReport {
        self.report
    }

    /// Apply one command to the store
    ///
    /// Returns None, without touching the store, for an unknown action.
    pub fn apply(&self, command: &Command) -> Option<Outcome> {
        let key = command.key().to_string();

        let outcome = match command.action() {
            Action::Add => {
                let value = command.value().to_string();
                self.store.add(key.clone(), value.clone());
                Outcome::Added { key, value }
            }
            Action::Remove => {
                if self.store.remove(&key) {
                    Outcome::Removed { key }
                } else {
                    Outcome::RemoveMissing { key }
                }
            }
            Action::Get => match self.store.get(&key) {
                Some(value) => Outcome::Found { key, value },
                None => Outcome::NotFound { key },
            },
            Action::GetAll => Outcome::Listing(self.store.snapshot()),
            Action::Unknown(_) => return None,
        };

        Some(outcome)
    }

    /// Apply one command and record its outcome line
    ///
    /// A line the sink refuses is logged and counted; it never stops the
    /// pipeline.
    pub fn process(&mut self, command: &Command) {
        let Some(outcome) = self.apply(command) else {
            self.report.ignored += 1;
            tracing::debug!(action = %command.action(), "Ignoring command with unknown action");
            return;
        };

        self.report.applied += 1;
        tracing::debug!(action = %command.action(), key = command.key(), "Applied command");

        let line = outcome.to_string();
        if let Err(e) = self.sink.write_line(&line) {
            self.report.sink_failures += 1;
            tracing::error!("Failed to record outcome {:?}: {}", line, e);
        }
    }

    /// Drain the source until end-of-stream, then close the sink
    ///
    /// Every command taken from the source is applied and logged before the
    /// sink is closed. Only a failure to close the sink is returned.
    pub fn run<C: CommandSource>(mut self, mut source: C) -> Result<PipelineReport> {
        tracing::info!("Command pipeline started");

        while let Some(command) = source.next_command() {
            self.process(&command);
        }

        self.report.skipped = source.skipped();
        self.sink.close()?;

        let report = self.report;
        tracing::info!(
            applied = report.applied,
            ignored = report.ignored,
            skipped = report.skipped,
            sink_failures = report.sink_failures,
            entries = self.store.len(),
            "Command pipeline stopped"
        );

        Ok(report)
    }
}

impl<S: OutcomeSink + Send + 'static> CommandPipeline<S> {
    /// Run the pipeline on a dedicated worker thread
    pub fn spawn<C>(self, source: C) -> Result<PipelineHandle>
    where
        C: CommandSource + Send + 'static,
    {
        let reader = self.reader();
        let stopped = Arc::new(AtomicBool::new(false));
        let worker_stopped = Arc::clone(&stopped);

        let thread = thread::Builder::new()
            .name("orderkv-pipeline".to_string())
            .spawn(move || {
                let result = self.run(source);
                worker_stopped.store(true, Ordering::Release);
                result
            })?;

        Ok(PipelineHandle {
            thread,
            reader,
            stopped,
        })
    }
}

/// Handle to a pipeline running on its worker thread
pub struct PipelineHandle {
    thread: JoinHandle<Result<PipelineReport>>,
    reader: StoreReader,
    stopped: Arc<AtomicBool>,
}

impl PipelineHandle {
    pub fn state(&self) -> PipelineState {
        if self.stopped.load(Ordering::Acquire) {
            PipelineState::Stopped
        } else {
            PipelineState::Running
        }
    }

    /// Read-only handle onto the pipeline's store
    pub fn reader(&self) -> StoreReader {
        self.reader.clone()
    }

    /// Wait for the source to end and the worker to finish
    pub fn join(self) -> Result<PipelineReport> {
        self.thread
            .join()
            .map_err(|_| OrderKvError::Worker("pipeline worker panicked".to_string()))?
    }
}
