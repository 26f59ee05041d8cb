//! OrderKV Server Binary
//!
//! Consumes newline-delimited JSON command payloads and applies them to an
//! ordered store, writing one outcome line per command to the log file.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::thread;

use clap::Parser;
use crossbeam::channel::{self, Receiver, Sender};
use orderkv::sink::FileSink;
use orderkv::source::PayloadSource;
use orderkv::{CommandPipeline, Config, OrderedStore};
use tracing_subscriber::{fmt, EnvFilter};

/// OrderKV Server
#[derive(Parser, Debug)]
#[command(name = "orderkv-server")]
#[command(about = "Apply queued key-value commands to an insertion-ordered store")]
#[command(version)]
struct Args {
    /// Outcome log file
    #[arg(short, long, default_value = "server.log")]
    log_file: String,

    /// Read payloads from this file instead of stdin
    #[arg(short, long)]
    input: Option<String>,

    /// Command queue name
    #[arg(short, long, default_value = "requests")]
    queue: String,

    /// Bound the in-process command queue (unbounded if omitted)
    #[arg(short = 'c', long)]
    queue_capacity: Option<usize>,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,orderkv=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    // Build config from args
    let mut builder = Config::builder()
        .log_file(&args.log_file)
        .queue_name(&args.queue);
    if let Some(input) = &args.input {
        builder = builder.input(input);
    }
    if let Some(capacity) = args.queue_capacity {
        builder = builder.queue_capacity(capacity);
    }
    let config = builder.build();

    tracing::info!("OrderKV Server v{}", orderkv::VERSION);
    tracing::info!("Outcome log: {}", config.log_file.display());
    tracing::info!("Queue: {}", config.queue_name);

    if let Err(e) = run(config) {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }

    tracing::info!("Server stopped");
}

fn run(config: Config) -> orderkv::Result<()> {
    config.validate()?;

    let input: Box<dyn Read + Send> = match &config.input {
        Some(path) => Box::new(File::open(path)?),
        None => Box::new(std::io::stdin()),
    };

    let (sender, receiver): (Sender<Vec<u8>>, Receiver<Vec<u8>>) = match config.queue_capacity {
        Some(capacity) => channel::bounded(capacity),
        None => channel::unbounded(),
    };

    // Consumer side of the queue: the pipeline worker
    let sink = FileSink::open(&config.log_file)?;
    let pipeline = CommandPipeline::new(OrderedStore::new(), sink);
    let handle = pipeline.spawn(PayloadSource::new(receiver))?;

    // Producer side: forward every payload line, then close the queue
    let queue_name = config.queue_name.clone();
    let producer = thread::Builder::new()
        .name(format!("orderkv-{}", queue_name))
        .spawn(move || publish_lines(input, sender, &queue_name))?;

    let published = producer
        .join()
        .map_err(|_| orderkv::OrderKvError::Worker("queue reader panicked".to_string()))?;
    let report = handle.join()?;

    tracing::info!(
        published,
        applied = report.applied,
        ignored = report.ignored,
        skipped = report.skipped,
        sink_failures = report.sink_failures,
        "All commands processed"
    );

    Ok(())
}

/// Push each non-blank input line onto the queue
///
/// Lines go out as raw bytes; decoding, and skipping what does not decode,
/// is the pipeline source's job. Dropping the sender on return signals
/// end-of-stream to the pipeline.
fn publish_lines(input: Box<dyn Read + Send>, queue: Sender<Vec<u8>>, queue_name: &str) -> u64 {
    let mut published = 0;

    for line in BufReader::new(input).split(b'\n') {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!("Failed to read input, closing queue {}: {}", queue_name, e);
                break;
            }
        };
        if line.iter().all(u8::is_ascii_whitespace) {
            continue;
        }
        if queue.send(line).is_err() {
            tracing::warn!("Pipeline stopped consuming queue {}", queue_name);
            break;
        }
        published += 1;
    }

    tracing::debug!("Input exhausted after {} payloads", published);
    published
}
