//! OrderKV CLI Client
//!
//! Produces command payloads for the server and checks outcome logs
//! against recorded test data.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use orderkv::protocol::{encode_command, parse_test_data, verify_outcomes, TestDataAction};
use orderkv::Command;
use tracing_subscriber::{fmt, EnvFilter};

/// OrderKV CLI
#[derive(Parser, Debug)]
#[command(name = "orderkv-cli")]
#[command(about = "CLI for the OrderKV command queue")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Add or overwrite a key
    Add {
        /// The key to set
        key: String,

        /// The value to set
        value: String,
    },

    /// Remove a key
    Remove {
        /// The key to remove
        key: String,
    },

    /// Get a value by key
    Get {
        /// The key to get
        key: String,
    },

    /// List every entry in insertion order
    GetAll,

    /// Emit the command payloads recorded in a test data file
    Replay {
        /// Test data file
        #[arg(short, long)]
        file: String,
    },

    /// Check an outcome log against a test data file
    Verify {
        /// Test data file that was replayed
        #[arg(short, long)]
        file: String,

        /// Outcome log written by the server
        #[arg(short, long, default_value = "server.log")]
        log: String,
    },
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let args = Args::parse();

    match run(args.command) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> orderkv::Result<ExitCode> {
    match command {
        Commands::Add { key, value } => publish(&[Command::add(key, value)]),
        Commands::Remove { key } => publish(&[Command::remove(key)]),
        Commands::Get { key } => publish(&[Command::get(key)]),
        Commands::GetAll => publish(&[Command::get_all()]),
        Commands::Replay { file } => {
            let actions = load_test_data(&file)?;
            let commands: Vec<Command> = actions.into_iter().map(|a| a.request).collect();
            tracing::info!("Replaying {} commands from {}", commands.len(), file);
            publish(&commands)
        }
        Commands::Verify { file, log } => verify(&file, &log),
    }
}

/// Validate and print one JSON payload per command
fn publish(commands: &[Command]) -> orderkv::Result<ExitCode> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    for command in commands {
        command.validate()?;
        out.write_all(&encode_command(command)?)?;
        out.write_all(b"\n")?;
    }

    out.flush()?;
    Ok(ExitCode::SUCCESS)
}

fn load_test_data(path: &str) -> orderkv::Result<Vec<TestDataAction>> {
    let file = File::open(path)?;
    parse_test_data(BufReader::new(file))
}

fn verify(test_data: &str, log: &str) -> orderkv::Result<ExitCode> {
    let actions = load_test_data(test_data)?;
    let lines = BufReader::new(File::open(log)?)
        .lines()
        .collect::<std::io::Result<Vec<String>>>()?;

    let mismatches = verify_outcomes(&actions, &lines);
    if mismatches.is_empty() {
        println!("{} records checked, log matches", actions.len());
        return Ok(ExitCode::SUCCESS);
    }

    for mismatch in &mismatches {
        println!("{}", mismatch);
    }
    println!("{} of {} records mismatched", mismatches.len(), actions.len());
    Ok(ExitCode::FAILURE)
}
