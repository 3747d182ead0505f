//! ptfs: drive a passthrough filesystem adapter without mounting it.
//!
//! Each subcommand makes the same calls a host would, through the integer
//! ABI, against a native directory.
//!
//! Usage:
//!   ptfs --root /srv/data ls /
//!   ptfs --root /srv/data stat --json /notes.txt
//!   echo hello | ptfs --root /srv/data write /greeting
//!   RUST_LOG=ptfs_kernel=trace ptfs cat /greeting

mod commands;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use tracing_subscriber::{EnvFilter, fmt};

use ptfs_kernel::{FileSystemOps, PassthroughConfig, Traced};

use commands::Command;

/// Passthrough filesystem inspector.
#[derive(Parser, Debug)]
#[command(name = "ptfs")]
#[command(about = "Run passthrough filesystem operations against a directory")]
struct Args {
    /// Native directory exposed as `/`
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Log failed calls (-v) or every call (-vv) to stderr
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    // Logs go to stderr; stdout carries command output.
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();

    let config = PassthroughConfig::new(&args.root)
        .with_context(|| format!("invalid root {}", args.root.display()))?;
    let adapter = config
        .build()
        .with_context(|| format!("cannot serve {}", args.root.display()))?;
    let fs = Traced::new(adapter);

    let host: &dyn FileSystemOps = &fs;
    host.init();
    let result = commands::run(
        host,
        args.command,
        &mut std::io::stdin().lock(),
        &mut std::io::stdout().lock(),
    );
    host.destroy();
    result
}
