//! luastub CLI: scan Lua sources and write a LuaLS stub file.
//!
//! Calls `luastub-core` directly; all extraction logic lives there.

use clap::Parser;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use luastub_core::{generate, load_config, StubSummary};

/// Generate a `---@meta` stub file describing every global Lua function.
#[derive(Parser)]
#[command(name = "luastub", version, about, long_about = None)]
struct Cli {
    /// Directories to scan recursively, or individual .lua files
    #[arg(required = true, value_name = "INPUT")]
    inputs: Vec<PathBuf>,

    /// Output stub file (parent directories are created)
    #[arg(short, long, value_name = "FILE")]
    out: PathBuf,

    /// Config file (default: .luastub.toml in the current directory, if present)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print the summary as JSON instead of a sentence
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    // RUST_LOG wins unless -v was given explicitly.
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) if verbose == 0 => filter,
        _ => EnvFilter::new(format!("luastub={level},luastub_core={level}")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn print_summary(summary: &StubSummary, json: bool) {
    if json {
        match serde_json::to_string_pretty(summary) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                eprintln!("Could not serialize summary: {e}");
                std::process::exit(1);
            }
        }
    } else {
        println!("{summary}");
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let config = load_config(cli.config.as_deref(), &cwd).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
    debug!(extensions = ?config.extensions, skip_dirs = ?config.skip_dirs, "Scan config");

    let summary = generate(&cli.inputs, &cli.out, &config).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });

    print_summary(&summary, cli.json);
}
