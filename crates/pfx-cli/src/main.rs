//! pfx - pixel filter CLI
//!
//! Runs the pfx filter engine over raw RGB8 buffers.

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use pfx_ops::FilterKind;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "pfx")]
#[command(author, version, about = "Pixel filter CLI")]
#[command(long_about = "
Applies per-pixel and convolution filters to raw interleaved RGB8 buffers.

Examples:
  pfx list                                        # Show filters
  pfx apply in.rgb -o out.rgb -w 640 -H 480 -f sepia
  pfx apply in.rgb -o out.rgb -w 640 -H 480 -f gaussian --radius 5 --sigma 3
  pfx apply in.rgb -o out.rgb -w 640 -H 480 --kernel '0,0,0;0,1,0;0,0,0'
  pfx kernel -f sharpness                         # Print kernel weights
  RUST_LOG=pfx_ops=debug pfx -v apply ...         # Log filter passes
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Number of threads for --parallel (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply a filter to a raw RGB8 buffer
    #[command(visible_alias = "a")]
    Apply(ApplyArgs),

    /// List available filters
    #[command(visible_alias = "ls")]
    List,

    /// Print the weights of a convolution kernel
    #[command(visible_alias = "k")]
    Kernel(KernelArgs),
}

/// Filter selection shared by `apply` and `kernel`.
#[derive(Args, Debug, Clone)]
struct FilterArgs {
    /// Filter name (see `pfx list`)
    #[arg(short, long, default_value = "invert")]
    filter: FilterKind,

    /// Gaussian radius
    #[arg(long)]
    radius: Option<usize>,

    /// Gaussian sigma
    #[arg(long)]
    sigma: Option<f32>,

    /// Custom kernel: rows separated by ';', weights by ',' (overrides --filter)
    #[arg(short, long)]
    kernel: Option<String>,
}

/// Arguments for the `apply` command.
#[derive(Args)]
struct ApplyArgs {
    /// Input raw RGB8 file
    input: PathBuf,

    /// Output raw RGB8 file
    #[arg(short, long)]
    output: PathBuf,

    /// Image width in pixels
    #[arg(short, long)]
    width: u32,

    /// Image height in pixels
    #[arg(short = 'H', long)]
    height: u32,

    #[command(flatten)]
    filter: FilterArgs,

    /// Compute columns in parallel
    #[arg(short, long)]
    parallel: bool,

    /// Cancel the pass after this many seconds
    #[arg(long)]
    timeout: Option<f64>,
}

/// Arguments for the `kernel` command.
#[derive(Args)]
struct KernelArgs {
    #[command(flatten)]
    filter: FilterArgs,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::Apply(args) => commands::apply::run(args, cli.verbose),
        Commands::List => commands::list::run(),
        Commands::Kernel(args) => commands::kernel::run(args),
    }
}
