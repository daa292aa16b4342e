//! sumstat: streaming per-station min/mean/max summaries
//!
//! Usage: sumstat <COMMAND> [OPTIONS]

use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use std::process;

use sumstat::commands::{
    FastSummarizeCommand, GenerateCommand, GenerateConfig, SizeSpec, SummarizeCommand,
};
use sumstat::streaming::buffers;
use sumstat::summary::{Result, SummaryError};

#[derive(Parser)]
#[command(name = "sumstat")]
#[command(author = "Manish Kumar Bobbili")]
#[command(version)]
#[command(about = "sumstat - high-throughput per-station min/mean/max summaries of delimited measurement files", long_about = None)]
struct Cli {
    /// Number of threads to use (default: number of CPUs)
    #[arg(long, short = 't', global = true)]
    threads: Option<usize>,

    /// Fold unparseable values as 0.0 under their key instead of
    /// dropping them. By default, sumstat drops such lines and counts
    /// them in the run statistics.
    #[arg(long, global = true)]
    zero_invalid: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize a measurement file into one sorted report line
    Summarize {
        /// Input measurement file (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Shard the input across threads (mmap-backed for large files)
        #[arg(short, long)]
        parallel: bool,

        /// Use smaller read chunks to cap memory usage
        #[arg(long)]
        low_memory: bool,

        /// Report progress to stderr every 10M lines (streaming mode)
        #[arg(long)]
        progress: bool,

        /// Print run statistics to stderr
        #[arg(long)]
        stats: bool,
    },

    /// Generate a synthetic measurement file
    Generate {
        /// Output file path
        #[arg(short, long, default_value = "./measurements.txt")]
        output: PathBuf,

        /// Number of lines to write (accepts K/M/G suffixes, e.g. "10M")
        #[arg(short, long, default_value = "1M")]
        count: String,

        /// Number of distinct stations (default: full embedded table)
        #[arg(long)]
        stations: Option<usize>,

        /// Random seed for reproducibility
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Overwrite the output file if it exists
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    // Configure zero-invalid mode if requested
    // This must be set before any folding occurs
    if cli.zero_invalid {
        sumstat::config::set_zero_invalid(true);
    }

    // Configure thread pool if --threads specified
    if let Some(n) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build_global()
            .expect("Failed to initialize thread pool");
    }

    let result = match cli.command {
        Commands::Summarize {
            input,
            parallel,
            low_memory,
            progress,
            stats,
        } => run_summarize(input, parallel, low_memory, progress, stats),

        Commands::Generate {
            output,
            count,
            stations,
            seed,
            force,
        } => run_generate(output, count, stations, seed, force),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run_summarize(
    input: Option<PathBuf>,
    parallel: bool,
    low_memory: bool,
    progress: bool,
    stats: bool,
) -> Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    if parallel {
        let cmd = FastSummarizeCommand::new();

        let result = if let Some(path) = input {
            if path.to_string_lossy() == "-" {
                cmd.run_stdin(&mut handle)?
            } else {
                cmd.run(&path, &mut handle)?
            }
        } else {
            cmd.run_stdin(&mut handle)?
        };

        if stats {
            eprintln!("Parallel summarize stats: {}", result);
        }
    } else {
        let mut cmd = SummarizeCommand::new();
        cmd.chunk_size = buffers::chunk_size(low_memory);
        cmd.progress = progress;

        let result = if let Some(path) = input {
            if path.to_string_lossy() == "-" {
                cmd.run_stdin(&mut handle)?
            } else {
                cmd.run(&path, &mut handle)?
            }
        } else {
            cmd.run_stdin(&mut handle)?
        };

        if stats {
            eprintln!("Summarize stats: {}", result);
        }
    }

    Ok(())
}

fn run_generate(
    output: PathBuf,
    count: String,
    stations: Option<usize>,
    seed: u64,
    force: bool,
) -> Result<()> {
    let count = SizeSpec::from_str(&count).ok_or_else(|| {
        SummaryError::InvalidFormat(format!(
            "Invalid count '{}'. Use a number with an optional K/M/G suffix",
            count
        ))
    })?;

    let config = GenerateConfig {
        output,
        count,
        stations,
        seed,
        force,
    };

    GenerateCommand::new(config).run()?;
    Ok(())
}
