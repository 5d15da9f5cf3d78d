//! OxiHuff CLI - static Huffman compression
//!
//! Compresses single files with a byte-level Huffman code and a
//! self-describing frequency header.

mod commands;
mod logger;
mod progress;
mod utils;

use clap::{ArgAction, Parser, Subcommand};
use commands::{cmd_compare, cmd_compress, cmd_decompress, cmd_info, cmd_verify};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "oxihuff")]
#[command(author, version, about = "Pure Rust static Huffman compressor")]
#[command(long_about = "
OxiHuff compresses a file with a Huffman code built from its byte
frequencies. The frequency table is stored as a small text header so the
decoder can rebuild the exact same code.

Examples:
  oxihuff compress notes.txt
  oxihuff compress notes.txt -o notes.bin
  oxihuff decompress notes.txt.huf
  oxihuff info notes.txt.huf --codes
  oxihuff info notes.txt.huf --json
  oxihuff compare notes.txt restored.txt
  oxihuff verify notes.txt
")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Show a progress bar while reading input
    #[arg(short = 'P', long, global = true)]
    progress: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a file
    #[command(alias = "c")]
    Compress {
        /// File to compress
        input: PathBuf,

        /// Output file (defaults to INPUT.huf)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Decompress a file
    #[command(alias = "d")]
    Decompress {
        /// Compressed file
        input: PathBuf,

        /// Output file (defaults to INPUT without .huf, or INPUT.out)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the frequency header of a compressed file
    #[command(alias = "i")]
    Info {
        /// Compressed file to inspect
        file: PathBuf,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,

        /// Include the code assigned to each symbol
        #[arg(long)]
        codes: bool,
    },

    /// Count the bits that differ between two files
    Compare {
        /// First file
        first: PathBuf,

        /// Second file
        second: PathBuf,
    },

    /// Compress and decompress in memory and check the result
    #[command(alias = "t")]
    Verify {
        /// File to check
        input: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logger::init(logger::level_for(cli.verbose, cli.quiet)) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    let result = match cli.command {
        Commands::Compress { input, output } => {
            cmd_compress(&input, output.as_deref(), cli.progress)
        }
        Commands::Decompress { input, output } => {
            cmd_decompress(&input, output.as_deref(), cli.progress)
        }
        Commands::Info { file, json, codes } => cmd_info(&file, json, codes),
        Commands::Compare { first, second } => cmd_compare(&first, &second, cli.progress),
        Commands::Verify { input } => cmd_verify(&input, cli.progress),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
