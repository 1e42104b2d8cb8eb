//! CLI pour GeneCoder

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};

mod commands;

use commands::{decode, encode, info, stream_decode, stream_encode};

#[derive(Parser)]
#[command(name = "genecoder")]
#[command(about = "Encode and decode files as DNA sequences", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Niveau de verbosité (répéter pour plus de détails)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a file into a FASTA-formatted DNA sequence
    Encode {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long)]
        output: PathBuf,

        #[arg(short, long, value_enum, default_value = "base4-direct")]
        method: MethodArg,

        #[arg(short, long, value_enum, default_value = "none")]
        fec: FecArg,

        /// Number of Reed-Solomon parity symbols per 255-byte block
        #[arg(long, default_value = "10")]
        fec_nsym: usize,

        /// Append a GC-parity detection nucleotide
        #[arg(long)]
        add_parity: bool,

        #[arg(long, default_value = "0.45")]
        gc_min: f64,

        #[arg(long, default_value = "0.55")]
        gc_max: f64,

        #[arg(long, default_value = "3")]
        max_homopolymer: usize,
    },

    /// Decode a FASTA-formatted DNA sequence back into its original bytes
    Decode {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long)]
        output: PathBuf,
    },

    /// Encode a large file in bounded memory (Base-4 Direct only, no FEC)
    StreamEncode {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long)]
        output: PathBuf,

        #[arg(long, default_value = "65536")]
        chunk_bytes: usize,
    },

    /// Decode a stream-encoded FASTA file in bounded memory
    StreamDecode {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long)]
        output: PathBuf,
    },

    /// Print the pipeline descriptor and density metrics for a FASTA file
    Info {
        #[arg(short, long)]
        input: PathBuf,
    },
}

#[derive(clap::ValueEnum, Clone, Copy)]
pub enum MethodArg {
    Base4Direct,
    Huffman,
    GcBalanced,
}

#[derive(clap::ValueEnum, Clone, Copy)]
pub enum FecArg {
    None,
    TripleRepeat,
    Hamming74,
    ReedSolomon,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    genecoder_core::logging::init_logging();

    match cli.command {
        Commands::Encode {
            input,
            output,
            method,
            fec,
            fec_nsym,
            add_parity,
            gc_min,
            gc_max,
            max_homopolymer,
        } => encode::run(
            input,
            output,
            method,
            fec,
            fec_nsym,
            add_parity,
            gc_min,
            gc_max,
            max_homopolymer,
        ),
        Commands::Decode { input, output } => decode::run(input, output),
        Commands::StreamEncode {
            input,
            output,
            chunk_bytes,
        } => stream_encode::run(input, output, chunk_bytes),
        Commands::StreamDecode { input, output } => stream_decode::run(input, output),
        Commands::Info { input } => info::run(input),
    }
}

/// Crée une barre de progression
pub fn create_progress_bar(length: u64, msg: &str) -> ProgressBar {
    let pb = ProgressBar::new(length);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("##-"),
    );
    pb.set_message(msg.to_string());
    pb
}

/// Crée une barre de progression spinner
pub fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap(),
    );
    pb.set_message(msg.to_string());
    pb
}
