use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use console::style;
use genecoder_core::descriptor::{Fec, Method};
use genecoder_core::fasta;
use genecoder_core::pipeline::{self, PipelineConfig};

use crate::{create_spinner, FecArg, MethodArg};

impl From<MethodArg> for Method {
    fn from(value: MethodArg) -> Self {
        match value {
            MethodArg::Base4Direct => Method::Base4Direct,
            MethodArg::Huffman => Method::Huffman,
            MethodArg::GcBalanced => Method::GcBalanced,
        }
    }
}

impl From<FecArg> for Fec {
    fn from(value: FecArg) -> Self {
        match value {
            FecArg::None => Fec::None,
            FecArg::TripleRepeat => Fec::TripleRepeat,
            FecArg::Hamming74 => Fec::Hamming74,
            FecArg::ReedSolomon => Fec::ReedSolomon,
        }
    }
}

#[allow(clippy::too_many_arguments)]
pub fn run(
    input: PathBuf,
    output: PathBuf,
    method: MethodArg,
    fec: FecArg,
    fec_nsym: usize,
    add_parity: bool,
    gc_min: f64,
    gc_max: f64,
    max_homopolymer: usize,
) -> Result<()> {
    let spinner = create_spinner(&format!("Reading {}", input.display()));
    let bytes = fs::read(&input)?;
    spinner.finish_and_clear();

    let cfg = PipelineConfig {
        method: method.into(),
        add_parity,
        fec: fec.into(),
        fec_nsym,
        gc_min,
        gc_max,
        max_homopolymer,
        original_filename: input
            .file_name()
            .map(|name| name.to_string_lossy().into_owned()),
    };

    let spinner = create_spinner("Encoding");
    let (dna, descriptor, metrics) = pipeline::encode(&bytes, &cfg)?;
    spinner.finish_and_clear();

    fs::write(&output, fasta::to_fasta(&dna, &descriptor))?;

    println!(
        "{} {} bytes -> {} nucleotides ({:.2} bits/nt, {:.2}x compression)",
        style("encoded").green().bold(),
        metrics.original_bytes,
        metrics.dna_length,
        metrics.bits_per_nt,
        metrics.compression_ratio,
    );
    if let Some(gc) = metrics.gc_actual {
        println!("  GC ratio: {:.3}", gc);
    }
    println!("  wrote {}", output.display());

    Ok(())
}
