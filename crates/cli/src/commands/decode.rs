use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use console::style;
use genecoder_core::fasta;
use genecoder_core::pipeline;

use crate::create_spinner;

pub fn run(input: PathBuf, output: PathBuf) -> Result<()> {
    let spinner = create_spinner(&format!("Reading {}", input.display()));
    let contents = fs::read_to_string(&input)?;
    let (dna, descriptor) = fasta::from_fasta(&contents)?;
    spinner.finish_and_clear();

    let spinner = create_spinner("Decoding");
    let (bytes, metrics) = pipeline::decode(&dna, &descriptor)?;
    spinner.finish_and_clear();

    fs::write(&output, &bytes)?;

    println!(
        "{} {} nucleotides -> {} bytes",
        style("decoded").green().bold(),
        metrics.dna_length,
        bytes.len()
    );
    if metrics.parity_mismatch {
        println!("  {}", style("warning: parity mismatch detected").yellow());
    }
    if metrics.triple_repeat_corrected > 0 || metrics.triple_repeat_uncorrectable > 0 {
        println!(
            "  triple-repeat: {} corrected, {} uncorrectable",
            metrics.triple_repeat_corrected, metrics.triple_repeat_uncorrectable
        );
    }
    if metrics.hamming_corrected > 0 {
        println!("  hamming: {} codewords corrected", metrics.hamming_corrected);
    }
    if metrics.rs_corrected > 0 {
        println!("  reed-solomon: {} symbols corrected", metrics.rs_corrected);
    }
    println!("  wrote {}", output.display());

    Ok(())
}
