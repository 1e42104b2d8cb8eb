//! FASTA container: a single `>`-prefixed header carrying the pipeline
//! descriptor, followed by the nucleotide sequence wrapped at 80 columns.

use crate::descriptor::PipelineDescriptor;
use crate::error::{GeneCoderError, Result};
use crate::nucleotide::Nucleotide;

pub const LINE_WIDTH: usize = 80;

pub fn to_fasta(dna: &str, descriptor: &PipelineDescriptor) -> String {
    let mut out = format!(">{}\n", descriptor.to_header_tokens());
    let upper = dna.to_ascii_uppercase();
    let bytes = upper.as_bytes();
    for chunk in bytes.chunks(LINE_WIDTH) {
        out.push_str(std::str::from_utf8(chunk).expect("ASCII nucleotide letters"));
        out.push('\n');
    }
    out
}

pub fn from_fasta(input: &str) -> Result<(String, PipelineDescriptor)> {
    let mut lines = input.lines();
    let header_line = lines
        .next()
        .ok_or_else(|| GeneCoderError::InvalidHeader("input is empty".to_string()))?;
    let header = header_line
        .strip_prefix('>')
        .ok_or_else(|| GeneCoderError::InvalidHeader("record is missing '>'".to_string()))?;
    let descriptor = PipelineDescriptor::from_header_tokens(header)?;

    let mut sequence = String::new();
    for line in lines {
        if line.starts_with('>') {
            break;
        }
        sequence.push_str(line.trim());
    }

    // Validate the alphabet eagerly so callers get InvalidAlphabet here
    // rather than deeper in the pipeline.
    for c in sequence.chars() {
        Nucleotide::from_char(c)?;
    }

    Ok((sequence.to_ascii_uppercase(), descriptor))
}
