//! Base-4 Direct: each byte maps straight onto four nucleotides, MSB-first,
//! through the fixed mapping in [`crate::nucleotide`]. No compression, no
//! constraint enforcement — the baseline every other primary encoder is
//! measured against.

use crate::bitstream::{bits_to_bytes, bits_to_nucleotides, bytes_to_bits, nucleotides_to_bits};
use crate::error::{GeneCoderError, Result};
use crate::nucleotide::Nucleotide;

pub fn encode(bytes: &[u8]) -> Vec<Nucleotide> {
    bits_to_nucleotides(&bytes_to_bits(bytes))
}

pub fn decode(seq: &[Nucleotide]) -> Result<Vec<u8>> {
    if seq.len() % 4 != 0 {
        return Err(GeneCoderError::TruncatedPayload(format!(
            "base4 payload length {} is not a multiple of 4",
            seq.len()
        )));
    }
    Ok(bits_to_bytes(&nucleotides_to_bits(seq)))
}
