//! Density and correction counters reported alongside every encode/decode.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub original_bytes: usize,
    pub dna_length: usize,
    pub compression_ratio: f64,
    pub bits_per_nt: f64,
    pub gc_actual: Option<f64>,
    pub max_homopolymer_actual: Option<usize>,
    pub triple_repeat_corrected: usize,
    pub triple_repeat_uncorrectable: usize,
    pub hamming_corrected: usize,
    pub rs_corrected: usize,
    pub parity_mismatch: bool,
}

impl Metrics {
    pub fn density(original_bytes: usize, dna_length: usize) -> (f64, f64) {
        if dna_length == 0 {
            return (0.0, 0.0);
        }
        let compression_ratio = original_bytes as f64 / (dna_length as f64 * 0.25);
        let bits_per_nt = (original_bytes * 8) as f64 / dna_length as f64;
        (compression_ratio, bits_per_nt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base4_direct_has_two_bits_per_nucleotide() {
        let (_, bits_per_nt) = Metrics::density(1, 4);
        assert_eq!(bits_per_nt, 2.0);
    }

    #[test]
    fn empty_sequence_has_zero_density() {
        assert_eq!(Metrics::density(0, 0), (0.0, 0.0));
    }
}
