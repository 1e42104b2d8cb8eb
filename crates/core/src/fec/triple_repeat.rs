//! Triple-Repeat FEC: each nucleotide is written three times; decoding
//! takes a majority vote per triplet.

use crate::error::{GeneCoderError, Result};
use crate::nucleotide::Nucleotide;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TripleRepeatReport {
    pub corrected: usize,
    pub uncorrectable: usize,
}

pub fn encode(seq: &[Nucleotide]) -> Vec<Nucleotide> {
    let mut out = Vec::with_capacity(seq.len() * 3);
    for &nt in seq {
        out.push(nt);
        out.push(nt);
        out.push(nt);
    }
    out
}

pub fn decode(seq: &[Nucleotide]) -> Result<(Vec<Nucleotide>, TripleRepeatReport)> {
    if seq.len() % 3 != 0 {
        return Err(GeneCoderError::TruncatedPayload(format!(
            "triple-repeat payload length {} is not a multiple of 3",
            seq.len()
        )));
    }

    let mut out = Vec::with_capacity(seq.len() / 3);
    let mut report = TripleRepeatReport::default();

    for triplet in seq.chunks(3) {
        let (a, b, c) = (triplet[0], triplet[1], triplet[2]);
        if a == b && b == c {
            out.push(a);
        } else if a == b || a == c {
            out.push(a);
            report.corrected += 1;
        } else if b == c {
            out.push(b);
            report.corrected += 1;
        } else {
            // All three disagree: no majority, keep the first and flag it.
            out.push(a);
            report.uncorrectable += 1;
        }
    }

    Ok((out, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use Nucleotide::*;

    #[test]
    fn unanimous_triplet_needs_no_correction() {
        let (out, report) = decode(&[A, A, A]).unwrap();
        assert_eq!(out, vec![A]);
        assert_eq!(report.corrected, 0);
    }

    #[test]
    fn single_flip_is_corrected_by_majority() {
        let (out, report) = decode(&[C, A, A]).unwrap();
        assert_eq!(out, vec![A]);
        assert_eq!(report.corrected, 1);
        assert_eq!(report.uncorrectable, 0);
    }

    #[test]
    fn all_disagree_is_uncorrectable() {
        let (out, report) = decode(&[A, C, G]).unwrap();
        assert_eq!(out, vec![A]);
        assert_eq!(report.uncorrectable, 1);
    }

    #[test]
    fn rejects_non_multiple_of_three() {
        assert!(decode(&[A, A]).is_err());
    }
}
