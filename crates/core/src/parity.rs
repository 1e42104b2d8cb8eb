//! The Parity detection layer: a single trailing nucleotide that lets a
//! decoder notice (but not correct) a corrupted sequence. Mutually
//! exclusive with Hamming(7,4) in a pipeline — both claim the role of
//! "the" redundancy check on top of the primary encoding, and running both
//! would double-count corruption that only one of them can act on.

use crate::error::{GeneCoderError, Result};
use crate::nucleotide::Nucleotide;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParityRule {
    /// Even total GC count -> `A`, odd -> `T`.
    GcEvenAOddT,
}

impl ParityRule {
    pub fn as_str(self) -> &'static str {
        match self {
            ParityRule::GcEvenAOddT => "gc_even_a_odd_t",
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "gc_even_a_odd_t" => Ok(ParityRule::GcEvenAOddT),
            other => Err(GeneCoderError::InvalidHeader(format!(
                "unknown parity_rule {other:?}"
            ))),
        }
    }
}

fn compute(seq: &[Nucleotide], rule: ParityRule) -> Nucleotide {
    match rule {
        ParityRule::GcEvenAOddT => {
            let gc_count = seq.iter().filter(|n| n.is_gc()).count();
            if gc_count % 2 == 0 {
                Nucleotide::A
            } else {
                Nucleotide::T
            }
        }
    }
}

/// Appends the parity nucleotide for `seq` under `rule`.
pub fn append(seq: &mut Vec<Nucleotide>, rule: ParityRule) {
    let nt = compute(seq, rule);
    seq.push(nt);
}

/// Strips the trailing parity nucleotide and reports whether it matched
/// what the remaining payload recomputes to (`true` = mismatch detected).
pub fn check_and_strip(seq: &[Nucleotide], rule: ParityRule) -> Result<(Vec<Nucleotide>, bool)> {
    let (&observed, payload) = seq.split_last().ok_or_else(|| {
        GeneCoderError::TruncatedPayload("payload is missing its parity nucleotide".to_string())
    })?;
    let expected = compute(payload, rule);
    Ok((payload.to_vec(), observed != expected))
}

#[cfg(test)]
mod tests {
    use super::*;
    use Nucleotide::*;

    #[test]
    fn even_gc_count_is_tagged_a() {
        let seq = vec![C, G]; // 2 GC bases, even
        let mut seq = seq;
        append(&mut seq, ParityRule::GcEvenAOddT);
        assert_eq!(*seq.last().unwrap(), A);
    }

    #[test]
    fn odd_gc_count_is_tagged_t() {
        let mut seq = vec![C, A];
        append(&mut seq, ParityRule::GcEvenAOddT);
        assert_eq!(*seq.last().unwrap(), T);
    }

    #[test]
    fn detects_mismatch_on_corruption() {
        let mut seq = vec![C, G, A, T];
        append(&mut seq, ParityRule::GcEvenAOddT);
        seq[0] = A; // flip a C to A, changing the GC parity
        let (_, mismatch) = check_and_strip(&seq, ParityRule::GcEvenAOddT).unwrap();
        assert!(mismatch);
    }

    #[test]
    fn rejects_unknown_rule_name() {
        assert!(ParityRule::parse("xor_checksum").is_err());
    }
}
