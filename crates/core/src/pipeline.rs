//! Orchestrates a full encode or decode: byte-level FEC, primary encoding,
//! parity/triple-repeat, in that fixed order (reversed for decode).

use serde::{Deserialize, Serialize};

use crate::codec::{base4, gc_balanced, huffman};
use crate::constraints::{find_max_homopolymer, gc_ratio};
use crate::descriptor::{Fec, Method, PipelineDescriptor};
use crate::error::{GeneCoderError, Result};
use crate::fec::{hamming, reed_solomon, triple_repeat};
use crate::metrics::Metrics;
use crate::nucleotide::Nucleotide;
use crate::parity::{self, ParityRule};
use crate::{log_error, log_stage};

/// Whether the active caller asked the pipeline to stop. Checked between
/// stages so a long-running encode of a large file can be interrupted
/// without corrupting partial output.
pub type CancelCheck<'a> = Option<&'a dyn Fn() -> bool>;

fn check_cancelled(cancel: CancelCheck) -> Result<()> {
    if let Some(is_cancelled) = cancel {
        if is_cancelled() {
            return Err(GeneCoderError::Cancelled);
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub method: Method,
    pub add_parity: bool,
    pub fec: Fec,
    pub fec_nsym: usize,
    pub gc_min: f64,
    pub gc_max: f64,
    pub max_homopolymer: usize,
    pub original_filename: Option<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            method: Method::Base4Direct,
            add_parity: false,
            fec: Fec::None,
            fec_nsym: 10,
            gc_min: 0.45,
            gc_max: 0.55,
            max_homopolymer: 3,
            original_filename: None,
        }
    }
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.gc_min) || !(0.0..=1.0).contains(&self.gc_max) {
            return Err(GeneCoderError::InvalidConfig(
                "gc_min and gc_max must be within [0.0, 1.0]".to_string(),
            ));
        }
        if self.gc_min > self.gc_max {
            return Err(GeneCoderError::InvalidConfig(
                "gc_min must not exceed gc_max".to_string(),
            ));
        }
        if self.max_homopolymer == 0 {
            return Err(GeneCoderError::InvalidConfig(
                "max_homopolymer must be at least 1".to_string(),
            ));
        }
        if self.fec == Fec::ReedSolomon && (self.fec_nsym == 0 || self.fec_nsym >= 255) {
            return Err(GeneCoderError::InvalidConfig(
                "fec_nsym must be in 1..=254 for reed_solomon".to_string(),
            ));
        }
        Ok(())
    }

    /// Hamming(7,4) already guards the byte stream; stacking the parity
    /// nucleotide on top would claim to detect corruption Hamming already
    /// corrects, so parity is silently dropped in that combination rather
    /// than rejected outright. Parity is also only defined over Base-4
    /// Direct and Huffman payloads; GC-Balanced already spends its own
    /// leading nucleotide as a tag and is out of scope for this check.
    fn effective_add_parity(&self) -> bool {
        self.add_parity
            && self.fec != Fec::Hamming74
            && matches!(self.method, Method::Base4Direct | Method::Huffman)
    }
}

pub fn encode(bytes: &[u8], cfg: &PipelineConfig) -> Result<(String, PipelineDescriptor, Metrics)> {
    encode_cancellable(bytes, cfg, None)
}

pub fn encode_cancellable(
    bytes: &[u8],
    cfg: &PipelineConfig,
    cancel: CancelCheck,
) -> Result<(String, PipelineDescriptor, Metrics)> {
    cfg.validate().map_err(|e| log_error!(e))?;
    check_cancelled(cancel)?;

    let (working, fec_padding_bits, fec_nsym) = log_stage!("fec_encode", {
        match cfg.fec {
            Fec::Hamming74 => {
                let (encoded, padding) = hamming::encode(bytes);
                (encoded, Some(padding), None)
            }
            Fec::ReedSolomon => {
                let encoded = reed_solomon::encode(bytes, cfg.fec_nsym)?;
                (encoded, None, Some(cfg.fec_nsym))
            }
            Fec::None | Fec::TripleRepeat => (bytes.to_vec(), None, None),
        }
    });

    check_cancelled(cancel)?;

    let (primary_seq, huffman_table, huffman_padding) = log_stage!("primary_encode", {
        match cfg.method {
            Method::Base4Direct => (base4::encode(&working), None, None),
            Method::Huffman => {
                let table = huffman::build_table(&working);
                let (seq, padding) = huffman::encode(&working, &table)?;
                (seq, Some(table), Some(padding))
            }
            Method::GcBalanced => {
                let params = gc_balanced::GcBalancedParams {
                    gc_min: cfg.gc_min,
                    gc_max: cfg.gc_max,
                    max_homopolymer: cfg.max_homopolymer,
                };
                (gc_balanced::encode(&working, &params), None, None)
            }
        }
    });

    let (gc_actual, max_homopolymer_actual) = if cfg.method == Method::GcBalanced {
        let payload = gc_balanced::strip_tag(&primary_seq)?;
        (
            Some(gc_ratio(payload)),
            Some(find_max_homopolymer(payload)),
        )
    } else {
        (None, None)
    };

    check_cancelled(cancel)?;

    let effective_add_parity = cfg.effective_add_parity();
    let mut seq = primary_seq;
    if effective_add_parity {
        parity::append(&mut seq, ParityRule::GcEvenAOddT);
    }
    if cfg.fec == Fec::TripleRepeat {
        seq = log_stage!("triple_repeat_encode", { triple_repeat::encode(&seq) });
    }

    let descriptor = PipelineDescriptor {
        method: cfg.method,
        original_filename: cfg.original_filename.clone(),
        huffman_table,
        huffman_padding,
        gc_min: (cfg.method == Method::GcBalanced).then_some(cfg.gc_min),
        gc_max: (cfg.method == Method::GcBalanced).then_some(cfg.gc_max),
        max_homopolymer: (cfg.method == Method::GcBalanced).then_some(cfg.max_homopolymer),
        add_parity: effective_add_parity,
        parity_rule: effective_add_parity.then_some(ParityRule::GcEvenAOddT),
        fec: cfg.fec,
        fec_padding_bits,
        fec_nsym,
    };

    let (compression_ratio, bits_per_nt) = Metrics::density(bytes.len(), seq.len());
    let metrics = Metrics {
        original_bytes: bytes.len(),
        dna_length: seq.len(),
        compression_ratio,
        bits_per_nt,
        gc_actual,
        max_homopolymer_actual,
        triple_repeat_corrected: 0,
        triple_repeat_uncorrectable: 0,
        hamming_corrected: 0,
        rs_corrected: 0,
        parity_mismatch: false,
    };

    let dna_string: String = seq.iter().map(|n| n.as_char()).collect();
    Ok((dna_string, descriptor, metrics))
}

pub fn decode(
    dna: &str,
    descriptor: &PipelineDescriptor,
) -> Result<(Vec<u8>, Metrics)> {
    decode_cancellable(dna, descriptor, None)
}

pub fn decode_cancellable(
    dna: &str,
    descriptor: &PipelineDescriptor,
    cancel: CancelCheck,
) -> Result<(Vec<u8>, Metrics)> {
    check_cancelled(cancel)?;

    let mut seq: Vec<Nucleotide> = dna
        .chars()
        .map(Nucleotide::from_char)
        .collect::<Result<_>>()?;
    let original_dna_length = seq.len();

    let mut triple_repeat_corrected = 0;
    let mut triple_repeat_uncorrectable = 0;
    if descriptor.fec == Fec::TripleRepeat {
        let (decoded, report) = log_stage!("triple_repeat_decode", { triple_repeat::decode(&seq) })?;
        seq = decoded;
        triple_repeat_corrected = report.corrected;
        triple_repeat_uncorrectable = report.uncorrectable;
    }

    check_cancelled(cancel)?;

    let mut parity_mismatch = false;
    if descriptor.add_parity {
        let rule = descriptor.parity_rule.ok_or_else(|| {
            GeneCoderError::InvalidHeader("add_parity is set but parity_rule is missing".to_string())
        })?;
        let (payload, mismatch) = parity::check_and_strip(&seq, rule)?;
        seq = payload;
        parity_mismatch = mismatch;
    }

    let (gc_actual, max_homopolymer_actual) = if descriptor.method == Method::GcBalanced {
        let payload = gc_balanced::strip_tag(&seq)?;
        (
            Some(gc_ratio(payload)),
            Some(find_max_homopolymer(payload)),
        )
    } else {
        (None, None)
    };

    let bytes_after_primary = log_stage!("primary_decode", {
        match descriptor.method {
            Method::Base4Direct => base4::decode(&seq),
            Method::Huffman => {
                let table = descriptor.huffman_table.as_ref().ok_or_else(|| {
                    GeneCoderError::InvalidHeader("huffman method is missing huffman_table".to_string())
                })?;
                let padding = descriptor.huffman_padding.ok_or_else(|| {
                    GeneCoderError::InvalidHeader(
                        "huffman method is missing huffman_padding".to_string(),
                    )
                })?;
                huffman::decode(&seq, table, padding)
            }
            Method::GcBalanced => gc_balanced::decode(&seq),
        }
    })
    .map_err(|e| log_error!(e))?;

    check_cancelled(cancel)?;

    let (final_bytes, hamming_corrected, rs_corrected) = log_stage!("fec_decode", {
        match descriptor.fec {
            Fec::Hamming74 => {
                let padding = descriptor.fec_padding_bits.ok_or_else(|| {
                    GeneCoderError::InvalidHeader(
                        "fec=hamming_7_4 is missing fec_padding_bits".to_string(),
                    )
                })?;
                let (decoded, report) = hamming::decode(&bytes_after_primary, padding)?;
                Ok::<_, GeneCoderError>((decoded, report.corrected, 0))
            }
            Fec::ReedSolomon => {
                let nsym = descriptor.fec_nsym.ok_or_else(|| {
                    GeneCoderError::InvalidHeader("fec=reed_solomon is missing fec_nsym".to_string())
                })?;
                let (decoded, corrected) = reed_solomon::decode(&bytes_after_primary, nsym)?;
                Ok((decoded, 0, corrected))
            }
            Fec::None | Fec::TripleRepeat => Ok((bytes_after_primary, 0, 0)),
        }
    })?;

    let (compression_ratio, bits_per_nt) =
        Metrics::density(final_bytes.len(), original_dna_length);
    let metrics = Metrics {
        original_bytes: final_bytes.len(),
        dna_length: original_dna_length,
        compression_ratio,
        bits_per_nt,
        gc_actual,
        max_homopolymer_actual,
        triple_repeat_corrected,
        triple_repeat_uncorrectable,
        hamming_corrected,
        rs_corrected,
        parity_mismatch,
    };

    Ok((final_bytes, metrics))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(cfg: PipelineConfig, data: &[u8]) {
        let (dna, descriptor, _) = encode(data, &cfg).unwrap();
        let (decoded, _) = decode(&dna, &descriptor).unwrap();
        assert_eq!(decoded, data);
    }

    #[test]
    fn base4_direct_roundtrips() {
        roundtrip(PipelineConfig::default(), b"the quick brown fox");
    }

    #[test]
    fn huffman_roundtrips() {
        let cfg = PipelineConfig {
            method: Method::Huffman,
            ..Default::default()
        };
        roundtrip(cfg, b"mississippi river");
    }

    #[test]
    fn gc_balanced_roundtrips() {
        let cfg = PipelineConfig {
            method: Method::GcBalanced,
            ..Default::default()
        };
        roundtrip(cfg, &[0u8, 0xFF, 0x42, 0x17, 0x80]);
    }

    #[test]
    fn triple_repeat_roundtrips() {
        let cfg = PipelineConfig {
            fec: Fec::TripleRepeat,
            ..Default::default()
        };
        roundtrip(cfg, b"redundant");
    }

    #[test]
    fn hamming_roundtrips_and_drops_parity() {
        let cfg = PipelineConfig {
            fec: Fec::Hamming74,
            add_parity: true,
            ..Default::default()
        };
        let (dna, descriptor, _) = encode(b"hamming", &cfg).unwrap();
        assert!(!descriptor.add_parity);
        let (decoded, _) = decode(&dna, &descriptor).unwrap();
        assert_eq!(decoded, b"hamming");
    }

    #[test]
    fn reed_solomon_roundtrips() {
        let cfg = PipelineConfig {
            fec: Fec::ReedSolomon,
            fec_nsym: 10,
            ..Default::default()
        };
        roundtrip(cfg, &vec![7u8; 400]);
    }

    #[test]
    fn parity_is_reported_on_corruption() {
        let cfg = PipelineConfig {
            add_parity: true,
            ..Default::default()
        };
        let (dna, descriptor, _) = encode(b"parity-check", &cfg).unwrap();
        let mut corrupted: Vec<char> = dna.chars().collect();
        corrupted[0] = if corrupted[0] == 'A' { 'C' } else { 'A' };
        let corrupted: String = corrupted.into_iter().collect();
        let (_, metrics) = decode(&corrupted, &descriptor).unwrap();
        assert!(metrics.parity_mismatch);
    }

    #[test]
    fn cancellation_is_observed_before_work_starts() {
        let cfg = PipelineConfig::default();
        let cancelled = || true;
        let result = encode_cancellable(b"data", &cfg, Some(&cancelled));
        assert!(matches!(result, Err(GeneCoderError::Cancelled)));
    }
}
