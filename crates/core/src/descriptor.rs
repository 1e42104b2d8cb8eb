//! The pipeline descriptor: every choice made while encoding, serialized
//! as `key=value` tokens in the FASTA header so a decoder never has to
//! guess which stages ran.

use std::collections::BTreeMap;

use crate::error::{GeneCoderError, Result};
use crate::parity::ParityRule;
use serde::{Deserialize, Serialize};

pub type HuffmanTable = BTreeMap<u8, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Method {
    Base4Direct,
    Huffman,
    GcBalanced,
}

impl Method {
    fn as_str(self) -> &'static str {
        match self {
            Method::Base4Direct => "base4_direct",
            Method::Huffman => "huffman",
            Method::GcBalanced => "gc_balanced",
        }
    }

    fn parse(s: &str) -> Result<Self> {
        match s {
            "base4_direct" => Ok(Method::Base4Direct),
            "huffman" => Ok(Method::Huffman),
            "gc_balanced" => Ok(Method::GcBalanced),
            other => Err(GeneCoderError::InvalidHeader(format!(
                "unknown method {other:?}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Fec {
    None,
    TripleRepeat,
    Hamming74,
    ReedSolomon,
}

impl Fec {
    fn as_str(self) -> &'static str {
        match self {
            Fec::None => "none",
            Fec::TripleRepeat => "triple_repeat",
            Fec::Hamming74 => "hamming_7_4",
            Fec::ReedSolomon => "reed_solomon",
        }
    }

    fn parse(s: &str) -> Result<Self> {
        match s {
            "none" => Ok(Fec::None),
            "triple_repeat" => Ok(Fec::TripleRepeat),
            "hamming_7_4" => Ok(Fec::Hamming74),
            "reed_solomon" => Ok(Fec::ReedSolomon),
            other => Err(GeneCoderError::InvalidHeader(format!(
                "unknown fec {other:?}"
            ))),
        }
    }
}

/// Every field a decoder might need to reverse a pipeline run. Optional
/// fields are required or forbidden depending on `method` and `fec`;
/// [`PipelineDescriptor::from_header_tokens`] enforces that.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineDescriptor {
    pub method: Method,
    pub original_filename: Option<String>,
    pub huffman_table: Option<HuffmanTable>,
    pub huffman_padding: Option<u8>,
    pub gc_min: Option<f64>,
    pub gc_max: Option<f64>,
    pub max_homopolymer: Option<usize>,
    pub add_parity: bool,
    pub parity_rule: Option<ParityRule>,
    pub fec: Fec,
    pub fec_padding_bits: Option<u8>,
    pub fec_nsym: Option<usize>,
}

impl PipelineDescriptor {
    pub fn to_header_tokens(&self) -> String {
        let mut tokens = Vec::new();
        tokens.push(format!("method={}", self.method.as_str()));
        if let Some(name) = &self.original_filename {
            tokens.push(format!("original_filename={}", quote(name)));
        }
        if let Some(table) = &self.huffman_table {
            tokens.push(format!(
                "huffman_table={}",
                serde_json::to_string(table).expect("BTreeMap<u8,String> always serializes")
            ));
        }
        if let Some(padding) = self.huffman_padding {
            tokens.push(format!("huffman_padding={padding}"));
        }
        if let Some(gc_min) = self.gc_min {
            tokens.push(format!("gc_min={gc_min}"));
        }
        if let Some(gc_max) = self.gc_max {
            tokens.push(format!("gc_max={gc_max}"));
        }
        if let Some(max_homopolymer) = self.max_homopolymer {
            tokens.push(format!("max_homopolymer={max_homopolymer}"));
        }
        tokens.push(format!("add_parity={}", self.add_parity));
        if let Some(rule) = self.parity_rule {
            tokens.push(format!("parity_rule={}", rule.as_str()));
        }
        tokens.push(format!("fec={}", self.fec.as_str()));
        if let Some(padding) = self.fec_padding_bits {
            tokens.push(format!("fec_padding_bits={padding}"));
        }
        if let Some(nsym) = self.fec_nsym {
            tokens.push(format!("fec_nsym={nsym}"));
        }
        tokens.join(" ")
    }

    pub fn from_header_tokens(s: &str) -> Result<Self> {
        let fields = tokenize(s)?;
        let get = |key: &str| fields.get(key).map(|v| v.as_str());

        let method = Method::parse(get("method").ok_or_else(|| {
            GeneCoderError::InvalidHeader("missing required field 'method'".to_string())
        })?)?;

        let original_filename = get("original_filename").map(unquote).transpose()?;

        let (huffman_table, huffman_padding) = match method {
            Method::Huffman => {
                let table_json = get("huffman_table").ok_or_else(|| {
                    GeneCoderError::InvalidHeader(
                        "huffman method requires 'huffman_table'".to_string(),
                    )
                })?;
                let table: HuffmanTable = serde_json::from_str(table_json)?;
                let padding = get("huffman_padding")
                    .ok_or_else(|| {
                        GeneCoderError::InvalidHeader(
                            "huffman method requires 'huffman_padding'".to_string(),
                        )
                    })?
                    .parse::<u8>()
                    .map_err(|e| GeneCoderError::InvalidHeader(e.to_string()))?;
                (Some(table), Some(padding))
            }
            _ => (None, None),
        };

        let (gc_min, gc_max, max_homopolymer) = match method {
            Method::GcBalanced => {
                let parse_f64 = |key: &str| -> Result<f64> {
                    get(key)
                        .ok_or_else(|| {
                            GeneCoderError::InvalidHeader(format!(
                                "gc_balanced method requires '{key}'"
                            ))
                        })?
                        .parse::<f64>()
                        .map_err(|e| GeneCoderError::InvalidHeader(e.to_string()))
                };
                let gc_min = parse_f64("gc_min")?;
                let gc_max = parse_f64("gc_max")?;
                let max_homopolymer = get("max_homopolymer")
                    .ok_or_else(|| {
                        GeneCoderError::InvalidHeader(
                            "gc_balanced method requires 'max_homopolymer'".to_string(),
                        )
                    })?
                    .parse::<usize>()
                    .map_err(|e| GeneCoderError::InvalidHeader(e.to_string()))?;
                (Some(gc_min), Some(gc_max), Some(max_homopolymer))
            }
            _ => (None, None, None),
        };

        let add_parity = get("add_parity")
            .ok_or_else(|| {
                GeneCoderError::InvalidHeader("missing required field 'add_parity'".to_string())
            })?
            .parse::<bool>()
            .map_err(|e| GeneCoderError::InvalidHeader(e.to_string()))?;

        let fec = Fec::parse(get("fec").ok_or_else(|| {
            GeneCoderError::InvalidHeader("missing required field 'fec'".to_string())
        })?)?;

        if add_parity && fec == Fec::Hamming74 {
            return Err(GeneCoderError::InvalidHeader(
                "add_parity and fec=hamming_7_4 are mutually exclusive".to_string(),
            ));
        }

        let parity_rule = if add_parity {
            Some(ParityRule::parse(get("parity_rule").ok_or_else(|| {
                GeneCoderError::InvalidHeader("add_parity requires 'parity_rule'".to_string())
            })?)?)
        } else {
            None
        };

        let fec_padding_bits = match fec {
            Fec::Hamming74 => Some(
                get("fec_padding_bits")
                    .ok_or_else(|| {
                        GeneCoderError::InvalidHeader(
                            "fec=hamming_7_4 requires 'fec_padding_bits'".to_string(),
                        )
                    })?
                    .parse::<u8>()
                    .map_err(|e| GeneCoderError::InvalidHeader(e.to_string()))?,
            ),
            _ => None,
        };

        let fec_nsym = match fec {
            Fec::ReedSolomon => Some(
                get("fec_nsym")
                    .ok_or_else(|| {
                        GeneCoderError::InvalidHeader(
                            "fec=reed_solomon requires 'fec_nsym'".to_string(),
                        )
                    })?
                    .parse::<usize>()
                    .map_err(|e| GeneCoderError::InvalidHeader(e.to_string()))?,
            ),
            _ => None,
        };

        Ok(Self {
            method,
            original_filename,
            huffman_table,
            huffman_padding,
            gc_min,
            gc_max,
            max_homopolymer,
            add_parity,
            parity_rule,
            fec,
            fec_padding_bits,
            fec_nsym,
        })
    }
}

fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

fn unquote(s: &str) -> Result<String> {
    let inner = s
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .ok_or_else(|| GeneCoderError::InvalidHeader(format!("expected quoted value, got {s:?}")))?;
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('\\') => out.push('\\'),
                Some('"') => out.push('"'),
                Some(other) => out.push(other),
                None => {
                    return Err(GeneCoderError::InvalidHeader(
                        "dangling escape in quoted value".to_string(),
                    ))
                }
            }
        } else {
            out.push(c);
        }
    }
    Ok(out)
}

/// Splits a header line into `key=value` tokens, respecting double quotes
/// so a quoted value may contain whitespace. Unknown keys are kept (tolerant
/// of forward-compatible fields) but never consulted.
fn tokenize(s: &str) -> Result<BTreeMap<String, String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    for c in s.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                current.push(c);
            }
            c if c.is_whitespace() && !in_quotes => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }

    let mut fields = BTreeMap::new();
    for token in tokens {
        let (key, value) = token
            .split_once('=')
            .ok_or_else(|| GeneCoderError::InvalidHeader(format!("malformed token {token:?}")))?;
        fields.insert(key.to_string(), value.to_string());
    }
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base4_direct_roundtrips_through_header_tokens() {
        let descriptor = PipelineDescriptor {
            method: Method::Base4Direct,
            original_filename: Some("payload.bin".to_string()),
            huffman_table: None,
            huffman_padding: None,
            gc_min: None,
            gc_max: None,
            max_homopolymer: None,
            add_parity: false,
            parity_rule: None,
            fec: Fec::None,
            fec_padding_bits: None,
            fec_nsym: None,
        };
        let tokens = descriptor.to_header_tokens();
        let parsed = PipelineDescriptor::from_header_tokens(&tokens).unwrap();
        assert_eq!(parsed, descriptor);
    }

    #[test]
    fn quoted_filename_with_spaces_survives_roundtrip() {
        let descriptor = PipelineDescriptor {
            method: Method::Base4Direct,
            original_filename: Some("my file.bin".to_string()),
            huffman_table: None,
            huffman_padding: None,
            gc_min: None,
            gc_max: None,
            max_homopolymer: None,
            add_parity: false,
            parity_rule: None,
            fec: Fec::None,
            fec_padding_bits: None,
            fec_nsym: None,
        };
        let tokens = descriptor.to_header_tokens();
        let parsed = PipelineDescriptor::from_header_tokens(&tokens).unwrap();
        assert_eq!(
            parsed.original_filename.as_deref(),
            Some("my file.bin")
        );
    }

    #[test]
    fn huffman_without_table_is_rejected() {
        let tokens = "method=huffman add_parity=false fec=none";
        assert!(PipelineDescriptor::from_header_tokens(tokens).is_err());
    }

    #[test]
    fn parity_and_hamming_together_is_rejected() {
        let tokens =
            "method=base4_direct add_parity=true parity_rule=gc_even_a_odd_t fec=hamming_7_4 fec_padding_bits=3";
        assert!(PipelineDescriptor::from_header_tokens(tokens).is_err());
    }

    #[test]
    fn unknown_keys_are_tolerated() {
        let tokens = "method=base4_direct add_parity=false fec=none future_field=42";
        assert!(PipelineDescriptor::from_header_tokens(tokens).is_ok());
    }
}
