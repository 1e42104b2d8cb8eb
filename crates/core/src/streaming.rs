//! Restricted streaming variant: Base-4 Direct only, no FEC, no parity.
//! Trades every feature that needs to see the whole payload at once (a
//! Huffman table built from global frequencies, a GC search over the
//! whole sequence, Reed-Solomon blocks) for O(chunk) memory regardless of
//! input size.

use std::io::{BufRead, Read, Write};

use crate::codec::base4;
use crate::descriptor::{Fec, Method, PipelineDescriptor};
use crate::error::{GeneCoderError, Result};
use crate::fasta::LINE_WIDTH;
use crate::nucleotide::Nucleotide;
use crate::pipeline::{CancelCheck, PipelineConfig};

#[derive(Debug, Clone, Copy)]
pub struct StreamConfig {
    pub chunk_bytes: usize,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self { chunk_bytes: 64 * 1024 }
    }
}

fn restricted_descriptor(original_filename: Option<String>) -> PipelineDescriptor {
    PipelineDescriptor {
        method: Method::Base4Direct,
        original_filename,
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
    }
}

fn require_streamable(cfg: &PipelineConfig) -> Result<()> {
    if cfg.method != Method::Base4Direct || cfg.fec != Fec::None || cfg.add_parity {
        return Err(GeneCoderError::UnsupportedForStreaming(
            "streaming only supports method=base4_direct, fec=none, add_parity=false".to_string(),
        ));
    }
    Ok(())
}

fn require_streamable_descriptor(descriptor: &PipelineDescriptor) -> Result<()> {
    if descriptor.method != Method::Base4Direct || descriptor.fec != Fec::None || descriptor.add_parity
    {
        return Err(GeneCoderError::UnsupportedForStreaming(
            "streaming only supports method=base4_direct, fec=none, add_parity=false".to_string(),
        ));
    }
    Ok(())
}

/// Streams `reader` through Base-4 Direct into FASTA-formatted `writer`,
/// wrapping at [`LINE_WIDTH`] across chunk boundaries. Memory use is
/// bounded by `stream_cfg.chunk_bytes`, not by the input size.
pub fn encode_stream<R: Read, W: Write>(
    mut reader: R,
    mut writer: W,
    cfg: &PipelineConfig,
    stream_cfg: &StreamConfig,
    cancel: CancelCheck,
) -> Result<PipelineDescriptor> {
    require_streamable(cfg)?;
    let descriptor = restricted_descriptor(cfg.original_filename.clone());
    writer.write_all(format!(">{}\n", descriptor.to_header_tokens()).as_bytes())?;

    let mut buf = vec![0u8; stream_cfg.chunk_bytes.max(1)];
    let mut column = 0usize;
    loop {
        if let Some(is_cancelled) = cancel {
            if is_cancelled() {
                return Err(GeneCoderError::Cancelled);
            }
        }
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        for nt in base4::encode(&buf[..n]) {
            writer.write_all(&[nt.as_char() as u8])?;
            column += 1;
            if column == LINE_WIDTH {
                writer.write_all(b"\n")?;
                column = 0;
            }
        }
    }
    if column > 0 {
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(descriptor)
}

/// Streams a FASTA record produced by [`encode_stream`] back to bytes.
/// `reader` must start at the `>` header line.
pub fn decode_stream<R: BufRead, W: Write>(
    mut reader: R,
    mut writer: W,
    cancel: CancelCheck,
) -> Result<()> {
    let mut header_line = String::new();
    reader.read_line(&mut header_line)?;
    let header = header_line
        .trim_end()
        .strip_prefix('>')
        .ok_or_else(|| GeneCoderError::InvalidHeader("record is missing '>'".to_string()))?;
    let descriptor = PipelineDescriptor::from_header_tokens(header)?;
    require_streamable_descriptor(&descriptor)?;

    let mut pending = String::with_capacity(4);
    let mut line = String::new();
    loop {
        if let Some(is_cancelled) = cancel {
            if is_cancelled() {
                return Err(GeneCoderError::Cancelled);
            }
        }
        line.clear();
        let n = reader.read_line(&mut line)?;
        if n == 0 {
            break;
        }
        let trimmed = line.trim_end();
        if trimmed.starts_with('>') {
            break;
        }
        for c in trimmed.chars() {
            pending.push(c);
            if pending.len() == 4 {
                let nts: Vec<Nucleotide> = pending
                    .chars()
                    .map(Nucleotide::from_char)
                    .collect::<Result<_>>()?;
                writer.write_all(&base4::decode(&nts)?)?;
                pending.clear();
            }
        }
    }

    if !pending.is_empty() {
        return Err(GeneCoderError::TruncatedPayload(
            "streamed payload is not aligned to 4-nucleotide groups".to_string(),
        ));
    }
    writer.flush()?;
    Ok(())
}
