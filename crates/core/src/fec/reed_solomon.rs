//! Reed-Solomon FEC over 255-symbol blocks, using the `reed_solomon` crate
//! the same way the `reedsolo`-compatible convention does: split the input
//! into `k = 255 - nsym` byte data blocks, zero-pad a short final block,
//! and append `nsym` parity bytes per block.
//!
//! `reedsolo`-on-the-wire doesn't carry the original length out of band, so
//! a decoder that only sees zero-padded blocks can't tell padding from
//! data on the last block. Nothing else in the pipeline descriptor records
//! the pre-FEC length either, so this module prefixes the stream with a
//! 4-byte big-endian length of its own — an explicit extension of the
//! convention, not a claim of wire compatibility with it.

use reed_solomon::{Decoder, Encoder};

use crate::error::{GeneCoderError, Result};

const BLOCK_SIZE: usize = 255;
const LENGTH_PREFIX_BYTES: usize = 4;

fn data_block_size(nsym: usize) -> Result<usize> {
    if nsym == 0 || nsym >= BLOCK_SIZE {
        return Err(GeneCoderError::InvalidConfig(format!(
            "reed-solomon nsym must be in 1..={}, got {nsym}",
            BLOCK_SIZE - 1
        )));
    }
    Ok(BLOCK_SIZE - nsym)
}

pub fn encode(data: &[u8], nsym: usize) -> Result<Vec<u8>> {
    let k = data_block_size(nsym)?;
    let encoder = Encoder::new(nsym);

    let mut out = Vec::with_capacity(LENGTH_PREFIX_BYTES + data.len().div_ceil(k) * BLOCK_SIZE);
    out.extend_from_slice(&(data.len() as u32).to_be_bytes());

    if data.is_empty() {
        return Ok(out);
    }

    for chunk in data.chunks(k) {
        let mut block = chunk.to_vec();
        block.resize(k, 0);
        let codeword = encoder.encode(&block);
        out.extend_from_slice(&codeword);
    }

    Ok(out)
}

pub fn decode(data: &[u8], nsym: usize) -> Result<(Vec<u8>, usize)> {
    let k = data_block_size(nsym)?;
    if data.len() < LENGTH_PREFIX_BYTES {
        return Err(GeneCoderError::TruncatedPayload(
            "reed-solomon stream is missing its length prefix".to_string(),
        ));
    }
    let original_len =
        u32::from_be_bytes(data[..LENGTH_PREFIX_BYTES].try_into().unwrap()) as usize;
    let blocks = &data[LENGTH_PREFIX_BYTES..];

    if original_len == 0 {
        return Ok((Vec::new(), 0));
    }

    if blocks.is_empty() || blocks.len() % BLOCK_SIZE != 0 {
        return Err(GeneCoderError::TruncatedPayload(format!(
            "reed-solomon block stream length {} is not a multiple of {BLOCK_SIZE}",
            blocks.len()
        )));
    }

    let decoder = Decoder::new(nsym);
    let mut decoded = Vec::with_capacity(blocks.len() / BLOCK_SIZE * k);
    let mut total_corrected = 0usize;

    for block in blocks.chunks(BLOCK_SIZE) {
        match decoder.correct_err_count(block, None) {
            Ok((corrected, err_count)) => {
                decoded.extend_from_slice(&corrected[..k]);
                total_corrected += err_count;
            }
            Err(e) => {
                return Err(GeneCoderError::FecFailure(format!("{e:?}")));
            }
        }
    }

    decoded.truncate(original_len);
    Ok((decoded, total_corrected))
}

#[cfg(test)]
mod tests {
    use super::*;

    const NSYM: usize = 10;

    #[test]
    fn roundtrips_without_errors() {
        let data = b"a reed-solomon payload spanning more than one block ".repeat(10);
        let encoded = encode(&data, NSYM).unwrap();
        let (decoded, corrected) = decode(&encoded, NSYM).unwrap();
        assert_eq!(decoded, data);
        assert_eq!(corrected, 0);
    }

    #[test]
    fn corrects_symbol_errors_within_budget() {
        let data = vec![0x5Au8; 300];
        let mut encoded = encode(&data, NSYM).unwrap();
        encoded[4] ^= 0xFF;
        encoded[5] ^= 0x0F;
        let (decoded, corrected) = decode(&encoded, NSYM).unwrap();
        assert_eq!(decoded, data);
        assert!(corrected >= 1);
    }

    #[test]
    fn empty_input_roundtrips() {
        let encoded = encode(&[], NSYM).unwrap();
        let (decoded, corrected) = decode(&encoded, NSYM).unwrap();
        assert!(decoded.is_empty());
        assert_eq!(corrected, 0);
    }

    #[test]
    fn rejects_invalid_nsym() {
        assert!(encode(b"x", 0).is_err());
        assert!(encode(b"x", 255).is_err());
    }
}
