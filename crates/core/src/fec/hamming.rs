//! Hamming(7,4) FEC applied to the raw byte stream before any primary
//! encoding: every 4 data bits become a 7-bit codeword carrying 3 parity
//! bits, single-bit errors within a codeword are corrected on decode.

use crate::bitstream::{bits_to_bytes, bytes_to_bits};
use crate::error::{GeneCoderError, Result};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HammingReport {
    pub corrected: usize,
}

/// Encodes `bytes`, returning the codeword bytes and the number of zero
/// bits padded onto the final codeword to reach byte alignment.
pub fn encode(bytes: &[u8]) -> (Vec<u8>, u8) {
    let bits = bytes_to_bits(bytes);
    let mut out_bits = Vec::with_capacity(bits.len() / 4 * 7);

    for nibble in bits.chunks(4) {
        let d1 = nibble[0];
        let d2 = nibble[1];
        let d3 = nibble[2];
        let d4 = nibble[3];
        let p1 = d1 ^ d2 ^ d4;
        let p2 = d1 ^ d3 ^ d4;
        let p4 = d2 ^ d3 ^ d4;
        out_bits.extend([p1, p2, d1, p4, d2, d3, d4]);
    }

    let padding = ((8 - out_bits.len() % 8) % 8) as u8;
    out_bits.extend(std::iter::repeat(false).take(padding as usize));

    (bits_to_bytes(&out_bits), padding)
}

/// Decodes `bytes`, stripping `padding_bits` trailing zero bits first and
/// correcting any single-bit error found in each 7-bit codeword.
pub fn decode(bytes: &[u8], padding_bits: u8) -> Result<(Vec<u8>, HammingReport)> {
    let mut bits = bytes_to_bits(bytes);
    let padding_bits = padding_bits as usize;
    if padding_bits > bits.len() {
        return Err(GeneCoderError::TruncatedPayload(
            "hamming padding exceeds payload length".to_string(),
        ));
    }
    bits.truncate(bits.len() - padding_bits);

    if bits.len() % 7 != 0 {
        return Err(GeneCoderError::TruncatedPayload(format!(
            "hamming payload length {} is not a multiple of 7",
            bits.len()
        )));
    }

    let mut report = HammingReport::default();
    let mut data_bits = Vec::with_capacity(bits.len() / 7 * 4);

    for codeword in bits.chunks(7) {
        let mut cw: [bool; 7] = codeword.try_into().unwrap();
        let bit = |pos: usize| cw[pos - 1] as u8;
        let s1 = bit(1) ^ bit(3) ^ bit(5) ^ bit(7);
        let s2 = bit(2) ^ bit(3) ^ bit(6) ^ bit(7);
        let s4 = bit(4) ^ bit(5) ^ bit(6) ^ bit(7);
        let syndrome = s1 | (s2 << 1) | (s4 << 2);

        if syndrome != 0 {
            let idx = syndrome as usize - 1;
            cw[idx] = !cw[idx];
            report.corrected += 1;
        }

        data_bits.push(cw[2]);
        data_bits.push(cw[4]);
        data_bits.push(cw[5]);
        data_bits.push(cw[6]);
    }

    if data_bits.len() % 8 != 0 {
        return Err(GeneCoderError::TruncatedPayload(
            "hamming payload does not decode to a whole number of bytes".to_string(),
        ));
    }

    Ok((bits_to_bytes(&data_bits), report))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrips_without_errors() {
        let data = b"hi";
        let (encoded, padding) = encode(data);
        let (decoded, report) = decode(&encoded, padding).unwrap();
        assert_eq!(decoded, data);
        assert_eq!(report.corrected, 0);
    }

    #[test]
    fn corrects_a_single_bit_flip_per_codeword() {
        let data = b"X";
        let (mut encoded, padding) = encode(data);
        encoded[0] ^= 0b0100_0000; // flip the first codeword's leading bit
        let (decoded, report) = decode(&encoded, padding).unwrap();
        assert_eq!(decoded, data);
        assert_eq!(report.corrected, 1);
    }
}
