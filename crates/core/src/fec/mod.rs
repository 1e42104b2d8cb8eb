//! Forward error correction layers. Triple-Repeat and Parity operate on
//! the nucleotide sequence after primary encoding; Hamming(7,4) and
//! Reed-Solomon operate on the raw byte stream before it.

pub mod hamming;
pub mod reed_solomon;
pub mod triple_repeat;
