//! The four-letter DNA alphabet and the sequences built from it.

use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::error::{GeneCoderError, Result};

/// One of the four canonical DNA bases. Ambiguity codes are out of scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Nucleotide {
    A,
    T,
    C,
    G,
}

impl Nucleotide {
    pub fn from_char(c: char) -> Result<Self> {
        match c.to_ascii_uppercase() {
            'A' => Ok(Nucleotide::A),
            'T' => Ok(Nucleotide::T),
            'C' => Ok(Nucleotide::C),
            'G' => Ok(Nucleotide::G),
            other => Err(GeneCoderError::InvalidAlphabet(other)),
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Nucleotide::A => 'A',
            Nucleotide::T => 'T',
            Nucleotide::C => 'C',
            Nucleotide::G => 'G',
        }
    }

    pub fn is_gc(self) -> bool {
        matches!(self, Nucleotide::C | Nucleotide::G)
    }

    /// Fixed base-4 mapping: `00->A, 01->T, 10->C, 11->G`.
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0b00 => Nucleotide::A,
            0b01 => Nucleotide::T,
            0b10 => Nucleotide::C,
            0b11 => Nucleotide::G,
            _ => unreachable!("masked to two bits"),
        }
    }

    pub fn to_bits(self) -> u8 {
        match self {
            Nucleotide::A => 0b00,
            Nucleotide::T => 0b01,
            Nucleotide::C => 0b10,
            Nucleotide::G => 0b11,
        }
    }
}

impl fmt::Display for Nucleotide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// An ordered run of nucleotides. A thin wrapper kept mostly for ergonomics;
/// the host-facing pipeline and FASTA APIs exchange plain `String`s of
/// uppercase letters, parsing into this type at the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnaSequence(Vec<Nucleotide>);

impl DnaSequence {
    pub fn new(bases: Vec<Nucleotide>) -> Self {
        Self(bases)
    }

    pub fn parse(s: &str) -> Result<Self> {
        s.chars()
            .map(Nucleotide::from_char)
            .collect::<Result<Vec<_>>>()
            .map(Self)
    }

    pub fn into_vec(self) -> Vec<Nucleotide> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Deref for DnaSequence {
    type Target = [Nucleotide];

    fn deref(&self) -> &[Nucleotide] {
        &self.0
    }
}

impl fmt::Display for DnaSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for nt in &self.0 {
            write!(f, "{nt}")?;
        }
        Ok(())
    }
}

impl From<Vec<Nucleotide>> for DnaSequence {
    fn from(bases: Vec<Nucleotide>) -> Self {
        Self(bases)
    }
}
