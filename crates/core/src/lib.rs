//! GeneCoder Core
//!
//! Bibliothèque principale pour l'encodage et le décodage réversibles
//! d'octets en séquences d'ADN (A, T, C, G), avec correction d'erreurs et
//! conteneur FASTA.

pub mod bitstream;
pub mod codec;
pub mod constraints;
pub mod descriptor;
pub mod error;
pub mod fasta;
pub mod fec;
pub mod logging;
pub mod metrics;
pub mod nucleotide;
pub mod parity;
pub mod pipeline;
pub mod streaming;

// Réexportations principales
pub use descriptor::{Fec, Method, PipelineDescriptor};
pub use error::{GeneCoderError, Result};
pub use metrics::Metrics;
pub use nucleotide::{DnaSequence, Nucleotide};
pub use parity::ParityRule;
pub use pipeline::{decode, decode_cancellable, encode, encode_cancellable, CancelCheck, PipelineConfig};
pub use streaming::{decode_stream, encode_stream, StreamConfig};
