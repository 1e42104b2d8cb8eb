//! Types d'erreurs pour le pipeline de codage GeneCoder

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeneCoderError {
    #[error("nucléotide invalide dans le flux: {0:?}")]
    InvalidAlphabet(char),

    #[error("payload tronqué: {0}")]
    TruncatedPayload(String),

    #[error("en-tête FASTA invalide: {0}")]
    InvalidHeader(String),

    #[error("tag GC-Balanced invalide: attendu 'A' ou 'T', obtenu {0:?}")]
    InvalidTag(char),

    #[error("échec de parité")]
    ParityFailure,

    #[error("échec de correction Reed-Solomon: {0}")]
    FecFailure(String),

    #[error("configuration non supportée en streaming: {0}")]
    UnsupportedForStreaming(String),

    #[error("opération annulée")]
    Cancelled,

    #[error("configuration de pipeline invalide: {0}")]
    InvalidConfig(String),

    #[error("erreur IO: {0}")]
    Io(#[from] std::io::Error),

    #[error("erreur de sérialisation JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GeneCoderError>;
