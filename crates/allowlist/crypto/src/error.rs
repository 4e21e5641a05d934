use thiserror::Error;

/// Errors from decoding, recovering or producing secp256k1 signatures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SignatureError {
    #[error("signature must be 65 bytes, got {actual}")]
    WrongLength { actual: usize },

    #[error("invalid recovery byte: {0}")]
    InvalidRecoveryByte(u8),

    #[error("malformed signature scalars")]
    MalformedSignature,

    #[error("public key recovery failed")]
    RecoveryFailed,

    #[error("invalid private key: {0}")]
    InvalidKey(String),

    #[error("signing failed")]
    SigningFailed,
}
