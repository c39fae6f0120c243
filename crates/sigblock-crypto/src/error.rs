//! Cryptographic error types.

use thiserror::Error;

/// Errors that can occur during cryptographic operations.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// The public key could not be parsed or uses an unsupported algorithm.
    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    /// The private key could not be parsed.
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    /// Signature verification failed. Carries the library diagnostic.
    #[error("signature verification failed: {0}")]
    SignatureVerificationFailed(String),

    /// Invalid hex encoding.
    #[error("invalid hex encoding")]
    InvalidHexEncoding,

    /// Invalid base64 encoding.
    #[error("invalid base64 encoding: {0}")]
    InvalidBase64Encoding(String),

    /// Key encoding failed.
    #[error("key encoding failed: {0}")]
    KeyEncoding(String),

    /// I/O error (e.g. reading/writing key files).
    #[error("I/O error: {0}")]
    IoError(String),
}

/// Result type for cryptographic operations.
pub type CryptoResult<T> = Result<T, CryptoError>;
