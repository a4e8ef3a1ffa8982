//! Crypto error types.

use thiserror::Error;

/// Cryptographic operation errors.
///
/// This is the single error taxonomy of the toolkit. Verification-style
/// operations return `bool` instead of one of these variants.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CryptoError {
    /// The operating system entropy source could not be read
    #[error("Entropy source unavailable")]
    EntropyUnavailable,

    /// Private key is zero or not below the curve order
    #[error("Invalid private key")]
    InvalidPrivateKey,

    /// Signature cannot be parsed or does not recover a public key
    #[error("Invalid signature")]
    InvalidSignature,

    /// AEAD tag check failed. Deliberately carries no detail.
    #[error("Authentication failed")]
    AuthenticationFailed,

    /// Input has the wrong length or encoding
    #[error("Malformed input: {0}")]
    MalformedInput(String),
}

impl CryptoError {
    /// Shorthand for a [`CryptoError::MalformedInput`] describing a length mismatch.
    pub fn wrong_length(what: &str, expected: usize, actual: usize) -> Self {
        Self::MalformedInput(format!(
            "{what}: expected {expected} bytes, got {actual}"
        ))
    }
}
