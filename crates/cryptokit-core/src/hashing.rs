//! # Hashing
//!
//! 256-bit one-way digests and keyed MACs.
//!
//! | Algorithm | Use |
//! |-----------|-----|
//! | Keccak-256 | Ethereum-compatible message digests, addresses (default) |
//! | SHA-256 | General purpose, HKDF/HMAC |
//! | SHA3-256 | FIPS 202 digest |
//! | BLAKE3 | Fast hashing, keyed hashing |
//!
//! Every function here is pure: equal input yields equal output, empty input
//! is valid, and nothing can fail except HMAC key setup.

use crate::CryptoError;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::{Digest as _, Sha256};
use sha3::{Keccak256, Sha3_256};
use std::fmt;

type HmacSha256 = Hmac<Sha256>;

/// Digest output length in bytes.
pub const DIGEST_LENGTH: usize = 32;

/// Fixed-length (256-bit) digest.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Digest([u8; DIGEST_LENGTH]);

impl Digest {
    /// Wrap raw digest bytes.
    pub const fn from_bytes(bytes: [u8; DIGEST_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Parse a digest from a slice of exactly 32 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        let array: [u8; DIGEST_LENGTH] = bytes
            .try_into()
            .map_err(|_| CryptoError::wrong_length("digest", DIGEST_LENGTH, bytes.len()))?;
        Ok(Self(array))
    }

    /// Get raw bytes.
    pub fn as_bytes(&self) -> &[u8; DIGEST_LENGTH] {
        &self.0
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; DIGEST_LENGTH]> for Digest {
    fn from(bytes: [u8; DIGEST_LENGTH]) -> Self {
        Self(bytes)
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest(")?;
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        write!(f, ")")
    }
}

/// Digest algorithm selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HashAlgorithm {
    /// Keccak-256 (pre-standard SHA-3, as used by Ethereum)
    #[default]
    #[serde(rename = "keccak256")]
    Keccak256,
    /// SHA-256
    #[serde(rename = "sha256")]
    Sha256,
    /// SHA3-256 (FIPS 202)
    #[serde(rename = "sha3-256")]
    Sha3_256,
    /// BLAKE3 (256-bit output)
    #[serde(rename = "blake3")]
    Blake3,
}

/// Stateless digest engine bound to one algorithm.
#[derive(Clone, Copy, Debug, Default)]
pub struct HashEngine {
    algorithm: HashAlgorithm,
}

impl HashEngine {
    /// Create an engine for `algorithm`.
    pub fn new(algorithm: HashAlgorithm) -> Self {
        Self { algorithm }
    }

    /// Configured algorithm.
    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Hash `data` with the configured algorithm.
    pub fn digest(&self, data: &[u8]) -> Digest {
        match self.algorithm {
            HashAlgorithm::Keccak256 => keccak256(data),
            HashAlgorithm::Sha256 => sha256(data),
            HashAlgorithm::Sha3_256 => sha3_256(data),
            HashAlgorithm::Blake3 => blake3_hash(data),
        }
    }
}

/// Keccak-256 digest.
pub fn keccak256(data: &[u8]) -> Digest {
    Digest(Keccak256::digest(data).into())
}

/// SHA-256 digest.
pub fn sha256(data: &[u8]) -> Digest {
    Digest(Sha256::digest(data).into())
}

/// SHA3-256 digest.
pub fn sha3_256(data: &[u8]) -> Digest {
    Digest(Sha3_256::digest(data).into())
}

/// Hash data with BLAKE3 (one-shot).
pub fn blake3_hash(data: &[u8]) -> Digest {
    Digest(*blake3::hash(data).as_bytes())
}

/// Keyed BLAKE3 hash (MAC).
pub fn blake3_keyed_hash(key: &[u8; 32], data: &[u8]) -> Digest {
    Digest(*blake3::keyed_hash(key, data).as_bytes())
}

// =============================================================================
// HMAC
// =============================================================================

/// HMAC-SHA256 of `data` under `key`.
///
/// # Errors
///
/// HMAC accepts keys of any length, so this only fails if the underlying
/// implementation rejects the key; reported as `MalformedInput`.
pub fn hmac_sha256(key: &[u8], data: &[u8]) -> Result<[u8; 32], CryptoError> {
    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|_| CryptoError::MalformedInput("HMAC key rejected".to_string()))?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().into())
}

/// Check an HMAC-SHA256 tag in constant time.
pub fn verify_hmac_sha256(key: &[u8], data: &[u8], tag: &[u8]) -> bool {
    let Ok(mut mac) = HmacSha256::new_from_slice(key) else {
        return false;
    };
    mac.update(data);
    mac.verify_slice(tag).is_ok()
}
