//! Toolkit configuration and validation
//!
//! # Example
//!
//! ```
//! use cryptokit::{Cipher, Encoding, HashAlgorithm, ToolkitConfigBuilder};
//!
//! let config = ToolkitConfigBuilder::new()
//!     .encoding(Encoding::Base64)
//!     .hash_algorithm(HashAlgorithm::Sha256)
//!     .cipher(Cipher::ChaCha20Poly1305)
//!     .build()
//!     .expect("valid config");
//! assert!(config.enforce_low_s);
//! ```

use super::encoding::Encoding;
use cryptokit_core::{Cipher, CryptoError, HashAlgorithm};
use serde::{Deserialize, Serialize};

/// Largest `random_bytes` request accepted by default (1 MiB).
pub const DEFAULT_MAX_RANDOM_BYTES: usize = 1 << 20;

/// Toolkit configuration.
///
/// Missing fields take their defaults when deserialized.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolkitConfig {
    /// String form of every byte sequence at the boundary
    pub encoding: Encoding,
    /// Digest used by `hash` and for message signing
    pub hash_algorithm: HashAlgorithm,
    /// AEAD used by `encrypt`/`decrypt` and public-key encryption
    pub cipher: Cipher,
    /// Reject high-S signatures on verify and recover
    pub enforce_low_s: bool,
    /// Upper bound for a single `random_bytes` request
    pub max_random_bytes: usize,
}

impl Default for ToolkitConfig {
    fn default() -> Self {
        Self {
            encoding: Encoding::Hex,
            hash_algorithm: HashAlgorithm::Keccak256,
            cipher: Cipher::Aes256Gcm,
            enforce_low_s: true,
            max_random_bytes: DEFAULT_MAX_RANDOM_BYTES,
        }
    }
}

impl ToolkitConfig {
    /// Validate configuration.
    pub fn validate(&self) -> Result<(), CryptoError> {
        if self.max_random_bytes == 0 {
            return Err(CryptoError::MalformedInput(
                "max_random_bytes cannot be 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Builder-style method to set the boundary encoding
    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Builder-style method to set the digest algorithm
    pub fn with_hash_algorithm(mut self, algorithm: HashAlgorithm) -> Self {
        self.hash_algorithm = algorithm;
        self
    }

    /// Builder-style method to set the AEAD cipher
    pub fn with_cipher(mut self, cipher: Cipher) -> Self {
        self.cipher = cipher;
        self
    }

    /// Builder-style method to toggle low-S enforcement
    pub fn with_low_s_enforcement(mut self, enforce: bool) -> Self {
        self.enforce_low_s = enforce;
        self
    }
}

/// Builder for ToolkitConfig with validation
#[derive(Default)]
pub struct ToolkitConfigBuilder {
    encoding: Option<Encoding>,
    hash_algorithm: Option<HashAlgorithm>,
    cipher: Option<Cipher>,
    enforce_low_s: Option<bool>,
    max_random_bytes: Option<usize>,
}

impl ToolkitConfigBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the boundary encoding
    pub fn encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = Some(encoding);
        self
    }

    /// Set the digest algorithm
    pub fn hash_algorithm(mut self, algorithm: HashAlgorithm) -> Self {
        self.hash_algorithm = Some(algorithm);
        self
    }

    /// Set the AEAD cipher
    pub fn cipher(mut self, cipher: Cipher) -> Self {
        self.cipher = Some(cipher);
        self
    }

    /// Toggle low-S enforcement
    pub fn enforce_low_s(mut self, enforce: bool) -> Self {
        self.enforce_low_s = Some(enforce);
        self
    }

    /// Set the largest accepted `random_bytes` request
    pub fn max_random_bytes(mut self, max: usize) -> Self {
        self.max_random_bytes = Some(max);
        self
    }

    /// Build the ToolkitConfig, validating all parameters
    pub fn build(self) -> Result<ToolkitConfig, CryptoError> {
        let defaults = ToolkitConfig::default();

        let config = ToolkitConfig {
            encoding: self.encoding.unwrap_or(defaults.encoding),
            hash_algorithm: self.hash_algorithm.unwrap_or(defaults.hash_algorithm),
            cipher: self.cipher.unwrap_or(defaults.cipher),
            enforce_low_s: self.enforce_low_s.unwrap_or(defaults.enforce_low_s),
            max_random_bytes: self.max_random_bytes.unwrap_or(defaults.max_random_bytes),
        };

        config.validate()?;
        Ok(config)
    }
}
