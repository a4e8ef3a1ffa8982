//! # CryptoKit
//!
//! One API for the cryptographic needs of an application: secure random
//! bytes, digests, secp256k1 signatures with public key recovery, and
//! authenticated symmetric encryption.
//!
//! ## Architecture
//!
//! This crate follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): configuration, boundary encoding, encoded entities
//! - **Ports Layer** (`ports/`): the inbound `CryptoToolkitApi` trait
//! - **Service Layer** (`service.rs`): wires `cryptokit-core` engines to the port
//!
//! ## Conventions
//!
//! - Every byte sequence crosses the API as a string in one configured
//!   [`Encoding`] (hex by default)
//! - Signatures are 65 bytes `r || s || v`, always produced with low S
//! - Ciphertexts are `nonce || ciphertext || tag`
//! - All failures are one of the five [`CryptoError`] variants
//!
//! ## Example
//!
//! ```
//! use cryptokit::{CryptoToolkit, CryptoToolkitApi};
//!
//! let kit = CryptoToolkit::default();
//! let keys = kit.generate_key_pair().unwrap();
//! let digest = kit.hash_text("test");
//!
//! let signature = kit.sign_digest(&keys.private_key, &digest).unwrap();
//! assert!(kit.verify_digest(&keys.public_key, &digest, &signature));
//! assert_eq!(kit.recover_address(&digest, &signature).unwrap(), keys.address);
//! ```

#![warn(missing_docs)]

pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use domain::config::{ToolkitConfig, ToolkitConfigBuilder, DEFAULT_MAX_RANDOM_BYTES};
pub use domain::encoding::Encoding;
pub use domain::entities::EncodedKeyPair;
pub use ports::inbound::CryptoToolkitApi;
pub use service::CryptoToolkit;

pub use cryptokit_core::{
    Address, AsymmetricEngine, BatchVerification, Cipher, CipherBlob, CryptoError, Digest,
    EntropySource, HashAlgorithm, HashEngine, KeyPair, OsEntropy, PrivateKey, PublicKey,
    Signature, SymmetricEngine, SymmetricKey, VerificationItem,
};
