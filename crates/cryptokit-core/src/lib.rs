//! # CryptoKit Core - Cryptographic Primitives
//!
//! Pure building blocks behind the CryptoKit facade. Nothing here performs
//! I/O except reading the OS entropy source.
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `random` | OS CSPRNG | Keys, nonces, random bytes |
//! | `hashing` | Keccak-256, SHA-256, SHA3-256, BLAKE3, HMAC | Digests, MACs |
//! | `kdf` | HKDF-SHA256, BLAKE3 derive-key | Key derivation |
//! | `ecdsa` | secp256k1 | Signing, verification, key recovery |
//! | `symmetric` | AES-256-GCM, ChaCha20-Poly1305 | Authenticated encryption |
//! | `ecies` | secp256k1 ECDH + HKDF + AEAD | Encryption to a public key |
//!
//! ## Security Properties
//!
//! - **secp256k1**: RFC 6979 deterministic, low-S normalization (EIP-2)
//! - **AEAD**: fresh 96-bit random nonce per message, opaque failures
//! - **Randomness**: injectable [`EntropySource`]; no global RNG state

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ecdsa;
pub mod ecies;
pub mod errors;
pub mod hashing;
pub mod kdf;
pub mod random;
pub mod symmetric;

// Re-exports
pub use ecdsa::{
    Address, AsymmetricEngine, BatchVerification, KeyPair, PrivateKey, PublicKey, Signature,
    VerificationItem,
};
pub use ecies::Ecies;
pub use errors::CryptoError;
pub use hashing::{Digest, HashAlgorithm, HashEngine};
pub use random::{random_bytes, EntropySource, OsEntropy};
pub use symmetric::{Cipher, CipherBlob, SymmetricEngine, SymmetricKey};

#[cfg(any(test, feature = "test-utils"))]
pub use random::SeededEntropy;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
