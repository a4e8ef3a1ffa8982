//! # Inbound Ports (Driving Ports / API)
//!
//! The single public API of the toolkit. Every byte sequence is passed and
//! returned as a string in the configured [`Encoding`](crate::Encoding).

use crate::domain::entities::EncodedKeyPair;
use cryptokit_core::CryptoError;

/// Primary CryptoKit API.
///
/// This is the main entry point for host applications.
/// Implementations must be thread-safe (`Send + Sync`).
pub trait CryptoToolkitApi: Send + Sync {
    // =========================================================================
    // Randomness & Hashing
    // =========================================================================

    /// `length` cryptographically-secure random bytes.
    fn random_bytes(&self, length: usize) -> Result<String, CryptoError>;

    /// Digest of encoded `data` with the configured algorithm.
    fn hash(&self, data: &str) -> Result<String, CryptoError>;

    /// Digest of the UTF-8 bytes of `text`.
    fn hash_text(&self, text: &str) -> String;

    /// HMAC-SHA256 of `data` under `key`.
    fn hmac(&self, key: &str, data: &str) -> Result<String, CryptoError>;

    // =========================================================================
    // Asymmetric Operations
    // =========================================================================

    /// Generate a secp256k1 identity.
    fn generate_key_pair(&self) -> Result<EncodedKeyPair, CryptoError>;

    /// Compressed public key of a private key.
    fn public_key_from_private(&self, private_key: &str) -> Result<String, CryptoError>;

    /// Ethereum address of a (compressed or uncompressed) public key.
    fn address_from_public_key(&self, public_key: &str) -> Result<String, CryptoError>;

    /// Re-encode a public key as 33-byte compressed SEC1.
    fn compress_public_key(&self, public_key: &str) -> Result<String, CryptoError>;

    /// Re-encode a public key as 65-byte uncompressed SEC1.
    fn decompress_public_key(&self, public_key: &str) -> Result<String, CryptoError>;

    /// Hash `message` and sign the digest; returns 65-byte `r || s || v`.
    fn sign(&self, private_key: &str, message: &str) -> Result<String, CryptoError>;

    /// Sign a precomputed 32-byte digest.
    fn sign_digest(&self, private_key: &str, digest: &str) -> Result<String, CryptoError>;

    /// Verify a signature over `message`. Malformed input yields `false`.
    fn verify(&self, public_key: &str, message: &str, signature: &str) -> bool;

    /// Verify a signature over a precomputed digest.
    fn verify_digest(&self, public_key: &str, digest: &str, signature: &str) -> bool;

    /// Recover the compressed public key that produced `signature`.
    fn recover_public_key(&self, digest: &str, signature: &str) -> Result<String, CryptoError>;

    /// Recover the signer address.
    fn recover_address(&self, digest: &str, signature: &str) -> Result<String, CryptoError>;

    // =========================================================================
    // Symmetric Operations
    // =========================================================================

    /// Random 32-byte AEAD key.
    fn generate_symmetric_key(&self) -> Result<String, CryptoError>;

    /// Encrypt under a fresh nonce; returns `nonce || ciphertext || tag`.
    fn encrypt(
        &self,
        key: &str,
        plaintext: &str,
        associated_data: Option<&str>,
    ) -> Result<String, CryptoError>;

    /// Verify and decrypt a blob produced by [`CryptoToolkitApi::encrypt`].
    ///
    /// # Errors
    /// * `AuthenticationFailed` - wrong key, wrong associated data or tampering
    fn decrypt(
        &self,
        key: &str,
        blob: &str,
        associated_data: Option<&str>,
    ) -> Result<String, CryptoError>;

    // =========================================================================
    // Public-Key Encryption
    // =========================================================================

    /// Encrypt to a secp256k1 public key.
    fn encrypt_with_public_key(&self, public_key: &str, plaintext: &str)
        -> Result<String, CryptoError>;

    /// Decrypt with the matching private key.
    fn decrypt_with_private_key(&self, private_key: &str, sealed: &str)
        -> Result<String, CryptoError>;
}
