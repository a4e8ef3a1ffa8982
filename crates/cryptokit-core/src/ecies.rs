//! # Public-Key Encryption (ECIES over secp256k1)
//!
//! Encrypts to a recipient's public key without a shared secret:
//!
//! 1. draw an ephemeral key pair
//! 2. ECDH between the ephemeral secret and the recipient key (x-coordinate)
//! 3. HKDF-SHA256 with the compressed ephemeral key as salt
//! 4. AEAD with the compressed ephemeral key as associated data
//!
//! Sealed layout: `ephemeral_public_key (33) || nonce || ciphertext || tag`.

use crate::ecdsa::{generate_private_key, PrivateKey, PublicKey, COMPRESSED_PUBLIC_KEY_LENGTH};
use crate::kdf::hkdf_sha256;
use crate::random::EntropySource;
use crate::symmetric::{Cipher, CipherBlob, SymmetricEngine, SymmetricKey};
use crate::CryptoError;
use k256::ecdh::diffie_hellman;
use zeroize::Zeroizing;

const HKDF_INFO: &[u8] = b"cryptokit/ecies/v1";

/// Smallest valid sealed box (empty plaintext).
pub const MIN_SEALED_LENGTH: usize = COMPRESSED_PUBLIC_KEY_LENGTH + CipherBlob::MIN_LENGTH;

/// ECIES engine.
#[derive(Debug, Clone)]
pub struct Ecies<E> {
    symmetric: SymmetricEngine<E>,
}

impl<E: EntropySource> Ecies<E> {
    /// Create an engine using `cipher` for the payload.
    pub fn new(entropy: E, cipher: Cipher) -> Self {
        Self {
            symmetric: SymmetricEngine::new(entropy, cipher),
        }
    }

    /// Encrypt `plaintext` so only the holder of `recipient`'s private key can read it.
    pub fn seal(&self, recipient: &PublicKey, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let ephemeral = generate_private_key(self.symmetric.entropy())?;
        let ephemeral_public = ephemeral.public_key().to_compressed();

        let key = shared_key(&ephemeral, recipient, &ephemeral_public)?;
        let blob = self
            .symmetric
            .encrypt(&key, plaintext, Some(ephemeral_public.as_slice()))?;

        let blob_bytes = blob.to_bytes();
        let mut sealed = Vec::with_capacity(COMPRESSED_PUBLIC_KEY_LENGTH + blob_bytes.len());
        sealed.extend_from_slice(&ephemeral_public);
        sealed.extend_from_slice(&blob_bytes);
        Ok(sealed)
    }

    /// Decrypt a sealed box with the recipient's private key.
    ///
    /// # Errors
    ///
    /// `MalformedInput` if the box is truncated or the ephemeral key is not a
    /// curve point; `AuthenticationFailed` for anything else.
    pub fn open(&self, private_key: &PrivateKey, sealed: &[u8]) -> Result<Vec<u8>, CryptoError> {
        if sealed.len() < MIN_SEALED_LENGTH {
            return Err(CryptoError::MalformedInput(format!(
                "sealed box: expected at least {MIN_SEALED_LENGTH} bytes, got {}",
                sealed.len()
            )));
        }

        let (ephemeral_bytes, blob_bytes) = sealed.split_at(COMPRESSED_PUBLIC_KEY_LENGTH);
        let ephemeral = PublicKey::from_sec1_bytes(ephemeral_bytes)?;
        let blob = CipherBlob::from_bytes(blob_bytes)?;

        let key = shared_key(private_key, &ephemeral, ephemeral_bytes)
            .map_err(|_| CryptoError::AuthenticationFailed)?;
        self.symmetric.decrypt(&key, &blob, Some(ephemeral_bytes))
    }
}

/// Symmetric key shared between `secret` and `public`, bound to `salt`.
fn shared_key(
    secret: &PrivateKey,
    public: &PublicKey,
    salt: &[u8],
) -> Result<SymmetricKey, CryptoError> {
    let shared = diffie_hellman(
        secret.signing_key.as_nonzero_scalar(),
        public.verifying_key.as_affine(),
    );
    let okm = Zeroizing::new(hkdf_sha256(
        shared.raw_secret_bytes().as_slice(),
        salt,
        HKDF_INFO,
    )?);
    Ok(SymmetricKey::from_bytes(*okm))
}
