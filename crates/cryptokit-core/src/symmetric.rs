//! # Symmetric Encryption
//!
//! Provides AES-256-GCM (default) and ChaCha20-Poly1305 authenticated
//! encryption producing self-contained [`CipherBlob`]s.
//!
//! ## Security Properties
//!
//! - **Nonces**: 96-bit, drawn fresh from the entropy source on every call
//! - **Tags**: 128-bit, compared in constant time inside the AEAD
//! - **Failure**: every decryption failure collapses into
//!   `CryptoError::AuthenticationFailed`; plaintext is only released after
//!   the tag has been verified

use crate::random::{random_array, EntropySource};
use crate::CryptoError;
use aes_gcm::aead::generic_array::GenericArray;
use aes_gcm::aead::{AeadInPlace, KeyInit};
use aes_gcm::Aes256Gcm;
use chacha20poly1305::ChaCha20Poly1305;
use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Symmetric key length.
pub const KEY_LENGTH: usize = 32;

/// Nonce length for both supported ciphers.
pub const NONCE_LENGTH: usize = 12;

/// Authentication tag length.
pub const TAG_LENGTH: usize = 16;

/// Secret key (256-bit).
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SymmetricKey([u8; KEY_LENGTH]);

impl SymmetricKey {
    /// Create from bytes.
    pub fn from_bytes(bytes: [u8; KEY_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Create from a slice of exactly 32 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        let array: [u8; KEY_LENGTH] = bytes
            .try_into()
            .map_err(|_| CryptoError::wrong_length("symmetric key", KEY_LENGTH, bytes.len()))?;
        Ok(Self(array))
    }

    /// Get inner bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.0
    }
}

impl fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SymmetricKey(..)")
    }
}

/// Cipher selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cipher {
    /// AES-256-GCM (default)
    #[default]
    #[serde(rename = "aes-256-gcm")]
    Aes256Gcm,
    /// ChaCha20-Poly1305 (constant-time without AES-NI)
    #[serde(rename = "chacha20-poly1305")]
    ChaCha20Poly1305,
}

/// Encrypted payload: `nonce || ciphertext || tag` on the wire.
#[derive(Clone, PartialEq, Eq)]
pub struct CipherBlob {
    nonce: [u8; NONCE_LENGTH],
    ciphertext: Vec<u8>,
    tag: [u8; TAG_LENGTH],
}

impl CipherBlob {
    /// Smallest valid encoding (empty plaintext).
    pub const MIN_LENGTH: usize = NONCE_LENGTH + TAG_LENGTH;

    /// Parse `nonce || ciphertext || tag`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.len() < Self::MIN_LENGTH {
            return Err(CryptoError::MalformedInput(format!(
                "cipher blob: expected at least {} bytes, got {}",
                Self::MIN_LENGTH,
                bytes.len()
            )));
        }

        let tag_start = bytes.len() - TAG_LENGTH;
        let mut nonce = [0u8; NONCE_LENGTH];
        let mut tag = [0u8; TAG_LENGTH];
        nonce.copy_from_slice(&bytes[..NONCE_LENGTH]);
        tag.copy_from_slice(&bytes[tag_start..]);

        Ok(Self {
            nonce,
            ciphertext: bytes[NONCE_LENGTH..tag_start].to_vec(),
            tag,
        })
    }

    /// Encode as `nonce || ciphertext || tag`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(Self::MIN_LENGTH + self.ciphertext.len());
        out.extend_from_slice(&self.nonce);
        out.extend_from_slice(&self.ciphertext);
        out.extend_from_slice(&self.tag);
        out
    }

    /// Nonce used for this blob.
    pub fn nonce(&self) -> &[u8; NONCE_LENGTH] {
        &self.nonce
    }

    /// Ciphertext without nonce and tag.
    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }

    /// Authentication tag.
    pub fn tag(&self) -> &[u8; TAG_LENGTH] {
        &self.tag
    }
}

impl fmt::Debug for CipherBlob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CipherBlob")
            .field("ciphertext_len", &self.ciphertext.len())
            .finish_non_exhaustive()
    }
}

/// AEAD engine. Holds the entropy source used for nonces.
#[derive(Debug, Clone)]
pub struct SymmetricEngine<E> {
    entropy: E,
    cipher: Cipher,
}

impl<E: EntropySource> SymmetricEngine<E> {
    /// Create an engine for `cipher`.
    pub fn new(entropy: E, cipher: Cipher) -> Self {
        Self { entropy, cipher }
    }

    /// Configured cipher.
    pub fn cipher(&self) -> Cipher {
        self.cipher
    }

    pub(crate) fn entropy(&self) -> &E {
        &self.entropy
    }

    /// Generate random key.
    pub fn generate_key(&self) -> Result<SymmetricKey, CryptoError> {
        random_array(&self.entropy).map(SymmetricKey)
    }

    /// Encrypt `plaintext` under a fresh random nonce.
    ///
    /// # Errors
    ///
    /// `EntropyUnavailable` if no nonce can be drawn.
    pub fn encrypt(
        &self,
        key: &SymmetricKey,
        plaintext: &[u8],
        associated_data: Option<&[u8]>,
    ) -> Result<CipherBlob, CryptoError> {
        let nonce: [u8; NONCE_LENGTH] = random_array(&self.entropy)?;
        let aad = associated_data.unwrap_or_default();
        let mut buffer = plaintext.to_vec();

        let tag = match self.cipher {
            Cipher::Aes256Gcm => seal_detached::<Aes256Gcm>(key, &nonce, aad, &mut buffer),
            Cipher::ChaCha20Poly1305 => {
                seal_detached::<ChaCha20Poly1305>(key, &nonce, aad, &mut buffer)
            }
        }
        .inspect_err(|_| buffer.zeroize())?;

        tracing::trace!(
            cipher = ?self.cipher,
            len = plaintext.len(),
            "sealed payload"
        );

        Ok(CipherBlob {
            nonce,
            ciphertext: buffer,
            tag,
        })
    }

    /// Verify and decrypt a blob.
    ///
    /// # Errors
    ///
    /// `AuthenticationFailed` for a wrong key, wrong associated data or any
    /// modification of the blob. No partial plaintext is ever returned.
    pub fn decrypt(
        &self,
        key: &SymmetricKey,
        blob: &CipherBlob,
        associated_data: Option<&[u8]>,
    ) -> Result<Vec<u8>, CryptoError> {
        let aad = associated_data.unwrap_or_default();
        let mut buffer = blob.ciphertext.clone();

        let opened = match self.cipher {
            Cipher::Aes256Gcm => {
                open_detached::<Aes256Gcm>(key, &blob.nonce, aad, &mut buffer, &blob.tag)
            }
            Cipher::ChaCha20Poly1305 => {
                open_detached::<ChaCha20Poly1305>(key, &blob.nonce, aad, &mut buffer, &blob.tag)
            }
        };

        if opened.is_err() {
            buffer.zeroize();
            tracing::debug!(cipher = ?self.cipher, "authentication failed");
            return Err(CryptoError::AuthenticationFailed);
        }

        Ok(buffer)
    }
}

fn seal_detached<A: AeadInPlace + KeyInit>(
    key: &SymmetricKey,
    nonce: &[u8; NONCE_LENGTH],
    aad: &[u8],
    buffer: &mut [u8],
) -> Result<[u8; TAG_LENGTH], CryptoError> {
    let cipher = A::new_from_slice(key.as_bytes())
        .map_err(|_| CryptoError::wrong_length("symmetric key", KEY_LENGTH, key.0.len()))?;
    let tag = cipher
        .encrypt_in_place_detached(GenericArray::from_slice(nonce), aad, buffer)
        .map_err(|_| CryptoError::MalformedInput("plaintext too long".to_string()))?;

    let mut out = [0u8; TAG_LENGTH];
    out.copy_from_slice(&tag);
    Ok(out)
}

fn open_detached<A: AeadInPlace + KeyInit>(
    key: &SymmetricKey,
    nonce: &[u8; NONCE_LENGTH],
    aad: &[u8],
    buffer: &mut [u8],
    tag: &[u8; TAG_LENGTH],
) -> Result<(), CryptoError> {
    let cipher =
        A::new_from_slice(key.as_bytes()).map_err(|_| CryptoError::AuthenticationFailed)?;
    cipher
        .decrypt_in_place_detached(
            GenericArray::from_slice(nonce),
            aad,
            buffer,
            GenericArray::from_slice(tag),
        )
        .map_err(|_| CryptoError::AuthenticationFailed)
}
