//! Key derivation from existing key material.
//!
//! Not a password hash: inputs are expected to already carry full entropy
//! (ECDH shared secrets, master keys).

use crate::CryptoError;
use hkdf::Hkdf;
use sha2::Sha256;

/// Derive a 256-bit key with HKDF-SHA256 (RFC 5869).
pub fn hkdf_sha256(ikm: &[u8], salt: &[u8], info: &[u8]) -> Result<[u8; 32], CryptoError> {
    let hk = Hkdf::<Sha256>::new(Some(salt), ikm);
    let mut okm = [0u8; 32];
    hk.expand(info, &mut okm)
        .map_err(|_| CryptoError::MalformedInput("HKDF output length".to_string()))?;
    Ok(okm)
}

/// Derive key from context and input key material.
pub fn blake3_derive_key(context: &str, key_material: &[u8]) -> [u8; 32] {
    blake3::derive_key(context, key_material)
}
