//! # ECDSA Signatures (secp256k1)
//!
//! Key generation, signing, verification and public-key recovery on the
//! secp256k1 curve, Ethereum compatible.
//!
//! ## Security Properties
//!
//! - RFC 6979 deterministic nonces (no RNG dependency for signing)
//! - Low-S normalization on every produced signature (EIP-2)
//! - Low-S enforcement on verification and recovery unless disabled
//! - Scalar range checks run in constant time (`subtle`)
//!
//! ## Wire Format
//!
//! A signature travels as 65 bytes `r || s || v` where `v` is the recovery
//! id (0/1). The Ethereum offsets 27/28 are accepted on input.

use crate::hashing::{keccak256, Digest};
use crate::random::EntropySource;
use crate::CryptoError;
use k256::ecdsa::{RecoveryId, Signature as K256Signature, SigningKey, VerifyingKey};
use k256::FieldBytes;
use serde::{Deserialize, Serialize};
use std::fmt;
use subtle::{Choice, ConstantTimeEq};
use zeroize::Zeroizing;

/// Ethereum-style address: last 20 bytes of keccak256(uncompressed pubkey).
pub type Address = [u8; 20];

/// Compressed SEC1 public key length.
pub const COMPRESSED_PUBLIC_KEY_LENGTH: usize = 33;

/// Uncompressed SEC1 public key length.
pub const UNCOMPRESSED_PUBLIC_KEY_LENGTH: usize = 65;

/// Secret scalar length.
pub const PRIVATE_KEY_LENGTH: usize = 32;

/// Upper bound on rejection sampling during key generation.
///
/// A healthy source needs more than one draw with probability ~2^-128; a
/// source that keeps producing out-of-range scalars is broken.
const MAX_KEYGEN_ATTEMPTS: usize = 64;

/// secp256k1 curve order n
/// n = 0xFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141
const SECP256K1_ORDER: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE,
    0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36, 0x41, 0x41,
];

/// Half of the secp256k1 curve order, rounded down (n / 2).
const SECP256K1_HALF_ORDER: [u8; 32] = [
    0x7F, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0x5D, 0x57, 0x6E, 0x73, 0x57, 0xA4, 0x50, 0x1D, 0xDF, 0xE9, 0x2F, 0x46, 0x68, 0x1B, 0x20, 0xA0,
];

// =============================================================================
// KEYS
// =============================================================================

/// secp256k1 private key (32-byte scalar in `[1, n-1]`).
///
/// The inner signing key zeroizes its scalar on drop.
#[derive(Clone)]
pub struct PrivateKey {
    pub(crate) signing_key: SigningKey,
}

impl PrivateKey {
    /// Create from secret key bytes (32 bytes, big endian).
    ///
    /// # Errors
    ///
    /// `InvalidPrivateKey` if the scalar is zero or not below the curve order.
    pub fn from_bytes(bytes: &[u8; PRIVATE_KEY_LENGTH]) -> Result<Self, CryptoError> {
        let signing_key = SigningKey::from_bytes(FieldBytes::from_slice(bytes))
            .map_err(|_| CryptoError::InvalidPrivateKey)?;
        Ok(Self { signing_key })
    }

    /// Create from an arbitrary slice, which must be exactly 32 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        let array: &[u8; PRIVATE_KEY_LENGTH] = bytes.try_into().map_err(|_| {
            CryptoError::wrong_length("private key", PRIVATE_KEY_LENGTH, bytes.len())
        })?;
        Self::from_bytes(array)
    }

    /// Secret key bytes, wiped when the returned buffer is dropped.
    pub fn to_bytes(&self) -> Zeroizing<[u8; PRIVATE_KEY_LENGTH]> {
        Zeroizing::new(self.signing_key.to_bytes().into())
    }

    /// Derive the matching public key.
    pub fn public_key(&self) -> PublicKey {
        PublicKey {
            verifying_key: *self.signing_key.verifying_key(),
        }
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(..)")
    }
}

/// secp256k1 public key (validated curve point, never the identity).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PublicKey {
    pub(crate) verifying_key: VerifyingKey,
}

impl PublicKey {
    /// Parse a SEC1 encoded key: 33 bytes compressed or 65 bytes uncompressed.
    pub fn from_sec1_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.len() != COMPRESSED_PUBLIC_KEY_LENGTH
            && bytes.len() != UNCOMPRESSED_PUBLIC_KEY_LENGTH
        {
            return Err(CryptoError::MalformedInput(format!(
                "public key: expected 33 or 65 bytes, got {}",
                bytes.len()
            )));
        }

        let verifying_key = VerifyingKey::from_sec1_bytes(bytes).map_err(|_| {
            CryptoError::MalformedInput("public key is not a point on secp256k1".to_string())
        })?;
        Ok(Self { verifying_key })
    }

    /// Compressed SEC1 bytes (0x02/0x03 || x).
    pub fn to_compressed(&self) -> [u8; COMPRESSED_PUBLIC_KEY_LENGTH] {
        let point = self.verifying_key.to_encoded_point(true);
        let mut bytes = [0u8; COMPRESSED_PUBLIC_KEY_LENGTH];
        bytes.copy_from_slice(point.as_bytes());
        bytes
    }

    /// Uncompressed SEC1 bytes (0x04 || x || y).
    pub fn to_uncompressed(&self) -> [u8; UNCOMPRESSED_PUBLIC_KEY_LENGTH] {
        let point = self.verifying_key.to_encoded_point(false);
        let mut bytes = [0u8; UNCOMPRESSED_PUBLIC_KEY_LENGTH];
        bytes.copy_from_slice(point.as_bytes());
        bytes
    }

    /// Derive the Ethereum address of this key.
    pub fn to_address(&self) -> Address {
        let uncompressed = self.to_uncompressed();
        // Skip the 0x04 prefix
        let hash = keccak256(&uncompressed[1..]);

        let mut address = [0u8; 20];
        address.copy_from_slice(&hash.as_bytes()[12..]);
        address
    }
}

/// Re-encode a SEC1 public key in compressed form.
pub fn compress_public_key(bytes: &[u8]) -> Result<[u8; COMPRESSED_PUBLIC_KEY_LENGTH], CryptoError> {
    Ok(PublicKey::from_sec1_bytes(bytes)?.to_compressed())
}

/// Re-encode a SEC1 public key in uncompressed form.
pub fn decompress_public_key(
    bytes: &[u8],
) -> Result<[u8; UNCOMPRESSED_PUBLIC_KEY_LENGTH], CryptoError> {
    Ok(PublicKey::from_sec1_bytes(bytes)?.to_uncompressed())
}

/// secp256k1 key pair. Only constructible from a private key, so the public
/// half always matches.
#[derive(Clone, Debug)]
pub struct KeyPair {
    private_key: PrivateKey,
    public_key: PublicKey,
}

impl KeyPair {
    /// Build the pair for an existing private key.
    pub fn from_private_key(private_key: PrivateKey) -> Self {
        let public_key = private_key.public_key();
        Self {
            private_key,
            public_key,
        }
    }

    /// Private half.
    pub fn private_key(&self) -> &PrivateKey {
        &self.private_key
    }

    /// Public half.
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// Address of the public half.
    pub fn address(&self) -> Address {
        self.public_key.to_address()
    }
}

// =============================================================================
// SIGNATURES
// =============================================================================

/// Recoverable ECDSA signature.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    /// R component (32 bytes)
    pub r: [u8; 32],
    /// S component (32 bytes)
    pub s: [u8; 32],
    /// Recovery ID (0 or 1; 27 or 28 accepted on input)
    pub v: u8,
}

impl Signature {
    /// Encoded length: r || s || v.
    pub const LENGTH: usize = 65;

    /// Parse the 65-byte `r || s || v` form.
    ///
    /// Only the length is checked here; range and recovery-id checks happen
    /// when the signature is used.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.len() != Self::LENGTH {
            return Err(CryptoError::wrong_length("signature", Self::LENGTH, bytes.len()));
        }

        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..64]);
        Ok(Self { r, s, v: bytes[64] })
    }

    /// Encode as `r || s || v`.
    pub fn to_bytes(&self) -> [u8; Self::LENGTH] {
        let mut out = [0u8; Self::LENGTH];
        out[..32].copy_from_slice(&self.r);
        out[32..64].copy_from_slice(&self.s);
        out[64] = self.v;
        out
    }

    /// Whether `s` is in the canonical lower half of the curve order.
    pub fn is_low_s(&self) -> bool {
        is_low_s(&self.s)
    }

    fn recovery_id(&self) -> Result<RecoveryId, CryptoError> {
        parse_recovery_id(self.v)
    }
}

// =============================================================================
// ENGINE
// =============================================================================

/// One entry of a batch verification.
#[derive(Clone, Debug)]
pub struct VerificationItem {
    /// Expected signer
    pub public_key: PublicKey,
    /// Digest that was signed
    pub digest: Digest,
    /// Signature to check
    pub signature: Signature,
}

/// Result of batch verification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchVerification {
    /// Individual outcomes, in request order
    pub results: Vec<bool>,
    /// Count of valid signatures
    pub valid_count: usize,
    /// Whether all verifications passed
    pub all_valid: bool,
}

impl BatchVerification {
    fn from_results(results: Vec<bool>) -> Self {
        let valid_count = results.iter().filter(|valid| **valid).count();
        let all_valid = valid_count == results.len();

        Self {
            results,
            valid_count,
            all_valid,
        }
    }
}

/// secp256k1 engine. Randomness is only consumed by key generation.
#[derive(Debug, Clone)]
pub struct AsymmetricEngine<E> {
    entropy: E,
    enforce_low_s: bool,
}

impl<E: EntropySource> AsymmetricEngine<E> {
    /// Create an engine enforcing canonical low-S signatures.
    pub fn new(entropy: E) -> Self {
        Self {
            entropy,
            enforce_low_s: true,
        }
    }

    /// Toggle rejection of high-S signatures on verify and recover.
    pub fn with_low_s_enforcement(mut self, enforce: bool) -> Self {
        self.enforce_low_s = enforce;
        self
    }

    /// Generate a fresh key pair from the entropy source.
    ///
    /// Candidates equal to zero or not below the curve order are discarded
    /// and redrawn.
    ///
    /// # Errors
    ///
    /// `EntropyUnavailable` if the source fails, or keeps yielding invalid
    /// scalars.
    pub fn generate_key_pair(&self) -> Result<KeyPair, CryptoError> {
        generate_private_key(&self.entropy).map(KeyPair::from_private_key)
    }

    /// Sign a 32-byte digest (RFC 6979, low-S normalized).
    pub fn sign(&self, private_key: &PrivateKey, digest: &Digest) -> Result<Signature, CryptoError> {
        let (sig, recovery_id) = private_key
            .signing_key
            .sign_prehash_recoverable(digest.as_bytes())
            .map_err(|_| CryptoError::InvalidPrivateKey)?;

        // Normalizing S negates the nonce point, which flips the y parity
        let (sig, recovery_id) = match sig.normalize_s() {
            Some(normalized) => (
                normalized,
                RecoveryId::new(!recovery_id.is_y_odd(), recovery_id.is_x_reduced()),
            ),
            None => (sig, recovery_id),
        };

        let bytes = sig.to_bytes();
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..]);

        tracing::trace!(v = recovery_id.to_byte(), "produced recoverable signature");

        Ok(Signature {
            r,
            s,
            v: recovery_id.to_byte(),
        })
    }

    /// Check a signature against a public key and digest.
    ///
    /// Never fails: malformed, out-of-range, high-S (under policy) or
    /// mismatched signatures all yield `false`.
    pub fn verify(&self, public_key: &PublicKey, digest: &Digest, signature: &Signature) -> bool {
        // Recovery verifies the recovered key against the signature, so key
        // equality is sufficient and also binds the recovery id.
        match self.recover_public_key(digest, signature) {
            Ok(recovered) => recovered == *public_key,
            Err(_) => false,
        }
    }

    /// Recover the signer's public key.
    ///
    /// # Errors
    ///
    /// `InvalidSignature` on a bad recovery id, out-of-range scalars, a
    /// high-S value under the low-S policy, or when no key can be recovered.
    pub fn recover_public_key(
        &self,
        digest: &Digest,
        signature: &Signature,
    ) -> Result<PublicKey, CryptoError> {
        let mut recovery_id = signature.recovery_id()?;

        if !is_valid_scalar(&signature.r) || !is_valid_scalar(&signature.s) {
            return Err(CryptoError::InvalidSignature);
        }

        let mut sig = K256Signature::from_scalars(signature.r, signature.s)
            .map_err(|_| CryptoError::InvalidSignature)?;

        if !is_low_s(&signature.s) {
            if self.enforce_low_s {
                tracing::debug!("rejected high-S signature");
                return Err(CryptoError::InvalidSignature);
            }
            // k256 only accepts low-S; (r, n - s) with the flipped parity
            // recovers the same key
            if let Some(normalized) = sig.normalize_s() {
                sig = normalized;
                recovery_id = RecoveryId::new(!recovery_id.is_y_odd(), recovery_id.is_x_reduced());
            }
        }

        let verifying_key =
            VerifyingKey::recover_from_prehash(digest.as_bytes(), &sig, recovery_id)
                .map_err(|_| CryptoError::InvalidSignature)?;

        Ok(PublicKey { verifying_key })
    }

    /// Recover the signer's Ethereum address.
    pub fn recover_address(
        &self,
        digest: &Digest,
        signature: &Signature,
    ) -> Result<Address, CryptoError> {
        self.recover_public_key(digest, signature)
            .map(|key| key.to_address())
    }

    /// Verify many signatures in parallel.
    pub fn batch_verify(&self, items: &[VerificationItem]) -> BatchVerification {
        use rayon::prelude::*;

        let results: Vec<bool> = items
            .par_iter()
            .map(|item| self.verify(&item.public_key, &item.digest, &item.signature))
            .collect();

        BatchVerification::from_results(results)
    }
}

/// Draw a private key by rejection sampling.
pub(crate) fn generate_private_key<E: EntropySource + ?Sized>(
    entropy: &E,
) -> Result<PrivateKey, CryptoError> {
    for attempt in 0..MAX_KEYGEN_ATTEMPTS {
        let mut candidate = Zeroizing::new([0u8; PRIVATE_KEY_LENGTH]);
        entropy.fill(candidate.as_mut_slice())?;

        match PrivateKey::from_bytes(&candidate) {
            Ok(key) => return Ok(key),
            Err(_) => tracing::debug!(attempt, "discarded out-of-range scalar"),
        }
    }

    tracing::warn!(
        attempts = MAX_KEYGEN_ATTEMPTS,
        "entropy source produced no valid scalar"
    );
    Err(CryptoError::EntropyUnavailable)
}

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Parse recovery ID from v value.
///
/// Valid v values: 0, 1, 27, 28
fn parse_recovery_id(v: u8) -> Result<RecoveryId, CryptoError> {
    let id = match v {
        0 | 27 => 0,
        1 | 28 => 1,
        _ => return Err(CryptoError::InvalidSignature),
    };

    RecoveryId::from_byte(id).ok_or(CryptoError::InvalidSignature)
}

/// Constant-time big-endian comparison; returns (a < b, a > b).
fn ct_compare(a: &[u8; 32], b: &[u8; 32]) -> (Choice, Choice) {
    let mut less = Choice::from(0u8);
    let mut greater = Choice::from(0u8);

    for i in 0..32 {
        // Only the first differing byte decides
        let not_decided = !(less | greater);
        let byte_less = Choice::from((a[i] < b[i]) as u8);
        let byte_greater = Choice::from((a[i] > b[i]) as u8);

        less |= not_decided & byte_less;
        greater |= not_decided & byte_greater;
    }

    (less, greater)
}

/// S is at most n/2 (EIP-2 canonical form).
fn is_low_s(s: &[u8; 32]) -> bool {
    let (_, greater) = ct_compare(s, &SECP256K1_HALF_ORDER);
    (!greater).into()
}

/// Scalar is in `[1, n-1]`.
fn is_valid_scalar(scalar: &[u8; 32]) -> bool {
    let mut is_zero = Choice::from(1u8);
    for &byte in scalar {
        is_zero &= byte.ct_eq(&0u8);
    }

    let (less, _) = ct_compare(scalar, &SECP256K1_ORDER);
    (!is_zero & less).into()
}

/// Compute n - s (flips a signature between its low-S and high-S forms).
#[cfg(test)]
pub(crate) fn invert_s(s: &[u8; 32]) -> [u8; 32] {
    let mut result = [0u8; 32];
    let mut borrow: i32 = 0;

    for i in (0..32).rev() {
        let diff = (SECP256K1_ORDER[i] as i32) - (s[i] as i32) - borrow;
        if diff < 0 {
            result[i] = (diff + 256) as u8;
            borrow = 1;
        } else {
            result[i] = diff as u8;
            borrow = 0;
        }
    }

    result
}
