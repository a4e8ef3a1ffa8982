//! # CryptoKit Service
//!
//! Application service layer that implements the `CryptoToolkitApi` trait.
//!
//! ## Architecture
//!
//! This is the hexagonal "application service" that:
//! - Implements the inbound port (`CryptoToolkitApi`)
//! - Shares one injected `EntropySource` between all engines
//! - Delegates cryptographic operations to `cryptokit-core`
//!
//! It owns no logic of its own beyond decoding inputs, encoding outputs
//! and logging outcomes. Secrets and plaintexts are never logged.

use crate::domain::config::ToolkitConfig;
use crate::domain::entities::EncodedKeyPair;
use crate::ports::inbound::CryptoToolkitApi;
use cryptokit_core::ecdsa::{compress_public_key, decompress_public_key};
use cryptokit_core::hashing::{hmac_sha256, DIGEST_LENGTH};
use cryptokit_core::{
    random_bytes, AsymmetricEngine, CipherBlob, CryptoError, Digest, Ecies, EntropySource,
    HashEngine, OsEntropy, PrivateKey, PublicKey, Signature, SymmetricEngine, SymmetricKey,
};
use std::sync::Arc;
use tracing::{debug, trace};
use zeroize::Zeroizing;

/// CryptoKit facade.
///
/// Cheap to share behind an `Arc`; every operation takes `&self` and keeps
/// no state between calls.
pub struct CryptoToolkit<E: EntropySource = OsEntropy> {
    config: ToolkitConfig,
    entropy: Arc<E>,
    hasher: HashEngine,
    asymmetric: AsymmetricEngine<Arc<E>>,
    symmetric: SymmetricEngine<Arc<E>>,
    ecies: Ecies<Arc<E>>,
}

impl CryptoToolkit<OsEntropy> {
    /// Create a toolkit backed by the operating system entropy source.
    ///
    /// # Errors
    /// * `CryptoError::MalformedInput` - the configuration is invalid
    pub fn new(config: ToolkitConfig) -> Result<Self, CryptoError> {
        Self::with_entropy(config, OsEntropy)
    }
}

impl Default for CryptoToolkit {
    fn default() -> Self {
        Self::assemble(ToolkitConfig::default(), OsEntropy)
    }
}

impl<E: EntropySource> CryptoToolkit<E> {
    /// Create a toolkit with an explicit entropy source.
    pub fn with_entropy(config: ToolkitConfig, entropy: E) -> Result<Self, CryptoError> {
        config.validate()?;
        Ok(Self::assemble(config, entropy))
    }

    fn assemble(config: ToolkitConfig, entropy: E) -> Self {
        let entropy = Arc::new(entropy);

        debug!(
            encoding = ?config.encoding,
            hash = ?config.hash_algorithm,
            cipher = ?config.cipher,
            enforce_low_s = config.enforce_low_s,
            "CryptoKit initialized"
        );

        Self {
            hasher: HashEngine::new(config.hash_algorithm),
            asymmetric: AsymmetricEngine::new(Arc::clone(&entropy))
                .with_low_s_enforcement(config.enforce_low_s),
            symmetric: SymmetricEngine::new(Arc::clone(&entropy), config.cipher),
            ecies: Ecies::new(Arc::clone(&entropy), config.cipher),
            entropy,
            config,
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &ToolkitConfig {
        &self.config
    }

    /// Byte-level digest engine.
    pub fn hasher(&self) -> &HashEngine {
        &self.hasher
    }

    /// Byte-level secp256k1 engine.
    pub fn asymmetric(&self) -> &AsymmetricEngine<Arc<E>> {
        &self.asymmetric
    }

    /// Byte-level AEAD engine.
    pub fn symmetric(&self) -> &SymmetricEngine<Arc<E>> {
        &self.symmetric
    }

    // =========================================================================
    // Boundary decoding
    // =========================================================================

    fn decode(&self, input: &str, what: &str) -> Result<Vec<u8>, CryptoError> {
        self.config.encoding.decode(input, what)
    }

    fn encode(&self, bytes: impl AsRef<[u8]>) -> String {
        self.config.encoding.encode(bytes)
    }

    fn decode_private_key(&self, input: &str) -> Result<PrivateKey, CryptoError> {
        let bytes = Zeroizing::new(self.decode(input, "private key")?);
        PrivateKey::from_slice(&bytes)
    }

    fn decode_public_key(&self, input: &str) -> Result<PublicKey, CryptoError> {
        PublicKey::from_sec1_bytes(&self.decode(input, "public key")?)
    }

    fn decode_symmetric_key(&self, input: &str) -> Result<SymmetricKey, CryptoError> {
        let bytes = Zeroizing::new(self.decode(input, "symmetric key")?);
        SymmetricKey::from_slice(&bytes)
    }

    fn decode_digest(&self, input: &str) -> Result<Digest, CryptoError> {
        self.config
            .encoding
            .decode_array::<DIGEST_LENGTH>(input, "digest")
            .map(Digest::from_bytes)
    }

    fn decode_signature(&self, input: &str) -> Result<Signature, CryptoError> {
        Signature::from_bytes(&self.decode(input, "signature")?)
    }

    fn decode_optional(
        &self,
        input: Option<&str>,
        what: &str,
    ) -> Result<Option<Vec<u8>>, CryptoError> {
        input.map(|value| self.decode(value, what)).transpose()
    }

    fn check_digest(&self, public_key: &str, digest: &Digest, signature: &str) -> bool {
        let parsed = self
            .decode_public_key(public_key)
            .and_then(|key| Ok((key, self.decode_signature(signature)?)));

        match parsed {
            Ok((key, signature)) => {
                let valid = self.asymmetric.verify(&key, digest, &signature);
                trace!(valid, "signature checked");
                valid
            }
            Err(e) => {
                debug!(error = %e, "verification input rejected");
                false
            }
        }
    }
}

impl<E: EntropySource> CryptoToolkitApi for CryptoToolkit<E> {
    fn random_bytes(&self, length: usize) -> Result<String, CryptoError> {
        if length > self.config.max_random_bytes {
            return Err(CryptoError::MalformedInput(format!(
                "random length {length} exceeds limit {}",
                self.config.max_random_bytes
            )));
        }

        let bytes = random_bytes(&self.entropy, length)?;
        trace!(length, "random bytes generated");
        Ok(self.encode(bytes))
    }

    fn hash(&self, data: &str) -> Result<String, CryptoError> {
        let data = self.decode(data, "data")?;
        Ok(self.encode(self.hasher.digest(&data)))
    }

    fn hash_text(&self, text: &str) -> String {
        self.encode(self.hasher.digest(text.as_bytes()))
    }

    fn hmac(&self, key: &str, data: &str) -> Result<String, CryptoError> {
        let key = Zeroizing::new(self.decode(key, "HMAC key")?);
        let data = self.decode(data, "data")?;
        Ok(self.encode(hmac_sha256(&key, &data)?))
    }

    fn generate_key_pair(&self) -> Result<EncodedKeyPair, CryptoError> {
        let keypair = self.asymmetric.generate_key_pair()?;
        let encoded = EncodedKeyPair {
            private_key: self.encode(keypair.private_key().to_bytes().as_slice()),
            public_key: self.encode(keypair.public_key().to_compressed()),
            address: self.encode(keypair.address()),
        };

        debug!(address = %encoded.address, "key pair generated");
        Ok(encoded)
    }

    fn public_key_from_private(&self, private_key: &str) -> Result<String, CryptoError> {
        let private_key = self.decode_private_key(private_key)?;
        Ok(self.encode(private_key.public_key().to_compressed()))
    }

    fn address_from_public_key(&self, public_key: &str) -> Result<String, CryptoError> {
        Ok(self.encode(self.decode_public_key(public_key)?.to_address()))
    }

    fn compress_public_key(&self, public_key: &str) -> Result<String, CryptoError> {
        let bytes = self.decode(public_key, "public key")?;
        Ok(self.encode(compress_public_key(&bytes)?))
    }

    fn decompress_public_key(&self, public_key: &str) -> Result<String, CryptoError> {
        let bytes = self.decode(public_key, "public key")?;
        Ok(self.encode(decompress_public_key(&bytes)?))
    }

    fn sign(&self, private_key: &str, message: &str) -> Result<String, CryptoError> {
        let private_key = self.decode_private_key(private_key)?;
        let digest = self.hasher.digest(&self.decode(message, "message")?);
        let signature = self.asymmetric.sign(&private_key, &digest)?;
        Ok(self.encode(signature.to_bytes()))
    }

    fn sign_digest(&self, private_key: &str, digest: &str) -> Result<String, CryptoError> {
        let private_key = self.decode_private_key(private_key)?;
        let digest = self.decode_digest(digest)?;
        let signature = self.asymmetric.sign(&private_key, &digest)?;
        Ok(self.encode(signature.to_bytes()))
    }

    fn verify(&self, public_key: &str, message: &str, signature: &str) -> bool {
        match self.decode(message, "message") {
            Ok(message) => self.check_digest(public_key, &self.hasher.digest(&message), signature),
            Err(e) => {
                debug!(error = %e, "verification input rejected");
                false
            }
        }
    }

    fn verify_digest(&self, public_key: &str, digest: &str, signature: &str) -> bool {
        match self.decode_digest(digest) {
            Ok(digest) => self.check_digest(public_key, &digest, signature),
            Err(e) => {
                debug!(error = %e, "verification input rejected");
                false
            }
        }
    }

    fn recover_public_key(&self, digest: &str, signature: &str) -> Result<String, CryptoError> {
        let digest = self.decode_digest(digest)?;
        let signature = self.decode_signature(signature)?;
        let key = self.asymmetric.recover_public_key(&digest, &signature)?;
        Ok(self.encode(key.to_compressed()))
    }

    fn recover_address(&self, digest: &str, signature: &str) -> Result<String, CryptoError> {
        let digest = self.decode_digest(digest)?;
        let signature = self.decode_signature(signature)?;
        Ok(self.encode(self.asymmetric.recover_address(&digest, &signature)?))
    }

    fn generate_symmetric_key(&self) -> Result<String, CryptoError> {
        let key = self.symmetric.generate_key()?;
        Ok(self.encode(key.as_bytes()))
    }

    fn encrypt(
        &self,
        key: &str,
        plaintext: &str,
        associated_data: Option<&str>,
    ) -> Result<String, CryptoError> {
        let key = self.decode_symmetric_key(key)?;
        let plaintext = Zeroizing::new(self.decode(plaintext, "plaintext")?);
        let aad = self.decode_optional(associated_data, "associated data")?;

        let blob = self.symmetric.encrypt(&key, &plaintext, aad.as_deref())?;
        Ok(self.encode(blob.to_bytes()))
    }

    fn decrypt(
        &self,
        key: &str,
        blob: &str,
        associated_data: Option<&str>,
    ) -> Result<String, CryptoError> {
        let key = self.decode_symmetric_key(key)?;
        let blob = CipherBlob::from_bytes(&self.decode(blob, "cipher blob")?)?;
        let aad = self.decode_optional(associated_data, "associated data")?;

        let plaintext = Zeroizing::new(self.symmetric.decrypt(&key, &blob, aad.as_deref())?);
        Ok(self.encode(plaintext.as_slice()))
    }

    fn encrypt_with_public_key(
        &self,
        public_key: &str,
        plaintext: &str,
    ) -> Result<String, CryptoError> {
        let recipient = self.decode_public_key(public_key)?;
        let plaintext = Zeroizing::new(self.decode(plaintext, "plaintext")?);
        Ok(self.encode(self.ecies.seal(&recipient, &plaintext)?))
    }

    fn decrypt_with_private_key(
        &self,
        private_key: &str,
        sealed: &str,
    ) -> Result<String, CryptoError> {
        let private_key = self.decode_private_key(private_key)?;
        let sealed = self.decode(sealed, "sealed box")?;
        let plaintext = Zeroizing::new(self.ecies.open(&private_key, &sealed)?);
        Ok(self.encode(plaintext.as_slice()))
    }
}
