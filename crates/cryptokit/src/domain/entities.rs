//! # Domain Entities
//!
//! Encoded values returned across the toolkit boundary.

use serde::Serialize;
use std::fmt;

/// A freshly generated identity in boundary encoding.
///
/// `Debug` never prints the private key.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct EncodedKeyPair {
    /// 32-byte secret scalar
    pub private_key: String,
    /// 33-byte compressed SEC1 public key
    pub public_key: String,
    /// 20-byte Ethereum address
    pub address: String,
}

impl fmt::Debug for EncodedKeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncodedKeyPair")
            .field("private_key", &"..")
            .field("public_key", &self.public_key)
            .field("address", &self.address)
            .finish()
    }
}
