//! # Boundary Encoding
//!
//! Every byte sequence crossing the facade is a string in one encoding.
//! Hex input is accepted with or without a `0x` prefix regardless of which
//! hex flavor is configured for output.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use cryptokit_core::CryptoError;
use serde::{Deserialize, Serialize};

/// String form for bytes at the toolkit boundary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Encoding {
    /// Lowercase hex, no prefix
    #[default]
    #[serde(rename = "hex")]
    Hex,
    /// Lowercase hex with a `0x` prefix (Ethereum style)
    #[serde(rename = "0x-hex")]
    PrefixedHex,
    /// Standard base64 with padding
    #[serde(rename = "base64")]
    Base64,
}

impl Encoding {
    /// Encode bytes.
    pub fn encode(&self, bytes: impl AsRef<[u8]>) -> String {
        match self {
            Encoding::Hex => hex::encode(bytes),
            Encoding::PrefixedHex => format!("0x{}", hex::encode(bytes)),
            Encoding::Base64 => STANDARD.encode(bytes),
        }
    }

    /// Decode a string produced by [`Encoding::encode`].
    ///
    /// # Errors
    ///
    /// `MalformedInput` naming `what` if the string is not valid in this encoding.
    pub fn decode(&self, input: &str, what: &str) -> Result<Vec<u8>, CryptoError> {
        let decoded = match self {
            Encoding::Hex | Encoding::PrefixedHex => {
                let digits = input
                    .strip_prefix("0x")
                    .or_else(|| input.strip_prefix("0X"))
                    .unwrap_or(input);
                hex::decode(digits).map_err(|e| e.to_string())
            }
            Encoding::Base64 => STANDARD.decode(input).map_err(|e| e.to_string()),
        };

        decoded.map_err(|reason| CryptoError::MalformedInput(format!("{what}: {reason}")))
    }

    /// Decode into a fixed-size array.
    pub fn decode_array<const N: usize>(
        &self,
        input: &str,
        what: &str,
    ) -> Result<[u8; N], CryptoError> {
        let bytes = self.decode(input, what)?;
        bytes
            .as_slice()
            .try_into()
            .map_err(|_| CryptoError::wrong_length(what, N, bytes.len()))
    }
}
