//! # Encryption Flows
//!
//! Symmetric AEAD, public-key encryption and randomness through the facade.

#[cfg(test)]
mod tests {
    use crate::fixtures::{init_tracing, seeded_toolkit, toolkit_with};
    use cryptokit::{Cipher, CryptoError, CryptoToolkitApi, Encoding, ToolkitConfig};
    use std::collections::HashSet;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn configs() -> Vec<ToolkitConfig> {
        vec![
            ToolkitConfig::default(),
            ToolkitConfig::default().with_cipher(Cipher::ChaCha20Poly1305),
        ]
    }

    fn flip_byte(blob_hex: &str, index: usize) -> String {
        let mut bytes = hex::decode(blob_hex).unwrap();
        bytes[index] ^= 0x01;
        hex::encode(bytes)
    }

    // =============================================================================
    // SYMMETRIC
    // =============================================================================

    #[test]
    fn test_encrypt_decrypt_both_ciphers() {
        init_tracing();
        for config in configs() {
            let kit = toolkit_with(config, 1);
            let key = kit.generate_symmetric_key().unwrap();
            let plaintext = hex::encode(b"the quick brown fox");

            let blob = kit.encrypt(&key, &plaintext, None).unwrap();

            // nonce (12) + ciphertext (19) + tag (16)
            assert_eq!(hex::decode(&blob).unwrap().len(), 12 + 19 + 16);
            assert_eq!(kit.decrypt(&key, &blob, None).unwrap(), plaintext);
        }
    }

    #[test]
    fn test_empty_plaintext() {
        let kit = seeded_toolkit(2);
        let key = kit.generate_symmetric_key().unwrap();

        let blob = kit.encrypt(&key, "", None).unwrap();
        assert_eq!(hex::decode(&blob).unwrap().len(), 28);
        assert_eq!(kit.decrypt(&key, &blob, None).unwrap(), "");
    }

    #[test]
    fn test_repeated_encryption_uses_fresh_nonces() {
        let kit = seeded_toolkit(3);
        let key = kit.generate_symmetric_key().unwrap();
        let plaintext = hex::encode(b"same message");

        let first = kit.encrypt(&key, &plaintext, None).unwrap();
        let second = kit.encrypt(&key, &plaintext, None).unwrap();

        assert_ne!(first, second);
        assert_ne!(first[..24], second[..24]);
    }

    #[test]
    fn test_wrong_key_fails_authentication() {
        let kit = seeded_toolkit(4);
        let key = kit.generate_symmetric_key().unwrap();
        let other = kit.generate_symmetric_key().unwrap();
        let blob = kit.encrypt(&key, "00ff", None).unwrap();

        assert_eq!(
            kit.decrypt(&other, &blob, None),
            Err(CryptoError::AuthenticationFailed)
        );
    }

    #[test]
    fn test_any_tampered_byte_fails_authentication() {
        for config in configs() {
            let kit = toolkit_with(config, 5);
            let key = kit.generate_symmetric_key().unwrap();
            let blob = kit.encrypt(&key, &hex::encode(b"integrity"), None).unwrap();
            let length = hex::decode(&blob).unwrap().len();

            for index in 0..length {
                assert_eq!(
                    kit.decrypt(&key, &flip_byte(&blob, index), None),
                    Err(CryptoError::AuthenticationFailed),
                    "byte {index} was not authenticated"
                );
            }
        }
    }

    #[test]
    fn test_associated_data_is_bound() {
        let kit = seeded_toolkit(6);
        let key = kit.generate_symmetric_key().unwrap();
        let header = hex::encode(b"header-v1");
        let blob = kit.encrypt(&key, "c0ffee", Some(&header)).unwrap();

        assert_eq!(kit.decrypt(&key, &blob, Some(&header)).unwrap(), "c0ffee");
        assert_eq!(
            kit.decrypt(&key, &blob, Some(&hex::encode(b"header-v2"))),
            Err(CryptoError::AuthenticationFailed)
        );
        assert_eq!(
            kit.decrypt(&key, &blob, None),
            Err(CryptoError::AuthenticationFailed)
        );
    }

    #[test]
    fn test_cipher_mismatch_fails_authentication() {
        let aes = toolkit_with(ToolkitConfig::default(), 7);
        let chacha = toolkit_with(
            ToolkitConfig::default().with_cipher(Cipher::ChaCha20Poly1305),
            7,
        );
        let key = aes.generate_symmetric_key().unwrap();
        let blob = aes.encrypt(&key, "abcdef", None).unwrap();

        assert_eq!(
            chacha.decrypt(&key, &blob, None),
            Err(CryptoError::AuthenticationFailed)
        );
    }

    #[test]
    fn test_malformed_inputs() {
        let kit = seeded_toolkit(8);
        let key = kit.generate_symmetric_key().unwrap();

        // Shorter than nonce + tag
        assert!(matches!(
            kit.decrypt(&key, &"00".repeat(27), None),
            Err(CryptoError::MalformedInput(_))
        ));
        // Key of the wrong length
        assert!(matches!(
            kit.encrypt(&"00".repeat(16), "00", None),
            Err(CryptoError::MalformedInput(_))
        ));
        // Not hex
        assert!(matches!(
            kit.encrypt(&key, "xyz", None),
            Err(CryptoError::MalformedInput(_))
        ));
    }

    // =============================================================================
    // PUBLIC-KEY ENCRYPTION
    // =============================================================================

    #[test]
    fn test_sealed_box_flow() {
        for config in configs() {
            let kit = toolkit_with(config, 9);
            let recipient = kit.generate_key_pair().unwrap();
            let stranger = kit.generate_key_pair().unwrap();
            let plaintext = hex::encode(b"for your eyes only");

            let sealed = kit
                .encrypt_with_public_key(&recipient.public_key, &plaintext)
                .unwrap();

            // ephemeral key (33) + nonce (12) + ciphertext + tag (16)
            assert_eq!(hex::decode(&sealed).unwrap().len(), 33 + 12 + 18 + 16);
            assert_eq!(
                kit.decrypt_with_private_key(&recipient.private_key, &sealed)
                    .unwrap(),
                plaintext
            );
            assert_eq!(
                kit.decrypt_with_private_key(&stranger.private_key, &sealed),
                Err(CryptoError::AuthenticationFailed)
            );
        }
    }

    #[test]
    fn test_sealed_box_rejects_truncation() {
        let kit = seeded_toolkit(10);
        let recipient = kit.generate_key_pair().unwrap();

        assert!(matches!(
            kit.decrypt_with_private_key(&recipient.private_key, &"02".repeat(60)),
            Err(CryptoError::MalformedInput(_))
        ));
    }

    // =============================================================================
    // RANDOMNESS & ENCODING
    // =============================================================================

    #[test]
    fn test_random_bytes_lengths_and_distinctness() {
        let kit = seeded_toolkit(11);

        assert_eq!(kit.random_bytes(0).unwrap(), "");
        assert_eq!(kit.random_bytes(1).unwrap().len(), 2);

        let draws: HashSet<String> = (0..64).map(|_| kit.random_bytes(32).unwrap()).collect();
        assert_eq!(draws.len(), 64);
    }

    #[test]
    fn test_base64_boundary_end_to_end() {
        let kit = toolkit_with(ToolkitConfig::default().with_encoding(Encoding::Base64), 12);
        let keys = kit.generate_key_pair().unwrap();
        let key = kit.generate_symmetric_key().unwrap();

        assert_eq!(key.len(), 44);
        let blob = kit.encrypt(&key, "aGVsbG8gd29ybGQ=", None).unwrap();
        assert_eq!(kit.decrypt(&key, &blob, None).unwrap(), "aGVsbG8gd29ybGQ=");

        let sealed = kit
            .encrypt_with_public_key(&keys.public_key, "aGk=")
            .unwrap();
        assert_eq!(
            kit.decrypt_with_private_key(&keys.private_key, &sealed).unwrap(),
            "aGk="
        );

        // Hex is not valid here
        assert!(matches!(
            kit.hash("zz!!"),
            Err(CryptoError::MalformedInput(_))
        ));
    }
}
