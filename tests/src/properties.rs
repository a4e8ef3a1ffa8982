//! # Property Tests
//!
//! Randomized checks of the toolkit's round-trip and tamper-evidence
//! guarantees, driven through the public API only.

#[cfg(test)]
mod tests {
    use crate::fixtures::{seeded_toolkit, toolkit_with};
    use cryptokit::{Cipher, CryptoError, CryptoToolkitApi, Signature, ToolkitConfig};
    use proptest::prelude::*;

    fn flip_bit(encoded: &str, bit: usize) -> String {
        let mut bytes = hex::decode(encoded).unwrap();
        bytes[bit / 8] ^= 1 << (bit % 8);
        hex::encode(bytes)
    }

    fn cipher_strategy() -> impl Strategy<Value = Cipher> {
        prop_oneof![Just(Cipher::Aes256Gcm), Just(Cipher::ChaCha20Poly1305)]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_sign_then_verify_and_recover(
            seed in any::<u8>(),
            message in prop::collection::vec(any::<u8>(), 0..256),
        ) {
            let kit = seeded_toolkit(seed);
            let keys = kit.generate_key_pair().unwrap();
            let message = hex::encode(message);

            let signature = kit.sign(&keys.private_key, &message).unwrap();
            let digest = kit.hash(&message).unwrap();

            prop_assert!(kit.verify(&keys.public_key, &message, &signature));
            prop_assert_eq!(kit.recover_address(&digest, &signature).unwrap(), keys.address);
        }

        #[test]
        fn prop_single_bit_flip_breaks_signature(
            seed in any::<u8>(),
            message in prop::collection::vec(any::<u8>(), 1..64),
            bit in 0..Signature::LENGTH * 8,
        ) {
            let kit = seeded_toolkit(seed);
            let keys = kit.generate_key_pair().unwrap();
            let message = hex::encode(message);

            let signature = kit.sign(&keys.private_key, &message).unwrap();
            let tampered = flip_bit(&signature, bit);

            prop_assert!(!kit.verify(&keys.public_key, &message, &tampered));
        }

        #[test]
        fn prop_encrypt_then_decrypt(
            seed in any::<u8>(),
            cipher in cipher_strategy(),
            plaintext in prop::collection::vec(any::<u8>(), 0..512),
            aad in prop::option::of(prop::collection::vec(any::<u8>(), 0..32)),
        ) {
            let kit = toolkit_with(ToolkitConfig::default().with_cipher(cipher), seed);
            let key = kit.generate_symmetric_key().unwrap();
            let plaintext = hex::encode(plaintext);
            let aad = aad.map(hex::encode);

            let blob = kit.encrypt(&key, &plaintext, aad.as_deref()).unwrap();
            prop_assert_eq!(kit.decrypt(&key, &blob, aad.as_deref()).unwrap(), plaintext);
        }

        #[test]
        fn prop_ciphertext_bit_flip_is_detected(
            seed in any::<u8>(),
            cipher in cipher_strategy(),
            plaintext in prop::collection::vec(any::<u8>(), 0..128),
            position in any::<prop::sample::Index>(),
        ) {
            let kit = toolkit_with(ToolkitConfig::default().with_cipher(cipher), seed);
            let key = kit.generate_symmetric_key().unwrap();
            let blob = kit.encrypt(&key, &hex::encode(plaintext), None).unwrap();

            let bits = hex::decode(&blob).unwrap().len() * 8;
            let tampered = flip_bit(&blob, position.index(bits));

            prop_assert_eq!(
                kit.decrypt(&key, &tampered, None),
                Err(CryptoError::AuthenticationFailed)
            );
        }

        #[test]
        fn prop_sealed_box_round_trip(
            seed in any::<u8>(),
            plaintext in prop::collection::vec(any::<u8>(), 0..256),
        ) {
            let kit = seeded_toolkit(seed);
            let keys = kit.generate_key_pair().unwrap();
            let plaintext = hex::encode(plaintext);

            let sealed = kit.encrypt_with_public_key(&keys.public_key, &plaintext).unwrap();
            prop_assert_eq!(
                kit.decrypt_with_private_key(&keys.private_key, &sealed).unwrap(),
                plaintext
            );
        }

        #[test]
        fn prop_random_draws_have_requested_length(
            seed in any::<u8>(),
            length in 0usize..1024,
        ) {
            let kit = seeded_toolkit(seed);
            let first = kit.random_bytes(length).unwrap();
            let second = kit.random_bytes(length).unwrap();

            prop_assert_eq!(first.len(), length * 2);
            if length >= 16 {
                prop_assert_ne!(first, second);
            }
        }

        #[test]
        fn prop_hash_is_deterministic(
            seed in any::<u8>(),
            data in prop::collection::vec(any::<u8>(), 0..256),
        ) {
            let a = seeded_toolkit(seed);
            let b = seeded_toolkit(seed.wrapping_add(1));
            let data = hex::encode(data);

            prop_assert_eq!(a.hash(&data).unwrap(), b.hash(&data).unwrap());
        }
    }
}
