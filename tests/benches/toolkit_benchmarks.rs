//! # CryptoKit Benchmarks
//!
//! | Area | Operation |
//! |------|-----------|
//! | Hashing | Keccak-256, SHA-256, SHA3-256, BLAKE3 |
//! | secp256k1 | sign, verify, recover, batch verify |
//! | AEAD | AES-256-GCM and ChaCha20-Poly1305 encrypt/decrypt |
//! | ECIES | seal, open |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use cryptokit::{
    Cipher, CryptoToolkit, CryptoToolkitApi, HashAlgorithm, ToolkitConfig, VerificationItem,
};
use std::time::Duration;

// ============================================================================
// Hashing
// ============================================================================

fn bench_hashing(c: &mut Criterion) {
    let mut group = c.benchmark_group("hashing");
    let data = vec![0xA5u8; 4096];

    for algorithm in [
        HashAlgorithm::Keccak256,
        HashAlgorithm::Sha256,
        HashAlgorithm::Sha3_256,
        HashAlgorithm::Blake3,
    ] {
        let kit = CryptoToolkit::new(ToolkitConfig::default().with_hash_algorithm(algorithm))
            .expect("valid config");

        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("digest_4k", format!("{algorithm:?}")),
            &data,
            |b, data| b.iter(|| black_box(kit.hasher().digest(data))),
        );
    }

    group.finish();
}

// ============================================================================
// secp256k1
// ============================================================================

fn bench_signatures(c: &mut Criterion) {
    let mut group = c.benchmark_group("secp256k1");
    group.measurement_time(Duration::from_secs(10));

    let kit = CryptoToolkit::default();
    let keys = kit.generate_key_pair().expect("keygen");
    let digest = kit.hash_text("benchmark transaction");
    let signature = kit.sign_digest(&keys.private_key, &digest).expect("sign");

    group.bench_function("sign_digest", |b| {
        b.iter(|| black_box(kit.sign_digest(&keys.private_key, &digest)))
    });

    group.bench_function("verify_digest", |b| {
        b.iter(|| black_box(kit.verify_digest(&keys.public_key, &digest, &signature)))
    });

    group.bench_function("recover_address", |b| {
        b.iter(|| black_box(kit.recover_address(&digest, &signature)))
    });

    let engine = kit.asymmetric();
    for size in [10, 100, 500] {
        let items: Vec<VerificationItem> = (0..size)
            .map(|i| {
                let pair = engine.generate_key_pair().expect("keygen");
                let digest = kit.hasher().digest(format!("message_{i}").as_bytes());
                VerificationItem {
                    public_key: *pair.public_key(),
                    signature: engine.sign(pair.private_key(), &digest).expect("sign"),
                    digest,
                }
            })
            .collect();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("batch_verify", size), &items, |b, items| {
            b.iter(|| black_box(engine.batch_verify(items)))
        });
    }

    group.finish();
}

// ============================================================================
// AEAD
// ============================================================================

fn bench_symmetric(c: &mut Criterion) {
    let mut group = c.benchmark_group("aead");

    for cipher in [Cipher::Aes256Gcm, Cipher::ChaCha20Poly1305] {
        let kit = CryptoToolkit::new(ToolkitConfig::default().with_cipher(cipher))
            .expect("valid config");
        let engine = kit.symmetric();
        let key = engine.generate_key().expect("key");

        for size in [64usize, 1024, 16 * 1024] {
            let plaintext = vec![0x42u8; size];
            let blob = engine.encrypt(&key, &plaintext, None).expect("encrypt");
            let label = format!("{cipher:?}/{size}");

            group.throughput(Throughput::Bytes(size as u64));
            group.bench_with_input(BenchmarkId::new("encrypt", &label), &plaintext, |b, pt| {
                b.iter(|| black_box(engine.encrypt(&key, pt, None)))
            });
            group.bench_with_input(BenchmarkId::new("decrypt", &label), &blob, |b, blob| {
                b.iter(|| black_box(engine.decrypt(&key, blob, None)))
            });
        }
    }

    group.finish();
}

// ============================================================================
// Public-key encryption
// ============================================================================

fn bench_ecies(c: &mut Criterion) {
    let mut group = c.benchmark_group("ecies");

    let kit = CryptoToolkit::default();
    let keys = kit.generate_key_pair().expect("keygen");
    let plaintext = hex::encode([0x11u8; 256]);
    let sealed = kit
        .encrypt_with_public_key(&keys.public_key, &plaintext)
        .expect("seal");

    group.bench_function("seal_256", |b| {
        b.iter(|| black_box(kit.encrypt_with_public_key(&keys.public_key, &plaintext)))
    });
    group.bench_function("open_256", |b| {
        b.iter(|| black_box(kit.decrypt_with_private_key(&keys.private_key, &sealed)))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_hashing,
    bench_signatures,
    bench_symmetric,
    bench_ecies
);
criterion_main!(benches);
