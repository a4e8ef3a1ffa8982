//! # Random Source
//!
//! Cryptographically-secure random bytes behind an injectable trait.
//!
//! Production code uses [`OsEntropy`], which reads the operating system
//! CSPRNG on every call. Unit tests and the `test-utils` feature add
//! [`SeededEntropy`], a reproducible generator for deterministic fixtures.
//!
//! A failed OS read surfaces as [`CryptoError::EntropyUnavailable`] and is
//! never retried here: a starved entropy pool does not recover by spinning.

use crate::CryptoError;
use rand::rngs::OsRng;
use rand::RngCore;
use std::sync::Arc;

/// Source of cryptographically-secure random bytes.
///
/// Implementations must be safe to share between threads.
pub trait EntropySource: Send + Sync {
    /// Fill `dest` completely with random bytes.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::EntropyUnavailable` if the source cannot be read.
    fn fill(&self, dest: &mut [u8]) -> Result<(), CryptoError>;
}

impl<T: EntropySource + ?Sized> EntropySource for &T {
    fn fill(&self, dest: &mut [u8]) -> Result<(), CryptoError> {
        (**self).fill(dest)
    }
}

impl<T: EntropySource + ?Sized> EntropySource for Arc<T> {
    fn fill(&self, dest: &mut [u8]) -> Result<(), CryptoError> {
        (**self).fill(dest)
    }
}

/// Operating-system backed entropy (`getrandom` via `OsRng`).
#[derive(Clone, Copy, Debug, Default)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill(&self, dest: &mut [u8]) -> Result<(), CryptoError> {
        let requested = dest.len();
        OsRng.try_fill_bytes(dest).map_err(|e| {
            tracing::warn!(error = %e, requested, "OS entropy source unavailable");
            CryptoError::EntropyUnavailable
        })
    }
}

/// Produce `len` random bytes. A zero length yields an empty vector.
pub fn random_bytes<E: EntropySource + ?Sized>(
    source: &E,
    len: usize,
) -> Result<Vec<u8>, CryptoError> {
    let mut out = vec![0u8; len];
    if len > 0 {
        source.fill(&mut out)?;
    }
    Ok(out)
}

/// Produce a fixed-size random array.
pub fn random_array<const N: usize, E: EntropySource + ?Sized>(
    source: &E,
) -> Result<[u8; N], CryptoError> {
    let mut out = [0u8; N];
    source.fill(&mut out)?;
    Ok(out)
}

// =============================================================================
// DETERMINISTIC SOURCE (tests only)
// =============================================================================

/// Seeded, reproducible entropy for tests.
///
/// Never use this outside of tests: every instance with the same seed yields
/// the same byte stream.
#[cfg(any(test, feature = "test-utils"))]
#[derive(Debug)]
pub struct SeededEntropy {
    rng: std::sync::Mutex<rand::rngs::StdRng>,
}

#[cfg(any(test, feature = "test-utils"))]
impl SeededEntropy {
    /// Create a generator from a 32-byte seed.
    pub fn from_seed(seed: [u8; 32]) -> Self {
        use rand::SeedableRng;
        Self {
            rng: std::sync::Mutex::new(rand::rngs::StdRng::from_seed(seed)),
        }
    }
}

#[cfg(any(test, feature = "test-utils"))]
impl EntropySource for SeededEntropy {
    fn fill(&self, dest: &mut [u8]) -> Result<(), CryptoError> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| CryptoError::EntropyUnavailable)?;
        rng.fill_bytes(dest);
        Ok(())
    }
}
