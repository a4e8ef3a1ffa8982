//! Shared fixtures for integration and property tests.

use cryptokit::{CryptoToolkit, ToolkitConfig};
use cryptokit_core::SeededEntropy;
use tracing_subscriber::EnvFilter;

/// Toolkit whose randomness is reproducible from a one-byte seed.
pub type SeededToolkit = CryptoToolkit<SeededEntropy>;

/// Install a test-friendly subscriber once; honours `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Default-configured toolkit seeded with `seed`.
pub fn seeded_toolkit(seed: u8) -> SeededToolkit {
    toolkit_with(ToolkitConfig::default(), seed)
}

/// Toolkit with a custom configuration, seeded with `seed`.
///
/// # Panics
/// If `config` does not validate.
pub fn toolkit_with(config: ToolkitConfig, seed: u8) -> SeededToolkit {
    CryptoToolkit::with_entropy(config, SeededEntropy::from_seed([seed; 32]))
        .expect("fixture config must be valid")
}

/// Hex form of the private key `1`.
pub fn scalar_one() -> String {
    format!("{}01", "00".repeat(31))
}
