//! # CryptoKit Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # Seeded toolkits, tracing setup
//! ├── properties.rs     # Property tests over the public API
//! │
//! └── integration/      # End-to-end flows through the facade
//!     ├── signing_flows.rs
//!     └── encryption_flows.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p cryptokit-tests
//!
//! # By category
//! cargo test -p cryptokit-tests integration::
//! cargo test -p cryptokit-tests properties::
//!
//! # Benchmarks
//! cargo bench -p cryptokit-tests
//! ```

pub mod fixtures;
pub mod properties;
