//! # Ports Layer
//!
//! Trait definitions for the hexagonal architecture.
//! - **Inbound (Driving)**: API that host applications call
//! - **Outbound (Driven)**: the entropy source, defined in `cryptokit-core`
//!   as [`EntropySource`](cryptokit_core::EntropySource)

pub mod inbound;
