//! # Domain Layer
//!
//! Boundary conventions of the toolkit: configuration, encodings and the
//! encoded value types handed to host applications. The cryptography itself
//! lives in `cryptokit-core`.

pub mod config;
pub mod encoding;
pub mod entities;
