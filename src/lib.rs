//! Hostkit umbrella crate
//!
//! Re-exports the full `hostkit-core` API so applications can depend on a
//! single crate. See `hostkit-core` for the actual implementation.

pub use hostkit_core::*;
