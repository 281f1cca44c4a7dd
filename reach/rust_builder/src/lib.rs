//! Flutter-Rust bridge wrapper for reach-core.
//!
//! This crate serves as a thin wrapper that re-exports `reach-core` for
//! integration with the Flutter build system via Cargokit. The [`api`]
//! module holds the FFI-facing wrappers.

pub mod api;

pub use reach_core::*;
