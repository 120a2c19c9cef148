//! Version information.
//!
//! The value is taken from Cargo metadata (`CARGO_PKG_VERSION`) at compile time; prefer this constant over repeating
//! `env!("CARGO_PKG_VERSION")`.

/// The MathLingua tooling version string (for example, `0.1.0-alpha.4`).
pub const MATHLINGUA_VERSION: &str = env!("CARGO_PKG_VERSION");
