//! Canonical vocabulary for TexTalk, the expression sublanguage embedded in MathLingua statements.
//!
//! This crate is intentionally small and dependency-free. It holds the spellings the lexer recognizes and the
//! metadata the operator resolver consults, so the syntax crate, tooling and docs agree on one table.
//!
//! ## Notes
//!
//! - **No IO**, no global mutable state, and no AST types.
//! - Tables are `const` and lookups are pure functions; the operator table is `Copy` and is passed by reference to
//!   whichever resolver needs it.

pub mod lang;
