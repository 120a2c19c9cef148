#![forbid(unsafe_code)]
//! MathLingua TexTalk
//!
//! TexTalk is the expression language inside MathLingua statements. This crate is the facade over the workspace:
//! it re-exports the syntax frontend and the shared vocabulary, and hosts the `mathlingua` developer binary used to
//! inspect what a statement lexes and resolves to.
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`. Parsing never panics on any input; every failure is a `ParseError`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.

pub mod cli;
pub mod version;

pub use textalk_core::lang;
pub use textalk_syntax::{ast, code, diagnostics, lexer, parser, resolver, tree};
pub use textalk_syntax::{ErrorKind, ParseConfig, ParseError, ParseResult, parse, parse_tokens, parse_with_config};
