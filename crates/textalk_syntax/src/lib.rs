//! TexTalk syntax frontend for MathLingua: lexer, parser, relation and operator resolution, and the tree kit.
//!
//! TexTalk is the LaTeX-flavored notation used inside MathLingua statements (`x \in/ A`, `f(x) := x + 1`,
//! `\function:on{A}:to{B}`). This crate turns one statement string into a resolved expression tree plus diagnostics,
//! and turns trees back into canonical text.
//!
//! ## Notes
//! - Syntax only: no symbol lookup, no validation of mathematical content.
//! - Vocabulary identity (keywords/markers/punctuation/operator precedence) comes from `textalk_core::lang`
//!   registries.
//! - No global state: every call builds its own lexer, parser and resolvers, so independent statements can be parsed
//!   in parallel by the caller.
//!
//! ## Examples
//! ```rust
//! use textalk_syntax::ast::TexTalkNode;
//!
//! let result = textalk_syntax::parse(r"x, y is \set");
//! assert!(result.is_ok());
//! let TexTalkNode::Is(rel) = &result.root.children[0] else { panic!() };
//! assert_eq!(rel.lhs.items.len(), 2);
//! assert_eq!(result.root.to_code(), r"x, y is \set");
//! ```
//!
//! ## See also
//! - `textalk_core::lang` for registry-backed language vocabulary.

pub mod ast;
pub mod code;
pub mod config;
pub mod diagnostics;
pub mod lexer;
pub mod parser;
pub mod resolver;
pub mod token_helpers;
pub mod tree;

pub use config::ParseConfig;
pub use diagnostics::{ErrorKind, ParseError, ParseResult};
pub use parser::{parse, parse_tokens, parse_with_config};
