//! Parser for TexTalk statement text.
//!
//! Builds a flat, unresolved [`ExpressionNode`] from a token stream. Relation and operator structure is added
//! afterwards by [`crate::resolver`]; [`parse`] and [`parse_with_config`] run the whole pipeline.
//!
//! ## Examples
//!
//! ```rust
//! use textalk_syntax::{lexer, parser};
//!
//! let lexed = lexer::lex(r"\set{x} is A");
//! let raw = parser::parse_tokens(lexed.tokens);
//! assert!(raw.is_ok());
//! assert_eq!(raw.root.children.len(), 3);
//! ```

use crate::ast::*;
use crate::config::ParseConfig;
use crate::diagnostics::{ParseError, ParseResult};
use crate::lexer::{self, Token, TokenKind, TokenStream};
use crate::resolver;
use textalk_core::lang::keywords::KeywordId;
use textalk_core::lang::punctuation::{self, PunctuationId};

// NOTE: This module is split across multiple files using `include!` to keep all parser
// methods in the same Rust module (preserving privacy + call patterns) while avoiding
// a single large source file.

include!("parser/core.rs");
include!("parser/helpers.rs");
include!("parser/expr.rs");
include!("parser/command.rs");
include!("parser/groups.rs");
include!("parser/util.rs");
include!("parser/api.rs");
include!("parser/tests.rs");
