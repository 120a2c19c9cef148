//! TexTalk vocabulary registries.
//!
//! Callers work with **stable IDs** (`KeywordId`, `PunctuationId`, `MarkerId`) and look up spellings through the
//! registry tables instead of scattering string literals across the lexer and parser.
//!
//! ## Examples
//! ```rust
//! use textalk_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("notin"), Some(KeywordId::NotIn));
//! assert_eq!(keywords::as_str(KeywordId::Is), "is");
//! ```

pub mod keywords;
pub mod markers;
pub mod operators;
pub mod punctuation;
pub mod registry;
