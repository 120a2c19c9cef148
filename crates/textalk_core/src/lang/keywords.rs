//! Reserved words of TexTalk.
//!
//! TexTalk only reserves the relation words `is`, `in`, `notin` and the alias word `as`. Everything else that looks
//! like a word is an identifier.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**.
//! - The lexer only matches a keyword when it is not immediately followed by an identifier-continuation character,
//!   so `isomorphic` and `integers` stay identifiers. That rule lives in the lexer; this module only stores spellings.
//!
//! ## Examples
//! ```rust
//! use textalk_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("in"), Some(KeywordId::In));
//! assert_eq!(keywords::from_str("In"), None);
//! ```

use super::registry::{Example, Since, Stability};

/// Stable identifier for every reserved word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordId {
    Is,
    As,
    In,
    NotIn,
}

/// Whether a keyword splits an expression into a relation or is only a marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordCategory {
    /// Folded into a relation node by the relation resolver.
    Relation,
    /// Kept as a plain marker token.
    Marker,
}

/// Metadata for a keyword.
#[derive(Debug, Clone, Copy)]
pub struct KeywordInfo {
    pub id: KeywordId,
    pub canonical: &'static str,
    pub category: KeywordCategory,
    pub since: Since,
    pub stability: Stability,
    pub examples: &'static [Example],
}

/// Registry of all keywords, in [`KeywordId`] declaration order.
pub const KEYWORDS: &[KeywordInfo] = &[
    info(
        KeywordId::Is,
        "is",
        KeywordCategory::Relation,
        &[Example {
            code: "G is \\group",
            note: Some("Folded into an `Is` node."),
        }],
    ),
    info(KeywordId::As, "as", KeywordCategory::Marker, &[]),
    info(
        KeywordId::In,
        "in",
        KeywordCategory::Relation,
        &[Example {
            code: "x in A",
            note: Some("Folded into an `In` node."),
        }],
    ),
    info(
        KeywordId::NotIn,
        "notin",
        KeywordCategory::Relation,
        &[Example {
            code: "x notin A",
            note: Some("Folded into a `NotIn` node by the same pass as `in`."),
        }],
    ),
];

/// Return the full metadata entry for a keyword.
pub fn info_for(id: KeywordId) -> &'static KeywordInfo {
    &KEYWORDS[id as usize]
}

/// Return the canonical spelling for a keyword.
pub fn as_str(id: KeywordId) -> &'static str {
    info_for(id).canonical
}

/// Resolve a spelling to a keyword id.
pub fn from_str(s: &str) -> Option<KeywordId> {
    KEYWORDS.iter().find(|k| k.canonical == s).map(|k| k.id)
}

// --- helpers -----------------------------------------------------------------

const fn info(
    id: KeywordId,
    canonical: &'static str,
    category: KeywordCategory,
    examples: &'static [Example],
) -> KeywordInfo {
    KeywordInfo {
        id,
        canonical,
        category,
        since: Since(0, 1),
        stability: Stability::Stable,
        examples,
    }
}
