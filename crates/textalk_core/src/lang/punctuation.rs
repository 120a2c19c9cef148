//! Punctuation vocabulary.
//!
//! Delimiters, separators and the fixed multi-character markers (`:=`, `::=`, `!=`, `...`) that the lexer recognizes
//! before it falls back to operator-character runs.
//!
//! ## Notes
//! - `=` and `!=` are listed here because the lexer tokenizes them specially, but the operator resolver still treats
//!   them as special operators with their own precedence (see [`crate::lang::operators`]).
//!
//! ## Examples
//! ```rust
//! use textalk_core::lang::punctuation::{self, PunctuationId};
//!
//! assert_eq!(punctuation::from_str("::="), Some(PunctuationId::ColonColonEquals));
//! assert_eq!(punctuation::as_str(PunctuationId::Caret), "^");
//! ```

use super::registry::{Since, Stability};

/// Broad syntactic grouping for punctuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PunctuationCategory {
    /// Brackets and braces.
    Delimiter,
    /// `,`, `:`, `.`.
    Separator,
    /// `_` and `^`.
    Script,
    /// `:=`, `::=`, `=`, `!=`.
    Relation,
    /// `\` and `...`.
    Marker,
}

/// Stable identifier for punctuation tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PunctuationId {
    Backslash,
    Colon,
    Dot,
    Comma,
    Underscore,
    Caret,
    ColonEquals,
    ColonColonEquals,
    Equals,
    NotEquals,
    DotDotDot,
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
}

/// Metadata for a punctuation token.
#[derive(Debug, Clone, Copy)]
pub struct PunctuationInfo {
    pub id: PunctuationId,
    pub canonical: &'static str,
    pub category: PunctuationCategory,
    pub since: Since,
    pub stability: Stability,
}

/// Registry of all punctuation tokens, in [`PunctuationId`] declaration order.
pub const PUNCTUATION: &[PunctuationInfo] = &[
    info(PunctuationId::Backslash, "\\", PunctuationCategory::Marker),
    info(PunctuationId::Colon, ":", PunctuationCategory::Separator),
    info(PunctuationId::Dot, ".", PunctuationCategory::Separator),
    info(PunctuationId::Comma, ",", PunctuationCategory::Separator),
    info(PunctuationId::Underscore, "_", PunctuationCategory::Script),
    info(PunctuationId::Caret, "^", PunctuationCategory::Script),
    info(PunctuationId::ColonEquals, ":=", PunctuationCategory::Relation),
    info(PunctuationId::ColonColonEquals, "::=", PunctuationCategory::Relation),
    info(PunctuationId::Equals, "=", PunctuationCategory::Relation),
    info(PunctuationId::NotEquals, "!=", PunctuationCategory::Relation),
    info(PunctuationId::DotDotDot, "...", PunctuationCategory::Marker),
    info(PunctuationId::LParen, "(", PunctuationCategory::Delimiter),
    info(PunctuationId::RParen, ")", PunctuationCategory::Delimiter),
    info(PunctuationId::LBracket, "[", PunctuationCategory::Delimiter),
    info(PunctuationId::RBracket, "]", PunctuationCategory::Delimiter),
    info(PunctuationId::LBrace, "{", PunctuationCategory::Delimiter),
    info(PunctuationId::RBrace, "}", PunctuationCategory::Delimiter),
];

/// Return the full metadata entry for a punctuation token.
pub fn info_for(id: PunctuationId) -> &'static PunctuationInfo {
    &PUNCTUATION[id as usize]
}

/// Return the canonical spelling for a punctuation token.
pub fn as_str(id: PunctuationId) -> &'static str {
    info_for(id).canonical
}

/// Return the category for a punctuation token.
pub fn category(id: PunctuationId) -> PunctuationCategory {
    info_for(id).category
}

/// Resolve a punctuation spelling to its identifier.
pub fn from_str(s: &str) -> Option<PunctuationId> {
    PUNCTUATION.iter().find(|p| p.canonical == s).map(|p| p.id)
}

/// Return the single-character punctuation matching `c`, if any.
///
/// Multi-character spellings (`:=`, `::=`, `!=`, `...`) never match here; the lexer checks those first.
pub fn from_char(c: char) -> Option<PunctuationId> {
    PUNCTUATION
        .iter()
        .find(|p| {
            let mut chars = p.canonical.chars();
            chars.next() == Some(c) && chars.next().is_none()
        })
        .map(|p| p.id)
}

/// Return the closing delimiter for an opening one.
pub fn closer_for(open: PunctuationId) -> Option<PunctuationId> {
    match open {
        PunctuationId::LParen => Some(PunctuationId::RParen),
        PunctuationId::LBracket => Some(PunctuationId::RBracket),
        PunctuationId::LBrace => Some(PunctuationId::RBrace),
        _ => None,
    }
}

const fn info(id: PunctuationId, canonical: &'static str, category: PunctuationCategory) -> PunctuationInfo {
    PunctuationInfo {
        id,
        canonical,
        category,
        since: Since(0, 1),
        stability: Stability::Stable,
    }
}
