//! Token types for the TexTalk lexer.
//!
//! Vocabulary tokens carry registry IDs from `textalk_core::lang`:
//! - `Keyword(KeywordId)` for `is`, `as`, `in`, `notin`
//! - `Punctuation(PunctuationId)` for delimiters, `\`, `:=`, `=`, `...` and friends
//! - `Marker(MarkerId)` for `:Type:`, `:Statement:`, `:Expression:`
//!
//! ## Notes
//! - Every token keeps its exact source text, so identifiers, numbers and operator runs need no payload.
//! - Use `crate::token_helpers` for ergonomic token matching at call sites.

use crate::ast::{Location, Span};
use textalk_core::lang::keywords::KeywordId;
use textalk_core::lang::markers::MarkerId;
use textalk_core::lang::punctuation::PunctuationId;

// ============================================================================
// TOKEN TYPES
// ============================================================================

/// Kind of token produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // ========== Vocabulary (ID-based) ==========
    Keyword(KeywordId),
    Punctuation(PunctuationId),
    Marker(MarkerId),

    // ========== Identifiers and literals ==========
    /// Letter-led name (optionally ending in `?`) or a backtick-quoted raw identifier.
    Identifier,
    /// Digit-led name, possibly with one decimal point.
    Number,
    /// Run of operator characters, possibly led by or ending in `...`.
    Operator,

    // ========== Special ==========
    Eof,
}

/// A token with its kind, source text and position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
    pub location: Location,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span, location: Location) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
            location,
        }
    }
}

/// Token cursor with two tokens of lookahead.
///
/// Reading past the end keeps returning the trailing `Eof` token, so the parser never has to special-case the end of
/// input.
#[derive(Debug, Clone)]
pub struct TokenStream {
    tokens: Vec<Token>,
    pos: usize,
    eof: Token,
}

impl TokenStream {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        let eof = match tokens.last() {
            Some(last) if last.kind == TokenKind::Eof => last.clone(),
            Some(last) => Token::new(
                TokenKind::Eof,
                "",
                Span::new(last.span.end, last.span.end),
                last.location,
            ),
            None => Token::new(TokenKind::Eof, "", Span::default(), Location::default()),
        };
        // Eof is tracked separately; the vector only holds real tokens.
        if tokens.last().is_some_and(|t| t.kind == TokenKind::Eof) {
            tokens.pop();
        }
        Self { tokens, pos: 0, eof }
    }

    /// Current token.
    pub fn peek(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&self.eof)
    }

    /// Token after the current one.
    pub fn peek_peek(&self) -> &Token {
        self.tokens.get(self.pos + 1).unwrap_or(&self.eof)
    }

    /// Consume and return the current token.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Token {
        let token = self.peek().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }
}
