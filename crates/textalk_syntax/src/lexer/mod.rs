//! Lexer for TexTalk statement text.
//!
//! Recognizes, in priority order:
//! - literal markers (`:Type:`, `:Statement:`, `:Expression:`)
//! - backtick-quoted raw identifiers
//! - `\`, then the keywords `is`, `as`, `in`, `notin` (only as whole words)
//! - `::=`, `:=`, `!=`, `=` (the last two only when they are not the start of a longer operator run)
//! - `...`, optionally glued to an operator run (`...+`)
//! - single-character punctuation
//! - numbers, letter-led identifiers (optionally ending in `?`) and operator runs
//!
//! ## Notes
//! - Lexing never fails: unrecognized characters are reported and skipped, and scanning continues.
//! - Rows and columns are 0-based and count characters; spans are byte offsets.

pub mod tokens;

pub use tokens::{Token, TokenKind, TokenStream};

use crate::ast::{Location, Span};
use crate::diagnostics::ParseError;
use textalk_core::lang::keywords::{self, KeywordId};
use textalk_core::lang::markers::{self, MarkerId};
use textalk_core::lang::operators::is_operator_char;
use textalk_core::lang::punctuation::{self, PunctuationId};

/// Keywords in the order the lexer tries them.
const WORD_KEYWORDS: &[KeywordId] = &[KeywordId::NotIn, KeywordId::Is, KeywordId::As, KeywordId::In];

/// Relation symbols, longest first.
const RELATION_SYMBOLS: &[PunctuationId] = &[
    PunctuationId::ColonColonEquals,
    PunctuationId::ColonEquals,
    PunctuationId::NotEquals,
    PunctuationId::Equals,
];

/// Tokens plus every lexical diagnostic.
///
/// `tokens` always ends with an `Eof` token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexResult {
    pub tokens: Vec<Token>,
    pub errors: Vec<ParseError>,
}

// ============================================================================
// LEXER STATE
// ============================================================================

/// Lexer for a single TexTalk statement.
pub struct Lexer<'a> {
    source: &'a str,
    /// Byte offset of the next unread character.
    pos: usize,
    row: usize,
    column: usize,
    tokens: Vec<Token>,
    errors: Vec<ParseError>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            pos: 0,
            row: 0,
            column: 0,
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Tokenize the entire input.
    pub fn tokenize(mut self) -> LexResult {
        loop {
            self.skip_whitespace();
            if self.is_at_end() {
                break;
            }
            self.scan_token();
        }

        let location = self.location();
        self.tokens.push(Token::new(
            TokenKind::Eof,
            "",
            Span::new(self.pos, self.pos),
            location,
        ));

        LexResult {
            tokens: self.tokens,
            errors: self.errors,
        }
    }

    // ========================================================================
    // Core character handling
    // ========================================================================

    fn is_at_end(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn rest(&self) -> &'a str {
        &self.source[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Character `n` positions after the current one (`peek_at(0) == peek()`).
    fn peek_at(&self, n: usize) -> Option<char> {
        self.rest().chars().nth(n)
    }

    fn location(&self) -> Location {
        Location::new(self.row, self.column)
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.row += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    /// Consume `n` characters.
    fn advance_by(&mut self, n: usize) {
        for _ in 0..n {
            self.advance();
        }
    }

    fn advance_while(&mut self, pred: impl Fn(char) -> bool) {
        while self.peek().is_some_and(&pred) {
            self.advance();
        }
    }

    fn skip_whitespace(&mut self) {
        self.advance_while(char::is_whitespace);
    }

    // ========================================================================
    // Main scanning dispatch
    // ========================================================================

    fn scan_token(&mut self) {
        let start = self.pos;
        let location = self.location();

        if let Some(marker) = markers::match_prefix(self.rest()) {
            self.advance_by(markers::as_str(marker).chars().count());
            self.add(TokenKind::Marker(marker), start, location);
            return;
        }

        let Some(c) = self.peek() else {
            return;
        };

        if c == '`' {
            self.scan_backtick(start, location);
            return;
        }

        if c == '\\' {
            self.advance();
            self.add(TokenKind::Punctuation(PunctuationId::Backslash), start, location);
            return;
        }

        if let Some(id) = self.match_keyword() {
            self.advance_by(keywords::as_str(id).len());
            self.add(TokenKind::Keyword(id), start, location);
            return;
        }

        if self.scan_relation_symbol(start, location) {
            return;
        }

        if self.rest().starts_with("...") {
            self.advance_by(3);
            if self.peek().is_some_and(is_operator_char) {
                self.advance_while(is_operator_char);
                self.add(TokenKind::Operator, start, location);
            } else {
                self.add(TokenKind::Punctuation(PunctuationId::DotDotDot), start, location);
            }
            return;
        }

        // `==` and `=>` were refused as relation symbols above; they are operator runs, not `=`.
        if is_operator_char(c) {
            self.scan_operator(start, location);
            return;
        }

        if let Some(id) = punctuation::from_char(c) {
            self.advance();
            self.add(TokenKind::Punctuation(id), start, location);
            return;
        }

        if c.is_ascii_digit() {
            self.scan_number(start, location);
        } else if c.is_alphabetic() {
            self.scan_identifier(start, location);
        } else {
            self.advance();
            self.errors.push(ParseError::lexical(
                format!("Unrecognized character '{c}'"),
                location,
                Span::new(start, self.pos),
            ));
        }
    }

    fn add(&mut self, kind: TokenKind, start: usize, location: Location) {
        let text = &self.source[start..self.pos];
        self.tokens.push(Token::new(kind, text, Span::new(start, self.pos), location));
    }

    // ========================================================================
    // Token scanners
    // ========================================================================

    /// Return the keyword at the cursor when it is a whole word (`isomorphic` is an identifier).
    fn match_keyword(&self) -> Option<KeywordId> {
        let rest = self.rest();
        WORD_KEYWORDS.iter().copied().find(|&id| {
            let word = keywords::as_str(id);
            rest.starts_with(word) && !rest[word.len()..].chars().next().is_some_and(is_ident_continue)
        })
    }

    /// Scan `::=`, `:=`, `!=` and `=`. Returns `false` if none applies.
    fn scan_relation_symbol(&mut self, start: usize, location: Location) -> bool {
        let rest = self.rest();
        let found = RELATION_SYMBOLS.iter().copied().find(|&id| {
            let spelling = punctuation::as_str(id);
            // `!=` and `=` only stand alone; `==` or `=>` are operator runs.
            let standalone = matches!(id, PunctuationId::NotEquals | PunctuationId::Equals);
            rest.starts_with(spelling) && !(standalone && self.peek_at(spelling.len()).is_some_and(is_operator_char))
        });
        let Some(id) = found else {
            return false;
        };
        let len = punctuation::as_str(id).len();
        self.advance_by(len);
        self.add(TokenKind::Punctuation(id), start, location);
        true
    }

    fn scan_backtick(&mut self, start: usize, location: Location) {
        // Opening backtick.
        self.advance();
        match self.rest().find('`') {
            Some(offset) => {
                let body = &self.rest()[..offset];
                self.advance_by(body.chars().count() + 1);
                self.add(TokenKind::Identifier, start, location);
            }
            None => {
                self.errors.push(ParseError::lexical(
                    "Expected a terminating `",
                    location,
                    Span::new(start, self.pos),
                ));
            }
        }
    }

    fn scan_number(&mut self, start: usize, location: Location) {
        self.advance_while(|c| c.is_ascii_digit());

        if self.peek() == Some('.') {
            match self.peek_at(1) {
                Some(d) if d.is_ascii_digit() => {
                    self.advance();
                    self.advance_while(|c| c.is_ascii_digit());
                }
                // `1...` is a number followed by `...`.
                Some('.') => {}
                _ => {
                    let dot_location = self.location();
                    let dot_start = self.pos;
                    self.add(TokenKind::Number, start, location);
                    self.advance();
                    self.errors.push(ParseError::lexical(
                        "Expected a digit after the decimal point",
                        dot_location,
                        Span::new(dot_start, self.pos),
                    ));
                    return;
                }
            }
        }

        self.add(TokenKind::Number, start, location);
    }

    fn scan_identifier(&mut self, start: usize, location: Location) {
        self.advance_while(is_ident_continue);
        if self.peek() == Some('?') {
            self.advance();
        }
        self.add(TokenKind::Identifier, start, location);
    }

    fn scan_operator(&mut self, start: usize, location: Location) {
        self.advance_while(is_operator_char);
        if self.rest().starts_with("...") {
            self.advance_by(3);
        }
        self.add(TokenKind::Operator, start, location);
    }
}

// ============================================================================
// Helper functions
// ============================================================================

/// Check if a character can continue an identifier.
///
/// `_` is deliberately excluded: `x_i` is `x` with a subscript.
fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric()
}

/// Lex a statement.
///
/// This is a shorthand for `Lexer::new(source).tokenize()`.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn lex(source: &str) -> LexResult {
    let result = Lexer::new(source).tokenize();
    tracing::debug!(tokens = result.tokens.len(), errors = result.errors.len(), "lexed");
    result
}

// ============================================================================
// TESTS
// ============================================================================
