//! Diagnostics produced while lexing, parsing and resolving a TexTalk statement.
//!
//! Lexer and parser diagnostics are accumulated and always point at a token. Resolver diagnostics are fail-fast and
//! describe a whole expression, so they carry no location.

use std::fmt;

use miette::{Diagnostic, LabeledSpan};
use thiserror::Error;

use crate::ast::{ExpressionNode, Location, Span};

/// Which stage produced a [`ParseError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Lexical,
    Syntax,
    Resolution,
}

impl ErrorKind {
    fn code(self) -> &'static str {
        match self {
            ErrorKind::Lexical => "textalk::lexical",
            ErrorKind::Syntax => "textalk::syntax",
            ErrorKind::Resolution => "textalk::resolution",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Lexical => write!(f, "lexical error"),
            ErrorKind::Syntax => write!(f, "syntax error"),
            ErrorKind::Resolution => write!(f, "resolution error"),
        }
    }
}

/// A single diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ParseError {
    pub message: String,
    pub kind: ErrorKind,
    pub location: Option<Location>,
    pub span: Option<Span>,
}

impl ParseError {
    pub fn lexical(message: impl Into<String>, location: Location, span: Span) -> Self {
        Self {
            message: message.into(),
            kind: ErrorKind::Lexical,
            location: Some(location),
            span: Some(span),
        }
    }

    pub fn syntax(message: impl Into<String>, location: Location, span: Span) -> Self {
        Self {
            message: message.into(),
            kind: ErrorKind::Syntax,
            location: Some(location),
            span: Some(span),
        }
    }

    pub fn resolution(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ErrorKind::Resolution,
            location: None,
            span: None,
        }
    }
}

impl Diagnostic for ParseError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.kind.code()))
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.span?;
        let label = LabeledSpan::at((span.start, span.len()), "here");
        Some(Box::new(std::iter::once(label)))
    }
}

/// Output of a parse: the (possibly partial) tree and every diagnostic raised on the way.
///
/// A parse never fails outright. When the resolver aborts, `root` is an empty expression and `errors` holds the
/// reason.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParseResult {
    pub root: ExpressionNode,
    pub errors: Vec<ParseError>,
}

impl ParseResult {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_error_has_no_location() {
        let err = ParseError::resolution("two infix operators side by side");
        assert_eq!(err.to_string(), "two infix operators side by side");
        assert!(err.location.is_none());
        assert!(err.labels().is_none());
    }

    #[test]
    fn test_lexical_error_labels_span() {
        let err = ParseError::lexical("Unrecognized character '#'", Location::new(0, 2), Span::new(2, 3));
        let code = err.code().map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("textalk::lexical"));
        let labels: Vec<_> = err.labels().into_iter().flatten().collect();
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].offset(), 2);
        assert_eq!(labels[0].len(), 1);
    }
}
