/// Parser core types and entrypoint.
///
/// This chunk defines the [`Parser`] type and its top-level `parse()` entrypoint.
///
/// ## Notes
/// - This file is `include!`'d into `crate::parser` to keep all parser methods in a
///   single module while avoiding a single “god file”.
/// - Error recovery is token-level: an unexpected token is reported and skipped, and parsing continues with the next
///   one, so a single call can report several independent problems.
pub struct Parser {
    tokens: TokenStream,
    /// Byte offset just past the last consumed token; used for adjacency checks (`x...`, `\in/`).
    prev_end: usize,
    errors: Vec<ParseError>,
}

impl Parser {
    /// Create a new parser for a token stream.
    ///
    /// ## Parameters
    /// - `tokens`: Token stream produced by `textalk_syntax::lexer`.
    pub fn new(tokens: TokenStream) -> Self {
        Self {
            tokens,
            prev_end: 0,
            errors: Vec::new(),
        }
    }

    /// Parse the whole token stream into one unresolved expression.
    ///
    /// Never fails: diagnostics are returned alongside whatever could be built.
    pub fn parse(mut self) -> (ExpressionNode, Vec<ParseError>) {
        let root = self.expression(&[]);
        (root, self.errors)
    }
}
