/// Token-stream helpers.
///
/// This chunk contains the low-level primitives used throughout parsing:
/// - Peeking/consuming tokens (`peek`, `peek_peek`, `advance`)
/// - Matching keywords and punctuation
/// - Adjacency checks for glued suffixes
impl Parser {
    // ========================================================================
    // Helpers
    // ========================================================================

    /// Return `true` if the current token is [`TokenKind::Eof`].
    fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    fn peek(&self) -> &Token {
        self.tokens.peek()
    }

    fn peek_peek(&self) -> &Token {
        self.tokens.peek_peek()
    }

    /// Consume the current token and return it.
    fn advance(&mut self) -> Token {
        let token = self.tokens.next();
        if token.kind != TokenKind::Eof {
            self.prev_end = token.span.end;
        }
        token
    }

    fn check_punct(&self, id: PunctuationId) -> bool {
        self.peek().is_punctuation(id)
    }

    fn match_punct(&mut self, id: PunctuationId) -> bool {
        if self.check_punct(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Return `true` if the current token starts exactly where the previous one ended.
    fn is_adjacent(&self) -> bool {
        self.peek().span.start == self.prev_end
    }

    /// Consume a `...` glued to the previous token, if present.
    fn match_glued_vararg(&mut self) -> bool {
        if self.check_punct(PunctuationId::DotDotDot) && self.is_adjacent() {
            self.advance();
            true
        } else {
            false
        }
    }

    fn error_at(&self, token: &Token, message: impl Into<String>) -> ParseError {
        ParseError::syntax(message, token.location, token.span)
    }
}
