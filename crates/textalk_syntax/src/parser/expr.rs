/// Expression parsing.
///
/// An expression is a flat list of items read until the end of input or one of the caller's terminators. Each
/// position tries, in order: a command, a mapping or identifier, a paren group, a curly group, a keyword marker, an
/// operator symbol, and finally the remaining single tokens that the resolvers give meaning to.
impl Parser {
    // ========================================================================
    // Expressions
    // ========================================================================

    /// Parse items until end of input or a token in `terminators` (which is left unconsumed).
    fn expression(&mut self, terminators: &[PunctuationId]) -> ExpressionNode {
        let mut children = Vec::new();
        loop {
            if self.is_at_end() || terminators.iter().any(|&id| self.check_punct(id)) {
                break;
            }
            let before = self.peek().span.start;
            match self.item() {
                Ok(Some(node)) => children.push(node),
                Ok(None) => {
                    let token = self.advance();
                    let err = self.error_at(&token, format!("Unexpected token '{}'", token.text));
                    self.errors.push(err);
                }
                Err(err) => {
                    self.errors.push(err);
                    // The failing rule consumed its lead token; make sure we never spin in place.
                    if self.peek().span.start == before && !self.is_at_end() {
                        self.advance();
                    }
                }
            }
        }
        ExpressionNode::new(children)
    }

    /// Parse one expression item, or return `Ok(None)` (consuming nothing) when no rule applies.
    fn item(&mut self) -> Result<Option<TexTalkNode>, ParseError> {
        let kind = self.peek().kind;
        let node = match kind {
            TokenKind::Punctuation(PunctuationId::Backslash) => self.command()?,
            TokenKind::Identifier => self.mapping_or_identifier(),
            TokenKind::Punctuation(PunctuationId::LParen) => TexTalkNode::Group(self.group(GroupKind::Paren)),
            TokenKind::Punctuation(PunctuationId::LBrace) => TexTalkNode::Group(self.group(GroupKind::Curly)),
            TokenKind::Keyword(id) => self.text(keyword_text_kind(id)),
            TokenKind::Operator
            | TokenKind::Punctuation(PunctuationId::Equals)
            | TokenKind::Punctuation(PunctuationId::NotEquals) => self.text(TextKind::Operator),
            TokenKind::Punctuation(PunctuationId::Comma) => self.text(TextKind::Comma),
            TokenKind::Punctuation(PunctuationId::Caret) => self.text(TextKind::Caret),
            TokenKind::Punctuation(PunctuationId::Underscore) => self.text(TextKind::Underscore),
            TokenKind::Punctuation(PunctuationId::ColonEquals) => self.text(TextKind::ColonEquals),
            TokenKind::Punctuation(PunctuationId::ColonColonEquals) => self.text(TextKind::ColonColonEquals),
            TokenKind::Punctuation(PunctuationId::DotDotDot) => self.text(TextKind::DotDotDot),
            TokenKind::Marker(_) => self.text(TextKind::Marker),
            TokenKind::Number => self.text(TextKind::Number),
            _ => return Ok(None),
        };
        Ok(Some(node))
    }

    /// Parse `name`, `name...`, `name_{..}` or `name_{..}(..)`.
    ///
    /// A plain `f(x)` is left as an identifier followed by a paren group; the operator resolver groups it as a call.
    fn mapping_or_identifier(&mut self) -> TexTalkNode {
        let name = self.text_node(TextKind::Identifier);

        let has_sub = self.check_punct(PunctuationId::Underscore)
            && self.peek_peek().is_punctuation(PunctuationId::LBrace);
        if !has_sub {
            let name = if self.match_glued_vararg() { name.vararg() } else { name };
            return TexTalkNode::Text(name);
        }

        self.advance();
        let sub = self.group(GroupKind::Curly);
        let paren = if self.check_punct(PunctuationId::LParen) {
            Some(self.group(GroupKind::Paren))
        } else {
            None
        };
        TexTalkNode::Mapping(MappingNode {
            name,
            sub: Some(sub),
            paren,
        })
    }
}
