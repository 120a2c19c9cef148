/// Miscellaneous parser utilities: turning tokens into leaves.
impl Parser {
    /// Consume the current token as a leaf of the given kind.
    fn text(&mut self, kind: TextKind) -> TexTalkNode {
        TexTalkNode::Text(self.text_node(kind))
    }

    fn text_node(&mut self, kind: TextKind) -> TextNode {
        let token = self.advance();
        TextNode::new(kind, token.text).at(token.location)
    }
}

fn keyword_text_kind(id: KeywordId) -> TextKind {
    match id {
        KeywordId::Is => TextKind::Is,
        KeywordId::As => TextKind::As,
        KeywordId::In => TextKind::In,
        KeywordId::NotIn => TextKind::NotIn,
    }
}

/// Return `true` for a token that can name a command part or named group.
fn is_name_token(token: &Token) -> bool {
    matches!(token.kind, TokenKind::Identifier | TokenKind::Keyword(_))
}
