/// Command parsing.
///
/// A command is `\` followed by one or more `.`-separated parts:
///
/// ```text
/// \name[square]_{sub}^{sup}{curly}...{curly}(paren):named{..}...:named{..}
/// ```
///
/// A part name is an identifier (keywords such as `in` count), an operator symbol, or `^`. A `/` glued to the end
/// marks the command as usable as an infix operator (`x \in/ A`).
impl Parser {
    // ========================================================================
    // Commands
    // ========================================================================

    fn command(&mut self) -> Result<TexTalkNode, ParseError> {
        // `\`
        self.advance();

        let mut parts = Vec::new();
        let mut has_suffix = false;
        loop {
            let (part, glued_suffix) = self.command_part(parts.is_empty())?;
            parts.push(part);
            if glued_suffix {
                has_suffix = true;
                break;
            }
            if !self.match_punct(PunctuationId::Dot) {
                break;
            }
        }

        if !has_suffix && self.is_adjacent() && self.peek().is_operator_text("/") {
            self.advance();
            has_suffix = true;
        }

        Ok(TexTalkNode::Command(Command { parts, has_suffix }))
    }

    /// Parse one part. The flag is set when the name was an operator run with the suffix `/` glued on (`\set.+/`).
    fn command_part(&mut self, first: bool) -> Result<(CommandPart, bool), ParseError> {
        let token = self.peek().clone();
        let name = match token.kind {
            TokenKind::Identifier | TokenKind::Keyword(_) => self.text_node(TextKind::Identifier),
            TokenKind::Punctuation(PunctuationId::Caret) if !first => self.text_node(TextKind::Caret),
            TokenKind::Operator if !first => {
                self.advance();
                let text = token.text.as_str();
                match text.strip_suffix('/') {
                    Some(op) if !op.is_empty() => {
                        let name = TextNode::operator(op).at(token.location);
                        return Ok((CommandPart::named(name), true));
                    }
                    _ => TextNode::operator(text).at(token.location),
                }
            }
            _ => {
                let message = if first {
                    format!("Expected a command name after '\\', found '{}'", token.text)
                } else {
                    format!("Expected a command part after '.', found '{}'", token.text)
                };
                return Err(self.error_at(&token, message));
            }
        };

        let mut part = CommandPart::named(name);

        if self.check_punct(PunctuationId::LBracket) {
            part.square = Some(self.group(GroupKind::Square));
        }

        part.subsup = self.subsup();

        while self.check_punct(PunctuationId::LBrace) {
            part.groups.push(self.group(GroupKind::Curly));
        }

        if self.check_punct(PunctuationId::LParen) {
            part.paren = Some(self.group(GroupKind::Paren));
        }

        while self.check_punct(PunctuationId::Colon) && is_name_token(self.peek_peek()) {
            self.advance();
            let name = self.text_node(TextKind::Identifier);
            let mut groups = Vec::new();
            while self.check_punct(PunctuationId::LBrace) {
                groups.push(self.group(GroupKind::Curly));
            }
            part.named_groups.push(NamedGroupNode { name, groups });
        }

        Ok((part, false))
    }

    /// Parse `_{..}` and/or `^{..}` in either order, each at most once.
    fn subsup(&mut self) -> Option<SubSupNode> {
        let mut subsup = SubSupNode::default();
        loop {
            if !self.peek_peek().is_punctuation(PunctuationId::LBrace) {
                break;
            }
            if subsup.sub.is_none() && self.check_punct(PunctuationId::Underscore) {
                self.advance();
                subsup.sub = Some(self.group(GroupKind::Curly));
            } else if subsup.sup.is_none() && self.check_punct(PunctuationId::Caret) {
                self.advance();
                subsup.sup = Some(self.group(GroupKind::Curly));
            } else {
                break;
            }
        }
        if subsup.sub.is_none() && subsup.sup.is_none() {
            None
        } else {
            Some(subsup)
        }
    }
}
