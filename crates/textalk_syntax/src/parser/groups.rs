/// Group parsing: `(..)`, `{..}` and `[..]`.
impl Parser {
    /// Parse a bracketed, comma-separated list of expressions, then an optional glued `...`.
    ///
    /// The caller guarantees the current token is the opener. A missing closer is reported and the group is kept.
    fn group(&mut self, kind: GroupKind) -> GroupNode {
        let opener = self.advance();
        let closer = opener
            .kind
            .punctuation_id()
            .and_then(punctuation::closer_for)
            .unwrap_or(PunctuationId::RParen);

        let mut items = Vec::new();
        if !self.match_punct(closer) {
            loop {
                items.push(self.expression(&[closer, PunctuationId::Comma]));
                if self.match_punct(PunctuationId::Comma) {
                    continue;
                }
                if !self.match_punct(closer) {
                    let found = self.peek().clone();
                    let err = self.error_at(
                        &found,
                        format!(
                            "Expected '{}' to close the '{}' at {}",
                            punctuation::as_str(closer),
                            opener.text,
                            opener.location
                        ),
                    );
                    self.errors.push(err);
                }
                break;
            }
        }

        let mut group = GroupNode::new(kind, ParametersNode::new(items));
        group.is_vararg = self.match_glued_vararg();
        group
    }
}
