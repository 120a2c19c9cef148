#[cfg(test)]
/// Parser unit tests.
///
/// These tests look at the raw (unresolved) tree and at the parser's token-level error recovery.
mod tests {
    use super::*;

    fn raw(source: &str) -> ParseResult {
        parse_tokens(lexer::lex(source).tokens)
    }

    fn raw_ok(source: &str) -> ExpressionNode {
        let result = raw(source);
        assert!(result.is_ok(), "{source:?}: {:?}", result.errors);
        result.root
    }

    fn kinds(expr: &ExpressionNode) -> Vec<NodeKind> {
        expr.children.iter().map(TexTalkNode::kind).collect()
    }

    fn command(node: &TexTalkNode) -> &Command {
        match node {
            TexTalkNode::Command(cmd) => cmd,
            other => panic!("expected command, got {other:?}"),
        }
    }

    #[test]
    fn test_flat_items() {
        let root = raw_ok("a + b, c is d");
        assert_eq!(
            kinds(&root),
            vec![NodeKind::Text; 7],
            "the parser does not resolve anything"
        );
        let text_kinds: Vec<_> = root.children.iter().filter_map(|c| c.as_text()).map(|t| t.kind).collect();
        assert_eq!(
            text_kinds,
            vec![
                TextKind::Identifier,
                TextKind::Operator,
                TextKind::Identifier,
                TextKind::Comma,
                TextKind::Identifier,
                TextKind::Is,
                TextKind::Identifier
            ]
        );
    }

    #[test]
    fn test_equals_tokens_are_operators() {
        let root = raw_ok("a = b != c");
        assert_eq!(root.children[1].as_text().map(|t| t.kind), Some(TextKind::Operator));
        assert_eq!(root.children[3].as_text().map(|t| t.text.as_str()), Some("!="));
    }

    #[test]
    fn test_command_parts() {
        let root = raw_ok(r"\function:on{A}:to{B}");
        let cmd = command(&root.children[0]);
        assert_eq!(cmd.parts.len(), 1);
        let part = &cmd.parts[0];
        assert_eq!(part.name.text, "function");
        assert_eq!(part.named_groups.len(), 2);
        assert_eq!(part.named_groups[1].name.text, "to");
        assert!(!cmd.has_suffix);
    }

    #[test]
    fn test_command_with_every_slot() {
        let root = raw_ok(r"\f[n]_{i}^{2}{a, b}{c}(x):on{A}.g");
        let cmd = command(&root.children[0]);
        assert_eq!(cmd.parts.len(), 2);
        let part = &cmd.parts[0];
        assert!(part.square.is_some());
        let subsup = part.subsup.as_ref().expect("subsup");
        assert!(subsup.sub.is_some() && subsup.sup.is_some());
        assert_eq!(part.groups.len(), 2);
        assert_eq!(part.groups[0].parameters.items.len(), 2);
        assert!(part.paren.is_some());
        assert_eq!(cmd.parts[1].name.text, "g");
        assert_eq!(root.to_code(), r"\f[n]_{i}^{2}{a, b}{c}(x):on{A}.g");
    }

    #[test]
    fn test_sup_before_sub() {
        let root = raw_ok(r"\sum^{n}_{i}");
        let subsup = command(&root.children[0]).parts[0].subsup.clone().expect("subsup");
        assert!(subsup.sub.is_some() && subsup.sup.is_some());
        // Canonical order puts the subscript first.
        assert_eq!(root.to_code(), r"\sum_{i}^{n}");
    }

    #[test]
    fn test_command_suffix() {
        let root = raw_ok(r"x \in/ A");
        assert!(command(&root.children[1]).has_suffix);

        // Keywords can name command parts.
        let root = raw_ok(r"x \in A");
        let cmd = command(&root.children[1]);
        assert_eq!(cmd.parts[0].name.text, "in");
        assert!(!cmd.has_suffix);

        // A detached `/` is an operator, not a suffix.
        let root = raw_ok(r"\alpha / 2");
        assert!(!command(&root.children[0]).has_suffix);
        assert_eq!(root.children.len(), 3);
    }

    #[test]
    fn test_operator_and_caret_parts() {
        let root = raw_ok(r"\set.+/");
        let cmd = command(&root.children[0]);
        assert_eq!(cmd.parts[1].name.text, "+");
        assert!(cmd.has_suffix);
        assert_eq!(root.to_code(), r"\set.+/");

        let root = raw_ok(r"\x.^");
        let cmd = command(&root.children[0]);
        assert_eq!(cmd.parts[1].name.kind, TextKind::Caret);
    }

    #[test]
    fn test_mapping() {
        let root = raw_ok("f_{i}(x)");
        let TexTalkNode::Mapping(mapping) = &root.children[0] else {
            panic!("expected mapping, got {root:?}");
        };
        assert_eq!(mapping.name.text, "f");
        assert!(mapping.sub.is_some());
        assert!(mapping.paren.is_some());

        // Without a subscript a call stays two items until resolution.
        assert_eq!(kinds(&raw_ok("f(x)")), vec![NodeKind::Text, NodeKind::Group]);
        // `x_i` is a subscript operator.
        assert_eq!(raw_ok("x_i").children.len(), 3);
    }

    #[test]
    fn test_varargs() {
        let root = raw_ok("x... {a}...");
        assert!(root.children[0].as_text().is_some_and(|t| t.is_vararg));
        assert!(matches!(&root.children[1], TexTalkNode::Group(g) if g.is_vararg));

        // Detached dots are their own item.
        let root = raw_ok("x ... y");
        assert_eq!(root.children.len(), 3);
        assert_eq!(root.children[1].as_text().map(|t| t.kind), Some(TextKind::DotDotDot));
    }

    #[test]
    fn test_groups() {
        let root = raw_ok("(a, b) {c} ()");
        let TexTalkNode::Group(paren) = &root.children[0] else {
            panic!("expected group");
        };
        assert_eq!(paren.kind, GroupKind::Paren);
        assert_eq!(paren.parameters.items.len(), 2);
        let TexTalkNode::Group(empty) = &root.children[2] else {
            panic!("expected group");
        };
        assert!(empty.parameters.is_empty());
    }

    #[test]
    fn test_markers_and_numbers() {
        let root = raw_ok("P is :Statement: 3.5");
        assert_eq!(root.children[2].as_text().map(|t| t.kind), Some(TextKind::Marker));
        assert_eq!(root.children[3].as_text().map(|t| t.kind), Some(TextKind::Number));
    }

    #[test]
    fn test_leaf_locations() {
        let root = raw_ok("a +\n  b");
        let loc = |i: usize| root.children[i].as_text().and_then(|t| t.location);
        assert_eq!(loc(0), Some(Location::new(0, 0)));
        assert_eq!(loc(2), Some(Location::new(1, 2)));
    }

    #[test]
    fn test_unexpected_tokens_are_skipped_one_at_a_time() {
        let result = raw("a ) b ] c");
        assert_eq!(result.errors.len(), 2, "{:?}", result.errors);
        assert!(result.errors[0].message.contains("Unexpected token ')'"));
        assert_eq!(result.errors[0].location, Some(Location::new(0, 2)));
        assert_eq!(result.errors[1].kind, crate::diagnostics::ErrorKind::Syntax);
        assert_eq!(result.root.children.len(), 3);
    }

    #[test]
    fn test_unclosed_group_is_reported_and_kept() {
        let result = raw("f(a, b");
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].message.contains("Expected ')'"));
        assert_eq!(result.root.children.len(), 2);
    }

    #[test]
    fn test_missing_command_name() {
        let result = raw(r"\ + x");
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].message.contains("Expected a command name"));
        // Recovery resumes at the operator.
        assert_eq!(result.root.children.len(), 2);

        let result = raw(r"\f.,");
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].message.contains("command part"));
    }

    #[test]
    fn test_lexer_and_parser_errors_accumulate() {
        let result = parse("a # ) + b");
        assert_eq!(result.errors.len(), 2);
        assert_eq!(result.errors[0].kind, crate::diagnostics::ErrorKind::Lexical);
        assert_eq!(result.errors[1].kind, crate::diagnostics::ErrorKind::Syntax);
    }

    #[test]
    fn test_raw_config_leaves_tree_flat() {
        let result = parse_with_config("a + b", &ParseConfig::raw());
        assert!(result.is_ok());
        assert_eq!(result.root.children.len(), 3);
    }
}
