//! Relation resolution.
//!
//! Three tree-wide passes run in a fixed order:
//! 1. `is`
//! 2. `in` and `notin`
//! 3. `:=` and `::=`
//!
//! Each pass looks at the direct children of every expression. An expression with exactly one marker of the pass is
//! split at the marker into comma-separated left and right parameters and replaced by a single relation node. More
//! than one marker at the same level is an error. Passes rebuild bottom-up, so markers inside group parameters are
//! resolved too.

use crate::ast::*;
use crate::diagnostics::ParseError;

/// One relation pass: the markers it folds and how each marker builds its node.
struct RelationPass {
    /// Spelled out in the "only one" diagnostic.
    label: &'static str,
    markers: &'static [TextKind],
}

const PASSES: &[RelationPass] = &[
    RelationPass {
        label: "'is'",
        markers: &[TextKind::Is],
    },
    RelationPass {
        label: "'in' or 'notin'",
        markers: &[TextKind::In, TextKind::NotIn],
    },
    RelationPass {
        label: "':=' or '::='",
        markers: &[TextKind::ColonEquals, TextKind::ColonColonEquals],
    },
];

/// Fold every relation marker in the tree into relation nodes.
#[tracing::instrument(skip_all)]
pub fn resolve_relations(root: &ExpressionNode) -> Result<ExpressionNode, ParseError> {
    let mut root = root.clone();
    for pass in PASSES {
        root = root.try_transform(|node| match node {
            TexTalkNode::Expression(expr) => split_expression(expr, pass).map(TexTalkNode::Expression),
            other => Ok(other),
        })?;
    }
    Ok(root)
}

fn split_expression(expr: ExpressionNode, pass: &RelationPass) -> Result<ExpressionNode, ParseError> {
    let mut markers = expr
        .children
        .iter()
        .enumerate()
        .filter_map(|(i, child)| match child.as_text() {
            Some(text) if pass.markers.contains(&text.kind) => Some((i, text.kind)),
            _ => None,
        });

    let Some((index, marker)) = markers.next() else {
        return Ok(expr);
    };
    if markers.next().is_some() {
        return Err(ParseError::resolution(format!(
            "An expression can only contain one {} statement",
            pass.label
        )));
    }

    tracing::debug!(?marker, index, "splitting expression at relation marker");

    let mut lhs = expr.children;
    let rhs = lhs.split_off(index + 1);
    // Drop the marker itself.
    lhs.pop();

    let relation = RelationNode {
        lhs: split_commas(lhs),
        rhs: split_commas(rhs),
    };
    let node = match marker {
        TextKind::Is => TexTalkNode::Is(relation),
        TextKind::In => TexTalkNode::In(relation),
        TextKind::NotIn => TexTalkNode::NotIn(relation),
        TextKind::ColonEquals => TexTalkNode::ColonEquals(relation),
        _ => TexTalkNode::ColonColonEquals(relation),
    };
    Ok(ExpressionNode::new(vec![node]))
}

/// Split a flat list of children at top-level commas. An empty list gives empty parameters.
pub(crate) fn split_commas(children: Vec<TexTalkNode>) -> ParametersNode {
    if children.is_empty() {
        return ParametersNode::default();
    }
    let mut items = Vec::new();
    let mut current = Vec::new();
    for child in children {
        if child.as_text().is_some_and(|t| t.kind == TextKind::Comma) {
            items.push(ExpressionNode::new(std::mem::take(&mut current)));
        } else {
            current.push(child);
        }
    }
    items.push(ExpressionNode::new(current));
    ParametersNode::new(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParseConfig;
    use crate::parse_with_config;

    fn relations_only(text: &str) -> Result<ExpressionNode, ParseError> {
        let raw = parse_with_config(text, &ParseConfig::raw());
        assert!(raw.is_ok(), "{text:?}: {:?}", raw.errors);
        resolve_relations(&raw.root)
    }

    fn only_child(expr: &ExpressionNode) -> &TexTalkNode {
        assert_eq!(expr.children.len(), 1, "expected one child in {expr:?}");
        &expr.children[0]
    }

    #[test]
    fn test_is_splits_sides_on_commas() {
        let root = relations_only("x, y is A").expect("resolves");
        let TexTalkNode::Is(rel) = only_child(&root) else {
            panic!("expected is, got {root:?}");
        };
        assert_eq!(rel.lhs.items.len(), 2);
        assert_eq!(rel.rhs.items.len(), 1);
        assert_eq!(rel.lhs.items[1].to_code(), "y");
    }

    #[test]
    fn test_each_marker_kind() {
        let cases = [
            ("a in b", NodeKind::In),
            ("a notin b", NodeKind::NotIn),
            ("a := b", NodeKind::ColonEquals),
            ("a ::= b", NodeKind::ColonColonEquals),
        ];
        for (text, kind) in cases {
            let root = relations_only(text).expect("resolves");
            assert_eq!(only_child(&root).kind(), kind, "{text:?}");
        }
    }

    #[test]
    fn test_passes_nest_is_outermost() {
        let root = relations_only("x is y in z").expect("resolves");
        let TexTalkNode::Is(rel) = only_child(&root) else {
            panic!("expected is");
        };
        assert_eq!(only_child(&rel.rhs.items[0]).kind(), NodeKind::In);
    }

    #[test]
    fn test_markers_inside_groups() {
        let root = relations_only(r"\set{x in A, y}").expect("resolves");
        let TexTalkNode::Command(cmd) = only_child(&root) else {
            panic!("expected command");
        };
        let items = &cmd.parts[0].groups[0].parameters.items;
        assert_eq!(items.len(), 2);
        assert_eq!(only_child(&items[0]).kind(), NodeKind::In);
    }

    #[test]
    fn test_empty_sides_are_kept_empty() {
        let root = relations_only("is A").expect("resolves");
        let TexTalkNode::Is(rel) = only_child(&root) else {
            panic!("expected is");
        };
        assert!(rel.lhs.is_empty());
        assert_eq!(root.to_code(), "is A");
    }

    #[test]
    fn test_duplicate_markers_are_rejected() {
        let err = relations_only("a is b is c").expect_err("two is");
        assert_eq!(err.message, "An expression can only contain one 'is' statement");

        let err = relations_only("a in b notin c").expect_err("in and notin");
        assert!(err.message.contains("'in' or 'notin'"));
    }

    #[test]
    fn test_duplicates_in_separate_groups_are_fine() {
        assert!(relations_only("(a is b), (c is d)").is_ok());
    }
}
