//! Operator resolution: turns each flat expression into a single tree.
//!
//! TexTalk has no declared operator grammar. Any run of operator characters is an operator, and commands can act as
//! infix operators, so structure is recovered in five ordered passes over each expression's items:
//!
//! 1. **Calls**: an identifier followed by a paren group becomes a synthetic group (`f(x) > 0` is `{f(x)} > 0`).
//! 2. **Prefix**: a special operator with no operand on its left and an operand on its right takes that operand.
//! 3. **Postfix**: a special operator after an operand, followed by another operator or the end, takes the operand.
//! 4. **Infix commands**: items are split into runs between special operators; a run `lhs \cmd rhs` becomes an
//!    operator node.
//! 5. **Precedence**: a shunting-yard pass over the remaining special operators, using an [`OperatorTable`].
//!
//! Before the passes, an expression consisting of a single special operator (a bare `+` used as a name) is turned
//! into an identifier. Top-level commas that no relation consumed separate independent segments, each resolved on
//! its own.
//!
//! ## Notes
//! - The right-hand side of an `is` relation is a classification, not a value, and is left untouched.
//! - The first error aborts resolution; later passes assume the shape earlier ones guarantee.

use textalk_core::lang::operators::{Associativity, OperatorTable};

use crate::ast::*;
use crate::diagnostics::ParseError;
use crate::tree::NodeRef;

/// Resolve every expression in the tree.
#[tracing::instrument(skip_all)]
pub fn resolve_operators(root: &ExpressionNode, table: &OperatorTable) -> Result<ExpressionNode, ParseError> {
    OperatorResolver { table }.expression(root)
}

struct OperatorResolver<'t> {
    table: &'t OperatorTable,
}

/// Postfix-order entry of the shunting-yard pass.
enum Postfix {
    Operand(TexTalkNode),
    Operator(TextNode),
}

impl OperatorResolver<'_> {
    // ========================================================================
    // Tree walk
    // ========================================================================

    fn node(&self, node: NodeRef<'_>) -> Result<TexTalkNode, ParseError> {
        match node {
            NodeRef::Expression(expr) => self.expression(expr).map(TexTalkNode::Expression),
            NodeRef::Is(rel) => {
                let items = rel
                    .lhs
                    .items
                    .iter()
                    .map(|item| self.expression(item))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(TexTalkNode::Is(RelationNode {
                    lhs: ParametersNode::new(items),
                    rhs: rel.rhs.clone(),
                }))
            }
            _ => node.try_map_children(&mut |child| self.node(child)),
        }
    }

    /// Resolve the children of `expr`, then `expr` itself.
    fn expression(&self, expr: &ExpressionNode) -> Result<ExpressionNode, ParseError> {
        let children = expr
            .children
            .iter()
            .map(|child| self.node(child.node_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        let mut resolved = Vec::new();
        let mut segment = Vec::new();
        for child in children {
            if is_comma(&child) {
                resolved.extend(self.segment(std::mem::take(&mut segment))?);
                resolved.push(child);
            } else {
                segment.push(child);
            }
        }
        resolved.extend(self.segment(segment)?);
        Ok(ExpressionNode::new(resolved))
    }

    /// Reduce one comma-free list of items to a single node (`None` when empty).
    fn segment(&self, items: Vec<TexTalkNode>) -> Result<Option<TexTalkNode>, ParseError> {
        let items = match <[TexTalkNode; 1]>::try_from(items) {
            Ok([only]) => return Ok(Some(bare_operator_as_identifier(only))),
            Err(items) if items.is_empty() => return Ok(None),
            Err(items) => items,
        };

        let items = group_calls(items);
        let items = prefix_operators(items)?;
        let items = postfix_operators(items);
        let items = infix_commands(items)?;
        self.precedence(items).map(Some)
    }

    // ========================================================================
    // Pass 5: precedence
    // ========================================================================

    fn precedence(&self, items: Vec<TexTalkNode>) -> Result<TexTalkNode, ParseError> {
        let mut output = Vec::new();
        let mut stack: Vec<TextNode> = Vec::new();

        for item in items {
            match item {
                TexTalkNode::Text(op) if op.is_special_operator() => {
                    while stack.last().is_some_and(|top| self.pops_before(top, &op)) {
                        if let Some(top) = stack.pop() {
                            output.push(Postfix::Operator(top));
                        }
                    }
                    stack.push(op);
                }
                operand => output.push(Postfix::Operand(operand)),
            }
        }
        while let Some(op) = stack.pop() {
            output.push(Postfix::Operator(op));
        }

        let mut values: Vec<TexTalkNode> = Vec::new();
        for entry in output {
            match entry {
                Postfix::Operand(node) => values.push(node),
                Postfix::Operator(op) => {
                    let rhs = values.pop();
                    let lhs = values.pop();
                    match (lhs, rhs) {
                        (Some(lhs), Some(rhs)) => {
                            values.push(TexTalkNode::Operator(OperatorNode::infix(lhs, TexTalkNode::Text(op), rhs)))
                        }
                        (None, Some(_)) => {
                            return Err(ParseError::resolution(format!(
                                "expected two arguments for operator '{}' but found one",
                                op.text
                            )));
                        }
                        (_, None) => {
                            return Err(ParseError::resolution(format!(
                                "expected two arguments for operator '{}' but found none",
                                op.text
                            )));
                        }
                    }
                }
            }
        }

        match <[TexTalkNode; 1]>::try_from(values) {
            Ok([root]) => Ok(root),
            Err(values) => {
                let found = values.iter().map(TexTalkNode::to_code).collect::<Vec<_>>().join("', '");
                Err(ParseError::resolution(format!(
                    "expected a single expression but found '{found}'; use parentheses to group the operands explicitly"
                )))
            }
        }
    }

    /// Return `true` if `top` (already on the stack) must be applied before `incoming` is pushed.
    fn pops_before(&self, top: &TextNode, incoming: &TextNode) -> bool {
        let top_prec = self.table.precedence(&top.text);
        let incoming_prec = self.table.precedence(&incoming.text);
        top_prec > incoming_prec
            || (top_prec == incoming_prec && self.table.associativity(&incoming.text) == Associativity::Left)
    }
}

// ============================================================================
// Passes 1-4
// ============================================================================

/// A lone special operator is a name, not an operation.
fn bare_operator_as_identifier(node: TexTalkNode) -> TexTalkNode {
    match node {
        TexTalkNode::Text(text) if text.is_special_operator() => TexTalkNode::Text(TextNode {
            kind: TextKind::Identifier,
            ..text
        }),
        other => other,
    }
}

/// Pass 1.
///
/// Whitespace is not tracked in the tree, so `f (x)` groups exactly like `f(x)`.
fn group_calls(items: Vec<TexTalkNode>) -> Vec<TexTalkNode> {
    let mut out = Vec::with_capacity(items.len());
    let mut iter = items.into_iter().peekable();
    while let Some(item) = iter.next() {
        if item.is_identifier() {
            if let Some(paren) = iter.next_if(is_paren_group) {
                out.push(call(item, paren));
                continue;
            }
        }
        out.push(item);
    }
    out
}

/// Pass 2.
fn prefix_operators(items: Vec<TexTalkNode>) -> Result<Vec<TexTalkNode>, ParseError> {
    let is_op: Vec<bool> = items.iter().map(TexTalkNode::is_special_operator).collect();
    let mut out = Vec::with_capacity(items.len());
    let mut iter = items.into_iter().enumerate().peekable();

    while let Some((i, item)) = iter.next() {
        let operand_left = i > 0 && !is_op[i - 1];
        if !is_op[i] || operand_left {
            out.push(item);
            continue;
        }
        match iter.next_if(|(j, _)| !is_op[*j]) {
            Some((_, rhs)) => out.push(TexTalkNode::Operator(OperatorNode::prefix(item, rhs))),
            None => {
                return Err(ParseError::resolution(format!(
                    "operator '{}' needs left or right argument",
                    item.to_code()
                )));
            }
        }
    }
    Ok(out)
}

/// Pass 3.
fn postfix_operators(items: Vec<TexTalkNode>) -> Vec<TexTalkNode> {
    let mut out: Vec<TexTalkNode> = Vec::with_capacity(items.len());
    let mut iter = items.into_iter().peekable();

    while let Some(item) = iter.next() {
        let closes = iter.peek().is_none_or(TexTalkNode::is_special_operator);
        if item.is_special_operator() && closes {
            match out.pop() {
                Some(lhs) if !lhs.is_special_operator() => {
                    out.push(TexTalkNode::Operator(OperatorNode::postfix(lhs, item)));
                    continue;
                }
                Some(lhs) => out.push(lhs),
                None => {}
            }
        }
        out.push(item);
    }
    out
}

/// Pass 4.
fn infix_commands(items: Vec<TexTalkNode>) -> Result<Vec<TexTalkNode>, ParseError> {
    let mut runs: Vec<Vec<TexTalkNode>> = Vec::new();
    let mut ops: Vec<TexTalkNode> = Vec::new();
    let mut current = Vec::new();
    for item in items {
        if item.is_special_operator() {
            runs.push(std::mem::take(&mut current));
            ops.push(item);
        } else {
            current.push(item);
        }
    }
    runs.push(current);

    let last = runs.len() - 1;
    let mut out = Vec::new();
    let mut ops = ops.into_iter();
    for (i, run) in runs.into_iter().enumerate() {
        if run.is_empty() && i > 0 && i < last {
            return Err(ParseError::resolution(format!(
                "two infix operators side by side ('{}' and '{}')",
                out.last().map(TexTalkNode::to_code).unwrap_or_default(),
                ops.as_slice().first().map(TexTalkNode::to_code).unwrap_or_default(),
            )));
        }
        out.extend(classify_run(run)?);
        if let Some(op) = ops.next() {
            out.push(op);
        }
    }
    Ok(out)
}

/// A command between two operands is infix whether or not it carries `/` (`x \in y`); a suffixed command at either
/// end of a three-item run has no operand on that side.
fn classify_run(run: Vec<TexTalkNode>) -> Result<Vec<TexTalkNode>, ParseError> {
    let run = match <[TexTalkNode; 3]>::try_from(run) {
        Ok([lhs, command, rhs]) if is_infix_command(&command) => {
            return Ok(vec![TexTalkNode::Operator(OperatorNode::infix(lhs, command, rhs))]);
        }
        Ok(three) => {
            if let Some(cmd) = three.iter().find(|n| is_suffixed_command(n)) {
                return Err(ParseError::resolution(format!(
                    "expected an argument but found '{}'",
                    cmd.to_code()
                )));
            }
            return Ok(three.into());
        }
        Err(run) => run,
    };

    match <[TexTalkNode; 2]>::try_from(run) {
        Ok([name, paren]) if name.is_identifier() && is_paren_group(&paren) => Ok(vec![call(name, paren)]),
        Ok(two) => Ok(two.into()),
        Err(run) => Ok(run),
    }
}

// --- helpers -----------------------------------------------------------------

fn call(name: TexTalkNode, paren: TexTalkNode) -> TexTalkNode {
    TexTalkNode::Group(GroupNode::new(
        GroupKind::Synthetic,
        ParametersNode::new(vec![ExpressionNode::new(vec![name, paren])]),
    ))
}

fn is_paren_group(node: &TexTalkNode) -> bool {
    matches!(node, TexTalkNode::Group(g) if g.kind == GroupKind::Paren)
}

fn is_comma(node: &TexTalkNode) -> bool {
    node.as_text().is_some_and(|t| t.kind == TextKind::Comma)
}

/// A node that can sit between two operands: any command, or the `as` keyword.
fn is_infix_command(node: &TexTalkNode) -> bool {
    match node {
        TexTalkNode::Command(_) => true,
        TexTalkNode::Text(t) => t.kind == TextKind::As,
        _ => false,
    }
}

fn is_suffixed_command(node: &TexTalkNode) -> bool {
    matches!(node, TexTalkNode::Command(c) if c.has_suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParseConfig;
    use crate::parse_with_config;
    use textalk_core::lang::operators::OperatorInfo;

    fn resolve(text: &str) -> Result<ExpressionNode, ParseError> {
        let raw = parse_with_config(text, &ParseConfig::new().with_operators(false));
        assert!(raw.is_ok(), "{text:?}: {:?}", raw.errors);
        resolve_operators(&raw.root, &OperatorTable::STANDARD)
    }

    /// Render a resolved tree with explicit structure: `(op lhs rhs)`, `(op _ rhs)`, `(op lhs _)`.
    fn sexpr(node: &TexTalkNode) -> String {
        match node {
            TexTalkNode::Operator(op) => {
                let side = |n: &Option<Box<TexTalkNode>>| n.as_deref().map(sexpr).unwrap_or_else(|| "_".to_string());
                format!("({} {} {})", op.command.to_code(), side(&op.lhs), side(&op.rhs))
            }
            TexTalkNode::Expression(e) => e.children.iter().map(sexpr).collect::<Vec<_>>().join(" "),
            other => other.to_code(),
        }
    }

    fn shape(text: &str) -> String {
        let root = resolve(text).unwrap_or_else(|e| panic!("{text:?} failed: {e}"));
        root.children.iter().map(sexpr).collect::<Vec<_>>().join(" ")
    }

    fn error(text: &str) -> String {
        resolve(text).expect_err("expected a resolution error").message
    }

    #[test]
    fn test_precedence_and_associativity() {
        assert_eq!(shape("a + b * c"), "(+ a (* b c))");
        assert_eq!(shape("a * b + c"), "(+ (* a b) c)");
        assert_eq!(shape("a - b - c"), "(- (- a b) c)");
        assert_eq!(shape("a ^ b ^ c"), "(^ a (^ b c))");
        assert_eq!(shape("a = b + c"), "(+ (= a b) c)");
    }

    #[test]
    fn test_dotted_operator_inherits_precedence() {
        assert_eq!(shape("a ...+ b * c"), "(...+ a (* b c))");
        assert_eq!(shape("a ... b"), "(... a b)");
    }

    #[test]
    fn test_unknown_operators_bind_loosest() {
        assert_eq!(shape("a <= b + c"), "(<= a (+ b c))");
        assert_eq!(shape("a <= b => c"), "(=> (<= a b) c)");
    }

    #[test]
    fn test_custom_table() {
        const ENTRIES: &[OperatorInfo] = &[OperatorInfo {
            spelling: "+",
            precedence: 9,
            associativity: Associativity::Right,
        }];
        let table = OperatorTable::new(ENTRIES, 0);
        let raw = parse_with_config("a + b * c", &ParseConfig::raw());
        let root = resolve_operators(&raw.root, &table).expect("resolves");
        assert_eq!(sexpr(&root.children[0]), "(* (+ a b) c)");
    }

    #[test]
    fn test_prefix_and_postfix() {
        assert_eq!(shape("+x"), "(+ _ x)");
        assert_eq!(shape("x+"), "(+ x _)");
        assert_eq!(shape("a * -b"), "(* a (- _ b))");
        assert_eq!(shape("-a + b"), "(+ (- _ a) b)");
    }

    #[test]
    fn test_bare_operator_is_an_identifier() {
        let root = resolve("+").expect("resolves");
        assert!(root.children[0].is_identifier());
        let root = resolve(r"\f{+}").expect("resolves");
        let TexTalkNode::Command(cmd) = &root.children[0] else {
            panic!("expected command");
        };
        assert!(cmd.parts[0].groups[0].parameters.items[0].children[0].is_identifier());
    }

    #[test]
    fn test_call_grouping() {
        let root = resolve("f(x) > 0").expect("resolves");
        let TexTalkNode::Operator(op) = &root.children[0] else {
            panic!("expected operator, got {root:?}");
        };
        assert!(matches!(op.lhs.as_deref(), Some(TexTalkNode::Group(g)) if g.kind == GroupKind::Synthetic));
        assert_eq!(root.to_code(), "f(x) > 0");
    }

    #[test]
    fn test_call_grouping_ignores_spacing() {
        let glued = resolve("f(x) + 1").expect("resolves");
        let spaced = resolve("f (x) + 1").expect("resolves");
        assert_eq!(glued, spaced);
        assert_eq!(spaced.to_code(), "f(x) + 1");
    }

    #[test]
    fn test_infix_commands() {
        assert_eq!(shape(r"x \in y"), r"(\in x y)");
        assert_eq!(shape(r"x \in/ y"), r"(\in/ x y)");
        assert_eq!(shape(r"a + x \op/ y"), r"(+ a (\op/ x y))");
        assert_eq!(shape("x as y"), "(as x y)");
    }

    #[test]
    fn test_suffixed_command_without_operands() {
        assert_eq!(error(r"a b \in/"), r"expected an argument but found '\in/'");
    }

    #[test]
    fn test_missing_operands() {
        assert!(error(r"x \in").contains("parentheses"));
        assert!(error("a b + c d").contains("parentheses"));
        assert!(error("x + +").contains("needs left or right argument"));
        assert!(error("+ - x").contains("needs left or right argument"));
    }

    #[test]
    fn test_side_by_side_operators() {
        assert_eq!(shape("a + - b"), "(+ a (- _ b))");

        let op = |s: &str| TexTalkNode::Text(TextNode::operator(s));
        let id = |s: &str| TexTalkNode::Text(TextNode::identifier(s));
        let err = infix_commands(vec![id("a"), op("+"), op("*"), id("b")]).expect_err("adjacent operators");
        assert_eq!(err.message, "two infix operators side by side ('+' and '*')");
    }

    #[test]
    fn test_is_rhs_is_left_alone() {
        let raw = parse_with_config(r"x is a b c", &ParseConfig::new().with_operators(false));
        let root = resolve_operators(&raw.root, &OperatorTable::STANDARD).expect("is rhs untouched");
        let TexTalkNode::Is(rel) = &root.children[0] else {
            panic!("expected is");
        };
        assert_eq!(rel.rhs.items[0].children.len(), 3);
    }

    #[test]
    fn test_operators_inside_relations_and_groups() {
        let root = resolve(r"x + 1 in \set{a * b, c}").expect("resolves");
        let TexTalkNode::In(rel) = &root.children[0] else {
            panic!("expected in");
        };
        assert_eq!(sexpr(&rel.lhs.items[0].children[0]), "(+ x 1)");
        assert_eq!(root.to_code(), r"x + 1 in \set{a * b, c}");
    }

    #[test]
    fn test_top_level_segments_resolve_separately() {
        let root = resolve("a + b, c").expect("resolves");
        assert_eq!(root.children.len(), 3);
        assert_eq!(sexpr(&root.children[0]), "(+ a b)");
        assert_eq!(root.to_code(), "a + b, c");
    }
}
