//! Canonical serialization of TexTalk trees.
//!
//! [`to_code`](TexTalkNode::to_code) regenerates TexTalk text that re-parses to a structurally equal tree.
//! [`to_code_with`](TexTalkNode::to_code_with) lets a caller substitute the text of any node (for example a
//! renderer expanding a command) without rebuilding the tree: the interceptor is consulted before every node, and a
//! `Some` result replaces that node's whole subtree.
//!
//! ## Examples
//! ```rust
//! use textalk_syntax::tree::NodeRef;
//!
//! let result = textalk_syntax::parse(r"x + \alpha");
//! assert_eq!(result.root.to_code(), r"x + \alpha");
//!
//! let greek = |node: NodeRef<'_>| match node {
//!     NodeRef::Command(cmd) if cmd.signature() == r"\alpha" => Some("α".to_string()),
//!     _ => None,
//! };
//! assert_eq!(result.root.to_code_with(&greek), "x + α");
//! ```

use crate::ast::*;
use crate::tree::NodeRef;
use textalk_core::lang::keywords::{self, KeywordId};
use textalk_core::lang::operators::is_operator_char;
use textalk_core::lang::punctuation::{self, PunctuationId};

/// Node-level override consulted before serializing each node.
pub type Interceptor<'i> = dyn Fn(NodeRef<'_>) -> Option<String> + 'i;

/// Accumulates canonical text for one tree.
pub struct CodeWriter<'i> {
    output: String,
    interceptor: Option<&'i Interceptor<'i>>,
}

impl<'i> CodeWriter<'i> {
    pub fn new() -> Self {
        Self {
            output: String::new(),
            interceptor: None,
        }
    }

    pub fn with_interceptor(interceptor: &'i Interceptor<'i>) -> Self {
        Self {
            output: String::new(),
            interceptor: Some(interceptor),
        }
    }

    /// Get the serialized text
    pub fn finish(self) -> String {
        self.output
    }

    fn write(&mut self, s: &str) {
        self.output.push_str(s);
    }

    /// Serialize any node, consulting the interceptor first.
    pub fn node(&mut self, node: NodeRef<'_>) {
        if let Some(text) = self.interceptor.and_then(|intercept| intercept(node)) {
            self.write(&text);
            return;
        }
        match node {
            NodeRef::Text(text) => self.text(text),
            NodeRef::Command(cmd) => self.command(cmd),
            NodeRef::CommandPart(part) => self.command_part(part),
            NodeRef::Group(group) => self.group(group),
            NodeRef::NamedGroup(named) => self.named_group(named),
            NodeRef::SubSup(subsup) => self.subsup(subsup),
            NodeRef::Mapping(mapping) => self.mapping(mapping),
            NodeRef::Parameters(params) => self.parameters(params),
            NodeRef::Expression(expr) => self.expression(expr),
            NodeRef::Operator(op) => self.operator(op),
            NodeRef::Is(rel) => self.relation(rel, keywords::as_str(KeywordId::Is)),
            NodeRef::In(rel) => self.relation(rel, keywords::as_str(KeywordId::In)),
            NodeRef::NotIn(rel) => self.relation(rel, keywords::as_str(KeywordId::NotIn)),
            NodeRef::ColonEquals(rel) => self.relation(rel, punctuation::as_str(PunctuationId::ColonEquals)),
            NodeRef::ColonColonEquals(rel) => self.relation(rel, punctuation::as_str(PunctuationId::ColonColonEquals)),
        }
    }

    fn text(&mut self, text: &TextNode) {
        self.write(&text.text);
        if text.is_vararg {
            self.write("...");
        }
    }

    fn command(&mut self, cmd: &Command) {
        self.write("\\");
        for (i, part) in cmd.parts.iter().enumerate() {
            if i > 0 {
                self.write(".");
            }
            self.node(NodeRef::CommandPart(part));
        }
        if cmd.has_suffix {
            self.write("/");
        }
    }

    fn command_part(&mut self, part: &CommandPart) {
        self.node(NodeRef::Text(&part.name));
        if let Some(square) = &part.square {
            self.node(NodeRef::Group(square));
        }
        if let Some(subsup) = &part.subsup {
            self.node(NodeRef::SubSup(subsup));
        }
        for group in &part.groups {
            self.node(NodeRef::Group(group));
        }
        if let Some(paren) = &part.paren {
            self.node(NodeRef::Group(paren));
        }
        for named in &part.named_groups {
            self.node(NodeRef::NamedGroup(named));
        }
    }

    fn group(&mut self, group: &GroupNode) {
        if group.kind == GroupKind::Synthetic {
            // `f (x)` grouped as a call prints without the separating space.
            for item in &group.parameters.items {
                for child in &item.children {
                    self.node(child.node_ref());
                }
            }
        } else {
            let (open, close) = group.kind.delimiters();
            self.write(open);
            self.node(NodeRef::Parameters(&group.parameters));
            self.write(close);
        }
        if group.is_vararg {
            self.write("...");
        }
    }

    fn named_group(&mut self, named: &NamedGroupNode) {
        self.write(":");
        self.node(NodeRef::Text(&named.name));
        for group in &named.groups {
            self.node(NodeRef::Group(group));
        }
    }

    fn subsup(&mut self, subsup: &SubSupNode) {
        if let Some(sub) = &subsup.sub {
            self.write("_");
            self.node(NodeRef::Group(sub));
        }
        if let Some(sup) = &subsup.sup {
            self.write("^");
            self.node(NodeRef::Group(sup));
        }
    }

    fn mapping(&mut self, mapping: &MappingNode) {
        self.node(NodeRef::Text(&mapping.name));
        if let Some(sub) = &mapping.sub {
            self.write("_");
            self.node(NodeRef::Group(sub));
        }
        if let Some(paren) = &mapping.paren {
            self.node(NodeRef::Group(paren));
        }
    }

    fn parameters(&mut self, params: &ParametersNode) {
        for (i, item) in params.items.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.node(NodeRef::Expression(item));
        }
    }

    fn expression(&mut self, expr: &ExpressionNode) {
        for (i, child) in expr.children.iter().enumerate() {
            let is_comma = child.as_text().is_some_and(|t| t.kind == TextKind::Comma);
            if i > 0 && !is_comma {
                self.write(" ");
            }
            self.node(child.node_ref());
        }
    }

    fn operator(&mut self, op: &OperatorNode) {
        match (&op.lhs, &op.rhs) {
            (Some(lhs), Some(rhs)) => {
                self.node(lhs.node_ref());
                self.write(" ");
                self.node(op.command.node_ref());
                self.write(" ");
                self.node(rhs.node_ref());
            }
            (None, Some(rhs)) => {
                self.node(op.command.node_ref());
                // `\neg x` must not glue into `\negx`.
                if matches!(*op.command, TexTalkNode::Command(_)) {
                    self.write(" ");
                }
                self.node(rhs.node_ref());
            }
            (Some(lhs), None) => {
                self.node(lhs.node_ref());
                // A glued `...` reads back as a vararg, and `\in/` followed by `+` as the run `/+`.
                let detached = op.command.as_text().is_some_and(|t| t.kind == TextKind::DotDotDot)
                    || self.output.ends_with(|c: char| is_operator_char(c) || c == '.');
                if detached {
                    self.write(" ");
                }
                self.node(op.command.node_ref());
            }
            (None, None) => self.node(op.command.node_ref()),
        }
    }

    fn relation(&mut self, rel: &RelationNode, keyword: &str) {
        self.node(NodeRef::Parameters(&rel.lhs));
        if !rel.lhs.is_empty() {
            self.write(" ");
        }
        self.write(keyword);
        if !rel.rhs.is_empty() {
            self.write(" ");
        }
        self.node(NodeRef::Parameters(&rel.rhs));
    }
}

impl Default for CodeWriter<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeRef<'_> {
    /// Canonical TexTalk text for this node.
    pub fn to_code(&self) -> String {
        let mut writer = CodeWriter::new();
        writer.node(*self);
        writer.finish()
    }

    /// Canonical text with per-node overrides.
    pub fn to_code_with(&self, interceptor: &Interceptor<'_>) -> String {
        let mut writer = CodeWriter::with_interceptor(interceptor);
        writer.node(*self);
        writer.finish()
    }
}

impl TexTalkNode {
    /// Canonical TexTalk text for this node.
    pub fn to_code(&self) -> String {
        self.node_ref().to_code()
    }

    /// Canonical text with per-node overrides; see the [module docs](self).
    pub fn to_code_with(&self, interceptor: &Interceptor<'_>) -> String {
        self.node_ref().to_code_with(interceptor)
    }
}

impl ExpressionNode {
    pub fn to_code(&self) -> String {
        self.node_ref().to_code()
    }

    pub fn to_code_with(&self, interceptor: &Interceptor<'_>) -> String {
        self.node_ref().to_code_with(interceptor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(name: &str) -> TexTalkNode {
        TexTalkNode::Text(TextNode::identifier(name))
    }

    fn expr(children: Vec<TexTalkNode>) -> ExpressionNode {
        ExpressionNode::new(children)
    }

    fn curly(items: Vec<ExpressionNode>) -> GroupNode {
        GroupNode::new(GroupKind::Curly, ParametersNode::new(items))
    }

    #[test]
    fn test_text_and_vararg() {
        assert_eq!(ident("x").to_code(), "x");
        assert_eq!(TexTalkNode::Text(TextNode::identifier("x").vararg()).to_code(), "x...");
    }

    #[test]
    fn test_command_with_everything() {
        let mut part = CommandPart::named(TextNode::identifier("f"));
        part.square = Some(GroupNode::new(GroupKind::Square, ParametersNode::new(vec![expr(vec![ident("n")])])));
        part.subsup = Some(SubSupNode {
            sub: Some(curly(vec![expr(vec![ident("i")])])),
            sup: Some(curly(vec![expr(vec![ident("2")])])),
        });
        part.groups = vec![curly(vec![expr(vec![ident("a")]), expr(vec![ident("b")])])];
        part.paren = Some(GroupNode::new(GroupKind::Paren, ParametersNode::new(vec![expr(vec![ident("x")])])));
        part.named_groups = vec![NamedGroupNode {
            name: TextNode::identifier("on"),
            groups: vec![curly(vec![expr(vec![ident("A")])])],
        }];
        let cmd = TexTalkNode::Command(Command {
            parts: vec![part, CommandPart::named(TextNode::identifier("g"))],
            has_suffix: true,
        });
        assert_eq!(cmd.to_code(), r"\f[n]_{i}^{2}{a, b}(x):on{A}.g/");
    }

    #[test]
    fn test_mapping() {
        let mapping = TexTalkNode::Mapping(MappingNode {
            name: TextNode::identifier("f"),
            sub: Some(curly(vec![expr(vec![ident("i")])])),
            paren: Some(GroupNode::new(GroupKind::Paren, ParametersNode::new(vec![expr(vec![ident("x")])]))),
        });
        assert_eq!(mapping.to_code(), "f_{i}(x)");
    }

    #[test]
    fn test_synthetic_group_has_no_space() {
        let call = GroupNode::new(
            GroupKind::Synthetic,
            ParametersNode::new(vec![expr(vec![
                ident("f"),
                TexTalkNode::Group(GroupNode::new(
                    GroupKind::Paren,
                    ParametersNode::new(vec![expr(vec![ident("x")])]),
                )),
            ])]),
        );
        assert_eq!(TexTalkNode::Group(call).to_code(), "f(x)");
    }

    #[test]
    fn test_operator_forms() {
        let plus = TexTalkNode::Text(TextNode::operator("+"));
        let minus = TexTalkNode::Text(TextNode::operator("-"));
        let bang = TexTalkNode::Text(TextNode::operator("!"));
        assert_eq!(
            TexTalkNode::Operator(OperatorNode::infix(ident("a"), plus, ident("b"))).to_code(),
            "a + b"
        );
        assert_eq!(TexTalkNode::Operator(OperatorNode::prefix(minus, ident("a"))).to_code(), "-a");
        assert_eq!(TexTalkNode::Operator(OperatorNode::postfix(ident("n"), bang)).to_code(), "n!");

        let neg = TexTalkNode::Command(Command {
            parts: vec![CommandPart::named(TextNode::identifier("neg"))],
            has_suffix: false,
        });
        assert_eq!(TexTalkNode::Operator(OperatorNode::prefix(neg, ident("p"))).to_code(), r"\neg p");
    }

    #[test]
    fn test_postfix_operator_stays_detached_when_gluing_would_relex() {
        let dots = TexTalkNode::Text(TextNode::new(TextKind::DotDotDot, "..."));
        assert_eq!(TexTalkNode::Operator(OperatorNode::postfix(ident("x"), dots)).to_code(), "x ...");

        let suffixed = TexTalkNode::Command(Command {
            parts: vec![CommandPart::named(TextNode::identifier("in"))],
            has_suffix: true,
        });
        let plus = TexTalkNode::Text(TextNode::operator("+"));
        assert_eq!(TexTalkNode::Operator(OperatorNode::postfix(suffixed, plus)).to_code(), r"\in/ +");

        let vararg = TexTalkNode::Text(TextNode::identifier("x").vararg());
        let bang = TexTalkNode::Text(TextNode::operator("!"));
        assert_eq!(TexTalkNode::Operator(OperatorNode::postfix(vararg, bang)).to_code(), "x... !");
    }

    #[test]
    fn test_relations() {
        let rel = RelationNode {
            lhs: ParametersNode::new(vec![expr(vec![ident("x")]), expr(vec![ident("y")])]),
            rhs: ParametersNode::new(vec![expr(vec![ident("A")])]),
        };
        assert_eq!(TexTalkNode::Is(rel.clone()).to_code(), "x, y is A");
        assert_eq!(TexTalkNode::NotIn(rel.clone()).to_code(), "x, y notin A");
        assert_eq!(TexTalkNode::ColonColonEquals(rel).to_code(), "x, y ::= A");
    }

    #[test]
    fn test_interceptor_replaces_subtree() {
        let root = expr(vec![ident("x"), TexTalkNode::Text(TextNode::operator("+")), ident("y")]);
        let upper = |node: NodeRef<'_>| match node {
            NodeRef::Text(t) if t.kind == TextKind::Identifier => Some(t.text.to_uppercase()),
            _ => None,
        };
        assert_eq!(root.to_code_with(&upper), "X + Y");

        let whole = |node: NodeRef<'_>| match node {
            NodeRef::Expression(_) => Some("<expr>".to_string()),
            _ => None,
        };
        assert_eq!(root.to_code_with(&whole), "<expr>");
    }
}
