//! TexTalk syntax tree.
//!
//! Every node is an immutable value: the parser and resolvers build new nodes and never mutate existing ones, and
//! [`TexTalkNode::transform`](crate::tree) always returns a fresh tree. A child belongs to exactly one parent.
//!
//! ## Notes
//! - Equality is structural. Source locations on [`TextNode`] are informational and do not take part in `==`, so a
//!   tree re-parsed from its own [`to_code`](TexTalkNode::to_code) compares equal to the original.
//! - Before resolution an [`ExpressionNode`] is a flat list of children; after resolution it holds one tree (or one
//!   tree per top-level comma-separated segment).

use std::fmt;

/// Source span (byte offsets into the statement text).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// 0-based row and column of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Location {
    pub row: usize,
    pub column: usize,
}

impl Location {
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row, self.column)
    }
}

// ============================================================================
// Leaves
// ============================================================================

/// What a [`TextNode`] leaf stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextKind {
    Identifier,
    Number,
    /// A run of operator characters, or `=` / `!=`.
    Operator,
    /// `:Type:`, `:Statement:` or `:Expression:`.
    Marker,
    Comma,
    Caret,
    Underscore,
    DotDotDot,
    Is,
    As,
    In,
    NotIn,
    ColonEquals,
    ColonColonEquals,
}

impl TextKind {
    /// Return `true` for the kinds the operator resolver treats as special operators.
    pub fn is_special_operator(self) -> bool {
        matches!(
            self,
            TextKind::Operator
                | TextKind::Caret
                | TextKind::Underscore
                | TextKind::DotDotDot
                | TextKind::ColonEquals
                | TextKind::ColonColonEquals
        )
    }
}

/// An identifier, number, operator symbol or marker token.
#[derive(Debug, Clone)]
pub struct TextNode {
    pub kind: TextKind,
    pub text: String,
    /// Set when the token was immediately followed by `...` (e.g. `x...`).
    pub is_vararg: bool,
    pub location: Option<Location>,
}

impl TextNode {
    pub fn new(kind: TextKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            is_vararg: false,
            location: None,
        }
    }

    pub fn identifier(text: impl Into<String>) -> Self {
        Self::new(TextKind::Identifier, text)
    }

    pub fn operator(text: impl Into<String>) -> Self {
        Self::new(TextKind::Operator, text)
    }

    pub fn at(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    pub fn vararg(mut self) -> Self {
        self.is_vararg = true;
        self
    }

    pub fn is_special_operator(&self) -> bool {
        self.kind.is_special_operator()
    }
}

impl PartialEq for TextNode {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.text == other.text && self.is_vararg == other.is_vararg
    }
}

impl Eq for TextNode {}

// ============================================================================
// Groups
// ============================================================================

/// Bracket style of a [`GroupNode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupKind {
    Paren,
    Curly,
    Square,
    /// Built by the resolver rather than written in the source (e.g. `f (x)` grouped as a call).
    Synthetic,
}

impl GroupKind {
    /// Opening and closing delimiters as written in canonical code.
    pub fn delimiters(self) -> (&'static str, &'static str) {
        match self {
            GroupKind::Paren => ("(", ")"),
            GroupKind::Curly => ("{", "}"),
            GroupKind::Square => ("[", "]"),
            GroupKind::Synthetic => ("", ""),
        }
    }
}

/// Comma-separated list of expressions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParametersNode {
    pub items: Vec<ExpressionNode>,
}

impl ParametersNode {
    pub fn new(items: Vec<ExpressionNode>) -> Self {
        Self { items }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupNode {
    pub kind: GroupKind,
    pub parameters: ParametersNode,
    /// Set when the closer was immediately followed by `...` (e.g. `{a}...`).
    pub is_vararg: bool,
}

impl GroupNode {
    pub fn new(kind: GroupKind, parameters: ParametersNode) -> Self {
        Self {
            kind,
            parameters,
            is_vararg: false,
        }
    }
}

/// `:name{...}` attached to a command part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedGroupNode {
    pub name: TextNode,
    pub groups: Vec<GroupNode>,
}

/// `_{...}` and/or `^{...}` scripts.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubSupNode {
    pub sub: Option<GroupNode>,
    pub sup: Option<GroupNode>,
}

// ============================================================================
// Commands
// ============================================================================

/// One `.`-separated segment of a command: `name[..]_{..}^{..}{..}(..):named{..}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandPart {
    /// Identifier, operator symbol, or `^` for a caret part.
    pub name: TextNode,
    pub square: Option<GroupNode>,
    pub subsup: Option<SubSupNode>,
    pub groups: Vec<GroupNode>,
    pub paren: Option<GroupNode>,
    pub named_groups: Vec<NamedGroupNode>,
}

impl CommandPart {
    pub fn named(name: TextNode) -> Self {
        Self {
            name,
            square: None,
            subsup: None,
            groups: Vec::new(),
            paren: None,
            named_groups: Vec::new(),
        }
    }
}

/// A backslash command such as `\frac{a}{b}` or `\function:on{A}:to{B}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub parts: Vec<CommandPart>,
    /// A trailing `/` marks the command as an infix operator (`x \in/ A`).
    pub has_suffix: bool,
}

impl Command {
    /// Canonical lookup key: part names joined by `.` plus the names of named groups, without any argument groups.
    ///
    /// ```rust
    /// use textalk_syntax::ast::TexTalkNode;
    ///
    /// let result = textalk_syntax::parse(r"\function:on{A}:to{B}");
    /// let TexTalkNode::Command(cmd) = &result.root.children[0] else { panic!() };
    /// assert_eq!(cmd.signature(), r"\function:on:to");
    /// ```
    pub fn signature(&self) -> String {
        let mut sig = String::from("\\");
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                sig.push('.');
            }
            sig.push_str(&part.name.text);
            for named in &part.named_groups {
                sig.push(':');
                sig.push_str(&named.name.text);
            }
        }
        sig
    }
}

/// An identifier with a subscript group and an optional application: `f_{i}(x)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingNode {
    pub name: TextNode,
    pub sub: Option<GroupNode>,
    pub paren: Option<GroupNode>,
}

// ============================================================================
// Expressions
// ============================================================================

/// Prefix (`lhs` is `None`), postfix (`rhs` is `None`) or infix application of an operator.
///
/// `command` is either a [`TextNode`] operator symbol or a [`Command`] used as an infix operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorNode {
    pub lhs: Option<Box<TexTalkNode>>,
    pub command: Box<TexTalkNode>,
    pub rhs: Option<Box<TexTalkNode>>,
}

impl OperatorNode {
    pub fn infix(lhs: TexTalkNode, command: TexTalkNode, rhs: TexTalkNode) -> Self {
        Self {
            lhs: Some(Box::new(lhs)),
            command: Box::new(command),
            rhs: Some(Box::new(rhs)),
        }
    }

    pub fn prefix(command: TexTalkNode, rhs: TexTalkNode) -> Self {
        Self {
            lhs: None,
            command: Box::new(command),
            rhs: Some(Box::new(rhs)),
        }
    }

    pub fn postfix(lhs: TexTalkNode, command: TexTalkNode) -> Self {
        Self {
            lhs: Some(Box::new(lhs)),
            command: Box::new(command),
            rhs: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExpressionNode {
    pub children: Vec<TexTalkNode>,
}

impl ExpressionNode {
    pub fn new(children: Vec<TexTalkNode>) -> Self {
        Self { children }
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

/// Both sides of a relation (`is`, `in`, `notin`, `:=`, `::=`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationNode {
    pub lhs: ParametersNode,
    pub rhs: ParametersNode,
}

// ============================================================================
// The node sum type
// ============================================================================

/// Every TexTalk node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TexTalkNode {
    Text(TextNode),
    Command(Command),
    CommandPart(CommandPart),
    Group(GroupNode),
    NamedGroup(NamedGroupNode),
    SubSup(SubSupNode),
    Mapping(MappingNode),
    Parameters(ParametersNode),
    Expression(ExpressionNode),
    Operator(OperatorNode),
    Is(RelationNode),
    In(RelationNode),
    NotIn(RelationNode),
    ColonEquals(RelationNode),
    ColonColonEquals(RelationNode),
}

/// Discriminant of [`TexTalkNode`], handy for logging and assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Text,
    Command,
    CommandPart,
    Group,
    NamedGroup,
    SubSup,
    Mapping,
    Parameters,
    Expression,
    Operator,
    Is,
    In,
    NotIn,
    ColonEquals,
    ColonColonEquals,
}

impl TexTalkNode {
    pub fn kind(&self) -> NodeKind {
        self.node_ref().kind()
    }

    /// Return the leaf if this is a [`TextNode`].
    pub fn as_text(&self) -> Option<&TextNode> {
        match self {
            TexTalkNode::Text(t) => Some(t),
            _ => None,
        }
    }

    /// Return `true` for a leaf the operator resolver treats as a special operator.
    pub fn is_special_operator(&self) -> bool {
        self.as_text().is_some_and(TextNode::is_special_operator)
    }

    /// Return `true` for a plain identifier leaf.
    pub fn is_identifier(&self) -> bool {
        self.as_text().is_some_and(|t| t.kind == TextKind::Identifier)
    }
}

/// Implement `From<T> for TexTalkNode` and `TryFrom<TexTalkNode> for T` for single-variant node structs.
macro_rules! node_conversions {
    ($($ty:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for TexTalkNode {
                fn from(node: $ty) -> Self {
                    TexTalkNode::$variant(node)
                }
            }

            impl TryFrom<TexTalkNode> for $ty {
                type Error = TexTalkNode;

                fn try_from(node: TexTalkNode) -> Result<Self, Self::Error> {
                    match node {
                        TexTalkNode::$variant(inner) => Ok(inner),
                        other => Err(other),
                    }
                }
            }
        )*
    };
}

node_conversions! {
    TextNode => Text,
    Command => Command,
    CommandPart => CommandPart,
    GroupNode => Group,
    NamedGroupNode => NamedGroup,
    SubSupNode => SubSup,
    MappingNode => Mapping,
    ParametersNode => Parameters,
    ExpressionNode => Expression,
    OperatorNode => Operator,
}

impl fmt::Display for TexTalkNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_code())
    }
}

impl fmt::Display for ExpressionNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_code())
    }
}
