//! Tree kit: borrowed node views, single-level visitation, bottom-up rebuilds and ancestry lookup.
//!
//! Children of a node are stored with their concrete types (a [`GroupNode`] holds a [`ParametersNode`], not a
//! [`TexTalkNode`]), so generic traversal goes through [`NodeRef`], a `Copy` view over any node in the tree.
//!
//! ## Notes
//! - [`NodeRef::try_map_children`] is the one place that knows the child layout of every variant. `for_each`,
//!   `transform` and the resolver walks are built on top of it.
//! - When a rewrite returns a node of the wrong variant for a typed slot (say, a `Text` where a `Parameters` is
//!   stored) the original child is kept and a warning is logged.

use std::convert::Infallible;

use crate::ast::*;

/// A borrowed view of any node.
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    Text(&'a TextNode),
    Command(&'a Command),
    CommandPart(&'a CommandPart),
    Group(&'a GroupNode),
    NamedGroup(&'a NamedGroupNode),
    SubSup(&'a SubSupNode),
    Mapping(&'a MappingNode),
    Parameters(&'a ParametersNode),
    Expression(&'a ExpressionNode),
    Operator(&'a OperatorNode),
    Is(&'a RelationNode),
    In(&'a RelationNode),
    NotIn(&'a RelationNode),
    ColonEquals(&'a RelationNode),
    ColonColonEquals(&'a RelationNode),
}

impl TexTalkNode {
    /// Borrow this node as a [`NodeRef`].
    pub fn node_ref(&self) -> NodeRef<'_> {
        match self {
            TexTalkNode::Text(n) => NodeRef::Text(n),
            TexTalkNode::Command(n) => NodeRef::Command(n),
            TexTalkNode::CommandPart(n) => NodeRef::CommandPart(n),
            TexTalkNode::Group(n) => NodeRef::Group(n),
            TexTalkNode::NamedGroup(n) => NodeRef::NamedGroup(n),
            TexTalkNode::SubSup(n) => NodeRef::SubSup(n),
            TexTalkNode::Mapping(n) => NodeRef::Mapping(n),
            TexTalkNode::Parameters(n) => NodeRef::Parameters(n),
            TexTalkNode::Expression(n) => NodeRef::Expression(n),
            TexTalkNode::Operator(n) => NodeRef::Operator(n),
            TexTalkNode::Is(n) => NodeRef::Is(n),
            TexTalkNode::In(n) => NodeRef::In(n),
            TexTalkNode::NotIn(n) => NodeRef::NotIn(n),
            TexTalkNode::ColonEquals(n) => NodeRef::ColonEquals(n),
            TexTalkNode::ColonColonEquals(n) => NodeRef::ColonColonEquals(n),
        }
    }

    /// Visit the direct children of this node in source order.
    pub fn for_each<'a>(&'a self, f: impl FnMut(NodeRef<'a>)) {
        self.node_ref().for_each(f)
    }

    /// Rebuild the tree bottom-up: children are transformed first, then `f` is applied to the rebuilt node.
    ///
    /// Always returns a new tree; `self` is untouched.
    pub fn transform(&self, f: impl FnMut(TexTalkNode) -> TexTalkNode) -> TexTalkNode {
        self.node_ref().transform(f)
    }

    /// Fallible [`transform`](Self::transform): the first `Err` aborts the rebuild.
    pub fn try_transform<E>(&self, mut f: impl FnMut(TexTalkNode) -> Result<TexTalkNode, E>) -> Result<TexTalkNode, E> {
        self.node_ref().try_transform(&mut f)
    }
}

impl ExpressionNode {
    pub fn node_ref(&self) -> NodeRef<'_> {
        NodeRef::Expression(self)
    }

    /// [`TexTalkNode::transform`] for a root expression.
    ///
    /// If `f` turns the root into another variant, the result is wrapped in a single-child expression.
    pub fn transform(&self, f: impl FnMut(TexTalkNode) -> TexTalkNode) -> ExpressionNode {
        into_expression(self.node_ref().transform(f))
    }

    /// Fallible [`ExpressionNode::transform`].
    pub fn try_transform<E>(
        &self,
        mut f: impl FnMut(TexTalkNode) -> Result<TexTalkNode, E>,
    ) -> Result<ExpressionNode, E> {
        self.node_ref().try_transform(&mut f).map(into_expression)
    }
}

fn into_expression(node: TexTalkNode) -> ExpressionNode {
    match node {
        TexTalkNode::Expression(e) => e,
        other => ExpressionNode::new(vec![other]),
    }
}

impl<'a> NodeRef<'a> {
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeRef::Text(_) => NodeKind::Text,
            NodeRef::Command(_) => NodeKind::Command,
            NodeRef::CommandPart(_) => NodeKind::CommandPart,
            NodeRef::Group(_) => NodeKind::Group,
            NodeRef::NamedGroup(_) => NodeKind::NamedGroup,
            NodeRef::SubSup(_) => NodeKind::SubSup,
            NodeRef::Mapping(_) => NodeKind::Mapping,
            NodeRef::Parameters(_) => NodeKind::Parameters,
            NodeRef::Expression(_) => NodeKind::Expression,
            NodeRef::Operator(_) => NodeKind::Operator,
            NodeRef::Is(_) => NodeKind::Is,
            NodeRef::In(_) => NodeKind::In,
            NodeRef::NotIn(_) => NodeKind::NotIn,
            NodeRef::ColonEquals(_) => NodeKind::ColonEquals,
            NodeRef::ColonColonEquals(_) => NodeKind::ColonColonEquals,
        }
    }

    /// Address of the underlying node, used for identity comparisons.
    fn address(&self) -> *const () {
        match *self {
            NodeRef::Text(n) => n as *const TextNode as *const (),
            NodeRef::Command(n) => n as *const Command as *const (),
            NodeRef::CommandPart(n) => n as *const CommandPart as *const (),
            NodeRef::Group(n) => n as *const GroupNode as *const (),
            NodeRef::NamedGroup(n) => n as *const NamedGroupNode as *const (),
            NodeRef::SubSup(n) => n as *const SubSupNode as *const (),
            NodeRef::Mapping(n) => n as *const MappingNode as *const (),
            NodeRef::Parameters(n) => n as *const ParametersNode as *const (),
            NodeRef::Expression(n) => n as *const ExpressionNode as *const (),
            NodeRef::Operator(n) => n as *const OperatorNode as *const (),
            NodeRef::Is(n)
            | NodeRef::In(n)
            | NodeRef::NotIn(n)
            | NodeRef::ColonEquals(n)
            | NodeRef::ColonColonEquals(n) => n as *const RelationNode as *const (),
        }
    }

    /// Identity (not structural) equality: same variant at the same address.
    ///
    /// A struct and its first field can share an address, so the variant is compared too.
    pub fn same_node(&self, other: &NodeRef<'_>) -> bool {
        self.kind() == other.kind() && std::ptr::eq(self.address(), other.address())
    }

    /// Clone the viewed node into an owned [`TexTalkNode`].
    pub fn to_owned_node(&self) -> TexTalkNode {
        match *self {
            NodeRef::Text(n) => TexTalkNode::Text(n.clone()),
            NodeRef::Command(n) => TexTalkNode::Command(n.clone()),
            NodeRef::CommandPart(n) => TexTalkNode::CommandPart(n.clone()),
            NodeRef::Group(n) => TexTalkNode::Group(n.clone()),
            NodeRef::NamedGroup(n) => TexTalkNode::NamedGroup(n.clone()),
            NodeRef::SubSup(n) => TexTalkNode::SubSup(n.clone()),
            NodeRef::Mapping(n) => TexTalkNode::Mapping(n.clone()),
            NodeRef::Parameters(n) => TexTalkNode::Parameters(n.clone()),
            NodeRef::Expression(n) => TexTalkNode::Expression(n.clone()),
            NodeRef::Operator(n) => TexTalkNode::Operator(n.clone()),
            NodeRef::Is(n) => TexTalkNode::Is(n.clone()),
            NodeRef::In(n) => TexTalkNode::In(n.clone()),
            NodeRef::NotIn(n) => TexTalkNode::NotIn(n.clone()),
            NodeRef::ColonEquals(n) => TexTalkNode::ColonEquals(n.clone()),
            NodeRef::ColonColonEquals(n) => TexTalkNode::ColonColonEquals(n.clone()),
        }
    }

    /// Visit the direct children in source order.
    pub fn for_each(&self, mut f: impl FnMut(NodeRef<'a>)) {
        match *self {
            NodeRef::Text(_) => {}
            NodeRef::Command(cmd) => cmd.parts.iter().for_each(|p| f(NodeRef::CommandPart(p))),
            NodeRef::CommandPart(part) => {
                f(NodeRef::Text(&part.name));
                if let Some(square) = &part.square {
                    f(NodeRef::Group(square));
                }
                if let Some(subsup) = &part.subsup {
                    f(NodeRef::SubSup(subsup));
                }
                part.groups.iter().for_each(|g| f(NodeRef::Group(g)));
                if let Some(paren) = &part.paren {
                    f(NodeRef::Group(paren));
                }
                part.named_groups.iter().for_each(|g| f(NodeRef::NamedGroup(g)));
            }
            NodeRef::Group(group) => f(NodeRef::Parameters(&group.parameters)),
            NodeRef::NamedGroup(named) => {
                f(NodeRef::Text(&named.name));
                named.groups.iter().for_each(|g| f(NodeRef::Group(g)));
            }
            NodeRef::SubSup(subsup) => {
                if let Some(sub) = &subsup.sub {
                    f(NodeRef::Group(sub));
                }
                if let Some(sup) = &subsup.sup {
                    f(NodeRef::Group(sup));
                }
            }
            NodeRef::Mapping(mapping) => {
                f(NodeRef::Text(&mapping.name));
                if let Some(sub) = &mapping.sub {
                    f(NodeRef::Group(sub));
                }
                if let Some(paren) = &mapping.paren {
                    f(NodeRef::Group(paren));
                }
            }
            NodeRef::Parameters(params) => params.items.iter().for_each(|e| f(NodeRef::Expression(e))),
            NodeRef::Expression(expr) => expr.children.iter().for_each(|c| f(c.node_ref())),
            NodeRef::Operator(op) => {
                if let Some(lhs) = &op.lhs {
                    f(lhs.node_ref());
                }
                f(op.command.node_ref());
                if let Some(rhs) = &op.rhs {
                    f(rhs.node_ref());
                }
            }
            NodeRef::Is(rel)
            | NodeRef::In(rel)
            | NodeRef::NotIn(rel)
            | NodeRef::ColonEquals(rel)
            | NodeRef::ColonColonEquals(rel) => {
                f(NodeRef::Parameters(&rel.lhs));
                f(NodeRef::Parameters(&rel.rhs));
            }
        }
    }

    /// Rebuild this node with every direct child replaced by `f(child)`.
    ///
    /// This is a single-level operation: `f` decides whether to recurse.
    pub fn try_map_children<E>(
        &self,
        f: &mut dyn FnMut(NodeRef<'_>) -> Result<TexTalkNode, E>,
    ) -> Result<TexTalkNode, E> {
        let node = match *self {
            NodeRef::Text(text) => TexTalkNode::Text(text.clone()),
            NodeRef::Command(cmd) => TexTalkNode::Command(Command {
                parts: map_vec(&cmd.parts, NodeRef::CommandPart, f)?,
                has_suffix: cmd.has_suffix,
            }),
            NodeRef::CommandPart(part) => TexTalkNode::CommandPart(CommandPart {
                name: map_slot(&part.name, NodeRef::Text, f)?,
                square: map_opt(&part.square, NodeRef::Group, f)?,
                subsup: map_opt(&part.subsup, NodeRef::SubSup, f)?,
                groups: map_vec(&part.groups, NodeRef::Group, f)?,
                paren: map_opt(&part.paren, NodeRef::Group, f)?,
                named_groups: map_vec(&part.named_groups, NodeRef::NamedGroup, f)?,
            }),
            NodeRef::Group(group) => TexTalkNode::Group(GroupNode {
                kind: group.kind,
                parameters: map_slot(&group.parameters, NodeRef::Parameters, f)?,
                is_vararg: group.is_vararg,
            }),
            NodeRef::NamedGroup(named) => TexTalkNode::NamedGroup(NamedGroupNode {
                name: map_slot(&named.name, NodeRef::Text, f)?,
                groups: map_vec(&named.groups, NodeRef::Group, f)?,
            }),
            NodeRef::SubSup(subsup) => TexTalkNode::SubSup(SubSupNode {
                sub: map_opt(&subsup.sub, NodeRef::Group, f)?,
                sup: map_opt(&subsup.sup, NodeRef::Group, f)?,
            }),
            NodeRef::Mapping(mapping) => TexTalkNode::Mapping(MappingNode {
                name: map_slot(&mapping.name, NodeRef::Text, f)?,
                sub: map_opt(&mapping.sub, NodeRef::Group, f)?,
                paren: map_opt(&mapping.paren, NodeRef::Group, f)?,
            }),
            NodeRef::Parameters(params) => TexTalkNode::Parameters(map_parameters(params, f)?),
            NodeRef::Expression(expr) => TexTalkNode::Expression(ExpressionNode {
                children: expr
                    .children
                    .iter()
                    .map(|c| f(c.node_ref()))
                    .collect::<Result<Vec<_>, E>>()?,
            }),
            NodeRef::Operator(op) => {
                let lhs = match &op.lhs {
                    Some(lhs) => Some(Box::new(f(lhs.node_ref())?)),
                    None => None,
                };
                let command = Box::new(f(op.command.node_ref())?);
                let rhs = match &op.rhs {
                    Some(rhs) => Some(Box::new(f(rhs.node_ref())?)),
                    None => None,
                };
                TexTalkNode::Operator(OperatorNode { lhs, command, rhs })
            }
            NodeRef::Is(rel) => TexTalkNode::Is(map_relation(rel, f)?),
            NodeRef::In(rel) => TexTalkNode::In(map_relation(rel, f)?),
            NodeRef::NotIn(rel) => TexTalkNode::NotIn(map_relation(rel, f)?),
            NodeRef::ColonEquals(rel) => TexTalkNode::ColonEquals(map_relation(rel, f)?),
            NodeRef::ColonColonEquals(rel) => TexTalkNode::ColonColonEquals(map_relation(rel, f)?),
        };
        Ok(node)
    }

    /// Infallible [`try_map_children`](Self::try_map_children).
    pub fn map_children(&self, mut f: impl FnMut(NodeRef<'_>) -> TexTalkNode) -> TexTalkNode {
        match self.try_map_children(&mut |child| Ok::<_, Infallible>(f(child))) {
            Ok(node) => node,
            Err(never) => match never {},
        }
    }

    /// Bottom-up rebuild; see [`TexTalkNode::transform`].
    pub fn transform(&self, mut f: impl FnMut(TexTalkNode) -> TexTalkNode) -> TexTalkNode {
        match self.try_transform(&mut |node| Ok::<_, Infallible>(f(node))) {
            Ok(node) => node,
            Err(never) => match never {},
        }
    }

    /// Fallible bottom-up rebuild; see [`TexTalkNode::try_transform`].
    pub fn try_transform<E>(
        &self,
        f: &mut dyn FnMut(TexTalkNode) -> Result<TexTalkNode, E>,
    ) -> Result<TexTalkNode, E> {
        let rebuilt = self.try_map_children(&mut |child| child.try_transform(&mut *f))?;
        f(rebuilt)
    }
}

// --- typed slot helpers ------------------------------------------------------

fn map_slot<'c, T, E>(
    child: &'c T,
    view: fn(&'c T) -> NodeRef<'c>,
    f: &mut dyn FnMut(NodeRef<'_>) -> Result<TexTalkNode, E>,
) -> Result<T, E>
where
    T: Clone + TryFrom<TexTalkNode, Error = TexTalkNode>,
{
    let mapped = f(view(child))?;
    match T::try_from(mapped) {
        Ok(node) => Ok(node),
        Err(other) => {
            tracing::warn!(
                expected = ?view(child).kind(),
                found = ?other.kind(),
                "rewrite returned a node of the wrong kind for a typed slot; keeping the original child"
            );
            Ok(child.clone())
        }
    }
}

fn map_opt<'c, T, E>(
    child: &'c Option<T>,
    view: fn(&'c T) -> NodeRef<'c>,
    f: &mut dyn FnMut(NodeRef<'_>) -> Result<TexTalkNode, E>,
) -> Result<Option<T>, E>
where
    T: Clone + TryFrom<TexTalkNode, Error = TexTalkNode>,
{
    match child {
        Some(child) => map_slot(child, view, f).map(Some),
        None => Ok(None),
    }
}

fn map_vec<'c, T, E>(
    children: &'c [T],
    view: fn(&'c T) -> NodeRef<'c>,
    f: &mut dyn FnMut(NodeRef<'_>) -> Result<TexTalkNode, E>,
) -> Result<Vec<T>, E>
where
    T: Clone + TryFrom<TexTalkNode, Error = TexTalkNode>,
{
    children.iter().map(|c| map_slot(c, view, f)).collect()
}

fn map_parameters<E>(
    params: &ParametersNode,
    f: &mut dyn FnMut(NodeRef<'_>) -> Result<TexTalkNode, E>,
) -> Result<ParametersNode, E> {
    Ok(ParametersNode {
        items: map_vec(&params.items, NodeRef::Expression, f)?,
    })
}

fn map_relation<E>(
    rel: &RelationNode,
    f: &mut dyn FnMut(NodeRef<'_>) -> Result<TexTalkNode, E>,
) -> Result<RelationNode, E> {
    Ok(RelationNode {
        lhs: map_slot(&rel.lhs, NodeRef::Parameters, f)?,
        rhs: map_slot(&rel.rhs, NodeRef::Parameters, f)?,
    })
}

// ============================================================================
// Ancestry
// ============================================================================

/// Return the path of nodes from `root` down to `target` (both inclusive), found by identity.
///
/// Returns `None` when `target` is not a node of this tree. Structurally equal nodes elsewhere in the tree do not
/// match; only the exact node does.
pub fn find_path<'a>(root: NodeRef<'a>, target: NodeRef<'_>) -> Option<Vec<NodeRef<'a>>> {
    let mut path = vec![root];
    if search(root, target, &mut path) {
        Some(path)
    } else {
        None
    }
}

/// Return the ancestors of `target` from `root` down to its parent.
pub fn ancestors<'a>(root: NodeRef<'a>, target: NodeRef<'_>) -> Option<Vec<NodeRef<'a>>> {
    find_path(root, target).map(|mut path| {
        path.pop();
        path
    })
}

fn search<'a>(node: NodeRef<'a>, target: NodeRef<'_>, path: &mut Vec<NodeRef<'a>>) -> bool {
    if node.same_node(&target) {
        return true;
    }
    let mut found = false;
    node.for_each(|child| {
        if found {
            return;
        }
        path.push(child);
        if search(child, target, path) {
            found = true;
        } else {
            path.pop();
        }
    });
    found
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

    fn paren(items: Vec<ExpressionNode>) -> TexTalkNode {
        TexTalkNode::Group(GroupNode::new(GroupKind::Paren, ParametersNode::new(items)))
    }

    fn sample() -> ExpressionNode {
        expr(vec![
            ident("f"),
            paren(vec![expr(vec![ident("x")]), expr(vec![ident("y")])]),
        ])
    }

    #[test]
    fn test_for_each_visits_direct_children_only() {
        let root = TexTalkNode::Expression(sample());
        let mut kinds = Vec::new();
        root.for_each(|child| kinds.push(child.kind()));
        assert_eq!(kinds, vec![NodeKind::Text, NodeKind::Group]);
    }

    #[test]
    fn test_transform_identity_is_equal() {
        let root = sample();
        assert_eq!(root.transform(|n| n), root);
    }

    #[test]
    fn test_transform_is_bottom_up() {
        let root = TexTalkNode::Expression(sample());
        let mut order = Vec::new();
        root.transform(|n| {
            order.push(n.kind());
            n
        });
        assert_eq!(order.first(), Some(&NodeKind::Text));
        assert_eq!(order.last(), Some(&NodeKind::Expression));
        let group = order.iter().position(|k| *k == NodeKind::Group);
        let params = order.iter().position(|k| *k == NodeKind::Parameters);
        assert!(params < group, "parameters must be rebuilt before their group");
    }

    #[test]
    fn test_transform_renames_identifiers() {
        let root = sample();
        let renamed = root.transform(|n| match n {
            TexTalkNode::Text(t) if t.text == "x" => TexTalkNode::Text(TextNode::identifier("z")),
            other => other,
        });
        assert_eq!(renamed.to_code(), "f (z, y)");
        // The original is untouched.
        assert_eq!(root.to_code(), "f (x, y)");
    }

    #[test]
    fn test_wrong_variant_in_typed_slot_keeps_child() {
        let root = sample();
        let out = root.transform(|n| match n {
            TexTalkNode::Parameters(_) => ident("oops"),
            other => other,
        });
        assert_eq!(out, root);
    }

    #[test]
    fn test_try_transform_stops_on_error() {
        let root = sample();
        let mut seen = 0;
        let result: Result<_, &str> = root.try_transform(|n| {
            seen += 1;
            match n {
                TexTalkNode::Text(t) if t.text == "x" => Err("boom"),
                other => Ok(other),
            }
        });
        assert_eq!(result, Err("boom"));
        // `f` and `x` only; `y` and the enclosing nodes are never reached.
        assert_eq!(seen, 2);
    }

    #[test]
    fn test_find_path_by_identity() {
        let root = sample();
        let TexTalkNode::Group(group) = &root.children[1] else {
            panic!("expected group");
        };
        let y = &group.parameters.items[1].children[0];
        let path = find_path(root.node_ref(), y.node_ref()).expect("y is in the tree");
        let kinds: Vec<_> = path.iter().map(|n| n.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                NodeKind::Expression,
                NodeKind::Group,
                NodeKind::Parameters,
                NodeKind::Expression,
                NodeKind::Text
            ]
        );
        assert!(path[0].same_node(&root.node_ref()));
    }

    #[test]
    fn test_find_path_ignores_structural_twins() {
        let root = sample();
        let twin = ident("y");
        assert!(find_path(root.node_ref(), twin.node_ref()).is_none());
    }

    #[test]
    fn test_ancestors_excludes_target() {
        let root = sample();
        let f = &root.children[0];
        let ancestors = ancestors(root.node_ref(), f.node_ref()).expect("f is in the tree");
        assert_eq!(ancestors.len(), 1);
        assert_eq!(ancestors[0].kind(), NodeKind::Expression);
    }
}
