use crate::{
    BasicGraphPattern, GraphUnionPattern, GroupGraphPattern, Literal,
    OptionalGraphPattern, Pattern, PrefixDeclaration, QueryTree, Term, Triple, Unit,
    Uri, Variable,
};

/// A borrowed reference to any node kind in a query tree.
///
/// Nodes carry no traversal links of their own; [`NodeRef::children`]
/// discovers the children of a node structurally, in document order.
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    Tree(&'a QueryTree),
    Unit(&'a Unit),
    Group(&'a GroupGraphPattern),
    Basic(&'a BasicGraphPattern),
    Triple(&'a Triple),
    Union(&'a GraphUnionPattern),
    Optional(&'a OptionalGraphPattern),
    Variable(&'a Variable),
    Uri(&'a Uri),
    Literal(&'a Literal),
    Prefix(&'a PrefixDeclaration),
}

impl<'a> NodeRef<'a> {
    /// The immediate structural children of this node.
    ///
    /// For a unit this is the projection terms followed by the pattern; for
    /// a triple it is subject, predicate, object. Leaf nodes have none.
    pub fn children(self) -> Vec<NodeRef<'a>> {
        match self {
            NodeRef::Tree(tree) => tree
                .prologue
                .prefixes
                .iter()
                .map(NodeRef::Prefix)
                .chain(tree.units.iter().map(NodeRef::Unit))
                .collect(),
            NodeRef::Unit(unit) => unit
                .projection
                .iter()
                .map(NodeRef::from)
                .chain(std::iter::once(NodeRef::Group(&unit.pattern)))
                .collect(),
            NodeRef::Group(group) => group.patterns.iter().map(NodeRef::from).collect(),
            NodeRef::Basic(basic) => basic.triples.iter().map(NodeRef::Triple).collect(),
            NodeRef::Triple(triple) => {
                vec![
                    NodeRef::from(&triple.subject),
                    NodeRef::from(&triple.predicate),
                    NodeRef::from(&triple.object),
                ]
            }
            NodeRef::Union(union) => union.branches.iter().map(NodeRef::Group).collect(),
            NodeRef::Optional(optional) => vec![NodeRef::Group(&optional.inner)],
            NodeRef::Variable(_)
            | NodeRef::Uri(_)
            | NodeRef::Literal(_)
            | NodeRef::Prefix(_) => Vec::new(),
        }
    }
}

impl<'a> From<&'a Term> for NodeRef<'a> {
    fn from(term: &'a Term) -> Self {
        match term {
            Term::Variable(v) => NodeRef::Variable(v),
            Term::Uri(u) => NodeRef::Uri(u),
            Term::Literal(l) => NodeRef::Literal(l),
        }
    }
}

impl<'a> From<&'a Pattern> for NodeRef<'a> {
    fn from(pattern: &'a Pattern) -> Self {
        match pattern {
            Pattern::Basic(b) => NodeRef::Basic(b),
            Pattern::Group(g) => NodeRef::Group(g),
            Pattern::Union(u) => NodeRef::Union(u),
            Pattern::Optional(o) => NodeRef::Optional(o),
        }
    }
}
