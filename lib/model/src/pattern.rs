use crate::Term;

/// One subject-predicate-object clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Triple {
    pub subject: Term,
    pub predicate: Term,
    pub object: Term,
}

impl Triple {
    pub fn new(subject: Term, predicate: Term, object: Term) -> Self {
        Self {
            subject,
            predicate,
            object,
        }
    }
}

/// A run of triples with no grouping between them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BasicGraphPattern {
    pub triples: Vec<Triple>,
}

impl BasicGraphPattern {
    /// The subject of the first triple, used by the builder's
    /// append-by-subject matching.
    pub fn leading_subject(&self) -> Option<&Term> {
        self.triples.first().map(|t| &t.subject)
    }
}

/// A `{ ... }` block.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GroupGraphPattern {
    pub patterns: Vec<Pattern>,
}

/// A `UNION` of alternative groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphUnionPattern {
    pub branches: Vec<GroupGraphPattern>,
}

/// An `OPTIONAL { ... }` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionalGraphPattern {
    pub inner: GroupGraphPattern,
}

/// The closed set of sub-patterns a group can contain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern {
    Basic(BasicGraphPattern),
    Group(GroupGraphPattern),
    Union(GraphUnionPattern),
    Optional(OptionalGraphPattern),
}
