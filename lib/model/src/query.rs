use crate::{GroupGraphPattern, Term};
use std::fmt;

/// A namespace binding from the query prologue, e.g.
/// `PREFIX ex: <http://example.com/>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixDeclaration {
    pub label: String,
    pub namespace: String,
}

/// The declarations preceding the first query unit.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Prologue {
    pub prefixes: Vec<PrefixDeclaration>,
}

/// The query form of a unit. The parser only produces [`QueryForm::Select`];
/// the other form exists so that programmatically built trees can exercise
/// the serializer's form check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryForm {
    Select,
    Ask,
}

impl fmt::Display for QueryForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryForm::Select => f.write_str("SELECT"),
            QueryForm::Ask => f.write_str("ASK"),
        }
    }
}

/// The single modifier token a SELECT unit may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectModifier {
    Distinct,
    Reduced,
}

impl fmt::Display for SelectModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectModifier::Distinct => f.write_str("DISTINCT"),
            SelectModifier::Reduced => f.write_str("REDUCED"),
        }
    }
}

/// One query unit. The projection is stored as terms rather than variables
/// so the serializer can reject non-variable projection items instead of
/// the type system hiding them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    pub form: QueryForm,
    pub modifier: Option<SelectModifier>,
    pub projection: Vec<Term>,
    pub pattern: GroupGraphPattern,
}

/// A whole parsed query: prologue plus its units. The grammar always yields
/// exactly one unit; the vector shape keeps the multi-unit guard in the
/// builder honest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryTree {
    pub prologue: Prologue,
    pub units: Vec<Unit>,
}
