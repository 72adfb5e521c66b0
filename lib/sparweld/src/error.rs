use sparweld_model::QueryForm;
use sparweld_parser::ParseError;

/// An error raised while building or rendering a query.
///
/// Every variant aborts only the call that produced it; the builder stays
/// usable afterwards and its tree is never left partially merged.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BuildError {
    /// The constructed or supplied query text was rejected by the parser.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// More than one query unit is present in the owned tree or a fragment.
    #[error("queries with more than one unit are not supported")]
    MultipleUnits,
    /// An operation ran before a successful `parse` stored a tree.
    #[error("the builder holds no query tree yet; call parse first")]
    NotParsed,
    /// A generated fragment did not reduce to a single basic graph pattern.
    #[error("generated fragment did not contain a single basic graph pattern")]
    MalformedFragment,
    /// Rendering a unit whose form is not SELECT.
    #[error("only SELECT units can be rendered, found {0}")]
    UnsupportedQueryForm(QueryForm),
    /// Rendering a projection that contains something other than variables.
    #[error("only variables are supported in a projection")]
    UnsupportedProjection,
}
