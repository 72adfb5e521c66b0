//! Incremental assembly of SPARQL SELECT queries.
//!
//! A [`QueryBuilder`] owns the syntax tree of one SELECT query. Triples are
//! added by generating minimal standalone query text, parsing it with
//! [`sparweld_parser`] and merging the resulting fragment into the owned
//! tree; [`QueryBuilder::render`] walks the tree back into query text.
//!
//! Only a restricted subset of SPARQL is understood: a single SELECT unit,
//! basic graph patterns, OPTIONAL, UNION and simple variable projections.

mod builder;
mod error;
mod render;
pub mod visit;

pub use builder::{QueryBuilder, TripleOptions};
pub use error::BuildError;

pub mod model {
    pub use sparweld_model::*;
}

pub mod parser {
    pub use sparweld_parser::*;
}
