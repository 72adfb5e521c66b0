//! The node vocabulary shared by the sparweld parser, builder and serializer.
//!
//! Every node kind the parser can produce is a concrete type here. There are
//! no parent, child or sibling pointers; structural traversal goes through
//! [`NodeRef::children`].

mod node;
mod pattern;
mod query;
mod term;

pub use node::*;
pub use pattern::*;
pub use query::*;
pub use term::*;
