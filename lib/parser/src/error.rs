use peg::error::ParseError as PegParseError;
use peg::str::LineCol;

/// An error raised when query text does not conform to the restricted
/// grammar. The wrapped error carries the failure position and the tokens
/// the grammar would have accepted there.
#[derive(Debug, thiserror::Error)]
#[error("malformed query text: {0}")]
pub struct ParseError(#[from] PegParseError<LineCol>);
