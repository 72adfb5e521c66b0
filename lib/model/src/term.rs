use std::fmt;

/// A query variable such as `?name`. The stored name does not include the
/// leading `?`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub name: String,
}

impl Variable {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "?{}", self.name)
    }
}

/// An IRI reference, either written out in full or abbreviated through a
/// prefix label declared in the prologue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Uri {
    /// `<http://example.com/p>`
    Full(String),
    /// `ex:p`
    Prefixed { prefix: String, suffix: String },
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Uri::Full(value) => write!(f, "<{value}>"),
            Uri::Prefixed { prefix, suffix } => write!(f, "{prefix}:{suffix}"),
        }
    }
}

/// An RDF literal, stored as the lexical form that appeared in the query
/// text. String literals drop their surrounding quotes; numeric literals
/// keep their digits verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal {
    pub value: String,
    pub numeric: bool,
}

impl Literal {
    pub fn string(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            numeric: false,
        }
    }

    pub fn numeric(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            numeric: true,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.numeric {
            write!(f, "{}", self.value)
        } else {
            write!(f, "\"{}\"", self.value)
        }
    }
}

/// Any term that can occupy a triple position or a projection slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    Variable(Variable),
    Uri(Uri),
    Literal(Literal),
}

impl Term {
    /// Returns the variable name if this term is a variable.
    pub fn as_variable(&self) -> Option<&Variable> {
        match self {
            Term::Variable(v) => Some(v),
            Term::Uri(_) | Term::Literal(_) => None,
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Variable(v) => v.fmt(f),
            Term::Uri(u) => u.fmt(f),
            Term::Literal(l) => l.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn term_display() {
        assert_eq!(Term::Variable(Variable::new("x")).to_string(), "?x");
        assert_eq!(
            Term::Uri(Uri::Full("http://example.com/p".into())).to_string(),
            "<http://example.com/p>"
        );
        assert_eq!(
            Term::Uri(Uri::Prefixed {
                prefix: "ex".into(),
                suffix: "p".into()
            })
            .to_string(),
            "ex:p"
        );
        assert_eq!(Term::Literal(Literal::string("abc")).to_string(), "\"abc\"");
        assert_eq!(Term::Literal(Literal::numeric("42")).to_string(), "42");
    }
}
