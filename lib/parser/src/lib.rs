//! Parser for the deliberately restricted SPARQL subset the builder works
//! with: an optional `PREFIX` prologue followed by a single
//! `SELECT [DISTINCT|REDUCED] ?v… WHERE { … }` unit whose body may contain
//! basic graph patterns, nested groups, `OPTIONAL` blocks and `UNION`
//! alternatives.
//!
//! Anything outside that subset is a [`ParseError`]. The produced tree uses
//! the node vocabulary of [`sparweld_model`].

mod error;

pub use error::ParseError;

use oxiri::Iri;
use sparweld_model::{
    BasicGraphPattern, GraphUnionPattern, GroupGraphPattern, Literal,
    OptionalGraphPattern, Pattern, PrefixDeclaration, Prologue, QueryForm, QueryTree,
    SelectModifier, Term, Triple, Unit, Uri, Variable,
};

peg::parser! {
    grammar query_text() for str {
        rule _() = quiet!{ [' ' | '\t' | '\r' | '\n']* }

        rule kw_select() = "SELECT" / "select"
        rule kw_distinct() = "DISTINCT" / "distinct"
        rule kw_reduced() = "REDUCED" / "reduced"
        rule kw_where() = "WHERE" / "where"
        rule kw_optional() = "OPTIONAL" / "optional"
        rule kw_union() = "UNION" / "union"
        rule kw_prefix() = "PREFIX" / "prefix"

        rule name() -> String
            = n:$(['a'..='z' | 'A'..='Z' | '0'..='9' | '_']+) { n.to_owned() }

        rule variable() -> Variable
            = "?" n:name() { Variable::new(n) }

        rule iri_ref() -> String
            = "<" i:$([^ '<' | '>' | '"' | '{' | '}' | '|' | '^' | '`' | '\\'
                | ' ' | '\t' | '\r' | '\n']*) ">"
            { i.to_owned() }

        rule prefixed_name() -> Uri
            = p:$(['a'..='z' | 'A'..='Z' | '0'..='9' | '_']*) ":" s:name() {
                Uri::Prefixed { prefix: p.to_owned(), suffix: s }
            }

        rule literal() -> Literal
            = "\"" v:$([^ '"']*) "\"" { Literal::string(v) }
            / n:$("-"? ['0'..='9']+ ("." ['0'..='9']+)?) { Literal::numeric(n) }

        rule term() -> Term
            = v:variable() { Term::Variable(v) }
            / i:iri_ref() { Term::Uri(Uri::Full(i)) }
            / l:literal() { Term::Literal(l) }
            / u:prefixed_name() { Term::Uri(u) }

        rule triple() -> Triple
            = s:term() _ p:term() _ o:term() { Triple::new(s, p, o) }

        // Triples may be separated by `.` and the block may end with one,
        // which is what the serializer emits.
        rule triples_block() -> BasicGraphPattern
            = triples:(triple() ++ (_ "." _)) (_ ".")? { BasicGraphPattern { triples } }

        rule group() -> GroupGraphPattern
            = "{" _ patterns:(pattern() ** _) _ "}" { GroupGraphPattern { patterns } }

        rule optional_graph_pattern() -> OptionalGraphPattern
            = kw_optional() _ inner:group() { OptionalGraphPattern { inner } }

        // A lone group stays a group; `a UNION b UNION c` collapses into one
        // union node with all branches in order.
        rule union_or_group() -> Pattern
            = first:group() rest:(_ kw_union() _ b:group() { b })* {
                if rest.is_empty() {
                    Pattern::Group(first)
                } else {
                    let mut branches = vec![first];
                    branches.extend(rest);
                    Pattern::Union(GraphUnionPattern { branches })
                }
            }

        rule pattern() -> Pattern
            = o:optional_graph_pattern() { Pattern::Optional(o) }
            / union_or_group()
            / b:triples_block() { Pattern::Basic(b) }

        rule prefix_declaration() -> PrefixDeclaration
            = kw_prefix() _ label:$(['a'..='z' | 'A'..='Z' | '0'..='9' | '_']*) ":"
              _ ns:iri_ref() {?
                if Iri::parse(ns.as_str()).is_ok() {
                    Ok(PrefixDeclaration { label: label.to_owned(), namespace: ns })
                } else {
                    Err("valid namespace IRI")
                }
            }

        rule prologue() -> Prologue
            = prefixes:(prefix_declaration() ** _) { Prologue { prefixes } }

        rule modifier() -> SelectModifier
            = kw_distinct() { SelectModifier::Distinct }
            / kw_reduced() { SelectModifier::Reduced }

        rule projection_var() -> Term
            = v:variable() { Term::Variable(v) }

        rule select_unit() -> Unit
            = kw_select() _ modifier:(m:modifier() _ { m })?
              projection:(projection_var() ++ _) _ kw_where() _ pattern:group() {
                Unit { form: QueryForm::Select, modifier, projection, pattern }
            }

        pub rule query() -> QueryTree
            = _ prologue:prologue() _ unit:select_unit() _ ![_] {
                QueryTree { prologue, units: vec![unit] }
            }
    }
}

/// Parses query text into a [`QueryTree`], or fails on anything outside the
/// restricted subset.
pub fn parse_query(text: &str) -> Result<QueryTree, ParseError> {
    Ok(query_text::query(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_select() -> Result<(), ParseError> {
        let tree = parse_query("SELECT ?x WHERE { ?x <http://ex/p> ?y }")?;
        assert_eq!(tree.units.len(), 1);
        let unit = &tree.units[0];
        assert_eq!(unit.form, QueryForm::Select);
        assert_eq!(unit.modifier, None);
        assert_eq!(unit.projection, vec![Term::Variable(Variable::new("x"))]);
        let Pattern::Basic(basic) = &unit.pattern.patterns[0] else {
            panic!("expected a basic graph pattern");
        };
        assert_eq!(basic.triples.len(), 1);
        assert_eq!(
            basic.triples[0].subject,
            Term::Variable(Variable::new("x"))
        );
        Ok(())
    }

    #[test]
    fn prologue_and_prefixed_names() -> Result<(), ParseError> {
        let tree = parse_query(
            "PREFIX ex: <http://example.com/>\nSELECT ?s WHERE { ?s ex:p \"v\" }",
        )?;
        assert_eq!(
            tree.prologue.prefixes,
            vec![PrefixDeclaration {
                label: "ex".to_owned(),
                namespace: "http://example.com/".to_owned(),
            }]
        );
        let Pattern::Basic(basic) = &tree.units[0].pattern.patterns[0] else {
            panic!("expected a basic graph pattern");
        };
        assert_eq!(
            basic.triples[0].predicate,
            Term::Uri(Uri::Prefixed {
                prefix: "ex".to_owned(),
                suffix: "p".to_owned(),
            })
        );
        assert_eq!(basic.triples[0].object, Term::Literal(Literal::string("v")));
        Ok(())
    }

    #[test]
    fn distinct_modifier() -> Result<(), ParseError> {
        let tree = parse_query("SELECT DISTINCT ?x WHERE { ?x ?p ?o }")?;
        assert_eq!(tree.units[0].modifier, Some(SelectModifier::Distinct));
        let tree = parse_query("SELECT REDUCED ?x WHERE { ?x ?p ?o }")?;
        assert_eq!(tree.units[0].modifier, Some(SelectModifier::Reduced));
        Ok(())
    }

    #[test]
    fn union_branches_in_order() -> Result<(), ParseError> {
        let tree = parse_query(
            "SELECT ?x WHERE { { ?x <http://ex/a> ?y } UNION { ?x <http://ex/b> ?y } }",
        )?;
        let Pattern::Union(union) = &tree.units[0].pattern.patterns[0] else {
            panic!("expected a union pattern");
        };
        assert_eq!(union.branches.len(), 2);
        Ok(())
    }

    #[test]
    fn lone_group_stays_group() -> Result<(), ParseError> {
        let tree = parse_query("SELECT ?x WHERE { { ?x <http://ex/a> ?y } }")?;
        assert!(matches!(
            tree.units[0].pattern.patterns[0],
            Pattern::Group(_)
        ));
        Ok(())
    }

    #[test]
    fn optional_pattern() -> Result<(), ParseError> {
        let tree = parse_query(
            "SELECT ?x WHERE { ?x <http://ex/a> ?y OPTIONAL { ?x <http://ex/b> ?z } }",
        )?;
        let patterns = &tree.units[0].pattern.patterns;
        assert_eq!(patterns.len(), 2);
        assert!(matches!(patterns[1], Pattern::Optional(_)));
        Ok(())
    }

    #[test]
    fn dot_separated_triples() -> Result<(), ParseError> {
        let tree = parse_query(
            "SELECT ?x WHERE { ?x <http://ex/a> ?y . ?x <http://ex/b> 42 . }",
        )?;
        let Pattern::Basic(basic) = &tree.units[0].pattern.patterns[0] else {
            panic!("expected a basic graph pattern");
        };
        assert_eq!(basic.triples.len(), 2);
        assert_eq!(
            basic.triples[1].object,
            Term::Literal(Literal::numeric("42"))
        );
        Ok(())
    }

    #[test]
    fn rejects_malformed_text() {
        parse_query("SELECT WHERE { ?x ?p ?o }").unwrap_err();
        parse_query("SELECT ?x { ?x ?p ?o }").unwrap_err();
        parse_query("SELECT ?x WHERE { ?x ?p }").unwrap_err();
        parse_query("ASK { ?x ?p ?o }").unwrap_err();
    }

    #[test]
    fn rejects_invalid_namespace_iri() {
        parse_query("PREFIX ex: <not an iri> SELECT ?x WHERE { ?x ?p ?o }").unwrap_err();
        parse_query("PREFIX ex: <relative/iri> SELECT ?x WHERE { ?x ?p ?o }").unwrap_err();
    }
}
