use crate::error::BuildError;
use crate::render::render_tree;
use sparweld_model::{
    BasicGraphPattern, GroupGraphPattern, OptionalGraphPattern, Pattern, QueryTree,
    Triple,
};
use sparweld_parser::parse_query;
use std::collections::{HashMap, HashSet};
use tracing::warn;

/// Options for [`QueryBuilder::add_triple`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TripleOptions {
    /// Adds a DISTINCT modifier to the generated fragment text.
    pub distinct: bool,
}

/// Incrementally assembles one SELECT query by merging parsed fragments
/// into an owned syntax tree.
///
/// The builder starts out without a tree; a single successful
/// [`parse`](Self::parse) stores one and later calls become no-ops. Every
/// add operation goes through the parser first, so a rejected fragment
/// never leaves the tree half-merged.
///
/// ```
/// use sparweld::{QueryBuilder, TripleOptions};
///
/// let mut builder = QueryBuilder::new(Some("PREFIX ex: <http://example.com/>"));
/// builder.parse("SELECT ?x WHERE { ?x ex:p ?y }")?;
/// builder.add_triple("?x", "ex:q", "?z", &TripleOptions::default())?;
/// let text = builder.render()?;
/// assert!(text.starts_with("PREFIX ex: <http://example.com/> SELECT ?x ?z"));
/// # Ok::<_, sparweld::BuildError>(())
/// ```
#[derive(Debug, Default)]
pub struct QueryBuilder {
    prefix_block: String,
    tree: Option<QueryTree>,
    projected: HashSet<String>,
    prefix_table: HashMap<String, String>,
}

impl QueryBuilder {
    /// Creates a builder, optionally with a block of PREFIX declarations
    /// that is prepended to the text given to [`parse`](Self::parse).
    pub fn new(prefix_block: Option<&str>) -> Self {
        Self {
            prefix_block: prefix_block.unwrap_or_default().to_owned(),
            ..Self::default()
        }
    }

    /// Parses the initial query and stores its tree.
    ///
    /// Only the first successful call does anything. Repeated calls keep
    /// the accumulated tree intact and emit a warning instead of failing,
    /// so a stray re-initialization cannot discard state.
    pub fn parse(&mut self, query: &str) -> Result<&mut Self, BuildError> {
        if self.tree.is_some() {
            warn!("parse called more than once; keeping the existing tree");
            return Ok(self);
        }
        if self.prefix_block.is_empty() {
            warn!("no prefix block provided");
        }
        let tree = parse_query(&format!("{}\n{}", self.prefix_block, query))?;
        if tree.units.len() != 1 {
            return Err(BuildError::MultipleUnits);
        }
        for term in &tree.units[0].projection {
            if let Some(variable) = term.as_variable() {
                self.projected.insert(variable.name.clone());
            }
        }
        for decl in &tree.prologue.prefixes {
            self.prefix_table
                .entry(decl.label.clone())
                .or_insert_with(|| decl.namespace.clone());
        }
        self.tree = Some(tree);
        Ok(self)
    }

    /// Merges a required triple into the owned tree.
    ///
    /// The triple is appended to every basic graph pattern (searching union
    /// branches first, then nested groups and flat patterns) whose leading
    /// triple shares its subject. A triple whose subject matches nothing is
    /// dropped with a warning; projection and prefix bookkeeping still run,
    /// matching the behavior of merges that do attach.
    pub fn add_triple(
        &mut self,
        subject: &str,
        predicate: &str,
        object: &str,
        options: &TripleOptions,
    ) -> Result<&mut Self, BuildError> {
        let fragment =
            self.parse_fragment(&fragment_text(subject, predicate, object, options.distinct))?;
        let triples = single_basic_pattern(&fragment)?.triples.clone();
        let tree = self.tree.as_mut().ok_or(BuildError::NotParsed)?;
        if !merge_required(&mut tree.units[0].pattern, &triples) {
            if let Some(triple) = triples.first() {
                warn!(subject = %triple.subject, "no attachment point found; dropping triple");
            }
        }
        self.absorb_fragment(&fragment);
        Ok(self)
    }

    /// Appends an optional triple as a new `OPTIONAL { … }` sub-pattern of
    /// the root group. No subject matching is attempted.
    pub fn add_optional_triple(
        &mut self,
        subject: &str,
        predicate: &str,
        object: &str,
    ) -> Result<&mut Self, BuildError> {
        let fragment = self.parse_fragment(&fragment_text(subject, predicate, object, false))?;
        let basic = single_basic_pattern(&fragment)?.clone();
        let tree = self.tree.as_mut().ok_or(BuildError::NotParsed)?;
        tree.units[0]
            .pattern
            .patterns
            .push(Pattern::Optional(OptionalGraphPattern {
                inner: GroupGraphPattern {
                    patterns: vec![Pattern::Basic(basic)],
                },
            }));
        self.absorb_fragment(&fragment);
        Ok(self)
    }

    /// Renders the owned tree back into query text.
    pub fn render(&self) -> Result<String, BuildError> {
        let tree = self.tree.as_ref().ok_or(BuildError::NotParsed)?;
        render_tree(tree, &self.prefix_table)
    }

    /// The owned tree, if [`parse`](Self::parse) has succeeded.
    pub fn tree(&self) -> Option<&QueryTree> {
        self.tree.as_ref()
    }

    /// Parses a generated fragment. Runs before any mutation so a parse
    /// failure leaves the owned tree untouched.
    fn parse_fragment(&self, text: &str) -> Result<QueryTree, BuildError> {
        let Some(tree) = self.tree.as_ref() else {
            return Err(BuildError::NotParsed);
        };
        if tree.units.len() != 1 {
            return Err(BuildError::MultipleUnits);
        }
        let fragment = parse_query(text)?;
        if fragment.units.len() != 1 {
            return Err(BuildError::MultipleUnits);
        }
        Ok(fragment)
    }

    /// Extends the projection and the prefix table from a fragment.
    /// Variables keep their first-occurrence order; prefix labels keep
    /// their first binding.
    fn absorb_fragment(&mut self, fragment: &QueryTree) {
        let Some(tree) = self.tree.as_mut() else {
            return;
        };
        let unit = &mut tree.units[0];
        for term in &fragment.units[0].projection {
            if let Some(variable) = term.as_variable() {
                if self.projected.insert(variable.name.clone()) {
                    unit.projection.push(term.clone());
                }
            }
        }
        for decl in &fragment.prologue.prefixes {
            self.prefix_table
                .entry(decl.label.clone())
                .or_insert_with(|| decl.namespace.clone());
        }
    }
}

/// Builds the standalone `SELECT <vars> WHERE { s p o }` text for one
/// triple. Vars are the `?`-prefixed arguments in left-to-right order,
/// deduplicated by first occurrence.
fn fragment_text(subject: &str, predicate: &str, object: &str, distinct: bool) -> String {
    let mut vars: Vec<&str> = Vec::new();
    for part in [subject, predicate, object] {
        if part.starts_with('?') && !vars.contains(&part) {
            vars.push(part);
        }
    }
    format!(
        "SELECT {}{} WHERE {{ {subject} {predicate} {object} }}",
        if distinct { "DISTINCT " } else { "" },
        vars.join(" "),
    )
}

fn single_basic_pattern(fragment: &QueryTree) -> Result<&BasicGraphPattern, BuildError> {
    match fragment.units[0].pattern.patterns.first() {
        Some(Pattern::Basic(basic)) => Ok(basic),
        _ => Err(BuildError::MalformedFragment),
    }
}

/// Decision procedure for attaching required triples, one arm per pattern
/// kind. Unions get the first chance: every branch whose leading subject
/// matches receives the triples. Only when no union accepted them are
/// nested groups and flat basic patterns considered.
fn merge_required(root: &mut GroupGraphPattern, triples: &[Triple]) -> bool {
    let mut accepted = false;
    for pattern in &mut root.patterns {
        if let Pattern::Union(union) = pattern {
            for branch in &mut union.branches {
                if merge_into_group(branch, triples) {
                    accepted = true;
                }
            }
        }
    }
    if accepted {
        return true;
    }
    for pattern in &mut root.patterns {
        match pattern {
            Pattern::Group(group) => {
                if merge_into_group(group, triples) {
                    accepted = true;
                }
            }
            Pattern::Basic(basic) => {
                if append_by_subject(basic, triples) {
                    accepted = true;
                }
            }
            Pattern::Union(_) | Pattern::Optional(_) => {}
        }
    }
    accepted
}

fn merge_into_group(group: &mut GroupGraphPattern, triples: &[Triple]) -> bool {
    let mut accepted = false;
    for pattern in &mut group.patterns {
        match pattern {
            Pattern::Basic(basic) => {
                if append_by_subject(basic, triples) {
                    accepted = true;
                }
            }
            Pattern::Group(inner) => {
                if merge_into_group(inner, triples) {
                    accepted = true;
                }
            }
            Pattern::Union(_) | Pattern::Optional(_) => {}
        }
    }
    accepted
}

fn append_by_subject(basic: &mut BasicGraphPattern, triples: &[Triple]) -> bool {
    let matches = match (basic.leading_subject(), triples.first()) {
        (Some(existing), Some(new)) => *existing == new.subject,
        _ => false,
    };
    if matches {
        basic.triples.extend_from_slice(triples);
    }
    matches
}
