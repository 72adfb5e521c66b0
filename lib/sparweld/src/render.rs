use crate::error::BuildError;
use crate::visit::{walk, Descend, WalkOptions};
use sparweld_model::{NodeRef, QueryForm, QueryTree, Term, Uri};
use std::collections::{HashMap, HashSet};

struct UnionState {
    branches: usize,
}

/// Mutable accumulator threaded through the render walk. Union tracking is
/// a stack so a union nested inside a branch cannot clobber the outer
/// union's branch count.
struct RenderContext<'a> {
    prefix_table: &'a HashMap<String, String>,
    tokens: Vec<String>,
    declarations: Vec<String>,
    used_prefixes: HashSet<String>,
    union: Vec<UnionState>,
}

/// Renders a tree back into query text: prefix declarations in first-use
/// order, then `SELECT [modifier] ?vars WHERE { body }`, all space-joined.
pub(crate) fn render_tree(
    tree: &QueryTree,
    prefix_table: &HashMap<String, String>,
) -> Result<String, BuildError> {
    let [unit] = tree.units.as_slice() else {
        return Err(BuildError::MultipleUnits);
    };
    if unit.form != QueryForm::Select {
        return Err(BuildError::UnsupportedQueryForm(unit.form));
    }

    let mut header = vec!["SELECT".to_owned()];
    if let Some(modifier) = unit.modifier {
        header.push(modifier.to_string());
    }
    for term in &unit.projection {
        match term {
            Term::Variable(variable) => header.push(variable.to_string()),
            Term::Uri(_) | Term::Literal(_) => {
                return Err(BuildError::UnsupportedProjection);
            }
        }
    }
    header.push("WHERE".to_owned());
    header.push("{".to_owned());

    let mut ctx = RenderContext {
        prefix_table,
        tokens: Vec::new(),
        declarations: Vec::new(),
        used_prefixes: HashSet::new(),
        union: Vec::new(),
    };
    let mut pre = emit_enter;
    let mut post = emit_leave;
    for pattern in &unit.pattern.patterns {
        walk(
            NodeRef::from(pattern),
            &mut ctx,
            WalkOptions::default(),
            &mut pre,
            &mut post,
        );
    }

    let mut out = ctx.declarations;
    out.extend(header);
    out.extend(ctx.tokens);
    out.push("}".to_owned());
    Ok(out.join(" "))
}

fn emit_enter<'t>(
    ctx: &mut RenderContext<'_>,
    node: NodeRef<'t>,
    parent: Option<NodeRef<'t>>,
    _ancestors: &[NodeRef<'t>],
) -> Descend {
    match node {
        NodeRef::Optional(_) => ctx.tokens.push("OPTIONAL".to_owned()),
        NodeRef::Union(_) => ctx.union.push(UnionState { branches: 0 }),
        NodeRef::Group(_) => {
            if let (Some(state), Some(NodeRef::Union(_))) = (ctx.union.last_mut(), parent) {
                state.branches += 1;
            }
            ctx.tokens.push("{".to_owned());
        }
        NodeRef::Variable(variable) => ctx.tokens.push(variable.to_string()),
        NodeRef::Uri(uri) => {
            if let Uri::Prefixed { prefix, .. } = uri {
                if ctx.used_prefixes.insert(prefix.clone()) {
                    // Only labels with a known namespace get a declaration.
                    if let Some(namespace) = ctx.prefix_table.get(prefix) {
                        ctx.declarations
                            .push(format!("PREFIX {prefix}: <{namespace}>"));
                    }
                }
            }
            ctx.tokens.push(uri.to_string());
        }
        NodeRef::Literal(literal) => ctx.tokens.push(literal.to_string()),
        NodeRef::Tree(_)
        | NodeRef::Unit(_)
        | NodeRef::Basic(_)
        | NodeRef::Triple(_)
        | NodeRef::Prefix(_) => {}
    }
    Descend::Children
}

fn emit_leave<'t>(
    ctx: &mut RenderContext<'_>,
    node: NodeRef<'t>,
    parent: Option<NodeRef<'t>>,
    _ancestors: &[NodeRef<'t>],
) {
    match node {
        NodeRef::Triple(_) => ctx.tokens.push(".".to_owned()),
        NodeRef::Group(_) => {
            ctx.tokens.push("}".to_owned());
            if !ctx.union.is_empty() && matches!(parent, Some(NodeRef::Union(_))) {
                ctx.tokens.push("UNION".to_owned());
            }
        }
        NodeRef::Union(_) => {
            if let Some(state) = ctx.union.pop() {
                // An even branch count leaves a dangling trailing separator.
                if state.branches % 2 == 0 {
                    ctx.tokens.pop();
                }
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sparweld_model::{GroupGraphPattern, Prologue, Unit, Variable};

    fn single_unit_tree(form: QueryForm, projection: Vec<Term>) -> QueryTree {
        QueryTree {
            prologue: Prologue::default(),
            units: vec![Unit {
                form,
                modifier: None,
                projection,
                pattern: GroupGraphPattern::default(),
            }],
        }
    }

    #[test]
    fn rejects_non_select_form() {
        let tree = single_unit_tree(
            QueryForm::Ask,
            vec![Term::Variable(Variable::new("x"))],
        );
        assert!(matches!(
            render_tree(&tree, &HashMap::new()),
            Err(BuildError::UnsupportedQueryForm(QueryForm::Ask))
        ));
    }

    #[test]
    fn rejects_non_variable_projection() {
        let tree = single_unit_tree(
            QueryForm::Select,
            vec![
                Term::Variable(Variable::new("x")),
                Term::Uri(Uri::Full("http://ex/p".into())),
            ],
        );
        assert!(matches!(
            render_tree(&tree, &HashMap::new()),
            Err(BuildError::UnsupportedProjection)
        ));
    }

    #[test]
    fn rejects_multiple_units() {
        let mut tree = single_unit_tree(
            QueryForm::Select,
            vec![Term::Variable(Variable::new("x"))],
        );
        tree.units.push(tree.units[0].clone());
        assert!(matches!(
            render_tree(&tree, &HashMap::new()),
            Err(BuildError::MultipleUnits)
        ));
    }
}
