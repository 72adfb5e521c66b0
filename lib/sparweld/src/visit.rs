//! Depth-first traversal over [`NodeRef`] graphs.
//!
//! Nodes expose no parent or sibling links; children come from
//! [`NodeRef::children`]. Callbacks receive the current node, its immediate
//! parent and, when [`WalkOptions::track_ancestors`] is set, the chain of
//! ancestors from the root down to the parent. All callback state lives in
//! an explicit context value threaded through the walk.

use sparweld_model::NodeRef;

/// Returned by the pre-visit callback to control descent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Descend {
    /// Visit the node's children, then its post-visit callback.
    Children,
    /// Skip the children. The node's post-visit callback is skipped too.
    Skip,
}

/// Traversal configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct WalkOptions {
    /// When set, callbacks receive the root-to-parent ancestor chain;
    /// otherwise they receive an empty slice.
    pub track_ancestors: bool,
}

/// Walks `root` depth-first, calling `pre` before a node's children and
/// `post` after them.
pub fn walk<'t, C, Pre, Post>(
    root: NodeRef<'t>,
    ctx: &mut C,
    options: WalkOptions,
    pre: &mut Pre,
    post: &mut Post,
) where
    Pre: FnMut(&mut C, NodeRef<'t>, Option<NodeRef<'t>>, &[NodeRef<'t>]) -> Descend,
    Post: FnMut(&mut C, NodeRef<'t>, Option<NodeRef<'t>>, &[NodeRef<'t>]),
{
    let mut ancestors = Vec::new();
    walk_inner(root, None, ctx, options, pre, post, &mut ancestors);
}

fn walk_inner<'t, C, Pre, Post>(
    node: NodeRef<'t>,
    parent: Option<NodeRef<'t>>,
    ctx: &mut C,
    options: WalkOptions,
    pre: &mut Pre,
    post: &mut Post,
    ancestors: &mut Vec<NodeRef<'t>>,
) where
    Pre: FnMut(&mut C, NodeRef<'t>, Option<NodeRef<'t>>, &[NodeRef<'t>]) -> Descend,
    Post: FnMut(&mut C, NodeRef<'t>, Option<NodeRef<'t>>, &[NodeRef<'t>]),
{
    if pre(ctx, node, parent, ancestors.as_slice()) == Descend::Skip {
        return;
    }
    if options.track_ancestors {
        ancestors.push(node);
    }
    for child in node.children() {
        walk_inner(child, Some(node), ctx, options, pre, post, ancestors);
    }
    if options.track_ancestors {
        ancestors.pop();
    }
    post(ctx, node, parent, ancestors.as_slice());
}
