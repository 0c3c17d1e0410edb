//! Depth-first traversal over selector ASTs.

use crate::node::{Selector, SelectorNode};

/// Walks every node of every selector in `list`, in source order.
///
/// The visitor returns whether to descend into the node's nested selector
/// list (when it carries one); comment slots are not traversed.
pub fn walk(list: &[Selector], visit: &mut impl FnMut(&SelectorNode) -> bool) {
    for selector in list {
        for node in &selector.nodes {
            walk_node(node, visit);
        }
    }
}

fn walk_node(node: &SelectorNode, visit: &mut impl FnMut(&SelectorNode) -> bool) {
    if !visit(node) {
        return;
    }
    if let Some(nested) = node.nested_nodes() {
        walk(nested, visit);
    }
}
