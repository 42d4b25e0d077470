//! Read-only traversal.

use super::Node;
use crate::stack::ensure_sufficient_stack;

/// A read-only IR visitor.
///
/// The default `visit_node` descends into every child; override it and call
/// [`walk_node`] to keep descending after handling a node.
pub trait Visitor<'ir> {
    fn visit_node(&mut self, node: &'ir Node) {
        walk_node(self, node);
    }
}

/// Visit every direct child of `node`.
pub fn walk_node<'ir, V: Visitor<'ir> + ?Sized>(visitor: &mut V, node: &'ir Node) {
    for child in node.children() {
        ensure_sufficient_stack(|| visitor.visit_node(child));
    }
}
