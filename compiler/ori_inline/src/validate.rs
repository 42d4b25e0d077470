//! Post-copy validation.

use crate::error::CopyError;
use crate::ir::{walk_node, Node, SymbolRef, Visitor};
use crate::symbol_map::SymbolMap;

/// Check that a copied tree no longer mentions any original symbol that was
/// copied, either as a declaration or as a reference.
///
/// Returns the first offending symbol in evaluation order.
pub fn validate_copy(root: &Node, map: &SymbolMap) -> Result<(), CopyError> {
    let mut checker = DanglingChecker {
        map,
        first: None,
    };
    // The root keeps its own symbol; only descendants are checked.
    walk_node(&mut checker, root);
    match checker.first {
        Some(symbol) => Err(CopyError::DanglingReference { symbol }),
        None => Ok(()),
    }
}

struct DanglingChecker<'m> {
    map: &'m SymbolMap,
    first: Option<SymbolRef>,
}

impl<'ir> Visitor<'ir> for DanglingChecker<'_> {
    fn visit_node(&mut self, node: &'ir Node) {
        if self.first.is_some() {
            return;
        }
        let dangling = node
            .declared_symbol()
            .into_iter()
            .chain(node.referenced_symbols())
            .find(|&symbol| self.map.is_copied_original(symbol));
        if let Some(symbol) = dangling {
            tracing::debug!(%symbol, "dangling reference after copy");
            self.first = Some(symbol);
            return;
        }
        walk_node(self, node);
    }
}
