//! Hygienic deep copy of IR subtrees for call-site inlining.
//!
//! Inlining a function body duplicates it into the caller. Every declaration
//! inside the body (local classes, local functions, constructors, variables,
//! value parameters) must get a fresh symbol with a fresh name, and every
//! reference inside the copy must follow. References to declarations outside
//! the body keep pointing at the originals.
//!
//! This crate provides:
//!
//! - **Symbol model** ([`SymbolTable`], [`ClassId`], [`FunctionId`], ...):
//!   per-kind append-only arenas. A symbol's identity is its typed index.
//!
//! - **IR tree** ([`Node`]): a closed set of declarations, references and
//!   structural nodes.
//!
//! - **Deep copier** ([`DeepCopier`]): collects every declaration of a
//!   subtree into a [`SymbolMap`], then rebuilds the tree against it,
//!   optionally substituting types through a [`TypeSubstitutor`].
//!
//! - **Hygienic names** ([`NameCounter`], [`NameGenerator`]): copied
//!   declarations are named `<target>_<inlined>_<original>_<n>` with a
//!   counter that never repeats within a process.
//!
//! - **Diagnostics** ([`validate_copy`], [`dump_node`]): checks that a copy
//!   no longer mentions copied originals, and renders trees as text.
//!
//! # Crate Dependencies
//!
//! `ori_inline` depends on `ori_ir` (for `Name`, `StringInterner`, `Span`)
//! and `ori_types` (for `Pool`, `Idx` and substitution).
//!
//! [`TypeSubstitutor`]: ori_types::TypeSubstitutor

mod collect;
mod config;
mod copy;
mod error;
pub mod ir;
mod names;
mod rewrite;
mod stack;
mod subst;
mod symbol_map;
mod validate;

#[cfg(test)]
mod test_helpers;

use std::sync::Once;

pub use config::{CopyConfig, SupertypePolicy};
pub use copy::{CopyOutput, DeepCopier};
pub use error::CopyError;
pub use ir::{
    dump_node, CallableId, ClassId, ConstructorId, FunctionId, Node, SymbolRef, SymbolTable,
    TypeParamId, ValueId, ValueParamId, VariableId,
};
pub use names::{NameCounter, NameGenerator};
pub use subst::SubstitutionAdapter;
pub use symbol_map::{MappedSymbol, SymbolMap};
pub use validate::validate_copy;

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber driven by `RUST_LOG`.
///
/// Does nothing when `RUST_LOG` is unset, and nothing on the second and
/// later calls. Use `RUST_LOG=ori_inline=trace` to see every minted symbol.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            // Another subscriber may already be installed by the host.
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init();
        }
    });
}
