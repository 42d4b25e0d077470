//! The deep-copy entry point.
//!
//! A copy runs in two passes over the children of the root:
//!
//! 1. **Collect** ([`crate::collect`]): mint a fresh symbol for every
//!    declaration in the subtree and record original → copy in a
//!    [`SymbolMap`].
//! 2. **Rewrite** ([`crate::rewrite`]): rebuild the tree bottom-up, pointing
//!    every reference to a copied symbol at its copy and substituting the
//!    types carried by the rebuilt nodes.
//!
//! References to symbols declared outside the subtree are left alone. The
//! input tree and every pre-existing symbol are never modified.

use ori_ir::StringInterner;
use ori_types::{Pool, TypeSubstitutor};
use tracing::debug;

use crate::collect::collect_children;
use crate::config::CopyConfig;
use crate::error::CopyError;
use crate::ir::{FunctionId, Node, SymbolTable};
use crate::names::{NameCounter, NameGenerator};
use crate::rewrite::rewrite_children;
use crate::subst::SubstitutionAdapter;
use crate::symbol_map::SymbolMap;
use crate::validate::validate_copy;

/// State shared by the collect and rewrite passes of one copy.
pub(crate) struct CopySession<'a> {
    pub(crate) symbols: &'a mut SymbolTable,
    pub(crate) types: SubstitutionAdapter<'a>,
    pub(crate) names: NameGenerator<'a>,
    pub(crate) map: SymbolMap,
    /// The function the copied declarations will live in.
    pub(crate) target: FunctionId,
    pub(crate) config: &'a CopyConfig,
}

/// Result of a successful copy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CopyOutput {
    /// The copied tree. Its root node keeps the fields of the input root.
    pub root: Node,
    /// Every symbol that was copied, original → copy.
    pub symbols: SymbolMap,
}

/// Copies IR subtrees into a target function with fresh symbols.
///
/// ```text
/// let copier = DeepCopier::new(caller, NameCounter::global(), &interner)
///     .with_substitutor(&type_args);
/// let out = copier.copy(&mut symbols, &mut pool, &body, "map")?;
/// ```
pub struct DeepCopier<'c> {
    target: FunctionId,
    substitutor: Option<&'c dyn TypeSubstitutor>,
    counter: &'c NameCounter,
    interner: &'c StringInterner,
    config: CopyConfig,
}

impl<'c> DeepCopier<'c> {
    pub fn new(target: FunctionId, counter: &'c NameCounter, interner: &'c StringInterner) -> Self {
        Self {
            target,
            substitutor: None,
            counter,
            interner,
            config: CopyConfig::default(),
        }
    }

    /// Substitute types of the copied declarations and rebuilt nodes.
    #[must_use]
    pub fn with_substitutor(mut self, substitutor: &'c dyn TypeSubstitutor) -> Self {
        self.substitutor = Some(substitutor);
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: CopyConfig) -> Self {
        self.config = config;
        self
    }

    pub fn target(&self) -> FunctionId {
        self.target
    }

    pub fn config(&self) -> &CopyConfig {
        &self.config
    }

    /// Copy `root` for placement in the target function.
    ///
    /// `inlined_function` labels the generated names. The root node itself
    /// is not copied: its fields are kept and only its children are
    /// rewritten.
    ///
    /// On error nothing reachable changes. Symbols minted before the failure
    /// stay in the append-only table but nothing refers to them.
    #[tracing::instrument(level = "debug", skip_all, fields(inlined = inlined_function))]
    pub fn copy(
        &self,
        symbols: &mut SymbolTable,
        pool: &mut Pool,
        root: &Node,
        inlined_function: &str,
    ) -> Result<CopyOutput, CopyError> {
        let target_name = self.interner.lookup(symbols.function(self.target).name);
        let mut session = CopySession {
            symbols,
            types: SubstitutionAdapter::new(self.substitutor, pool),
            names: NameGenerator::new(target_name, inlined_function, self.counter, self.interner),
            map: SymbolMap::new(),
            target: self.target,
            config: &self.config,
        };

        collect_children(&mut session, root)?;
        debug!(
            caller = target_name,
            collected = session.map.len(),
            "collected declarations"
        );

        let new_root = rewrite_children(&mut session, root)?;
        let map = session.map;

        if self.config.validate_output {
            validate_copy(&new_root, &map)?;
        }

        Ok(CopyOutput {
            root: new_root,
            symbols: map,
        })
    }

    /// Like [`copy`](Self::copy), but replaces `root` with the copy.
    ///
    /// `root` is left untouched if the copy fails.
    pub fn copy_in_place(
        &self,
        symbols: &mut SymbolTable,
        pool: &mut Pool,
        root: &mut Node,
        inlined_function: &str,
    ) -> Result<SymbolMap, CopyError> {
        let output = self.copy(symbols, pool, root, inlined_function)?;
        *root = output.root;
        Ok(output.symbols)
    }
}
