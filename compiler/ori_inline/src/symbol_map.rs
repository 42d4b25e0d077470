//! Original → copy correspondence for one copy session.
//!
//! One map per symbol kind, so a class can only map to a class and a
//! parameter only to a parameter. An original symbol is a key at most once.
//! Looking up a symbol that was not copied is not an error: it means the
//! reference points outside the copied subtree and stays as it is.

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::error::CopyError;
use crate::ir::{
    CallableId, ClassId, ConstructorId, FunctionId, SymbolRef, ValueId, ValueParamId, VariableId,
};

mod sealed {
    pub trait Sealed {}
}

/// A symbol kind that the copier duplicates.
pub trait MappedSymbol: sealed::Sealed + Copy + Eq + Hash + Into<SymbolRef> {
    #[doc(hidden)]
    fn slot(map: &SymbolMap) -> &FxHashMap<Self, Self>;
    #[doc(hidden)]
    fn slot_mut(map: &mut SymbolMap) -> &mut FxHashMap<Self, Self>;
}

macro_rules! mapped_symbol {
    ($($id:ident => $field:ident),* $(,)?) => {
        $(
            impl sealed::Sealed for $id {}

            impl MappedSymbol for $id {
                #[inline]
                fn slot(map: &SymbolMap) -> &FxHashMap<Self, Self> {
                    &map.$field
                }

                #[inline]
                fn slot_mut(map: &mut SymbolMap) -> &mut FxHashMap<Self, Self> {
                    &mut map.$field
                }
            }
        )*
    };
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SymbolMap {
    classes: FxHashMap<ClassId, ClassId>,
    functions: FxHashMap<FunctionId, FunctionId>,
    constructors: FxHashMap<ConstructorId, ConstructorId>,
    variables: FxHashMap<VariableId, VariableId>,
    value_params: FxHashMap<ValueParamId, ValueParamId>,
}

mapped_symbol!(
    ClassId => classes,
    FunctionId => functions,
    ConstructorId => constructors,
    VariableId => variables,
    ValueParamId => value_params,
);

impl SymbolMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// The copy of `original`, if it was copied.
    #[inline]
    pub fn get<S: MappedSymbol>(&self, original: S) -> Option<S> {
        S::slot(self).get(&original).copied()
    }

    /// The copy of `original`, or `original` itself if it was not copied.
    #[inline]
    pub fn get_or_same<S: MappedSymbol>(&self, original: S) -> S {
        self.get(original).unwrap_or(original)
    }

    pub fn contains<S: MappedSymbol>(&self, original: S) -> bool {
        S::slot(self).contains_key(&original)
    }

    /// Record that `original` was copied as `copy`.
    pub(crate) fn insert<S: MappedSymbol>(
        &mut self,
        original: S,
        copy: S,
    ) -> Result<(), CopyError> {
        let slot = S::slot_mut(self);
        if slot.contains_key(&original) {
            return Err(CopyError::DuplicateDeclaration {
                symbol: original.into(),
            });
        }
        slot.insert(original, copy);
        Ok(())
    }

    pub fn callable(&self, original: CallableId) -> Option<CallableId> {
        match original {
            CallableId::Function(id) => self.get(id).map(CallableId::Function),
            CallableId::Constructor(id) => self.get(id).map(CallableId::Constructor),
        }
    }

    pub fn value(&self, original: ValueId) -> Option<ValueId> {
        match original {
            ValueId::Variable(id) => self.get(id).map(ValueId::Variable),
            ValueId::Param(id) => self.get(id).map(ValueId::Param),
        }
    }

    /// Returns `true` if `symbol` is an original that was copied.
    ///
    /// Type parameters are never copied.
    pub fn is_copied_original(&self, symbol: SymbolRef) -> bool {
        match symbol {
            SymbolRef::Class(id) => self.contains(id),
            SymbolRef::Function(id) => self.contains(id),
            SymbolRef::Constructor(id) => self.contains(id),
            SymbolRef::Variable(id) => self.contains(id),
            SymbolRef::ValueParam(id) => self.contains(id),
            SymbolRef::TypeParam(_) => false,
        }
    }

    /// Every (original, copy) pair, sorted by kind and original id.
    pub fn entries(&self) -> Vec<(SymbolRef, SymbolRef)> {
        fn sorted<S: MappedSymbol + Ord>(map: &FxHashMap<S, S>) -> Vec<(SymbolRef, SymbolRef)> {
            let mut pairs: Vec<_> = map.iter().map(|(&k, &v)| (k, v)).collect();
            pairs.sort_unstable();
            pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect()
        }
        let mut out = sorted(&self.classes);
        out.extend(sorted(&self.functions));
        out.extend(sorted(&self.constructors));
        out.extend(sorted(&self.variables));
        out.extend(sorted(&self.value_params));
        out
    }

    /// Number of copied symbols of all kinds.
    pub fn len(&self) -> usize {
        self.classes.len()
            + self.functions.len()
            + self.constructors.len()
            + self.variables.len()
            + self.value_params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests;
