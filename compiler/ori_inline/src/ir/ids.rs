//! Typed symbol handles.
//!
//! Every symbol kind has its own index newtype, so a reference to a variable
//! can never be confused with a reference to a class. Cross-kind references
//! use the closed enums at the bottom of this file.

use std::fmt;

macro_rules! define_symbol_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Create an ID from a raw index.
            #[inline]
            pub fn new(raw: u32) -> Self {
                Self(raw)
            }

            /// Get the raw `u32` value.
            #[inline]
            pub fn raw(self) -> u32 {
                self.0
            }

            /// Get the index as `usize` (for indexing into the symbol arena).
            #[inline]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($label, "#{}"), self.0)
            }
        }
    };
}

define_symbol_id!(
    /// A class (or interface, object, enum) symbol.
    ClassId,
    "class"
);
define_symbol_id!(
    /// An ordinary function symbol, including function-type `invoke` operators.
    FunctionId,
    "fun"
);
define_symbol_id!(
    /// A class constructor symbol.
    ConstructorId,
    "constructor"
);
define_symbol_id!(
    /// A local variable symbol.
    VariableId,
    "var"
);
define_symbol_id!(
    /// A value parameter of a function or constructor.
    ValueParamId,
    "param"
);
define_symbol_id!(
    /// A type parameter of a class or function.
    TypeParamId,
    "type-param"
);

/// Something that can be called: the target of calls, callable references,
/// and returns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallableId {
    Function(FunctionId),
    Constructor(ConstructorId),
}

impl From<FunctionId> for CallableId {
    fn from(id: FunctionId) -> Self {
        CallableId::Function(id)
    }
}

impl From<ConstructorId> for CallableId {
    fn from(id: ConstructorId) -> Self {
        CallableId::Constructor(id)
    }
}

/// Something that holds a value: the target of reads.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueId {
    Variable(VariableId),
    Param(ValueParamId),
}

impl From<VariableId> for ValueId {
    fn from(id: VariableId) -> Self {
        ValueId::Variable(id)
    }
}

impl From<ValueParamId> for ValueId {
    fn from(id: ValueParamId) -> Self {
        ValueId::Param(id)
    }
}

/// The declaration that contains another declaration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Owner {
    /// Top level of the module.
    Module,
    Function(FunctionId),
    Class(ClassId),
    Constructor(ConstructorId),
}

/// A reference to a symbol of any kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SymbolRef {
    Class(ClassId),
    Function(FunctionId),
    Constructor(ConstructorId),
    Variable(VariableId),
    ValueParam(ValueParamId),
    TypeParam(TypeParamId),
}

impl fmt::Display for SymbolRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymbolRef::Class(id) => id.fmt(f),
            SymbolRef::Function(id) => id.fmt(f),
            SymbolRef::Constructor(id) => id.fmt(f),
            SymbolRef::Variable(id) => id.fmt(f),
            SymbolRef::ValueParam(id) => id.fmt(f),
            SymbolRef::TypeParam(id) => id.fmt(f),
        }
    }
}

macro_rules! impl_into_symbol_ref {
    ($($id:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$id> for SymbolRef {
                fn from(id: $id) -> Self {
                    SymbolRef::$variant(id)
                }
            }
        )*
    };
}

impl_into_symbol_ref!(
    ClassId => Class,
    FunctionId => Function,
    ConstructorId => Constructor,
    VariableId => Variable,
    ValueParamId => ValueParam,
    TypeParamId => TypeParam,
);

impl From<CallableId> for SymbolRef {
    fn from(id: CallableId) -> Self {
        match id {
            CallableId::Function(f) => SymbolRef::Function(f),
            CallableId::Constructor(c) => SymbolRef::Constructor(c),
        }
    }
}

impl From<ValueId> for SymbolRef {
    fn from(id: ValueId) -> Self {
        match id {
            ValueId::Variable(v) => SymbolRef::Variable(v),
            ValueId::Param(p) => SymbolRef::ValueParam(p),
        }
    }
}
