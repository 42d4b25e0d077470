//! Symbol records and the table that owns them.
//!
//! A symbol describes one declaration. Symbols are stored in per-kind
//! append-only arenas inside [`SymbolTable`]; the typed index returned when a
//! symbol is added is its identity. Two nodes that refer to the same
//! declaration hold the same id, never merely an equal record.

use bitflags::bitflags;
use ori_ir::Name;
use ori_types::Idx;
use smallvec::SmallVec;

use super::{
    CallableId, ClassId, ConstructorId, FunctionId, Owner, SymbolRef, TypeParamId, ValueParamId,
    VariableId,
};

/// Inheritance modality of a class or member.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Modality {
    #[default]
    Final,
    Open,
    Abstract,
    Sealed,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    #[default]
    Public,
    Internal,
    Protected,
    Private,
    /// Declared inside a function body.
    Local,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum ClassKind {
    #[default]
    Class,
    Interface,
    Object,
    Enum,
    Annotation,
}

/// How a function symbol came to exist.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum FunctionKind {
    /// Written in source.
    #[default]
    Declared,
    /// Produced by a compiler pass (including deep copies).
    Synthesized,
    /// The `invoke` operator of a function type. Calling a value of type
    /// `(A) -> B` is a call to one of these.
    FunctionTypeInvoke,
}

bitflags! {
    /// Per-parameter flags.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
    pub struct ParamFlags: u8 {
        /// The parameter has a default value expression.
        const DECLARES_DEFAULT = 1 << 0;
        /// A lambda argument that may not return non-locally.
        const CROSSINLINE = 1 << 1;
        /// A lambda argument that must not be inlined.
        const NOINLINE = 1 << 2;
    }
}

/// Parameter lists are short; most callables take at most four.
pub type ParamList = SmallVec<[ValueParamId; 4]>;

pub type TypeParamList = SmallVec<[TypeParamId; 2]>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassSymbol {
    pub name: Name,
    pub owner: Owner,
    pub kind: ClassKind,
    pub modality: Modality,
    pub visibility: Visibility,
    pub supertypes: SmallVec<[Idx; 2]>,
    /// Declared outside the current compilation unit.
    pub is_external: bool,
    pub type_params: TypeParamList,
    pub constructors: SmallVec<[ConstructorId; 2]>,
    pub primary_constructor: Option<ConstructorId>,
}

impl ClassSymbol {
    /// A final, public class with no supertypes and no constructors yet.
    pub fn new(name: Name, owner: Owner, kind: ClassKind) -> Self {
        Self {
            name,
            owner,
            kind,
            modality: Modality::Final,
            visibility: Visibility::Public,
            supertypes: SmallVec::new(),
            is_external: false,
            type_params: SmallVec::new(),
            constructors: SmallVec::new(),
            primary_constructor: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionSymbol {
    pub name: Name,
    pub owner: Owner,
    pub kind: FunctionKind,
    pub type_params: TypeParamList,
    pub value_params: ParamList,
    pub return_type: Idx,
    pub extension_receiver: Option<Idx>,
    pub dispatch_receiver: Option<Idx>,
    pub modality: Modality,
    pub visibility: Visibility,
    pub is_tailrec: bool,
    pub is_inline: bool,
}

impl FunctionSymbol {
    /// A final, public, non-generic declared function without parameters.
    pub fn new(name: Name, owner: Owner, return_type: Idx) -> Self {
        Self {
            name,
            owner,
            kind: FunctionKind::Declared,
            type_params: SmallVec::new(),
            value_params: SmallVec::new(),
            return_type,
            extension_receiver: None,
            dispatch_receiver: None,
            modality: Modality::Final,
            visibility: Visibility::Public,
            is_tailrec: false,
            is_inline: false,
        }
    }

    #[inline]
    pub fn is_function_type_invoke(&self) -> bool {
        self.kind == FunctionKind::FunctionTypeInvoke
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConstructorSymbol {
    pub class: ClassId,
    pub is_primary: bool,
    pub type_params: TypeParamList,
    pub value_params: ParamList,
    pub return_type: Idx,
    pub dispatch_receiver: Option<Idx>,
    pub modality: Modality,
    pub visibility: Visibility,
}

impl ConstructorSymbol {
    pub fn new(class: ClassId, return_type: Idx, is_primary: bool) -> Self {
        Self {
            class,
            is_primary,
            type_params: SmallVec::new(),
            value_params: SmallVec::new(),
            return_type,
            dispatch_receiver: None,
            modality: Modality::Final,
            visibility: Visibility::Public,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VariableSymbol {
    pub name: Name,
    pub owner: Owner,
    pub ty: Idx,
    /// `true` for a mutable (`var`) binding.
    pub is_var: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValueParamSymbol {
    /// The callable this parameter belongs to.
    pub owner: CallableId,
    /// The parameter this one was derived from, or `None` if it is itself
    /// an original declaration.
    pub original: Option<ValueParamId>,
    /// Position in the owner's parameter list.
    pub index: u32,
    pub name: Name,
    pub ty: Idx,
    /// Element type when this is a `vararg` parameter.
    pub vararg_element: Option<Idx>,
    pub flags: ParamFlags,
}

impl ValueParamSymbol {
    /// The declaration this parameter ultimately comes from.
    #[inline]
    pub fn root(&self, this: ValueParamId) -> ValueParamId {
        self.original.unwrap_or(this)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeParamSymbol {
    pub name: Name,
    pub owner: Owner,
    pub index: u32,
    /// The pool type standing for this parameter.
    pub ty: Idx,
}

/// Arena lengths at one point in time. Any id at or past the recorded
/// length was allocated afterwards.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub struct Watermark {
    classes: usize,
    functions: usize,
    constructors: usize,
    variables: usize,
    value_params: usize,
    type_params: usize,
}

impl Watermark {
    /// Returns `true` if `symbol` was allocated after this watermark was taken.
    pub fn is_newer(&self, symbol: SymbolRef) -> bool {
        match symbol {
            SymbolRef::Class(id) => id.index() >= self.classes,
            SymbolRef::Function(id) => id.index() >= self.functions,
            SymbolRef::Constructor(id) => id.index() >= self.constructors,
            SymbolRef::Variable(id) => id.index() >= self.variables,
            SymbolRef::ValueParam(id) => id.index() >= self.value_params,
            SymbolRef::TypeParam(id) => id.index() >= self.type_params,
        }
    }
}

/// Owner of every symbol of a compilation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SymbolTable {
    classes: Vec<ClassSymbol>,
    functions: Vec<FunctionSymbol>,
    constructors: Vec<ConstructorSymbol>,
    variables: Vec<VariableSymbol>,
    value_params: Vec<ValueParamSymbol>,
    type_params: Vec<TypeParamSymbol>,
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "symbol counts are bounded far below u32::MAX"
)]
fn next_raw<T>(arena: &[T]) -> u32 {
    arena.len() as u32
}

macro_rules! arena_accessors {
    ($($field:ident: $id:ident => $sym:ident, $add:ident, $get:ident;)*) => {
        $(
            pub fn $add(&mut self, symbol: $sym) -> $id {
                let id = $id::new(next_raw(&self.$field));
                self.$field.push(symbol);
                id
            }

            /// # Panics
            /// Panics if the id was not allocated by this table.
            #[inline]
            pub fn $get(&self, id: $id) -> &$sym {
                &self.$field[id.index()]
            }
        )*
    };
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    arena_accessors! {
        classes: ClassId => ClassSymbol, add_class, class;
        functions: FunctionId => FunctionSymbol, add_function, function;
        constructors: ConstructorId => ConstructorSymbol, add_constructor, constructor;
        variables: VariableId => VariableSymbol, add_variable, variable;
        value_params: ValueParamId => ValueParamSymbol, add_value_param, value_param;
        type_params: TypeParamId => TypeParamSymbol, add_type_param, type_param;
    }

    // Mutable access exists only for completing symbols that are still
    // being built: freshly minted copies and test fixtures.

    pub(crate) fn class_mut(&mut self, id: ClassId) -> &mut ClassSymbol {
        &mut self.classes[id.index()]
    }

    pub(crate) fn function_mut(&mut self, id: FunctionId) -> &mut FunctionSymbol {
        &mut self.functions[id.index()]
    }

    pub(crate) fn constructor_mut(&mut self, id: ConstructorId) -> &mut ConstructorSymbol {
        &mut self.constructors[id.index()]
    }

    /// Add a parameter to a function, assigning its index and owner.
    pub fn push_function_param(
        &mut self,
        function: FunctionId,
        name: Name,
        ty: Idx,
        flags: ParamFlags,
    ) -> ValueParamId {
        let owner = CallableId::Function(function);
        let index = next_raw(&self.function(function).value_params);
        let id = self.add_value_param(ValueParamSymbol {
            owner,
            original: None,
            index,
            name,
            ty,
            vararg_element: None,
            flags,
        });
        self.function_mut(function).value_params.push(id);
        id
    }

    /// Add a parameter to a constructor, assigning its index and owner.
    pub fn push_constructor_param(
        &mut self,
        constructor: ConstructorId,
        name: Name,
        ty: Idx,
        flags: ParamFlags,
    ) -> ValueParamId {
        let owner = CallableId::Constructor(constructor);
        let index = next_raw(&self.constructor(constructor).value_params);
        let id = self.add_value_param(ValueParamSymbol {
            owner,
            original: None,
            index,
            name,
            ty,
            vararg_element: None,
            flags,
        });
        self.constructor_mut(constructor).value_params.push(id);
        id
    }

    /// Add a constructor and register it with its class.
    pub fn declare_constructor(&mut self, symbol: ConstructorSymbol) -> ConstructorId {
        let class = symbol.class;
        let is_primary = symbol.is_primary;
        let id = self.add_constructor(symbol);
        let class = self.class_mut(class);
        class.constructors.push(id);
        if is_primary {
            class.primary_constructor = Some(id);
        }
        id
    }

    /// Value parameters of a callable.
    pub fn params_of(&self, callable: CallableId) -> &[ValueParamId] {
        match callable {
            CallableId::Function(id) => &self.function(id).value_params,
            CallableId::Constructor(id) => &self.constructor(id).value_params,
        }
    }

    /// Return type of a callable.
    pub fn return_type_of(&self, callable: CallableId) -> Idx {
        match callable {
            CallableId::Function(id) => self.function(id).return_type,
            CallableId::Constructor(id) => self.constructor(id).return_type,
        }
    }

    /// Source name of a symbol. Constructors are named after their class.
    pub fn name_of(&self, symbol: SymbolRef) -> Name {
        match symbol {
            SymbolRef::Class(id) => self.class(id).name,
            SymbolRef::Function(id) => self.function(id).name,
            SymbolRef::Constructor(id) => self.class(self.constructor(id).class).name,
            SymbolRef::Variable(id) => self.variable(id).name,
            SymbolRef::ValueParam(id) => self.value_param(id).name,
            SymbolRef::TypeParam(id) => self.type_param(id).name,
        }
    }

    /// Snapshot of the arena lengths.
    pub fn watermark(&self) -> Watermark {
        Watermark {
            classes: self.classes.len(),
            functions: self.functions.len(),
            constructors: self.constructors.len(),
            variables: self.variables.len(),
            value_params: self.value_params.len(),
            type_params: self.type_params.len(),
        }
    }

    /// Returns `true` if every symbol of `earlier` is present, unchanged, at
    /// the same id in `self`.
    pub fn extends(&self, earlier: &SymbolTable) -> bool {
        self.classes.starts_with(&earlier.classes)
            && self.functions.starts_with(&earlier.functions)
            && self.constructors.starts_with(&earlier.constructors)
            && self.variables.starts_with(&earlier.variables)
            && self.value_params.starts_with(&earlier.value_params)
            && self.type_params.starts_with(&earlier.type_params)
    }

    /// Total number of symbols of all kinds.
    pub fn len(&self) -> usize {
        self.classes.len()
            + self.functions.len()
            + self.constructors.len()
            + self.variables.len()
            + self.value_params.len()
            + self.type_params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests;
