//! Interned type storage.
//!
//! The pool owns every type of a compilation. Composite types are
//! hash-consed: asking for `[int]` twice returns the same [`Idx`]. Flags are
//! computed once when a type is first interned.

use std::fmt::Write as _;

use ori_ir::{Name, StringInterner};
use rustc_hash::FxHashMap;

use crate::{Idx, TypeFlags};

/// Structural description of one interned type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum TypeData {
    Int,
    Float,
    Bool,
    Str,
    Char,
    Unit,
    Never,
    Any,
    Error,
    /// A rigid type parameter. `id` is unique per pool, so two parameters
    /// that happen to share a name never unify.
    Param { name: Name, id: u32 },
    /// `[elem]`
    List(Idx),
    /// `inner?`
    Option(Idx),
    /// `{key: value}`
    Map(Idx, Idx),
    /// `(params...) -> ret`
    Function { params: Box<[Idx]>, ret: Idx },
    /// A nominal class type with its type arguments: `Box[int]`.
    Named { name: Name, args: Box<[Idx]> },
}

/// The type pool.
pub struct Pool {
    items: Vec<TypeData>,
    flags: Vec<TypeFlags>,
    lookup: FxHashMap<TypeData, Idx>,
    next_param: u32,
}

impl Pool {
    /// Create a pool with the primitive types pre-interned at their fixed
    /// indices.
    pub fn new() -> Self {
        let mut pool = Self {
            items: Vec::with_capacity(256),
            flags: Vec::with_capacity(256),
            lookup: FxHashMap::default(),
            next_param: 0,
        };

        let primitives = [
            (TypeData::Int, Idx::INT),
            (TypeData::Float, Idx::FLOAT),
            (TypeData::Bool, Idx::BOOL),
            (TypeData::Str, Idx::STR),
            (TypeData::Char, Idx::CHAR),
            (TypeData::Unit, Idx::UNIT),
            (TypeData::Never, Idx::NEVER),
            (TypeData::Any, Idx::ANY),
            (TypeData::Error, Idx::ERROR),
        ];
        for (data, expected) in primitives {
            let idx = pool.intern(data);
            debug_assert_eq!(idx, expected);
        }
        pool
    }

    /// Intern a type, returning the existing index if it is already present.
    pub fn intern(&mut self, data: TypeData) -> Idx {
        if let Some(&idx) = self.lookup.get(&data) {
            return idx;
        }

        let flags = self.compute_flags(&data);
        // The pool never holds anywhere near u32::MAX types; the index is
        // the position of the pushed item.
        #[expect(
            clippy::cast_possible_truncation,
            reason = "type count is bounded far below u32::MAX"
        )]
        let idx = Idx::from_raw(self.items.len() as u32);
        self.items.push(data.clone());
        self.flags.push(flags);
        self.lookup.insert(data, idx);
        idx
    }

    fn compute_flags(&self, data: &TypeData) -> TypeFlags {
        let children = |kids: &[Idx]| {
            kids.iter()
                .fold(TypeFlags::empty(), |acc, &kid| acc | self.flags(kid).propagated())
        };
        match data {
            TypeData::Error => TypeFlags::IS_PRIMITIVE | TypeFlags::HAS_ERROR,
            TypeData::Int
            | TypeData::Float
            | TypeData::Bool
            | TypeData::Str
            | TypeData::Char
            | TypeData::Unit
            | TypeData::Never
            | TypeData::Any => TypeFlags::IS_PRIMITIVE,
            TypeData::Param { .. } => TypeFlags::IS_PARAM | TypeFlags::HAS_PARAM,
            TypeData::List(elem) | TypeData::Option(elem) => {
                TypeFlags::IS_CONTAINER | children(&[*elem])
            }
            TypeData::Map(key, value) => TypeFlags::IS_CONTAINER | children(&[*key, *value]),
            TypeData::Function { params, ret } => {
                TypeFlags::IS_FUNCTION | children(params) | children(&[*ret])
            }
            TypeData::Named { args, .. } => TypeFlags::IS_NAMED | children(args),
        }
    }

    // === Constructors ===

    /// Create a fresh rigid type parameter.
    ///
    /// Unlike every other constructor this never deduplicates.
    pub fn type_param(&mut self, name: Name) -> Idx {
        let id = self.next_param;
        self.next_param += 1;
        self.intern(TypeData::Param { name, id })
    }

    /// Create a list type `[elem]`.
    pub fn list(&mut self, elem: Idx) -> Idx {
        self.intern(TypeData::List(elem))
    }

    /// Create an option type `inner?`.
    pub fn option(&mut self, inner: Idx) -> Idx {
        self.intern(TypeData::Option(inner))
    }

    /// Create a map type `{key: value}`.
    pub fn map(&mut self, key: Idx, value: Idx) -> Idx {
        self.intern(TypeData::Map(key, value))
    }

    /// Create a function type `(params...) -> ret`.
    pub fn function(&mut self, params: &[Idx], ret: Idx) -> Idx {
        self.intern(TypeData::Function {
            params: params.into(),
            ret,
        })
    }

    /// Create a named type `name[args...]`.
    pub fn named(&mut self, name: Name, args: &[Idx]) -> Idx {
        self.intern(TypeData::Named {
            name,
            args: args.into(),
        })
    }

    // === Queries ===

    /// Structural data of a type.
    ///
    /// # Panics
    /// Panics if `idx` was not produced by this pool.
    #[inline]
    pub fn data(&self, idx: Idx) -> &TypeData {
        &self.items[idx.index()]
    }

    /// Cached flags of a type.
    ///
    /// # Panics
    /// Panics if `idx` was not produced by this pool.
    #[inline]
    pub fn flags(&self, idx: Idx) -> TypeFlags {
        self.flags[idx.index()]
    }

    /// Returns `true` if `idx` is a type parameter.
    #[inline]
    pub fn is_param(&self, idx: Idx) -> bool {
        self.flags(idx).contains(TypeFlags::IS_PARAM)
    }

    /// Number of interned types, primitives included.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always `false`: primitives are pre-interned.
    pub fn is_empty(&self) -> bool {
        false
    }

    // === Rendering ===

    /// Render a type in source-like syntax.
    pub fn display(&self, idx: Idx, interner: &StringInterner) -> String {
        let mut out = String::new();
        self.write_type(&mut out, idx, interner);
        out
    }

    fn write_type(&self, out: &mut String, idx: Idx, interner: &StringInterner) {
        if let Some(name) = idx.name() {
            out.push_str(name);
            return;
        }
        match self.data(idx) {
            TypeData::Param { name, .. } => out.push_str(interner.lookup(*name)),
            TypeData::List(elem) => {
                out.push('[');
                self.write_type(out, *elem, interner);
                out.push(']');
            }
            TypeData::Option(inner) => {
                self.write_type(out, *inner, interner);
                out.push('?');
            }
            TypeData::Map(key, value) => {
                out.push('{');
                self.write_type(out, *key, interner);
                out.push_str(": ");
                self.write_type(out, *value, interner);
                out.push('}');
            }
            TypeData::Function { params, ret } => {
                out.push('(');
                self.write_list(out, params, interner);
                out.push_str(") -> ");
                self.write_type(out, *ret, interner);
            }
            TypeData::Named { name, args } => {
                out.push_str(interner.lookup(*name));
                if !args.is_empty() {
                    out.push('[');
                    self.write_list(out, args, interner);
                    out.push(']');
                }
            }
            // Primitives are handled by `Idx::name` above.
            other => {
                let _ = write!(out, "{other:?}");
            }
        }
    }

    fn write_list(&self, out: &mut String, items: &[Idx], interner: &StringInterner) {
        for (i, &item) in items.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            self.write_type(out, item, interner);
        }
    }
}

impl Default for Pool {
    fn default() -> Self {
        Self::new()
    }
}
