//! Unified type index handle.
//!
//! `Idx` is the canonical type representation: every type lives in the
//! [`Pool`](crate::Pool) and is referenced by its 32-bit index.
//!
//! - Primitive types have fixed indices for O(1) lookup
//! - Type equality is O(1) index comparison
//! - Copy, lightweight passing

use std::fmt;

/// A 32-bit index into the type pool.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct Idx(u32);

impl Idx {
    // === Primitive Types ===
    // These are pre-interned at pool creation, in this order.

    /// The `int` type (64-bit signed integer).
    pub const INT: Self = Self(0);
    /// The `float` type (64-bit floating point).
    pub const FLOAT: Self = Self(1);
    /// The `bool` type.
    pub const BOOL: Self = Self(2);
    /// The `str` type (UTF-8 string).
    pub const STR: Self = Self(3);
    /// The `char` type (Unicode scalar value).
    pub const CHAR: Self = Self(4);
    /// The unit type `()`.
    pub const UNIT: Self = Self(5);
    /// The never type (bottom type, no values).
    pub const NEVER: Self = Self(6);
    /// The universal top type: every type is a subtype of `any`.
    pub const ANY: Self = Self(7);
    /// The error type (placeholder for type errors, propagates silently).
    pub const ERROR: Self = Self(8);

    /// Number of pre-interned primitive types.
    pub const PRIMITIVE_COUNT: u32 = 9;

    /// First index for dynamically allocated types.
    pub const FIRST_DYNAMIC: u32 = Self::PRIMITIVE_COUNT;

    /// Create an index from a raw u32 value.
    ///
    /// The caller must ensure the index is valid in the pool it is used with.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Get the index as `usize` (for indexing into the pool).
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Check if this is a primitive type (pre-interned).
    #[inline]
    pub const fn is_primitive(self) -> bool {
        self.0 < Self::FIRST_DYNAMIC
    }

    /// Get the human-readable name for primitive types.
    ///
    /// Returns `None` for dynamic types, which need a pool to render.
    #[inline]
    pub const fn name(self) -> Option<&'static str> {
        match self.0 {
            0 => Some("int"),
            1 => Some("float"),
            2 => Some("bool"),
            3 => Some("str"),
            4 => Some("char"),
            5 => Some("()"),
            6 => Some("never"),
            7 => Some("any"),
            8 => Some("<error>"),
            _ => None,
        }
    }
}

impl fmt::Debug for Idx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "Idx::{name}"),
            None => write!(f, "Idx({})", self.0),
        }
    }
}
