//! Pre-computed type metadata flags.
//!
//! `TypeFlags` are computed once at interning time and cached, so
//! substitution can skip every type that mentions no type parameter without
//! walking it.

use bitflags::bitflags;

bitflags! {
    /// Pre-computed type properties for O(1) queries.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct TypeFlags: u16 {
        // === Presence Flags ===
        // Propagated from children to parents.

        /// Contains a type parameter somewhere.
        const HAS_PARAM = 1 << 0;
        /// Contains the error type.
        const HAS_ERROR = 1 << 1;

        // === Category Flags ===
        // Describe the outermost constructor only.

        /// Built-in primitive type.
        const IS_PRIMITIVE = 1 << 8;
        /// A type parameter itself.
        const IS_PARAM = 1 << 9;
        /// List, option, or map.
        const IS_CONTAINER = 1 << 10;
        /// Function type.
        const IS_FUNCTION = 1 << 11;
        /// Named (class) type.
        const IS_NAMED = 1 << 12;
    }
}

impl TypeFlags {
    /// Flags inherited by any type that contains a type with these flags.
    pub const PROPAGATED: Self = Self::HAS_PARAM.union(Self::HAS_ERROR);

    /// Presence flags a parent picks up from this child.
    #[inline]
    #[must_use]
    pub fn propagated(self) -> Self {
        self.intersection(Self::PROPAGATED)
    }

    /// Returns `true` if substitution could change this type.
    #[inline]
    pub fn needs_subst(self) -> bool {
        self.contains(Self::HAS_PARAM)
    }
}

#[cfg(test)]
mod tests;
