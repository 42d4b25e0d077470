//! Type system for the Ori inliner.
//!
//! # Type Interning
//!
//! All types are stored in a [`Pool`] and referenced by a 32-bit [`Idx`].
//! Structurally equal types intern to the same index, so type equality is an
//! O(1) index comparison. The one exception is type parameters: every call to
//! [`Pool::type_param`] creates a distinct rigid parameter, because two `T`s
//! declared by different generic functions are different types.
//!
//! # Substitution
//!
//! [`TypeSubstitutor`] is the seam between the inliner and whoever decides how
//! generic parameters resolve at a call site. [`ParamSubstitution`] is the
//! stock implementation: a parameter → projection map applied with
//! variance-aware conflict detection.

mod flags;
mod idx;
mod pool;
mod subst;

pub use flags::TypeFlags;
pub use idx::Idx;
pub use pool::{Pool, TypeData};
pub use subst::{ParamSubstitution, TypeProjection, TypeSubstitutor, Variance};

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::Idx;
    ori_ir::static_assert_size!(Idx, 4);
}
