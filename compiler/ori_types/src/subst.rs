//! Variance-aware type substitution.
//!
//! A substitution replaces type parameters with concrete types. Replacements
//! may be *projected* (`out Number`, `in Int`): such a replacement is only
//! valid in a position of matching variance. Substituting a projected
//! replacement into a position of a different variance is a conflict and
//! produces no result; callers decide what to fall back to.
//!
//! # Positions
//!
//! | Position | Variance |
//! |----------|----------|
//! | list / option element | same as enclosing |
//! | function result | same as enclosing |
//! | function parameter | flipped |
//! | map key | invariant |
//! | map value | same as enclosing |
//! | named-type argument | invariant |

use rustc_hash::FxHashMap;

use crate::{Idx, Pool, TypeData};

/// The variance of a position in a type, or of a projected type argument.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum Variance {
    /// Exact replacement only: no widening or narrowing.
    #[default]
    Invariant,
    /// Contravariant (`in`): consumers.
    In,
    /// Covariant (`out`): producers.
    Out,
}

impl Variance {
    /// The variance of a position nested under a contravariant one.
    #[inline]
    #[must_use]
    pub fn flip(self) -> Self {
        match self {
            Variance::Invariant => Variance::Invariant,
            Variance::In => Variance::Out,
            Variance::Out => Variance::In,
        }
    }

    /// Returns `true` if a replacement projected with `projection` may be
    /// placed in a position of this variance.
    #[inline]
    pub fn admits(self, projection: Variance) -> bool {
        projection == Variance::Invariant || projection == self
    }
}

/// A replacement type together with its projection kind.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct TypeProjection {
    pub variance: Variance,
    pub ty: Idx,
}

impl TypeProjection {
    /// An exact (unprojected) replacement.
    pub const fn invariant(ty: Idx) -> Self {
        Self {
            variance: Variance::Invariant,
            ty,
        }
    }

    /// An `out`-projected replacement.
    pub const fn covariant(ty: Idx) -> Self {
        Self {
            variance: Variance::Out,
            ty,
        }
    }

    /// An `in`-projected replacement.
    pub const fn contravariant(ty: Idx) -> Self {
        Self {
            variance: Variance::In,
            ty,
        }
    }
}

/// Applies a type substitution.
///
/// Returns `None` when the substitution cannot be expressed at the requested
/// variance. Any `Fn(&mut Pool, Idx, Variance) -> Option<Idx>` closure is a
/// substitutor.
pub trait TypeSubstitutor {
    fn substitute(&self, pool: &mut Pool, ty: Idx, variance: Variance) -> Option<Idx>;
}

impl<F> TypeSubstitutor for F
where
    F: Fn(&mut Pool, Idx, Variance) -> Option<Idx>,
{
    fn substitute(&self, pool: &mut Pool, ty: Idx, variance: Variance) -> Option<Idx> {
        self(pool, ty, variance)
    }
}

/// A type-parameter → projection map.
#[derive(Clone, Debug, Default)]
pub struct ParamSubstitution {
    map: FxHashMap<Idx, TypeProjection>,
}

impl ParamSubstitution {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `param` to exactly `ty`.
    pub fn insert(&mut self, param: Idx, ty: Idx) {
        self.map.insert(param, TypeProjection::invariant(ty));
    }

    /// Map `param` to a projected replacement.
    pub fn insert_projection(&mut self, param: Idx, projection: TypeProjection) {
        self.map.insert(param, projection);
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, param: Idx, ty: Idx) -> Self {
        self.insert(param, ty);
        self
    }

    pub fn get(&self, param: Idx) -> Option<TypeProjection> {
        self.map.get(&param).copied()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    fn substitute_all(
        &self,
        pool: &mut Pool,
        items: &[Idx],
        variance: Variance,
    ) -> Option<Vec<Idx>> {
        items
            .iter()
            .map(|&item| self.substitute(pool, item, variance))
            .collect()
    }
}

impl TypeSubstitutor for ParamSubstitution {
    fn substitute(&self, pool: &mut Pool, ty: Idx, variance: Variance) -> Option<Idx> {
        // Fast path: nothing to replace
        if self.map.is_empty() || !pool.flags(ty).needs_subst() {
            return Some(ty);
        }

        match pool.data(ty).clone() {
            TypeData::Param { .. } => match self.map.get(&ty) {
                None => Some(ty),
                Some(projection) if variance.admits(projection.variance) => Some(projection.ty),
                Some(projection) => {
                    tracing::trace!(
                        ?ty,
                        position = ?variance,
                        projection = ?projection.variance,
                        "conflicting projection"
                    );
                    None
                }
            },
            TypeData::List(elem) => {
                let new_elem = self.substitute(pool, elem, variance)?;
                Some(if new_elem == elem {
                    ty
                } else {
                    pool.list(new_elem)
                })
            }
            TypeData::Option(inner) => {
                let new_inner = self.substitute(pool, inner, variance)?;
                Some(if new_inner == inner {
                    ty
                } else {
                    pool.option(new_inner)
                })
            }
            TypeData::Map(key, value) => {
                let new_key = self.substitute(pool, key, Variance::Invariant)?;
                let new_value = self.substitute(pool, value, variance)?;
                Some(if new_key == key && new_value == value {
                    ty
                } else {
                    pool.map(new_key, new_value)
                })
            }
            TypeData::Function { params, ret } => {
                let new_params = self.substitute_all(pool, &params, variance.flip())?;
                let new_ret = self.substitute(pool, ret, variance)?;
                Some(if *new_params == *params && new_ret == ret {
                    ty
                } else {
                    pool.function(&new_params, new_ret)
                })
            }
            TypeData::Named { name, args } => {
                let new_args = self.substitute_all(pool, &args, Variance::Invariant)?;
                Some(if *new_args == *args {
                    ty
                } else {
                    pool.named(name, &new_args)
                })
            }
            TypeData::Int
            | TypeData::Float
            | TypeData::Bool
            | TypeData::Str
            | TypeData::Char
            | TypeData::Unit
            | TypeData::Never
            | TypeData::Any
            | TypeData::Error => Some(ty),
        }
    }
}
