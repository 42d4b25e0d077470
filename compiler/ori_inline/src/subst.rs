//! Optional type substitution, as seen by the copier.
//!
//! The copier always substitutes at invariant variance. A missing substitutor
//! or a substitution that has no result leaves the type as it was.

use ori_types::{Idx, Pool, TypeSubstitutor, Variance};

use crate::ir::TypeArguments;

pub struct SubstitutionAdapter<'a> {
    substitutor: Option<&'a dyn TypeSubstitutor>,
    pool: &'a mut Pool,
}

impl<'a> SubstitutionAdapter<'a> {
    pub fn new(substitutor: Option<&'a dyn TypeSubstitutor>, pool: &'a mut Pool) -> Self {
        Self { substitutor, pool }
    }

    /// `true` when no substitutor is configured and every type passes
    /// through unchanged.
    pub fn is_identity(&self) -> bool {
        self.substitutor.is_none()
    }

    pub fn substitute(&mut self, ty: Idx) -> Idx {
        match self.substitutor {
            None => ty,
            Some(substitutor) => substitutor
                .substitute(self.pool, ty, Variance::Invariant)
                .unwrap_or(ty),
        }
    }

    pub fn substitute_opt(&mut self, ty: Option<Idx>) -> Option<Idx> {
        ty.map(|ty| self.substitute(ty))
    }

    /// Substitute every type of a type-argument mapping. The parameters are
    /// kept as they are.
    pub fn substitute_type_arguments(
        &mut self,
        arguments: Option<&TypeArguments>,
    ) -> Option<TypeArguments> {
        let arguments = arguments?;
        if self.is_identity() {
            return Some(arguments.clone());
        }
        Some(arguments.map_types(|ty| self.substitute(ty)))
    }
}

#[cfg(test)]
mod tests;
