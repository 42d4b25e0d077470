//! Copier configuration.

/// What a copied class declares as its supertypes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum SupertypePolicy {
    /// Carry the original supertypes over, each substituted.
    #[default]
    Substitute,
    /// Replace the supertypes with the single top type `any`.
    TopType,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CopyConfig {
    pub supertypes: SupertypePolicy,
    /// Check the produced tree with [`validate_copy`](crate::validate_copy)
    /// before returning it. On by default in debug builds.
    pub validate_output: bool,
}

impl Default for CopyConfig {
    fn default() -> Self {
        Self {
            supertypes: SupertypePolicy::default(),
            validate_output: cfg!(debug_assertions),
        }
    }
}

impl CopyConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_supertypes(mut self, policy: SupertypePolicy) -> Self {
        self.supertypes = policy;
        self
    }

    #[must_use]
    pub fn with_validation(mut self, enabled: bool) -> Self {
        self.validate_output = enabled;
        self
    }
}
