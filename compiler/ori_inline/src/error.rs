//! Deep-copy errors.
//!
//! Every variant but `NameInterning` is an IR precondition violation: the
//! input tree was not in the shape the copier requires. None of them are
//! recoverable by retrying.

use ori_ir::InternError;

use crate::ir::{ClassId, ConstructorId, SymbolRef};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CopyError {
    /// A constructor declaration was reached before (or without) the
    /// declaration of its class.
    #[error("{constructor} is declared outside the class it constructs")]
    MissingContainingClass { constructor: ConstructorId },

    /// A copied function or constructor still has type parameters of its own.
    #[error(
        "{symbol} declares {count} type parameter(s); generic local declarations cannot be copied"
    )]
    GenericDeclaration { symbol: SymbolRef, count: usize },

    /// A class lists a constructor that has no declaration among its members.
    #[error("{class} lists {constructor}, which is not declared among its members")]
    UnmappedConstructor {
        class: ClassId,
        constructor: ConstructorId,
    },

    /// The same declaration occurs twice in the copied subtree.
    #[error("{symbol} is declared more than once in the copied subtree")]
    DuplicateDeclaration { symbol: SymbolRef },

    /// The copied tree still mentions an original symbol that was duplicated.
    #[error("copied tree still refers to original {symbol}")]
    DanglingReference { symbol: SymbolRef },

    /// A generated name could not be interned.
    #[error("cannot name copied declaration: {0}")]
    NameInterning(#[from] InternError),
}
