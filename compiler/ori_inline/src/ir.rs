//! The typed IR that deep copies operate on.
//!
//! - `ids`: typed symbol handles
//! - `symbol`: symbol records and the [`SymbolTable`] arenas
//! - `tree`: the closed [`Node`] enum
//! - `visitor`: read-only traversal
//! - `dump`: textual rendering for tests and logs

mod dump;
mod ids;
mod symbol;
mod tree;
mod visitor;

pub use dump::dump_node;
pub use ids::{
    CallableId, ClassId, ConstructorId, FunctionId, Owner, SymbolRef, TypeParamId, ValueId,
    ValueParamId, VariableId,
};
pub use symbol::{
    ClassKind, ClassSymbol, ConstructorSymbol, FunctionKind, FunctionSymbol, Modality,
    ParamFlags, ParamList, SymbolTable, TypeParamList, TypeParamSymbol, ValueParamSymbol,
    VariableSymbol, Visibility, Watermark,
};
pub use tree::{
    Block, Branch, Call, CallableReference, ClassDecl, Const, ConstValue, ConstructorDecl,
    FunctionDecl, GetValue, Node, Origin, Return, SetVariable, TypeArguments, TypeOperator,
    TypeOperatorCall, VariableDecl, When, While,
};
pub use visitor::{walk_node, Visitor};
