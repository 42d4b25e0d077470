//! The IR tree.
//!
//! A fully typed, resolved tree. Declarations own the symbol they declare;
//! every other symbol mention is a non-owning id into the [`SymbolTable`].
//! The node set is closed: passes match [`Node`] exhaustively, so adding a
//! node kind is a compile error everywhere it needs handling.
//!
//! [`SymbolTable`]: super::SymbolTable

use ori_ir::{Name, Span};
use ori_types::Idx;
use smallvec::SmallVec;

use super::{
    CallableId, ClassId, ConstructorId, FunctionId, SymbolRef, TypeParamId, ValueId, VariableId,
};

/// Where a node came from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Origin {
    /// Written in source.
    #[default]
    Source,
    /// A compiler-introduced temporary.
    Temporary,
    /// Part of a lambda body.
    Lambda,
    /// Produced by inlining a call.
    Inlined,
}

/// Type-parameter → type mapping attached to a call or callable reference.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct TypeArguments(SmallVec<[(TypeParamId, Idx); 2]>);

impl TypeArguments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, param: TypeParamId, ty: Idx) {
        self.0.push((param, ty));
    }

    pub fn get(&self, param: TypeParamId) -> Option<Idx> {
        self.0.iter().find(|(p, _)| *p == param).map(|&(_, ty)| ty)
    }

    pub fn iter(&self) -> impl Iterator<Item = (TypeParamId, Idx)> + '_ {
        self.0.iter().copied()
    }

    /// Apply `f` to every type, keeping the parameters.
    #[must_use]
    pub fn map_types(&self, mut f: impl FnMut(Idx) -> Idx) -> Self {
        Self(self.0.iter().map(|&(param, ty)| (param, f(ty))).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(TypeParamId, Idx)> for TypeArguments {
    fn from_iter<I: IntoIterator<Item = (TypeParamId, Idx)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConstValue {
    Int(i64),
    Bool(bool),
    Char(char),
    Str(Name),
    Unit,
    Null,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeOperator {
    Cast,
    SafeCast,
    InstanceOf,
    NotInstanceOf,
    ImplicitCoercion,
}

impl TypeOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            TypeOperator::Cast => "as",
            TypeOperator::SafeCast => "as?",
            TypeOperator::InstanceOf => "is",
            TypeOperator::NotInstanceOf => "!is",
            TypeOperator::ImplicitCoercion => "coerce",
        }
    }
}

// Declarations

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassDecl {
    pub span: Span,
    pub origin: Origin,
    pub symbol: ClassId,
    /// Member declarations, constructors included.
    pub declarations: Vec<Node>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionDecl {
    pub span: Span,
    pub origin: Origin,
    pub symbol: FunctionId,
    /// `None` for abstract and external functions.
    pub body: Option<Box<Node>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConstructorDecl {
    pub span: Span,
    pub origin: Origin,
    pub symbol: ConstructorId,
    pub body: Box<Node>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VariableDecl {
    pub span: Span,
    pub origin: Origin,
    pub symbol: VariableId,
    pub initializer: Option<Box<Node>>,
}

// References

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Call {
    pub span: Span,
    pub origin: Origin,
    /// Result type.
    pub ty: Idx,
    pub callee: CallableId,
    pub type_arguments: Option<TypeArguments>,
    /// Class named by a `super<C>.f()` qualifier.
    pub super_qualifier: Option<ClassId>,
    pub dispatch_receiver: Option<Box<Node>>,
    pub extension_receiver: Option<Box<Node>>,
    /// One slot per callee parameter; `None` uses the default value.
    pub arguments: Vec<Option<Node>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallableReference {
    pub span: Span,
    pub origin: Origin,
    pub ty: Idx,
    pub target: CallableId,
    pub type_arguments: Option<TypeArguments>,
    pub dispatch_receiver: Option<Box<Node>>,
    pub extension_receiver: Option<Box<Node>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Return {
    pub span: Span,
    /// Type of the return expression itself (usually `never`).
    pub ty: Idx,
    /// The callable being returned from.
    pub target: CallableId,
    pub value: Box<Node>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GetValue {
    pub span: Span,
    pub origin: Origin,
    pub symbol: ValueId,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SetVariable {
    pub span: Span,
    pub origin: Origin,
    pub symbol: VariableId,
    pub value: Box<Node>,
}

// Structural nodes

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block {
    pub span: Span,
    pub ty: Idx,
    pub statements: Vec<Node>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Const {
    pub span: Span,
    pub ty: Idx,
    pub value: ConstValue,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Branch {
    pub condition: Node,
    pub result: Node,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct When {
    pub span: Span,
    pub ty: Idx,
    pub branches: Vec<Branch>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct While {
    pub span: Span,
    pub condition: Box<Node>,
    pub body: Box<Node>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeOperatorCall {
    pub span: Span,
    /// Result type.
    pub ty: Idx,
    pub operator: TypeOperator,
    /// The type being checked or cast to.
    pub operand_type: Idx,
    pub argument: Box<Node>,
}

/// One IR node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Class(ClassDecl),
    Function(FunctionDecl),
    Constructor(ConstructorDecl),
    Variable(VariableDecl),
    Call(Call),
    CallableReference(CallableReference),
    Return(Return),
    GetValue(GetValue),
    SetVariable(SetVariable),
    Block(Block),
    Const(Const),
    When(When),
    While(While),
    TypeOperator(TypeOperatorCall),
}

impl Node {
    pub fn span(&self) -> Span {
        match self {
            Node::Class(n) => n.span,
            Node::Function(n) => n.span,
            Node::Constructor(n) => n.span,
            Node::Variable(n) => n.span,
            Node::Call(n) => n.span,
            Node::CallableReference(n) => n.span,
            Node::Return(n) => n.span,
            Node::GetValue(n) => n.span,
            Node::SetVariable(n) => n.span,
            Node::Block(n) => n.span,
            Node::Const(n) => n.span,
            Node::When(n) => n.span,
            Node::While(n) => n.span,
            Node::TypeOperator(n) => n.span,
        }
    }

    /// The symbol this node declares, if it is a declaration.
    pub fn declared_symbol(&self) -> Option<SymbolRef> {
        match self {
            Node::Class(n) => Some(n.symbol.into()),
            Node::Function(n) => Some(n.symbol.into()),
            Node::Constructor(n) => Some(n.symbol.into()),
            Node::Variable(n) => Some(n.symbol.into()),
            Node::Call(_)
            | Node::CallableReference(_)
            | Node::Return(_)
            | Node::GetValue(_)
            | Node::SetVariable(_)
            | Node::Block(_)
            | Node::Const(_)
            | Node::When(_)
            | Node::While(_)
            | Node::TypeOperator(_) => None,
        }
    }

    /// Symbols this node refers to without declaring them.
    pub fn referenced_symbols(&self) -> SmallVec<[SymbolRef; 2]> {
        let mut refs = SmallVec::new();
        match self {
            Node::Call(n) => {
                refs.push(n.callee.into());
                if let Some(class) = n.super_qualifier {
                    refs.push(class.into());
                }
            }
            Node::CallableReference(n) => refs.push(n.target.into()),
            Node::Return(n) => refs.push(n.target.into()),
            Node::GetValue(n) => refs.push(n.symbol.into()),
            Node::SetVariable(n) => refs.push(n.symbol.into()),
            Node::Class(_)
            | Node::Function(_)
            | Node::Constructor(_)
            | Node::Variable(_)
            | Node::Block(_)
            | Node::Const(_)
            | Node::When(_)
            | Node::While(_)
            | Node::TypeOperator(_) => {}
        }
        refs
    }

    /// Direct children in evaluation order.
    pub fn children(&self) -> SmallVec<[&Node; 4]> {
        let mut out = SmallVec::new();
        match self {
            Node::Class(n) => out.extend(n.declarations.iter()),
            Node::Function(n) => out.extend(n.body.as_deref()),
            Node::Constructor(n) => out.push(&*n.body),
            Node::Variable(n) => out.extend(n.initializer.as_deref()),
            Node::Call(n) => {
                out.extend(n.dispatch_receiver.as_deref());
                out.extend(n.extension_receiver.as_deref());
                out.extend(n.arguments.iter().flatten());
            }
            Node::CallableReference(n) => {
                out.extend(n.dispatch_receiver.as_deref());
                out.extend(n.extension_receiver.as_deref());
            }
            Node::Return(n) => out.push(&*n.value),
            Node::GetValue(_) | Node::Const(_) => {}
            Node::SetVariable(n) => out.push(&*n.value),
            Node::Block(n) => out.extend(n.statements.iter()),
            Node::When(n) => {
                for branch in &n.branches {
                    out.push(&branch.condition);
                    out.push(&branch.result);
                }
            }
            Node::While(n) => {
                out.push(&*n.condition);
                out.push(&*n.body);
            }
            Node::TypeOperator(n) => out.push(&*n.argument),
        }
        out
    }
}
