//! Collect pass: mint a fresh symbol for every declaration in the subtree.
//!
//! The pass only reads the tree. For each declaration it allocates a new
//! symbol in the [`SymbolTable`], named by the session's
//! [`NameGenerator`](crate::NameGenerator) and owned by the target function,
//! and records original → copy in the session's map. Value parameters of
//! copied callables are copied and recorded along with their callable.
//!
//! Classes are built in two steps: the class symbol is minted first so that
//! its constructors can find it, then its members are collected, then the
//! class is finalized with the copies of its constructors.
//!
//! [`SymbolTable`]: crate::ir::SymbolTable

use ori_types::Idx;
use smallvec::{smallvec, SmallVec};
use tracing::trace;

use crate::config::SupertypePolicy;
use crate::copy::CopySession;
use crate::error::CopyError;
use crate::ir::{
    CallableId, ClassDecl, ClassId, ClassSymbol, ConstructorId, ConstructorSymbol, FunctionId,
    FunctionKind, FunctionSymbol, Node, Owner, ParamList, ValueParamId, ValueParamSymbol,
    VariableId, VariableSymbol,
};
use crate::stack::ensure_sufficient_stack;

/// Collect every declaration below `root`. `root` itself is not collected.
pub(crate) fn collect_children(
    session: &mut CopySession<'_>,
    root: &Node,
) -> Result<(), CopyError> {
    for child in root.children() {
        collect_node(session, child)?;
    }
    Ok(())
}

fn collect_node(session: &mut CopySession<'_>, node: &Node) -> Result<(), CopyError> {
    ensure_sufficient_stack(|| {
        match node {
            Node::Class(decl) => return collect_class(session, decl),
            Node::Function(decl) => {
                let copy = copy_function(session, decl.symbol)?;
                session.map.insert(decl.symbol, copy)?;
            }
            Node::Constructor(decl) => {
                let copy = copy_constructor(session, decl.symbol)?;
                session.map.insert(decl.symbol, copy)?;
            }
            Node::Variable(decl) => {
                let copy = copy_variable(session, decl.symbol)?;
                session.map.insert(decl.symbol, copy)?;
            }
            Node::Call(call) => {
                if let CallableId::Function(callee) = call.callee {
                    if session.symbols.function(callee).is_function_type_invoke()
                        && !session.map.contains(callee)
                    {
                        let copy = copy_invoke(session, callee)?;
                        session.map.insert(callee, copy)?;
                    }
                }
            }
            Node::CallableReference(_)
            | Node::Return(_)
            | Node::GetValue(_)
            | Node::SetVariable(_)
            | Node::Block(_)
            | Node::Const(_)
            | Node::When(_)
            | Node::While(_)
            | Node::TypeOperator(_) => {}
        }
        collect_children(session, node)
    })
}

fn collect_class(session: &mut CopySession<'_>, decl: &ClassDecl) -> Result<(), CopyError> {
    let original = session.symbols.class(decl.symbol).clone();

    let supertypes = match session.config.supertypes {
        SupertypePolicy::Substitute => original
            .supertypes
            .iter()
            .map(|&ty| session.types.substitute(ty))
            .collect(),
        SupertypePolicy::TopType => smallvec![Idx::ANY],
    };
    let copy = session.symbols.add_class(ClassSymbol {
        name: session.names.fresh(original.name)?,
        owner: Owner::Function(session.target),
        supertypes,
        constructors: SmallVec::new(),
        primary_constructor: None,
        ..original.clone()
    });
    session.map.insert(decl.symbol, copy)?;
    trace!(original = %decl.symbol, copy = %copy, "minted class");

    for member in &decl.declarations {
        collect_node(session, member)?;
    }

    let constructors = original
        .constructors
        .iter()
        .map(|&ctor| mapped_constructor(session, decl.symbol, ctor))
        .collect::<Result<SmallVec<_>, _>>()?;
    let primary_constructor = original
        .primary_constructor
        .map(|ctor| mapped_constructor(session, decl.symbol, ctor))
        .transpose()?;

    let class = session.symbols.class_mut(copy);
    class.constructors = constructors;
    class.primary_constructor = primary_constructor;
    Ok(())
}

fn mapped_constructor(
    session: &CopySession<'_>,
    class: ClassId,
    constructor: ConstructorId,
) -> Result<ConstructorId, CopyError> {
    session
        .map
        .get(constructor)
        .ok_or(CopyError::UnmappedConstructor { class, constructor })
}

/// Copy a local function. The copy is owned by the target function and has
/// no dispatch receiver.
fn copy_function(
    session: &mut CopySession<'_>,
    function: FunctionId,
) -> Result<FunctionId, CopyError> {
    let original = session.symbols.function(function).clone();
    if !original.type_params.is_empty() {
        return Err(CopyError::GenericDeclaration {
            symbol: function.into(),
            count: original.type_params.len(),
        });
    }

    let copy = session.symbols.add_function(FunctionSymbol {
        name: session.names.fresh(original.name)?,
        owner: Owner::Function(session.target),
        kind: FunctionKind::Synthesized,
        type_params: SmallVec::new(),
        value_params: SmallVec::new(),
        return_type: session.types.substitute(original.return_type),
        extension_receiver: session.types.substitute_opt(original.extension_receiver),
        // TODO: carry the dispatch receiver over once member functions of
        // copied local classes are resolved against the copied class.
        dispatch_receiver: None,
        modality: original.modality,
        visibility: original.visibility,
        is_tailrec: original.is_tailrec,
        is_inline: false,
    });
    let params = copy_value_params(session, &original.value_params, copy.into())?;
    session.symbols.function_mut(copy).value_params = params;
    trace!(original = %function, copy = %copy, "minted function");
    Ok(copy)
}

fn copy_constructor(
    session: &mut CopySession<'_>,
    constructor: ConstructorId,
) -> Result<ConstructorId, CopyError> {
    let original = session.symbols.constructor(constructor).clone();
    let class = session
        .map
        .get(original.class)
        .ok_or(CopyError::MissingContainingClass { constructor })?;
    if !original.type_params.is_empty() {
        return Err(CopyError::GenericDeclaration {
            symbol: constructor.into(),
            count: original.type_params.len(),
        });
    }

    let copy = session.symbols.add_constructor(ConstructorSymbol {
        class,
        is_primary: original.is_primary,
        type_params: SmallVec::new(),
        value_params: SmallVec::new(),
        return_type: session.types.substitute(original.return_type),
        dispatch_receiver: session.types.substitute_opt(original.dispatch_receiver),
        modality: original.modality,
        visibility: original.visibility,
    });
    let params = copy_value_params(session, &original.value_params, copy.into())?;
    session.symbols.constructor_mut(copy).value_params = params;
    trace!(original = %constructor, copy = %copy, "minted constructor");
    Ok(copy)
}

/// Copy the `invoke` operator of a function type for a call on a
/// function-typed value. Name, kind and owner are kept.
fn copy_invoke(session: &mut CopySession<'_>, invoke: FunctionId) -> Result<FunctionId, CopyError> {
    let original = session.symbols.function(invoke).clone();
    let copy = session.symbols.add_function(FunctionSymbol {
        return_type: session.types.substitute(original.return_type),
        value_params: SmallVec::new(),
        ..original.clone()
    });
    let params = copy_value_params(session, &original.value_params, copy.into())?;
    session.symbols.function_mut(copy).value_params = params;
    trace!(original = %invoke, copy = %copy, "minted invoke");
    Ok(copy)
}

fn copy_variable(
    session: &mut CopySession<'_>,
    variable: VariableId,
) -> Result<VariableId, CopyError> {
    let original = session.symbols.variable(variable).clone();
    let copy = session.symbols.add_variable(VariableSymbol {
        name: session.names.fresh(original.name)?,
        owner: Owner::Function(session.target),
        ty: session.types.substitute(original.ty),
        is_var: original.is_var,
    });
    trace!(original = %variable, copy = %copy, "minted variable");
    Ok(copy)
}

/// Copy `params` for the callable `owner`, recording each pair immediately.
fn copy_value_params(
    session: &mut CopySession<'_>,
    params: &[ValueParamId],
    owner: CallableId,
) -> Result<ParamList, CopyError> {
    let mut copies = ParamList::with_capacity(params.len());
    for &param in params {
        let original = session.symbols.value_param(param).clone();
        let copy = session.symbols.add_value_param(ValueParamSymbol {
            owner,
            original: Some(original.root(param)),
            index: original.index,
            name: original.name,
            ty: session.types.substitute(original.ty),
            vararg_element: session.types.substitute_opt(original.vararg_element),
            flags: original.flags,
        });
        session.map.insert(param, copy)?;
        copies.push(copy);
    }
    Ok(copies)
}
