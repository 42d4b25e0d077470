//! Rewrite pass: rebuild the tree against the collected symbol map.
//!
//! Runs after the collect pass. Every node is rebuilt bottom-up: children
//! first, then the node itself is resolved. Resolution depends on the kind:
//!
//! | Node | Resolution |
//! |------|------------|
//! | class, function, constructor, variable declaration | new symbol if mapped |
//! | call | always: callee and `super` qualifier remapped, types substituted |
//! | callable reference, return | new target and substituted types if mapped |
//! | get-value, set-variable | new symbol if mapped |
//! | block, const, when, type operator | substituted types |
//! | while | children only |
//!
//! A mapping miss means the symbol lives outside the copied subtree, and the
//! reference is kept as is.

use crate::copy::CopySession;
use crate::error::CopyError;
use crate::ir::{
    Block, Branch, Call, CallableId, CallableReference, ClassDecl, ConstructorDecl, FunctionDecl,
    Node, Return, SetVariable, TypeOperatorCall, VariableDecl, When, While,
};
use crate::stack::ensure_sufficient_stack;

/// Rebuild `root` with all of its children rewritten. The fields of `root`
/// itself are kept.
pub(crate) fn rewrite_children(
    session: &mut CopySession<'_>,
    root: &Node,
) -> Result<Node, CopyError> {
    Ok(match root {
        Node::Class(decl) => Node::Class(ClassDecl {
            span: decl.span,
            origin: decl.origin,
            symbol: decl.symbol,
            declarations: rewrite_all(session, &decl.declarations)?,
        }),
        Node::Function(decl) => Node::Function(FunctionDecl {
            span: decl.span,
            origin: decl.origin,
            symbol: decl.symbol,
            body: rewrite_opt(session, decl.body.as_deref())?,
        }),
        Node::Constructor(decl) => Node::Constructor(ConstructorDecl {
            span: decl.span,
            origin: decl.origin,
            symbol: decl.symbol,
            body: rewrite_boxed(session, &decl.body)?,
        }),
        Node::Variable(decl) => Node::Variable(VariableDecl {
            span: decl.span,
            origin: decl.origin,
            symbol: decl.symbol,
            initializer: rewrite_opt(session, decl.initializer.as_deref())?,
        }),
        Node::Call(call) => Node::Call(Call {
            dispatch_receiver: rewrite_opt(session, call.dispatch_receiver.as_deref())?,
            extension_receiver: rewrite_opt(session, call.extension_receiver.as_deref())?,
            arguments: call
                .arguments
                .iter()
                .map(|arg| arg.as_ref().map(|arg| rewrite_node(session, arg)).transpose())
                .collect::<Result<_, _>>()?,
            type_arguments: call.type_arguments.clone(),
            ..*call
        }),
        Node::CallableReference(reference) => Node::CallableReference(CallableReference {
            dispatch_receiver: rewrite_opt(session, reference.dispatch_receiver.as_deref())?,
            extension_receiver: rewrite_opt(session, reference.extension_receiver.as_deref())?,
            type_arguments: reference.type_arguments.clone(),
            ..*reference
        }),
        Node::Return(ret) => Node::Return(Return {
            value: rewrite_boxed(session, &ret.value)?,
            ..*ret
        }),
        Node::GetValue(get) => Node::GetValue(get.clone()),
        Node::SetVariable(set) => Node::SetVariable(SetVariable {
            value: rewrite_boxed(session, &set.value)?,
            ..*set
        }),
        Node::Block(block) => Node::Block(Block {
            span: block.span,
            ty: block.ty,
            statements: rewrite_all(session, &block.statements)?,
        }),
        Node::Const(c) => Node::Const(c.clone()),
        Node::When(when) => Node::When(When {
            span: when.span,
            ty: when.ty,
            branches: when
                .branches
                .iter()
                .map(|branch| {
                    Ok(Branch {
                        condition: rewrite_node(session, &branch.condition)?,
                        result: rewrite_node(session, &branch.result)?,
                    })
                })
                .collect::<Result<_, CopyError>>()?,
        }),
        Node::While(w) => Node::While(While {
            span: w.span,
            condition: rewrite_boxed(session, &w.condition)?,
            body: rewrite_boxed(session, &w.body)?,
        }),
        Node::TypeOperator(op) => Node::TypeOperator(TypeOperatorCall {
            argument: rewrite_boxed(session, &op.argument)?,
            ..*op
        }),
    })
}

fn rewrite_node(session: &mut CopySession<'_>, node: &Node) -> Result<Node, CopyError> {
    ensure_sufficient_stack(|| {
        let rebuilt = rewrite_children(session, node)?;
        Ok(resolve(session, rebuilt))
    })
}

fn rewrite_all(session: &mut CopySession<'_>, nodes: &[Node]) -> Result<Vec<Node>, CopyError> {
    nodes.iter().map(|node| rewrite_node(session, node)).collect()
}

fn rewrite_boxed(session: &mut CopySession<'_>, node: &Node) -> Result<Box<Node>, CopyError> {
    rewrite_node(session, node).map(Box::new)
}

fn rewrite_opt(
    session: &mut CopySession<'_>,
    node: Option<&Node>,
) -> Result<Option<Box<Node>>, CopyError> {
    node.map(|node| rewrite_boxed(session, node)).transpose()
}

fn remap_callable(session: &CopySession<'_>, callable: CallableId) -> Option<CallableId> {
    session.map.callable(callable)
}

/// Point a node with rewritten children at the copied symbols.
fn resolve(session: &mut CopySession<'_>, node: Node) -> Node {
    match node {
        Node::Class(mut decl) => {
            decl.symbol = session.map.get_or_same(decl.symbol);
            Node::Class(decl)
        }
        Node::Function(mut decl) => {
            decl.symbol = session.map.get_or_same(decl.symbol);
            Node::Function(decl)
        }
        Node::Constructor(mut decl) => {
            decl.symbol = session.map.get_or_same(decl.symbol);
            Node::Constructor(decl)
        }
        Node::Variable(mut decl) => {
            decl.symbol = session.map.get_or_same(decl.symbol);
            Node::Variable(decl)
        }
        Node::Call(mut call) => {
            call.callee = remap_callable(session, call.callee).unwrap_or(call.callee);
            call.ty = session.types.substitute(call.ty);
            call.type_arguments = session
                .types
                .substitute_type_arguments(call.type_arguments.as_ref());
            call.super_qualifier = call
                .super_qualifier
                .map(|class| session.map.get_or_same(class));
            Node::Call(call)
        }
        Node::CallableReference(mut reference) => {
            if let Some(target) = remap_callable(session, reference.target) {
                reference.target = target;
                reference.ty = session.types.substitute(reference.ty);
                reference.type_arguments = session
                    .types
                    .substitute_type_arguments(reference.type_arguments.as_ref());
            }
            Node::CallableReference(reference)
        }
        Node::Return(mut ret) => {
            if let Some(target) = remap_callable(session, ret.target) {
                ret.target = target;
                ret.ty = session.types.substitute(ret.ty);
            }
            Node::Return(ret)
        }
        Node::GetValue(mut get) => {
            get.symbol = session.map.value(get.symbol).unwrap_or(get.symbol);
            Node::GetValue(get)
        }
        Node::SetVariable(mut set) => {
            set.symbol = session.map.get_or_same(set.symbol);
            Node::SetVariable(set)
        }
        Node::Block(mut block) => {
            block.ty = session.types.substitute(block.ty);
            Node::Block(block)
        }
        Node::Const(mut c) => {
            c.ty = session.types.substitute(c.ty);
            Node::Const(c)
        }
        Node::When(mut when) => {
            when.ty = session.types.substitute(when.ty);
            Node::When(when)
        }
        Node::TypeOperator(mut op) => {
            op.ty = session.types.substitute(op.ty);
            op.operand_type = session.types.substitute(op.operand_type);
            Node::TypeOperator(op)
        }
        node @ Node::While(_) => node,
    }
}
