//! Shared test utilities for the collect, rewrite and copy tests.
//!
//! [`Fixture`] owns one compilation's worth of state with two functions
//! already declared: `main` (the copy target) and `foo` (the function being
//! inlined). The free functions build tree nodes with dummy spans. Only
//! compiled in test builds.

use ori_ir::{Name, Span, StringInterner};
use ori_types::{Idx, Pool, TypeSubstitutor};

use crate::copy::CopySession;
use crate::ir::{
    Block, Call, CallableId, ClassDecl, ClassId, ClassKind, ClassSymbol, Const, ConstValue,
    ConstructorDecl, ConstructorId, ConstructorSymbol, FunctionDecl, FunctionId, FunctionKind,
    FunctionSymbol, GetValue, Node, Origin, Owner, ParamFlags, Return, SetVariable, SymbolTable,
    ValueId, VariableDecl, VariableId, VariableSymbol, Visibility,
};
use crate::names::NameGenerator;
use crate::subst::SubstitutionAdapter;
use crate::{collect, CopyConfig, CopyError, CopyOutput, DeepCopier, NameCounter, SymbolMap};

pub(crate) struct Fixture {
    pub(crate) interner: StringInterner,
    pub(crate) pool: Pool,
    pub(crate) symbols: SymbolTable,
    pub(crate) counter: NameCounter,
    /// Receives the copy.
    pub(crate) target: FunctionId,
    /// The function whose body is copied; owns the local declarations.
    pub(crate) inlined: FunctionId,
}

impl Fixture {
    pub(crate) fn new() -> Self {
        let interner = StringInterner::new();
        let mut symbols = SymbolTable::new();
        let target = symbols.add_function(FunctionSymbol::new(
            interner.intern("main"),
            Owner::Module,
            Idx::UNIT,
        ));
        let inlined = symbols.add_function(FunctionSymbol {
            is_inline: true,
            ..FunctionSymbol::new(interner.intern("foo"), Owner::Module, Idx::UNIT)
        });
        Self {
            interner,
            pool: Pool::new(),
            symbols,
            counter: NameCounter::new(),
            target,
            inlined,
        }
    }

    pub(crate) fn name(&self, text: &str) -> Name {
        self.interner.intern(text)
    }

    pub(crate) fn text(&self, name: Name) -> &'static str {
        self.interner.lookup(name)
    }

    /// A fresh type parameter in the pool.
    pub(crate) fn type_param(&mut self, name: &str) -> Idx {
        let name = self.interner.intern(name);
        self.pool.type_param(name)
    }

    /// A function declared inside `foo`.
    pub(crate) fn local_function(
        &mut self,
        name: &str,
        params: &[(&str, Idx)],
        return_type: Idx,
    ) -> FunctionId {
        let name = self.name(name);
        let owner = Owner::Function(self.inlined);
        let id = self.symbols.add_function(FunctionSymbol {
            visibility: Visibility::Local,
            ..FunctionSymbol::new(name, owner, return_type)
        });
        for &(param, ty) in params {
            let param = self.name(param);
            self.symbols
                .push_function_param(id, param, ty, ParamFlags::empty());
        }
        id
    }

    /// A function declared outside the copied body.
    pub(crate) fn outer_function(&mut self, name: &str, return_type: Idx) -> FunctionId {
        let name = self.name(name);
        self.symbols
            .add_function(FunctionSymbol::new(name, Owner::Module, return_type))
    }

    pub(crate) fn variable(&mut self, name: &str, ty: Idx, is_var: bool) -> VariableId {
        let name = self.name(name);
        self.symbols.add_variable(VariableSymbol {
            name,
            owner: Owner::Function(self.inlined),
            ty,
            is_var,
        })
    }

    pub(crate) fn local_class(&mut self, name: &str) -> ClassId {
        let name = self.name(name);
        self.symbols.add_class(ClassSymbol::new(
            name,
            Owner::Function(self.inlined),
            ClassKind::Class,
        ))
    }

    /// A constructor registered with `class`, with one parameter per entry.
    pub(crate) fn constructor(
        &mut self,
        class: ClassId,
        params: &[(&str, Idx)],
        is_primary: bool,
    ) -> ConstructorId {
        let class_name = self.symbols.class(class).name;
        let class_type = self.pool.named(class_name, &[]);
        let id = self
            .symbols
            .declare_constructor(ConstructorSymbol::new(class, class_type, is_primary));
        for &(param, ty) in params {
            let param = self.name(param);
            self.symbols
                .push_constructor_param(id, param, ty, ParamFlags::empty());
        }
        id
    }

    /// The `invoke` operator of the function type `(params) -> ret`.
    pub(crate) fn invoke(&mut self, params: &[Idx], ret: Idx) -> FunctionId {
        let name = self.name("invoke");
        let id = self.symbols.add_function(FunctionSymbol {
            kind: FunctionKind::FunctionTypeInvoke,
            ..FunctionSymbol::new(name, Owner::Module, ret)
        });
        for (i, &ty) in params.iter().enumerate() {
            let param = self.name(&format!("p{i}"));
            self.symbols
                .push_function_param(id, param, ty, ParamFlags::empty());
        }
        id
    }

    /// Copy `root` into `main` with the default configuration and output
    /// validation on.
    pub(crate) fn copy(
        &mut self,
        root: &Node,
        substitutor: Option<&dyn TypeSubstitutor>,
    ) -> Result<CopyOutput, CopyError> {
        self.copy_with(root, substitutor, CopyConfig::new().with_validation(true))
    }

    pub(crate) fn copy_with(
        &mut self,
        root: &Node,
        substitutor: Option<&dyn TypeSubstitutor>,
        config: CopyConfig,
    ) -> Result<CopyOutput, CopyError> {
        let mut copier =
            DeepCopier::new(self.target, &self.counter, &self.interner).with_config(config);
        if let Some(substitutor) = substitutor {
            copier = copier.with_substitutor(substitutor);
        }
        copier.copy(&mut self.symbols, &mut self.pool, root, "foo")
    }

    /// Run only the collect pass.
    pub(crate) fn collect(
        &mut self,
        root: &Node,
        substitutor: Option<&dyn TypeSubstitutor>,
        config: &CopyConfig,
    ) -> Result<SymbolMap, CopyError> {
        let mut session = CopySession {
            symbols: &mut self.symbols,
            types: SubstitutionAdapter::new(substitutor, &mut self.pool),
            names: NameGenerator::new("main", "foo", &self.counter, &self.interner),
            map: SymbolMap::new(),
            target: self.target,
            config,
        };
        collect::collect_children(&mut session, root)?;
        Ok(session.map)
    }

    pub(crate) fn dump(&self, node: &Node) -> String {
        crate::dump_node(node, &self.symbols, &self.pool, &self.interner)
    }
}

pub(crate) fn block(statements: Vec<Node>) -> Node {
    Node::Block(Block {
        span: Span::DUMMY,
        ty: Idx::UNIT,
        statements,
    })
}

pub(crate) fn int(value: i64) -> Node {
    Node::Const(Const {
        span: Span::DUMMY,
        ty: Idx::INT,
        value: ConstValue::Int(value),
    })
}

pub(crate) fn val(symbol: VariableId, initializer: Node) -> Node {
    Node::Variable(VariableDecl {
        span: Span::DUMMY,
        origin: Origin::Source,
        symbol,
        initializer: Some(Box::new(initializer)),
    })
}

pub(crate) fn get(symbol: impl Into<ValueId>) -> Node {
    Node::GetValue(GetValue {
        span: Span::DUMMY,
        origin: Origin::Source,
        symbol: symbol.into(),
    })
}

pub(crate) fn set(symbol: VariableId, value: Node) -> Node {
    Node::SetVariable(SetVariable {
        span: Span::DUMMY,
        origin: Origin::Source,
        symbol,
        value: Box::new(value),
    })
}

pub(crate) fn call(callee: impl Into<CallableId>, ty: Idx, arguments: Vec<Node>) -> Node {
    Node::Call(Call {
        span: Span::DUMMY,
        origin: Origin::Source,
        ty,
        callee: callee.into(),
        type_arguments: None,
        super_qualifier: None,
        dispatch_receiver: None,
        extension_receiver: None,
        arguments: arguments.into_iter().map(Some).collect(),
    })
}

pub(crate) fn ret(target: impl Into<CallableId>, value: Node) -> Node {
    Node::Return(Return {
        span: Span::DUMMY,
        ty: Idx::NEVER,
        target: target.into(),
        value: Box::new(value),
    })
}

pub(crate) fn fun(symbol: FunctionId, body: Node) -> Node {
    Node::Function(FunctionDecl {
        span: Span::DUMMY,
        origin: Origin::Source,
        symbol,
        body: Some(Box::new(body)),
    })
}

pub(crate) fn class(symbol: ClassId, declarations: Vec<Node>) -> Node {
    Node::Class(ClassDecl {
        span: Span::DUMMY,
        origin: Origin::Source,
        symbol,
        declarations,
    })
}

pub(crate) fn ctor(symbol: ConstructorId) -> Node {
    Node::Constructor(ConstructorDecl {
        span: Span::DUMMY,
        origin: Origin::Source,
        symbol,
        body: Box::new(block(vec![])),
    })
}
