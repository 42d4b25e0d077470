//! Human-readable IR dumps.
//!
//! One line per node, children indented by two spaces. Symbols are printed
//! by name and types in source syntax, so a dump of a copied tree shows the
//! generated names directly.

use std::fmt::Write as _;

use ori_ir::StringInterner;
use ori_types::{Idx, Pool};

use super::{CallableId, ConstValue, Node, SymbolTable, TypeArguments, ValueId};

/// Render `node` and everything below it.
pub fn dump_node(
    node: &Node,
    symbols: &SymbolTable,
    pool: &Pool,
    interner: &StringInterner,
) -> String {
    let mut dumper = Dumper {
        out: String::new(),
        symbols,
        pool,
        interner,
    };
    dumper.node(node, 0);
    dumper.out
}

struct Dumper<'a> {
    out: String,
    symbols: &'a SymbolTable,
    pool: &'a Pool,
    interner: &'a StringInterner,
}

impl Dumper<'_> {
    fn node(&mut self, node: &Node, depth: usize) {
        for _ in 0..depth {
            self.out.push_str("  ");
        }
        self.header(node);
        self.out.push('\n');
        for child in node.children() {
            crate::stack::ensure_sufficient_stack(|| self.node(child, depth + 1));
        }
    }

    fn ty(&self, idx: Idx) -> String {
        self.pool.display(idx, self.interner)
    }

    fn callable(&self, callable: CallableId) -> String {
        match callable {
            CallableId::Function(id) => {
                self.interner.lookup(self.symbols.function(id).name).to_owned()
            }
            CallableId::Constructor(id) => {
                let class = self.symbols.constructor(id).class;
                format!("{}.<init>", self.interner.lookup(self.symbols.class(class).name))
            }
        }
    }

    fn value(&self, value: ValueId) -> &'static str {
        let name = match value {
            ValueId::Variable(id) => self.symbols.variable(id).name,
            ValueId::Param(id) => self.symbols.value_param(id).name,
        };
        self.interner.lookup(name)
    }

    fn params(&self, callable: CallableId) -> String {
        let mut out = String::new();
        for (i, &param) in self.symbols.params_of(callable).iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            let param = self.symbols.value_param(param);
            let _ = write!(
                out,
                "{}: {}",
                self.interner.lookup(param.name),
                self.ty(param.ty)
            );
        }
        out
    }

    fn type_args(&self, args: Option<&TypeArguments>) -> String {
        let Some(args) = args.filter(|args| !args.is_empty()) else {
            return String::new();
        };
        let rendered: Vec<String> = args
            .iter()
            .map(|(param, ty)| {
                format!(
                    "{}={}",
                    self.interner.lookup(self.symbols.type_param(param).name),
                    self.ty(ty)
                )
            })
            .collect();
        format!("<{}>", rendered.join(", "))
    }

    fn header(&mut self, node: &Node) {
        let line = match node {
            Node::Class(decl) => {
                let class = self.symbols.class(decl.symbol);
                format!("class {}", self.interner.lookup(class.name))
            }
            Node::Function(decl) => {
                let callable = CallableId::Function(decl.symbol);
                format!(
                    "fun {}({}): {}",
                    self.callable(callable),
                    self.params(callable),
                    self.ty(self.symbols.function(decl.symbol).return_type)
                )
            }
            Node::Constructor(decl) => {
                let callable = CallableId::Constructor(decl.symbol);
                format!("constructor {}({})", self.callable(callable), self.params(callable))
            }
            Node::Variable(decl) => {
                let var = self.symbols.variable(decl.symbol);
                format!(
                    "{} {}: {}",
                    if var.is_var { "var" } else { "val" },
                    self.interner.lookup(var.name),
                    self.ty(var.ty)
                )
            }
            Node::Call(call) => {
                let mut line = format!(
                    "call {}{}: {}",
                    self.callable(call.callee),
                    self.type_args(call.type_arguments.as_ref()),
                    self.ty(call.ty)
                );
                if let Some(class) = call.super_qualifier {
                    let _ = write!(
                        line,
                        " super={}",
                        self.interner.lookup(self.symbols.class(class).name)
                    );
                }
                line
            }
            Node::CallableReference(reference) => format!(
                "ref {}{}: {}",
                self.callable(reference.target),
                self.type_args(reference.type_arguments.as_ref()),
                self.ty(reference.ty)
            ),
            Node::Return(ret) => format!("return@{}", self.callable(ret.target)),
            Node::GetValue(get) => format!("get {}", self.value(get.symbol)),
            Node::SetVariable(set) => format!(
                "set {}",
                self.value(ValueId::Variable(set.symbol))
            ),
            Node::Block(block) => format!("block: {}", self.ty(block.ty)),
            Node::Const(c) => {
                let value = match &c.value {
                    ConstValue::Int(v) => v.to_string(),
                    ConstValue::Bool(v) => v.to_string(),
                    ConstValue::Char(v) => format!("{v:?}"),
                    ConstValue::Str(name) => format!("{:?}", self.interner.lookup(*name)),
                    ConstValue::Unit => "()".to_owned(),
                    ConstValue::Null => "null".to_owned(),
                };
                format!("const {value}: {}", self.ty(c.ty))
            }
            Node::When(when) => format!("when: {}", self.ty(when.ty)),
            Node::While(_) => "while".to_owned(),
            Node::TypeOperator(op) => format!(
                "{} {}: {}",
                op.operator.as_str(),
                self.ty(op.operand_type),
                self.ty(op.ty)
            ),
        };
        self.out.push_str(&line);
    }
}
