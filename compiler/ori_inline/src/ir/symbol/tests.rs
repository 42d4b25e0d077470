use ori_ir::StringInterner;
use ori_types::Idx;
use pretty_assertions::assert_eq;

use super::*;
use crate::ir::ValueId;

#[test]
fn ids_are_assigned_in_order_per_kind() {
    let interner = StringInterner::new();
    let mut table = SymbolTable::new();

    let f = table.add_function(FunctionSymbol::new(
        interner.intern("f"),
        Owner::Module,
        Idx::UNIT,
    ));
    let g = table.add_function(FunctionSymbol::new(
        interner.intern("g"),
        Owner::Module,
        Idx::UNIT,
    ));
    let x = table.add_variable(VariableSymbol {
        name: interner.intern("x"),
        owner: Owner::Function(f),
        ty: Idx::INT,
        is_var: false,
    });

    assert_eq!(f.raw(), 0);
    assert_eq!(g.raw(), 1);
    // Variables have their own arena.
    assert_eq!(x.raw(), 0);
    assert_eq!(table.len(), 3);
    assert!(!table.is_empty());
}

#[test]
fn params_get_sequential_indices() {
    let interner = StringInterner::new();
    let mut table = SymbolTable::new();
    let f = table.add_function(FunctionSymbol::new(
        interner.intern("f"),
        Owner::Module,
        Idx::UNIT,
    ));

    let a = table.push_function_param(f, interner.intern("a"), Idx::INT, ParamFlags::empty());
    let b = table.push_function_param(
        f,
        interner.intern("b"),
        Idx::STR,
        ParamFlags::DECLARES_DEFAULT,
    );

    assert_eq!(table.params_of(CallableId::Function(f)), &[a, b]);
    assert_eq!(table.value_param(a).index, 0);
    assert_eq!(table.value_param(b).index, 1);
    assert_eq!(table.value_param(b).owner, CallableId::Function(f));
    assert!(table
        .value_param(b)
        .flags
        .contains(ParamFlags::DECLARES_DEFAULT));
    assert_eq!(table.value_param(a).root(a), a);
}

#[test]
fn declared_constructors_register_with_their_class() {
    let interner = StringInterner::new();
    let mut table = SymbolTable::new();
    let c = table.add_class(ClassSymbol::new(
        interner.intern("C"),
        Owner::Module,
        ClassKind::Class,
    ));

    let primary = table.declare_constructor(ConstructorSymbol::new(c, Idx::ANY, true));
    let secondary = table.declare_constructor(ConstructorSymbol::new(c, Idx::ANY, false));

    let class = table.class(c);
    assert_eq!(class.constructors.as_slice(), &[primary, secondary]);
    assert_eq!(class.primary_constructor, Some(primary));
    assert_eq!(table.name_of(SymbolRef::Constructor(secondary)), class.name);
}

#[test]
fn watermark_separates_old_and_new_symbols() {
    let interner = StringInterner::new();
    let mut table = SymbolTable::new();
    let old = table.add_function(FunctionSymbol::new(
        interner.intern("old"),
        Owner::Module,
        Idx::UNIT,
    ));
    let mark = table.watermark();
    let new = table.add_function(FunctionSymbol::new(
        interner.intern("new"),
        Owner::Module,
        Idx::UNIT,
    ));

    assert!(!mark.is_newer(old.into()));
    assert!(mark.is_newer(new.into()));
    assert!(mark.is_newer(SymbolRef::Variable(VariableId::new(0))));
}

#[test]
fn extends_detects_changed_prefix() {
    let interner = StringInterner::new();
    let mut table = SymbolTable::new();
    let f = table.add_function(FunctionSymbol::new(
        interner.intern("f"),
        Owner::Module,
        Idx::UNIT,
    ));
    let before = table.clone();

    table.add_variable(VariableSymbol {
        name: interner.intern("x"),
        owner: Owner::Function(f),
        ty: Idx::INT,
        is_var: true,
    });
    assert!(table.extends(&before));

    table.function_mut(f).is_inline = true;
    assert!(!table.extends(&before));
}

#[test]
fn symbol_refs_display_kind_and_index() {
    assert_eq!(SymbolRef::from(ClassId::new(3)).to_string(), "class#3");
    assert_eq!(
        SymbolRef::from(CallableId::Constructor(ConstructorId::new(1))).to_string(),
        "constructor#1"
    );
    assert_eq!(
        SymbolRef::from(ValueId::Param(ValueParamId::new(7))).to_string(),
        "param#7"
    );
}
