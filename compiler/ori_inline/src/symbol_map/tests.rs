use pretty_assertions::assert_eq;

use super::*;

#[test]
fn unmapped_lookups_fall_back() {
    let map = SymbolMap::new();
    let f = FunctionId::new(3);
    assert_eq!(map.get(f), None);
    assert_eq!(map.get_or_same(f), f);
    assert_eq!(map.callable(CallableId::Function(f)), None);
    assert!(map.is_empty());
}

#[test]
fn kinds_are_kept_apart() {
    let mut map = SymbolMap::new();
    assert_eq!(map.insert(VariableId::new(0), VariableId::new(10)), Ok(()));
    assert_eq!(map.insert(ValueParamId::new(0), ValueParamId::new(20)), Ok(()));

    assert_eq!(
        map.value(ValueId::Variable(VariableId::new(0))),
        Some(ValueId::Variable(VariableId::new(10)))
    );
    assert_eq!(
        map.value(ValueId::Param(ValueParamId::new(0))),
        Some(ValueId::Param(ValueParamId::new(20)))
    );
    assert!(!map.contains(ClassId::new(0)));
    assert_eq!(map.len(), 2);
}

#[test]
fn second_insert_of_same_original_is_rejected() {
    let mut map = SymbolMap::new();
    let c = ClassId::new(1);
    assert_eq!(map.insert(c, ClassId::new(5)), Ok(()));
    assert_eq!(
        map.insert(c, ClassId::new(6)),
        Err(CopyError::DuplicateDeclaration { symbol: c.into() })
    );
    // The first copy wins.
    assert_eq!(map.get(c), Some(ClassId::new(5)));
}

#[test]
fn copied_originals_are_recognised() {
    let mut map = SymbolMap::new();
    let ctor = ConstructorId::new(2);
    assert_eq!(map.insert(ctor, ConstructorId::new(7)), Ok(()));

    assert!(map.is_copied_original(ctor.into()));
    assert!(!map.is_copied_original(ConstructorId::new(7).into()));
    assert!(!map.is_copied_original(SymbolRef::TypeParam(crate::ir::TypeParamId::new(0))));
}

#[test]
fn entries_are_sorted_by_kind_then_id() {
    let mut map = SymbolMap::new();
    assert_eq!(map.insert(VariableId::new(4), VariableId::new(9)), Ok(()));
    assert_eq!(map.insert(VariableId::new(1), VariableId::new(8)), Ok(()));
    assert_eq!(map.insert(ClassId::new(0), ClassId::new(3)), Ok(()));

    assert_eq!(
        map.entries(),
        vec![
            (
                SymbolRef::Class(ClassId::new(0)),
                SymbolRef::Class(ClassId::new(3))
            ),
            (
                SymbolRef::Variable(VariableId::new(1)),
                SymbolRef::Variable(VariableId::new(8))
            ),
            (
                SymbolRef::Variable(VariableId::new(4)),
                SymbolRef::Variable(VariableId::new(9))
            ),
        ]
    );
}
