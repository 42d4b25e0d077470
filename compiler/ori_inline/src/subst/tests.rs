use ori_ir::StringInterner;
use ori_types::{ParamSubstitution, TypeProjection};
use pretty_assertions::assert_eq;

use super::*;
use crate::ir::TypeParamId;

#[test]
fn without_substitutor_types_pass_through() {
    let mut pool = Pool::new();
    let mut adapter = SubstitutionAdapter::new(None, &mut pool);

    assert!(adapter.is_identity());
    assert_eq!(adapter.substitute(Idx::INT), Idx::INT);
    assert_eq!(adapter.substitute_opt(None), None);
    assert_eq!(adapter.substitute_type_arguments(None), None);
}

#[test]
fn substitutes_at_invariant_variance() {
    let interner = StringInterner::new();
    let mut pool = Pool::new();
    let t = pool.type_param(interner.intern("T"));
    let list_t = pool.list(t);
    let subst = ParamSubstitution::new().with(t, Idx::STR);

    let mut adapter = SubstitutionAdapter::new(Some(&subst), &mut pool);
    assert_eq!(adapter.substitute(t), Idx::STR);
    assert_eq!(adapter.substitute_opt(Some(t)), Some(Idx::STR));
    let list = adapter.substitute(list_t);
    assert_eq!(pool.display(list, &interner), "[str]");
}

#[test]
fn failed_substitution_keeps_original() {
    let interner = StringInterner::new();
    let mut pool = Pool::new();
    let t = pool.type_param(interner.intern("T"));
    let mut subst = ParamSubstitution::new();
    // A covariant projection cannot stand in an invariant position.
    subst.insert_projection(t, TypeProjection::covariant(Idx::INT));

    let mut adapter = SubstitutionAdapter::new(Some(&subst), &mut pool);
    assert_eq!(adapter.substitute(t), t);
}

#[test]
fn type_argument_keys_are_kept() {
    let interner = StringInterner::new();
    let mut pool = Pool::new();
    let t = pool.type_param(interner.intern("T"));
    let subst = ParamSubstitution::new().with(t, Idx::BOOL);
    let param = TypeParamId::new(0);
    let args: TypeArguments = [(param, t)].into_iter().collect();

    let mut adapter = SubstitutionAdapter::new(Some(&subst), &mut pool);
    let new_args = adapter.substitute_type_arguments(Some(&args));
    assert_eq!(
        new_args.map(|a| a.iter().collect::<Vec<_>>()),
        Some(vec![(param, Idx::BOOL)])
    );
}
