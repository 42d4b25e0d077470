use super::*;

#[test]
fn propagated_keeps_only_presence_flags() {
    let flags = TypeFlags::HAS_PARAM | TypeFlags::IS_PARAM | TypeFlags::IS_NAMED;
    assert_eq!(flags.propagated(), TypeFlags::HAS_PARAM);
}

#[test]
fn needs_subst_tracks_param_presence() {
    assert!(TypeFlags::HAS_PARAM.needs_subst());
    assert!(!(TypeFlags::IS_PRIMITIVE | TypeFlags::HAS_ERROR).needs_subst());
}
