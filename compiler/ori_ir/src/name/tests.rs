use super::*;

#[test]
fn raw_round_trip() {
    let name = Name::from_raw(42);
    assert_eq!(name.raw(), 42);
    assert_eq!(name.index(), 42);
}

#[test]
fn default_is_empty() {
    assert_eq!(Name::default(), Name::EMPTY);
    assert!(Name::EMPTY.is_empty());
    assert!(!Name::from_raw(1).is_empty());
}

#[test]
fn ordering_follows_raw_index() {
    assert!(Name::from_raw(1) < Name::from_raw(2));
}

#[test]
fn debug_shows_index() {
    assert_eq!(format!("{:?}", Name::from_raw(7)), "Name(7)");
}
