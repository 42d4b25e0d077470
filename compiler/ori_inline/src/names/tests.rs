#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use std::thread;

use ori_ir::StringInterner;
use pretty_assertions::assert_eq;
use rustc_hash::FxHashSet;

use super::*;

#[test]
fn names_follow_target_label_original_counter() {
    let interner = StringInterner::new();
    let counter = NameCounter::new();
    let names = NameGenerator::new("main", "foo", &counter, &interner);
    let x = interner.intern("x");

    assert_eq!(interner.lookup(names.fresh(x).unwrap()), "main_foo_x_0");
    assert_eq!(interner.lookup(names.fresh(x).unwrap()), "main_foo_x_1");
    assert_eq!(counter.peek(), 2);
}

#[test]
fn counter_is_shared_between_sessions() {
    let interner = StringInterner::new();
    let counter = NameCounter::new();
    let first = NameGenerator::new("main", "foo", &counter, &interner);
    let second = NameGenerator::new("main", "bar", &counter, &interner);
    let y = interner.intern("y");

    assert_eq!(interner.lookup(first.fresh(y).unwrap()), "main_foo_y_0");
    assert_eq!(interner.lookup(second.fresh(y).unwrap()), "main_bar_y_1");
    assert_eq!(second.inlined(), "bar");
}

#[test]
fn same_call_sequence_is_reproducible() {
    let run = || {
        let interner = StringInterner::new();
        let counter = NameCounter::new();
        let names = NameGenerator::new("t", "l", &counter, &interner);
        ["a", "b", "a"]
            .iter()
            .map(|s| interner.lookup(names.fresh(interner.intern(s)).unwrap()).to_owned())
            .collect::<Vec<_>>()
    };
    assert_eq!(run(), run());
    assert_eq!(run(), vec!["t_l_a_0", "t_l_b_1", "t_l_a_2"]);
}

#[test]
fn concurrent_sessions_never_collide() {
    let interner = StringInterner::new();
    let counter = NameCounter::new();
    let v = interner.intern("v");

    let all: Vec<Name> = thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                scope.spawn(|| {
                    let names = NameGenerator::new("main", "f", &counter, &interner);
                    (0..250).map(|_| names.fresh(v).unwrap()).collect::<Vec<_>>()
                })
            })
            .collect();
        handles
            .into_iter()
            .flat_map(|h| h.join().unwrap_or_default())
            .collect()
    });

    let unique: FxHashSet<Name> = all.iter().copied().collect();
    assert_eq!(all.len(), 1000);
    assert_eq!(unique.len(), 1000);
    assert_eq!(counter.peek(), 1000);
}

#[test]
fn global_counter_is_a_singleton() {
    assert!(std::ptr::eq(NameCounter::global(), NameCounter::global()));
}
