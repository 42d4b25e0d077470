//! Hygienic names for copied declarations.
//!
//! A copied declaration is named
//! `<target>_<inlined>_<original>_<n>`, where `target` is the function the
//! copy is placed into, `inlined` labels the function being inlined, and `n`
//! comes from a [`NameCounter`] shared by the whole compilation. The counter
//! never repeats a value, so no two generated names collide.

use std::sync::atomic::{AtomicU64, Ordering};

use ori_ir::{InternError, Name, StringInterner};

/// Monotonic source of name suffixes.
///
/// Create one per compilation (or use [`NameCounter::global`]) and share it
/// by reference with every copy session. Safe to share across threads.
#[derive(Debug, Default)]
pub struct NameCounter {
    next: AtomicU64,
}

static GLOBAL_COUNTER: NameCounter = NameCounter::new();

impl NameCounter {
    pub const fn new() -> Self {
        Self {
            next: AtomicU64::new(0),
        }
    }

    /// Process-wide counter.
    pub fn global() -> &'static NameCounter {
        &GLOBAL_COUNTER
    }

    /// Take the next suffix.
    #[inline]
    pub fn next(&self) -> u64 {
        // Uniqueness only needs the read-modify-write to be atomic.
        self.next.fetch_add(1, Ordering::Relaxed)
    }

    /// The suffix the next call to [`next`](Self::next) would return.
    pub fn peek(&self) -> u64 {
        self.next.load(Ordering::Relaxed)
    }
}

/// Generates names for one copy session.
#[derive(Clone, Copy)]
pub struct NameGenerator<'a> {
    target: &'a str,
    inlined: &'a str,
    counter: &'a NameCounter,
    interner: &'a StringInterner,
}

impl<'a> NameGenerator<'a> {
    pub fn new(
        target: &'a str,
        inlined: &'a str,
        counter: &'a NameCounter,
        interner: &'a StringInterner,
    ) -> Self {
        Self {
            target,
            inlined,
            counter,
            interner,
        }
    }

    /// A new, never-before-generated name derived from `original`.
    ///
    /// Fails only when the interner is full. The counter still advances.
    pub fn fresh(&self, original: Name) -> Result<Name, InternError> {
        let suffix = self.counter.next();
        let text = format!(
            "{}_{}_{}_{}",
            self.target,
            self.inlined,
            self.interner.lookup(original),
            suffix
        );
        self.interner.try_intern(&text)
    }

    pub fn inlined(&self) -> &'a str {
        self.inlined
    }
}

#[cfg(test)]
mod tests;
