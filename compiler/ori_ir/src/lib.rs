//! Ori IR primitives shared by the middle-end passes.
//!
//! This crate contains the leaf data structures every other crate in the
//! workspace builds on:
//! - [`Name`]: a 32-bit interned identifier
//! - [`StringInterner`]: the table behind every `Name`
//! - [`Span`]: compact source locations carried by IR nodes
//!
//! # Design Philosophy
//!
//! - **Intern Everything**: identifiers are `Name(u32)`, compared in O(1)
//! - **Copy handles**: everything here is `Copy` and 4-8 bytes wide, so IR
//!   nodes can embed them by value without lifetimes

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-allocated types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod interner;
mod name;
mod span;

pub use interner::{InternError, StringInterner};
pub use name::Name;
pub use span::Span;

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::{Name, Span};
    static_assert_size!(Name, 4);
    static_assert_size!(Span, 8);
}
