//! Macros for reducing boilerplate in typed arena identifiers.
//!
//! Provides `arena_id!`, which defines a copyable index newtype and wires it
//! into [`crate::arena::ArenaId`] so it can key an [`crate::arena::Arena`].
//!
//! # Examples
//!
//! ```rust
//! use flipside::arena_id;
//! use flipside::arena::ArenaId;
//!
//! arena_id! {
//!     /// Example identifier
//!     pub struct ExampleId;
//! }
//!
//! assert_eq!(ExampleId::from_index(3).index(), 3);
//! ```
/// Defines a copyable index newtype implementing [`crate::arena::ArenaId`].
#[macro_export]
macro_rules! arena_id {
    ($(#[$meta:meta])* $vis:vis struct $name:ident;) => {
        $(#[$meta])*
        #[derive(
            Clone,
            Copy,
            Debug,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
        )]
        $vis struct $name(pub usize);

        impl $crate::arena::ArenaId for $name {
            fn from_index(index: usize) -> Self {
                Self(index)
            }

            fn index(self) -> usize {
                self.0
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "{}#{}", stringify!($name), self.0)
            }
        }
    };
}
