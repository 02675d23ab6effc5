//! Maybe: an optional-value sum type for code that mixes static generics with
//! reflection-driven frameworks.
//!
//! [`Maybe<T>`] is either [`Maybe::Nothing`] or [`Maybe::Just`]. Generic code
//! works with it through the combinators in [`fmap`]; code that cannot name
//! `T` goes through the type-erased [`MaybeIface`] bridge.

pub mod types;
pub mod fmap;
pub mod iface;
pub mod error;
#[cfg(feature = "serde")]
pub mod encode;

// Re-export all public items from modules for convenience
pub use types::*;
pub use fmap::*;
pub use iface::*;
pub use error::*;
