//! The sum-type core: construction and guarded accessors.

use core::fmt;

/// A value that is either absent or exactly one `T`.
///
/// Accessors never hand out a payload for [`Maybe::Nothing`]; they take a
/// caller-supplied default or fall back to `T::default()`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Maybe<T> {
    Nothing,
    Just(T),
}

impl<T> Default for Maybe<T> {
    fn default() -> Self {
        Maybe::Nothing
    }
}

/// Returns an instance holding `x`.
pub fn unit<T>(x: T) -> Maybe<T> {
    Maybe::Just(x)
}

/// Returns an empty instance.
pub fn nothing<T>() -> Maybe<T> {
    Maybe::Nothing
}

/// The identity function.
pub fn identity<T>(x: T) -> T {
    x
}

impl<T> Maybe<T> {
    #[inline]
    pub const fn just(x: T) -> Self {
        Maybe::Just(x)
    }

    #[inline]
    pub const fn nothing() -> Self {
        Maybe::Nothing
    }

    /// Builds an instance from a borrowed, possibly missing value. The
    /// referent is cloned; nothing is taken from the caller.
    pub fn new(x: Option<&T>) -> Self
    where
        T: Clone,
    {
        match x {
            Some(x) => Maybe::Just(x.clone()),
            None => Maybe::Nothing,
        }
    }

    pub const fn is_just(&self) -> bool {
        matches!(self, Maybe::Just(_))
    }

    pub const fn is_nothing(&self) -> bool {
        matches!(self, Maybe::Nothing)
    }

    /// Returns the value and `true`, or `T::default()` and `false`.
    pub fn get(&self) -> (T, bool)
    where
        T: Clone + Default,
    {
        match self {
            Maybe::Just(x) => (x.clone(), true),
            Maybe::Nothing => (T::default(), false),
        }
    }

    /// Returns the value if present and `default` otherwise.
    pub fn get_or(self, default: T) -> T {
        match self {
            Maybe::Just(x) => x,
            Maybe::Nothing => default,
        }
    }

    /// Returns the value if present and `T::default()` otherwise.
    pub fn get_or_zero(self) -> T
    where
        T: Default,
    {
        match self {
            Maybe::Just(x) => x,
            Maybe::Nothing => T::default(),
        }
    }

    /// Borrows the stored value, or `None` when there is none. The borrow
    /// cannot outlive `self`.
    pub const fn pointer(&self) -> Option<&T> {
        match self {
            Maybe::Just(x) => Some(x),
            Maybe::Nothing => None,
        }
    }

    /// Mutable counterpart of [`Maybe::pointer`]; writes go straight into
    /// the instance.
    pub fn pointer_mut(&mut self) -> Option<&mut T> {
        match self {
            Maybe::Just(x) => Some(x),
            Maybe::Nothing => None,
        }
    }

    pub const fn as_ref(&self) -> Maybe<&T> {
        match self {
            Maybe::Just(x) => Maybe::Just(x),
            Maybe::Nothing => Maybe::Nothing,
        }
    }

    pub fn as_mut(&mut self) -> Maybe<&mut T> {
        match self {
            Maybe::Just(x) => Maybe::Just(x),
            Maybe::Nothing => Maybe::Nothing,
        }
    }

    pub fn into_option(self) -> Option<T> {
        self.into()
    }

    /// Takes the value out, leaving `Nothing` behind.
    pub fn take(&mut self) -> Maybe<T> {
        core::mem::take(self)
    }

    /// Stores `x`, returning whatever was there before.
    pub fn replace(&mut self, x: T) -> Maybe<T> {
        core::mem::replace(self, Maybe::Just(x))
    }
}

impl<T> From<Option<T>> for Maybe<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(x) => Maybe::Just(x),
            None => Maybe::Nothing,
        }
    }
}

impl<T> From<Maybe<T>> for Option<T> {
    fn from(value: Maybe<T>) -> Self {
        match value {
            Maybe::Just(x) => Some(x),
            Maybe::Nothing => None,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Maybe<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Maybe::Just(x) => x.fmt(f),
            Maybe::Nothing => f.write_str("null"),
        }
    }
}
