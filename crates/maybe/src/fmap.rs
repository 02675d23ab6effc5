//! Functor and monad combinators. These only look at the public state of
//! [`Maybe`]; nothing here goes through the type-erased bridge.

use crate::types::{identity, Maybe};

/// The functorial map.
pub fn fmap<T, U, F>(f: F, x: Maybe<T>) -> Maybe<U>
where
    F: FnOnce(T) -> U,
{
    match x {
        Maybe::Just(x) => Maybe::Just(f(x)),
        Maybe::Nothing => Maybe::Nothing,
    }
}

/// The functorial map for a possibly erring function.
///
/// An empty input yields `Ok(Nothing)` without calling `f`. If `f` fails the
/// error is returned as is and no partial result survives.
pub fn fallible_fmap<T, U, E, F>(f: F, x: Maybe<T>) -> Result<Maybe<U>, E>
where
    F: FnOnce(T) -> Result<U, E>,
{
    match x {
        Maybe::Just(x) => f(x).map(Maybe::Just),
        Maybe::Nothing => Ok(Maybe::Nothing),
    }
}

/// The monadic bind; `f` decides whether the result is present.
pub fn bind<T, U, F>(f: F, x: Maybe<T>) -> Maybe<U>
where
    F: FnOnce(T) -> Maybe<U>,
{
    match x {
        Maybe::Just(x) => f(x),
        Maybe::Nothing => Maybe::Nothing,
    }
}

/// The monadic join.
pub fn join<T>(x: Maybe<Maybe<T>>) -> Maybe<T> {
    bind(identity, x)
}

impl<T> Maybe<T> {
    #[inline]
    pub fn map<U, F>(self, f: F) -> Maybe<U>
    where
        F: FnOnce(T) -> U,
    {
        fmap(f, self)
    }

    #[inline]
    pub fn try_map<U, E, F>(self, f: F) -> Result<Maybe<U>, E>
    where
        F: FnOnce(T) -> Result<U, E>,
    {
        fallible_fmap(f, self)
    }

    #[inline]
    pub fn and_then<U, F>(self, f: F) -> Maybe<U>
    where
        F: FnOnce(T) -> Maybe<U>,
    {
        bind(f, self)
    }
}

impl<T> Maybe<Maybe<T>> {
    #[inline]
    pub fn flatten(self) -> Maybe<T> {
        join(self)
    }
}
