//! Type-erased access to any `Maybe<T>`.
//!
//! Reflection-driven callers (serializers, record mappers) see fields as
//! `&mut dyn MaybeIface` and never name `T`. Values cross the boundary as
//! `dyn Any` and are downcast with a checked conversion; a wrong type comes
//! back as [`MaybeError::TypeMismatch`] instead of a panic.

use core::any::{type_name, Any, TypeId};
use core::fmt;
use core::hash::{Hash, Hasher};

use tracing::{debug, trace};

use crate::error::MaybeError;
use crate::types::Maybe;

/// Run-time description of a payload type.
#[derive(Clone, Copy, Debug)]
pub struct PayloadType {
    /// `type_name` of the payload; only meant for messages and logs.
    pub rust_name: &'static str,

    /// Identity of the payload; equality and hashing use this alone.
    pub type_id: TypeId,

    pub size: usize,
    pub alignment: usize,
}

impl PayloadType {
    pub fn of<T: 'static>() -> Self {
        Self {
            rust_name: type_name::<T>(),
            type_id: TypeId::of::<T>(),
            size: core::mem::size_of::<T>(),
            alignment: core::mem::align_of::<T>(),
        }
    }

    pub fn is<T: 'static>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }
}

impl PartialEq for PayloadType {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for PayloadType {}

impl Hash for PayloadType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl fmt::Display for PayloadType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.rust_name)
    }
}

/// Non-generic interface over `Maybe<T>`.
///
/// Implemented for every `Maybe<T>` whose payload is `Any + Clone + Default`:
/// `set_from` copies out of a borrowed source and `set_valid` needs a value
/// to store in an empty instance. Payloads without `Default` (for example
/// `NonZeroU32`) get no bridge and must be wrapped in a type that has one.
pub trait MaybeIface {
    /// Stores `value` and marks the instance present.
    fn set_any(&mut self, value: Box<dyn Any>) -> Result<(), MaybeError>;

    /// Copies from `src`, or empties the instance when `src` is `None`.
    fn set_from(&mut self, src: Option<&dyn Any>) -> Result<(), MaybeError>;

    /// Empties the instance.
    fn clear(&mut self);

    /// Type-erased read; `None` when empty.
    fn get_any(&self) -> Option<&dyn Any>;

    /// Borrowed view into the stored value. Writes through it mutate the
    /// instance.
    fn get_any_mut(&mut self) -> Option<&mut dyn Any>;

    /// Marks the instance present. An empty instance gets the payload's
    /// default value; a present one is left untouched.
    fn set_valid(&mut self);

    /// The static payload type.
    fn maybe_type(&self) -> PayloadType;

    fn is_valid(&self) -> bool {
        self.get_any().is_some()
    }
}

/// Implemented by values that can hand out their [`MaybeIface`].
pub trait MaybeValue {
    fn maybe_iface(&mut self) -> &mut dyn MaybeIface;
}

fn mismatch<T: 'static>(found: TypeId) -> MaybeError {
    let expected = PayloadType::of::<T>();
    debug!(expected = expected.rust_name, ?found, "rejected dynamic value");
    MaybeError::TypeMismatch { expected, found }
}

impl<T> MaybeIface for Maybe<T>
where
    T: Any + Clone + Default,
{
    fn set_any(&mut self, value: Box<dyn Any>) -> Result<(), MaybeError> {
        let found = (*value).type_id();
        match value.downcast::<T>() {
            Ok(x) => {
                *self = Maybe::Just(*x);
                Ok(())
            }
            Err(_) => Err(mismatch::<T>(found)),
        }
    }

    fn set_from(&mut self, src: Option<&dyn Any>) -> Result<(), MaybeError> {
        let Some(src) = src else {
            self.clear();
            return Ok(());
        };
        match src.downcast_ref::<T>() {
            Some(x) => {
                *self = Maybe::Just(x.clone());
                Ok(())
            }
            None => Err(mismatch::<T>((*src).type_id())),
        }
    }

    fn clear(&mut self) {
        trace!(payload = type_name::<T>(), "cleared");
        *self = Maybe::Nothing;
    }

    fn get_any(&self) -> Option<&dyn Any> {
        self.pointer().map(|x| x as &dyn Any)
    }

    fn get_any_mut(&mut self) -> Option<&mut dyn Any> {
        self.pointer_mut().map(|x| x as &mut dyn Any)
    }

    fn set_valid(&mut self) {
        if self.is_nothing() {
            trace!(payload = type_name::<T>(), "marked present with default payload");
            *self = Maybe::Just(T::default());
        }
    }

    fn maybe_type(&self) -> PayloadType {
        PayloadType::of::<T>()
    }
}

impl<T> MaybeValue for Maybe<T>
where
    T: Any + Clone + Default,
{
    fn maybe_iface(&mut self) -> &mut dyn MaybeIface {
        self
    }
}
