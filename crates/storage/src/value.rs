//! Outbound conversion into the driver's primitive kinds.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use maybe::Maybe;
use tracing::trace;

use crate::error::StorageError;

/// Primitive kinds understood by a storage driver.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum StorageKind {
    Int64,
    Float64,
    Bool,
    Bytes,
    Text,
    Timestamp,
    Custom,
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StorageKind::Int64 => "int64",
            StorageKind::Float64 => "float64",
            StorageKind::Bool => "bool",
            StorageKind::Bytes => "bytes",
            StorageKind::Text => "text",
            StorageKind::Timestamp => "timestamp",
            StorageKind::Custom => "custom",
        };
        f.write_str(name)
    }
}

/// A non-null value crossing the driver boundary. "No value" is the `None`
/// around it, never a variant.
#[derive(Clone, Debug)]
pub enum StorageValue {
    Int64(i64),
    Float64(f64),
    Bool(bool),
    Bytes(Vec<u8>),
    Text(String),
    Timestamp(DateTime<Utc>),
    /// Driver-specific value; the driver decides whether it accepts it.
    Custom(Arc<dyn Any + Send + Sync>),
}

impl StorageValue {
    pub fn custom<T: Any + Send + Sync>(value: T) -> Self {
        StorageValue::Custom(Arc::new(value))
    }

    pub fn kind(&self) -> StorageKind {
        match self {
            StorageValue::Int64(_) => StorageKind::Int64,
            StorageValue::Float64(_) => StorageKind::Float64,
            StorageValue::Bool(_) => StorageKind::Bool,
            StorageValue::Bytes(_) => StorageKind::Bytes,
            StorageValue::Text(_) => StorageKind::Text,
            StorageValue::Timestamp(_) => StorageKind::Timestamp,
            StorageValue::Custom(_) => StorageKind::Custom,
        }
    }

    pub fn downcast_custom<T: Any>(&self) -> Option<&T> {
        match self {
            StorageValue::Custom(v) => v.downcast_ref::<T>(),
            _ => None,
        }
    }
}

impl PartialEq for StorageValue {
    fn eq(&self, other: &Self) -> bool {
        use StorageValue::*;
        match (self, other) {
            (Int64(a), Int64(b)) => a == b,
            (Float64(a), Float64(b)) => a == b,
            (Bool(a), Bool(b)) => a == b,
            (Bytes(a), Bytes(b)) => a == b,
            (Text(a), Text(b)) => a == b,
            (Timestamp(a), Timestamp(b)) => a == b,
            // Custom values are opaque; only the same allocation compares equal.
            (Custom(a), Custom(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for StorageValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageValue::Int64(v) => write!(f, "{v}"),
            StorageValue::Float64(v) => write!(f, "{v}"),
            StorageValue::Bool(v) => write!(f, "{v}"),
            StorageValue::Bytes(v) => write!(f, "x'{}'", hex::encode(v)),
            StorageValue::Text(v) => write!(f, "{v:?}"),
            StorageValue::Timestamp(v) => {
                f.write_str(&v.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
            StorageValue::Custom(_) => f.write_str("<custom>"),
        }
    }
}

/// Conversion of a value into what a driver accepts. `Ok(None)` is the
/// "no value" marker.
///
/// Payload types with their own storage representation implement this
/// trait directly; `Maybe<T>` then delegates to it.
pub trait ToStorageValue {
    fn to_storage_value(&self) -> Result<Option<StorageValue>, StorageError>;
}

macro_rules! int_to_storage {
    ($($t:ty),*) => {
        $(
            impl ToStorageValue for $t {
                #[inline]
                fn to_storage_value(&self) -> Result<Option<StorageValue>, StorageError> {
                    // Unsigned values above i64::MAX wrap, matching the
                    // driver's own unchecked conversion.
                    Ok(Some(StorageValue::Int64(*self as i64)))
                }
            }
        )*
    };
}

int_to_storage!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl ToStorageValue for f32 {
    fn to_storage_value(&self) -> Result<Option<StorageValue>, StorageError> {
        Ok(Some(StorageValue::Float64(f64::from(*self))))
    }
}

impl ToStorageValue for f64 {
    fn to_storage_value(&self) -> Result<Option<StorageValue>, StorageError> {
        Ok(Some(StorageValue::Float64(*self)))
    }
}

impl ToStorageValue for bool {
    fn to_storage_value(&self) -> Result<Option<StorageValue>, StorageError> {
        Ok(Some(StorageValue::Bool(*self)))
    }
}

impl ToStorageValue for str {
    fn to_storage_value(&self) -> Result<Option<StorageValue>, StorageError> {
        Ok(Some(StorageValue::Text(self.to_owned())))
    }
}

impl ToStorageValue for String {
    fn to_storage_value(&self) -> Result<Option<StorageValue>, StorageError> {
        self.as_str().to_storage_value()
    }
}

impl ToStorageValue for [u8] {
    fn to_storage_value(&self) -> Result<Option<StorageValue>, StorageError> {
        Ok(Some(StorageValue::Bytes(self.to_vec())))
    }
}

impl ToStorageValue for Vec<u8> {
    fn to_storage_value(&self) -> Result<Option<StorageValue>, StorageError> {
        self.as_slice().to_storage_value()
    }
}

impl ToStorageValue for DateTime<Utc> {
    fn to_storage_value(&self) -> Result<Option<StorageValue>, StorageError> {
        Ok(Some(StorageValue::Timestamp(*self)))
    }
}

impl ToStorageValue for StorageValue {
    fn to_storage_value(&self) -> Result<Option<StorageValue>, StorageError> {
        Ok(Some(self.clone()))
    }
}

impl<T: ToStorageValue + ?Sized> ToStorageValue for &T {
    fn to_storage_value(&self) -> Result<Option<StorageValue>, StorageError> {
        (**self).to_storage_value()
    }
}

impl<T: ToStorageValue> ToStorageValue for Option<T> {
    fn to_storage_value(&self) -> Result<Option<StorageValue>, StorageError> {
        match self {
            Some(x) => x.to_storage_value(),
            None => Ok(None),
        }
    }
}

impl<T: ToStorageValue> ToStorageValue for Maybe<T> {
    fn to_storage_value(&self) -> Result<Option<StorageValue>, StorageError> {
        match self {
            Maybe::Just(x) => {
                let value = x.to_storage_value()?;
                trace!(kind = ?value.as_ref().map(StorageValue::kind), "converted present value");
                Ok(value)
            }
            Maybe::Nothing => Ok(None),
        }
    }
}
