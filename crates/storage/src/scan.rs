//! Inbound conversion from driver values.

use chrono::{DateTime, SecondsFormat, Utc};
use maybe::Maybe;
use tracing::trace;

use crate::error::StorageError;
use crate::value::StorageValue;

/// Conversion from a non-null driver value.
pub trait FromStorageValue: Sized {
    fn from_storage_value(src: &StorageValue) -> Result<Self, StorageError>;
}

/// Implemented by destinations a driver writes a nullable column into.
/// On error the destination keeps its previous contents.
pub trait Scanner {
    fn scan(&mut self, src: Option<&StorageValue>) -> Result<(), StorageError>;
}

/// The nullable scan primitive: `None` stays `None`, anything else goes
/// through `T`'s conversion.
pub fn scan_nullable<T: FromStorageValue>(
    src: Option<&StorageValue>,
) -> Result<Option<T>, StorageError> {
    src.map(T::from_storage_value).transpose()
}

/// A nullable column value with an explicit validity flag.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Null<T> {
    pub value: T,
    pub valid: bool,
}

impl<T: FromStorageValue + Default> Scanner for Null<T> {
    fn scan(&mut self, src: Option<&StorageValue>) -> Result<(), StorageError> {
        match scan_nullable::<T>(src)? {
            Some(value) => *self = Null { value, valid: true },
            None => *self = Null { value: T::default(), valid: false },
        }
        Ok(())
    }
}

impl<T: FromStorageValue> Scanner for Maybe<T> {
    fn scan(&mut self, src: Option<&StorageValue>) -> Result<(), StorageError> {
        *self = scan_nullable::<T>(src)?.into();
        trace!(present = self.is_just(), "scanned nullable value");
        Ok(())
    }
}

fn unsupported(src: &StorageValue, target: &'static str) -> StorageError {
    StorageError::UnsupportedConversion { from: src.kind(), target }
}

fn parse_error(input: &str, target: &'static str, reason: impl ToString) -> StorageError {
    StorageError::Parse { input: input.to_owned(), target, reason: reason.to_string() }
}

fn utf8<'a>(bytes: &'a [u8], target: &'static str) -> Result<&'a str, StorageError> {
    std::str::from_utf8(bytes).map_err(|e| parse_error(&hex::encode(bytes), target, e))
}

// Text and byte columns share one parse path for every scalar target.
fn text<'a>(src: &'a StorageValue, target: &'static str) -> Result<&'a str, StorageError> {
    match src {
        StorageValue::Text(s) => Ok(s.trim()),
        StorageValue::Bytes(b) => utf8(b, target).map(str::trim),
        other => Err(unsupported(other, target)),
    }
}

fn parse_text<T>(src: &StorageValue, target: &'static str) -> Result<T, StorageError>
where
    T: std::str::FromStr,
    T::Err: ToString,
{
    let s = text(src, target)?;
    s.parse::<T>().map_err(|e| parse_error(s, target, e))
}

macro_rules! int_from_storage {
    ($($t:ty),*) => {
        $(
            impl FromStorageValue for $t {
                fn from_storage_value(src: &StorageValue) -> Result<Self, StorageError> {
                    let target = stringify!($t);
                    match src {
                        StorageValue::Int64(v) => <$t>::try_from(*v).map_err(|_| {
                            StorageError::OutOfRange { value: v.to_string(), target }
                        }),
                        StorageValue::Float64(v) => {
                            if v.fract() != 0.0 || !v.is_finite() {
                                let input = v.to_string();
                                return Err(parse_error(&input, target, "not an integer"));
                            }
                            // Integral floats beyond i128 are out of range for every target.
                            let out_of_range = || {
                                StorageError::OutOfRange { value: v.to_string(), target }
                            };
                            if v.abs() >= 1e38 {
                                return Err(out_of_range());
                            }
                            <$t>::try_from(*v as i128).map_err(|_| out_of_range())
                        }
                        other => parse_text::<$t>(other, target),
                    }
                }
            }
        )*
    };
}

int_from_storage!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl FromStorageValue for f64 {
    fn from_storage_value(src: &StorageValue) -> Result<Self, StorageError> {
        match src {
            StorageValue::Float64(v) => Ok(*v),
            StorageValue::Int64(v) => Ok(*v as f64),
            other => parse_text::<f64>(other, "f64"),
        }
    }
}

impl FromStorageValue for f32 {
    fn from_storage_value(src: &StorageValue) -> Result<Self, StorageError> {
        match src {
            StorageValue::Float64(v) => {
                if v.is_finite() && v.abs() > f64::from(f32::MAX) {
                    return Err(StorageError::OutOfRange { value: v.to_string(), target: "f32" });
                }
                Ok(*v as f32)
            }
            StorageValue::Int64(v) => Ok(*v as f32),
            other => parse_text::<f32>(other, "f32"),
        }
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}

impl FromStorageValue for bool {
    fn from_storage_value(src: &StorageValue) -> Result<Self, StorageError> {
        match src {
            StorageValue::Bool(v) => Ok(*v),
            StorageValue::Int64(0) => Ok(false),
            StorageValue::Int64(1) => Ok(true),
            StorageValue::Int64(v) => {
                Err(StorageError::OutOfRange { value: v.to_string(), target: "bool" })
            }
            other => {
                let s = text(other, "bool")?;
                parse_bool(s).ok_or_else(|| parse_error(s, "bool", "not a boolean"))
            }
        }
    }
}

impl FromStorageValue for String {
    fn from_storage_value(src: &StorageValue) -> Result<Self, StorageError> {
        match src {
            StorageValue::Text(s) => Ok(s.clone()),
            StorageValue::Bytes(b) => utf8(b, "String").map(str::to_owned),
            StorageValue::Int64(v) => Ok(v.to_string()),
            StorageValue::Float64(v) => Ok(v.to_string()),
            StorageValue::Bool(v) => Ok(v.to_string()),
            StorageValue::Timestamp(t) => Ok(t.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            other => Err(unsupported(other, "String")),
        }
    }
}

impl FromStorageValue for Vec<u8> {
    fn from_storage_value(src: &StorageValue) -> Result<Self, StorageError> {
        match src {
            StorageValue::Bytes(b) => Ok(b.clone()),
            StorageValue::Text(s) => Ok(s.as_bytes().to_vec()),
            other => Err(unsupported(other, "Vec<u8>")),
        }
    }
}

impl FromStorageValue for DateTime<Utc> {
    fn from_storage_value(src: &StorageValue) -> Result<Self, StorageError> {
        match src {
            StorageValue::Timestamp(t) => Ok(*t),
            other => {
                let s = text(other, "DateTime<Utc>")?;
                DateTime::parse_from_rfc3339(s)
                    .map(|t| t.with_timezone(&Utc))
                    .map_err(|e| parse_error(s, "DateTime<Utc>", e))
            }
        }
    }
}

impl FromStorageValue for StorageValue {
    fn from_storage_value(src: &StorageValue) -> Result<Self, StorageError> {
        Ok(src.clone())
    }
}
