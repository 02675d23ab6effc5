use thiserror::Error;

use crate::value::StorageKind;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("cannot convert {from} value into `{target}`")]
    UnsupportedConversion { from: StorageKind, target: &'static str },

    #[error("value {value} out of range for `{target}`")]
    OutOfRange { value: String, target: &'static str },

    #[error("cannot parse {input:?} as `{target}`: {reason}")]
    Parse { input: String, target: &'static str, reason: String },

    /// Raised by user conversions.
    #[error("{0}")]
    Custom(String),
}

impl StorageError {
    pub fn custom(msg: impl std::fmt::Display) -> Self {
        StorageError::Custom(msg.to_string())
    }
}
