use core::any::TypeId;

use thiserror::Error;

use crate::iface::PayloadType;

/// Failures reported by the type-erased bridge.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MaybeError {
    /// A dynamic value did not have the payload type of the target.
    #[error("type mismatch: expected `{expected}`, found {found:?}")]
    TypeMismatch { expected: PayloadType, found: TypeId },
}
