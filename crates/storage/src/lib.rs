//! Value protocol for a storage-driver boundary.
//!
//! Drivers accept a fixed set of primitive kinds ([`StorageValue`]). Outbound,
//! [`ToStorageValue`] narrows or widens payloads into those kinds and maps an
//! empty [`maybe::Maybe`] to "no value" (`None`). Inbound, [`Scanner`] fills a
//! `Maybe<T>` from a nullable driver value through [`scan_nullable`].

pub mod value;
pub mod scan;
pub mod error;

pub use value::*;
pub use scan::*;
pub use error::*;
