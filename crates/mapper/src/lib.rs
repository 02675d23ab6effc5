//! Record mapper that never names payload types.
//!
//! A [`Record`] exposes its optional fields as `&mut dyn MaybeIface`. Everything
//! here works through that bridge: field descriptions come from
//! [`MaybeIface::maybe_type`], copies go through `get_any`/`set_from`, and
//! storage rows are converted with a [`Registry`] keyed by payload type.

pub mod record;
pub mod registry;
pub mod error;

pub use record::*;
pub use registry::*;
pub use error::*;
