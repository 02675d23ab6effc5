use maybe::{MaybeError, PayloadType};
use storage::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MapperError {
    #[error("record has no field `{0}`")]
    UnknownField(String),

    #[error("field `{name}`: no storage conversion registered for `{ty}`")]
    UnsupportedType { name: &'static str, ty: PayloadType },

    #[error("field `{name}`: {source}")]
    Bridge { name: &'static str, source: MaybeError },

    #[error("field `{name}`: {source}")]
    Storage { name: &'static str, source: StorageError },
}
