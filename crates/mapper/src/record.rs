use maybe::{MaybeIface, PayloadType};
use tracing::trace;

use crate::error::MapperError;

/// A named optional field, seen through the bridge.
pub struct Field<'a> {
    pub name: &'static str,
    pub slot: &'a mut dyn MaybeIface,
}

impl<'a> Field<'a> {
    pub fn new(name: &'static str, slot: &'a mut dyn MaybeIface) -> Self {
        Self { name, slot }
    }
}

/// Implemented by structs whose optional fields a mapper may walk.
pub trait Record {
    fn fields(&mut self) -> Vec<Field<'_>>;
}

/// Field names with their payload types, in declaration order.
pub fn describe<R: Record + ?Sized>(record: &mut R) -> Vec<(&'static str, PayloadType)> {
    record.fields().iter().map(|f| (f.name, f.slot.maybe_type())).collect()
}

/// Names of the fields currently holding a value.
pub fn present_fields<R: Record + ?Sized>(record: &mut R) -> Vec<&'static str> {
    record.fields().iter().filter(|f| f.slot.is_valid()).map(|f| f.name).collect()
}

/// Empties every field.
pub fn clear<R: Record + ?Sized>(record: &mut R) {
    for field in record.fields().iter_mut() {
        field.slot.clear();
    }
}

/// Copies every field of `src` into the field of the same name in `dst`.
///
/// Fields are matched by name and must share the payload type. On error the
/// fields copied so far keep their new values.
pub fn copy_into<S, D>(src: &mut S, dst: &mut D) -> Result<(), MapperError>
where
    S: Record + ?Sized,
    D: Record + ?Sized,
{
    let mut targets = dst.fields();
    for field in src.fields() {
        let target = targets
            .iter_mut()
            .find(|t| t.name == field.name)
            .ok_or_else(|| MapperError::UnknownField(field.name.to_owned()))?;
        target
            .slot
            .set_from(field.slot.get_any())
            .map_err(|source| MapperError::Bridge { name: field.name, source })?;
        trace!(field = field.name, present = target.slot.is_valid(), "copied field");
    }
    Ok(())
}
