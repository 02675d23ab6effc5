//! Storage conversions looked up by payload type at run time.

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;

use chrono::{DateTime, Utc};
use maybe::PayloadType;
use storage::{FromStorageValue, StorageError, StorageValue, ToStorageValue};
use tracing::debug;

use crate::error::MapperError;
use crate::record::Record;

type ScanFn = fn(&StorageValue) -> Result<Box<dyn Any>, StorageError>;
type ValueFn = fn(&dyn Any) -> Result<Option<StorageValue>, StorageError>;

#[derive(Clone, Copy)]
struct Converter {
    scan: ScanFn,
    value: ValueFn,
}

fn scan_any<T: FromStorageValue + Any>(src: &StorageValue) -> Result<Box<dyn Any>, StorageError> {
    T::from_storage_value(src).map(|v| Box::new(v) as Box<dyn Any>)
}

fn value_any<T: ToStorageValue + Any>(v: &dyn Any) -> Result<Option<StorageValue>, StorageError> {
    match v.downcast_ref::<T>() {
        Some(v) => v.to_storage_value(),
        None => Err(StorageError::custom(format!("value is not a `{}`", type_name::<T>()))),
    }
}

/// A map from payload [`TypeId`] to its storage conversions.
///
/// [`Registry::new`] knows every primitive the storage protocol handles;
/// custom payloads are added with [`Registry::register`].
pub struct Registry {
    map: HashMap<TypeId, Converter>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    pub fn new() -> Self {
        let mut registry = Self { map: HashMap::new() };
        registry.register::<i8>();
        registry.register::<i16>();
        registry.register::<i32>();
        registry.register::<i64>();
        registry.register::<isize>();
        registry.register::<u8>();
        registry.register::<u16>();
        registry.register::<u32>();
        registry.register::<u64>();
        registry.register::<usize>();
        registry.register::<f32>();
        registry.register::<f64>();
        registry.register::<bool>();
        registry.register::<String>();
        registry.register::<Vec<u8>>();
        registry.register::<DateTime<Utc>>();
        registry
    }

    pub fn register<T>(&mut self)
    where
        T: FromStorageValue + ToStorageValue + Any,
    {
        let converter = Converter { scan: scan_any::<T>, value: value_any::<T> };
        self.map.insert(TypeId::of::<T>(), converter);
    }

    pub fn supports(&self, ty: &PayloadType) -> bool {
        self.map.contains_key(&ty.type_id)
    }

    fn converter(&self, name: &'static str, ty: PayloadType) -> Result<Converter, MapperError> {
        self.map.get(&ty.type_id).copied().ok_or(MapperError::UnsupportedType { name, ty })
    }

    /// Fills `record` from a storage row. A `None` column empties its
    /// field; columns missing from the row leave their field untouched.
    pub fn load<R: Record + ?Sized>(
        &self,
        record: &mut R,
        row: &[(&str, Option<StorageValue>)],
    ) -> Result<(), MapperError> {
        let mut fields = record.fields();
        for (column, value) in row {
            let field = fields
                .iter_mut()
                .find(|f| f.name == *column)
                .ok_or_else(|| MapperError::UnknownField((*column).to_owned()))?;
            let name = field.name;
            let Some(value) = value else {
                debug!(field = name, "loading null");
                field.slot.clear();
                continue;
            };
            let ty = field.slot.maybe_type();
            debug!(field = name, payload = ty.rust_name, kind = %value.kind(), "loading value");
            let boxed = (self.converter(name, ty)?.scan)(value)
                .map_err(|source| MapperError::Storage { name, source })?;
            field.slot.set_any(boxed).map_err(|source| MapperError::Bridge { name, source })?;
        }
        Ok(())
    }

    /// Converts every field of `record` into a storage row.
    pub fn store<R: Record + ?Sized>(
        &self,
        record: &mut R,
    ) -> Result<Vec<(&'static str, Option<StorageValue>)>, MapperError> {
        record
            .fields()
            .into_iter()
            .map(|field| -> Result<_, MapperError> {
                let name = field.name;
                let value = match field.slot.get_any() {
                    Some(v) => (self.converter(name, field.slot.maybe_type())?.value)(v)
                        .map_err(|source| MapperError::Storage { name, source })?,
                    None => None,
                };
                Ok((name, value))
            })
            .collect()
    }
}
