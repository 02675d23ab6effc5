use chrono::{TimeZone, Utc};
use maybe::{nothing, unit, Maybe};
use storage::{StorageError, StorageKind, StorageValue, ToStorageValue};

/// A payload with its own storage representation.
#[derive(Clone, Debug, PartialEq)]
struct Cents(u32);

impl ToStorageValue for Cents {
    fn to_storage_value(&self) -> Result<Option<StorageValue>, StorageError> {
        Ok(Some(StorageValue::Text(format!("{}.{:02}", self.0 / 100, self.0 % 100))))
    }
}

struct Broken;

impl ToStorageValue for Broken {
    fn to_storage_value(&self) -> Result<Option<StorageValue>, StorageError> {
        Err(StorageError::custom("broken payload"))
    }
}

#[test]
fn integers_widen_to_int64() -> anyhow::Result<()> {
    assert_eq!(unit(7u8).to_storage_value()?, Some(StorageValue::Int64(7)));
    assert_eq!(unit(-7i8).to_storage_value()?, Some(StorageValue::Int64(-7)));
    assert_eq!(unit(65_000u16).to_storage_value()?, Some(StorageValue::Int64(65_000)));
    assert_eq!(unit(-70_000i32).to_storage_value()?, Some(StorageValue::Int64(-70_000)));
    assert_eq!(unit(u32::MAX).to_storage_value()?, Some(StorageValue::Int64(i64::from(u32::MAX))));
    assert_eq!(unit(i64::MIN).to_storage_value()?, Some(StorageValue::Int64(i64::MIN)));
    assert_eq!(unit(12usize).to_storage_value()?, Some(StorageValue::Int64(12)));
    assert_eq!(unit(-12isize).to_storage_value()?, Some(StorageValue::Int64(-12)));
    assert_eq!(unit(1u64 << 40).to_storage_value()?, Some(StorageValue::Int64(1 << 40)));
    Ok(())
}

#[test]
fn floats_widen_to_float64() -> anyhow::Result<()> {
    assert_eq!(unit(1.5f32).to_storage_value()?, Some(StorageValue::Float64(1.5)));
    assert_eq!(unit(0.1f32).to_storage_value()?, Some(StorageValue::Float64(f64::from(0.1f32))));
    assert_eq!(unit(0.1f64).to_storage_value()?, Some(StorageValue::Float64(0.1)));
    Ok(())
}

#[test]
fn pass_through_kinds() -> anyhow::Result<()> {
    let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    assert_eq!(unit(true).to_storage_value()?, Some(StorageValue::Bool(true)));
    assert_eq!(unit("hi".to_string()).to_storage_value()?, Some(StorageValue::Text("hi".into())));
    assert_eq!(unit("hi").to_storage_value()?, Some(StorageValue::Text("hi".into())));
    assert_eq!(unit(vec![1u8, 2]).to_storage_value()?, Some(StorageValue::Bytes(vec![1, 2])));
    assert_eq!(unit(at).to_storage_value()?, Some(StorageValue::Timestamp(at)));
    Ok(())
}

#[test]
fn empty_is_no_value() -> anyhow::Result<()> {
    assert_eq!(nothing::<String>().to_storage_value()?, None);
    assert_eq!(nothing::<u8>().to_storage_value()?, None);
    assert_eq!(nothing::<Broken>().to_storage_value()?, None);
    Ok(())
}

#[test]
fn custom_conversion_is_delegated() -> anyhow::Result<()> {
    assert_eq!(unit(Cents(1234)).to_storage_value()?, Some(StorageValue::Text("12.34".into())));
    assert_eq!(unit(Broken).to_storage_value(), Err(StorageError::Custom("broken payload".into())));
    Ok(())
}

#[test]
fn driver_specific_values() -> anyhow::Result<()> {
    let v = StorageValue::custom([1u32, 2, 3]);
    let out = Maybe::Just(v.clone()).to_storage_value()?.expect("present");
    assert_eq!(out.kind(), StorageKind::Custom);
    assert_eq!(out.downcast_custom::<[u32; 3]>(), Some(&[1, 2, 3]));
    assert_eq!(out, v);
    assert_ne!(StorageValue::custom(1u8), StorageValue::custom(1u8));
    Ok(())
}

#[test]
fn display_and_kind() {
    assert_eq!(StorageValue::Bytes(vec![0xde, 0xad]).to_string(), "x'dead'");
    assert_eq!(StorageValue::Text("a".into()).to_string(), "\"a\"");
    assert_eq!(StorageValue::Int64(3).kind(), StorageKind::Int64);
    assert_eq!(StorageKind::Timestamp.to_string(), "timestamp");
    let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    assert_eq!(StorageValue::Timestamp(at).to_string(), "2024-03-01T12:00:00Z");
}
