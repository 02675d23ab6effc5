use std::any::Any;

use maybe::{nothing, unit, Maybe, MaybeError, MaybeIface, MaybeValue, PayloadType};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[derive(Default)]
struct Account {
    id: Maybe<u64>,
    name: Maybe<String>,
    balance: Maybe<f64>,
}

impl Account {
    fn fields(&mut self) -> [&mut dyn MaybeIface; 3] {
        [self.id.maybe_iface(), self.name.maybe_iface(), self.balance.maybe_iface()]
    }
}

#[test]
fn get_any_reports_presence() {
    let empty = nothing::<i32>();
    assert!(empty.get_any().is_none());
    assert!(!empty.is_valid());

    let m = unit(1234);
    let v = m.get_any().and_then(|v| v.downcast_ref::<i32>());
    assert_eq!(v, Some(&1234));
    assert!(m.is_valid());
}

#[test]
fn set_any_stores_matching_type() -> anyhow::Result<()> {
    let mut m = nothing::<String>();
    m.set_any(Box::new(String::from("alice")))?;
    assert_eq!(m, unit("alice".to_string()));
    Ok(())
}

#[test]
fn set_any_rejects_other_types() {
    init_tracing();
    let mut m = unit(5i32);
    let err = m.set_any(Box::new(5i64)).unwrap_err();
    let MaybeError::TypeMismatch { expected, found } = err.clone();
    assert_eq!(expected, PayloadType::of::<i32>());
    assert_eq!(found, std::any::TypeId::of::<i64>());
    assert!(err.to_string().contains("i32"));
    assert_eq!(m, unit(5));
}

#[test]
fn set_from_copies_or_clears() -> anyhow::Result<()> {
    let src = String::from("copied");
    let mut m = nothing::<String>();
    m.set_from(Some(&src as &dyn Any))?;
    assert_eq!(m, unit("copied".to_string()));
    assert_eq!(src, "copied");

    m.set_from(None)?;
    assert!(m.is_nothing());

    assert!(m.set_from(Some(&1u8 as &dyn Any)).is_err());
    assert!(m.is_nothing());
    Ok(())
}

#[test]
fn clear_empties_any_instance() {
    let mut account = Account { id: unit(1), name: unit("eve".into()), balance: nothing() };
    for field in account.fields() {
        field.clear();
        assert!(!field.is_valid());
    }
    assert_eq!(account.id, nothing());
    assert_eq!(account.name, nothing());
}

#[test]
fn get_any_mut_writes_through() {
    let mut m = unit(1u16);
    if let Some(v) = m.get_any_mut().and_then(|v| v.downcast_mut::<u16>()) {
        *v = 9;
    }
    assert_eq!(m, unit(9));
    assert!(nothing::<u16>().get_any_mut().is_none());
}

#[test]
fn set_valid_keeps_or_defaults_payload() {
    let mut m = nothing::<i32>();
    m.set_valid();
    assert_eq!(m, unit(0));

    let mut m = unit(7);
    m.set_valid();
    assert_eq!(m, unit(7));
}

#[test]
fn maybe_type_describes_payload() {
    let m = nothing::<String>();
    let ty = m.maybe_type();
    assert!(ty.is::<String>());
    assert!(ty.rust_name.contains("String"));
    assert_eq!(ty.size, std::mem::size_of::<String>());
    assert_ne!(ty, PayloadType::of::<&str>());
}

#[test]
fn populate_struct_without_naming_types() -> anyhow::Result<()> {
    init_tracing();
    let mut account = Account::default();
    let values: [Box<dyn Any>; 3] =
        [Box::new(17u64), Box::new("bob".to_string()), Box::new(2.5f64)];
    for (field, value) in account.fields().into_iter().zip(values) {
        field.set_any(value)?;
    }
    assert_eq!(account.id, unit(17));
    assert_eq!(account.name, unit("bob".to_string()));
    assert_eq!(account.balance, unit(2.5));

    let types: Vec<_> = account.fields().iter().map(|f| f.maybe_type()).collect();
    assert_eq!(
        types,
        vec![PayloadType::of::<u64>(), PayloadType::of::<String>(), PayloadType::of::<f64>()]
    );
    Ok(())
}
