use coffee_core::{Coffee, RepoError};
use rust_decimal_macros::dec;

#[test]
fn coffee_serialization_uses_expected_wire_fields() {
    let coffee = Coffee::new("Colombian", 101, dec!(7.99), 3, 12);

    let json = serde_json::to_value(&coffee).unwrap();
    assert_eq!(json["name"], "Colombian");
    assert_eq!(json["supplierId"], 101);
    assert_eq!(json["price"], "7.99");
    assert_eq!(json["sales"], 3);
    assert_eq!(json["total"], 12);

    let decoded: Coffee = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, coffee);
}

#[test]
fn storage_unavailable_maps_from_open_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("coffees.sqlite3");

    let err = RepoError::from(coffee_core::db::open_db(&path).unwrap_err());
    assert!(matches!(err, RepoError::StorageUnavailable(_)));
    assert!(err.to_string().contains("unavailable"));
}
