use crate::error::RecordError;
use crate::zone::{Record, RecordData, RecordType, Zone, ZoneName, DEFAULT_TTL};

#[test]
fn test_zone_name_must_be_fully_qualified() {
    assert!(ZoneName::new("unit.tests.").is_ok());
    assert_eq!(
        ZoneName::new("unit.tests"),
        Err(RecordError::InvalidZoneName("unit.tests".to_string()))
    );
    assert!(ZoneName::new(".").is_err());
    assert!(ZoneName::new("unit..tests.").is_err());
}

#[test]
fn test_relative_name() {
    let zone = ZoneName::new("unit.tests.").unwrap();

    assert_eq!(zone.relative_name("unit.tests."), Some(String::new()));
    assert_eq!(zone.relative_name("www.unit.tests."), Some("www".to_string()));
    assert_eq!(
        zone.relative_name("a.b.unit.tests."),
        Some("a.b".to_string())
    );
    assert_eq!(zone.relative_name("notunit.tests."), None);
    assert_eq!(zone.relative_name("tests."), None);
    assert_eq!(zone.relative_name("www.unit.tests"), None);
    assert_eq!(zone.relative_name("www.unit.tests.org."), None);
    assert_eq!(zone.relative_name("a..unit.tests."), None);
    assert_eq!(zone.relative_name("a.unit.tests. b.unit.tests."), None);
}

#[test]
fn test_fqdn_inverts_relative_name() {
    let zone = ZoneName::new("unit.tests.").unwrap();

    assert_eq!(zone.fqdn(""), "unit.tests.");
    assert_eq!(zone.fqdn("www.sub"), "www.sub.unit.tests.");
    assert_eq!(zone.relative_name(&zone.fqdn("www.sub")), Some("www.sub".to_string()));
}

#[test]
fn test_record_validation() {
    let bad_a = Record::new("a", DEFAULT_TTL, RecordData::A(vec!["::1".to_string()]), false);
    assert!(matches!(bad_a, Err(RecordError::InvalidValue { .. })));

    let bad_aaaa = Record::new(
        "a",
        DEFAULT_TTL,
        RecordData::AAAA(vec!["1.1.1.1".to_string()]),
        false,
    );
    assert!(matches!(bad_aaaa, Err(RecordError::InvalidValue { .. })));

    let empty = Record::new("a", DEFAULT_TTL, RecordData::A(vec![]), false);
    assert!(matches!(empty, Err(RecordError::MissingValue { .. })));

    let relative_cname = Record::new(
        "a",
        DEFAULT_TTL,
        RecordData::CNAME("target".to_string()),
        false,
    );
    assert!(matches!(relative_cname, Err(RecordError::InvalidValue { .. })));
}

#[test]
fn test_lenient_record_keeps_invalid_value() {
    let record = Record::new(
        "a",
        DEFAULT_TTL,
        RecordData::CNAME("target".to_string()),
        true,
    )
    .unwrap();
    assert_eq!(record.rtype(), RecordType::CNAME);
}

#[test]
fn test_add_record_rejects_duplicate() {
    let mut zone = Zone::new(ZoneName::new("unit.tests.").unwrap());
    let record = Record::new(
        "www",
        DEFAULT_TTL,
        RecordData::A(vec!["1.1.1.1".to_string()]),
        false,
    )
    .unwrap();

    zone.add_record(record.clone(), false).unwrap();
    assert!(matches!(
        zone.add_record(record.clone(), false),
        Err(RecordError::Duplicate { .. })
    ));
    zone.add_record(record, true).unwrap();
    assert_eq!(1, zone.len());
}

#[test]
fn test_same_values_ignores_order() {
    let a = RecordData::A(vec!["1.1.1.1".to_string(), "2.2.2.2".to_string()]);
    let b = RecordData::A(vec!["2.2.2.2".to_string(), "1.1.1.1".to_string()]);
    let c = RecordData::AAAA(vec!["2.2.2.2".to_string(), "1.1.1.1".to_string()]);

    assert!(a.same_values(&b));
    assert!(!a.same_values(&c));
}
