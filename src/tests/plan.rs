use crate::plan::{Change, Plan};
use crate::zone::{Record, RecordData, Zone, ZoneName, DEFAULT_TTL};

fn zone_with(records: Vec<Record>) -> Zone {
    let mut zone = Zone::new(ZoneName::new("unit.tests.").unwrap());
    for record in records {
        zone.add_record(record, false).unwrap();
    }
    zone
}

fn a(name: &str, ttl: u32, ips: &[&str]) -> Record {
    Record::new(
        name,
        ttl,
        RecordData::A(ips.iter().map(|s| s.to_string()).collect()),
        false,
    )
    .unwrap()
}

#[test]
fn test_identical_zones_have_no_changes() {
    let existing = zone_with(vec![a("www", DEFAULT_TTL, &["1.1.1.1", "2.2.2.2"])]);
    let desired = zone_with(vec![a("www", 300, &["2.2.2.2", "1.1.1.1"])]);

    let plan = Plan::new(&existing, &desired, true);
    assert!(plan.is_empty());
}

#[test]
fn test_changes_are_ordered_deletes_updates_creates() {
    let existing = zone_with(vec![
        a("delete-me", DEFAULT_TTL, &["1.1.1.1"]),
        a("update-me", DEFAULT_TTL, &["1.2.3.4"]),
    ]);
    let desired = zone_with(vec![
        a("create-me", DEFAULT_TTL, &["4.4.4.4"]),
        a("update-me", DEFAULT_TTL, &["3.2.3.4"]),
    ]);

    let plan = Plan::new(&existing, &desired, true);
    assert_eq!(plan.zone.as_str(), "unit.tests.");
    assert!(plan.exists);
    assert_eq!(
        plan.changes,
        vec![
            Change::Delete {
                existing: a("delete-me", DEFAULT_TTL, &["1.1.1.1"]),
            },
            Change::Update {
                existing: a("update-me", DEFAULT_TTL, &["1.2.3.4"]),
                new: a("update-me", DEFAULT_TTL, &["3.2.3.4"]),
            },
            Change::Create {
                new: a("create-me", DEFAULT_TTL, &["4.4.4.4"]),
            },
        ]
    );
    assert_eq!(plan.changes[1].to_string(), "Update \"update-me\" A");
}
