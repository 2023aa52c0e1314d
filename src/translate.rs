//! Conversion between the server's flat lists and zone records.
//!
//! Reading groups host and CNAME entries under their zone-relative owner
//! names. Writing turns one record change into the flat additions and
//! removals that express it.

use crate::api::{CnameEntry, HostEntry};
use crate::cache::FlatMutation;
use crate::error::{Result, SyncError};
use crate::plan::Change;
use crate::zone::{Record, RecordData, RecordType, ZoneName, DEFAULT_TTL};
use log::warn;
use std::{collections::BTreeMap, net::IpAddr};

#[derive(Debug, Default)]
pub struct Translated {
    /// Distinct relative names that had at least one entry.
    pub names: usize,
    pub records: Vec<Record>,
}

pub fn translate_to_records(
    zone: &ZoneName,
    hosts: &[HostEntry],
    cnames: &[CnameEntry],
    lenient: bool,
) -> Result<Translated> {
    let mut values: BTreeMap<String, BTreeMap<RecordType, Vec<String>>> = BTreeMap::new();

    for entry in hosts {
        let Some(name) = zone.relative_name(entry.name()) else {
            continue;
        };

        let rtype = match entry.ip().parse::<IpAddr>() {
            Ok(IpAddr::V4(_)) => RecordType::A,
            Ok(IpAddr::V6(_)) => RecordType::AAAA,
            Err(_) if lenient => {
                warn!("translate: skipping host entry {:?}, bad ip", entry.to_string());
                continue;
            }
            Err(_) => {
                return Err(SyncError::InvalidEntry {
                    entry: entry.to_string(),
                    ip: entry.ip().to_string(),
                })
            }
        };

        let found = values.entry(name).or_default().entry(rtype).or_default();
        // the same address can sit on two differently spaced lines
        if !found.iter().any(|ip| ip == entry.ip()) {
            found.push(entry.ip().to_string());
        }
    }

    for entry in cnames {
        let Some(name) = zone.relative_name(entry.name()) else {
            continue;
        };

        values
            .entry(name)
            .or_default()
            .entry(RecordType::CNAME)
            .or_default()
            .push(entry.target().to_string());
    }

    let mut records = Vec::new();
    for (name, types) in &values {
        for (rtype, found) in types {
            let data = match rtype {
                RecordType::A => RecordData::A(found.clone()),
                RecordType::AAAA => RecordData::AAAA(found.clone()),
                RecordType::CNAME => {
                    if found.len() > 1 {
                        warn!(
                            "translate: {:?} has {} CNAME targets, keeping {:?}",
                            zone.fqdn(name),
                            found.len(),
                            found[0]
                        );
                    }
                    RecordData::CNAME(found[0].clone())
                }
            };
            records.push(Record::new(name.clone(), DEFAULT_TTL, data, lenient)?);
        }
    }

    Ok(Translated {
        names: values.len(),
        records,
    })
}

/// Flat mutations for one change. An update removes everything the old
/// record wrote before adding the new one.
pub fn expand_change(zone: &ZoneName, change: &Change) -> Vec<FlatMutation> {
    match change {
        Change::Create { new } => expand_record(zone, new, true),
        Change::Delete { existing } => expand_record(zone, existing, false),
        Change::Update { existing, new } => {
            let mut mutations = expand_record(zone, existing, false);
            mutations.extend(expand_record(zone, new, true));
            mutations
        }
    }
}

fn expand_record(zone: &ZoneName, record: &Record, add: bool) -> Vec<FlatMutation> {
    let fqdn = zone.fqdn(&record.name);

    match &record.data {
        RecordData::A(ips) | RecordData::AAAA(ips) => ips
            .iter()
            .map(|ip| {
                let entry = HostEntry::new(ip.as_str(), fqdn.as_str());
                if add {
                    FlatMutation::AddHost(entry)
                } else {
                    FlatMutation::RemoveHost(entry)
                }
            })
            .collect(),
        RecordData::CNAME(target) => {
            let entry = CnameEntry::new(fqdn, target.as_str());
            if add {
                vec![FlatMutation::AddCname(entry)]
            } else {
                vec![FlatMutation::RemoveCname(entry)]
            }
        }
    }
}
