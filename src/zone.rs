use crate::error::RecordError;
use log::warn;
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fmt,
    net::{Ipv4Addr, Ipv6Addr},
};

/// Pi-hole has no TTLs; every record reports this one.
pub const DEFAULT_TTL: u32 = 86400;

#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RecordType {
    A,
    AAAA,
    CNAME,
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RecordType::A => "A",
            RecordType::AAAA => "AAAA",
            RecordType::CNAME => "CNAME",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordData {
    A(Vec<String>),
    AAAA(Vec<String>),
    CNAME(String),
}

impl RecordData {
    pub fn rtype(&self) -> RecordType {
        match self {
            RecordData::A(_) => RecordType::A,
            RecordData::AAAA(_) => RecordType::AAAA,
            RecordData::CNAME(_) => RecordType::CNAME,
        }
    }

    /// Compares values the way the server stores them: address sets are
    /// unordered, a CNAME has one target.
    pub fn same_values(&self, other: &RecordData) -> bool {
        match (self, other) {
            (RecordData::A(a), RecordData::A(b)) | (RecordData::AAAA(a), RecordData::AAAA(b)) => {
                let mut a: Vec<&String> = a.iter().collect();
                let mut b: Vec<&String> = b.iter().collect();
                a.sort();
                a.dedup();
                b.sort();
                b.dedup();
                a == b
            }
            (RecordData::CNAME(a), RecordData::CNAME(b)) => a == b,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Owner name relative to the zone, empty for the apex.
    pub name: String,
    pub ttl: u32,
    pub data: RecordData,
}

impl Record {
    /// Builds a record and validates its values. With `lenient` set, invalid
    /// values are logged and the record is kept as given.
    pub fn new(
        name: impl Into<String>,
        ttl: u32,
        data: RecordData,
        lenient: bool,
    ) -> Result<Self, RecordError> {
        let record = Self {
            name: name.into(),
            ttl,
            data,
        };

        if let Err(e) = record.validate() {
            if !lenient {
                return Err(e);
            }
            warn!("Record::new: {} (lenient, keeping record)", e);
        }
        Ok(record)
    }

    pub fn rtype(&self) -> RecordType {
        self.data.rtype()
    }

    fn validate(&self) -> Result<(), RecordError> {
        let invalid = |value: &str| RecordError::InvalidValue {
            name: self.name.clone(),
            rtype: self.rtype(),
            value: value.to_string(),
        };

        match &self.data {
            RecordData::A(values) | RecordData::AAAA(values) if values.is_empty() => {
                Err(RecordError::MissingValue {
                    name: self.name.clone(),
                    rtype: self.rtype(),
                })
            }
            RecordData::A(values) => values
                .iter()
                .find(|v| v.parse::<Ipv4Addr>().is_err())
                .map_or(Ok(()), |v| Err(invalid(v.as_str()))),
            RecordData::AAAA(values) => values
                .iter()
                .find(|v| v.parse::<Ipv6Addr>().is_err())
                .map_or(Ok(()), |v| Err(invalid(v.as_str()))),
            RecordData::CNAME(target) => {
                if target.is_empty() || !target.ends_with('.') || target.contains([' ', ',']) {
                    Err(invalid(target.as_str()))
                } else {
                    Ok(())
                }
            }
        }
    }
}

/// A fully-qualified zone name, e.g. `unit.tests.`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ZoneName {
    name: String,
    labels: Vec<String>,
}

impl ZoneName {
    pub fn new(name: &str) -> Result<Self, RecordError> {
        let trimmed = match name.strip_suffix('.') {
            Some(t) if !t.is_empty() => t,
            _ => return Err(RecordError::InvalidZoneName(name.to_string())),
        };

        let labels: Vec<String> = trimmed.split('.').map(str::to_string).collect();
        if labels.iter().any(|l| l.is_empty()) {
            return Err(RecordError::InvalidZoneName(name.to_string()));
        }

        Ok(Self {
            name: name.to_string(),
            labels,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.name
    }

    /// Returns the owner name of `fqdn` relative to this zone, `""` for the
    /// apex, or `None` when `fqdn` is not inside the zone. Matching is done on
    /// whole labels, so `other-tests.` is not inside `tests.`. Names with an
    /// empty label or whitespace (a host line listing several names) are
    /// never inside a zone.
    pub fn relative_name(&self, fqdn: &str) -> Option<String> {
        let trimmed = fqdn.strip_suffix('.')?;
        let labels: Vec<&str> = trimmed.split('.').collect();
        if labels.len() < self.labels.len()
            || labels
                .iter()
                .any(|l| l.is_empty() || l.contains(char::is_whitespace))
        {
            return None;
        }

        let split = labels.len() - self.labels.len();
        if labels[split..]
            .iter()
            .zip(&self.labels)
            .any(|(have, want)| *have != want.as_str())
        {
            return None;
        }

        Some(labels[..split].join("."))
    }

    /// Inverse of [`ZoneName::relative_name`].
    pub fn fqdn(&self, relative: &str) -> String {
        if relative.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", relative, self.name)
        }
    }
}

impl fmt::Display for ZoneName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Debug, Clone)]
pub struct Zone {
    pub name: ZoneName,
    records: BTreeMap<(String, RecordType), Record>,
}

impl Zone {
    pub fn new(name: ZoneName) -> Self {
        Self {
            name,
            records: BTreeMap::new(),
        }
    }

    /// Adds a record, refusing a second record for the same name and type
    /// unless `replace` is set.
    pub fn add_record(&mut self, record: Record, replace: bool) -> Result<(), RecordError> {
        let key = (record.name.clone(), record.rtype());
        if !replace && self.records.contains_key(&key) {
            return Err(RecordError::Duplicate {
                zone: self.name.to_string(),
                name: record.name,
                rtype: key.1,
            });
        }

        self.records.insert(key, record);
        Ok(())
    }

    /// Adds or replaces the record for its name and type.
    pub fn upsert_record(&mut self, record: Record) {
        self.records.insert((record.name.clone(), record.rtype()), record);
    }

    pub fn get(&self, name: &str, rtype: RecordType) -> Option<&Record> {
        self.records.get(&(name.to_string(), rtype))
    }

    /// Records ordered by name, then type.
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
