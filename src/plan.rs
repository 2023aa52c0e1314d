use crate::zone::{Record, Zone, ZoneName};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    Create { new: Record },
    Update { existing: Record, new: Record },
    Delete { existing: Record },
}

impl Change {
    /// The record the change is about: the new state, or the removed one for
    /// a delete.
    pub fn record(&self) -> &Record {
        match self {
            Change::Create { new } | Change::Update { new, .. } => new,
            Change::Delete { existing } => existing,
        }
    }
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            Change::Create { .. } => "Create",
            Change::Update { .. } => "Update",
            Change::Delete { .. } => "Delete",
        };
        let record = self.record();
        write!(f, "{} {:?} {}", kind, record.name, record.rtype())
    }
}

/// Ordered changes that turn an existing zone into a desired one.
#[derive(Debug, Clone)]
pub struct Plan {
    pub zone: ZoneName,
    /// Whether the existing zone had any records on the server.
    pub exists: bool,
    pub changes: Vec<Change>,
}

impl Plan {
    /// Deletes come first, then updates, then creates; each group keeps the
    /// zone's name/type order. Records compare by value only, so TTLs never
    /// cause an update.
    pub fn new(existing: &Zone, desired: &Zone, exists: bool) -> Self {
        let mut deletes = Vec::new();
        let mut updates = Vec::new();
        let mut creates = Vec::new();

        for record in existing.records() {
            if desired.get(&record.name, record.rtype()).is_none() {
                deletes.push(Change::Delete {
                    existing: record.clone(),
                });
            }
        }

        for record in desired.records() {
            match existing.get(&record.name, record.rtype()) {
                Some(current) if current.data.same_values(&record.data) => {}
                Some(current) => updates.push(Change::Update {
                    existing: current.clone(),
                    new: record.clone(),
                }),
                None => creates.push(Change::Create {
                    new: record.clone(),
                }),
            }
        }

        let mut changes = deletes;
        changes.append(&mut updates);
        changes.append(&mut creates);

        Self {
            zone: desired.name.clone(),
            exists,
            changes,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}
