use crate::error::RecordError;
use crate::zone::{Record, RecordData, RecordType, Zone, ZoneName, DEFAULT_TTL};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct Config {
    #[validate(nested)]
    pub pihole: PiholeConfig,

    /// Plan and log changes without writing them.
    #[serde(default)]
    pub dry_run: bool,

    #[validate(length(min = 1, message = "At least one zone is required"), nested)]
    pub zones: Vec<ZoneConfig>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct PiholeConfig {
    #[validate(url(message = "Pi-hole url must be a valid URL"))]
    pub url: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Password cannot be empty"))]
    pub password: String,

    #[serde(default)]
    pub totp: Option<u32>,

    #[serde(default = "default_tls_verify")]
    pub tls_verify: bool,
}

fn default_tls_verify() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct ZoneConfig {
    #[validate(length(min = 1, message = "Zone name cannot be empty"))]
    pub name: String,

    #[serde(default)]
    pub lenient: bool,

    #[serde(default)]
    #[validate(nested)]
    pub records: Vec<RecordConfig>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct RecordConfig {
    /// Relative to the zone, empty for the apex.
    #[serde(default)]
    pub name: String,

    #[serde(rename = "type")]
    pub rtype: RecordType,

    #[validate(length(min = 1, message = "At least one value is required"))]
    pub values: Vec<String>,
}

impl ZoneConfig {
    /// Builds the zone this entry describes.
    pub fn desired_zone(&self) -> Result<Zone, RecordError> {
        let mut zone = Zone::new(ZoneName::new(&self.name)?);
        for record in &self.records {
            zone.add_record(record.to_record(self.lenient)?, false)?;
        }
        Ok(zone)
    }
}

impl RecordConfig {
    pub fn to_record(&self, lenient: bool) -> Result<Record, RecordError> {
        let data = match self.rtype {
            RecordType::A => RecordData::A(self.values.clone()),
            RecordType::AAAA => RecordData::AAAA(self.values.clone()),
            RecordType::CNAME => match self.values.as_slice() {
                [target] => RecordData::CNAME(target.clone()),
                [] => {
                    return Err(RecordError::MissingValue {
                        name: self.name.clone(),
                        rtype: self.rtype,
                    })
                }
                _ => {
                    return Err(RecordError::InvalidValue {
                        name: self.name.clone(),
                        rtype: self.rtype,
                        value: self.values.join(","),
                    })
                }
            },
        };

        Record::new(self.name.clone(), DEFAULT_TTL, data, lenient)
    }
}
