use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};

/// One line of the Pi-hole `dns.hosts` list, `"<ip> <name>"`.
///
/// The line is kept exactly as the server sent it; equality and the wire
/// form both use that text, so entries are never rewritten on the way back.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HostEntry {
    line: String,
    ip: String,
    name: String,
}

/// One line of the Pi-hole `dns.cnameRecords` list, `"<name>,<target>"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CnameEntry {
    line: String,
    name: String,
    target: String,
}

impl HostEntry {
    pub fn new(ip: impl Into<String>, name: impl Into<String>) -> Self {
        let (ip, name) = (ip.into(), name.into());
        Self {
            line: format!("{} {}", ip, name),
            ip,
            name,
        }
    }

    pub fn ip(&self) -> &str {
        &self.ip
    }

    /// Everything after the address, which may list several names.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl CnameEntry {
    pub fn new(name: impl Into<String>, target: impl Into<String>) -> Self {
        let (name, target) = (name.into(), target.into());
        Self {
            line: format!("{},{}", name, target),
            name,
            target,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn target(&self) -> &str {
        &self.target
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedEntry(pub String);

impl fmt::Display for MalformedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "malformed entry {:?}", self.0)
    }
}

impl std::error::Error for MalformedEntry {}

// Leading whitespace is skipped to find the fields, the line itself is kept.
fn split_pair(s: &str, sep: char) -> Result<(String, String), MalformedEntry> {
    match s.trim_start().split_once(sep) {
        Some((left, right)) if !left.is_empty() && !right.trim().is_empty() => {
            Ok((left.to_string(), right.trim_start_matches(sep).trim().to_string()))
        }
        _ => Err(MalformedEntry(s.to_string())),
    }
}

impl FromStr for HostEntry {
    type Err = MalformedEntry;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (ip, name) = split_pair(s, ' ')?;
        Ok(Self {
            line: s.to_string(),
            ip,
            name,
        })
    }
}

impl FromStr for CnameEntry {
    type Err = MalformedEntry;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, target) = split_pair(s, ',')?;
        Ok(Self {
            line: s.to_string(),
            name,
            target,
        })
    }
}

impl fmt::Display for HostEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.line)
    }
}

impl fmt::Display for CnameEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.line)
    }
}

// Both entry kinds travel as plain strings on the wire.
macro_rules! string_serde {
    ($ty:ty) => {
        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(de::Error::custom)
            }
        }
    };
}

string_serde!(HostEntry);
string_serde!(CnameEntry);

#[derive(Debug, Serialize)]
pub struct AuthRequest<'a> {
    pub password: &'a str,
    pub totp: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub session: Session,
}

#[derive(Debug, Deserialize)]
pub struct Session {
    pub sid: Option<String>,
    #[serde(default)]
    pub validity: Option<i64>,
}

/// `{"config": {"dns": ...}}`, the envelope of every config read and write.
#[derive(Debug, Serialize, Deserialize)]
pub struct ConfigEnvelope<T> {
    pub config: DnsSection<T>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DnsSection<T> {
    pub dns: T,
}

#[derive(Debug, Deserialize)]
pub struct HostsSection {
    pub hosts: Vec<HostEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CnamesSection {
    pub cname_records: Vec<CnameEntry>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DnsPatch<'a> {
    pub hosts: &'a [HostEntry],
    pub cname_records: &'a [CnameEntry],
}

impl<T> ConfigEnvelope<T> {
    pub fn new(dns: T) -> Self {
        Self {
            config: DnsSection { dns },
        }
    }
}
