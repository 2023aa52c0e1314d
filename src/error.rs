use thiserror::Error;

use crate::zone::RecordType;

/// Failures talking to the Pi-hole API.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Not Found")]
    NotFound,

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

impl ClientError {
    /// Status code of the failed response, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Unauthorized => Some(401),
            ClientError::NotFound => Some(404),
            ClientError::Status { status, .. } => Some(*status),
            ClientError::Transport(e) => e.status().map(|s| s.as_u16()),
            ClientError::UnexpectedResponse(_) => None,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("{name:?} {rtype}: invalid value {value:?}")]
    InvalidValue {
        name: String,
        rtype: RecordType,
        value: String,
    },

    #[error("{name:?} {rtype}: at least one value is required")]
    MissingValue { name: String, rtype: RecordType },

    #[error("{name:?} {rtype}: record already exists in zone {zone}")]
    Duplicate {
        zone: String,
        name: String,
        rtype: RecordType,
    },

    #[error("invalid zone name {0:?}: must be fully qualified")]
    InvalidZoneName(String),
}

#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Record(#[from] RecordError),

    #[error("invalid host entry {entry:?}: {ip:?} is neither IPv4 nor IPv6")]
    InvalidEntry { entry: String, ip: String },
}

pub type Result<T, E = SyncError> = std::result::Result<T, E>;
