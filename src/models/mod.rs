pub mod endpoint;
pub mod endpoint_record;

pub use endpoint::{Case, Endpoint, NewEndpoint, Request, Response, Row};
pub use endpoint_record::{EndpointRecord, NewEndpointRecord};

use serde::Serialize;

/// Version tag of the on-disk layout. Each version owns exactly one entity table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SchemaVersion {
    /// Flat `EndpointRecord` rows with a single absolute URL.
    Flat = 1,
    /// `Endpoint` rows with embedded JSON cases.
    Structured = 2,
}

impl SchemaVersion {
    pub const LATEST: SchemaVersion = SchemaVersion::Structured;

    pub fn as_i64(self) -> i64 {
        self as i64
    }

    pub fn from_i64(value: i64) -> Option<Self> {
        match value {
            1 => Some(SchemaVersion::Flat),
            2 => Some(SchemaVersion::Structured),
            _ => None,
        }
    }

    pub fn table(self) -> &'static str {
        match self {
            SchemaVersion::Flat => "endpointdata",
            SchemaVersion::Structured => "endpoint",
        }
    }

    /// Columns a table must carry to be read as this version.
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            SchemaVersion::Flat => &["id", "name", "method", "url", "description"],
            SchemaVersion::Structured => &[
                "id",
                "operation_id",
                "name",
                "summary",
                "description",
                "method",
                "path",
                "base_url",
                "cases",
            ],
        }
    }
}

impl std::fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchemaVersion::Flat => write!(f, "v1 (flat)"),
            SchemaVersion::Structured => write!(f, "v2 (structured)"),
        }
    }
}

/// All endpoints of the active schema version, serialized as a bare JSON array.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EndpointList {
    Flat(Vec<EndpointRecord>),
    Structured(Vec<Endpoint>),
}

impl EndpointList {
    pub fn len(&self) -> usize {
        match self {
            EndpointList::Flat(records) => records.len(),
            EndpointList::Structured(endpoints) => endpoints.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
