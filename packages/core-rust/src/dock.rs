//! Dock routing descriptor.
//!
//! The orchestrator serializes the dock record it selected for a volume into
//! `VolumeRequest::dock_info`. The gateway only ever reads the `Endpoint` field,
//! but the whole record is modeled so callers can build and inspect it.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// DockInfo
// ---------------------------------------------------------------------------

/// A dock record as serialized by the orchestrator.
///
/// Field names are `PascalCase` on the wire; each field also accepts its
/// lower-camel spelling (`endpoint`, `driverName`). Other casings such as
/// `ENDPOINT` are not recognized and the field stays empty. Every field is
/// optional; unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DockInfo {
    #[serde(alias = "id")]
    pub id: String,
    #[serde(alias = "name")]
    pub name: String,
    #[serde(alias = "description")]
    pub description: String,
    #[serde(alias = "status")]
    pub status: String,
    #[serde(alias = "storageType")]
    pub storage_type: String,
    /// Host or `host:port` fragment of the dock, without a scheme.
    #[serde(alias = "endpoint")]
    pub endpoint: String,
    #[serde(alias = "driverName")]
    pub driver_name: String,
    #[serde(alias = "parameters")]
    pub parameters: HashMap<String, String>,
}

impl DockInfo {
    /// Build a descriptor that only carries an endpoint.
    #[must_use]
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    /// Serialize to the JSON form expected in `VolumeRequest::dock_info`.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if serialization fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

// ---------------------------------------------------------------------------
// ParsedDockInfo
// ---------------------------------------------------------------------------

/// Why a routing descriptor degraded to an empty endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmptyReason {
    /// The request family carries no routing data at all.
    Absent,
    /// Routing data was present but did not deserialize; holds the parse error.
    Malformed(String),
}

/// Outcome of reading a routing descriptor.
///
/// Parsing never fails outright: malformed input degrades to
/// [`ParsedDockInfo::Empty`] so the call can proceed with an empty endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedDockInfo {
    Descriptor(DockInfo),
    Empty(EmptyReason),
}

impl ParsedDockInfo {
    /// Parse serialized routing data.
    ///
    /// A JSON `null` yields an all-empty descriptor rather than a parse
    /// failure, matching how the orchestrator's decoder treats it.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match serde_json::from_str::<Option<DockInfo>>(raw) {
            Ok(info) => Self::Descriptor(info.unwrap_or_default()),
            Err(err) => Self::Empty(EmptyReason::Malformed(err.to_string())),
        }
    }

    /// The result used when a request carries no routing data.
    #[must_use]
    pub fn absent() -> Self {
        Self::Empty(EmptyReason::Absent)
    }

    /// Endpoint to dial; empty on the degraded path.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        match self {
            Self::Descriptor(info) => &info.endpoint,
            Self::Empty(_) => "",
        }
    }

    /// Returns the parse error message when the descriptor was malformed.
    #[must_use]
    pub fn malformed_reason(&self) -> Option<&str> {
        match self {
            Self::Empty(EmptyReason::Malformed(reason)) => Some(reason),
            _ => None,
        }
    }

    /// Whether the parsed result fell back to an empty endpoint.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty(_))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
