//! Dock address resolution: routing descriptor -> dialable address.

use std::fmt;

use dockgate_core::ParsedDockInfo;
use tracing::{debug, warn};

// ---------------------------------------------------------------------------
// DockAddress
// ---------------------------------------------------------------------------

/// A connect address formed from a dock endpoint and the fixed dock port.
///
/// Displays as `"{endpoint}:{port}"`. The endpoint is taken verbatim, so an
/// endpoint that already carries a port is not rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DockAddress {
    endpoint: String,
    port: u16,
}

impl DockAddress {
    #[must_use]
    pub fn new(endpoint: impl Into<String>, port: u16) -> Self {
        Self {
            endpoint: endpoint.into(),
            port,
        }
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Whether the address carries no endpoint, just the port suffix.
    #[must_use]
    pub fn is_unrouted(&self) -> bool {
        self.endpoint.is_empty()
    }
}

impl fmt::Display for DockAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.endpoint, self.port)
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Result of resolving one request's routing data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// How the descriptor was read; `Empty` on the degraded path.
    pub parsed: ParsedDockInfo,
    /// Address to dial.
    pub address: DockAddress,
}

// ---------------------------------------------------------------------------
// AddressResolver
// ---------------------------------------------------------------------------

/// Turns serialized routing descriptors into dock addresses.
///
/// A pure function of its input and the configured port: safe to share
/// across concurrent calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressResolver {
    port: u16,
}

impl AddressResolver {
    #[must_use]
    pub fn new(port: u16) -> Self {
        Self { port }
    }

    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Resolve the routing descriptor carried by a volume request.
    ///
    /// Never fails. Malformed routing data is logged and resolution proceeds
    /// with an empty endpoint, which the connector dials on the local system.
    #[must_use]
    pub fn resolve(&self, dock_info: &str) -> Resolution {
        let parsed = ParsedDockInfo::parse(dock_info);
        if let Some(reason) = parsed.malformed_reason() {
            warn!(error = reason, "failed to parse dock info, using empty endpoint");
        }
        self.finish(parsed)
    }

    /// Resolve a request that carries no routing data (the share family).
    ///
    /// Always yields the port-only address. No parse is attempted, so nothing
    /// is logged.
    #[must_use]
    pub fn resolve_unrouted(&self) -> Resolution {
        self.finish(ParsedDockInfo::absent())
    }

    fn finish(&self, parsed: ParsedDockInfo) -> Resolution {
        let address = DockAddress::new(parsed.endpoint(), self.port);
        debug!(%address, "resolved dock address");
        Resolution { parsed, address }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
