use std::time::Duration;

/// Port every dock serves its gRPC endpoint on.
pub const DEFAULT_DOCK_PORT: u16 = 50050;

/// Gateway configuration.
///
/// Controls how dock addresses are formed and how each per-call connection is
/// dialed. No request deadline lives here: callers that need bounded latency
/// set one per operation and add `TimeoutLayer`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Port appended to every resolved dock endpoint.
    pub dock_port: u16,
    /// Upper bound on establishing a connection. `None` leaves it to the
    /// transport default.
    pub connect_timeout: Option<Duration>,
    /// Set `TCP_NODELAY` on dialed connections.
    pub tcp_nodelay: bool,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            dock_port: DEFAULT_DOCK_PORT,
            connect_timeout: None,
            tcp_nodelay: true,
        }
    }
}
