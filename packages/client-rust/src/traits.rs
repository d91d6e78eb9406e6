use async_trait::async_trait;
use dockgate_core::Response;

use crate::connection::ConnectError;
use crate::gateway::DockCall;
use crate::resolver::DockAddress;

/// Connection factory for dock channels.
/// Implementations: tonic over plaintext HTTP/2 (`TonicConnector`), stubs (tests).
///
/// Every call to `connect` must return a fresh channel that is not shared
/// with any other call. Dropping the channel releases the connection.
#[async_trait]
pub trait DockConnector: Send + Sync {
    /// Channel type handed to exactly one call.
    type Channel: DockChannel;

    /// Establish a channel to the dock at `address`.
    async fn connect(&self, address: &DockAddress) -> Result<Self::Channel, ConnectError>;
}

/// Remote-call surface of one connected dock channel.
#[async_trait]
pub trait DockChannel: Send {
    /// Issue exactly one remote call, without a deadline.
    async fn invoke(&mut self, call: DockCall) -> Result<Response, tonic::Status>;
}
