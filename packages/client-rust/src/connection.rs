//! Per-call dock connections.
//!
//! `TonicConnector` dials a fresh plaintext gRPC channel for every call and
//! `ConnectionGuard` owns it for the rest of that call. The guard releases the
//! channel when it goes out of scope, on success, on error, and while
//! unwinding from a panic.

use std::ops::{Deref, DerefMut};
use std::time::Duration;

use async_trait::async_trait;
use dockgate_core::proto::dock_client::DockClient;
use dockgate_core::Response;
use tonic::transport::{Channel, Endpoint};
use tracing::debug;

use crate::config::GatewayConfig;
use crate::gateway::{DockCall, ShareMethod, VolumeMethod};
use crate::resolver::DockAddress;
use crate::traits::{DockChannel, DockConnector};

// ---------------------------------------------------------------------------
// ConnectError
// ---------------------------------------------------------------------------

/// Failure to establish a dock channel. Each variant keeps the raw cause.
#[derive(Debug, thiserror::Error)]
pub enum ConnectError {
    /// Invalid URI or dial failure reported by the gRPC transport.
    #[error("failed to connect to dock at {address}: {source}")]
    Transport {
        address: String,
        #[source]
        source: tonic::transport::Error,
    },
    /// Socket-level failure from connectors that dial directly.
    #[error("failed to connect to dock at {address}: {source}")]
    Io {
        address: String,
        #[source]
        source: std::io::Error,
    },
}

impl ConnectError {
    /// The address that could not be dialed.
    #[must_use]
    pub fn address(&self) -> &str {
        match self {
            Self::Transport { address, .. } | Self::Io { address, .. } => address,
        }
    }
}

// ---------------------------------------------------------------------------
// ConnectionGuard
// ---------------------------------------------------------------------------

/// Scoped ownership of one dock channel.
///
/// The channel is dropped together with the guard; `Drop` runs during stack
/// unwinding and when an in-flight future is cancelled, so no exit path
/// leaks the connection.
#[derive(Debug)]
pub struct ConnectionGuard<C> {
    address: DockAddress,
    channel: C,
}

impl<C> ConnectionGuard<C> {
    #[must_use]
    pub fn new(address: DockAddress, channel: C) -> Self {
        Self { address, channel }
    }

    #[must_use]
    pub fn address(&self) -> &DockAddress {
        &self.address
    }
}

impl<C> Deref for ConnectionGuard<C> {
    type Target = C;

    fn deref(&self) -> &C {
        &self.channel
    }
}

impl<C> DerefMut for ConnectionGuard<C> {
    fn deref_mut(&mut self) -> &mut C {
        &mut self.channel
    }
}

impl<C> Drop for ConnectionGuard<C> {
    fn drop(&mut self) {
        debug!(address = %self.address, "releasing dock connection");
    }
}

// ---------------------------------------------------------------------------
// TonicConnector
// ---------------------------------------------------------------------------

/// Host dialed for a port-only address: the dock on the local system.
pub const LOCAL_DOCK_HOST: &str = "127.0.0.1";

/// Dials docks over plaintext HTTP/2 with no transport authentication.
///
/// A port-only address (no endpoint) is dialed on [`LOCAL_DOCK_HOST`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TonicConnector {
    connect_timeout: Option<Duration>,
    tcp_nodelay: bool,
}

impl TonicConnector {
    #[must_use]
    pub fn new(config: &GatewayConfig) -> Self {
        Self {
            connect_timeout: config.connect_timeout,
            tcp_nodelay: config.tcp_nodelay,
        }
    }

    fn endpoint(&self, address: &DockAddress) -> Result<Endpoint, ConnectError> {
        let uri = if address.is_unrouted() {
            format!("http://{LOCAL_DOCK_HOST}:{}", address.port())
        } else {
            format!("http://{address}")
        };
        let mut endpoint = Endpoint::from_shared(uri)
            .map_err(|source| ConnectError::Transport {
                address: address.to_string(),
                source,
            })?
            .tcp_nodelay(self.tcp_nodelay);
        if let Some(timeout) = self.connect_timeout {
            endpoint = endpoint.connect_timeout(timeout);
        }
        Ok(endpoint)
    }
}

impl Default for TonicConnector {
    fn default() -> Self {
        Self::new(&GatewayConfig::default())
    }
}

#[async_trait]
impl DockConnector for TonicConnector {
    type Channel = TonicChannel;

    async fn connect(&self, address: &DockAddress) -> Result<TonicChannel, ConnectError> {
        let channel = self
            .endpoint(address)?
            .connect()
            .await
            .map_err(|source| ConnectError::Transport {
                address: address.to_string(),
                source,
            })?;

        debug!(%address, "connected to dock");
        Ok(TonicChannel {
            client: DockClient::new(channel),
        })
    }
}

// ---------------------------------------------------------------------------
// TonicChannel
// ---------------------------------------------------------------------------

/// A connected `Dock` client. Dropping it closes the underlying channel.
#[derive(Debug)]
pub struct TonicChannel {
    client: DockClient<Channel>,
}

#[async_trait]
impl DockChannel for TonicChannel {
    async fn invoke(&mut self, call: DockCall) -> Result<Response, tonic::Status> {
        let client = &mut self.client;
        let response = match call {
            DockCall::Volume { method, request } => match method {
                VolumeMethod::Create => client.create_volume(request).await,
                VolumeMethod::Get => client.get_volume(request).await,
                VolumeMethod::Delete => client.delete_volume(request).await,
                VolumeMethod::CreateAttachment => client.create_volume_attachment(request).await,
                VolumeMethod::UpdateAttachment => client.update_volume_attachment(request).await,
                VolumeMethod::DeleteAttachment => client.delete_volume_attachment(request).await,
                VolumeMethod::CreateSnapshot => client.create_volume_snapshot(request).await,
                VolumeMethod::GetSnapshot => client.get_volume_snapshot(request).await,
                VolumeMethod::DeleteSnapshot => client.delete_volume_snapshot(request).await,
            },
            DockCall::Share { method, request } => match method {
                ShareMethod::Create => client.create_share(request).await,
                ShareMethod::Get => client.get_share(request).await,
                ShareMethod::List => client.list_shares(request).await,
                ShareMethod::Delete => client.delete_share(request).await,
                ShareMethod::Attach => client.attach_share(request).await,
                ShareMethod::Detach => client.detach_share(request).await,
            },
        }?;
        Ok(response.into_inner())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use dockgate_core::{ShareRequest, VolumeRequest};

    use super::*;
    use crate::test_support::{dock_rpc_path, spawn_echo_dock, Received};

    struct CountingChannel(Arc<AtomicUsize>);

    impl Drop for CountingChannel {
        fn drop(&mut self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn guard_releases_channel_on_drop() {
        let released = Arc::new(AtomicUsize::new(0));
        {
            let guard = ConnectionGuard::new(
                DockAddress::new("10.0.0.5", 50050),
                CountingChannel(Arc::clone(&released)),
            );
            assert_eq!(guard.address().to_string(), "10.0.0.5:50050");
            assert_eq!(released.load(Ordering::SeqCst), 0);
        }
        assert_eq!(released.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn guard_releases_channel_while_unwinding() {
        let released = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&released);
        let result = std::panic::catch_unwind(move || {
            let _guard = ConnectionGuard::new(
                DockAddress::new("10.0.0.5", 50050),
                CountingChannel(counter),
            );
            panic!("call blew up");
        });
        assert!(result.is_err());
        assert_eq!(released.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn port_only_address_dials_local_dock() {
        let (port, dock) = spawn_echo_dock().await;
        let mut channel = TonicConnector::default()
            .connect(&DockAddress::new("", port))
            .await
            .unwrap();

        let response = channel
            .invoke(DockCall::Share {
                method: ShareMethod::List,
                request: ShareRequest::default(),
            })
            .await
            .unwrap();
        assert_eq!(response.message, "/opensds.Dock/ListShares");
        assert_eq!(dock.received().len(), 1);
    }

    #[tokio::test]
    async fn every_method_reaches_its_dock_rpc() {
        let (port, dock) = spawn_echo_dock().await;
        let connector = TonicConnector::default();
        let address = DockAddress::new("127.0.0.1", port);

        for &method in VolumeMethod::ALL {
            let request = VolumeRequest {
                id: format!("vol-{method}"),
                size: 3,
                attachment_id: "att-1".to_string(),
                dock_info: r#"{"Endpoint":"127.0.0.1"}"#.to_string(),
                ..VolumeRequest::default()
            };
            let mut channel = connector.connect(&address).await.unwrap();
            let response = channel
                .invoke(DockCall::Volume {
                    method,
                    request: request.clone(),
                })
                .await
                .unwrap();

            let path = dock_rpc_path(method.rpc_name());
            assert_eq!(response.message, path);
            assert_eq!(
                dock.received().last(),
                Some(&(path, Received::Volume(request)))
            );
        }

        for &method in ShareMethod::ALL {
            let request = ShareRequest {
                id: format!("share-{method}"),
                share_proto: "nfs".to_string(),
                size: 2,
                ..ShareRequest::default()
            };
            let mut channel = connector.connect(&address).await.unwrap();
            let response = channel
                .invoke(DockCall::Share {
                    method,
                    request: request.clone(),
                })
                .await
                .unwrap();

            let path = dock_rpc_path(method.rpc_name());
            assert_eq!(response.message, path);
            assert_eq!(
                dock.received().last(),
                Some(&(path, Received::Share(request)))
            );
        }

        assert_eq!(dock.received().len(), 15);
    }

    #[tokio::test]
    async fn invalid_uri_is_a_transport_error() {
        let connector = TonicConnector::default();
        let err = connector
            .connect(&DockAddress::new("bad host", 50050))
            .await
            .unwrap_err();
        assert!(matches!(err, ConnectError::Transport { .. }));
    }

    #[tokio::test]
    async fn refused_dial_is_a_transport_error() {
        // Bind then drop to get a local port with nothing listening on it.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let connector = TonicConnector::new(&GatewayConfig {
            dock_port: port,
            connect_timeout: Some(Duration::from_secs(2)),
            tcp_nodelay: true,
        });
        let err = connector
            .connect(&DockAddress::new("127.0.0.1", port))
            .await
            .unwrap_err();
        assert!(matches!(err, ConnectError::Transport { .. }));
        assert_eq!(err.address(), format!("127.0.0.1:{port}"));
    }
}
