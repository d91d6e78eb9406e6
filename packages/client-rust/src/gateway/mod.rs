//! Operation gateway: one inbound operation -> one remote dock call.
//!
//! Every operation runs the same steps:
//!
//! 1. **Resolve** the dock address (volume: from `dock_info`; share: unrouted)
//! 2. **Connect** a fresh channel; failure ends the call before any remote call
//! 3. **Invoke** exactly one remote procedure, with no deadline
//! 4. **Release** the channel via `ConnectionGuard`, on every exit path
//! 5. **Report** the response unmodified, or the raw error

pub mod operation;
pub mod service;

use std::sync::Arc;

use dockgate_core::{Response, ShareRequest, VolumeRequest};
use tracing::{debug, error};
use uuid::Uuid;

pub use operation::{
    split_outcome, DockCall, DockError, DockOperation, OperationContext, ShareMethod,
    UnknownMethod, VolumeMethod,
};

use crate::config::GatewayConfig;
use crate::connection::{ConnectionGuard, TonicConnector};
use crate::resolver::{AddressResolver, Resolution};
use crate::traits::{DockChannel, DockConnector};

// ---------------------------------------------------------------------------
// DockGateway
// ---------------------------------------------------------------------------

/// Dispatches storage operations to docks, one transient connection per call.
///
/// Holds no per-call state: clones share the resolver settings and the
/// connector, and every call dials its own channel.
pub struct DockGateway<C> {
    resolver: AddressResolver,
    connector: Arc<C>,
}

impl DockGateway<TonicConnector> {
    /// Gateway that dials docks over gRPC as configured.
    #[must_use]
    pub fn new(config: &GatewayConfig) -> Self {
        Self::with_connector(
            AddressResolver::new(config.dock_port),
            TonicConnector::new(config),
        )
    }
}

impl<C> DockGateway<C> {
    /// Gateway over a custom connection factory.
    #[must_use]
    pub fn with_connector(resolver: AddressResolver, connector: C) -> Self {
        Self {
            resolver,
            connector: Arc::new(connector),
        }
    }

    #[must_use]
    pub fn resolver(&self) -> &AddressResolver {
        &self.resolver
    }

    #[must_use]
    pub fn connector(&self) -> &C {
        &self.connector
    }
}

impl<C> Clone for DockGateway<C> {
    fn clone(&self) -> Self {
        Self {
            resolver: self.resolver,
            connector: Arc::clone(&self.connector),
        }
    }
}

impl<C> std::fmt::Debug for DockGateway<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DockGateway")
            .field("resolver", &self.resolver)
            .finish_non_exhaustive()
    }
}

impl<C: DockConnector> DockGateway<C> {
    /// Run one operation through resolve, connect, invoke, release, report.
    ///
    /// # Errors
    ///
    /// - `DockError::Connect` if no channel could be established; no remote
    ///   call is attempted.
    /// - `DockError::Remote` with the dock's status if the remote call failed.
    pub async fn execute(&self, op: DockOperation) -> Result<Response, DockError> {
        let DockOperation { ctx, call } = op;
        let resolution = self.resolve(&call);
        self.dispatch(ctx.call_id, resolution, call).await
    }

    fn resolve(&self, call: &DockCall) -> Resolution {
        match call {
            DockCall::Volume { request, .. } => self.resolver.resolve(&request.dock_info),
            // Share requests carry no routing data and always go to the
            // port-only address.
            DockCall::Share { .. } => self.resolver.resolve_unrouted(),
        }
    }

    async fn dispatch(
        &self,
        call_id: Uuid,
        resolution: Resolution,
        call: DockCall,
    ) -> Result<Response, DockError> {
        let rpc = call.rpc_name();
        let action = call.describe();
        let address = resolution.address;

        let channel = match self.connector.connect(&address).await {
            Ok(channel) => channel,
            Err(err) => {
                error!(%call_id, rpc, %address, error = %err, "get dock client failed");
                return Err(DockError::Connect(err));
            }
        };
        let mut conn = ConnectionGuard::new(address, channel);

        match conn.invoke(call).await {
            Ok(response) => {
                debug!(%call_id, rpc, ?response, "dock client received {action} response");
                Ok(response)
            }
            Err(status) => {
                error!(%call_id, rpc, error = %status, "could not {action}");
                Err(DockError::Remote(status))
            }
        }
    }

    // ----- Volume family -----

    /// Create a volume on the dock named by `request.dock_info`.
    ///
    /// # Errors
    ///
    /// See [`DockGateway::execute`].
    pub async fn create_volume(&self, request: VolumeRequest) -> Result<Response, DockError> {
        self.execute(DockOperation::volume(VolumeMethod::Create, request)).await
    }

    /// # Errors
    ///
    /// See [`DockGateway::execute`].
    pub async fn get_volume(&self, request: VolumeRequest) -> Result<Response, DockError> {
        self.execute(DockOperation::volume(VolumeMethod::Get, request)).await
    }

    /// # Errors
    ///
    /// See [`DockGateway::execute`].
    pub async fn delete_volume(&self, request: VolumeRequest) -> Result<Response, DockError> {
        self.execute(DockOperation::volume(VolumeMethod::Delete, request)).await
    }

    /// # Errors
    ///
    /// See [`DockGateway::execute`].
    pub async fn create_volume_attachment(
        &self,
        request: VolumeRequest,
    ) -> Result<Response, DockError> {
        self.execute(DockOperation::volume(VolumeMethod::CreateAttachment, request))
            .await
    }

    /// # Errors
    ///
    /// See [`DockGateway::execute`].
    pub async fn update_volume_attachment(
        &self,
        request: VolumeRequest,
    ) -> Result<Response, DockError> {
        self.execute(DockOperation::volume(VolumeMethod::UpdateAttachment, request))
            .await
    }

    /// # Errors
    ///
    /// See [`DockGateway::execute`].
    pub async fn delete_volume_attachment(
        &self,
        request: VolumeRequest,
    ) -> Result<Response, DockError> {
        self.execute(DockOperation::volume(VolumeMethod::DeleteAttachment, request))
            .await
    }

    /// # Errors
    ///
    /// See [`DockGateway::execute`].
    pub async fn create_volume_snapshot(
        &self,
        request: VolumeRequest,
    ) -> Result<Response, DockError> {
        self.execute(DockOperation::volume(VolumeMethod::CreateSnapshot, request))
            .await
    }

    /// # Errors
    ///
    /// See [`DockGateway::execute`].
    pub async fn get_volume_snapshot(
        &self,
        request: VolumeRequest,
    ) -> Result<Response, DockError> {
        self.execute(DockOperation::volume(VolumeMethod::GetSnapshot, request))
            .await
    }

    /// # Errors
    ///
    /// See [`DockGateway::execute`].
    pub async fn delete_volume_snapshot(
        &self,
        request: VolumeRequest,
    ) -> Result<Response, DockError> {
        self.execute(DockOperation::volume(VolumeMethod::DeleteSnapshot, request))
            .await
    }

    // ----- Share family -----

    /// Create a share. Share operations always target the port-only address.
    ///
    /// # Errors
    ///
    /// See [`DockGateway::execute`].
    pub async fn create_share(&self, request: ShareRequest) -> Result<Response, DockError> {
        self.execute(DockOperation::share(ShareMethod::Create, request)).await
    }

    /// # Errors
    ///
    /// See [`DockGateway::execute`].
    pub async fn get_share(&self, request: ShareRequest) -> Result<Response, DockError> {
        self.execute(DockOperation::share(ShareMethod::Get, request)).await
    }

    /// # Errors
    ///
    /// See [`DockGateway::execute`].
    pub async fn list_shares(&self, request: ShareRequest) -> Result<Response, DockError> {
        self.execute(DockOperation::share(ShareMethod::List, request)).await
    }

    /// # Errors
    ///
    /// See [`DockGateway::execute`].
    pub async fn delete_share(&self, request: ShareRequest) -> Result<Response, DockError> {
        self.execute(DockOperation::share(ShareMethod::Delete, request)).await
    }

    /// # Errors
    ///
    /// See [`DockGateway::execute`].
    pub async fn attach_share(&self, request: ShareRequest) -> Result<Response, DockError> {
        self.execute(DockOperation::share(ShareMethod::Attach, request)).await
    }

    /// # Errors
    ///
    /// See [`DockGateway::execute`].
    pub async fn detach_share(&self, request: ShareRequest) -> Result<Response, DockError> {
        self.execute(DockOperation::share(ShareMethod::Detach, request)).await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
