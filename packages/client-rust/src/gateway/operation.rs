//! Operation catalog, call envelopes, and gateway errors.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use dockgate_core::{Response, ShareRequest, VolumeRequest};
use uuid::Uuid;

use crate::connection::ConnectError;

// ---------------------------------------------------------------------------
// Method catalog
// ---------------------------------------------------------------------------

/// Generate a method enum with its RPC name, log description, and CLI name.
macro_rules! method_catalog {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $variant:ident => $rpc:literal, $describe:literal, $cli:literal; )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $variant, )+
        }

        impl $name {
            /// Every method, in catalog order.
            pub const ALL: &'static [$name] = &[$( $name::$variant, )+];

            /// Name of the remote procedure on the `Dock` service.
            #[must_use]
            pub fn rpc_name(self) -> &'static str {
                match self {
                    $( $name::$variant => $rpc, )+
                }
            }

            /// Human-readable action used in log lines.
            #[must_use]
            pub fn describe(self) -> &'static str {
                match self {
                    $( $name::$variant => $describe, )+
                }
            }

            /// Kebab-case name accepted on the command line.
            #[must_use]
            pub fn cli_name(self) -> &'static str {
                match self {
                    $( $name::$variant => $cli, )+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.cli_name())
            }
        }

        impl FromStr for $name {
            type Err = UnknownMethod;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $cli => Ok($name::$variant), )+
                    other => Err(UnknownMethod {
                        family: stringify!($name),
                        name: other.to_string(),
                    }),
                }
            }
        }
    };
}

method_catalog!(
    /// Volume-family operations. All of them route by `VolumeRequest::dock_info`.
    VolumeMethod {
        Create => "CreateVolume", "create volume", "create";
        Get => "GetVolume", "get volume", "get";
        Delete => "DeleteVolume", "delete volume", "delete";
        CreateAttachment => "CreateVolumeAttachment", "create volume attachment", "create-attachment";
        UpdateAttachment => "UpdateVolumeAttachment", "update volume attachment", "update-attachment";
        DeleteAttachment => "DeleteVolumeAttachment", "delete volume attachment", "delete-attachment";
        CreateSnapshot => "CreateVolumeSnapshot", "create volume snapshot", "create-snapshot";
        GetSnapshot => "GetVolumeSnapshot", "get volume snapshot", "get-snapshot";
        DeleteSnapshot => "DeleteVolumeSnapshot", "delete volume snapshot", "delete-snapshot";
    }
);

method_catalog!(
    /// Share-family operations. These carry no routing data.
    ShareMethod {
        Create => "CreateShare", "create share", "create";
        Get => "GetShare", "get share", "get";
        List => "ListShares", "list shares", "list";
        Delete => "DeleteShare", "delete share", "delete";
        Attach => "AttachShare", "attach share", "attach";
        Detach => "DetachShare", "detach share", "detach";
    }
);

/// A method name that is not in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {family} method: {name}")]
pub struct UnknownMethod {
    pub family: &'static str,
    pub name: String,
}

// ---------------------------------------------------------------------------
// DockCall
// ---------------------------------------------------------------------------

/// Exactly one remote invocation on the `Dock` service.
#[derive(Debug, Clone, PartialEq)]
pub enum DockCall {
    Volume {
        method: VolumeMethod,
        request: VolumeRequest,
    },
    Share {
        method: ShareMethod,
        request: ShareRequest,
    },
}

impl DockCall {
    /// Name of the remote procedure this call invokes.
    #[must_use]
    pub fn rpc_name(&self) -> &'static str {
        match self {
            Self::Volume { method, .. } => method.rpc_name(),
            Self::Share { method, .. } => method.rpc_name(),
        }
    }

    /// Human-readable action used in log lines.
    #[must_use]
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Volume { method, .. } => method.describe(),
            Self::Share { method, .. } => method.describe(),
        }
    }
}

// ---------------------------------------------------------------------------
// DockOperation
// ---------------------------------------------------------------------------

/// Context carried with every operation through the service pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationContext {
    /// Correlates the log lines of one call.
    pub call_id: Uuid,
    /// Caller-imposed deadline. Only read by `TimeoutLayer`; the gateway
    /// never attaches a deadline to the remote call.
    pub call_timeout: Option<Duration>,
}

impl OperationContext {
    /// Fresh context with a random call id and no deadline.
    #[must_use]
    pub fn new() -> Self {
        Self {
            call_id: Uuid::new_v4(),
            call_timeout: None,
        }
    }

    /// Set a caller-imposed deadline.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = Some(timeout);
        self
    }
}

impl Default for OperationContext {
    fn default() -> Self {
        Self::new()
    }
}

/// A `DockCall` plus its pipeline context.
#[derive(Debug, Clone, PartialEq)]
pub struct DockOperation {
    pub ctx: OperationContext,
    pub call: DockCall,
}

impl DockOperation {
    /// Volume-family operation with a fresh context.
    #[must_use]
    pub fn volume(method: VolumeMethod, request: VolumeRequest) -> Self {
        Self {
            ctx: OperationContext::new(),
            call: DockCall::Volume { method, request },
        }
    }

    /// Share-family operation with a fresh context.
    #[must_use]
    pub fn share(method: ShareMethod, request: ShareRequest) -> Self {
        Self {
            ctx: OperationContext::new(),
            call: DockCall::Share { method, request },
        }
    }

    /// Set a caller-imposed deadline.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.ctx = self.ctx.with_timeout(timeout);
        self
    }

    #[must_use]
    pub fn ctx(&self) -> &OperationContext {
        &self.ctx
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failure of a single gateway call.
///
/// The gateway produces only `Connect` and `Remote`, each carrying the raw
/// error of the layer that failed. A malformed routing descriptor is never an
/// error by itself.
#[derive(Debug, thiserror::Error)]
pub enum DockError {
    #[error(transparent)]
    Connect(#[from] ConnectError),
    #[error("dock call failed: {0}")]
    Remote(#[from] tonic::Status),
    /// Produced only by the opt-in `TimeoutLayer`.
    #[error("operation exceeded caller deadline of {timeout:?}")]
    DeadlineExceeded { timeout: Duration },
}

impl DockError {
    /// The remote status, when the dock itself rejected the call.
    #[must_use]
    pub fn status(&self) -> Option<&tonic::Status> {
        match self {
            Self::Remote(status) => Some(status),
            _ => None,
        }
    }
}

/// Split a gateway result into the `(Response, error)` pair shape.
///
/// On error the response is `Response::default()`; callers must treat a
/// present error as authoritative.
#[must_use]
pub fn split_outcome(result: Result<Response, DockError>) -> (Response, Option<DockError>) {
    match result {
        Ok(response) => (response, None),
        Err(err) => (Response::default(), Some(err)),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
