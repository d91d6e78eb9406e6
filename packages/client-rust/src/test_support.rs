//! Test doubles for the gateway.
//!
//! `StubConnector` records every dialed address, every remote invocation, and
//! every channel release so tests can observe the connection lifecycle.
//! `EchoDock` is a real gRPC dock on loopback for exercising the wire path.

use std::collections::HashSet;
use std::convert::Infallible;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use dockgate_core::{Response, ShareRequest, VolumeRequest};
use parking_lot::Mutex;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::codec::ProstCodec;
use tonic::codegen::{http, Body, BoxFuture, Context, Poll, Service, StdError};

use crate::connection::ConnectError;
use crate::gateway::{DockCall, ShareMethod};
use crate::resolver::DockAddress;
use crate::traits::{DockChannel, DockConnector};

pub(crate) fn ok_response(message: &str) -> Response {
    Response {
        status: "Success".to_string(),
        message: message.to_string(),
        error: String::new(),
    }
}

pub(crate) fn volume_request(dock_info: &str) -> VolumeRequest {
    VolumeRequest {
        dock_info: dock_info.to_string(),
        ..VolumeRequest::default()
    }
}

#[derive(Debug, Clone)]
enum Behavior {
    Respond(Response),
    Fail(tonic::Code, String),
    Refuse,
    Panic,
}

#[derive(Debug, Default)]
struct Record {
    addresses: Vec<String>,
    invocations: Vec<DockCall>,
    channels: HashSet<u64>,
    released: usize,
}

#[derive(Debug, Clone)]
pub(crate) struct StubConnector {
    behavior: Behavior,
    delay: Option<Duration>,
    record: Arc<Mutex<Record>>,
    next_channel: Arc<AtomicU64>,
}

impl StubConnector {
    fn with_behavior(behavior: Behavior) -> Self {
        Self {
            behavior,
            delay: None,
            record: Arc::new(Mutex::new(Record::default())),
            next_channel: Arc::new(AtomicU64::new(1)),
        }
    }

    pub(crate) fn responding(response: Response) -> Self {
        Self::with_behavior(Behavior::Respond(response))
    }

    pub(crate) fn failing(status: tonic::Status) -> Self {
        Self::with_behavior(Behavior::Fail(status.code(), status.message().to_string()))
    }

    pub(crate) fn refusing() -> Self {
        Self::with_behavior(Behavior::Refuse)
    }

    pub(crate) fn panicking() -> Self {
        Self::with_behavior(Behavior::Panic)
    }

    /// Make every remote call take `delay` before answering.
    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub(crate) fn connects(&self) -> usize {
        self.record.lock().addresses.len()
    }

    pub(crate) fn addresses(&self) -> Vec<String> {
        self.record.lock().addresses.clone()
    }

    pub(crate) fn invocations(&self) -> Vec<DockCall> {
        self.record.lock().invocations.clone()
    }

    pub(crate) fn released(&self) -> usize {
        self.record.lock().released
    }

    pub(crate) fn distinct_channels(&self) -> usize {
        self.record.lock().channels.len()
    }

    /// Channels handed out and not yet released.
    pub(crate) fn live(&self) -> usize {
        let record = self.record.lock();
        record.channels.len() - record.released
    }
}

#[async_trait]
impl DockConnector for StubConnector {
    type Channel = StubChannel;

    async fn connect(&self, address: &DockAddress) -> Result<StubChannel, ConnectError> {
        self.record.lock().addresses.push(address.to_string());

        if matches!(self.behavior, Behavior::Refuse) {
            return Err(ConnectError::Io {
                address: address.to_string(),
                source: std::io::Error::from(std::io::ErrorKind::ConnectionRefused),
            });
        }

        let id = self.next_channel.fetch_add(1, Ordering::Relaxed);
        self.record.lock().channels.insert(id);
        Ok(StubChannel {
            behavior: self.behavior.clone(),
            delay: self.delay,
            record: Arc::clone(&self.record),
        })
    }
}

#[derive(Debug)]
pub(crate) struct StubChannel {
    behavior: Behavior,
    delay: Option<Duration>,
    record: Arc<Mutex<Record>>,
}

#[async_trait]
impl DockChannel for StubChannel {
    async fn invoke(&mut self, call: DockCall) -> Result<Response, tonic::Status> {
        self.record.lock().invocations.push(call);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match &self.behavior {
            Behavior::Respond(response) => Ok(response.clone()),
            Behavior::Fail(code, message) => Err(tonic::Status::new(*code, message.clone())),
            Behavior::Panic => panic!("stub dock channel panicked mid-call"),
            Behavior::Refuse => unreachable!("refusing connector never hands out channels"),
        }
    }
}

impl Drop for StubChannel {
    fn drop(&mut self) {
        self.record.lock().released += 1;
    }
}

// ---------------------------------------------------------------------------
// EchoDock
// ---------------------------------------------------------------------------

/// Full gRPC path of a dock RPC.
pub(crate) fn dock_rpc_path(rpc: &str) -> String {
    format!("/opensds.Dock/{rpc}")
}

/// A request as decoded by the dock.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Received {
    Volume(VolumeRequest),
    Share(ShareRequest),
}

/// Minimal `opensds.Dock` server: decodes each request with the message type
/// its path implies, records it, and answers with the request path as the
/// response message.
#[derive(Debug, Clone, Default)]
pub(crate) struct EchoDock {
    received: Arc<Mutex<Vec<(String, Received)>>>,
}

impl EchoDock {
    /// `(path, decoded request)` pairs in arrival order.
    pub(crate) fn received(&self) -> Vec<(String, Received)> {
        self.received.lock().clone()
    }
}

/// Serve an `EchoDock` on `127.0.0.1` and return its port.
pub(crate) async fn spawn_echo_dock() -> (u16, EchoDock) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind local dock");
    let port = listener.local_addr().expect("local dock address").port();
    let dock = EchoDock::default();
    let service = dock.clone();
    tokio::spawn(async move {
        let _ = tonic::transport::Server::builder()
            .add_service(service)
            .serve_with_incoming(TcpListenerStream::new(listener))
            .await;
    });
    (port, dock)
}

struct EchoCall {
    path: String,
    received: Arc<Mutex<Vec<(String, Received)>>>,
}

impl EchoCall {
    fn answer(&self, request: Received) -> BoxFuture<tonic::Response<Response>, tonic::Status> {
        self.received.lock().push((self.path.clone(), request));
        let response = Response {
            status: "Success".to_string(),
            message: self.path.clone(),
            error: String::new(),
        };
        Box::pin(async move { Ok::<_, tonic::Status>(tonic::Response::new(response)) })
    }
}

impl tonic::server::UnaryService<VolumeRequest> for EchoCall {
    type Response = Response;
    type Future = BoxFuture<tonic::Response<Response>, tonic::Status>;

    fn call(&mut self, request: tonic::Request<VolumeRequest>) -> Self::Future {
        self.answer(Received::Volume(request.into_inner()))
    }
}

impl tonic::server::UnaryService<ShareRequest> for EchoCall {
    type Response = Response;
    type Future = BoxFuture<tonic::Response<Response>, tonic::Status>;

    fn call(&mut self, request: tonic::Request<ShareRequest>) -> Self::Future {
        self.answer(Received::Share(request.into_inner()))
    }
}

impl<B> Service<http::Request<B>> for EchoDock
where
    B: Body + Send + 'static,
    B::Error: Into<StdError> + Send + 'static,
{
    type Response = http::Response<tonic::body::BoxBody>;
    type Error = Infallible;
    type Future = BoxFuture<Self::Response, Self::Error>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: http::Request<B>) -> Self::Future {
        let path = req.uri().path().to_string();
        let is_share = ShareMethod::ALL
            .iter()
            .any(|method| path == dock_rpc_path(method.rpc_name()));
        let call = EchoCall {
            path,
            received: Arc::clone(&self.received),
        };
        Box::pin(async move {
            let response = if is_share {
                let mut grpc =
                    tonic::server::Grpc::new(ProstCodec::<Response, ShareRequest>::default());
                grpc.unary(call, req).await
            } else {
                let mut grpc =
                    tonic::server::Grpc::new(ProstCodec::<Response, VolumeRequest>::default());
                grpc.unary(call, req).await
            };
            Ok::<_, Infallible>(response)
        })
    }
}

impl tonic::server::NamedService for EchoDock {
    const NAME: &'static str = "opensds.Dock";
}
