//! `tower::Service` adapter so the gateway composes with middleware layers.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use dockgate_core::Response;
use tower::Service;

use super::{DockError, DockGateway, DockOperation};
use crate::traits::DockConnector;

/// Boxed future returned by dock operation services.
pub type DockFuture = Pin<Box<dyn Future<Output = Result<Response, DockError>> + Send>>;

impl<C> Service<DockOperation> for DockGateway<C>
where
    C: DockConnector + 'static,
    C::Channel: 'static,
{
    type Response = Response;
    type Error = DockError;
    type Future = DockFuture;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        // Each call dials its own channel; there is no shared capacity to wait on.
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, op: DockOperation) -> Self::Future {
        let gateway = self.clone();
        Box::pin(async move { gateway.execute(op).await })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
