//! Timeout middleware for dock operations.
//!
//! Applies the deadline carried in `ctx.call_timeout`, failing with
//! `DockError::DeadlineExceeded`. Operations without a deadline pass through
//! untouched, since the gateway never imposes one on its own.

use std::task::{Context, Poll};

use dockgate_core::Response;
use tower::{Layer, Service};

use crate::gateway::service::DockFuture;
use crate::gateway::{DockError, DockOperation};

// ---------------------------------------------------------------------------
// TimeoutLayer
// ---------------------------------------------------------------------------

/// Tower layer that wraps services with per-operation deadline enforcement.
#[derive(Debug, Clone)]
pub struct TimeoutLayer;

impl<S> Layer<S> for TimeoutLayer {
    type Service = TimeoutService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        TimeoutService { inner }
    }
}

// ---------------------------------------------------------------------------
// TimeoutService
// ---------------------------------------------------------------------------

/// Service wrapper that enforces caller-imposed deadlines.
#[derive(Debug, Clone)]
pub struct TimeoutService<S> {
    inner: S,
}

impl<S> Service<DockOperation> for TimeoutService<S>
where
    S: Service<DockOperation, Response = Response, Error = DockError> + Send,
    S::Future: Send + 'static,
{
    type Response = Response;
    type Error = DockError;
    type Future = DockFuture;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, op: DockOperation) -> Self::Future {
        let deadline = op.ctx().call_timeout;
        let fut = self.inner.call(op);
        Box::pin(async move {
            let Some(timeout) = deadline else {
                return fut.await;
            };
            // Dropping the timed-out future drops its connection guard too.
            match tokio::time::timeout(timeout, fut).await {
                Ok(result) => result,
                Err(_elapsed) => Err(DockError::DeadlineExceeded { timeout }),
            }
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
