//! Metrics middleware for dock operations.
//!
//! Wraps every operation in a `tracing` span and records counters and a
//! duration histogram through the `metrics` facade. Nothing is exported unless
//! the embedding process installs a recorder.

use std::task::{Context, Poll};
use std::time::Instant;

use dockgate_core::Response;
use tower::{Layer, Service};
use tracing::{info_span, Instrument};

use crate::gateway::service::DockFuture;
use crate::gateway::{DockError, DockOperation};

/// Counter of completed operations, labeled by `rpc` and `outcome`.
pub const OPERATIONS_TOTAL: &str = "dockgate_operations_total";
/// Histogram of operation durations in seconds, labeled by `rpc`.
pub const OPERATION_DURATION_SECONDS: &str = "dockgate_operation_duration_seconds";

// ---------------------------------------------------------------------------
// MetricsLayer
// ---------------------------------------------------------------------------

/// Tower layer that instruments operations with timing and outcome.
#[derive(Debug, Clone)]
pub struct MetricsLayer;

impl<S> Layer<S> for MetricsLayer {
    type Service = MetricsService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MetricsService { inner }
    }
}

// ---------------------------------------------------------------------------
// MetricsService
// ---------------------------------------------------------------------------

/// Service wrapper that records operation duration and outcome.
#[derive(Debug, Clone)]
pub struct MetricsService<S> {
    inner: S,
}

fn outcome(result: &Result<Response, DockError>) -> &'static str {
    match result {
        Ok(_) => "ok",
        Err(DockError::Connect(_)) => "connect_error",
        Err(DockError::Remote(_)) => "remote_error",
        Err(DockError::DeadlineExceeded { .. }) => "deadline_exceeded",
    }
}

impl<S> Service<DockOperation> for MetricsService<S>
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
        let rpc = op.call.rpc_name();
        let call_id = op.ctx().call_id;

        let span = info_span!(
            "dock_operation",
            rpc = rpc,
            call_id = %call_id,
            duration_ms = tracing::field::Empty,
            outcome = tracing::field::Empty,
        );

        let fut = self.inner.call(op);

        Box::pin(
            async move {
                let start = Instant::now();
                let result = fut.await;
                let elapsed = start.elapsed();
                let outcome = outcome(&result);

                #[allow(clippy::cast_possible_truncation)]
                let duration_ms = elapsed.as_millis() as u64;
                tracing::Span::current().record("duration_ms", duration_ms);
                tracing::Span::current().record("outcome", outcome);

                ::metrics::counter!(OPERATIONS_TOTAL, "rpc" => rpc, "outcome" => outcome)
                    .increment(1);
                ::metrics::histogram!(OPERATION_DURATION_SECONDS, "rpc" => rpc)
                    .record(elapsed.as_secs_f64());

                tracing::info!(rpc, %call_id, duration_ms, outcome, "operation complete");

                result
            }
            .instrument(span),
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use dockgate_core::ShareRequest;
    use tower::ServiceExt;

    use super::*;
    use crate::gateway::{DockGateway, ShareMethod};
    use crate::resolver::AddressResolver;
    use crate::test_support::{ok_response, StubConnector};

    #[tokio::test]
    async fn metrics_layer_passes_through_response() {
        let stub = StubConnector::responding(ok_response("share-1"));
        let gw = DockGateway::with_connector(AddressResolver::new(50050), stub);
        let svc = MetricsLayer.layer(gw);

        let op = DockOperation::share(ShareMethod::List, ShareRequest::default());
        let resp = svc.oneshot(op).await.unwrap();
        assert_eq!(resp, ok_response("share-1"));
    }

    #[tokio::test]
    async fn metrics_layer_passes_through_error() {
        let stub = StubConnector::refusing();
        let gw = DockGateway::with_connector(AddressResolver::new(50050), stub);
        let svc = MetricsLayer.layer(gw);

        let op = DockOperation::share(ShareMethod::Attach, ShareRequest::default());
        let err = svc.oneshot(op).await.unwrap_err();
        assert!(matches!(err, DockError::Connect(_)));
    }

    #[test]
    fn outcome_labels() {
        assert_eq!(outcome(&Ok(Response::default())), "ok");
        assert_eq!(
            outcome(&Err(DockError::Remote(tonic::Status::internal("boom")))),
            "remote_error"
        );
    }
}
