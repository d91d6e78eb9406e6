//! Pipeline composition: wraps a `DockGateway` in the middleware layers.

use dockgate_core::Response;
use tower::ServiceBuilder;

use super::metrics::MetricsLayer;
use super::timeout::TimeoutLayer;
use crate::gateway::{DockError, DockGateway, DockOperation};
use crate::traits::DockConnector;

/// Build the operation pipeline around a gateway.
///
/// Layer order (outermost to innermost):
/// 1. `TimeoutLayer` -- apply the caller's deadline, if the operation has one
/// 2. `MetricsLayer` -- record timing and outcome (closest to the gateway)
///
/// The returned service implements `tower::Service<DockOperation>`.
#[must_use]
pub fn build_gateway_pipeline<C>(
    gateway: DockGateway<C>,
) -> impl tower::Service<DockOperation, Response = Response, Error = DockError> + Clone
where
    C: DockConnector + 'static,
    C::Channel: 'static,
{
    ServiceBuilder::new()
        .layer(TimeoutLayer)
        .layer(MetricsLayer)
        .service(gateway)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
