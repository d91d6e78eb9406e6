//! Tower middleware layers for the dock operation pipeline.
//!
//! - [`timeout`]: Caller-imposed per-operation deadlines
//! - [`metrics`]: Operation timing and outcome via `tracing` spans and `metrics`
//! - [`pipeline`]: Composes the layers around a `DockGateway`

pub mod metrics;
pub mod pipeline;
pub mod timeout;

pub use self::metrics::MetricsLayer;
pub use pipeline::build_gateway_pipeline;
pub use timeout::TimeoutLayer;
