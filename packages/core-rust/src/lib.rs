//! `dockgate` Core: dock wire messages, the `Dock` gRPC client stub, and the
//! routing descriptor carried inside volume requests.

pub mod dock;
pub mod proto;

pub use dock::{DockInfo, EmptyReason, ParsedDockInfo};
pub use proto::{Response, ShareRequest, VolumeRequest};
