use std::fmt::Debug;

use crate::events::EventStream;
use crate::model::NetworkPath;

pub mod live;
pub mod mocks;

pub use live::LivePathMonitor;
pub use mocks::{FlakyPathMonitor, MockPathMonitor};

/// Reachability source.
///
/// `paths` hands back a lazy, non-restartable sequence of path values.
/// The live variant starts its monitor on subscription and stops it
/// when the stream is dropped; mocks replay a script.
pub trait PathMonitorClient: Send + Sync + Debug {
    fn paths(&self) -> EventStream<NetworkPath>;
}
