use std::fmt::Debug;

use crate::events::EventStream;
use crate::model::{AuthorizationStatus, LocationEvent};

pub mod live;
pub mod mocks;

pub use live::LiveLocationClient;
pub use mocks::MockLocationClient;

/// Locator backend, shaped like a delegate-driven platform service.
///
/// `request_authorization` and `request_location` are fire-and-forget;
/// their outcomes arrive on the `delegate` stream as
/// [`LocationEvent`]s, forwarded verbatim. The client never interprets
/// authorization state, it only relays it.
pub trait LocationClient: Send + Sync + Debug {
    fn authorization_status(&self) -> AuthorizationStatus;

    fn request_authorization(&self);

    fn request_location(&self);

    fn delegate(&self) -> EventStream<LocationEvent>;
}
