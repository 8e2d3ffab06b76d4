use std::fmt::Debug;

use async_trait::async_trait;

use crate::error::ClientError;
use crate::model::{Coordinate, Location, WeatherResponse};

pub mod live;
pub mod mocks;

pub use live::LiveWeatherClient;
pub use mocks::MockWeatherClient;

/// A client for accessing weather data for locations.
///
/// Two independent one-shot operations, no streaming: fetch a forecast
/// by place id, and search places near a coordinate.
#[async_trait]
pub trait WeatherClient: Send + Sync + Debug {
    async fn weather(&self, woeid: i64) -> Result<WeatherResponse, ClientError>;

    async fn search_locations(&self, coordinate: Coordinate)
        -> Result<Vec<Location>, ClientError>;
}
