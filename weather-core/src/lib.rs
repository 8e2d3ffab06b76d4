//! Core library for the composable weather app.
//!
//! This crate defines:
//! - Shared domain models (forecasts, locations, path status, events)
//! - Three small client abstractions (path monitoring, location,
//!   weather fetching), each with a live implementation and mocks
//! - Configuration handling
//!
//! It is used by `weather-app`, but can also be reused by other binaries
//! or services. The clients hold no shared logic: each is a thin adapter
//! over its backend, interchangeable with its mocks via injection.

pub mod config;
pub mod error;
pub mod location;
pub mod model;
pub mod path_monitor;
pub mod weather;

mod events;

pub use config::Config;
pub use error::ClientError;
pub use events::EventStream;
pub use location::{LiveLocationClient, LocationClient, MockLocationClient};
pub use model::{
    AuthorizationStatus, ConsolidatedWeather, Coordinate, Location, LocationEvent, NetworkPath,
    PathStatus, WeatherResponse,
};
pub use path_monitor::{FlakyPathMonitor, LivePathMonitor, MockPathMonitor, PathMonitorClient};
pub use weather::{LiveWeatherClient, MockWeatherClient, WeatherClient};
