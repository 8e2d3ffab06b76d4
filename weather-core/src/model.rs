use chrono::NaiveDate;
use serde::Deserialize;

/// Forecast document returned by the weather API.
///
/// Immutable after decode; the wire format is snake_case with
/// `yyyy-MM-dd` dates, which is exactly what serde + chrono derive.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WeatherResponse {
    pub consolidated_weather: Vec<ConsolidatedWeather>,
}

/// One forecast-day entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ConsolidatedWeather {
    pub applicable_date: NaiveDate,
    pub id: i64,
    pub max_temp: f64,
    pub min_temp: f64,
    pub the_temp: f64,
}

/// A named place, produced by coordinate search.
///
/// `woeid` ("Where On Earth ID") is the identifier the weather API
/// keys forecasts on.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Location {
    pub title: String,
    pub woeid: i64,
}

/// A raw coordinate as reported by a locator backend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// Whether the device currently has a usable network path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathStatus {
    Satisfied,
    Unsatisfied,
}

/// A network path observation emitted by a path monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkPath {
    pub status: PathStatus,
}

impl NetworkPath {
    pub const fn satisfied() -> Self {
        Self { status: PathStatus::Satisfied }
    }

    pub const fn unsatisfied() -> Self {
        Self { status: PathStatus::Unsatisfied }
    }
}

/// Location permission state, relayed verbatim by the location client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizationStatus {
    NotDetermined,
    Restricted,
    Denied,
    AuthorizedAlways,
    AuthorizedWhenInUse,
}

impl AuthorizationStatus {
    pub fn is_authorized(self) -> bool {
        matches!(self, Self::AuthorizedAlways | Self::AuthorizedWhenInUse)
    }
}

/// Delegate-style notification from a locator backend, modeled as a
/// tagged stream event. The failure reason is opaque text.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationEvent {
    DidChangeAuthorization(AuthorizationStatus),
    DidUpdateLocations(Vec<Coordinate>),
    DidFail(String),
}
