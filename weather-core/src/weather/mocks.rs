use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use reqwest::StatusCode;

use crate::error::ClientError;
use crate::model::{ConsolidatedWeather, Coordinate, Location, WeatherResponse};

use super::WeatherClient;

/// Request counters shared between a mock and the test observing it.
#[derive(Debug, Clone, Default)]
pub struct WeatherCallLog {
    weather: Arc<AtomicUsize>,
    search: Arc<AtomicUsize>,
}

impl WeatherCallLog {
    pub fn weather_requests(&self) -> usize {
        self.weather.load(Ordering::SeqCst)
    }

    pub fn search_requests(&self) -> usize {
        self.search.load(Ordering::SeqCst)
    }
}

/// Canned weather backend. `None` responses make the corresponding
/// operation fail, so failure paths are as injectable as happy ones.
#[derive(Debug)]
pub struct MockWeatherClient {
    forecast: Option<WeatherResponse>,
    locations: Option<Vec<Location>>,
    log: WeatherCallLog,
}

impl MockWeatherClient {
    /// A pleasant two-day forecast and a single search result.
    pub fn happy_path() -> Self {
        let today = Utc::now().date_naive();
        Self::with_responses(
            WeatherResponse {
                consolidated_weather: vec![
                    ConsolidatedWeather {
                        applicable_date: today,
                        id: 1,
                        max_temp: 30.0,
                        min_temp: 10.0,
                        the_temp: 20.0,
                    },
                    ConsolidatedWeather {
                        applicable_date: today + Duration::days(1),
                        id: 2,
                        max_temp: -10.0,
                        min_temp: -30.0,
                        the_temp: -20.0,
                    },
                ],
            },
            vec![Location { title: "New York".into(), woeid: 2_459_115 }],
        )
    }

    /// Both operations error.
    pub fn failing() -> Self {
        Self { forecast: None, locations: None, log: WeatherCallLog::default() }
    }

    /// Fixed responses for both operations.
    pub fn with_responses(forecast: WeatherResponse, locations: Vec<Location>) -> Self {
        Self {
            forecast: Some(forecast),
            locations: Some(locations),
            log: WeatherCallLog::default(),
        }
    }

    /// Searches succeed, forecasts fail.
    pub fn failing_forecast(locations: Vec<Location>) -> Self {
        Self { forecast: None, locations: Some(locations), log: WeatherCallLog::default() }
    }

    pub fn call_log(&self) -> WeatherCallLog {
        self.log.clone()
    }

    fn mock_failure(operation: &str) -> ClientError {
        ClientError::UnexpectedStatus {
            url: format!("mock://{operation}"),
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: "scripted failure".into(),
        }
    }
}

#[async_trait]
impl WeatherClient for MockWeatherClient {
    async fn weather(&self, _woeid: i64) -> Result<WeatherResponse, ClientError> {
        self.log.weather.fetch_add(1, Ordering::SeqCst);
        self.forecast
            .clone()
            .ok_or_else(|| Self::mock_failure("weather"))
    }

    async fn search_locations(
        &self,
        _coordinate: Coordinate,
    ) -> Result<Vec<Location>, ClientError> {
        self.log.search.fetch_add(1, Ordering::SeqCst);
        self.locations
            .clone()
            .ok_or_else(|| Self::mock_failure("search"))
    }
}
