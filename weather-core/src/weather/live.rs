use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::error::{truncate_body, ClientError};
use crate::model::{Coordinate, Location, WeatherResponse};

use super::WeatherClient;

/// HTTP client for the weather API.
///
/// One GET per operation, no retries: a failure is mapped into
/// [`ClientError`] and handed straight back.
#[derive(Debug, Clone)]
pub struct LiveWeatherClient {
    http: Client,
    base_url: String,
}

impl LiveWeatherClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.weather_base_url.clone())
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T, ClientError> {
        tracing::debug!(%url, "weather api request");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| ClientError::Transport { url: url.clone(), source })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| ClientError::Transport { url: url.clone(), source })?;

        if !status.is_success() {
            return Err(ClientError::UnexpectedStatus {
                url,
                status,
                body: truncate_body(&body),
            });
        }

        serde_json::from_str(&body).map_err(|source| ClientError::Decode { url, source })
    }
}

#[async_trait]
impl WeatherClient for LiveWeatherClient {
    async fn weather(&self, woeid: i64) -> Result<WeatherResponse, ClientError> {
        let url = format!("{}/api/location/{woeid}", self.base_url);
        self.get_json(url).await
    }

    async fn search_locations(
        &self,
        coordinate: Coordinate,
    ) -> Result<Vec<Location>, ClientError> {
        let url = format!(
            "{}/api/location/search?latlong={},{}",
            self.base_url, coordinate.latitude, coordinate.longitude
        );
        self.get_json(url).await
    }
}
