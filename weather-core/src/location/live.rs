use std::sync::{Arc, Mutex, PoisonError};

use reqwest::Client;
use serde::Deserialize;

use crate::config::Config;
use crate::events::{EventStream, Subject};
use crate::model::{AuthorizationStatus, Coordinate, LocationEvent};

use super::LocationClient;

/// Locator backed by an IP-geolocation lookup.
///
/// A terminal process has no GPS and no OS permission prompt, so this
/// client approximates the device locator: coordinates come from a
/// geolocation endpoint, and authorization is process-local state that
/// the first `request_authorization` flips to granted. Every outcome is
/// still delivered through the delegate stream, exactly like a
/// platform-delegate bridge would.
#[derive(Debug, Clone)]
pub struct LiveLocationClient {
    http: Client,
    geolocation_url: String,
    status: Arc<Mutex<AuthorizationStatus>>,
    subject: Arc<Subject<LocationEvent>>,
}

#[derive(Debug, Deserialize)]
struct GeolocationResponse {
    status: String,
    #[serde(default)]
    lat: f64,
    #[serde(default)]
    lon: f64,
}

impl LiveLocationClient {
    pub fn new(geolocation_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            geolocation_url: geolocation_url.into(),
            status: Arc::new(Mutex::new(AuthorizationStatus::NotDetermined)),
            subject: Arc::new(Subject::new()),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.geolocation_url.clone())
    }

    async fn locate(http: Client, url: String) -> Result<Coordinate, String> {
        let response = http
            .get(&url)
            .send()
            .await
            .map_err(|err| format!("geolocation request failed: {err}"))?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("geolocation endpoint returned status {status}"));
        }

        let parsed: GeolocationResponse = response
            .json()
            .await
            .map_err(|err| format!("failed to decode geolocation response: {err}"))?;

        if parsed.status != "success" {
            return Err(format!("geolocation lookup failed: {}", parsed.status));
        }

        Ok(Coordinate { latitude: parsed.lat, longitude: parsed.lon })
    }
}

impl LocationClient for LiveLocationClient {
    fn authorization_status(&self) -> AuthorizationStatus {
        *self.status.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn request_authorization(&self) {
        let mut status = self.status.lock().unwrap_or_else(PoisonError::into_inner);
        if *status == AuthorizationStatus::NotDetermined {
            *status = AuthorizationStatus::AuthorizedWhenInUse;
            drop(status);
            self.subject
                .send(LocationEvent::DidChangeAuthorization(AuthorizationStatus::AuthorizedWhenInUse));
        }
    }

    fn request_location(&self) {
        let http = self.http.clone();
        let url = self.geolocation_url.clone();
        let subject = Arc::clone(&self.subject);

        tokio::spawn(async move {
            match Self::locate(http, url).await {
                Ok(coordinate) => {
                    tracing::debug!(?coordinate, "geolocation fix");
                    subject.send(LocationEvent::DidUpdateLocations(vec![coordinate]));
                }
                Err(reason) => {
                    tracing::warn!(%reason, "geolocation lookup failed");
                    subject.send(LocationEvent::DidFail(reason));
                }
            }
        });
    }

    fn delegate(&self) -> EventStream<LocationEvent> {
        self.subject.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    #[tokio::test]
    async fn first_authorization_request_grants_and_notifies() {
        let client = LiveLocationClient::new("http://ip-api.invalid/json");
        let mut delegate = client.delegate();

        assert_eq!(client.authorization_status(), AuthorizationStatus::NotDetermined);

        client.request_authorization();
        assert_eq!(client.authorization_status(), AuthorizationStatus::AuthorizedWhenInUse);
        assert_eq!(
            delegate.next().await,
            Some(LocationEvent::DidChangeAuthorization(
                AuthorizationStatus::AuthorizedWhenInUse
            ))
        );

        // Repeat requests are no-ops once a decision exists.
        client.request_authorization();
        assert_eq!(client.authorization_status(), AuthorizationStatus::AuthorizedWhenInUse);
    }

    #[tokio::test]
    async fn unresolvable_endpoint_reports_failure_on_the_delegate() {
        let client = LiveLocationClient::new("http://ip-api.invalid/json");
        let mut delegate = client.delegate();

        client.request_location();

        match delegate.next().await {
            Some(LocationEvent::DidFail(reason)) => {
                assert!(reason.contains("geolocation request failed"));
            }
            other => panic!("expected DidFail, got {other:?}"),
        }
    }

    #[test]
    fn geolocation_response_decodes() {
        let json = r#"{ "status": "success", "lat": 51.5074, "lon": -0.1278, "city": "London" }"#;
        let parsed: GeolocationResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.status, "success");
        assert_eq!(parsed.lat, 51.5074);
        assert_eq!(parsed.lon, -0.1278);
    }
}
