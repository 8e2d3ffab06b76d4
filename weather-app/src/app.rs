//! The view model composing the three injected clients.
//!
//! All state lives here and is mutated only by the task driving
//! [`AppViewModel::run`] (or [`AppViewModel::settle`] in tests), so no
//! locking is needed. Client calls are awaited inline in that loop;
//! results land back on the same task before state changes.

use std::sync::Arc;

use futures::{FutureExt, StreamExt};
use weather_core::{
    AuthorizationStatus, ConsolidatedWeather, EventStream, Location, LocationClient,
    LocationEvent, NetworkPath, PathMonitorClient, PathStatus, WeatherClient,
};

/// UI state plus the event-composition policy that feeds it.
pub struct AppViewModel {
    pub current_location: Option<Location>,
    pub is_connected: bool,
    pub weather_results: Vec<ConsolidatedWeather>,
    /// Most recent failure worth telling the user about. The original
    /// UI dropped these on the floor; here they are observable state,
    /// cleared again by the next successful refresh.
    pub alert: Option<String>,

    location_client: Arc<dyn LocationClient>,
    weather_client: Arc<dyn WeatherClient>,
    location_events: EventStream<LocationEvent>,
    path_updates: EventStream<NetworkPath>,
    last_path_status: Option<PathStatus>,
}

impl AppViewModel {
    /// Wire the clients together. Subscriptions start here; if location
    /// permission was already granted, a location fix is requested
    /// immediately so the app converges without a button tap.
    pub fn new(
        location_client: Arc<dyn LocationClient>,
        path_monitor_client: &dyn PathMonitorClient,
        weather_client: Arc<dyn WeatherClient>,
    ) -> Self {
        let location_events = location_client.delegate();
        let path_updates = path_monitor_client.paths();

        let view_model = Self {
            current_location: None,
            is_connected: true,
            weather_results: Vec::new(),
            alert: None,
            location_client,
            weather_client,
            location_events,
            path_updates,
            last_path_status: None,
        };

        if view_model.location_client.authorization_status().is_authorized() {
            view_model.location_client.request_location();
        }

        view_model
    }

    /// The "locate me" action.
    pub fn location_button_tapped(&mut self) {
        match self.location_client.authorization_status() {
            AuthorizationStatus::NotDetermined => {
                self.location_client.request_authorization();
            }
            AuthorizationStatus::Denied | AuthorizationStatus::Restricted => {
                self.alert = Some("Please give us location access.".into());
            }
            AuthorizationStatus::AuthorizedAlways | AuthorizationStatus::AuthorizedWhenInUse => {
                self.location_client.request_location();
            }
        }
    }

    /// Drive the composition, invoking `on_change` after each
    /// processed event. Live streams never end, so this runs until the
    /// surrounding task is cancelled.
    pub async fn run(&mut self, mut on_change: impl FnMut(&Self)) {
        loop {
            tokio::select! {
                Some(event) = self.location_events.next() => self.location_event(event).await,
                Some(path) = self.path_updates.next() => self.path_update(path).await,
                else => break,
            }
            on_change(self);
        }
    }

    /// Process every immediately-ready event and stop. Lets tests and
    /// one-shot renders reach a quiescent state deterministically.
    pub async fn settle(&mut self) {
        loop {
            let event = self.location_events.next().now_or_never().flatten();
            if let Some(event) = event {
                self.location_event(event).await;
                continue;
            }

            let path = self.path_updates.next().now_or_never().flatten();
            if let Some(path) = path {
                self.path_update(path).await;
                continue;
            }

            break;
        }
    }

    /// React to a reachability observation. Consecutive repeats are
    /// dropped here so a chatty monitor cannot cause refresh churn.
    async fn path_update(&mut self, path: NetworkPath) {
        if self.last_path_status == Some(path.status) {
            return;
        }
        self.last_path_status = Some(path.status);

        match path.status {
            PathStatus::Satisfied => {
                self.is_connected = true;
                self.refresh_weather().await;
            }
            PathStatus::Unsatisfied => {
                // Stale results would look current; drop them now
                // rather than waiting for a refresh to fail.
                self.is_connected = false;
                self.weather_results.clear();
            }
        }
    }

    async fn location_event(&mut self, event: LocationEvent) {
        match event {
            LocationEvent::DidChangeAuthorization(status) => {
                if status.is_authorized() {
                    self.location_client.request_location();
                } else if matches!(
                    status,
                    AuthorizationStatus::Denied | AuthorizationStatus::Restricted
                ) {
                    self.alert = Some("Please give us location access.".into());
                }
            }
            LocationEvent::DidUpdateLocations(coordinates) => {
                let Some(coordinate) = coordinates.first().copied() else {
                    return;
                };

                match self.weather_client.search_locations(coordinate).await {
                    Ok(locations) => {
                        if let Some(location) = locations.into_iter().next() {
                            self.current_location = Some(location);
                            self.refresh_weather().await;
                        }
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "location search failed");
                        self.alert = Some(format!("Location search failed: {err}"));
                    }
                }
            }
            LocationEvent::DidFail(reason) => {
                tracing::warn!(%reason, "locator reported failure");
                self.alert = Some(format!("Could not determine location: {reason}"));
            }
        }
    }

    /// Replace the forecast for the current location. Results are
    /// cleared up front, so a failed fetch leaves the list empty rather
    /// than stale.
    async fn refresh_weather(&mut self) {
        let Some(location) = self.current_location.clone() else {
            return;
        };

        self.weather_results.clear();

        match self.weather_client.weather(location.woeid).await {
            Ok(response) => {
                self.weather_results = response.consolidated_weather;
                self.alert = None;
            }
            Err(err) => {
                tracing::warn!(woeid = location.woeid, error = %err, "weather fetch failed");
                self.alert = Some(format!("Weather fetch failed: {err}"));
            }
        }
    }
}
