use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::events::{EventStream, Subject};
use crate::model::{AuthorizationStatus, Coordinate, LocationEvent};

use super::LocationClient;

/// Request counters shared between a mock and the test observing it.
#[derive(Debug, Clone, Default)]
pub struct LocationCallLog {
    authorization: Arc<AtomicUsize>,
    location: Arc<AtomicUsize>,
}

impl LocationCallLog {
    pub fn authorization_requests(&self) -> usize {
        self.authorization.load(Ordering::SeqCst)
    }

    pub fn location_requests(&self) -> usize {
        self.location.load(Ordering::SeqCst)
    }
}

/// Scriptable locator. The constructors cover the permission flows the
/// view model distinguishes; every request is counted so tests can
/// assert exact request behavior.
#[derive(Debug)]
pub struct MockLocationClient {
    status: Mutex<AuthorizationStatus>,
    grant_on_request: bool,
    fail_location_requests: bool,
    fix: Coordinate,
    subject: Subject<LocationEvent>,
    log: LocationCallLog,
}

impl MockLocationClient {
    /// Permission already granted; `request_location` immediately
    /// reports a fixed coordinate.
    pub fn authorized_when_in_use() -> Self {
        Self::with_status(AuthorizationStatus::AuthorizedWhenInUse, true, false)
    }

    /// No decision yet; the first `request_authorization` grants and
    /// emits the change.
    pub fn not_determined() -> Self {
        Self::with_status(AuthorizationStatus::NotDetermined, true, false)
    }

    /// Permission refused; `request_authorization` changes nothing.
    pub fn denied() -> Self {
        Self::with_status(AuthorizationStatus::Denied, false, false)
    }

    /// Granted, but every location request fails at the backend.
    pub fn failing() -> Self {
        Self::with_status(AuthorizationStatus::AuthorizedWhenInUse, true, true)
    }

    fn with_status(
        status: AuthorizationStatus,
        grant_on_request: bool,
        fail_location_requests: bool,
    ) -> Self {
        Self {
            status: Mutex::new(status),
            grant_on_request,
            fail_location_requests,
            fix: Coordinate { latitude: 40.7128, longitude: -74.0060 },
            subject: Subject::new(),
            log: LocationCallLog::default(),
        }
    }

    /// Override the coordinate reported by `request_location`.
    pub fn with_fix(mut self, fix: Coordinate) -> Self {
        self.fix = fix;
        self
    }

    /// Script an authorization change from the backend, as when the
    /// user revokes access in system settings while the app runs.
    pub fn change_authorization(&self, status: AuthorizationStatus) {
        *self.status.lock().unwrap_or_else(PoisonError::into_inner) = status;
        self.subject.send(LocationEvent::DidChangeAuthorization(status));
    }

    pub fn call_log(&self) -> LocationCallLog {
        self.log.clone()
    }
}

impl LocationClient for MockLocationClient {
    fn authorization_status(&self) -> AuthorizationStatus {
        *self.status.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn request_authorization(&self) {
        self.log.authorization.fetch_add(1, Ordering::SeqCst);

        let mut status = self.status.lock().unwrap_or_else(PoisonError::into_inner);
        if self.grant_on_request && *status == AuthorizationStatus::NotDetermined {
            *status = AuthorizationStatus::AuthorizedWhenInUse;
            let granted = *status;
            drop(status);
            self.subject.send(LocationEvent::DidChangeAuthorization(granted));
        }
    }

    fn request_location(&self) {
        self.log.location.fetch_add(1, Ordering::SeqCst);

        if self.fail_location_requests {
            self.subject
                .send(LocationEvent::DidFail("location unavailable".into()));
        } else {
            self.subject
                .send(LocationEvent::DidUpdateLocations(vec![self.fix]));
        }
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
    async fn authorized_mock_reports_fix_on_request() {
        let client = MockLocationClient::authorized_when_in_use();
        let mut delegate = client.delegate();

        client.request_location();

        match delegate.next().await {
            Some(LocationEvent::DidUpdateLocations(coordinates)) => {
                assert_eq!(coordinates.len(), 1);
            }
            other => panic!("expected DidUpdateLocations, got {other:?}"),
        }
        assert_eq!(client.call_log().location_requests(), 1);
    }

    #[tokio::test]
    async fn not_determined_mock_grants_on_first_request() {
        let client = MockLocationClient::not_determined();
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
        assert_eq!(client.call_log().authorization_requests(), 1);
    }

    #[tokio::test]
    async fn denied_mock_never_grants() {
        let client = MockLocationClient::denied();

        client.request_authorization();

        assert_eq!(client.authorization_status(), AuthorizationStatus::Denied);
        assert_eq!(client.call_log().authorization_requests(), 1);
    }

    #[tokio::test]
    async fn with_fix_overrides_the_reported_coordinate() {
        let lagos = Coordinate { latitude: 6.5244, longitude: 3.3792 };
        let client = MockLocationClient::authorized_when_in_use().with_fix(lagos);
        let mut delegate = client.delegate();

        client.request_location();

        assert_eq!(
            delegate.next().await,
            Some(LocationEvent::DidUpdateLocations(vec![lagos]))
        );
    }

    #[tokio::test]
    async fn scripted_authorization_change_updates_status_and_notifies() {
        let client = MockLocationClient::authorized_when_in_use();
        let mut delegate = client.delegate();

        client.change_authorization(AuthorizationStatus::Denied);

        assert_eq!(client.authorization_status(), AuthorizationStatus::Denied);
        assert_eq!(
            delegate.next().await,
            Some(LocationEvent::DidChangeAuthorization(AuthorizationStatus::Denied))
        );
    }

    #[tokio::test]
    async fn failing_mock_reports_failure_events() {
        let client = MockLocationClient::failing();
        let mut delegate = client.delegate();

        client.request_location();

        assert_eq!(
            delegate.next().await,
            Some(LocationEvent::DidFail("location unavailable".into()))
        );
    }
}
