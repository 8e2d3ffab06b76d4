use std::time::Duration;

use futures::stream;
use tokio::sync::mpsc;
use tokio::time;

use crate::events::{monitor_stream, EventStream};
use crate::model::{NetworkPath, PathStatus};

use super::PathMonitorClient;

/// Scripted reachability: replays a fixed list of path values and then
/// goes quiet. The stream never errors, matching the live contract.
#[derive(Debug, Clone)]
pub struct MockPathMonitor {
    script: Vec<NetworkPath>,
}

impl MockPathMonitor {
    /// Ideal connectivity from the first observation on.
    pub fn satisfied() -> Self {
        Self::sequence([PathStatus::Satisfied])
    }

    /// No connectivity at all.
    pub fn unsatisfied() -> Self {
        Self::sequence([PathStatus::Unsatisfied])
    }

    /// Arbitrary scripted transitions, in order.
    pub fn sequence(statuses: impl IntoIterator<Item = PathStatus>) -> Self {
        Self {
            script: statuses
                .into_iter()
                .map(|status| NetworkPath { status })
                .collect(),
        }
    }
}

impl PathMonitorClient for MockPathMonitor {
    fn paths(&self) -> EventStream<NetworkPath> {
        Box::pin(stream::iter(self.script.clone()))
    }
}

/// Synthetic flaky network: a timer flips the status every `period`,
/// starting from satisfied (so the first emitted value is unsatisfied).
#[derive(Debug, Clone)]
pub struct FlakyPathMonitor {
    period: Duration,
}

impl FlakyPathMonitor {
    pub fn new(period: Duration) -> Self {
        Self { period }
    }
}

impl Default for FlakyPathMonitor {
    fn default() -> Self {
        Self::new(Duration::from_secs(2))
    }
}

impl PathMonitorClient for FlakyPathMonitor {
    fn paths(&self) -> EventStream<NetworkPath> {
        let period = self.period;
        let (tx, rx) = mpsc::unbounded_channel();

        let task = tokio::spawn(async move {
            let mut status = PathStatus::Satisfied;
            loop {
                time::sleep(period).await;
                status = match status {
                    PathStatus::Satisfied => PathStatus::Unsatisfied,
                    PathStatus::Unsatisfied => PathStatus::Satisfied,
                };
                if tx.send(NetworkPath { status }).is_err() {
                    break;
                }
            }
        });

        monitor_stream(rx, task.abort_handle())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    #[tokio::test]
    async fn scripted_monitor_replays_and_ends() {
        let monitor = MockPathMonitor::sequence([PathStatus::Satisfied, PathStatus::Unsatisfied]);
        let mut paths = monitor.paths();

        assert_eq!(paths.next().await, Some(NetworkPath::satisfied()));
        assert_eq!(paths.next().await, Some(NetworkPath::unsatisfied()));
        assert_eq!(paths.next().await, None);
    }

    #[tokio::test]
    async fn each_subscription_replays_from_the_start() {
        let monitor = MockPathMonitor::satisfied();

        assert_eq!(monitor.paths().next().await, Some(NetworkPath::satisfied()));
        assert_eq!(monitor.paths().next().await, Some(NetworkPath::satisfied()));
    }

    #[tokio::test(start_paused = true)]
    async fn flaky_monitor_alternates_every_period() {
        let monitor = FlakyPathMonitor::new(Duration::from_secs(2));
        let mut paths = monitor.paths();

        assert_eq!(paths.next().await, Some(NetworkPath::unsatisfied()));
        assert_eq!(paths.next().await, Some(NetworkPath::satisfied()));
        assert_eq!(paths.next().await, Some(NetworkPath::unsatisfied()));
    }
}
