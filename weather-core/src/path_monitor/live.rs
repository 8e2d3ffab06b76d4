use std::time::Duration;

use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::time;

use crate::config::Config;
use crate::events::{monitor_stream, EventStream};
use crate::model::{NetworkPath, PathStatus};

use super::PathMonitorClient;

const PROBE_TIMEOUT: Duration = Duration::from_secs(1);

/// Reachability monitor backed by a periodic TCP probe.
///
/// Each `paths` call spawns its own probe task; the task is aborted as
/// soon as the returned stream is dropped. Values are reported raw,
/// deduplication of repeats is the consumer's policy.
#[derive(Debug, Clone)]
pub struct LivePathMonitor {
    probe_addr: String,
    interval: Duration,
}

impl LivePathMonitor {
    pub fn new(probe_addr: impl Into<String>, interval: Duration) -> Self {
        Self { probe_addr: probe_addr.into(), interval }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.probe_addr.clone(),
            Duration::from_secs(config.probe_interval_secs),
        )
    }

    async fn probe(addr: &str) -> PathStatus {
        match time::timeout(PROBE_TIMEOUT, TcpStream::connect(addr)).await {
            Ok(Ok(_)) => PathStatus::Satisfied,
            Ok(Err(err)) => {
                tracing::debug!(%addr, error = %err, "connectivity probe failed");
                PathStatus::Unsatisfied
            }
            Err(_) => {
                tracing::debug!(%addr, "connectivity probe timed out");
                PathStatus::Unsatisfied
            }
        }
    }
}

impl PathMonitorClient for LivePathMonitor {
    fn paths(&self) -> EventStream<NetworkPath> {
        let addr = self.probe_addr.clone();
        let every = self.interval;
        let (tx, rx) = mpsc::unbounded_channel();

        let task = tokio::spawn(async move {
            let mut ticker = time::interval(every);
            loop {
                ticker.tick().await;
                let status = Self::probe(&addr).await;
                if tx.send(NetworkPath { status }).is_err() {
                    break;
                }
            }
        });

        monitor_stream(rx, task.abort_handle())
    }
}
