//! Stream plumbing shared by the client implementations.
//!
//! Live clients bridge callback-style backends into streams: a hidden
//! task (or in-memory subject) feeds a channel, and the subscriber gets
//! a stream whose lifetime controls the bridge. Dropping the stream
//! tears the bridge down.

use std::pin::Pin;
use std::sync::{Mutex, PoisonError};
use std::task::{Context, Poll};

use futures::stream::BoxStream;
use futures::Stream;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::AbortHandle;

/// A lazy, possibly infinite sequence of events. No error channel;
/// dropping the stream cancels whatever produces it.
pub type EventStream<T> = BoxStream<'static, T>;

/// Stream over a channel fed by a spawned monitor task. Aborts the task
/// when the subscriber drops the stream.
struct MonitorStream<T> {
    rx: UnboundedReceiver<T>,
    abort: AbortHandle,
}

impl<T> Stream for MonitorStream<T> {
    type Item = T;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<T>> {
        self.get_mut().rx.poll_recv(cx)
    }
}

impl<T> Drop for MonitorStream<T> {
    fn drop(&mut self) {
        self.abort.abort();
    }
}

/// Tie a receiver to the monitor task that feeds it.
pub(crate) fn monitor_stream<T: Send + 'static>(
    rx: UnboundedReceiver<T>,
    abort: AbortHandle,
) -> EventStream<T> {
    Box::pin(MonitorStream { rx, abort })
}

/// A fan-out subject: every subscriber gets its own channel, senders
/// for dropped subscribers are pruned on the next send.
///
/// This is the in-memory stand-in for a delegate publisher; both the
/// live location client and the mocks push their events through one.
#[derive(Debug, Default)]
pub(crate) struct Subject<T> {
    subscribers: Mutex<Vec<UnboundedSender<T>>>,
}

impl<T: Clone + Send + 'static> Subject<T> {
    pub(crate) fn new() -> Self {
        Self { subscribers: Mutex::new(Vec::new()) }
    }

    pub(crate) fn subscribe(&self) -> EventStream<T> {
        let (tx, mut rx) = mpsc::unbounded_channel();
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(tx);
        Box::pin(futures::stream::poll_fn(move |cx| rx.poll_recv(cx)))
    }

    pub(crate) fn send(&self, event: T) {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|tx| tx.send(event.clone()).is_ok());
    }
}
