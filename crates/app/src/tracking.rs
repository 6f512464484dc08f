//! Order status polling
//!
//! Runs an [`OrderTracker`] on the tokio runtime, fetching through an
//! [`OrdersApi`] and publishing every state over a watch channel.

use std::sync::Arc;

use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{Duration, sleep},
};
use tracing::{debug, info, warn};

use brewline::{
    orders::OrderNumber,
    tracking::{NextStep, OrderTracker, TrackingState},
};

use crate::client::OrdersApi;

/// Owns a running poller. Dropping the handle cancels it.
#[derive(Debug)]
pub struct PollerHandle {
    state: watch::Receiver<TrackingState>,
    cancel: watch::Sender<bool>,
    task: Option<JoinHandle<()>>,
}

impl PollerHandle {
    /// Latest published state
    pub fn state(&self) -> TrackingState {
        self.state.borrow().clone()
    }

    /// A receiver that observes every state the poller publishes.
    pub fn subscribe(&self) -> watch::Receiver<TrackingState> {
        self.state.clone()
    }

    /// Wait until the poller reaches a state it will never leave, returning it.
    /// Returns the latest state if the poller stops early.
    pub async fn wait_until_final(&mut self) -> TrackingState {
        let final_state = self
            .state
            .wait_for(TrackingState::is_final)
            .await
            .map(|state| state.clone());

        final_state.unwrap_or_else(|_closed| self.state())
    }

    /// Stop polling. A fetch already in flight is discarded.
    pub fn cancel(&mut self) {
        self.cancel.send_replace(true);

        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    /// Whether the polling task has exited.
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().is_none_or(JoinHandle::is_finished)
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Start tracking `order_number` (raw route input) with the default interval.
pub fn spawn(api: Arc<dyn OrdersApi>, order_number: Option<&str>) -> PollerHandle {
    spawn_tracker(api, OrderTracker::new(order_number))
}

/// Start tracking with a custom polling interval.
pub fn spawn_with_interval(
    api: Arc<dyn OrdersApi>,
    order_number: Option<&str>,
    interval: Duration,
) -> PollerHandle {
    spawn_tracker(api, OrderTracker::with_interval(order_number, interval))
}

fn spawn_tracker(api: Arc<dyn OrdersApi>, tracker: OrderTracker) -> PollerHandle {
    let (state_tx, state_rx) = watch::channel(tracker.state().clone());
    let (cancel_tx, cancel_rx) = watch::channel(false);

    let task = tokio::spawn(poll(api, tracker, state_tx, cancel_rx));

    PollerHandle {
        state: state_rx,
        cancel: cancel_tx,
        task: Some(task),
    }
}

async fn poll(
    api: Arc<dyn OrdersApi>,
    mut tracker: OrderTracker,
    state: watch::Sender<TrackingState>,
    mut cancel: watch::Receiver<bool>,
) {
    let mut next = tracker.start();

    state.send_replace(tracker.state().clone());

    loop {
        let order_number = match next {
            NextStep::Stop => break,
            NextStep::FetchNow(order_number) => order_number,
            NextStep::FetchAfter(order_number, delay) => {
                tokio::select! {
                    () = sleep(delay) => order_number,
                    _ = cancel.changed() => break,
                }
            }
        };

        let result = tokio::select! {
            result = api.get_order(order_number.clone()) => result,
            _ = cancel.changed() => break,
        };

        if *cancel.borrow() {
            debug!(%order_number, "discarding fetch result after cancellation");
            break;
        }

        let outcome = result.map_err(|error| {
            warn!(%order_number, "failed to fetch order: {error}");
            error.fetch_failure()
        });

        next = tracker.apply(outcome);

        if let TrackingState::Showing(order) = tracker.state() {
            debug!(%order_number, status = %order.status, "order fetched");
        }

        state.send_replace(tracker.state().clone());
    }

    info!(
        order_number = tracker.order_number().map(OrderNumber::as_str),
        "order tracking stopped"
    );
}
