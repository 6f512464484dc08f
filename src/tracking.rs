//! Order tracking
//!
//! The order status view as a state machine. [`OrderTracker`] never performs
//! I/O: callers run the fetch it asks for and feed the outcome back through
//! [`OrderTracker::apply`], which answers with the next step to take.

use std::time::Duration;

use thiserror::Error;

use crate::{
    orders::{Order, OrderNumber},
    routes::Route,
};

/// Time between fetches while an order is still in progress.
pub const POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Errors shown on the order status view.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum TrackingError {
    /// No order number in the route
    #[error("order identifier missing")]
    MissingIdentifier,

    /// The server does not know the order
    #[error("order does not exist")]
    NotFound,

    /// Any other fetch failure
    #[error("could not retrieve order")]
    Unavailable,
}

/// Why a fetch failed, as far as tracking cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchFailure {
    /// The order does not exist
    NotFound,

    /// Network or server failure
    Other,
}

/// What the order status view is showing.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackingState {
    /// Waiting for the first fetch
    Loading,

    /// Latest order projection
    Showing(Order),

    /// Absorbing error state
    Error(TrackingError),
}

impl TrackingState {
    /// Customer-facing status text while an order is shown.
    pub fn status_message(&self) -> Option<&'static str> {
        match self {
            TrackingState::Showing(order) => Some(order.status.customer_message()),
            TrackingState::Loading | TrackingState::Error(_) => None,
        }
    }

    /// Whether no further fetch will ever happen from this state.
    pub fn is_final(&self) -> bool {
        match self {
            TrackingState::Loading => false,
            TrackingState::Showing(order) => order.status.is_terminal(),
            TrackingState::Error(_) => true,
        }
    }

    /// Error views offer a way back to the storefront.
    pub fn home_link(&self) -> Option<Route> {
        matches!(self, TrackingState::Error(_)).then_some(Route::Home)
    }
}

/// What the caller should do next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextStep {
    /// Fetch the order immediately
    FetchNow(OrderNumber),

    /// Fetch the order once the delay has passed
    FetchAfter(OrderNumber, Duration),

    /// Stop polling
    Stop,
}

/// Order status view state machine.
#[derive(Debug, Clone)]
pub struct OrderTracker {
    order_number: Option<OrderNumber>,
    interval: Duration,
    state: TrackingState,
}

impl OrderTracker {
    /// Track the order named by raw route input. Blank input is treated as missing.
    pub fn new(identifier: Option<&str>) -> Self {
        Self::with_interval(identifier, POLL_INTERVAL)
    }

    /// Track with a non-default polling interval.
    pub fn with_interval(identifier: Option<&str>, interval: Duration) -> Self {
        Self {
            order_number: identifier.and_then(OrderNumber::parse),
            interval,
            state: TrackingState::Loading,
        }
    }

    /// Order being tracked
    pub fn order_number(&self) -> Option<&OrderNumber> {
        self.order_number.as_ref()
    }

    /// Current state
    pub fn state(&self) -> &TrackingState {
        &self.state
    }

    /// Begin tracking: either fetch straight away or fail for a missing identifier.
    pub fn start(&mut self) -> NextStep {
        self.state = TrackingState::Loading;

        match &self.order_number {
            Some(number) => NextStep::FetchNow(number.clone()),
            None => {
                self.state = TrackingState::Error(TrackingError::MissingIdentifier);
                NextStep::Stop
            }
        }
    }

    /// Apply the outcome of a fetch. Results arriving after an error are ignored.
    pub fn apply(&mut self, result: Result<Order, FetchFailure>) -> NextStep {
        if matches!(self.state, TrackingState::Error(_)) {
            return NextStep::Stop;
        }

        match result {
            Ok(order) => {
                let terminal = order.status.is_terminal();
                self.state = TrackingState::Showing(order);

                match (&self.order_number, terminal) {
                    (Some(number), false) => NextStep::FetchAfter(number.clone(), self.interval),
                    _ => NextStep::Stop,
                }
            }
            Err(FetchFailure::NotFound) => {
                self.state = TrackingState::Error(TrackingError::NotFound);
                NextStep::Stop
            }
            Err(FetchFailure::Other) => {
                self.state = TrackingState::Error(TrackingError::Unavailable);
                NextStep::Stop
            }
        }
    }
}
