//! Order status

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message shown to customers for a status value this client does not know.
pub const UNKNOWN_STATUS_MESSAGE: &str = "unknown status";

/// Error returned when a status string is not one of the known statuses.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid status: {0}")]
pub struct InvalidStatus(pub String);

/// Lifecycle of an order. The admin side advances it; customers only observe it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Received, not started
    Pending,

    /// Being made
    Preparing,

    /// Out for delivery
    Delivering,

    /// Delivered
    Completed,

    /// Cancelled
    Cancelled,
}

impl OrderStatus {
    /// Every status in lifecycle order.
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Preparing,
        OrderStatus::Delivering,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ];

    /// Wire name of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Delivering => "delivering",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Terminal statuses are never polled again.
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    /// Text shown to the customer on the order status view.
    pub fn customer_message(self) -> &'static str {
        match self {
            OrderStatus::Pending => "queued",
            OrderStatus::Preparing => "being made",
            OrderStatus::Delivering => "out for delivery",
            OrderStatus::Completed => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Label shown to operators in the order manager.
    pub fn operator_label(self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = InvalidStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();

        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| InvalidStatus(s.to_string()))
    }
}

/// Customer-facing text for a raw status value, falling back to
/// [`UNKNOWN_STATUS_MESSAGE`].
pub fn describe_status(raw: &str) -> &'static str {
    raw.parse::<OrderStatus>()
        .map_or(UNKNOWN_STATUS_MESSAGE, OrderStatus::customer_message)
}

/// Order list filter used by the order manager.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum StatusFilter {
    /// Every order
    #[default]
    All,

    /// Only orders with this status
    Only(OrderStatus),
}

impl StatusFilter {
    /// Every filter choice offered to operators, `all` first.
    pub fn choices() -> impl Iterator<Item = StatusFilter> {
        std::iter::once(StatusFilter::All).chain(OrderStatus::ALL.into_iter().map(StatusFilter::Only))
    }

    /// Value of the `status` query parameter, if any.
    pub fn query_value(self) -> Option<&'static str> {
        match self {
            StatusFilter::All => None,
            StatusFilter::Only(status) => Some(status.as_str()),
        }
    }

    /// Whether an order with the given status passes the filter.
    pub fn matches(self, status: OrderStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => wanted == status,
        }
    }

    /// Label shown to operators.
    pub fn operator_label(self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Only(status) => status.operator_label(),
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.operator_label())
    }
}

impl FromStr for StatusFilter {
    type Err = InvalidStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }

        s.parse().map(StatusFilter::Only)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn customer_messages_cover_every_status() {
        let messages: Vec<&str> = OrderStatus::ALL
            .into_iter()
            .map(OrderStatus::customer_message)
            .collect();

        assert_eq!(
            messages,
            [
                "queued",
                "being made",
                "out for delivery",
                "delivered",
                "cancelled"
            ]
        );
    }

    #[test]
    fn describe_status_defaults_for_unknown_values() {
        assert_eq!(describe_status("delivering"), "out for delivery");
        assert_eq!(describe_status("refunded"), UNKNOWN_STATUS_MESSAGE);
        assert_eq!(describe_status(""), UNKNOWN_STATUS_MESSAGE);
    }

    #[test]
    fn only_completed_and_cancelled_are_terminal() {
        let terminal: Vec<OrderStatus> = OrderStatus::ALL
            .into_iter()
            .filter(|status| status.is_terminal())
            .collect();

        assert_eq!(terminal, [OrderStatus::Completed, OrderStatus::Cancelled]);
    }

    #[test]
    fn parsing_is_case_insensitive() -> TestResult {
        assert_eq!("Preparing".parse::<OrderStatus>()?, OrderStatus::Preparing);
        assert_eq!(" CANCELLED ".parse::<OrderStatus>()?, OrderStatus::Cancelled);

        Ok(())
    }

    #[test]
    fn parsing_rejects_unknown_values() {
        assert_eq!(
            "shipped".parse::<OrderStatus>(),
            Err(InvalidStatus("shipped".to_string()))
        );
    }

    #[test]
    fn deserialization_is_strict() {
        let result = serde_json::from_str::<OrderStatus>("\"refunded\"");

        assert!(result.is_err(), "unknown status must not deserialize");
    }

    #[test]
    fn serializes_as_lowercase() -> TestResult {
        assert_eq!(serde_json::to_string(&OrderStatus::Delivering)?, "\"delivering\"");

        Ok(())
    }

    #[test]
    fn filter_parses_all_and_statuses() -> TestResult {
        assert_eq!("ALL".parse::<StatusFilter>()?, StatusFilter::All);
        assert_eq!(
            "pending".parse::<StatusFilter>()?,
            StatusFilter::Only(OrderStatus::Pending)
        );
        assert!("everything".parse::<StatusFilter>().is_err());

        Ok(())
    }

    #[test]
    fn filter_choices_start_with_all() {
        let labels: Vec<&str> = StatusFilter::choices()
            .map(StatusFilter::operator_label)
            .collect();

        assert_eq!(
            labels,
            ["all", "pending", "preparing", "delivering", "completed", "cancelled"]
        );
    }

    #[test]
    fn filter_query_value() {
        assert_eq!(StatusFilter::All.query_value(), None);
        assert_eq!(
            StatusFilter::Only(OrderStatus::Completed).query_value(),
            Some("completed")
        );
        assert!(StatusFilter::All.matches(OrderStatus::Cancelled));
        assert!(!StatusFilter::Only(OrderStatus::Pending).matches(OrderStatus::Cancelled));
    }
}
