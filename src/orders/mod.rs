//! Orders
//!
//! The client-side projection of server-owned orders and the JSON shapes
//! exchanged with the order service.

use std::fmt;

use serde::{Deserialize, Serialize};

mod status;

pub use status::{InvalidStatus, OrderStatus, StatusFilter, UNKNOWN_STATUS_MESSAGE, describe_status};

/// Public order identifier assigned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderNumber(String);

impl OrderNumber {
    /// Wrap a server-assigned order number.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Parse user input, returning `None` when it is empty after trimming.
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();

        (!trimmed.is_empty()).then(|| Self(trimmed.to_string()))
    }

    /// The order number as text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the inner string
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Server row id, used by the status update call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(i64);

impl OrderId {
    /// Wrap a row id
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Row id as an integer
    pub fn into_inner(self) -> i64 {
        self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Delivery coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Latitude
    pub lat: f64,

    /// Longitude
    pub lng: f64,
}

/// One line of an order: the line label, quantity and unit price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Label including size and options
    pub name: String,

    /// Number of drinks
    pub quantity: u32,

    /// Unit price
    pub price: f64,
}

/// Order as returned by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Row id
    pub id: OrderId,

    /// Public order number
    pub order_number: OrderNumber,

    /// Customer name
    pub customer_name: String,

    /// Contact phone number
    pub phone_number: String,

    /// Delivery address as entered
    pub delivery_address: String,

    /// Delivery latitude
    pub latitude: f64,

    /// Delivery longitude
    pub longitude: f64,

    /// Free-form notes
    #[serde(default)]
    pub notes: Option<String>,

    /// Creation time (RFC 3339)
    pub created_at: String,

    /// Order total
    pub total_amount: f64,

    /// Current status
    pub status: OrderStatus,

    /// Order lines
    pub items: Vec<OrderItem>,
}

impl Order {
    /// Delivery coordinates
    pub fn location(&self) -> Location {
        Location {
            lat: self.latitude,
            lng: self.longitude,
        }
    }
}

/// Body of `POST /api/orders/create`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    /// Order lines
    pub items: Vec<OrderItem>,

    /// Total recomputed from the lines
    pub total_amount: f64,

    /// Customer name
    pub customer_name: String,

    /// Contact phone number
    pub phone_number: String,

    /// Delivery address text
    pub delivery_address: String,

    /// Delivery coordinates
    pub location: Location,

    /// Notes, omitted when empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Response of `POST /api/orders/create`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateOrderResponse {
    /// Whether the order was accepted
    pub success: bool,

    /// Assigned order number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_number: Option<OrderNumber>,

    /// Failure reason
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Response of `GET /api/orders`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderList {
    /// Orders, newest first
    pub orders: Vec<Order>,
}

/// Body of `PUT /api/orders/{id}/status`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    /// New status
    pub status: OrderStatus,
}

/// Response of `PUT /api/orders/{id}/status`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateStatusResponse {
    /// Whether the status changed
    pub success: bool,

    /// Failure reason
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
