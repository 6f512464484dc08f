//! Order payloads shared by the order handlers.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use brewline::orders::{Location, OrderItem};
use brewline_app::domain::orders::records::OrderRecord;

/// Delivery coordinates
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub(crate) struct LocationPayload {
    /// Latitude in degrees
    pub lat: f64,

    /// Longitude in degrees
    pub lng: f64,
}

impl From<LocationPayload> for Location {
    fn from(location: LocationPayload) -> Self {
        Location {
            lat: location.lat,
            lng: location.lng,
        }
    }
}

/// Order line
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemPayload {
    /// Drink label including size and options
    pub name: String,

    /// Number of cups
    pub quantity: u32,

    /// Unit price
    pub price: f64,
}

impl From<OrderItemPayload> for OrderItem {
    fn from(item: OrderItemPayload) -> Self {
        OrderItem {
            name: item.name,
            quantity: item.quantity,
            price: item.price,
        }
    }
}

impl From<OrderItem> for OrderItemPayload {
    fn from(item: OrderItem) -> Self {
        OrderItemPayload {
            name: item.name,
            quantity: item.quantity,
            price: item.price,
        }
    }
}

/// Stored order
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    /// Row id, used by operators to change the status
    pub id: i64,

    /// Public order number
    pub order_number: String,

    pub customer_name: String,

    pub phone_number: String,

    pub delivery_address: String,

    pub latitude: f64,

    pub longitude: f64,

    #[serde(default)]
    pub notes: Option<String>,

    /// RFC 3339 creation time
    pub created_at: String,

    pub total_amount: f64,

    /// One of `pending`, `preparing`, `delivering`, `completed`, `cancelled`
    pub status: String,

    pub items: Vec<OrderItemPayload>,
}

impl From<OrderRecord> for OrderResponse {
    fn from(order: OrderRecord) -> Self {
        OrderResponse {
            id: order.id.into_inner(),
            order_number: order.order_number.into_string(),
            customer_name: order.customer_name,
            phone_number: order.phone_number,
            delivery_address: order.delivery_address,
            latitude: order.latitude,
            longitude: order.longitude,
            notes: order.notes,
            created_at: order.created_at.to_string(),
            total_amount: order.total_amount,
            status: order.status.as_str().to_string(),
            items: order.items.into_iter().map(OrderItemPayload::from).collect(),
        }
    }
}
