//! Order Records

use jiff::Timestamp;

use brewline::orders::{Order, OrderId, OrderItem, OrderNumber, OrderStatus};

/// Order Record
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord {
    pub id: OrderId,
    pub order_number: OrderNumber,
    pub customer_name: String,
    pub phone_number: String,
    pub delivery_address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub total_amount: f64,
    pub status: OrderStatus,
    pub items: Vec<OrderItem>,
}

impl From<OrderRecord> for Order {
    fn from(record: OrderRecord) -> Self {
        Order {
            id: record.id,
            order_number: record.order_number,
            customer_name: record.customer_name,
            phone_number: record.phone_number,
            delivery_address: record.delivery_address,
            latitude: record.latitude,
            longitude: record.longitude,
            notes: record.notes,
            created_at: record.created_at.to_string(),
            total_amount: record.total_amount,
            status: record.status,
            items: record.items,
        }
    }
}
