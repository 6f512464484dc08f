//! Orders Data

use brewline::orders::{Location, OrderItem};

/// New Order Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub customer_name: String,
    pub phone_number: String,
    pub delivery_address: String,
    pub location: Location,
    pub notes: Option<String>,
    pub total_amount: f64,
    pub items: Vec<OrderItem>,
}
