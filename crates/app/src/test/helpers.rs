//! Test Helpers

use brewline::orders::{Location, Order, OrderId, OrderItem, OrderNumber, OrderStatus};

use crate::domain::orders::data::NewOrder;

pub(crate) fn new_order(customer_name: &str) -> NewOrder {
    NewOrder {
        customer_name: customer_name.to_string(),
        phone_number: "555-0100".to_string(),
        delivery_address: "1 Main St".to_string(),
        location: Location {
            lat: 31.23,
            lng: 121.47,
        },
        notes: None,
        total_amount: 118.0,
        items: vec![
            OrderItem {
                name: "Latte (Medium) - Oat Milk".to_string(),
                quantity: 2,
                price: 45.0,
            },
            OrderItem {
                name: "Espresso (Small)".to_string(),
                quantity: 1,
                price: 28.0,
            },
        ],
    }
}

pub(crate) fn order(id: i64, number: &str, status: OrderStatus) -> Order {
    Order {
        id: OrderId::new(id),
        order_number: OrderNumber::new(number),
        customer_name: "Ada".to_string(),
        phone_number: "555-0100".to_string(),
        delivery_address: "1 Main St".to_string(),
        latitude: 31.23,
        longitude: 121.47,
        notes: None,
        created_at: "2026-01-01T09:00:00Z".to_string(),
        total_amount: 90.0,
        status,
        items: vec![OrderItem {
            name: "Latte (Medium) - Oat Milk".to_string(),
            quantity: 2,
            price: 45.0,
        }],
    }
}
