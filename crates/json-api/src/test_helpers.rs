//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};

use brewline::orders::{OrderId, OrderItem, OrderNumber, OrderStatus};
use brewline_app::{
    context::AppContext,
    domain::orders::{MockOrdersService, records::OrderRecord},
};

use crate::state::State;

pub(crate) const TEST_ORDER_NUMBER: &str = "01890a5d-ac96-774b-bcce-b302099a8057";

pub(crate) fn state_with_orders(orders: MockOrdersService) -> Arc<State> {
    State::from_app_context(AppContext {
        orders: Arc::new(orders),
    })
}

pub(crate) fn orders_service(orders: MockOrdersService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_orders(orders)))
            .push(route),
    )
}

pub(crate) fn make_order(id: i64, status: OrderStatus) -> OrderRecord {
    OrderRecord {
        id: OrderId::new(id),
        order_number: OrderNumber::new(TEST_ORDER_NUMBER),
        customer_name: "Ada".to_string(),
        phone_number: "555-0100".to_string(),
        delivery_address: "1 Main St".to_string(),
        latitude: 31.23,
        longitude: 121.47,
        notes: None,
        created_at: Timestamp::UNIX_EPOCH,
        total_amount: 90.0,
        status,
        items: vec![OrderItem {
            name: "Latte (Medium) - Oat Milk".to_string(),
            quantity: 2,
            price: 45.0,
        }],
    }
}
