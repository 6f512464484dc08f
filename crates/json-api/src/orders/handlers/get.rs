//! Get Order Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use brewline::orders::OrderNumber;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, models::OrderResponse},
    state::State,
};

/// Get Order Handler
///
/// Returns an order by its public number.
#[endpoint(
    tags("orders"),
    summary = "Get Order",
    responses(
        (status_code = StatusCode::OK, description = "Order found"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    order_number: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let order = state
        .app
        .orders
        .get_order(OrderNumber::new(order_number.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(Json(order.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use brewline::orders::{Order, OrderStatus};
    use brewline_app::domain::orders::{MockOrdersService, OrdersServiceError};

    use crate::test_helpers::{TEST_ORDER_NUMBER, make_order, orders_service};

    use super::*;

    fn make_service(orders: MockOrdersService) -> Service {
        orders_service(
            orders,
            Router::with_path("api/orders/{order_number}").get(handler),
        )
    }

    #[tokio::test]
    async fn test_get_order_returns_wire_order() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_get_order()
            .once()
            .withf(|number| number.as_str() == TEST_ORDER_NUMBER)
            .return_once(|_| Ok(make_order(7, OrderStatus::Delivering)));

        orders.expect_create_order().never();
        orders.expect_list_orders().never();
        orders.expect_update_status().never();

        let mut res = TestClient::get(format!("http://example.com/api/orders/{TEST_ORDER_NUMBER}"))
            .send(&make_service(orders))
            .await;

        let order: Order = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(order.id.into_inner(), 7);
        assert_eq!(order.status, OrderStatus::Delivering);
        assert_eq!(order.created_at, "1970-01-01T00:00:00Z");
        assert_eq!(order.items.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_get_missing_order_returns_404() {
        let mut orders = MockOrdersService::new();

        orders
            .expect_get_order()
            .once()
            .return_once(|_| Err(OrdersServiceError::NotFound));

        orders.expect_create_order().never();
        orders.expect_list_orders().never();
        orders.expect_update_status().never();

        let res = TestClient::get("http://example.com/api/orders/XYZ")
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
    }
}
