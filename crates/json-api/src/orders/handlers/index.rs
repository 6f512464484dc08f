//! List Orders Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use brewline::orders::StatusFilter;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, models::OrderResponse},
    state::State,
};

/// Order List Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderListResponse {
    /// Orders, newest first
    pub orders: Vec<OrderResponse>,
}

/// An unrecognised status lists every order.
fn status_filter(status: Option<String>) -> StatusFilter {
    let Some(status) = status else {
        return StatusFilter::All;
    };

    status.parse().unwrap_or_else(|error| {
        debug!("ignoring status filter: {error}");

        StatusFilter::All
    })
}

/// List Orders Handler
///
/// Returns orders newest first, optionally only those with one status.
#[endpoint(
    tags("orders"),
    summary = "List Orders",
    responses(
        (status_code = StatusCode::OK, description = "Orders"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    status: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<OrderListResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let orders = state
        .app
        .orders
        .list_orders(status_filter(status.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(Json(OrderListResponse {
        orders: orders.into_iter().map(OrderResponse::from).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use brewline::orders::{OrderList, OrderStatus};
    use brewline_app::domain::orders::{MockOrdersService, OrdersServiceError};

    use crate::test_helpers::{make_order, orders_service};

    use super::*;

    fn make_service(orders: MockOrdersService) -> Service {
        orders_service(orders, Router::with_path("api/orders").get(handler))
    }

    #[tokio::test]
    async fn test_list_orders_without_filter() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_list_orders()
            .once()
            .with(eq(StatusFilter::All))
            .return_once(|_| {
                Ok(vec![
                    make_order(2, OrderStatus::Pending),
                    make_order(1, OrderStatus::Completed),
                ])
            });

        orders.expect_create_order().never();
        orders.expect_get_order().never();
        orders.expect_update_status().never();

        let mut res = TestClient::get("http://example.com/api/orders")
            .send(&make_service(orders))
            .await;

        let body: OrderList = res.take_json().await?;
        let ids: Vec<i64> = body.orders.iter().map(|order| order.id.into_inner()).collect();

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(ids, [2, 1]);

        Ok(())
    }

    #[tokio::test]
    async fn test_list_orders_with_status_filter() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_list_orders()
            .once()
            .with(eq(StatusFilter::Only(OrderStatus::Pending)))
            .return_once(|_| Ok(vec![make_order(2, OrderStatus::Pending)]));

        orders.expect_create_order().never();
        orders.expect_get_order().never();
        orders.expect_update_status().never();

        let mut res = TestClient::get("http://example.com/api/orders?status=pending")
            .send(&make_service(orders))
            .await;

        let body: OrderList = res.take_json().await?;

        assert_eq!(body.orders.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_status_filter_lists_everything() {
        let mut orders = MockOrdersService::new();

        orders
            .expect_list_orders()
            .once()
            .with(eq(StatusFilter::All))
            .return_once(|_| Ok(Vec::new()));

        orders.expect_create_order().never();
        orders.expect_get_order().never();
        orders.expect_update_status().never();

        let res = TestClient::get("http://example.com/api/orders?status=refunded")
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
    }

    #[tokio::test]
    async fn test_list_orders_storage_failure_returns_500() {
        let mut orders = MockOrdersService::new();

        orders
            .expect_list_orders()
            .once()
            .return_once(|_| Err(OrdersServiceError::Sql(sqlx::Error::PoolTimedOut)));

        orders.expect_create_order().never();
        orders.expect_get_order().never();
        orders.expect_update_status().never();

        let res = TestClient::get("http://example.com/api/orders")
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));
    }
}
