//! Update Order Status Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use brewline::orders::{OrderId, OrderStatus};

use crate::{extensions::*, orders::errors::into_failure, state::State};

/// Update Order Status Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateStatusRequest {
    /// One of `pending`, `preparing`, `delivering`, `completed`, `cancelled`
    pub status: String,
}

/// Update Order Status Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateStatusResponse {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl UpdateStatusResponse {
    fn failed(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            success: false,
            message: Some(message.into()),
        })
    }
}

/// Update Order Status Handler
#[endpoint(
    tags("orders"),
    summary = "Update Order Status",
    responses(
        (status_code = StatusCode::OK, description = "Status updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unrecognised status"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<i64>,
    json: JsonBody<UpdateStatusRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<UpdateStatusResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let status = match json.into_inner().status.parse::<OrderStatus>() {
        Ok(status) => status,
        Err(error) => {
            res.status_code(StatusCode::BAD_REQUEST);

            return Ok(UpdateStatusResponse::failed(error.to_string()));
        }
    };

    let id = OrderId::new(id.into_inner());

    if let Err(error) = state.app.orders.update_status(id, status).await {
        let (code, message) = into_failure(error)?;

        res.status_code(code);

        return Ok(UpdateStatusResponse::failed(message));
    }

    Ok(Json(UpdateStatusResponse {
        success: true,
        message: Some(format!("Order status updated to {status}")),
    }))
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use brewline_app::domain::orders::{MockOrdersService, OrdersServiceError};

    use crate::test_helpers::orders_service;

    use super::*;

    fn make_service(orders: MockOrdersService) -> Service {
        orders_service(
            orders,
            Router::with_path("api/orders/{id}/status").put(handler),
        )
    }

    #[tokio::test]
    async fn test_update_status_success() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_update_status()
            .once()
            .with(eq(OrderId::new(5)), eq(OrderStatus::Preparing))
            .return_once(|_, _| Ok(()));

        orders.expect_create_order().never();
        orders.expect_get_order().never();
        orders.expect_list_orders().never();

        let mut res = TestClient::put("http://example.com/api/orders/5/status")
            .json(&json!({ "status": "preparing" }))
            .send(&make_service(orders))
            .await;

        let body: brewline::orders::UpdateStatusResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(body.success, "expected success");

        Ok(())
    }

    #[tokio::test]
    async fn test_update_unknown_order_returns_404_with_failure_body() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_update_status()
            .once()
            .return_once(|_, _| Err(OrdersServiceError::NotFound));

        orders.expect_create_order().never();
        orders.expect_get_order().never();
        orders.expect_list_orders().never();

        let mut res = TestClient::put("http://example.com/api/orders/404/status")
            .json(&json!({ "status": "completed" }))
            .send(&make_service(orders))
            .await;

        let body: UpdateStatusResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
        assert!(!body.success, "expected failure");
        assert_eq!(body.message.as_deref(), Some("Order not found"));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_with_unknown_status_returns_400() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_update_status().never();
        orders.expect_create_order().never();
        orders.expect_get_order().never();
        orders.expect_list_orders().never();

        let mut res = TestClient::put("http://example.com/api/orders/5/status")
            .json(&json!({ "status": "refunded" }))
            .send(&make_service(orders))
            .await;

        let body: UpdateStatusResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert!(!body.success, "expected failure");

        Ok(())
    }
}
