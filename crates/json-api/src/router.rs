//! App Router

use brewline_app::context::AppContext;
use salvo::{affix_state::inject, prelude::*, trailing_slash::remove_slash};

use crate::{healthcheck, observability, orders, state::State};

/// The application routes behind the service middleware, serving `app`.
pub(crate) fn service_router(app: AppContext) -> Router {
    Router::new()
        .hoop(CatchPanic::new())
        .hoop(observability::request_logging)
        .hoop(remove_slash())
        .hoop(inject(State::from_app_context(app)))
        .push(app_router())
}

pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(
            Router::with_path("api/orders")
                .get(orders::index::handler)
                .push(Router::with_path("create").post(orders::create::handler))
                .push(Router::with_path("{order_number}").get(orders::get::handler))
                .push(Router::with_path("{id}/status").put(orders::update_status::handler)),
        )
}

#[cfg(test)]
mod tests {
    use salvo::{
        prelude::*,
        test::{ResponseExt, TestClient},
    };
    use serde_json::json;
    use testresult::TestResult;

    use brewline::orders::{
        CreateOrderRequest, Location, OrderId, OrderItem, OrderNumber, OrderStatus, StatusFilter,
    };
    use brewline_app::{
        client::{ApiError, HttpOrdersApi, OrdersApi},
        domain::orders::MockOrdersService,
    };

    use crate::test_helpers::{TEST_ORDER_NUMBER, make_order, orders_service};

    use super::*;

    #[tokio::test]
    async fn routes_reach_their_handlers() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_list_orders()
            .once()
            .return_once(|_: StatusFilter| Ok(Vec::new()));

        orders
            .expect_get_order()
            .once()
            .return_once(|_| Ok(make_order(3, OrderStatus::Pending)));

        orders
            .expect_update_status()
            .once()
            .return_once(|_, _| Ok(()));

        orders
            .expect_create_order()
            .once()
            .return_once(|_| Ok(make_order(3, OrderStatus::Pending)));

        let service = orders_service(orders, app_router());

        let list = TestClient::get("http://example.com/api/orders")
            .send(&service)
            .await;

        let get = TestClient::get(format!("http://example.com/api/orders/{TEST_ORDER_NUMBER}"))
            .send(&service)
            .await;

        let update = TestClient::put("http://example.com/api/orders/3/status")
            .json(&json!({ "status": "preparing" }))
            .send(&service)
            .await;

        let create = TestClient::post("http://example.com/api/orders/create")
            .json(&json!({
                "items": [{ "name": "Espresso (Small)", "quantity": 1, "price": 28.0 }],
                "total_amount": 28.0,
                "customer_name": "Ada",
                "phone_number": "555-0100",
                "delivery_address": "1 Main St",
                "location": { "lat": 31.23, "lng": 121.47 }
            }))
            .send(&service)
            .await;

        let mut health = TestClient::get("http://example.com/healthcheck")
            .send(&service)
            .await;

        assert_eq!(list.status_code, Some(StatusCode::OK));
        assert_eq!(get.status_code, Some(StatusCode::OK));
        assert_eq!(update.status_code, Some(StatusCode::OK));
        assert_eq!(create.status_code, Some(StatusCode::CREATED));
        assert_eq!(health.take_string().await?, r#"{"status":"ok"}"#);

        Ok(())
    }

    fn create_request(customer_name: &str) -> CreateOrderRequest {
        CreateOrderRequest {
            items: vec![OrderItem {
                name: "Latte (Medium) - Oat Milk".to_string(),
                quantity: 2,
                price: 45.0,
            }],
            total_amount: 90.0,
            customer_name: customer_name.to_string(),
            phone_number: "555-0100".to_string(),
            delivery_address: "1 Main St".to_string(),
            location: Location {
                lat: 31.23,
                lng: 121.47,
            },
            notes: Some("ring twice".to_string()),
        }
    }

    #[tokio::test]
    async fn http_client_round_trip() -> TestResult {
        let dir = tempfile::tempdir()?;
        let url = format!(
            "sqlite://{}?mode=rwc",
            dir.path().join("orders.db").display()
        );
        let app = AppContext::from_database_url(&url).await?;

        let addr = std::net::TcpListener::bind("127.0.0.1:0")?.local_addr()?;
        let acceptor = TcpListener::new(addr).bind().await;
        let server = Server::new(acceptor);
        let handle = server.handle();

        tokio::spawn(server.serve(service_router(app)));

        let api = HttpOrdersApi::new(&format!("http://{addr}"))?;

        let order_number = api.create_order(create_request("Ada")).await?;
        let order = api.get_order(order_number.clone()).await?;

        assert_eq!(order.order_number, order_number);
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.notes.as_deref(), Some("ring twice"));
        assert_eq!(
            order.items.first().map(|item| item.name.as_str()),
            Some("Latte (Medium) - Oat Milk")
        );
        assert!((order.total_amount - 90.0).abs() < f64::EPSILON);

        let second = api.create_order(create_request("Grace")).await?;

        api.update_status(order.id, OrderStatus::Preparing).await?;

        let preparing = api
            .list_orders(StatusFilter::Only(OrderStatus::Preparing))
            .await?;
        let all = api.list_orders(StatusFilter::All).await?;

        assert_eq!(
            preparing
                .iter()
                .map(|order| order.order_number.clone())
                .collect::<Vec<_>>(),
            [order_number]
        );
        assert_eq!(
            all.first().map(|order| order.order_number.clone()),
            Some(second),
            "newest order first"
        );
        assert_eq!(all.len(), 2);

        assert!(matches!(
            api.get_order(OrderNumber::new("missing")).await,
            Err(ApiError::NotFound)
        ));
        assert!(matches!(
            api.update_status(OrderId::new(999), OrderStatus::Completed).await,
            Err(ApiError::NotFound)
        ));
        assert!(matches!(
            api.create_order(create_request("  ")).await,
            Err(ApiError::Rejected(Some(_)))
        ));

        handle.stop_graceful(None);

        Ok(())
    }
}
