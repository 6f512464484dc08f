//! Create Order Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use brewline_app::domain::orders::data::NewOrder;

use crate::{
    extensions::*,
    orders::{
        errors::into_failure,
        models::{LocationPayload, OrderItemPayload},
    },
    state::State,
};

/// Create Order Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateOrderRequest {
    pub items: Vec<OrderItemPayload>,
    pub total_amount: f64,
    pub customer_name: String,
    pub phone_number: String,
    pub delivery_address: String,
    pub location: LocationPayload,
    #[serde(default)]
    pub notes: Option<String>,
}

impl From<CreateOrderRequest> for NewOrder {
    fn from(request: CreateOrderRequest) -> Self {
        NewOrder {
            customer_name: request.customer_name,
            phone_number: request.phone_number,
            delivery_address: request.delivery_address,
            location: request.location.into(),
            notes: request.notes.filter(|notes| !notes.trim().is_empty()),
            total_amount: request.total_amount,
            items: request.items.into_iter().map(Into::into).collect(),
        }
    }
}

/// Create Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateOrderResponse {
    /// Whether the order was stored
    pub success: bool,

    /// Number to track the order with
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_number: Option<String>,

    /// Why the order was rejected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Create Order Handler
#[endpoint(
    tags("orders"),
    summary = "Create Order",
    responses(
        (status_code = StatusCode::CREATED, description = "Order created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid order payload"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateOrderRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CreateOrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let created = match state.app.orders.create_order(json.into_inner().into()).await {
        Ok(created) => created,
        Err(error) => {
            let (status, message) = into_failure(error)?;

            res.status_code(status);

            return Ok(Json(CreateOrderResponse {
                success: false,
                order_number: None,
                message: Some(message.to_string()),
            }));
        }
    };

    res.add_header(
        LOCATION,
        format!("/api/orders/{}", created.order_number),
        true,
    )
    .or_500("failed to set location header")?
    .status_code(StatusCode::CREATED);

    Ok(Json(CreateOrderResponse {
        success: true,
        order_number: Some(created.order_number.into_string()),
        message: None,
    }))
}
