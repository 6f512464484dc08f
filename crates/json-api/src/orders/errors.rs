//! Order Errors

use salvo::http::{StatusCode, StatusError};
use tracing::error;

use brewline_app::domain::orders::OrdersServiceError;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        OrdersServiceError::AlreadyExists => StatusError::conflict().brief("Order already exists"),
        OrdersServiceError::InvalidReference
        | OrdersServiceError::MissingRequiredData
        | OrdersServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid order payload")
        }
        OrdersServiceError::Sql(source) => {
            error!("order store failure: {source}");

            StatusError::internal_server_error()
        }
    }
}

/// Status and message for failures answered with a `{success: false}` body.
/// Storage failures stay plain 500s.
pub(crate) fn into_failure(
    error: OrdersServiceError,
) -> Result<(StatusCode, &'static str), StatusError> {
    match error {
        OrdersServiceError::NotFound => Ok((StatusCode::NOT_FOUND, "Order not found")),
        OrdersServiceError::AlreadyExists => Ok((StatusCode::CONFLICT, "Order already exists")),
        OrdersServiceError::MissingRequiredData => Ok((
            StatusCode::BAD_REQUEST,
            "Customer name, phone number and delivery address are required",
        )),
        OrdersServiceError::InvalidReference | OrdersServiceError::InvalidData => {
            Ok((StatusCode::BAD_REQUEST, "Invalid order payload"))
        }
        OrdersServiceError::Sql(source) => Err(into_status_error(OrdersServiceError::Sql(source))),
    }
}
