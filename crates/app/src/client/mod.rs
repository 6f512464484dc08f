//! Order service client
//!
//! [`OrdersApi`] is the seam between the client-side components (storefront,
//! order tracking, order manager) and the order service.

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;

use brewline::{
    orders::{CreateOrderRequest, Order, OrderId, OrderNumber, OrderStatus, StatusFilter},
    tracking::FetchFailure,
};

mod http;

pub use http::HttpOrdersApi;

/// Errors returned by [`OrdersApi`] calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The order does not exist.
    #[error("order not found")]
    NotFound,

    /// The service answered but did not accept the request.
    #[error("request rejected: {}", .0.as_deref().unwrap_or("no reason given"))]
    Rejected(Option<String>),

    /// The service returned a status this client does not expect.
    #[error("unexpected response status {status}: {body}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Response body, for logging
        body: String,
    },

    /// The configured base URL cannot carry a path.
    #[error("invalid order service URL: {0}")]
    InvalidBaseUrl(String),

    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}

impl ApiError {
    /// How order tracking should treat this failure.
    pub fn fetch_failure(&self) -> FetchFailure {
        match self {
            ApiError::NotFound => FetchFailure::NotFound,
            ApiError::Rejected(_)
            | ApiError::UnexpectedStatus { .. }
            | ApiError::InvalidBaseUrl(_)
            | ApiError::Http(_) => FetchFailure::Other,
        }
    }
}

#[automock]
#[async_trait]
pub trait OrdersApi: Send + Sync {
    /// Submit a new order, returning the number the service assigned.
    async fn create_order(&self, request: CreateOrderRequest) -> Result<OrderNumber, ApiError>;

    /// Fetch an order by its public number.
    async fn get_order(&self, order_number: OrderNumber) -> Result<Order, ApiError>;

    /// List orders matching the filter, newest first.
    async fn list_orders(&self, filter: StatusFilter) -> Result<Vec<Order>, ApiError>;

    /// Change the status of an order.
    async fn update_status(&self, order: OrderId, status: OrderStatus) -> Result<(), ApiError>;
}
