//! HTTP client for the order service.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use brewline::orders::{
    CreateOrderRequest, CreateOrderResponse, Order, OrderId, OrderList, OrderNumber, OrderStatus,
    StatusFilter, UpdateStatusRequest, UpdateStatusResponse,
};

use super::{ApiError, OrdersApi};

/// [`OrdersApi`] over JSON/HTTP.
#[derive(Debug, Clone)]
pub struct HttpOrdersApi {
    base_url: Url,
    http: Client,
}

impl HttpOrdersApi {
    /// Create a client for the service at `base_url`, e.g. `"http://127.0.0.1:3001"`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidBaseUrl`] if the URL cannot be parsed or cannot
    /// carry a path.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Self::with_client(base_url, Client::new())
    }

    /// Create a client that reuses an existing [`Client`].
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidBaseUrl`] if the URL cannot be parsed or cannot
    /// carry a path.
    pub fn with_client(base_url: &str, http: Client) -> Result<Self, ApiError> {
        let base_url =
            Url::parse(base_url).map_err(|error| ApiError::InvalidBaseUrl(error.to_string()))?;

        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl(base_url.to_string()));
        }

        Ok(Self { base_url, http })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();

        {
            let Ok(mut path) = url.path_segments_mut() else {
                return Err(ApiError::InvalidBaseUrl(self.base_url.to_string()));
            };

            path.pop_if_empty().extend(segments);
        }

        Ok(url)
    }
}

#[async_trait]
impl OrdersApi for HttpOrdersApi {
    async fn create_order(&self, request: CreateOrderRequest) -> Result<OrderNumber, ApiError> {
        let url = self.endpoint(&["api", "orders", "create"])?;

        debug!(%url, items = request.items.len(), "submitting order");

        let response = self.http.post(url).json(&request).send().await?;

        if !response.status().is_success() {
            return Err(rejection::<CreateOrderResponse>(response, |body| body.message).await);
        }

        let body: CreateOrderResponse = response.json().await?;

        match body {
            CreateOrderResponse {
                success: true,
                order_number: Some(order_number),
                ..
            } => Ok(order_number),
            CreateOrderResponse {
                success: true,
                order_number: None,
                ..
            } => Err(ApiError::Rejected(Some(
                "response did not include an order number".to_string(),
            ))),
            CreateOrderResponse { message, .. } => Err(ApiError::Rejected(message)),
        }
    }

    async fn get_order(&self, order_number: OrderNumber) -> Result<Order, ApiError> {
        let url = self.endpoint(&["api", "orders", order_number.as_str()])?;

        let response = self.http.get(url).send().await?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(ApiError::NotFound),
            status if status.is_success() => Ok(response.json().await?),
            _ => Err(unexpected(response).await),
        }
    }

    async fn list_orders(&self, filter: StatusFilter) -> Result<Vec<Order>, ApiError> {
        let url = self.endpoint(&["api", "orders"])?;

        let mut request = self.http.get(url);

        if let Some(status) = filter.query_value() {
            request = request.query(&[("status", status)]);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            return Err(unexpected(response).await);
        }

        let body: OrderList = response.json().await?;

        Ok(body.orders)
    }

    async fn update_status(&self, order: OrderId, status: OrderStatus) -> Result<(), ApiError> {
        let id = order.to_string();
        let url = self.endpoint(&["api", "orders", &id, "status"])?;

        let response = self
            .http
            .put(url)
            .json(&UpdateStatusRequest { status })
            .send()
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(ApiError::NotFound),
            code if code.is_success() => {
                let body: UpdateStatusResponse = response.json().await?;

                if body.success {
                    Ok(())
                } else {
                    Err(ApiError::Rejected(body.message))
                }
            }
            _ => Err(rejection::<UpdateStatusResponse>(response, |body| body.message).await),
        }
    }
}

/// Turn a non-2xx response into an error, using the body's message when the
/// body has the expected shape.
async fn rejection<T: DeserializeOwned>(
    response: Response,
    message: impl FnOnce(T) -> Option<String>,
) -> ApiError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();

    match serde_json::from_str::<T>(&body) {
        Ok(parsed) => ApiError::Rejected(message(parsed)),
        Err(_ignored) => ApiError::UnexpectedStatus { status, body },
    }
}

async fn unexpected(response: Response) -> ApiError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();

    ApiError::UnexpectedStatus { status, body }
}
