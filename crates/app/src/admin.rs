//! Admin order management
//!
//! Holds the operator's order list, the active status filter and the order
//! opened in the detail view.

use thiserror::Error;
use tracing::{info, warn};

use brewline::orders::{Order, OrderId, OrderStatus, StatusFilter};

use crate::client::OrdersApi;

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum AdminError {
    #[error("could not load orders")]
    Load,

    #[error("could not update order status")]
    Update,
}

/// Operator view over the order list.
#[derive(Debug, Default)]
pub struct OrderManager {
    filter: StatusFilter,
    orders: Vec<Order>,
    selected: Option<OrderId>,
    error: Option<AdminError>,
}

impl OrderManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(&self) -> StatusFilter {
        self.filter
    }

    /// Orders from the last successful load, newest first.
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Error from the last operation, if it failed.
    pub fn error(&self) -> Option<AdminError> {
        self.error
    }

    /// Reload the list with the current filter. Orders the service returns that
    /// do not match the filter are left out. The previous list is kept when
    /// loading fails.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Load`] when the order service cannot be queried.
    pub async fn refresh(&mut self, api: &dyn OrdersApi) -> Result<(), AdminError> {
        match api.list_orders(self.filter).await {
            Ok(mut orders) => {
                orders.retain(|order| self.filter.matches(order.status));

                self.orders = orders;
                self.error = None;

                if self
                    .selected
                    .is_some_and(|id| !self.orders.iter().any(|order| order.id == id))
                {
                    self.selected = None;
                }

                Ok(())
            }
            Err(error) => {
                warn!(filter = %self.filter, "failed to load orders: {error}");

                self.error = Some(AdminError::Load);

                Err(AdminError::Load)
            }
        }
    }

    /// Change the filter and reload.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Load`] when the order service cannot be queried.
    pub async fn set_filter(
        &mut self,
        api: &dyn OrdersApi,
        filter: StatusFilter,
    ) -> Result<(), AdminError> {
        self.filter = filter;

        self.refresh(api).await
    }

    /// Open the detail view for an order in the current list.
    pub fn select(&mut self, id: OrderId) {
        if self.orders.iter().any(|order| order.id == id) {
            self.selected = Some(id);
        }
    }

    pub fn selected_order(&self) -> Option<&Order> {
        let id = self.selected?;

        self.orders.iter().find(|order| order.id == id)
    }

    pub fn close_detail(&mut self) {
        self.selected = None;
    }

    /// Set an order's status, then close the detail view and reload the list.
    /// When the update fails nothing changes apart from the reported error.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Update`] if the update is rejected, or
    /// [`AdminError::Load`] if it succeeded but reloading failed.
    pub async fn update_status(
        &mut self,
        api: &dyn OrdersApi,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<(), AdminError> {
        if let Err(error) = api.update_status(id, status).await {
            warn!(order_id = %id, %status, "failed to update order status: {error}");

            self.error = Some(AdminError::Update);

            return Err(AdminError::Update);
        }

        info!(order_id = %id, %status, "order status updated");

        self.selected = None;

        self.refresh(api).await
    }
}
