//! Orders service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::{debug, info};
use uuid::Uuid;

use brewline::orders::{OrderId, OrderNumber, OrderStatus, StatusFilter};

use crate::{
    database::Db,
    domain::orders::{
        data::NewOrder, errors::OrdersServiceError, records::OrderRecord,
        repository::SqliteOrdersRepository,
    },
};

#[derive(Debug, Clone)]
pub struct SqliteOrdersService {
    db: Db,
    repository: SqliteOrdersRepository,
}

impl SqliteOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: SqliteOrdersRepository::new(),
        }
    }
}

#[async_trait]
impl OrdersService for SqliteOrdersService {
    async fn create_order(&self, order: NewOrder) -> Result<OrderRecord, OrdersServiceError> {
        if [&order.customer_name, &order.phone_number, &order.delivery_address]
            .into_iter()
            .any(|field| field.trim().is_empty())
        {
            return Err(OrdersServiceError::MissingRequiredData);
        }

        if order.items.is_empty() || order.items.iter().any(|item| item.quantity == 0) {
            return Err(OrdersServiceError::InvalidData);
        }

        if !order.location.lat.is_finite()
            || !order.location.lng.is_finite()
            || !order.total_amount.is_finite()
        {
            return Err(OrdersServiceError::InvalidData);
        }

        let order_number = OrderNumber::new(Uuid::now_v7().to_string());

        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_order(&mut tx, &order_number, Timestamp::now(), &order)
            .await?;

        tx.commit().await?;

        info!(
            order_id = %created.id,
            order_number = %created.order_number,
            items = created.items.len(),
            "order created"
        );

        Ok(created)
    }

    async fn get_order(&self, order_number: OrderNumber) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let order = self.repository.get_order(&mut tx, &order_number).await?;

        tx.commit().await?;

        Ok(order)
    }

    async fn list_orders(
        &self,
        filter: StatusFilter,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let orders = self.repository.list_orders(&mut tx, filter).await?;

        tx.commit().await?;

        debug!(%filter, count = orders.len(), "orders listed");

        Ok(orders)
    }

    async fn update_status(
        &self,
        order: OrderId,
        status: OrderStatus,
    ) -> Result<(), OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self
            .repository
            .update_order_status(&mut tx, order, status)
            .await?;

        if rows_affected == 0 {
            return Err(OrdersServiceError::NotFound);
        }

        tx.commit().await?;

        info!(order_id = %order, %status, "order status updated");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Stores a new order with a freshly assigned order number and `pending` status.
    async fn create_order(&self, order: NewOrder) -> Result<OrderRecord, OrdersServiceError>;

    /// Retrieve a single order by its public order number.
    async fn get_order(&self, order_number: OrderNumber) -> Result<OrderRecord, OrdersServiceError>;

    /// Retrieves orders matching the filter, newest first.
    async fn list_orders(
        &self,
        filter: StatusFilter,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// Sets the status of the order with the given row id.
    async fn update_status(
        &self,
        order: OrderId,
        status: OrderStatus,
    ) -> Result<(), OrdersServiceError>;
}
