//! Orders Repository

use jiff::Timestamp;
use sqlx::{FromRow, Row, Sqlite, Transaction, query, query_as, sqlite::SqliteRow};

use brewline::orders::{OrderId, OrderItem, OrderNumber, OrderStatus, StatusFilter};

use crate::domain::orders::{data::NewOrder, records::OrderRecord};

const CREATE_ORDER_SQL: &str = include_str!("sql/create_order.sql");
const CREATE_ORDER_ITEM_SQL: &str = include_str!("sql/create_order_item.sql");
const GET_ORDER_SQL: &str = include_str!("sql/get_order.sql");
const LIST_ORDERS_SQL: &str = include_str!("sql/list_orders.sql");
const LIST_ORDERS_BY_STATUS_SQL: &str = include_str!("sql/list_orders_by_status.sql");
const LIST_ORDER_ITEMS_SQL: &str = include_str!("sql/list_order_items.sql");
const UPDATE_ORDER_STATUS_SQL: &str = include_str!("sql/update_order_status.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct SqliteOrdersRepository;

impl SqliteOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        order_number: &OrderNumber,
        created_at: Timestamp,
        order: &NewOrder,
    ) -> Result<OrderRecord, sqlx::Error> {
        let mut created = query_as::<Sqlite, OrderRecord>(CREATE_ORDER_SQL)
            .bind(order_number.as_str())
            .bind(&order.customer_name)
            .bind(&order.phone_number)
            .bind(&order.delivery_address)
            .bind(order.location.lat)
            .bind(order.location.lng)
            .bind(order.notes.as_deref())
            .bind(created_at.as_microsecond())
            .bind(order.total_amount)
            .fetch_one(&mut **tx)
            .await?;

        for item in &order.items {
            query(CREATE_ORDER_ITEM_SQL)
                .bind(created.id.into_inner())
                .bind(&item.name)
                .bind(i64::from(item.quantity))
                .bind(item.price)
                .execute(&mut **tx)
                .await?;
        }

        created.items.clone_from(&order.items);

        Ok(created)
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        order_number: &OrderNumber,
    ) -> Result<OrderRecord, sqlx::Error> {
        let mut order = query_as::<Sqlite, OrderRecord>(GET_ORDER_SQL)
            .bind(order_number.as_str())
            .fetch_one(&mut **tx)
            .await?;

        order.items = self.list_order_items(tx, order.id).await?;

        Ok(order)
    }

    pub(crate) async fn list_orders(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        filter: StatusFilter,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        let mut orders = match filter.query_value() {
            Some(status) => {
                query_as::<Sqlite, OrderRecord>(LIST_ORDERS_BY_STATUS_SQL)
                    .bind(status)
                    .fetch_all(&mut **tx)
                    .await?
            }
            None => {
                query_as::<Sqlite, OrderRecord>(LIST_ORDERS_SQL)
                    .fetch_all(&mut **tx)
                    .await?
            }
        };

        for order in &mut orders {
            order.items = self.list_order_items(tx, order.id).await?;
        }

        Ok(orders)
    }

    pub(crate) async fn update_order_status(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        order: OrderId,
        status: OrderStatus,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(UPDATE_ORDER_STATUS_SQL)
            .bind(status.as_str())
            .bind(order.into_inner())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    async fn list_order_items(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        order: OrderId,
    ) -> Result<Vec<OrderItem>, sqlx::Error> {
        let rows = query(LIST_ORDER_ITEMS_SQL)
            .bind(order.into_inner())
            .fetch_all(&mut **tx)
            .await?;

        rows.iter().map(order_item_from_row).collect()
    }
}

fn order_item_from_row(row: &SqliteRow) -> sqlx::Result<OrderItem> {
    let quantity: i64 = row.try_get("quantity")?;

    let quantity = u32::try_from(quantity).map_err(|e| sqlx::Error::ColumnDecode {
        index: "quantity".to_string(),
        source: Box::new(e),
    })?;

    Ok(OrderItem {
        name: row.try_get("name")?,
        quantity,
        price: row.try_get("price")?,
    })
}

impl<'r> FromRow<'r, SqliteRow> for OrderRecord {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        let created_at: i64 = row.try_get("created_at")?;

        let created_at =
            Timestamp::from_microsecond(created_at).map_err(|e| sqlx::Error::ColumnDecode {
                index: "created_at".to_string(),
                source: Box::new(e),
            })?;

        let status: String = row.try_get("status")?;

        let status = status
            .parse::<OrderStatus>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            id: OrderId::new(row.try_get("id")?),
            order_number: OrderNumber::new(row.try_get::<String, _>("order_number")?),
            customer_name: row.try_get("customer_name")?,
            phone_number: row.try_get("phone_number")?,
            delivery_address: row.try_get("delivery_address")?,
            latitude: row.try_get("latitude")?,
            longitude: row.try_get("longitude")?,
            notes: row.try_get("notes")?,
            created_at,
            total_amount: row.try_get("total_amount")?,
            status,
            items: Vec::new(),
        })
    }
}
