//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    database::{self, Db},
    domain::orders::{OrdersService, SqliteOrdersService},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to initialise database schema")]
    Schema(#[source] sqlx::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub orders: Arc<dyn OrdersService>,
}

impl AppContext {
    /// Build application context from a database URL, creating the schema
    /// if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns an error when connecting or initialising the schema fails.
    pub async fn from_database_url(url: &str) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        database::init_schema(&pool)
            .await
            .map_err(AppInitError::Schema)?;

        Ok(Self {
            orders: Arc::new(SqliteOrdersService::new(Db::new(pool))),
        })
    }
}
