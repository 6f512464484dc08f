//! Database connection management

use std::str::FromStr;

use sqlx::{
    Sqlite, SqlitePool, Transaction, raw_sql,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};

const SCHEMA_SQL: &str = include_str!("sql/schema.sql");

#[derive(Debug, Clone)]
pub struct Db {
    pool: SqlitePool,
}

impl Db {
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Begin a transaction.
    ///
    /// # Errors
    ///
    /// Returns an error when no connection can be acquired.
    pub async fn begin(&self) -> Result<Transaction<'static, Sqlite>, sqlx::Error> {
        self.pool.begin().await
    }
}

/// Connect to `SQLite`, creating the database file when the URL allows it.
///
/// # Errors
///
/// Returns an error if the URL is invalid or the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.foreign_keys(true);

    SqlitePoolOptions::new().connect_with(options).await
}

/// Create the order tables if they do not exist yet.
///
/// # Errors
///
/// Returns an error if the schema statements fail.
pub async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    raw_sql(SCHEMA_SQL).execute(pool).await?;

    Ok(())
}
