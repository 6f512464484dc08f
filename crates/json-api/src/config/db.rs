//! Database Config

use clap::Args;

/// Order store settings.
#[derive(Debug, Args)]
pub struct DatabaseConfig {
    /// `SQLite` connection string; `mode=rwc` creates the file on first start
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://orders.db?mode=rwc")]
    pub database_url: String,
}
