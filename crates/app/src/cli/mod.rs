use brewline_app::config::LoggingConfig;
use clap::{Parser, Subcommand};

mod admin;
mod menu;
mod order;
mod output;
mod track;

#[derive(Debug, Parser)]
#[command(name = "brewline", about = "Brewline coffee shop CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    pub(crate) logging: LoggingConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show the drink menu
    Menu(menu::MenuArgs),

    /// Place an order
    Order(order::OrderArgs),

    /// Follow an order's status until it is delivered or cancelled
    Track(track::TrackArgs),

    /// Look up an order by number and follow it
    Lookup(track::LookupArgs),

    /// Operator commands
    Admin(admin::AdminCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Menu(args) => menu::run(&args),
            Commands::Order(args) => order::run(args).await,
            Commands::Track(args) => track::run(args).await,
            Commands::Lookup(args) => track::lookup(args).await,
            Commands::Admin(command) => admin::run(command).await,
        }
    }
}
