use clap::{Args, Subcommand};

mod list;
mod set_status;

#[derive(Debug, Args)]
pub(crate) struct AdminCommand {
    #[command(subcommand)]
    command: AdminSubcommand,
}

#[derive(Debug, Subcommand)]
enum AdminSubcommand {
    /// List orders, newest first
    List(list::ListOrdersArgs),

    /// Change an order's status
    SetStatus(set_status::SetStatusArgs),
}

pub(crate) async fn run(command: AdminCommand) -> Result<(), String> {
    match command.command {
        AdminSubcommand::List(args) => list::run(args).await,
        AdminSubcommand::SetStatus(args) => set_status::run(args).await,
    }
}
