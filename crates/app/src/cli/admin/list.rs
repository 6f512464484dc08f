use brewline::orders::StatusFilter;
use brewline_app::{admin::OrderManager, config::ClientConfig};
use clap::Args;

#[derive(Debug, Args)]
pub(crate) struct ListOrdersArgs {
    /// Only show orders with this status (all, pending, preparing, delivering, completed, cancelled)
    #[arg(long, default_value = "all")]
    status: StatusFilter,

    #[command(flatten)]
    client: ClientConfig,
}

pub(crate) async fn run(args: ListOrdersArgs) -> Result<(), String> {
    let api = args
        .client
        .orders_api()
        .map_err(|error| error.to_string())?;

    let mut manager = OrderManager::new();

    manager
        .set_filter(&api, args.status)
        .await
        .map_err(|error| error.to_string())?;

    if manager.orders().is_empty() {
        println!("no {} orders", manager.filter());
        return Ok(());
    }

    for order in manager.orders() {
        println!(
            "{:>5}  {:<10}  {:>8.2}  {}  {}  {}",
            order.id,
            order.status.operator_label(),
            order.total_amount,
            order.created_at,
            order.order_number,
            order.customer_name,
        );
    }

    Ok(())
}
