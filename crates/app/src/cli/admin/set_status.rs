use brewline::orders::{OrderId, OrderStatus};
use brewline_app::{admin::OrderManager, config::ClientConfig};
use clap::Args;

#[derive(Debug, Args)]
pub(crate) struct SetStatusArgs {
    /// Order id as shown by `admin list`
    id: i64,

    /// New status (pending, preparing, delivering, completed, cancelled)
    status: OrderStatus,

    #[command(flatten)]
    client: ClientConfig,
}

pub(crate) async fn run(args: SetStatusArgs) -> Result<(), String> {
    let api = args
        .client
        .orders_api()
        .map_err(|error| error.to_string())?;

    let id = OrderId::new(args.id);

    OrderManager::new()
        .update_status(&api, id, args.status)
        .await
        .map_err(|error| error.to_string())?;

    println!("order {id} is now {}", args.status.operator_label());

    Ok(())
}
