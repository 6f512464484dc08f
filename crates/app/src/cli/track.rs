use std::{sync::Arc, time::Duration};

use brewline::{catalog::Catalog, tracking::TrackingState};
use brewline_app::{
    client::OrdersApi,
    config::ClientConfig,
    storefront::Storefront,
    tracking::{self, PollerHandle},
};
use clap::Args;

use crate::cli::output::print_order;

#[derive(Debug, Args)]
pub(crate) struct TrackArgs {
    /// Order number to follow
    order_number: Option<String>,

    #[command(flatten)]
    client: ClientConfig,
}

#[derive(Debug, Args)]
pub(crate) struct LookupArgs {
    /// Order number to look up
    order_number: String,

    #[command(flatten)]
    client: ClientConfig,
}

pub(crate) async fn run(args: TrackArgs) -> Result<(), String> {
    let api = Arc::new(
        args.client
            .orders_api()
            .map_err(|error| error.to_string())?,
    );

    follow(
        api,
        args.order_number.as_deref().unwrap_or_default(),
        args.client.poll_interval(),
    )
    .await
}

pub(crate) async fn lookup(args: LookupArgs) -> Result<(), String> {
    let api = Arc::new(
        args.client
            .orders_api()
            .map_err(|error| error.to_string())?,
    );

    let catalog = Catalog::builtin().map_err(|error| format!("failed to load catalog: {error}"))?;
    let mut storefront = Storefront::new(Arc::new(catalog));

    let order_number = storefront
        .lookup_order(api.as_ref(), &args.order_number)
        .await
        .map_err(|error| error.to_string())?;

    follow(api, order_number.as_str(), args.client.poll_interval()).await
}

/// Print each status the poller publishes until the order reaches a final
/// state or the user interrupts.
pub(crate) async fn follow(
    api: Arc<dyn OrdersApi>,
    order_number: &str,
    interval: Duration,
) -> Result<(), String> {
    let handle = tracking::spawn_with_interval(api, Some(order_number), interval);

    tokio::select! {
        result = print_states(&handle) => result,
        _ = tokio::signal::ctrl_c() => Ok(()),
    }
}

async fn print_states(handle: &PollerHandle) -> Result<(), String> {
    let mut states = handle.subscribe();
    let mut last_status = None;

    loop {
        let state = states.borrow_and_update().clone();

        match &state {
            TrackingState::Loading => {}
            TrackingState::Showing(order) => {
                match last_status {
                    None => print_order(order),
                    Some(status) if status != order.status => {
                        println!("status: {}", order.status.customer_message());
                    }
                    Some(_) => {}
                }

                last_status = Some(order.status);
            }
            TrackingState::Error(error) => return Err(error.to_string()),
        }

        if state.is_final() {
            return Ok(());
        }

        if states.changed().await.is_err() {
            return Ok(());
        }
    }
}
