use std::{path::PathBuf, str::FromStr, sync::Arc};

use brewline::{
    catalog::{Catalog, Selection},
    checkout::DeliveryAddress,
    orders::Location,
    prices::format_amount,
};
use brewline_app::{config::ClientConfig, storefront::Storefront};
use clap::Args;

use crate::cli::{menu::load_catalog, track};

/// One `--item` value: `drink[:size[:option,option...[:quantity]]]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ItemSpec {
    drink: String,
    size: Option<String>,
    options: Vec<String>,
    quantity: i64,
}

impl FromStr for ItemSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(':').map(str::trim);

        let drink = parts
            .next()
            .filter(|drink| !drink.is_empty())
            .ok_or_else(|| format!("missing drink name in item '{s}'"))?
            .to_string();

        let size = parts
            .next()
            .filter(|size| !size.is_empty())
            .map(str::to_string);

        let options = parts
            .next()
            .map(|options| {
                options
                    .split(',')
                    .map(str::trim)
                    .filter(|option| !option.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let quantity = match parts.next() {
            Some(quantity) => quantity
                .parse::<i64>()
                .ok()
                .filter(|quantity| *quantity > 0)
                .ok_or_else(|| format!("invalid quantity '{quantity}' in item '{s}'"))?,
            None => 1,
        };

        if parts.next().is_some() {
            return Err(format!("too many ':' separated fields in item '{s}'"));
        }

        Ok(Self {
            drink,
            size,
            options,
            quantity,
        })
    }
}

impl ItemSpec {
    fn selection(&self, catalog: &Catalog) -> Result<Selection, String> {
        let drink = catalog
            .drink_by_name(&self.drink)
            .map_err(|error| error.to_string())?;

        let mut selection = Selection::new(drink.key());

        if let Some(size) = &self.size {
            let size = catalog.size_by_name(size).map_err(|error| error.to_string())?;

            selection.choose_size(size.key());
        }

        for option in &self.options {
            let option = catalog
                .option_by_name(option)
                .map_err(|error| error.to_string())?;

            selection.toggle_option(option.key());
        }

        Ok(selection)
    }
}

#[derive(Debug, Args)]
pub(crate) struct OrderArgs {
    /// Drink to add, as `drink[:size[:option,option...[:quantity]]]`; repeatable
    #[arg(long = "item", required = true)]
    items: Vec<ItemSpec>,

    /// Customer name
    #[arg(long, default_value = "")]
    name: String,

    /// Contact phone number
    #[arg(long, default_value = "")]
    phone: String,

    /// Delivery address text
    #[arg(long, default_value = "")]
    address: String,

    /// Delivery latitude
    #[arg(long, allow_negative_numbers = true)]
    lat: Option<f64>,

    /// Delivery longitude
    #[arg(long, allow_negative_numbers = true)]
    lng: Option<f64>,

    /// Notes for the shop
    #[arg(long, default_value = "")]
    notes: String,

    /// Follow the order's status after placing it
    #[arg(long)]
    track: bool,

    /// Catalog YAML file; the built-in menu is used when omitted
    #[arg(long, env = "BREWLINE_CATALOG")]
    catalog: Option<PathBuf>,

    #[command(flatten)]
    client: ClientConfig,
}

pub(crate) async fn run(args: OrderArgs) -> Result<(), String> {
    let catalog = Arc::new(load_catalog(args.catalog.as_ref())?);
    let api = Arc::new(
        args.client
            .orders_api()
            .map_err(|error| error.to_string())?,
    );

    let mut storefront = Storefront::new(catalog);

    for item in &args.items {
        let selection = item.selection(storefront.catalog())?;

        let line = storefront
            .add_to_cart(&selection)
            .map_err(|error| error.to_string())?;

        storefront.set_quantity(line.id(), item.quantity);
    }

    for line in storefront.cart().lines() {
        println!(
            "{} x{} = {}",
            line.label(),
            line.quantity(),
            format_amount(&line.line_total())
        );
    }

    println!("total: {}", storefront.cart().total_display());

    storefront
        .open_checkout()
        .map_err(|error| error.to_string())?;

    if let Some(form) = storefront.checkout_form_mut() {
        form.name = args.name;
        form.phone = args.phone;
        form.notes = args.notes;
        form.address = DeliveryAddress {
            display_text: args.address,
            location: args.lat.zip(args.lng).map(|(lat, lng)| Location { lat, lng }),
        };
    }

    let order_number = storefront
        .submit_checkout(api.as_ref())
        .await
        .map_err(|error| error.to_string())?;

    println!("order_number: {order_number}");

    if let Some(path) = storefront.route().path() {
        println!("status_page: {path}");
    }

    if args.track {
        track::follow(api, order_number.as_str(), args.client.poll_interval()).await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn drink_only() -> TestResult {
        let spec: ItemSpec = "Latte".parse()?;

        assert_eq!(
            spec,
            ItemSpec {
                drink: "Latte".to_string(),
                size: None,
                options: Vec::new(),
                quantity: 1,
            }
        );

        Ok(())
    }

    #[test]
    fn every_field() -> TestResult {
        let spec: ItemSpec = "Latte:Medium:Oat Milk, Extra Shot:2".parse()?;

        assert_eq!(spec.size.as_deref(), Some("Medium"));
        assert_eq!(spec.options, ["Oat Milk", "Extra Shot"]);
        assert_eq!(spec.quantity, 2);

        Ok(())
    }

    #[test]
    fn empty_fields_fall_back_to_defaults() -> TestResult {
        let spec: ItemSpec = "Espresso::Vanilla Syrup".parse()?;

        assert_eq!(spec.size, None);
        assert_eq!(spec.options, ["Vanilla Syrup"]);

        Ok(())
    }

    #[test]
    fn bad_specs_are_rejected() {
        assert!("".parse::<ItemSpec>().is_err(), "missing drink");
        assert!("Latte:Small::0".parse::<ItemSpec>().is_err(), "zero quantity");
        assert!("Latte:Small::x".parse::<ItemSpec>().is_err(), "non-numeric quantity");
        assert!("Latte:Small::1:extra".parse::<ItemSpec>().is_err(), "extra field");
    }

    #[test]
    fn selection_resolves_names_against_the_catalog() -> TestResult {
        let catalog = Catalog::builtin()?;
        let spec: ItemSpec = "latte:medium:oat milk".parse()?;

        let selection = spec.selection(&catalog)?;
        let resolved = catalog.resolve(&selection)?;

        assert_eq!(format_amount(&resolved.unit_price()), "45.00");

        Ok(())
    }

    #[test]
    fn unknown_names_are_reported() -> TestResult {
        let catalog = Catalog::builtin()?;
        let spec: ItemSpec = "Mocha".parse()?;

        assert!(spec.selection(&catalog).is_err(), "Mocha is not on the menu");

        Ok(())
    }
}
