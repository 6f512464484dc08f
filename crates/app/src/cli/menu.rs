use std::path::PathBuf;

use brewline::{catalog::Catalog, prices::format_amount};
use clap::Args;

#[derive(Debug, Args)]
pub(crate) struct MenuArgs {
    /// Catalog YAML file; the built-in menu is used when omitted
    #[arg(long, env = "BREWLINE_CATALOG")]
    pub(crate) catalog: Option<PathBuf>,
}

pub(crate) fn load_catalog(path: Option<&PathBuf>) -> Result<Catalog, String> {
    match path {
        Some(path) => Catalog::load(path)
            .map_err(|error| format!("failed to load catalog {}: {error}", path.display())),
        None => Catalog::builtin().map_err(|error| format!("failed to load catalog: {error}")),
    }
}

pub(crate) fn run(args: &MenuArgs) -> Result<(), String> {
    let catalog = load_catalog(args.catalog.as_ref())?;
    let currency = catalog.currency().iso_alpha_code;

    for category in catalog.categories() {
        println!("{}", category.name);

        for drink in catalog.drinks_in(category.key()) {
            println!(
                "  {:<14} {:>7} {currency}  {}",
                drink.name,
                format_amount(&drink.base_price),
                drink.description
            );
        }

        println!();
    }

    println!("Sizes");

    for size in catalog.sizes() {
        println!("  {:<14} +{}", size.name, format_amount(&size.price_modifier));
    }

    println!();
    println!("Options");

    for option in catalog.options() {
        println!("  {:<14} +{}", option.name, format_amount(&option.price));
    }

    Ok(())
}
