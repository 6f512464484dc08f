//! Catalog YAML documents

use serde::Deserialize;

/// Top-level catalog document.
#[derive(Debug, Deserialize)]
pub struct CatalogFixture {
    /// ISO currency code every price must use
    pub currency: String,

    /// Cup sizes, the first being the default
    pub sizes: Vec<PricedFixture>,

    /// Add-on options
    #[serde(default)]
    pub options: Vec<PricedFixture>,

    /// Drink categories in menu order
    pub categories: Vec<CategoryFixture>,
}

/// A named entry with a price (e.g. `"5.00 CNY"`).
#[derive(Debug, Deserialize)]
pub struct PricedFixture {
    /// Display name
    pub name: String,

    /// Price string
    pub price: String,
}

/// Category Fixture
#[derive(Debug, Deserialize)]
pub struct CategoryFixture {
    /// Category name
    pub name: String,

    /// Drinks in this category
    pub drinks: Vec<DrinkFixture>,
}

/// Drink Fixture
#[derive(Debug, Deserialize)]
pub struct DrinkFixture {
    /// Drink name
    pub name: String,

    /// Short description
    #[serde(default)]
    pub description: String,

    /// Base price before size and options
    pub price: String,
}
