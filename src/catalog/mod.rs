//! Catalog
//!
//! The drink menu: categories of drinks, cup sizes that adjust the price, and
//! add-on options. The catalog is read-only once built.

use std::{fs, path::Path};

use rustc_hash::FxHashMap;
use rusty_money::{Money, iso::Currency};
use slotmap::{SlotMap, new_key_type};
use thiserror::Error;

use crate::{
    catalog::fixture::CatalogFixture,
    prices::{Price, PriceError, find_currency, parse_price},
};

pub mod fixture;
mod selection;

pub use selection::{ResolvedSelection, Selection};

/// The menu compiled into the binary.
const BUILTIN_CATALOG: &str = include_str!("../../fixtures/catalog.yml");

new_key_type! {
    /// Category Key
    pub struct CategoryKey;

    /// Drink Key
    pub struct DrinkKey;

    /// Size Key
    pub struct SizeKey;

    /// Option Key
    pub struct OptionKey;
}

/// Catalog loading and lookup errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// IO error reading a catalog file
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("failed to parse catalog YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// A price could not be parsed
    #[error("invalid price: {0}")]
    Price(#[from] PriceError),

    /// A price uses a different currency from the catalog
    #[error("currency mismatch on {name}: expected {expected}, found {found}")]
    CurrencyMismatch {
        /// Entry carrying the price
        name: String,
        /// Catalog currency
        expected: &'static str,
        /// Currency found on the entry
        found: &'static str,
    },

    /// Two entries of the same kind share a name
    #[error("duplicate {kind} name: {name}")]
    Duplicate {
        /// Entry kind (drink, size, option, category)
        kind: &'static str,
        /// The repeated name
        name: String,
    },

    /// The catalog defines no cup sizes
    #[error("catalog defines no sizes")]
    NoSizes,

    /// Category not found
    #[error("category not found: {0}")]
    CategoryNotFound(String),

    /// Drink not found
    #[error("drink not found: {0}")]
    DrinkNotFound(String),

    /// Size not found
    #[error("size not found: {0}")]
    SizeNotFound(String),

    /// Option not found
    #[error("option not found: {0}")]
    OptionNotFound(String),

    /// A selection refers to a key from another catalog
    #[error("selection refers to an entry that is not in this catalog")]
    UnknownKey,
}

/// Drink category
#[derive(Debug, Clone)]
pub struct Category {
    key: CategoryKey,

    /// Category name
    pub name: String,
}

impl Category {
    /// Returns the category key
    pub fn key(&self) -> CategoryKey {
        self.key
    }
}

/// Drink
#[derive(Debug, Clone)]
pub struct Drink {
    key: DrinkKey,

    /// Drink name
    pub name: String,

    /// Short description
    pub description: String,

    /// Category the drink is listed under
    pub category: CategoryKey,

    /// Price of the smallest cup with no options
    pub base_price: Price,
}

impl Drink {
    /// Returns the drink key
    pub fn key(&self) -> DrinkKey {
        self.key
    }
}

/// Cup size
#[derive(Debug, Clone)]
pub struct Size {
    key: SizeKey,

    /// Size name
    pub name: String,

    /// Amount added to the drink's base price
    pub price_modifier: Price,
}

impl Size {
    /// Returns the size key
    pub fn key(&self) -> SizeKey {
        self.key
    }
}

/// Add-on option (syrup, milk, extra shot...)
#[derive(Debug, Clone)]
pub struct DrinkOption {
    key: OptionKey,

    /// Option name
    pub name: String,

    /// Amount added per drink
    pub price: Price,
}

impl DrinkOption {
    /// Returns the option key
    pub fn key(&self) -> OptionKey {
        self.key
    }
}

/// Unit price of a drink in a given size with the given options.
pub fn unit_price(drink: &Drink, size: &Size, options: &[&DrinkOption]) -> Price {
    let minor_units = drink.base_price.to_minor_units()
        + size.price_modifier.to_minor_units()
        + options
            .iter()
            .map(|option| option.price.to_minor_units())
            .sum::<i64>();

    Money::from_minor(minor_units, drink.base_price.currency())
}

/// Catalog
#[derive(Debug)]
pub struct Catalog {
    currency: &'static Currency,

    categories: SlotMap<CategoryKey, Category>,
    drinks: SlotMap<DrinkKey, Drink>,
    sizes: SlotMap<SizeKey, Size>,
    options: SlotMap<OptionKey, DrinkOption>,

    /// Menu order for each kind of entry
    category_order: Vec<CategoryKey>,
    drink_order: Vec<DrinkKey>,
    size_order: Vec<SizeKey>,
    option_order: Vec<OptionKey>,

    /// Lower-cased name -> key
    category_names: FxHashMap<String, CategoryKey>,
    drink_names: FxHashMap<String, DrinkKey>,
    size_names: FxHashMap<String, SizeKey>,
    option_names: FxHashMap<String, OptionKey>,
}

impl Catalog {
    fn empty(currency: &'static Currency) -> Self {
        Self {
            currency,
            categories: SlotMap::with_key(),
            drinks: SlotMap::with_key(),
            sizes: SlotMap::with_key(),
            options: SlotMap::with_key(),
            category_order: Vec::new(),
            drink_order: Vec::new(),
            size_order: Vec::new(),
            option_order: Vec::new(),
            category_names: FxHashMap::default(),
            drink_names: FxHashMap::default(),
            size_names: FxHashMap::default(),
            option_names: FxHashMap::default(),
        }
    }

    /// The menu shipped with the storefront.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded catalog document is invalid.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_yaml_str(BUILTIN_CATALOG)
    }

    /// Parse a catalog from a YAML document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be parsed or fails validation.
    pub fn from_yaml_str(contents: &str) -> Result<Self, CatalogError> {
        let fixture: CatalogFixture = serde_norway::from_str(contents)?;

        fixture.try_into()
    }

    /// Load a catalog from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or fails validation.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml_str(&contents)
    }

    /// Currency used by every price in the catalog
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Categories in menu order
    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.category_order
            .iter()
            .filter_map(|key| self.categories.get(*key))
    }

    /// Get a category by key
    pub fn category(&self, key: CategoryKey) -> Option<&Category> {
        self.categories.get(key)
    }

    /// Get a category by name (case-insensitive)
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::CategoryNotFound`] when no category has that name.
    pub fn category_by_name(&self, name: &str) -> Result<&Category, CatalogError> {
        lookup(&self.category_names, &self.categories, name)
            .ok_or_else(|| CatalogError::CategoryNotFound(name.to_string()))
    }

    /// All drinks in menu order
    pub fn drinks(&self) -> impl Iterator<Item = &Drink> {
        self.drink_order
            .iter()
            .filter_map(|key| self.drinks.get(*key))
    }

    /// Drinks listed under the given category, in menu order
    pub fn drinks_in(&self, category: CategoryKey) -> impl Iterator<Item = &Drink> {
        self.drinks()
            .filter(move |drink| drink.category == category)
    }

    /// Get a drink by key
    pub fn drink(&self, key: DrinkKey) -> Option<&Drink> {
        self.drinks.get(key)
    }

    /// Get a drink by name (case-insensitive)
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DrinkNotFound`] when no drink has that name.
    pub fn drink_by_name(&self, name: &str) -> Result<&Drink, CatalogError> {
        lookup(&self.drink_names, &self.drinks, name)
            .ok_or_else(|| CatalogError::DrinkNotFound(name.to_string()))
    }

    /// Sizes in menu order
    pub fn sizes(&self) -> impl Iterator<Item = &Size> {
        self.size_order.iter().filter_map(|key| self.sizes.get(*key))
    }

    /// The size used when a selection does not name one (the first size)
    pub fn default_size(&self) -> Option<&Size> {
        self.sizes().next()
    }

    /// Get a size by key
    pub fn size(&self, key: SizeKey) -> Option<&Size> {
        self.sizes.get(key)
    }

    /// Get a size by name (case-insensitive)
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::SizeNotFound`] when no size has that name.
    pub fn size_by_name(&self, name: &str) -> Result<&Size, CatalogError> {
        lookup(&self.size_names, &self.sizes, name)
            .ok_or_else(|| CatalogError::SizeNotFound(name.to_string()))
    }

    /// Options in menu order
    pub fn options(&self) -> impl Iterator<Item = &DrinkOption> {
        self.option_order
            .iter()
            .filter_map(|key| self.options.get(*key))
    }

    /// Get an option by key
    pub fn option(&self, key: OptionKey) -> Option<&DrinkOption> {
        self.options.get(key)
    }

    /// Get an option by name (case-insensitive)
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::OptionNotFound`] when no option has that name.
    pub fn option_by_name(&self, name: &str) -> Result<&DrinkOption, CatalogError> {
        lookup(&self.option_names, &self.options, name)
            .ok_or_else(|| CatalogError::OptionNotFound(name.to_string()))
    }

    /// Resolve a selection's keys into catalog entries, applying the default size.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownKey`] if any key is not from this catalog.
    pub fn resolve(&self, selection: &Selection) -> Result<ResolvedSelection<'_>, CatalogError> {
        let drink = self
            .drink(selection.drink())
            .ok_or(CatalogError::UnknownKey)?;

        let size = match selection.size() {
            Some(key) => self.size(key).ok_or(CatalogError::UnknownKey)?,
            None => self.default_size().ok_or(CatalogError::NoSizes)?,
        };

        let options = selection
            .options()
            .iter()
            .map(|key| self.option(*key).ok_or(CatalogError::UnknownKey))
            .collect::<Result<_, _>>()?;

        Ok(ResolvedSelection {
            drink,
            size,
            options,
        })
    }

    fn checked_price(&self, name: &str, price: &str) -> Result<Price, CatalogError> {
        let price = parse_price(price)?;

        if price.currency() != self.currency {
            return Err(CatalogError::CurrencyMismatch {
                name: name.to_string(),
                expected: self.currency.iso_alpha_code,
                found: price.currency().iso_alpha_code,
            });
        }

        Ok(price)
    }
}

impl TryFrom<CatalogFixture> for Catalog {
    type Error = CatalogError;

    fn try_from(fixture: CatalogFixture) -> Result<Self, Self::Error> {
        let mut catalog = Catalog::empty(find_currency(&fixture.currency)?);

        if fixture.sizes.is_empty() {
            return Err(CatalogError::NoSizes);
        }

        for size in fixture.sizes {
            let price_modifier = catalog.checked_price(&size.name, &size.price)?;
            let lower = unique_name(&catalog.size_names, "size", &size.name)?;

            let key = catalog.sizes.insert_with_key(|key| Size {
                key,
                name: size.name,
                price_modifier,
            });

            catalog.size_names.insert(lower, key);
            catalog.size_order.push(key);
        }

        for option in fixture.options {
            let price = catalog.checked_price(&option.name, &option.price)?;
            let lower = unique_name(&catalog.option_names, "option", &option.name)?;

            let key = catalog.options.insert_with_key(|key| DrinkOption {
                key,
                name: option.name,
                price,
            });

            catalog.option_names.insert(lower, key);
            catalog.option_order.push(key);
        }

        for category in fixture.categories {
            let lower = unique_name(&catalog.category_names, "category", &category.name)?;

            let category_key = catalog.categories.insert_with_key(|key| Category {
                key,
                name: category.name,
            });

            catalog.category_names.insert(lower, category_key);
            catalog.category_order.push(category_key);

            for drink in category.drinks {
                let base_price = catalog.checked_price(&drink.name, &drink.price)?;
                let lower = unique_name(&catalog.drink_names, "drink", &drink.name)?;

                let key = catalog.drinks.insert_with_key(|key| Drink {
                    key,
                    name: drink.name,
                    description: drink.description,
                    category: category_key,
                    base_price,
                });

                catalog.drink_names.insert(lower, key);
                catalog.drink_order.push(key);
            }
        }

        Ok(catalog)
    }
}

fn unique_name<K>(
    index: &FxHashMap<String, K>,
    kind: &'static str,
    name: &str,
) -> Result<String, CatalogError> {
    let lower = name.trim().to_lowercase();

    if index.contains_key(&lower) {
        return Err(CatalogError::Duplicate {
            kind,
            name: name.to_string(),
        });
    }

    Ok(lower)
}

fn lookup<'a, K: slotmap::Key, V>(
    index: &FxHashMap<String, K>,
    entries: &'a SlotMap<K, V>,
    name: &str,
) -> Option<&'a V> {
    index
        .get(&name.trim().to_lowercase())
        .and_then(|key| entries.get(*key))
}
