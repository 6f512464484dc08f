//! Drink selections

use smallvec::SmallVec;

use crate::{
    catalog::{Drink, DrinkKey, DrinkOption, OptionKey, Size, SizeKey, unit_price},
    prices::Price,
};

/// A drink being customised before it is added to the cart.
///
/// Options form an ordered set: choosing an option twice removes it again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    drink: DrinkKey,
    size: Option<SizeKey>,
    options: SmallVec<[OptionKey; 4]>,
}

impl Selection {
    /// Start a selection for a drink with the default size and no options.
    pub fn new(drink: DrinkKey) -> Self {
        Self {
            drink,
            size: None,
            options: SmallVec::new(),
        }
    }

    /// Builder form of [`Selection::choose_size`].
    #[must_use]
    pub fn with_size(mut self, size: SizeKey) -> Self {
        self.choose_size(size);
        self
    }

    /// Builder form that adds an option if it is not already chosen.
    #[must_use]
    pub fn with_option(mut self, option: OptionKey) -> Self {
        if !self.options.contains(&option) {
            self.options.push(option);
        }
        self
    }

    /// Choose a cup size.
    pub fn choose_size(&mut self, size: SizeKey) {
        self.size = Some(size);
    }

    /// Add the option if absent, remove it if present. Returns whether the
    /// option is chosen afterwards.
    pub fn toggle_option(&mut self, option: OptionKey) -> bool {
        if let Some(position) = self.options.iter().position(|chosen| *chosen == option) {
            self.options.remove(position);
            false
        } else {
            self.options.push(option);
            true
        }
    }

    /// Selected drink
    pub fn drink(&self) -> DrinkKey {
        self.drink
    }

    /// Chosen size, if any
    pub fn size(&self) -> Option<SizeKey> {
        self.size
    }

    /// Chosen options in the order they were picked
    pub fn options(&self) -> &[OptionKey] {
        &self.options
    }
}

/// A [`Selection`] with its keys looked up in a catalog.
#[derive(Debug, Clone)]
pub struct ResolvedSelection<'a> {
    /// Drink
    pub drink: &'a Drink,

    /// Size (the catalog default when none was chosen)
    pub size: &'a Size,

    /// Options in the order they were picked
    pub options: SmallVec<[&'a DrinkOption; 4]>,
}

impl ResolvedSelection<'_> {
    /// Price of one drink as currently customised
    pub fn unit_price(&self) -> Price {
        unit_price(self.drink, self.size, &self.options)
    }
}
