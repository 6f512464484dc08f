//! Cart
//!
//! An ordered list of drink lines. Every line keeps the unit price computed when
//! it was added; quantity is the only thing that changes afterwards.

use std::fmt;

use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;

use crate::{
    catalog::{Drink, DrinkKey, DrinkOption, OptionKey, ResolvedSelection, Size, SizeKey, unit_price},
    prices::{Price, format_amount, times},
};

/// Identifier of a cart line, unique for the lifetime of the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineId(u64);

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Cart line
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    id: LineId,
    drink: DrinkKey,
    size: SizeKey,
    options: SmallVec<[OptionKey; 4]>,
    drink_name: String,
    size_name: String,
    option_names: Vec<String>,
    quantity: u32,
    unit_price: Price,
}

impl CartLine {
    /// Line identifier
    pub fn id(&self) -> LineId {
        self.id
    }

    /// Drink on this line
    pub fn drink(&self) -> DrinkKey {
        self.drink
    }

    /// Cup size
    pub fn size(&self) -> SizeKey {
        self.size
    }

    /// Options in the order they were chosen
    pub fn options(&self) -> &[OptionKey] {
        &self.options
    }

    /// Drink name captured when the line was added
    pub fn drink_name(&self) -> &str {
        &self.drink_name
    }

    /// Size name captured when the line was added
    pub fn size_name(&self) -> &str {
        &self.size_name
    }

    /// Option names captured when the line was added
    pub fn option_names(&self) -> &[String] {
        &self.option_names
    }

    /// Number of drinks on this line (always at least one)
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Price of one drink
    pub fn unit_price(&self) -> Price {
        self.unit_price
    }

    /// `unit_price * quantity`
    pub fn line_total(&self) -> Price {
        times(&self.unit_price, self.quantity)
    }

    /// Human-readable label, e.g. `Latte (Medium) - Oat Milk, Extra Shot`.
    pub fn label(&self) -> String {
        if self.option_names.is_empty() {
            format!("{} ({})", self.drink_name, self.size_name)
        } else {
            format!(
                "{} ({}) - {}",
                self.drink_name,
                self.size_name,
                self.option_names.join(", ")
            )
        }
    }
}

/// Cart
#[derive(Debug, Clone)]
pub struct Cart {
    lines: Vec<CartLine>,
    currency: &'static Currency,
    next_id: u64,
}

impl Cart {
    /// Create an empty cart priced in the given currency.
    pub fn new(currency: &'static Currency) -> Self {
        Cart {
            lines: Vec::new(),
            currency,
            next_id: 1,
        }
    }

    /// Append a new line for the drink. Identical selections are never merged.
    pub fn add_item(&mut self, drink: &Drink, size: &Size, options: &[&DrinkOption]) -> CartLine {
        let id = LineId(self.next_id);
        self.next_id += 1;

        let line = CartLine {
            id,
            drink: drink.key(),
            size: size.key(),
            options: options.iter().map(|option| option.key()).collect(),
            drink_name: drink.name.clone(),
            size_name: size.name.clone(),
            option_names: options.iter().map(|option| option.name.clone()).collect(),
            quantity: 1,
            unit_price: unit_price(drink, size, options),
        };

        self.lines.push(line.clone());

        line
    }

    /// Append a line for a resolved selection.
    pub fn add_selection(&mut self, selection: &ResolvedSelection<'_>) -> CartLine {
        self.add_item(selection.drink, selection.size, &selection.options)
    }

    /// Set a line's quantity. Zero or less removes the line; unknown ids are ignored.
    pub fn set_quantity(&mut self, id: LineId, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(id);
            return;
        }

        if let Some(line) = self.line_mut(id) {
            line.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        }
    }

    /// Remove a line; unknown ids are ignored.
    pub fn remove_item(&mut self, id: LineId) {
        self.lines.retain(|line| line.id != id);
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Get a line by id
    pub fn line(&self, id: LineId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id == id)
    }

    fn line_mut(&mut self, id: LineId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.id == id)
    }

    /// Lines in the order they were added
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Sum of every line total.
    pub fn total(&self) -> Price {
        let minor_units = self
            .lines
            .iter()
            .map(|line| line.line_total().to_minor_units())
            .sum();

        Money::from_minor(minor_units, self.currency)
    }

    /// Total formatted for display, e.g. `"90.00"`.
    pub fn total_display(&self) -> String {
        format_amount(&self.total())
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of drinks across all lines.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Currency of the cart
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rusty_money::iso::CNY;
    use testresult::TestResult;

    use super::*;
    use crate::catalog::{Catalog, Selection};

    fn latte_line(cart: &mut Cart, catalog: &Catalog) -> TestResult<CartLine> {
        let selection = Selection::new(catalog.drink_by_name("Latte")?.key())
            .with_size(catalog.size_by_name("Medium")?.key())
            .with_option(catalog.option_by_name("Oat Milk")?.key());

        Ok(cart.add_selection(&catalog.resolve(&selection)?))
    }

    #[test]
    fn latte_scenario_totals_ninety() -> TestResult {
        let catalog = Catalog::builtin()?;
        let mut cart = Cart::new(catalog.currency());

        let line = latte_line(&mut cart, &catalog)?;
        cart.set_quantity(line.id(), 2);

        let line = cart.line(line.id()).ok_or("line missing")?;

        assert_eq!(line.unit_price(), Money::from_minor(4500, CNY));
        assert_eq!(line.line_total(), Money::from_minor(9000, CNY));
        assert_eq!(cart.total_display(), "90.00");
        assert_eq!(cart.item_count(), 2);

        Ok(())
    }

    #[test]
    fn identical_selections_are_separate_lines() -> TestResult {
        let catalog = Catalog::builtin()?;
        let mut cart = Cart::new(catalog.currency());

        let first = latte_line(&mut cart, &catalog)?;
        let second = latte_line(&mut cart, &catalog)?;

        assert_ne!(first.id(), second.id());
        assert_eq!(cart.len(), 2);

        Ok(())
    }

    #[test]
    fn zero_and_negative_quantities_remove_the_line() -> TestResult {
        let catalog = Catalog::builtin()?;
        let mut cart = Cart::new(catalog.currency());

        let zero = latte_line(&mut cart, &catalog)?;
        let negative = latte_line(&mut cart, &catalog)?;

        cart.set_quantity(zero.id(), 0);
        cart.set_quantity(negative.id(), -1);

        assert!(cart.is_empty(), "both lines should be removed");

        Ok(())
    }

    #[test]
    fn unknown_line_ids_are_ignored() -> TestResult {
        let catalog = Catalog::builtin()?;
        let mut cart = Cart::new(catalog.currency());
        let line = latte_line(&mut cart, &catalog)?;

        let unknown = LineId(line.id().0 + 100);

        cart.set_quantity(unknown, 5);
        cart.set_quantity(unknown, 0);
        cart.remove_item(unknown);

        assert_eq!(cart.lines(), [line]);

        Ok(())
    }

    #[test]
    fn ids_are_not_reused_after_removal() -> TestResult {
        let catalog = Catalog::builtin()?;
        let mut cart = Cart::new(catalog.currency());

        let first = latte_line(&mut cart, &catalog)?;
        cart.clear();
        let second = latte_line(&mut cart, &catalog)?;

        assert_ne!(first.id(), second.id());

        Ok(())
    }

    #[test]
    fn empty_cart_totals_zero() {
        let cart = Cart::new(CNY);

        assert_eq!(cart.total(), Money::from_minor(0, CNY));
        assert_eq!(cart.total_display(), "0.00");
    }

    #[test]
    fn label_lists_size_and_options() -> TestResult {
        let catalog = Catalog::builtin()?;
        let mut cart = Cart::new(catalog.currency());

        let espresso = catalog.drink_by_name("Espresso")?;
        let small = catalog.size_by_name("Small")?;
        let shot = catalog.option_by_name("Extra Shot")?;
        let vanilla = catalog.option_by_name("Vanilla Syrup")?;

        let plain = cart.add_item(espresso, small, &[]);
        let dressed = cart.add_item(espresso, small, &[shot, vanilla]);

        assert_eq!(plain.label(), "Espresso (Small)");
        assert_eq!(dressed.label(), "Espresso (Small) - Extra Shot, Vanilla Syrup");

        Ok(())
    }

    #[test]
    fn unit_price_is_fixed_at_add_time() -> TestResult {
        let catalog = Catalog::builtin()?;
        let mut cart = Cart::new(catalog.currency());
        let line = latte_line(&mut cart, &catalog)?;

        cart.set_quantity(line.id(), 3);

        assert_eq!(
            cart.line(line.id()).map(CartLine::unit_price),
            Some(line.unit_price())
        );

        Ok(())
    }

    #[derive(Debug, Clone)]
    enum CartOp {
        Add { drink: usize, size: usize, options: Vec<usize> },
        SetQuantity { line: usize, quantity: i64 },
        Remove { line: usize },
        Clear,
    }

    fn cart_op() -> impl Strategy<Value = CartOp> {
        prop_oneof![
            4 => (0..9_usize, 0..3_usize, prop::collection::vec(0..8_usize, 0..4))
                .prop_map(|(drink, size, options)| CartOp::Add { drink, size, options }),
            4 => (0..12_usize, -3..20_i64)
                .prop_map(|(line, quantity)| CartOp::SetQuantity { line, quantity }),
            2 => (0..12_usize).prop_map(|line| CartOp::Remove { line }),
            1 => Just(CartOp::Clear),
        ]
    }

    proptest! {
        #[test]
        fn total_matches_sum_of_present_lines(ops in prop::collection::vec(cart_op(), 0..40)) {
            let catalog = Catalog::builtin()?;
            let drinks: Vec<&Drink> = catalog.drinks().collect();
            let sizes: Vec<&Size> = catalog.sizes().collect();
            let options: Vec<&DrinkOption> = catalog.options().collect();

            let mut cart = Cart::new(catalog.currency());
            let mut seen: Vec<LineId> = Vec::new();

            for op in ops {
                match op {
                    CartOp::Add { drink, size, options: picks } => {
                        let (Some(drink), Some(size)) = (drinks.get(drink), sizes.get(size)) else {
                            continue;
                        };
                        let chosen: Vec<&DrinkOption> = picks
                            .iter()
                            .filter_map(|pick| options.get(*pick).copied())
                            .collect();

                        seen.push(cart.add_item(drink, size, &chosen).id());
                    }
                    CartOp::SetQuantity { line, quantity } => {
                        if let Some(id) = seen.get(line) {
                            cart.set_quantity(*id, quantity);
                        }
                    }
                    CartOp::Remove { line } => {
                        if let Some(id) = seen.get(line) {
                            cart.remove_item(*id);
                        }
                    }
                    CartOp::Clear => cart.clear(),
                }

                let expected: i64 = cart
                    .lines()
                    .iter()
                    .map(|line| line.unit_price().to_minor_units() * i64::from(line.quantity()))
                    .sum();

                prop_assert_eq!(cart.total().to_minor_units(), expected);
                prop_assert!(cart.lines().iter().all(|line| line.quantity() >= 1));
            }
        }
    }
}
