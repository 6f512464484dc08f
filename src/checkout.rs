//! Checkout
//!
//! Collects the customer's details, validates them in a fixed order and turns a
//! cart snapshot into an order creation request. Sending the request is left to
//! the caller; [`Checkout`] only tracks whether a submission is in flight.

use rusty_money::Money;
use thiserror::Error;

use crate::{
    cart::Cart,
    orders::{CreateOrderRequest, Location, OrderItem},
    prices::{Price, to_wire_amount},
};

/// Checkout failures. Validation variants carry the message shown to the customer.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum CheckoutError {
    /// Name is blank
    #[error("please enter your name")]
    MissingName,

    /// Phone number is blank
    #[error("please enter a phone number")]
    MissingPhone,

    /// No delivery address text
    #[error("please choose a delivery address")]
    MissingAddress,

    /// No usable coordinates for the address
    #[error("please choose a valid delivery location")]
    MissingLocation,

    /// Checkout needs at least one cart line
    #[error("your cart is empty")]
    EmptyCart,

    /// Submission was attempted without an open checkout
    #[error("checkout is not open")]
    NotOpen,

    /// A submission is already in progress
    #[error("your order is already being submitted")]
    InFlight,

    /// The order service rejected the order or could not be reached
    #[error("could not submit order, please try again")]
    SubmissionFailed,
}

/// Delivery address picked by the customer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeliveryAddress {
    /// Address as displayed to the customer
    pub display_text: String,

    /// Coordinates resolved for the address
    pub location: Option<Location>,
}

impl DeliveryAddress {
    /// Address with resolved coordinates
    pub fn new(display_text: impl Into<String>, location: Location) -> Self {
        Self {
            display_text: display_text.into(),
            location: Some(location),
        }
    }
}

/// Fields entered on the checkout form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckoutForm {
    /// Customer name
    pub name: String,

    /// Contact phone number
    pub phone: String,

    /// Optional notes for the shop
    pub notes: String,

    /// Delivery address
    pub address: DeliveryAddress,
}

impl CheckoutForm {
    /// Check the fields in order, reporting the first failure.
    ///
    /// # Errors
    ///
    /// Returns the [`CheckoutError`] validation variant for the first failing field.
    pub fn validate(&self) -> Result<Location, CheckoutError> {
        if self.name.trim().is_empty() {
            return Err(CheckoutError::MissingName);
        }

        if self.phone.trim().is_empty() {
            return Err(CheckoutError::MissingPhone);
        }

        if self.address.display_text.trim().is_empty() {
            return Err(CheckoutError::MissingAddress);
        }

        match self.address.location {
            Some(location) if location.lat.is_finite() && location.lng.is_finite() => Ok(location),
            _ => Err(CheckoutError::MissingLocation),
        }
    }

    fn notes(&self) -> Option<String> {
        let notes = self.notes.trim();

        (!notes.is_empty()).then(|| notes.to_string())
    }
}

/// Open checkout view.
#[derive(Debug, Clone, Default)]
pub struct Checkout {
    /// Form fields
    pub form: CheckoutForm,

    in_flight: bool,
}

impl Checkout {
    /// Open checkout for a cart.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] if the cart has no lines.
    pub fn open(cart: &Cart) -> Result<Self, CheckoutError> {
        Self::with_form(cart, CheckoutForm::default())
    }

    /// Open checkout with previously entered fields.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] if the cart has no lines.
    pub fn with_form(cart: &Cart, form: CheckoutForm) -> Result<Self, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        Ok(Self {
            form,
            in_flight: false,
        })
    }

    /// Whether a submission is in progress
    pub fn is_submitting(&self) -> bool {
        self.in_flight
    }

    /// Validate the form and build the creation request, marking a submission as
    /// in flight. Nothing is marked when an error is returned.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::InFlight`] while a previous submission is pending,
    /// [`CheckoutError::EmptyCart`] for an empty cart, or the first validation
    /// failure.
    pub fn begin_submission(&mut self, cart: &Cart) -> Result<CreateOrderRequest, CheckoutError> {
        if self.in_flight {
            return Err(CheckoutError::InFlight);
        }

        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let location = self.form.validate()?;
        let request = order_request(cart, &self.form, location);

        self.in_flight = true;

        Ok(request)
    }

    /// Mark the pending submission as finished, whatever its outcome.
    pub fn finish_submission(&mut self) {
        self.in_flight = false;
    }
}

/// Build the creation request from the cart lines. The total is summed from the
/// lines rather than taken from the cart's display total.
fn order_request(cart: &Cart, form: &CheckoutForm, location: Location) -> CreateOrderRequest {
    let items = cart
        .lines()
        .iter()
        .map(|line| OrderItem {
            name: line.label(),
            quantity: line.quantity(),
            price: to_wire_amount(&line.unit_price()),
        })
        .collect();

    let total_minor: i64 = cart
        .lines()
        .iter()
        .map(|line| line.line_total().to_minor_units())
        .sum();

    let total: Price = Money::from_minor(total_minor, cart.currency());

    CreateOrderRequest {
        items,
        total_amount: to_wire_amount(&total),
        customer_name: form.name.trim().to_string(),
        phone_number: form.phone.trim().to_string(),
        delivery_address: form.address.display_text.trim().to_string(),
        location,
        notes: form.notes(),
    }
}
