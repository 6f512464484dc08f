//! Storefront session
//!
//! One customer's view of the shop: the selected category, the cart, the
//! checkout form, the current route and the last notice to show. The session
//! is owned by its caller and handed the order service client per operation.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use brewline::{
    cart::{Cart, CartLine, LineId},
    catalog::{Catalog, CatalogError, CategoryKey, Drink, Selection},
    checkout::{Checkout, CheckoutError, CheckoutForm},
    orders::OrderNumber,
    routes::Route,
};

use crate::client::{ApiError, OrdersApi};

/// Order lookup failures
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum LookupError {
    /// Nothing was typed
    #[error("please enter an order number")]
    Blank,

    /// No such order
    #[error("order not found")]
    NotFound,

    /// The order service could not answer
    #[error("could not look up order")]
    Failed,
}

/// A transient message for the customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Something worked
    Info(String),

    /// Something failed and can be retried or corrected
    Error(String),
}

/// Storefront session state.
#[derive(Debug)]
pub struct Storefront {
    catalog: Arc<Catalog>,
    category: Option<CategoryKey>,
    cart: Cart,
    checkout: Option<Checkout>,
    saved_form: CheckoutForm,
    route: Route,
    notice: Option<Notice>,
}

impl Storefront {
    /// Start a session on the home route with the first category selected.
    pub fn new(catalog: Arc<Catalog>) -> Self {
        let category = catalog.categories().next().map(|category| category.key());
        let cart = Cart::new(catalog.currency());

        Self {
            catalog,
            category,
            cart,
            checkout: None,
            saved_form: CheckoutForm::default(),
            route: Route::Home,
            notice: None,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn selected_category(&self) -> Option<CategoryKey> {
        self.category
    }

    /// Select a category. Keys from another catalog are ignored.
    pub fn select_category(&mut self, category: CategoryKey) {
        if self.catalog.category(category).is_some() {
            self.category = Some(category);
        }
    }

    /// Drinks in the selected category.
    pub fn visible_drinks(&self) -> Vec<&Drink> {
        match self.category {
            Some(category) => self.catalog.drinks_in(category).collect(),
            None => Vec::new(),
        }
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Add a customised drink as a new cart line.
    ///
    /// # Errors
    ///
    /// Returns an error if the selection refers to entries outside the catalog.
    pub fn add_to_cart(&mut self, selection: &Selection) -> Result<CartLine, CatalogError> {
        let resolved = self.catalog.resolve(selection)?;
        let line = self.cart.add_selection(&resolved);

        self.notice = Some(Notice::Info(format!("added {} to cart", line.label())));

        Ok(line)
    }

    /// Change a line's quantity; zero or less removes it.
    pub fn set_quantity(&mut self, line: LineId, quantity: i64) {
        self.cart.set_quantity(line, quantity);
    }

    pub fn remove_from_cart(&mut self, line: LineId) {
        self.cart.remove_item(line);
    }

    pub fn clear_cart(&mut self) {
        self.cart.clear();
    }

    /// Open checkout, restoring any fields entered earlier.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] when there is nothing to check out.
    pub fn open_checkout(&mut self) -> Result<(), CheckoutError> {
        if self.checkout.is_some() {
            return Ok(());
        }

        match Checkout::with_form(&self.cart, self.saved_form.clone()) {
            Ok(checkout) => {
                self.checkout = Some(checkout);
                Ok(())
            }
            Err(error) => {
                self.notice = Some(Notice::Error(error.to_string()));
                Err(error)
            }
        }
    }

    /// Close checkout, keeping the entered fields for next time.
    pub fn close_checkout(&mut self) {
        if let Some(checkout) = self.checkout.take() {
            self.saved_form = checkout.form;
        }
    }

    pub fn is_checkout_open(&self) -> bool {
        self.checkout.is_some()
    }

    /// Form of the open checkout
    pub fn checkout_form_mut(&mut self) -> Option<&mut CheckoutForm> {
        self.checkout.as_mut().map(|checkout| &mut checkout.form)
    }

    /// Validate and submit the open checkout. On success the cart is emptied,
    /// checkout closes and the session moves to the order's status route. On
    /// failure the cart and form are left as they were.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::NotOpen`] without an open checkout, a validation
    /// error (nothing is sent), or [`CheckoutError::SubmissionFailed`].
    pub async fn submit_checkout(
        &mut self,
        api: &dyn OrdersApi,
    ) -> Result<OrderNumber, CheckoutError> {
        let Some(checkout) = self.checkout.as_mut() else {
            return Err(CheckoutError::NotOpen);
        };

        let request = match checkout.begin_submission(&self.cart) {
            Ok(request) => request,
            Err(error) => {
                self.notice = Some(Notice::Error(error.to_string()));
                return Err(error);
            }
        };

        let result = {
            let _submission = Submission(checkout);

            api.create_order(request).await
        };

        match result {
            Ok(order_number) => {
                info!(%order_number, "order submitted");

                self.cart.clear();
                self.checkout = None;
                self.saved_form = CheckoutForm::default();
                self.route = Route::OrderStatus(order_number.clone());
                self.notice = Some(Notice::Info(format!("order {order_number} placed")));

                Ok(order_number)
            }
            Err(error) => {
                warn!("failed to submit order: {error}");

                let error = CheckoutError::SubmissionFailed;
                self.notice = Some(Notice::Error(error.to_string()));

                Err(error)
            }
        }
    }

    /// Look up an order typed by the customer and navigate to its status view.
    /// The cart is never touched.
    ///
    /// # Errors
    ///
    /// Returns the [`LookupError`] describing why the order could not be shown.
    pub async fn lookup_order(
        &mut self,
        api: &dyn OrdersApi,
        input: &str,
    ) -> Result<OrderNumber, LookupError> {
        let result = match OrderNumber::parse(input) {
            None => Err(LookupError::Blank),
            Some(order_number) => match api.get_order(order_number).await {
                Ok(order) => Ok(order.order_number),
                Err(ApiError::NotFound) => Err(LookupError::NotFound),
                Err(error) => {
                    warn!("failed to look up order: {error}");
                    Err(LookupError::Failed)
                }
            },
        };

        match &result {
            Ok(order_number) => {
                self.route = Route::OrderStatus(order_number.clone());
                self.notice = None;
            }
            Err(error) => self.notice = Some(Notice::Error(error.to_string())),
        }

        result
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Take the notice so it is shown once.
    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }
}

/// Ends the checkout's pending submission when dropped, including when the
/// submit future is dropped before the service answers.
struct Submission<'a>(&'a mut Checkout);

impl Drop for Submission<'_> {
    fn drop(&mut self) {
        self.0.finish_submission();
    }
}
