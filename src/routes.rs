//! Client routes

use std::fmt;

use crate::orders::OrderNumber;

/// A view the storefront can show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/`: catalog and cart
    Home,

    /// `/order/{order_number}`: order status
    OrderStatus(OrderNumber),

    /// `/admin`: order manager
    Admin,

    /// Anything else
    NotFound,
}

impl Route {
    /// Match a path against the route table.
    pub fn parse(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');

        if trimmed.is_empty() {
            return Route::Home;
        }

        if trimmed == "/admin" {
            return Route::Admin;
        }

        match trimmed.strip_prefix("/order/") {
            Some(number) if !number.contains('/') => OrderNumber::parse(number)
                .map_or(Route::NotFound, Route::OrderStatus),
            _ => Route::NotFound,
        }
    }

    /// Path for this route. [`Route::NotFound`] has no canonical path.
    pub fn path(&self) -> Option<String> {
        match self {
            Route::Home => Some("/".to_string()),
            Route::OrderStatus(number) => Some(format!("/order/{number}")),
            Route::Admin => Some("/admin".to_string()),
            Route::NotFound => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.path() {
            Some(path) => f.write_str(&path),
            None => f.write_str("*"),
        }
    }
}
