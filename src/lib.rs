//! Brewline
//!
//! Brewline is the domain core of a drink-ordering storefront: a static drink
//! catalog, an in-memory cart with exact price arithmetic, checkout
//! validation, and the order status state machine shared by the customer and
//! operator front ends.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod orders;
pub mod prelude;
pub mod prices;
pub mod routes;
pub mod tracking;
