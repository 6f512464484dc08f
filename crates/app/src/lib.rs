//! Brewline application layer: order persistence, the order service client and
//! the client-side session components built on the core library.

pub mod admin;
pub mod client;
pub mod config;
pub mod context;
pub mod database;
pub mod domain;
pub mod storefront;
pub mod tracking;

#[cfg(test)]
mod test;
