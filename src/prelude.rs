//! Brewline prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartLine, LineId},
    catalog::{
        Catalog, CatalogError, Category, CategoryKey, Drink, DrinkKey, DrinkOption, OptionKey,
        ResolvedSelection, Selection, Size, SizeKey,
    },
    checkout::{Checkout, CheckoutError, CheckoutForm, DeliveryAddress},
    orders::{
        CreateOrderRequest, CreateOrderResponse, Location, Order, OrderId, OrderItem, OrderList,
        OrderNumber, OrderStatus, StatusFilter, UpdateStatusRequest, UpdateStatusResponse,
        describe_status,
    },
    prices::{Price, PriceError, format_amount},
    routes::Route,
    tracking::{
        FetchFailure, NextStep, OrderTracker, POLL_INTERVAL, TrackingError, TrackingState,
    },
};
