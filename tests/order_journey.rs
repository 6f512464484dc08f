//! A customer's order from menu to doorstep, driven through the public API:
//! pick drinks from the built-in catalog, check out, and follow the order
//! through every status until it is delivered.
//!
//! Cart: 2 x Latte (Medium) with Oat Milk at 45.00 and 1 x Espresso (Small)
//! with Vanilla Syrup at 32.00, for a total of 122.00.

use serde_json::json;
use testresult::TestResult;

use brewline::prelude::*;

fn select(catalog: &Catalog, drink: &str, size: &str, options: &[&str]) -> TestResult<Selection> {
    let mut selection = Selection::new(catalog.drink_by_name(drink)?.key())
        .with_size(catalog.size_by_name(size)?.key());

    for option in options {
        selection = selection.with_option(catalog.option_by_name(option)?.key());
    }

    Ok(selection)
}

fn placed_order(request: &CreateOrderRequest, status: OrderStatus) -> TestResult<Order> {
    let order = serde_json::from_value(json!({
        "id": 1,
        "order_number": "n-1",
        "customer_name": request.customer_name,
        "phone_number": request.phone_number,
        "delivery_address": request.delivery_address,
        "latitude": request.location.lat,
        "longitude": request.location.lng,
        "created_at": "2026-01-01T09:00:00Z",
        "total_amount": request.total_amount,
        "status": status,
        "items": request.items,
    }))?;

    Ok(order)
}

#[test]
fn order_journey_from_menu_to_delivery() -> TestResult {
    let catalog = Catalog::builtin()?;
    let mut cart = Cart::new(catalog.currency());

    let latte = catalog.resolve(&select(&catalog, "Latte", "Medium", &["Oat Milk"])?)?;
    let espresso = catalog.resolve(&select(&catalog, "Espresso", "Small", &["Vanilla Syrup"])?)?;

    let latte_line = cart.add_selection(&latte);
    cart.add_selection(&espresso);
    cart.set_quantity(latte_line.id(), 2);

    assert_eq!(cart.total_display(), "122.00");
    assert_eq!(cart.item_count(), 3);

    let mut checkout = Checkout::open(&cart)?;

    assert_eq!(
        checkout.begin_submission(&cart).err(),
        Some(CheckoutError::MissingName)
    );

    checkout.form.name = "Ada".to_string();
    checkout.form.phone = "555-0100".to_string();
    checkout.form.address = DeliveryAddress::new("1 Main St", Location { lat: 31.23, lng: 121.47 });

    let request = checkout.begin_submission(&cart)?;

    assert_eq!(
        checkout.begin_submission(&cart).err(),
        Some(CheckoutError::InFlight),
        "a second submission is refused while the first is pending"
    );

    checkout.finish_submission();

    let names: Vec<&str> = request.items.iter().map(|item| item.name.as_str()).collect();

    assert_eq!(
        names,
        ["Latte (Medium) - Oat Milk", "Espresso (Small) - Vanilla Syrup"]
    );
    assert!((request.total_amount - 122.0).abs() < f64::EPSILON, "total sent as 122");

    cart.clear();

    let mut tracker = OrderTracker::new(Some("n-1"));

    assert_eq!(tracker.start(), NextStep::FetchNow(OrderNumber::new("n-1")));

    let mut messages = Vec::new();

    for status in [
        OrderStatus::Pending,
        OrderStatus::Preparing,
        OrderStatus::Delivering,
        OrderStatus::Completed,
    ] {
        let next = tracker.apply(Ok(placed_order(&request, status)?));

        messages.extend(tracker.state().status_message());

        if status.is_terminal() {
            assert_eq!(next, NextStep::Stop);
        } else {
            assert_eq!(
                next,
                NextStep::FetchAfter(OrderNumber::new("n-1"), POLL_INTERVAL)
            );
        }
    }

    assert_eq!(
        messages,
        ["queued", "being made", "out for delivery", "delivered"]
    );
    assert!(tracker.state().is_final(), "a delivered order is final");

    Ok(())
}

#[test]
fn status_route_round_trips_the_order_number() {
    let route = Route::parse("/order/n-1/");

    assert_eq!(route, Route::OrderStatus(OrderNumber::new("n-1")));
    assert_eq!(route.path().as_deref(), Some("/order/n-1"));
    assert_eq!(Route::parse("/nowhere"), Route::NotFound);
}
