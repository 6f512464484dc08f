use brewline::orders::Order;

pub(crate) fn print_order(order: &Order) {
    println!("order_number: {}", order.order_number);
    println!("customer: {} ({})", order.customer_name, order.phone_number);
    println!("deliver_to: {}", order.delivery_address);

    if let Some(notes) = &order.notes {
        println!("notes: {notes}");
    }

    println!("placed_at: {}", order.created_at);

    for item in &order.items {
        println!("  {} x{} @ {:.2}", item.name, item.quantity, item.price);
    }

    println!("total: {:.2}", order.total_amount);
    println!("status: {}", order.status.customer_message());
}
