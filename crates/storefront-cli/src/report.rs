//! Plain-text rendering of card state for the terminal.

use storefront_card::{CardContext, CardElement, ProductCard, QuantityChange, UpdateOutcome};
use storefront_cart::CartApi;

pub(crate) fn describe_outcome(press: u32, change: QuantityChange, outcome: UpdateOutcome) -> String {
    let button = match change {
        QuantityChange::Increment => "plus",
        QuantityChange::Decrement => "minus",
    };
    let result = match outcome {
        UpdateOutcome::Committed { quantity } => format!("committed, quantity now {quantity}"),
        UpdateOutcome::Skipped(reason) => format!("skipped ({reason:?})"),
        UpdateOutcome::Failed => "failed".to_owned(),
    };
    format!("#{press} {button}: {result}")
}

pub(crate) fn print_card<A: CartApi>(card: &ProductCard<A, CardElement>, context: &CardContext) {
    let dom = card.view().snapshot();
    let config = card.config();

    println!(
        "variant:    {}",
        config.variant_id.as_deref().unwrap_or("(none)")
    );
    println!("inventory:  {}", config.max_inventory);
    println!(
        "quantity:   {}",
        dom.quantity_input
            .as_ref()
            .map_or("(no input)", |input| input.value.as_str())
    );
    println!(
        "item key:   {}",
        dom.quantity_input
            .as_ref()
            .and_then(|input| input.item_key.as_deref())
            .unwrap_or("(not in cart)")
    );

    let counter = context.counter.current();
    if counter.item_count.is_some() {
        println!("cart count: {}", counter.text());
    }

    for notification in context.notifications.snapshot() {
        println!("[{}] {}", notification.kind.as_str(), notification.message);
    }
}
