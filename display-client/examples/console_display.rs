// display-client/examples/console_display.rs
// Terminal customer display: prints every snapshot the sync loop delivers.
//
// Usage: cargo run -p display-client --example console_display -- [base_url]

use display_client::logger::init_logger;
use display_client::{Cart, DisplayConfig, DisplayEvent, DisplaySync, PaymentStatus};

fn render_cart(cart: Option<&Cart>) {
    let Some(cart) = cart else {
        println!("[cart] unavailable (offline)");
        return;
    };

    if cart.is_empty() {
        println!("[cart] Cart is empty");
        return;
    }

    println!("[cart] Current Order ({} items)", cart.item_count());
    for item in &cart.items {
        match (item.weight, item.unit.as_deref()) {
            (Some(weight), Some(unit)) => {
                println!("  {:<24} {weight}{unit} {:>10.2}", item.name, item.total)
            }
            _ => println!("  {:<24} x{:<4} {:>10.2}", item.name, item.quantity, item.total),
        }
    }
    println!("  tax {:.2}  total ${:.2}", cart.tax.amount, cart.total);
    if let Some(name) = cart.customer_name() {
        println!("  Customer: {name}");
    }
}

fn render_payment(status: Option<&PaymentStatus>) {
    match status {
        Some(status) => println!("[payment] {} ({:.2})", status.status.display_label(), status.amount),
        None => println!("[payment] unavailable (offline)"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logger("info", false, None)?;

    let config = match std::env::args().nth(1) {
        Some(base_url) => DisplayConfig::new(base_url),
        None => DisplayConfig::default(),
    };
    tracing::info!(base_url = %config.base_url, "Starting console display");

    let client = config.build_client()?;
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<DisplayEvent>();
    let handle = DisplaySync::new(client, tx, config.poll_interval()).start();

    // Only re-render when a snapshot actually changed
    let mut last_cart: Option<Option<Cart>> = None;
    let mut last_payment: Option<Option<PaymentStatus>> = None;

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            event = rx.recv() => match event {
                Some(DisplayEvent::Cart(cart)) => {
                    if last_cart.as_ref() != Some(&cart) {
                        render_cart(cart.as_ref());
                        last_cart = Some(cart);
                    }
                }
                Some(DisplayEvent::PaymentStatus(status)) => {
                    if last_payment.as_ref() != Some(&status) {
                        render_payment(status.as_ref());
                        last_payment = Some(status);
                    }
                }
                Some(DisplayEvent::FetchFailed { endpoint, error }) => {
                    tracing::debug!(%endpoint, %error, "Fetch failed");
                }
                None => break,
            },
        }
    }

    handle.stop().await;
    Ok(())
}
