//! Basic usage example.
//!
//! This example authenticates with client credentials, lists the seller
//! catalog and prints the orders waiting to be acknowledged.
//!
//! Requires WALMART_CLIENT_ID and WALMART_CLIENT_SECRET, and optionally
//! WALMART_BASE_URL (defaults to production).
//!
//! Run with: cargo run --example basic_usage

use walmart_rs::WalmartClient;

#[tokio::main]
async fn main() -> walmart_rs::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let client = WalmartClient::from_env()?;
    println!("Connecting to {}...", client.base_url());

    // Walk every page of the catalog
    let items = client.items().all().await?;
    println!("\nFound {} item(s):", items.len());
    for item in items.iter().take(10) {
        println!(
            "  - {} {} ({} {})",
            item.sku, item.product_name, item.price.amount, item.price.currency
        );
    }

    // Orders released to the seller
    let orders = client.orders().released().await?;
    println!("\nFound {} released order(s):", orders.len());
    for order in &orders {
        println!(
            "  - {} placed {:?}, {} line(s), total {}",
            order.purchase_order_id,
            order.ordered_at(),
            order.order_lines.order_line.len(),
            order.total()
        );
    }

    println!("\nDone!");
    Ok(())
}
