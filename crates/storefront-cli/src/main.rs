mod report;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use storefront_card::{
    CardContext, CardElement, CardTimings, Lifecycle, ProductCard, QuantityChange,
};
use storefront_cart::CartClient;

#[derive(Debug, Parser)]
#[command(name = "storefront")]
#[command(about = "Drive a product card against a live store's cart")]
struct Cli {
    /// Variant id, as rendered in `data-variant-id`
    #[arg(long, env = "STOREFRONT_VARIANT_ID")]
    variant_id: String,

    /// Inventory cap, as rendered in `data-inventory`
    #[arg(long, default_value = "0")]
    inventory: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Mount the card and print its state
    Show,
    /// Press the plus button
    Plus {
        #[arg(long, default_value_t = 1)]
        times: u32,
    },
    /// Press the minus button
    Minus {
        #[arg(long, default_value_t = 1)]
        times: u32,
    },
    /// Press the wishlist button
    Wishlist,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = storefront_core::load_app_config_from_env()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::debug!(env = %config.env, store_url = %config.store_url, "starting");

    let client = CartClient::from_app_config(&config)?;
    let context = CardContext {
        timings: CardTimings::from_app_config(&config),
        ..CardContext::default()
    };
    let card = ProductCard::new(
        client,
        CardElement::rendered(&cli.variant_id, &cli.inventory),
        &context,
    );

    card.mount().await;

    match cli.command {
        Commands::Show => {}
        Commands::Plus { times } => press(&card, QuantityChange::Increment, times).await,
        Commands::Minus { times } => press(&card, QuantityChange::Decrement, times).await,
        Commands::Wishlist => card.toggle_wishlist(),
    }

    report::print_card(&card, &context);
    card.dispose();
    Ok(())
}

async fn press(card: &ProductCard<CartClient, CardElement>, change: QuantityChange, times: u32) {
    for n in 1..=times {
        let outcome = card.apply_delta(change).await;
        println!("{}", report::describe_outcome(n, change, outcome));
    }
}

#[cfg(test)]
mod tests;
