use anyhow::Context;
use clap::Parser;
use storefront_cart::core::ConfigProvider;
use storefront_cart::utils::logger::{self, LogFormat};
use storefront_cart::utils::validation::Validate;
use storefront_cart::{
    Cart, CartCommand, CartManager, CliArgs, HttpApiClient, LocalStorage, ProductId,
    TracingNotifier,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    // 初始化日誌
    let log_format = if args.log_json {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };
    logger::init_logger(log_format, args.verbose);

    tracing::info!("Starting storefront-cart CLI");
    if args.verbose {
        tracing::debug!("CLI args: {:?}", args);
    }

    // 載入並驗證配置
    let config = args.resolve_config().context("failed to load configuration")?;
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let storage = LocalStorage::new(config.storage_path().to_string());
    let api = HttpApiClient::from_config(&config).context("failed to build store API client")?;
    let mut manager =
        CartManager::with_key(storage, config.storage_key(), api, TracingNotifier);

    if let Some(product_id) = args.command.product_id() {
        tracing::debug!("Target product: {}", product_id);
    }

    match args.command {
        CartCommand::Show => {}
        CartCommand::Add { product_id } => manager.add(ProductId(product_id)).await,
        CartCommand::Remove { product_id } => manager.remove(ProductId(product_id)),
        CartCommand::Update { product_id, amount } => {
            manager.update_amount(ProductId(product_id), amount).await
        }
    }

    print_cart(manager.cart());
    Ok(())
}

fn print_cart(cart: &Cart) {
    if cart.is_empty() {
        println!("🛒 Cart is empty");
        return;
    }

    println!("🛒 {} products, {} items", cart.len(), cart.total_items());
    for product in cart {
        println!(
            "  #{:<6} x{:<4} {}",
            product.id().0,
            product.amount,
            product.title().unwrap_or("-")
        );
    }
}
