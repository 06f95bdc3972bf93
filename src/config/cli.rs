use crate::config::CartConfig;
use crate::core::ProductId;
use crate::utils::error::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "storefront-cart")]
#[command(about = "Manage a persisted storefront shopping cart")]
pub struct CliArgs {
    #[arg(long, help = "TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Base URL of the store API (overrides config)")]
    pub api_url: Option<String>,

    #[arg(long, help = "Directory the cart is persisted in (overrides config)")]
    pub storage_path: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: CartCommand,
}

#[derive(Debug, Clone, Subcommand)]
pub enum CartCommand {
    /// Print the cart
    Show,
    /// Add one unit of a product
    Add { product_id: u64 },
    /// Remove a product from the cart
    Remove { product_id: u64 },
    /// Set the amount of a product already in the cart
    Update {
        product_id: u64,
        #[arg(allow_negative_numbers = true)]
        amount: i64,
    },
}

impl CartCommand {
    pub fn product_id(&self) -> Option<ProductId> {
        match self {
            CartCommand::Show => None,
            CartCommand::Add { product_id }
            | CartCommand::Remove { product_id }
            | CartCommand::Update { product_id, .. } => Some(ProductId(*product_id)),
        }
    }
}

impl CliArgs {
    /// Loads the config file (or defaults) and applies command-line overrides.
    pub fn resolve_config(&self) -> Result<CartConfig> {
        let mut config = match &self.config {
            Some(path) => CartConfig::from_file(path)?,
            None => CartConfig::default(),
        };

        if let Some(api_url) = &self.api_url {
            config.api.base_url = api_url.clone();
        }
        if let Some(storage_path) = &self.storage_path {
            config.storage.path = storage_path.clone();
        }

        Ok(config)
    }
}
