use std::{
    io::{self, Write},
    num::NonZeroU32,
};

use clap::{Args, Parser, Subcommand};
use thiserror::Error;
use trolley::{
    cart::Cart,
    config::{CartConfig, ConfigError, LoggingConfig},
    items::LineKey,
    products::Product,
    receipt::{Receipt, ReceiptError},
    storage::FileStore,
    summary::{Coupon, CouponError},
};

pub(crate) mod logging;

#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Coupon(#[from] CouponError),

    #[error(transparent)]
    Receipt(#[from] ReceiptError),

    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Parser)]
#[command(name = "trolley", about = "Shopping cart CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    cart: CartConfig,

    #[command(flatten)]
    pub(crate) logging: LoggingConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the cart and its summary
    Show(ShowArgs),

    /// Add a product to the cart
    Add(AddArgs),

    /// Set the quantity of a line item
    Update(UpdateArgs),

    /// Remove a line item
    Remove(KeyArgs),

    /// Remove every line item
    Clear,
}

#[derive(Debug, Args)]
struct ShowArgs {
    /// Coupon code to apply to the summary
    #[arg(long)]
    coupon: Option<String>,
}

#[derive(Debug, Args)]
struct KeyArgs {
    /// Product identifier
    #[arg(long)]
    id: String,

    /// Chosen size
    #[arg(long)]
    size: String,

    /// Chosen color
    #[arg(long)]
    color: String,
}

impl KeyArgs {
    fn key(&self) -> LineKey {
        LineKey::new(self.id.as_str(), self.size.as_str(), self.color.as_str())
    }
}

#[derive(Debug, Args)]
struct AddArgs {
    #[command(flatten)]
    key: KeyArgs,

    /// Product name
    #[arg(long)]
    name: String,

    /// Unit price in minor units
    #[arg(long)]
    price: u64,

    /// Pre-discount unit price in minor units
    #[arg(long)]
    original_price: Option<u64>,

    /// Product image reference
    #[arg(long, default_value = "")]
    image: String,

    /// Number of units to add
    #[arg(long, default_value_t = NonZeroU32::MIN)]
    quantity: NonZeroU32,
}

#[derive(Debug, Args)]
struct UpdateArgs {
    #[command(flatten)]
    key: KeyArgs,

    /// New quantity; values below one are ignored
    #[arg(long)]
    quantity: u32,
}

impl Cli {
    /// Load configuration from `.env`, the environment and CLI arguments.
    pub(crate) fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    pub(crate) fn run(self) -> Result<(), CliError> {
        self.run_to(&mut io::stdout().lock())
    }

    /// Applies the command to the stored cart and writes the notification
    /// and receipt to `out`.
    fn run_to(self, out: &mut impl Write) -> Result<(), CliError> {
        let settings = self.cart.settings()?;
        let mut cart = Cart::load(FileStore::new(&self.cart.data_dir), &settings);

        let coupon = match &self.command {
            Commands::Show(ShowArgs { coupon }) => {
                coupon.as_deref().map(str::parse::<Coupon>).transpose()?
            }
            Commands::Add(args) => {
                let mut product = Product::new(
                    args.key.id.as_str(),
                    args.name.as_str(),
                    args.price,
                    args.image.as_str(),
                );
                product.original_unit_price = args.original_price;

                cart.add_items(&product, args.quantity, &args.key.size, &args.key.color);
                None
            }
            Commands::Update(args) => {
                cart.update_quantity(&args.key.key(), args.quantity);
                None
            }
            Commands::Remove(args) => {
                cart.remove_item(&args.key());
                None
            }
            Commands::Clear => {
                cart.clear();
                None
            }
        };

        let notification = cart.notification();
        if notification.visible {
            writeln!(out, "[{}] {}", notification.kind, notification.message)?;
        }

        Receipt::from_cart(&cart, coupon).write_to(out)?;

        Ok(())
    }
}
