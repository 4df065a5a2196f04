//! Bistro CLI - menu, recipes, order quotes and simulated checkout.
//!
//! # Usage
//!
//! ```bash
//! # Print the menu, or one category of it as JSON
//! bistro menu
//! bistro menu --category Mains --json
//!
//! # Print a kitchen recipe
//! bistro recipe caesar-salad
//!
//! # Price an order file without placing it
//! bistro quote order.yaml
//!
//! # Place an order file through the simulated payment (Ctrl+C cancels)
//! bistro checkout order.yaml --name "Ada" --email ada@example.com \
//!     --phone 555-0100 --address "1 Engine Way" \
//!     --card-number 4111111111111111 --expiry 12/30 --cvv 123
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;
use std::time::Duration;

use bistro_core::{Catalog, CheckoutForm, RecipeBook};
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "bistro")]
#[command(author, version, about = "Bistro ordering CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the menu
    Menu {
        /// Only show this category (e.g. `Mains`)
        #[arg(short, long)]
        category: Option<String>,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print a kitchen recipe
    Recipe {
        /// Recipe id (e.g. `caesar-salad`)
        id: String,
    },
    /// Price an order file
    Quote {
        /// YAML order file
        path: PathBuf,
    },
    /// Check out an order file through the simulated payment
    Checkout {
        /// YAML order file
        path: PathBuf,

        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        phone: String,

        #[arg(long)]
        address: String,

        #[arg(long)]
        card_number: String,

        /// Card expiry (`MM/YY`)
        #[arg(long)]
        expiry: String,

        #[arg(long)]
        cvv: String,

        /// Simulated payment delay in milliseconds
        #[arg(long, default_value_t = 2000)]
        delay_ms: u64,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bistro_cli=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(output) => {
            #[allow(clippy::print_stdout)]
            {
                print!("{output}");
            }
        }
        Err(e) => {
            tracing::error!("Command failed: {e}");
            std::process::exit(1);
        }
    }
}

async fn run(cli: Cli) -> Result<String, Box<dyn std::error::Error>> {
    let catalog = Catalog::house_menu();

    let output = match cli.command {
        Commands::Menu { category, json } => {
            commands::menu::render(&catalog, category.as_deref(), json)?
        }
        Commands::Recipe { id } => commands::recipe::render(&RecipeBook::house(), &id)?,
        Commands::Quote { path } => commands::order::quote(&catalog, &path).await?,
        Commands::Checkout {
            path,
            name,
            email,
            phone,
            address,
            card_number,
            expiry,
            cvv,
            delay_ms,
        } => {
            let form = CheckoutForm {
                name,
                email,
                phone,
                address,
                card_number,
                expiry_date: expiry,
                cvv,
            };
            commands::checkout::run(&catalog, &path, &form, Duration::from_millis(delay_ms))
                .await?
        }
    };
    Ok(output)
}
