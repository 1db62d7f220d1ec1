//! Wallet CLI
//!
//! Command-line interface for the Wallet API.

use anyhow::Result;
use clap::{Parser, Subcommand};

use wallet_client::WalletClient;
use wallet_types::{BalanceResponse, OperationType, WalletId};

#[derive(Parser)]
#[command(name = "wallet")]
#[command(author, version, about = "Wallet API CLI client", long_about = None)]
struct Cli {
    /// Base URL of the Wallet API
    #[arg(long, env = "WALLET_API_URL", default_value = "http://localhost:8080")]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Deposit funds into a wallet
    Deposit {
        /// Wallet ID (UUID)
        #[arg(long)]
        wallet: String,
        /// Amount in smallest currency unit
        #[arg(long)]
        amount: i64,
    },
    /// Withdraw funds from a wallet
    Withdraw {
        /// Wallet ID (UUID)
        #[arg(long)]
        wallet: String,
        /// Amount in smallest currency unit
        #[arg(long)]
        amount: i64,
    },
    /// Show the balance of a wallet
    Balance {
        /// Wallet ID (UUID)
        id: String,
    },
    /// Check API health
    Health,
}

fn parse_wallet_id(s: &str) -> Result<WalletId> {
    WalletId::parse(s).map_err(|_| anyhow::anyhow!("Invalid wallet ID: {}", s))
}

fn print_balance(balance: i64) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(&BalanceResponse { balance })?
    );
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let client = WalletClient::new(&cli.api_url);

    match cli.command {
        Commands::Health => {
            let healthy = client.health().await?;
            if healthy {
                println!("✓ API is healthy");
            } else {
                println!("✗ API is not healthy");
                std::process::exit(1);
            }
        }

        Commands::Deposit { wallet, amount } => {
            let wallet_id = parse_wallet_id(&wallet)?;
            let balance = client
                .apply(&wallet_id.to_string(), OperationType::Deposit, amount)
                .await?;
            print_balance(balance)?;
        }

        Commands::Withdraw { wallet, amount } => {
            let wallet_id = parse_wallet_id(&wallet)?;
            let balance = client
                .apply(&wallet_id.to_string(), OperationType::Withdraw, amount)
                .await?;
            print_balance(balance)?;
        }

        Commands::Balance { id } => {
            let wallet_id = parse_wallet_id(&id)?;
            let balance = client.get_balance(&wallet_id.to_string()).await?;
            print_balance(balance)?;
        }
    }

    Ok(())
}
