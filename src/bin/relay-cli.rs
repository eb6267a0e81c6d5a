use clap::{Parser, Subcommand};
use relay_sdk::{MintRequest, RelayClient};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "relay-cli")]
#[command(about = "Command-line client for the chain relay", long_about = None)]
struct Cli {
    #[arg(short, long, env = "RELAY_URL", default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Mint tokens to an address
    Mint {
        /// Recipient address
        address: String,
        /// Token id, for editions that do not pin one
        #[arg(long)]
        token_id: Option<u64>,
        #[arg(long)]
        quantity: Option<u64>,
        /// Named deployment instead of the default
        #[arg(long)]
        deployment: Option<String>,
    },
    /// Pick a random number
    Pick,
    /// Set the number of items to pick from
    SetTotal { new_total: u64 },
    /// Show the picker state
    State,
    /// Check relay health
    Health,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = RelayClient::new(&cli.url);

    match cli.command {
        Commands::Mint {
            address,
            token_id,
            quantity,
            deployment,
        } => {
            let req = MintRequest {
                address,
                token_id,
                quantity,
            };
            print_json(&client.mint(deployment.as_deref(), &req).await?)?;
        }
        Commands::Pick => print_json(&client.pick_random().await?)?,
        Commands::SetTotal { new_total } => print_json(&client.set_total(new_total).await?)?,
        Commands::State => print_json(&client.state().await?)?,
        Commands::Health => print_json(&client.health().await?)?,
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
