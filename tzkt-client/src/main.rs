//! `tzkt` — command-line front end of the TzKT indexer client.
//!
//! ```sh
//! tzkt init -e ghostnet=http://localhost:5000/v1    # tzkt.toml with a local ghostnet
//! tzkt networks                                     # List networks and endpoints
//! tzkt fetch token-balances -a tz1... -p 1          # Second page of token balances
//! tzkt -v query delegator-rewards -a tz1... --cycle-gte 500 --sort desc
//! ```

mod cmd;
#[cfg(feature = "telemetry")]
mod telemetry;

use clap::Parser;
use cmd::{Cli, Commands};
use dotenvy::dotenv;
use tzkt_client::IndexerClient;
use tzkt_client::config::load_config_or_default;

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let client = || -> Result<IndexerClient, tzkt_client::Error> {
        IndexerClient::from_config(&load_config_or_default(&cli.config)?)
    };

    match cli.command {
        Commands::Init {
            output,
            endpoints,
            force,
        } => cmd::init::run(&output, &endpoints, force)?,
        Commands::Networks => cmd::networks::run(client()?.registry())?,
        Commands::Query(args) => cmd::query::run(&client()?, &args).await?,
        Commands::Fetch(args) => cmd::fetch::run(&client()?, &args).await?,
    }
    Ok(())
}

#[tokio::main]
#[allow(clippy::print_stderr)]
async fn main() {
    dotenv().ok();
    let cli = Cli::parse();

    #[cfg(feature = "telemetry")]
    let telemetry = telemetry::init(cli.verbose);

    let result = run(cli).await;

    #[cfg(feature = "telemetry")]
    drop(telemetry);

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
