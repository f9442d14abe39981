//! CLI definitions and command implementations for `tzkt`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tzkt_client::NetworkId;
use url::Url;

pub mod fetch;
pub mod init;
pub mod networks;
pub mod query;

/// TzKT indexer client — query per-network TzKT deployments.
#[derive(Debug, Parser)]
#[command(name = "tzkt")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, global = true, env = "TZKT_CONFIG", default_value = "tzkt.toml")]
    pub config: PathBuf,

    /// Log more; repeat for debug (`-vv`) or trace (`-vvv`). `RUST_LOG` wins.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a default TOML configuration file.
    Init {
        /// Output path for the configuration file.
        #[arg(short, long, default_value = "tzkt.toml")]
        output: PathBuf,

        /// Pin a network to an indexer URL, as `network=url`; repeatable.
        #[arg(short, long = "endpoint", value_parser = parse_endpoint)]
        endpoints: Vec<(NetworkId, Url)>,

        /// Overwrite the file if it already exists.
        #[arg(long, default_value_t = false)]
        force: bool,
    },

    /// List supported networks and their indexer endpoints.
    Networks,

    /// Run one catalog query and print the JSON result.
    Query(QueryArgs),

    /// Fetch one page (or the total count) of a wallet view.
    Fetch(FetchArgs),
}

/// Arguments of `tzkt query`.
#[derive(Debug, Args)]
pub struct QueryArgs {
    /// Catalog entry, e.g. `token-balances` or `delegator-rewards`.
    pub query: String,

    /// Network name or chain id.
    #[arg(short, long, default_value = "mainnet")]
    pub network: String,

    /// Subject account address.
    #[arg(short, long)]
    pub address: String,

    /// Maximum number of items.
    #[arg(long)]
    pub limit: Option<u32>,

    /// Number of items to skip.
    #[arg(long)]
    pub offset: Option<u32>,

    /// Inclusive lower time bound (ISO 8601).
    #[arg(long)]
    pub from: Option<String>,

    /// Exclusive upper time bound (ISO 8601).
    #[arg(long)]
    pub to: Option<String>,

    /// Type filter, comma-separated.
    #[arg(long = "type", value_delimiter = ',')]
    pub kind: Option<Vec<String>>,

    /// Quote currencies, comma-separated.
    #[arg(long, value_delimiter = ',')]
    pub quote: Option<Vec<String>>,

    /// Lower cycle bound (rewards only).
    #[arg(long)]
    pub cycle_gte: Option<i32>,

    /// Upper cycle bound (rewards only).
    #[arg(long)]
    pub cycle_lte: Option<i32>,

    /// Cycles to include, comma-separated (rewards only).
    #[arg(long, value_delimiter = ',')]
    pub cycle_in: Option<Vec<i32>>,

    /// Cycles to exclude, comma-separated (rewards only).
    #[arg(long, value_delimiter = ',')]
    pub cycle_ni: Option<Vec<i32>>,

    /// Sort rewards by cycle.
    #[arg(long, value_enum)]
    pub sort: Option<SortArg>,

    /// Extra indexer parameter as `key=value`; repeatable.
    #[arg(short = 'P', long = "param", value_parser = parse_key_value)]
    pub params: Vec<(String, String)>,
}

/// Sort direction accepted on the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SortArg {
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

/// Wallet view fetched by `tzkt fetch`.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FetchView {
    /// Fungible token balances.
    TokenBalances,
    /// NFT balances.
    NftBalances,
    /// Token transfers.
    TokenTransfers,
}

/// Arguments of `tzkt fetch`.
#[derive(Debug, Args)]
pub struct FetchArgs {
    /// View to fetch.
    #[arg(value_enum)]
    pub view: FetchView,

    /// Network name or chain id; unknown networks yield an empty result.
    #[arg(short, long, default_value = "mainnet")]
    pub network: String,

    /// Subject account address.
    #[arg(short, long)]
    pub address: String,

    /// Zero-based page index.
    #[arg(short, long)]
    pub page: Option<u32>,

    /// Print the total count instead of a page.
    #[arg(long, default_value_t = false)]
    pub count: bool,
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_owned(), v.to_owned()))
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| format!("expected key=value, got '{s}'"))
}

fn parse_endpoint(s: &str) -> Result<(NetworkId, Url), String> {
    let (network, url) = parse_key_value(s)?;
    let network = network.parse::<NetworkId>().map_err(|e| e.to_string())?;
    let url = Url::parse(&url).map_err(|e| format!("invalid endpoint '{url}': {e}"))?;
    Ok((network, url))
}

/// Prints `value` as pretty JSON on stdout.
#[allow(clippy::print_stdout)]
pub(crate) fn print_json<T: serde::Serialize>(value: &T) -> serde_json::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_query_with_extra_params() {
        let cli = Cli::parse_from([
            "tzkt", "query", "operations", "-a", "tz1a", "--type", "transaction,delegation",
            "-P", "sort.desc=id",
        ]);
        let Commands::Query(args) = cli.command else {
            panic!("expected query command");
        };
        assert_eq!(args.kind, Some(vec!["transaction".into(), "delegation".into()]));
        assert_eq!(args.params, vec![("sort.desc".to_owned(), "id".to_owned())]);
        assert_eq!(args.network, "mainnet");
    }

    #[test]
    fn rejects_malformed_param() {
        assert!(parse_key_value("novalue").is_err());
        assert!(parse_key_value("=x").is_err());
        assert_eq!(parse_key_value("a=b=c"), Ok(("a".into(), "b=c".into())));
    }

    #[test]
    fn parses_endpoint_pins() {
        let (network, url) = parse_endpoint("NetXnHfVqm9iesp=http://127.0.0.1:5000/v1").expect("pin");
        assert_eq!(network, NetworkId::Ghostnet);
        assert_eq!(url.as_str(), "http://127.0.0.1:5000/v1");
        assert!(parse_endpoint("limanet=http://127.0.0.1/v1").is_err());
        assert!(parse_endpoint("mainnet=not a url").is_err());
    }
}
