//! `tzkt fetch` command — one page or the total count of a wallet view.

use tzkt_client::IndexerClient;

use super::{FetchArgs, FetchView, print_json};

/// Execute the `fetch` command.
///
/// Networks without an indexer deployment print `[]` or `0`.
///
/// # Errors
///
/// Returns an error if the request fails.
pub async fn run(client: &IndexerClient, args: &FetchArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (network, address, page) = (args.network.as_str(), args.address.as_str(), args.page);

    match (args.view, args.count) {
        (FetchView::TokenBalances, false) => {
            print_json(&client.fetch_token_balances(network, address, page).await?)?;
        }
        (FetchView::TokenBalances, true) => {
            print_json(&client.fetch_token_balances_count(network, address).await?)?;
        }
        (FetchView::NftBalances, false) => {
            print_json(&client.fetch_nft_balances(network, address, page).await?)?;
        }
        (FetchView::NftBalances, true) => {
            print_json(&client.fetch_nft_balances_count(network, address).await?)?;
        }
        (FetchView::TokenTransfers, false) => {
            print_json(&client.fetch_token_transfers(network, address, page).await?)?;
        }
        (FetchView::TokenTransfers, true) => {
            print_json(&client.fetch_token_transfers_count(network, address).await?)?;
        }
    }
    Ok(())
}
