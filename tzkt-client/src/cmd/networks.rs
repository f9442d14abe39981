//! `tzkt networks` command — list networks and their resolved endpoints.

use serde::Serialize;
use tzkt_client::{NetworkId, NetworkRegistry};

#[derive(Debug, Serialize)]
struct NetworkEntry<'a> {
    network: NetworkId,
    chain_id: &'static str,
    endpoint: Option<&'a str>,
}

/// Execute the `networks` command.
///
/// # Errors
///
/// Returns an error if the listing cannot be rendered.
pub fn run(registry: &NetworkRegistry) -> Result<(), Box<dyn std::error::Error>> {
    let entries: Vec<_> = NetworkId::ALL
        .into_iter()
        .map(|network| NetworkEntry {
            network,
            chain_id: network.chain_id(),
            endpoint: registry.resolve(network).map(url::Url::as_str),
        })
        .collect();
    super::print_json(&entries)?;
    Ok(())
}
