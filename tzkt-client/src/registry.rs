//! Network to indexer endpoint table.

use std::collections::BTreeMap;

use url::Url;

use crate::config::Config;
use crate::network::NetworkId;

/// Public TzKT deployments, one per supported network.
const DEFAULT_ENDPOINTS: [(NetworkId, &str); 5] = [
    (NetworkId::Mainnet, "https://api.tzkt.io/v1"),
    (NetworkId::Jakartanet, "https://api.jakartanet.tzkt.io/v1"),
    (NetworkId::Ghostnet, "https://api.ghostnet.tzkt.io/v1"),
    (NetworkId::Dcp, "https://explorer.tlnt.net:8001/v1"),
    (NetworkId::DcpTest, "https://explorer.tlnt.net:8009/v1"),
];

/// Immutable mapping from [`NetworkId`] to indexer base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkRegistry {
    endpoints: BTreeMap<NetworkId, Url>,
}

impl NetworkRegistry {
    /// Creates a registry from an explicit table.
    #[must_use]
    pub const fn new(endpoints: BTreeMap<NetworkId, Url>) -> Self {
        Self { endpoints }
    }

    /// Default table overlaid with the `[endpoints]` section of `config`.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let mut registry = Self::default();
        registry.endpoints.extend(
            config
                .endpoints()
                .iter()
                .map(|(id, url)| (*id, url.clone())),
        );
        registry
    }

    /// Base URL of the indexer deployment for `id`.
    #[must_use]
    pub fn resolve(&self, id: NetworkId) -> Option<&Url> {
        self.endpoints.get(&id)
    }

    /// Parses `network` and returns it only if an endpoint is registered.
    #[must_use]
    pub fn known(&self, network: &str) -> Option<NetworkId> {
        network
            .parse::<NetworkId>()
            .ok()
            .filter(|id| self.endpoints.contains_key(id))
    }

    /// Returns `true` if `network` is a supported network with an endpoint.
    #[must_use]
    pub fn is_known(&self, network: &str) -> bool {
        self.known(network).is_some()
    }

    /// Registered networks and their endpoints, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (NetworkId, &Url)> {
        self.endpoints.iter().map(|(id, url)| (*id, url))
    }
}

impl Default for NetworkRegistry {
    #[allow(clippy::expect_used)]
    fn default() -> Self {
        let endpoints = DEFAULT_ENDPOINTS
            .into_iter()
            .map(|(id, url)| (id, Url::parse(url).expect("static endpoint is a valid URL")))
            .collect();
        Self { endpoints }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_covers_every_network() {
        let registry = NetworkRegistry::default();
        for id in NetworkId::ALL {
            let url = registry.resolve(id).expect("endpoint");
            assert!(!url.as_str().is_empty());
            assert!(registry.is_known(id.chain_id()));
        }
        assert_eq!(
            registry.resolve(NetworkId::Mainnet).map(Url::as_str),
            Some("https://api.tzkt.io/v1")
        );
    }

    #[test]
    fn unknown_strings_are_not_known() {
        let registry = NetworkRegistry::default();
        assert!(!registry.is_known("NetXunknown1234"));
        assert_eq!(registry.known("nope"), None);
    }

    #[test]
    fn supported_network_without_endpoint_is_not_known() {
        let registry = NetworkRegistry::new(BTreeMap::from([(
            NetworkId::Mainnet,
            Url::parse("http://localhost:5000/v1").expect("url"),
        )]));
        assert_eq!(registry.known("mainnet"), Some(NetworkId::Mainnet));
        assert!(!registry.is_known("ghostnet"));
        assert_eq!(registry.resolve(NetworkId::Ghostnet), None);
    }

    #[test]
    fn config_overrides_single_endpoint() {
        let config: Config = toml::from_str(
            r#"
            [endpoints]
            ghostnet = "http://127.0.0.1:5000/v1"
            "#,
        )
        .expect("config");
        let registry = NetworkRegistry::from_config(&config);
        assert_eq!(
            registry.resolve(NetworkId::Ghostnet).map(Url::as_str),
            Some("http://127.0.0.1:5000/v1")
        );
        assert_eq!(
            registry.resolve(NetworkId::Mainnet).map(Url::as_str),
            Some("https://api.tzkt.io/v1")
        );
    }

    #[test]
    fn iter_follows_declaration_order() {
        let ids: Vec<NetworkId> = NetworkRegistry::default().iter().map(|(id, _)| id).collect();
        assert_eq!(ids, NetworkId::ALL.to_vec());
    }
}
