//! Query execution against the indexer deployment of a network.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::Config;
use crate::error::{Error, IndexerError, Result};
use crate::network::NetworkId;
use crate::query::QueryString;
use crate::registry::NetworkRegistry;

/// A logical query: a path builder and a parameter transform over the same
/// params type `P`, decoding into `R`.
pub struct QueryDef<P, R> {
    /// Stable query name.
    pub name: &'static str,
    /// Path segments appended to the endpoint, e.g. `["tokens", "balances"]`.
    /// Each segment is percent-encoded on its own.
    pub url: fn(&P) -> Vec<&str>,
    /// Builds the query string.
    pub params: fn(&P) -> QueryString,
    result: PhantomData<fn() -> R>,
}

impl<P, R> QueryDef<P, R> {
    /// Binds a path builder and a transform under `name`.
    #[must_use]
    pub const fn new(
        name: &'static str,
        url: fn(&P) -> Vec<&str>,
        params: fn(&P) -> QueryString,
    ) -> Self {
        Self {
            name,
            url,
            params,
            result: PhantomData,
        }
    }
}

impl<P, R> fmt::Debug for QueryDef<P, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryDef").field("name", &self.name).finish()
    }
}

/// Client for the TzKT indexer, routing each call to one network deployment.
///
/// Cheap to clone; holds no mutable state.
#[derive(Debug, Clone)]
pub struct IndexerClient {
    http: Client,
    registry: Arc<NetworkRegistry>,
}

impl IndexerClient {
    /// Creates a client with a default HTTP client.
    #[must_use]
    pub fn new(registry: NetworkRegistry) -> Self {
        Self::with_http(Client::new(), registry)
    }

    /// Creates a client over an existing HTTP client.
    #[must_use]
    pub fn with_http(http: Client, registry: NetworkRegistry) -> Self {
        Self {
            http,
            registry: Arc::new(registry),
        }
    }

    /// Creates a client from configuration: timeout, user agent and endpoint
    /// overrides.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the HTTP client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent())
            .build()
            .map_err(|e| Error::config_with("failed to build HTTP client", e))?;
        Ok(Self::with_http(http, NetworkRegistry::from_config(config)))
    }

    /// The endpoint table this client routes through.
    #[must_use]
    pub fn registry(&self) -> &NetworkRegistry {
        &self.registry
    }

    /// Full request URL of `query` for `params` on `network`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnresolvedEndpoint`] if no endpoint is registered
    /// for `network`, or [`Error::Indexer`] if a path segment is empty or a
    /// dot segment.
    pub fn request_url<P, R>(
        &self,
        network: NetworkId,
        query: &QueryDef<P, R>,
        params: &P,
    ) -> Result<Url> {
        let endpoint = self
            .registry
            .resolve(network)
            .ok_or(Error::UnresolvedEndpoint(network))?;
        let segments = (query.url)(params);
        if let Some(segment) = segments
            .iter()
            .find(|segment| matches!(**segment, "" | "." | ".."))
        {
            tracing::error!(query = query.name, ?segment, "invalid path segment");
            return Err(IndexerError {
                status: None,
                message: format!("invalid path segment {segment:?}"),
            }
            .into());
        }

        let mut url = endpoint.clone();
        url.path_segments_mut()
            .map_err(|()| IndexerError {
                status: None,
                message: format!("endpoint {endpoint} cannot take a path"),
            })?
            .pop_if_empty()
            .extend(segments);
        (query.params)(params).apply_to(&mut url);
        Ok(url)
    }

    /// Runs `query` once against the deployment of `network`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnresolvedEndpoint`] if no endpoint is registered for
    /// `network`; every request failure is returned as [`Error::Indexer`].
    #[tracing::instrument(skip_all, fields(query = query.name, network = %network))]
    pub async fn execute<P, R>(
        &self,
        network: NetworkId,
        query: &QueryDef<P, R>,
        params: &P,
    ) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let url = self.request_url(network, query, params)?;
        tracing::debug!(%url, "querying indexer");

        let response = self.http.get(url).send().await.map_err(|e| {
            tracing::error!(error = %e, "indexer request failed");
            IndexerError::transport()
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|e| {
                tracing::warn!(error = %e, "failed to read error body");
                String::new()
            });
            let err = IndexerError::server(status, &body);
            tracing::warn!(status = status.as_u16(), message = %err.message, "indexer returned an error");
            return Err(err.into());
        }

        response.json::<R>().await.map_err(|e| {
            tracing::error!(error = %e, "failed to decode indexer response");
            let err = if e.is_decode() {
                IndexerError::malformed(status.as_u16())
            } else {
                IndexerError::transport()
            };
            Error::from(err)
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::params::OperationsParams;

    fn balances_path(_: &OperationsParams) -> Vec<&str> {
        vec!["tokens", "balances"]
    }

    fn account_param(params: &OperationsParams) -> QueryString {
        std::iter::once(("account", params.address.as_str())).collect()
    }

    fn account_path(params: &OperationsParams) -> Vec<&str> {
        vec!["accounts", &params.address]
    }

    const BALANCES: QueryDef<OperationsParams, serde_json::Value> =
        QueryDef::new("balances", balances_path, account_param);

    const ACCOUNT: QueryDef<OperationsParams, serde_json::Value> =
        QueryDef::new("account", account_path, |_| QueryString::new());

    #[test]
    fn request_url_joins_endpoint_path_and_query() {
        let client = IndexerClient::new(NetworkRegistry::default());
        let url = client
            .request_url(NetworkId::Ghostnet, &BALANCES, &OperationsParams::new("tz1a"))
            .expect("url");
        assert_eq!(
            url.as_str(),
            "https://api.ghostnet.tzkt.io/v1/tokens/balances?account=tz1a"
        );
    }

    #[test]
    fn request_url_tolerates_trailing_slash_endpoints() {
        let registry = NetworkRegistry::new(BTreeMap::from([(
            NetworkId::Mainnet,
            Url::parse("http://localhost:5000/v1/").expect("url"),
        )]));
        let client = IndexerClient::new(registry);
        let url = client
            .request_url(NetworkId::Mainnet, &BALANCES, &OperationsParams::new("tz1a"))
            .expect("url");
        assert_eq!(url.as_str(), "http://localhost:5000/v1/tokens/balances?account=tz1a");
    }

    #[test]
    fn dot_and_empty_segments_are_rejected() {
        let client = IndexerClient::new(NetworkRegistry::default());
        for address in ["", ".", ".."] {
            let err = client
                .request_url(NetworkId::Mainnet, &ACCOUNT, &OperationsParams::new(address))
                .expect_err("invalid segment");
            assert!(err.indexer_message().is_some_and(|m| m.starts_with("invalid path segment")));
        }
    }

    #[test]
    fn unregistered_network_is_unresolved() {
        let client = IndexerClient::new(NetworkRegistry::new(BTreeMap::new()));
        let err = client
            .request_url(NetworkId::Dcp, &BALANCES, &OperationsParams::new("tz1a"))
            .expect_err("unresolved");
        assert!(matches!(err, Error::UnresolvedEndpoint(NetworkId::Dcp)));
    }
}
