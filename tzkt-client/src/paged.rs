//! Page-indexed fetchers for wallet views.
//!
//! These take an unchecked network string. A network without an indexer
//! deployment yields an empty page or a zero count instead of an error;
//! request failures still propagate.

use crate::client::IndexerClient;
use crate::error::Result;
use crate::network::NetworkId;
use crate::params::OperationsParams;
use crate::types::{TokenBalance, TokenTransfer};

/// Items per page.
pub const PAGE_SIZE: u32 = 20;

/// `limit` / `offset` window of a page index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// Items to skip.
    pub offset: u32,
    /// Items to return.
    pub limit: u32,
}

impl Page {
    /// Window of the zero-based page `index`.
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self {
            offset: index.saturating_mul(PAGE_SIZE),
            limit: PAGE_SIZE,
        }
    }

    /// Parameters for `address` restricted to this window.
    #[must_use]
    pub fn params(self, address: &str) -> OperationsParams {
        OperationsParams {
            limit: Some(self.limit),
            offset: Some(self.offset),
            ..OperationsParams::new(address)
        }
    }
}

impl IndexerClient {
    /// The single gate of every paged fetcher: the network if it has a
    /// registered endpoint, `None` otherwise.
    #[must_use]
    pub fn known_network(&self, network: &str) -> Option<NetworkId> {
        let known = self.registry().known(network);
        if known.is_none() {
            tracing::debug!(network, "no indexer deployment, skipping request");
        }
        known
    }

    /// A page of fungible token balances, empty for unknown networks.
    ///
    /// # Errors
    ///
    /// Propagates request failures from [`IndexerClient::token_balances`].
    pub async fn fetch_token_balances(
        &self,
        network: &str,
        address: &str,
        page: Option<u32>,
    ) -> Result<Vec<TokenBalance>> {
        let Some(network) = self.known_network(network) else {
            return Ok(Vec::new());
        };
        let params = Page::new(page.unwrap_or_default()).params(address);
        self.token_balances(network, &params).await
    }

    /// Number of fungible token balances, zero for unknown networks.
    ///
    /// # Errors
    ///
    /// Propagates request failures from [`IndexerClient::token_balances_count`].
    pub async fn fetch_token_balances_count(&self, network: &str, address: &str) -> Result<u64> {
        let Some(network) = self.known_network(network) else {
            return Ok(0);
        };
        self.token_balances_count(network, &OperationsParams::new(address))
            .await
    }

    /// A page of NFT balances, empty for unknown networks.
    ///
    /// # Errors
    ///
    /// Propagates request failures from [`IndexerClient::nft_balances`].
    pub async fn fetch_nft_balances(
        &self,
        network: &str,
        address: &str,
        page: Option<u32>,
    ) -> Result<Vec<TokenBalance>> {
        let Some(network) = self.known_network(network) else {
            return Ok(Vec::new());
        };
        let params = Page::new(page.unwrap_or_default()).params(address);
        self.nft_balances(network, &params).await
    }

    /// Number of NFT balances, zero for unknown networks.
    ///
    /// # Errors
    ///
    /// Propagates request failures from [`IndexerClient::nft_balances_count`].
    pub async fn fetch_nft_balances_count(&self, network: &str, address: &str) -> Result<u64> {
        let Some(network) = self.known_network(network) else {
            return Ok(0);
        };
        self.nft_balances_count(network, &OperationsParams::new(address))
            .await
    }

    /// A page of token transfers from or to `address`, empty for unknown
    /// networks.
    ///
    /// # Errors
    ///
    /// Propagates request failures from [`IndexerClient::token_transfers`].
    pub async fn fetch_token_transfers(
        &self,
        network: &str,
        address: &str,
        page: Option<u32>,
    ) -> Result<Vec<TokenTransfer>> {
        let Some(network) = self.known_network(network) else {
            return Ok(Vec::new());
        };
        let params = Page::new(page.unwrap_or_default()).params(address);
        self.token_transfers(network, &params).await
    }

    /// Number of token transfers from or to `address`, zero for unknown
    /// networks.
    ///
    /// # Errors
    ///
    /// Propagates request failures from [`IndexerClient::token_transfers_count`].
    pub async fn fetch_token_transfers_count(&self, network: &str, address: &str) -> Result<u64> {
        let Some(network) = self.known_network(network) else {
            return Ok(0);
        };
        self.token_transfers_count(network, &OperationsParams::new(address))
            .await
    }
}
