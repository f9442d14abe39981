//! The fixed set of indexer queries.
//!
//! Each entry is a [`QueryDef`] binding a path builder to a transform from
//! [`crate::transform`]; [`IndexerClient`] exposes one typed method per entry.

use std::fmt;
use std::str::FromStr;

use crate::client::{IndexerClient, QueryDef};
use crate::error::Result;
use crate::network::NetworkId;
use crate::params::{ContractsParams, OperationsParams, RewardsParams};
use crate::transform;
use crate::types::{Account, Operation, RelatedContract, RewardsResponse, TokenBalance, TokenTransfer};

fn account_operations_path(params: &OperationsParams) -> Vec<&str> {
    vec!["accounts", &params.address, "operations"]
}

fn transactions_path(_: &OperationsParams) -> Vec<&str> {
    vec!["operations", "transactions"]
}

fn balances_path(_: &OperationsParams) -> Vec<&str> {
    vec!["tokens", "balances"]
}

fn balances_count_path(_: &OperationsParams) -> Vec<&str> {
    vec!["tokens", "balances", "count"]
}

fn transfers_path(_: &OperationsParams) -> Vec<&str> {
    vec!["tokens", "transfers"]
}

fn transfers_count_path(_: &OperationsParams) -> Vec<&str> {
    vec!["tokens", "transfers", "count"]
}

fn account_path(params: &OperationsParams) -> Vec<&str> {
    vec!["accounts", &params.address]
}

fn contracts_path(params: &ContractsParams) -> Vec<&str> {
    vec!["accounts", &params.account, "contracts"]
}

fn rewards_path(params: &RewardsParams) -> Vec<&str> {
    vec!["rewards", "delegators", &params.address]
}

/// Operations of an account.
pub const OPERATIONS: QueryDef<OperationsParams, Vec<Operation>> =
    QueryDef::new("operations", account_operations_path, transform::operations);

/// Incoming FA1.2 transfers.
pub const FA12_TRANSFERS: QueryDef<OperationsParams, Vec<Operation>> =
    QueryDef::new("fa12-transfers", transactions_path, transform::fa12_transfers);

/// Incoming FA2 transfers.
pub const FA2_TRANSFERS: QueryDef<OperationsParams, Vec<Operation>> =
    QueryDef::new("fa2-transfers", transactions_path, transform::fa2_transfers);

/// Fungible token balances.
pub const TOKEN_BALANCES: QueryDef<OperationsParams, Vec<TokenBalance>> =
    QueryDef::new("token-balances", balances_path, transform::token_balances);

/// NFT balances.
pub const NFT_BALANCES: QueryDef<OperationsParams, Vec<TokenBalance>> =
    QueryDef::new("nft-balances", balances_path, transform::nft_balances);

/// Token transfers from or to an account.
pub const TOKEN_TRANSFERS: QueryDef<OperationsParams, Vec<TokenTransfer>> =
    QueryDef::new("token-transfers", transfers_path, transform::token_transfers);

/// Number of token transfers from or to an account.
pub const TOKEN_TRANSFERS_COUNT: QueryDef<OperationsParams, u64> = QueryDef::new(
    "token-transfers-count",
    transfers_count_path,
    transform::token_transfers_count,
);

/// Number of fungible token balances.
pub const TOKEN_BALANCES_COUNT: QueryDef<OperationsParams, u64> = QueryDef::new(
    "token-balances-count",
    balances_count_path,
    transform::token_balances_count,
);

/// Number of NFT balances.
pub const NFT_BALANCES_COUNT: QueryDef<OperationsParams, u64> = QueryDef::new(
    "nft-balances-count",
    balances_count_path,
    transform::nft_balances_count,
);

/// Raw account object.
pub const ACCOUNT: QueryDef<OperationsParams, Account> =
    QueryDef::new("account", account_path, transform::account);

/// Contracts related to an account.
pub const RELATED_CONTRACTS: QueryDef<ContractsParams, Vec<RelatedContract>> =
    QueryDef::new("related-contracts", contracts_path, transform::related_contracts);

/// Per-cycle rewards of a delegator.
pub const DELEGATOR_REWARDS: QueryDef<RewardsParams, RewardsResponse> =
    QueryDef::new("delegator-rewards", rewards_path, transform::delegator_rewards);

/// Name of every catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKind {
    /// [`OPERATIONS`].
    Operations,
    /// [`FA12_TRANSFERS`].
    Fa12Transfers,
    /// [`FA2_TRANSFERS`].
    Fa2Transfers,
    /// [`TOKEN_BALANCES`].
    TokenBalances,
    /// [`NFT_BALANCES`].
    NftBalances,
    /// [`TOKEN_TRANSFERS`].
    TokenTransfers,
    /// [`TOKEN_TRANSFERS_COUNT`].
    TokenTransfersCount,
    /// [`TOKEN_BALANCES_COUNT`].
    TokenBalancesCount,
    /// [`NFT_BALANCES_COUNT`].
    NftBalancesCount,
    /// [`ACCOUNT`].
    Account,
    /// [`RELATED_CONTRACTS`].
    RelatedContracts,
    /// [`DELEGATOR_REWARDS`].
    DelegatorRewards,
}

impl QueryKind {
    /// Every catalog entry.
    pub const ALL: [Self; 12] = [
        Self::Operations,
        Self::Fa12Transfers,
        Self::Fa2Transfers,
        Self::TokenBalances,
        Self::NftBalances,
        Self::TokenTransfers,
        Self::TokenTransfersCount,
        Self::TokenBalancesCount,
        Self::NftBalancesCount,
        Self::Account,
        Self::RelatedContracts,
        Self::DelegatorRewards,
    ];

    /// Name of the bound [`QueryDef`].
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Operations => OPERATIONS.name,
            Self::Fa12Transfers => FA12_TRANSFERS.name,
            Self::Fa2Transfers => FA2_TRANSFERS.name,
            Self::TokenBalances => TOKEN_BALANCES.name,
            Self::NftBalances => NFT_BALANCES.name,
            Self::TokenTransfers => TOKEN_TRANSFERS.name,
            Self::TokenTransfersCount => TOKEN_TRANSFERS_COUNT.name,
            Self::TokenBalancesCount => TOKEN_BALANCES_COUNT.name,
            Self::NftBalancesCount => NFT_BALANCES_COUNT.name,
            Self::Account => ACCOUNT.name,
            Self::RelatedContracts => RELATED_CONTRACTS.name,
            Self::DelegatorRewards => DELEGATOR_REWARDS.name,
        }
    }
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a string names no catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown query: {0}")]
pub struct UnknownQuery(pub String);

impl FromStr for QueryKind {
    type Err = UnknownQuery;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| UnknownQuery(s.to_owned()))
    }
}

impl IndexerClient {
    /// Operations of `params.address`.
    ///
    /// # Errors
    ///
    /// See [`IndexerClient::execute`].
    pub async fn operations(
        &self,
        network: NetworkId,
        params: &OperationsParams,
    ) -> Result<Vec<Operation>> {
        self.execute(network, &OPERATIONS, params).await
    }

    /// Incoming FA1.2 transfers of `params.address`.
    ///
    /// # Errors
    ///
    /// See [`IndexerClient::execute`].
    pub async fn fa12_transfers(
        &self,
        network: NetworkId,
        params: &OperationsParams,
    ) -> Result<Vec<Operation>> {
        self.execute(network, &FA12_TRANSFERS, params).await
    }

    /// Incoming FA2 transfers of `params.address`.
    ///
    /// # Errors
    ///
    /// See [`IndexerClient::execute`].
    pub async fn fa2_transfers(
        &self,
        network: NetworkId,
        params: &OperationsParams,
    ) -> Result<Vec<Operation>> {
        self.execute(network, &FA2_TRANSFERS, params).await
    }

    /// Fungible token balances of `params.address`.
    ///
    /// # Errors
    ///
    /// See [`IndexerClient::execute`].
    pub async fn token_balances(
        &self,
        network: NetworkId,
        params: &OperationsParams,
    ) -> Result<Vec<TokenBalance>> {
        self.execute(network, &TOKEN_BALANCES, params).await
    }

    /// NFT balances of `params.address`.
    ///
    /// # Errors
    ///
    /// See [`IndexerClient::execute`].
    pub async fn nft_balances(
        &self,
        network: NetworkId,
        params: &OperationsParams,
    ) -> Result<Vec<TokenBalance>> {
        self.execute(network, &NFT_BALANCES, params).await
    }

    /// Token transfers from or to `params.address`.
    ///
    /// # Errors
    ///
    /// See [`IndexerClient::execute`].
    pub async fn token_transfers(
        &self,
        network: NetworkId,
        params: &OperationsParams,
    ) -> Result<Vec<TokenTransfer>> {
        self.execute(network, &TOKEN_TRANSFERS, params).await
    }

    /// Number of token transfers from or to `params.address`.
    ///
    /// # Errors
    ///
    /// See [`IndexerClient::execute`].
    pub async fn token_transfers_count(
        &self,
        network: NetworkId,
        params: &OperationsParams,
    ) -> Result<u64> {
        self.execute(network, &TOKEN_TRANSFERS_COUNT, params).await
    }

    /// Number of fungible token balances of `params.address`.
    ///
    /// # Errors
    ///
    /// See [`IndexerClient::execute`].
    pub async fn token_balances_count(
        &self,
        network: NetworkId,
        params: &OperationsParams,
    ) -> Result<u64> {
        self.execute(network, &TOKEN_BALANCES_COUNT, params).await
    }

    /// Number of NFT balances of `params.address`.
    ///
    /// # Errors
    ///
    /// See [`IndexerClient::execute`].
    pub async fn nft_balances_count(
        &self,
        network: NetworkId,
        params: &OperationsParams,
    ) -> Result<u64> {
        self.execute(network, &NFT_BALANCES_COUNT, params).await
    }

    /// Raw account object of `params.address`.
    ///
    /// # Errors
    ///
    /// See [`IndexerClient::execute`].
    pub async fn account(&self, network: NetworkId, params: &OperationsParams) -> Result<Account> {
        self.execute(network, &ACCOUNT, params).await
    }

    /// Contracts related to `params.account`.
    ///
    /// # Errors
    ///
    /// See [`IndexerClient::execute`].
    pub async fn related_contracts(
        &self,
        network: NetworkId,
        params: &ContractsParams,
    ) -> Result<Vec<RelatedContract>> {
        self.execute(network, &RELATED_CONTRACTS, params).await
    }

    /// Per-cycle rewards of `params.address`.
    ///
    /// # Errors
    ///
    /// See [`IndexerClient::execute`].
    pub async fn delegator_rewards(
        &self,
        network: NetworkId,
        params: &RewardsParams,
    ) -> Result<RewardsResponse> {
        self.execute(network, &DELEGATOR_REWARDS, params).await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::registry::NetworkRegistry;

    #[test]
    fn names_are_unique_and_parse_back() {
        let names: HashSet<_> = QueryKind::ALL.iter().map(|k| k.name()).collect();
        assert_eq!(names.len(), QueryKind::ALL.len());
        for kind in QueryKind::ALL {
            assert_eq!(kind.name().parse(), Ok(kind));
        }
        assert!("get-everything".parse::<QueryKind>().is_err());
    }

    fn path<R>(client: &IndexerClient, def: &QueryDef<OperationsParams, R>) -> String {
        client
            .request_url(NetworkId::Mainnet, def, &OperationsParams::new("tz1a"))
            .expect("url")
            .path()
            .to_owned()
    }

    #[test]
    fn paths_embed_the_subject() {
        let client = IndexerClient::new(NetworkRegistry::default());
        assert_eq!(path(&client, &OPERATIONS), "/v1/accounts/tz1a/operations");
        assert_eq!(path(&client, &FA12_TRANSFERS), "/v1/operations/transactions");
        assert_eq!(path(&client, &FA2_TRANSFERS), "/v1/operations/transactions");
        assert_eq!(path(&client, &ACCOUNT), "/v1/accounts/tz1a");
        assert_eq!(path(&client, &TOKEN_TRANSFERS_COUNT), "/v1/tokens/transfers/count");
        assert_eq!(path(&client, &NFT_BALANCES_COUNT), "/v1/tokens/balances/count");

        let contracts = client
            .request_url(NetworkId::Mainnet, &RELATED_CONTRACTS, &ContractsParams::new("tz1b"))
            .expect("url");
        assert_eq!(contracts.path(), "/v1/accounts/tz1b/contracts");
        assert_eq!(contracts.query(), None);

        let rewards = client
            .request_url(NetworkId::Mainnet, &DELEGATOR_REWARDS, &RewardsParams::new("tz1c"))
            .expect("url");
        assert_eq!(rewards.path(), "/v1/rewards/delegators/tz1c");
    }

    #[test]
    fn address_stays_inside_its_segment() {
        let client = IndexerClient::new(NetworkRegistry::default());
        let url = |def: &QueryDef<OperationsParams, _>, address: &str| {
            client
                .request_url(NetworkId::Mainnet, def, &OperationsParams::new(address))
                .expect("url")
        };

        let ops = url(&OPERATIONS, "tz1a#x");
        assert_eq!(ops.path(), "/v1/accounts/tz1a%23x/operations");
        assert_eq!(ops.fragment(), None);

        let ops = url(&OPERATIONS, "tz1a?limit=1");
        assert_eq!(ops.path(), "/v1/accounts/tz1a%3Flimit=1/operations");
        assert_eq!(ops.query(), None);

        let account = client
            .request_url(
                NetworkId::Mainnet,
                &ACCOUNT,
                &OperationsParams::new("../../tokens/balances"),
            )
            .expect("url");
        assert_eq!(account.path(), "/v1/accounts/..%2F..%2Ftokens%2Fbalances");
        assert_eq!(account.query(), None);
    }
}
