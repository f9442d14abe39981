//! Parameter transforms: caller-facing params to indexer query strings.
//!
//! One function per logical query. Time windows map to `timestamp.ge`
//! (inclusive) and `timestamp.lt` (exclusive); multi-valued filters are
//! comma-joined; the subject address is consumed and sent only under the
//! query's own key.

use crate::params::{ContractsParams, OperationsParams, RewardsParams, field, join};
use crate::query::QueryString;

const TIMESTAMP_LT: &str = "timestamp.lt";
const TIMESTAMP_GE: &str = "timestamp.ge";
const ARTIFACT_URI_NULL: &str = "token.metadata.artifactUri.null";
const ANY_OF_FROM_TO: &str = "anyof.from.to";

/// Recipient path of an FA1.2 `transfer` call.
pub const FA12_RECIPIENT_KEY: &str = "parameter.to";
/// Recipient path of an FA2 batch `transfer` call.
pub const FA2_RECIPIENT_KEY: &str = "parameter.[*].txs.[*].to_";

/// `GET /accounts/{address}/operations`.
#[must_use]
pub fn operations(params: &OperationsParams) -> QueryString {
    let mut query = QueryString::new();
    query
        .insert_opt(field::TYPE, join(params.kind.as_deref()))
        .insert_opt(field::QUOTE, join(params.quote.as_deref()))
        .insert_opt(TIMESTAMP_LT, params.to.as_deref())
        .insert_opt(TIMESTAMP_GE, params.from.as_deref());
    query.extend(params.rest(&[field::TYPE, field::QUOTE, field::FROM, field::TO]));
    query
}

/// Incoming FA1.2 token transfers sent by a third party.
#[must_use]
pub fn fa12_transfers(params: &OperationsParams) -> QueryString {
    incoming_transfers(params, FA12_RECIPIENT_KEY)
}

/// Incoming FA2 token transfers sent by a third party.
#[must_use]
pub fn fa2_transfers(params: &OperationsParams) -> QueryString {
    incoming_transfers(params, FA2_RECIPIENT_KEY)
}

/// `transfer` calls naming `address` as recipient at `recipient_key` where
/// the account itself is neither sender, target nor initiator.
fn incoming_transfers(params: &OperationsParams, recipient_key: &str) -> QueryString {
    let address = params.address.as_str();
    let mut query = QueryString::new();
    query
        .insert("sender.ne", address)
        .insert("target.ne", address)
        .insert("initiator.ne", address)
        .insert("entrypoint", "transfer")
        .insert(recipient_key, address)
        .insert_opt(TIMESTAMP_LT, params.to.as_deref())
        .insert_opt(TIMESTAMP_GE, params.from.as_deref());
    query.extend(params.rest(&[field::FROM, field::TO]));
    query
}

/// Fungible balances: holdings whose token has no artifact URI.
#[must_use]
pub fn token_balances(params: &OperationsParams) -> QueryString {
    balances(params, true)
}

/// NFT balances: holdings whose token has an artifact URI.
#[must_use]
pub fn nft_balances(params: &OperationsParams) -> QueryString {
    balances(params, false)
}

fn balances(params: &OperationsParams, artifact_uri_null: bool) -> QueryString {
    let mut query = QueryString::new();
    query
        .insert("account", params.address.as_str())
        .insert_opt(field::OFFSET, params.offset)
        .insert_opt(field::LIMIT, params.limit)
        .insert("sort.desc", "balance")
        .insert(ARTIFACT_URI_NULL, artifact_uri_null);
    query.extend(params.rest(&[field::OFFSET, field::LIMIT]));
    query
}

/// Token transfers from or to the account.
#[must_use]
pub fn token_transfers(params: &OperationsParams) -> QueryString {
    let mut query = QueryString::new();
    query
        .insert(ANY_OF_FROM_TO, params.address.as_str())
        .insert_opt(field::LIMIT, params.limit)
        .insert_opt(field::TYPE, join(params.kind.as_deref()));
    query.extend(params.rest(&[field::LIMIT, field::TYPE]));
    query
}

/// Number of token transfers from or to the account.
#[must_use]
pub fn token_transfers_count(params: &OperationsParams) -> QueryString {
    token_transfers(params)
}

/// Number of fungible balances.
#[must_use]
pub fn token_balances_count(params: &OperationsParams) -> QueryString {
    balances_count(params, true)
}

/// Number of NFT balances.
#[must_use]
pub fn nft_balances_count(params: &OperationsParams) -> QueryString {
    balances_count(params, false)
}

fn balances_count(params: &OperationsParams, artifact_uri_null: bool) -> QueryString {
    let mut query = QueryString::new();
    query
        .insert("account", params.address.as_str())
        .insert(ARTIFACT_URI_NULL, artifact_uri_null);
    query.extend(params.rest(&[]));
    query
}

/// `GET /accounts/{address}`: the address travels in the path only.
#[must_use]
pub fn account(params: &OperationsParams) -> QueryString {
    params.rest(&[])
}

/// `GET /accounts/{account}/contracts` takes no query parameters.
#[must_use]
pub fn related_contracts(_params: &ContractsParams) -> QueryString {
    QueryString::new()
}

/// `GET /rewards/delegators/{address}`.
#[must_use]
pub fn delegator_rewards(params: &RewardsParams) -> QueryString {
    let mut query = QueryString::new();
    for (bound, value) in params.cycle.bounds() {
        query.insert_opt(format!("cycle.{bound}"), value);
    }
    for (bound, values) in params.cycle.lists() {
        query.insert_opt(format!("cycle.{bound}"), values);
    }
    if let Some(sort) = params.sort {
        query.insert(format!("sort.{sort}"), "cycle");
    }
    query
        .insert_opt(field::QUOTE, join(params.quote.as_deref()))
        .insert_opt(field::LIMIT, params.limit)
        .insert_opt(field::OFFSET, params.offset);
    query.extend(params.extra.clone());
    query
}
