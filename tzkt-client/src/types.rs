//! Indexer response records.
//!
//! The indexer owns these schemas. Records name the fields callers commonly
//! read, keep them optional, and carry everything else in `other` so that a
//! schema change on the server never fails decoding.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An account reference with an optional alias.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alias {
    /// Display alias.
    #[serde(default)]
    pub alias: Option<String>,
    /// Account address.
    #[serde(default)]
    pub address: Option<String>,
}

/// A single operation of any type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    /// Operation type (`transaction`, `delegation`, ...).
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    /// Internal indexer id, usable as `lastId` cursor.
    #[serde(default)]
    pub id: Option<u64>,
    /// Block level.
    #[serde(default)]
    pub level: Option<u64>,
    /// Block timestamp.
    #[serde(default)]
    pub timestamp: Option<String>,
    /// Operation group hash.
    #[serde(default)]
    pub hash: Option<String>,
    /// Application status.
    #[serde(default)]
    pub status: Option<String>,
    /// Remaining fields.
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// Token descriptor shared by balances and transfers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    /// Internal indexer id.
    #[serde(default)]
    pub id: Option<u64>,
    /// Token contract.
    #[serde(default)]
    pub contract: Option<Alias>,
    /// Token id within the contract.
    #[serde(default)]
    pub token_id: Option<String>,
    /// `fa1.2` or `fa2`.
    #[serde(default)]
    pub standard: Option<String>,
    /// Off-chain metadata, as indexed.
    #[serde(default)]
    pub metadata: Option<Value>,
    /// Remaining fields.
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// A token movement between two accounts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenTransfer {
    /// Internal indexer id.
    #[serde(default)]
    pub id: Option<u64>,
    /// Block level.
    #[serde(default)]
    pub level: Option<u64>,
    /// Block timestamp.
    #[serde(default)]
    pub timestamp: Option<String>,
    /// Transferred token.
    #[serde(default)]
    pub token: Option<Token>,
    /// Sender; absent for mints.
    #[serde(default)]
    pub from: Option<Alias>,
    /// Recipient; absent for burns.
    #[serde(default)]
    pub to: Option<Alias>,
    /// Raw amount, as a decimal string.
    #[serde(default)]
    pub amount: Option<String>,
    /// Remaining fields.
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// A token holding of an account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenBalance {
    /// Internal indexer id.
    #[serde(default)]
    pub id: Option<u64>,
    /// Holder.
    #[serde(default)]
    pub account: Option<Alias>,
    /// Held token.
    #[serde(default)]
    pub token: Option<Token>,
    /// Raw balance, as a decimal string.
    #[serde(default)]
    pub balance: Option<String>,
    /// Remaining fields.
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// A contract originated by, or managed by, an account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedContract {
    /// Contract kind (`smart_contract`, `delegator_contract`, ...).
    #[serde(default)]
    pub kind: Option<String>,
    /// Display alias.
    #[serde(default)]
    pub alias: Option<String>,
    /// Contract address.
    #[serde(default)]
    pub address: Option<String>,
    /// Balance in mutez.
    #[serde(default)]
    pub balance: Option<u64>,
    /// Origination level.
    #[serde(default)]
    pub creation_level: Option<u64>,
    /// Origination timestamp.
    #[serde(default)]
    pub creation_time: Option<String>,
    /// Remaining fields.
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// Rewards of one delegator for one cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DelegatorReward {
    /// Cycle number.
    #[serde(default)]
    pub cycle: Option<i32>,
    /// Delegated balance in mutez.
    #[serde(default)]
    pub balance: Option<i64>,
    /// Baker delegated to.
    #[serde(default)]
    pub baker: Option<Alias>,
    /// Baker's staking balance in mutez.
    #[serde(default)]
    pub staking_balance: Option<i64>,
    /// Price quote of the cycle, if requested.
    #[serde(default)]
    pub quote: Option<Value>,
    /// Remaining fields.
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// Reward records returned by the delegator rewards query.
pub type RewardsResponse = Vec<DelegatorReward>;

/// Raw account object; its shape depends on the account type.
pub type Account = Value;

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn unknown_fields_are_preserved() {
        let balance: TokenBalance = serde_json::from_value(json!({
            "id": 1,
            "account": { "address": "tz1a" },
            "token": {
                "contract": { "alias": "kUSD", "address": "KT1K9" },
                "tokenId": "0",
                "standard": "fa1.2",
                "totalSupply": "100"
            },
            "balance": "42",
            "transfersCount": 3
        }))
        .expect("decode");
        assert_eq!(balance.balance.as_deref(), Some("42"));
        assert_eq!(balance.other.get("transfersCount"), Some(&json!(3)));
        let token = balance.token.expect("token");
        assert_eq!(token.token_id.as_deref(), Some("0"));
        assert_eq!(token.other.get("totalSupply"), Some(&json!("100")));
    }

    #[test]
    fn sparse_records_decode() {
        let op: Operation = serde_json::from_value(json!({ "type": "reveal" })).expect("op");
        assert_eq!(op.kind.as_deref(), Some("reveal"));
        assert_eq!(op.id, None);

        let ops: Vec<Operation> =
            serde_json::from_value(json!([{ "id": 5 }, { "type": "transaction" }])).expect("ops");
        assert_eq!(ops[0].kind, None);
        assert_eq!(ops[0].id, Some(5));

        let rewards: RewardsResponse =
            serde_json::from_value(json!([{ "balance": 10 }, { "cycle": 7 }])).expect("rewards");
        assert_eq!(rewards[0].cycle, None);
        assert_eq!(rewards[1].cycle, Some(7));

        let transfer: TokenTransfer = serde_json::from_value(json!({ "to": null })).expect("transfer");
        assert_eq!(transfer.to, None);
    }
}
