//! Caller-facing query parameters.
//!
//! Each record is borrowed by exactly one transform in [`crate::transform`].
//! Fields a transform does not map are forwarded under their own names; see
//! [`OperationsParams::rest`].

use std::fmt;

use crate::query::{QueryString, QueryValue};

/// Parameters shared by the account, operation, transfer and balance queries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationsParams {
    /// Subject account address. Always consumed by the transform.
    pub address: String,
    /// Operation or transfer types; sent comma-joined as `type`.
    pub kind: Option<Vec<String>>,
    /// Quote currencies; sent comma-joined as `quote`.
    pub quote: Option<Vec<String>>,
    /// Inclusive lower time bound (ISO 8601).
    pub from: Option<String>,
    /// Exclusive upper time bound (ISO 8601).
    pub to: Option<String>,
    /// Maximum number of items.
    pub limit: Option<u32>,
    /// Number of items to skip.
    pub offset: Option<u32>,
    /// Cursor: only items with a greater id.
    pub last_id: Option<u64>,
    /// Additional indexer parameters, applied last.
    pub extra: QueryString,
}

/// Keys of [`OperationsParams`] fields as sent when not remapped.
pub(crate) mod field {
    pub const TYPE: &str = "type";
    pub const QUOTE: &str = "quote";
    pub const FROM: &str = "from";
    pub const TO: &str = "to";
    pub const LIMIT: &str = "limit";
    pub const OFFSET: &str = "offset";
    pub const LAST_ID: &str = "lastId";
}

impl OperationsParams {
    /// Parameters for `address` with everything else unset.
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            ..Self::default()
        }
    }

    /// Every field except `address` and the `consumed` keys, under its own
    /// name, followed by [`Self::extra`].
    pub(crate) fn rest(&self, consumed: &[&str]) -> QueryString {
        let mut rest = QueryString::new();
        rest.insert_opt(field::TYPE, join(self.kind.as_deref()))
            .insert_opt(field::QUOTE, join(self.quote.as_deref()))
            .insert_opt(field::FROM, self.from.as_deref())
            .insert_opt(field::TO, self.to.as_deref())
            .insert_opt(field::LIMIT, self.limit)
            .insert_opt(field::OFFSET, self.offset)
            .insert_opt(field::LAST_ID, self.last_id);
        for key in consumed {
            rest.remove(key);
        }
        rest.extend(self.extra.clone());
        rest
    }
}

/// Sort direction of a sorted query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

impl SortDirection {
    /// Dialect suffix, as in `sort.asc`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Integer filter on the reward cycle; each set bound becomes
/// `cycle.<bound>`, list bounds comma-joined.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleFilter {
    /// Equal to.
    pub eq: Option<i32>,
    /// Not equal to.
    pub ne: Option<i32>,
    /// Greater than.
    pub gt: Option<i32>,
    /// Greater than or equal to.
    pub gte: Option<i32>,
    /// Less than.
    pub lt: Option<i32>,
    /// Less than or equal to.
    pub lte: Option<i32>,
    /// One of (`cycle.in`).
    pub in_: Option<Vec<i32>>,
    /// None of (`cycle.ni`).
    pub ni: Option<Vec<i32>>,
}

impl CycleFilter {
    /// `(bound, value)` pairs in a fixed order; unset bounds are `None`.
    #[must_use]
    pub const fn bounds(&self) -> [(&'static str, Option<i32>); 6] {
        [
            ("eq", self.eq),
            ("ne", self.ne),
            ("gt", self.gt),
            ("gte", self.gte),
            ("lt", self.lt),
            ("lte", self.lte),
        ]
    }

    /// `(bound, comma-joined values)` pairs of the list bounds.
    #[must_use]
    pub fn lists(&self) -> [(&'static str, Option<String>); 2] {
        let joined = |values: Option<&[i32]>| {
            values.map(|v| {
                v.iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(",")
            })
        };
        [
            ("in", joined(self.in_.as_deref())),
            ("ni", joined(self.ni.as_deref())),
        ]
    }
}

/// Parameters of the delegator rewards query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewardsParams {
    /// Delegator address.
    pub address: String,
    /// Cycle range.
    pub cycle: CycleFilter,
    /// Sort by cycle in this direction.
    pub sort: Option<SortDirection>,
    /// Quote currencies; sent comma-joined.
    pub quote: Option<Vec<String>>,
    /// Maximum number of items.
    pub limit: Option<u32>,
    /// Number of items to skip.
    pub offset: Option<u32>,
    /// Additional indexer parameters, applied last.
    pub extra: QueryString,
}

impl RewardsParams {
    /// Parameters for `address` with everything else unset.
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            ..Self::default()
        }
    }
}

/// Parameters of the related-contracts lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContractsParams {
    /// Account whose related contracts are listed.
    pub account: String,
}

impl ContractsParams {
    /// Parameters for `account`.
    pub fn new(account: impl Into<String>) -> Self {
        Self {
            account: account.into(),
        }
    }
}

/// Comma-joins a multi-valued filter; an absent list yields no value.
pub(crate) fn join(values: Option<&[String]>) -> Option<QueryValue> {
    values.map(|v| QueryValue::Str(v.join(",")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_lists_join_with_commas() {
        let filter = CycleFilter {
            in_: Some(vec![500, 501, 503]),
            ..CycleFilter::default()
        };
        assert_eq!(
            filter.lists(),
            [("in", Some("500,501,503".to_owned())), ("ni", None)]
        );
    }

    #[test]
    fn rest_forwards_unmapped_fields_and_drops_address() {
        let params = OperationsParams {
            kind: Some(vec!["transaction".into(), "delegation".into()]),
            from: Some("2022-01-01T00:00:00Z".into()),
            limit: Some(10),
            last_id: Some(42),
            ..OperationsParams::new("tz1subject")
        };
        let rest = params.rest(&[field::FROM]);
        assert_eq!(rest.get_str("type").as_deref(), Some("transaction,delegation"));
        assert_eq!(rest.get_str("limit").as_deref(), Some("10"));
        assert_eq!(rest.get_str("lastId").as_deref(), Some("42"));
        assert!(!rest.contains_key("from"));
        assert!(!rest.contains_key("address"));
        assert!(!rest.contains_key("quote"));
    }

    #[test]
    fn extra_overrides_forwarded_fields() {
        let mut params = OperationsParams::new("tz1subject");
        params.limit = Some(10);
        params.extra.insert("limit", 5_u32).insert("sort.desc", "id");
        let rest = params.rest(&[]);
        assert_eq!(rest.get_str("limit").as_deref(), Some("5"));
        assert_eq!(rest.get_str("sort.desc").as_deref(), Some("id"));
    }

    #[test]
    fn join_of_empty_list_is_empty_string() {
        let empty: Vec<String> = Vec::new();
        assert_eq!(
            join(Some(empty.as_slice())),
            Some(QueryValue::Str(String::new()))
        );
        assert_eq!(join(None), None);
    }
}
