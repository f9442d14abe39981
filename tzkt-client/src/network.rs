//! Supported Tezos networks.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A Tezos network with a TzKT deployment.
///
/// Parses from either the chain id (`"NetXdQprcVkpaWU"`) or the lowercase
/// name (`"mainnet"`). Serialises as the name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NetworkId {
    /// Tezos mainnet.
    Mainnet,
    /// Jakartanet protocol testnet.
    Jakartanet,
    /// Ghostnet long-running testnet.
    Ghostnet,
    /// DCP mainnet.
    Dcp,
    /// DCP testnet.
    DcpTest,
}

impl NetworkId {
    /// Every supported network.
    pub const ALL: [Self; 5] = [
        Self::Mainnet,
        Self::Jakartanet,
        Self::Ghostnet,
        Self::Dcp,
        Self::DcpTest,
    ];

    /// Base58 chain id as reported by the node.
    #[must_use]
    pub const fn chain_id(self) -> &'static str {
        match self {
            Self::Mainnet => "NetXdQprcVkpaWU",
            Self::Jakartanet => "NetXLH1uAxK7CCh",
            Self::Ghostnet => "NetXnHfVqm9iesp",
            Self::Dcp => "NetXooyhiru73tk",
            Self::DcpTest => "NetXX7Tz1sK8JTa",
        }
    }

    /// Lowercase human name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Jakartanet => "jakartanet",
            Self::Ghostnet => "ghostnet",
            Self::Dcp => "dcp",
            Self::DcpTest => "dcp-test",
        }
    }

    /// Returns `true` if `value` names a supported network.
    #[must_use]
    pub fn is_known(value: &str) -> bool {
        value.parse::<Self>().is_ok()
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a string names no supported network.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown network: {0}")]
pub struct UnknownNetwork(pub String);

impl FromStr for NetworkId {
    type Err = UnknownNetwork;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.chain_id() == s || id.name() == s)
            .ok_or_else(|| UnknownNetwork(s.to_owned()))
    }
}

impl Serialize for NetworkId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for NetworkId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_chain_id_and_name() {
        assert_eq!("NetXdQprcVkpaWU".parse(), Ok(NetworkId::Mainnet));
        assert_eq!("ghostnet".parse(), Ok(NetworkId::Ghostnet));
        assert_eq!("dcp-test".parse(), Ok(NetworkId::DcpTest));
    }

    #[test]
    fn rejects_unknown_values() {
        assert!(!NetworkId::is_known("NetXunknown1234"));
        assert!(!NetworkId::is_known("Mainnet"));
        assert!(!NetworkId::is_known(""));
        assert_eq!(
            "limanet".parse::<NetworkId>(),
            Err(UnknownNetwork("limanet".to_owned()))
        );
    }

    #[test]
    fn chain_ids_round_trip() {
        for id in NetworkId::ALL {
            assert_eq!(id.chain_id().parse(), Ok(id));
            assert_eq!(id.to_string().parse(), Ok(id));
        }
    }
}
