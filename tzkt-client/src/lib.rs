//! TzKT indexer client.
//!
//! Query layer for the [TzKT](https://api.tzkt.io) REST indexer, which runs
//! one deployment per Tezos network:
//!
//! - [`registry`] — [`NetworkRegistry`] resolving a [`NetworkId`] to its
//!   indexer endpoint.
//! - [`transform`] — pure mappings from [`params`] records to the indexer's
//!   flat [`QueryString`] dialect.
//! - [`client`] — [`IndexerClient::execute`], one GET per call with every
//!   failure normalized to [`IndexerError`].
//! - [`catalog`] — the fixed set of [`QueryDef`] entries.
//! - [`paged`] — page-indexed fetchers returning empty results for networks
//!   without a deployment.
//!
//! ```no_run
//! use tzkt_client::{IndexerClient, NetworkRegistry};
//!
//! # async fn run() -> tzkt_client::Result<()> {
//! let client = IndexerClient::new(NetworkRegistry::default());
//! let balances = client
//!     .fetch_token_balances("NetXdQprcVkpaWU", "tz1VSUr8wwNhLAzempoch5d6hLRiTh8Cjcjb", Some(0))
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod network;
pub mod paged;
pub mod params;
pub mod query;
pub mod registry;
pub mod transform;
pub mod types;

pub use catalog::QueryKind;
pub use client::{IndexerClient, QueryDef};
pub use config::Config;
pub use error::{Error, IndexerError, Result};
pub use network::NetworkId;
pub use paged::{PAGE_SIZE, Page};
pub use params::{ContractsParams, CycleFilter, OperationsParams, RewardsParams, SortDirection};
pub use query::{QueryString, QueryValue};
pub use registry::NetworkRegistry;
