//! lakescan: sliding-window ledger caches and historical backfill.
//!
//! The crate keeps the most recent blocks and transactions of a
//! Tendermint-style chain in fixed-capacity in-memory windows, refreshed
//! from a durable store as new blocks land, and replays historical height
//! ranges from the remote node into that store with bounded concurrency.

pub mod backfill;
pub mod cache;
pub mod config;
mod config_types;
pub mod errors;
pub mod rpc;
mod spans;
pub mod store;
pub mod types;

pub use backfill::BackfillFetcher;
pub use cache::{BlockWindowCache, CacheLookup, CacheRefresher, CacheStats, TxWindowCache};
pub use config::{LakescanConfig, LakescanConfigBuilder};
pub use config_types::{
    CacheCapacity, ChunkIterator, FetchConcurrency, FetchWindow, TransactionCount,
};
pub use errors::{
    BackfillError, CacheError, DecodeError, LakescanError, RecordKind, RpcError, StoreError,
};
pub use rpc::decode::{decode_block, decode_transaction};
pub use rpc::{LedgerRpc, RawBlock, RawBlockId, RawEvent, RawTransaction, RawTxResult};
pub use store::{MemoryStore, Store};
pub use types::block::Block;
pub use types::tx::{Transaction, TxFilter, TxResult};
