//! Configuration for lakescan operations
//!
//! This module provides the configuration consumed by the cache and backfill
//! layers: window cache capacities, the remote service's per-request height
//! window, transaction search paging, backfill concurrency, and the refresh
//! poll interval.
//!
//! # Example: Using defaults
//!
//! ```rust
//! use lakescan::LakescanConfig;
//!
//! // Tendermint-compatible defaults: 20-height fetch window, 100-tx search pages
//! let config = LakescanConfig::default();
//! ```
//!
//! # Example: Custom configuration
//!
//! ```rust
//! use lakescan::LakescanConfigBuilder;
//! use std::time::Duration;
//!
//! let config = LakescanConfigBuilder::new()
//!     .block_cache_capacity(50)
//!     .tx_cache_capacity(500)
//!     .fetch_concurrency(4)
//!     .refresh_interval(Duration::from_secs(5))
//!     .build();
//! ```

use std::time::Duration;

use crate::config_types::{CacheCapacity, FetchConcurrency, FetchWindow};

/// Configuration for lakescan operations
///
/// Controls cache sizing and remote fetch behavior. Use
/// [`LakescanConfigBuilder`] for a fluent API to construct instances.
#[derive(Debug, Clone)]
pub struct LakescanConfig {
    /// Capacity of the recent-blocks window cache
    /// Default: 100 blocks
    pub block_cache_capacity: CacheCapacity,

    /// Capacity of the recent-transactions window cache
    /// Default: 200 transactions
    pub tx_cache_capacity: CacheCapacity,

    /// Maximum heights per remote block-range request
    /// Default: 20 (the remote service's hard limit)
    pub fetch_window: FetchWindow,

    /// Page size for per-height transaction searches
    /// Default: 100 (the remote service's maximum per_page)
    pub search_page_size: u64,

    /// Concurrency cap for backfill fan-out
    /// Default: 8 in-flight requests
    pub fetch_concurrency: FetchConcurrency,

    /// Fallback poll interval for the cache refresh loop
    /// Default: 5 seconds (roughly one block time)
    pub refresh_interval: Duration,
}

impl Default for LakescanConfig {
    fn default() -> Self {
        Self {
            block_cache_capacity: CacheCapacity::BLOCKS_DEFAULT,
            tx_cache_capacity: CacheCapacity::TXS_DEFAULT,
            fetch_window: FetchWindow::DEFAULT,
            search_page_size: 100,
            fetch_concurrency: FetchConcurrency::DEFAULT,
            refresh_interval: Duration::from_secs(5),
        }
    }
}

/// Builder for [`LakescanConfig`]
///
/// # Example
///
/// ```rust
/// use lakescan::LakescanConfigBuilder;
///
/// let config = LakescanConfigBuilder::new()
///     .block_cache_capacity(50)
///     .fetch_window(10)
///     .build();
///
/// assert_eq!(config.block_cache_capacity.as_usize(), 50);
/// assert_eq!(config.fetch_window.as_u64(), 10);
/// ```
pub struct LakescanConfigBuilder {
    config: LakescanConfig,
}

impl Default for LakescanConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LakescanConfigBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            config: LakescanConfig::default(),
        }
    }

    /// Set the block window cache capacity
    pub fn block_cache_capacity(mut self, capacity: usize) -> Self {
        self.config.block_cache_capacity = CacheCapacity::new(capacity);
        self
    }

    /// Set the transaction window cache capacity
    pub fn tx_cache_capacity(mut self, capacity: usize) -> Self {
        self.config.tx_cache_capacity = CacheCapacity::new(capacity);
        self
    }

    /// Set the per-request height window for remote block listing
    ///
    /// Must not exceed what the remote service accepts; Tendermint-style
    /// nodes reject ranges wider than 20 heights.
    pub fn fetch_window(mut self, heights: u64) -> Self {
        self.config.fetch_window = FetchWindow::new(heights);
        self
    }

    /// Set the per-height transaction search page size
    pub fn search_page_size(mut self, per_page: u64) -> Self {
        self.config.search_page_size = per_page;
        self
    }

    /// Set the backfill concurrency cap
    pub fn fetch_concurrency(mut self, requests: usize) -> Self {
        self.config.fetch_concurrency = FetchConcurrency::new(requests);
        self
    }

    /// Set the fallback poll interval for the refresh loop
    pub fn refresh_interval(mut self, interval: Duration) -> Self {
        self.config.refresh_interval = interval;
        self
    }

    /// Build the final configuration
    pub fn build(self) -> LakescanConfig {
        self.config
    }
}
