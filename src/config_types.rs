// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Strong types for lakescan configuration values.
//!
//! Newtype wrappers prevent mixing up the several small integers that drive
//! the cache and backfill layers: window cache capacities, the remote
//! service's per-request height window, and the backfill concurrency cap.

use std::ops::Add;

use serde::{Deserialize, Serialize};

/// Maximum number of heights the remote ledger service accepts per
/// block-range request.
///
/// Backfill splits arbitrary height intervals into chunks of at most this
/// size before issuing remote calls.
///
/// # Examples
///
/// ```
/// use lakescan::FetchWindow;
///
/// // Tendermint-style nodes cap range queries at 20 heights
/// let window = FetchWindow::DEFAULT;
///
/// let chunks: Vec<_> = window.chunk_range(1, 45).collect();
/// assert_eq!(chunks, vec![(1, 20), (21, 40), (41, 45)]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FetchWindow(u64);

impl FetchWindow {
    /// The hard limit of Tendermint-style `blockchain` range queries
    pub const DEFAULT: Self = Self(20);

    /// Create a new fetch window
    ///
    /// # Examples
    ///
    /// ```
    /// use lakescan::FetchWindow;
    ///
    /// let window = FetchWindow::new(10);
    /// assert_eq!(window.as_u64(), 10);
    /// ```
    pub const fn new(heights: u64) -> Self {
        Self(heights)
    }

    /// Get the inner u64 value
    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    /// Calculate number of chunks needed to cover a closed height interval
    ///
    /// # Examples
    ///
    /// ```
    /// use lakescan::FetchWindow;
    ///
    /// let window = FetchWindow::new(20);
    /// assert_eq!(window.chunks_needed(1, 45), 3); // 1-20, 21-40, 41-45
    /// assert_eq!(window.chunks_needed(45, 1), 0); // inverted interval
    /// ```
    pub fn chunks_needed(&self, from: u64, to: u64) -> usize {
        if to < from {
            return 0;
        }
        let total_heights = to - from + 1;
        total_heights.div_ceil(self.0) as usize
    }

    /// Split a closed height interval into chunks
    ///
    /// Returns an iterator of `(from, to)` tuples, each spanning at most
    /// `self.0` heights. An inverted interval yields no chunks.
    ///
    /// # Examples
    ///
    /// ```
    /// use lakescan::FetchWindow;
    ///
    /// let window = FetchWindow::new(20);
    /// let chunks: Vec<_> = window.chunk_range(100, 149).collect();
    ///
    /// assert_eq!(chunks.len(), 3);
    /// assert_eq!(chunks[0], (100, 119));
    /// assert_eq!(chunks[1], (120, 139));
    /// assert_eq!(chunks[2], (140, 149));
    /// ```
    pub fn chunk_range(&self, from: u64, to: u64) -> ChunkIterator {
        ChunkIterator {
            current: from,
            end: to,
            chunk_size: self.0,
        }
    }
}

impl Default for FetchWindow {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<u64> for FetchWindow {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for FetchWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} heights", self.0)
    }
}

/// Iterator over height interval chunks
///
/// Created by [`FetchWindow::chunk_range`]. Yields `(from, to)` tuples
/// representing closed sub-intervals.
#[derive(Debug, Clone)]
pub struct ChunkIterator {
    current: u64,
    end: u64,
    chunk_size: u64,
}

impl Iterator for ChunkIterator {
    type Item = (u64, u64);

    fn next(&mut self) -> Option<Self::Item> {
        if self.current > self.end {
            return None;
        }

        let chunk_start = self.current;
        let chunk_end = (self.current + self.chunk_size - 1).min(self.end);

        self.current = chunk_end + 1;

        Some((chunk_start, chunk_end))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.current > self.end {
            (0, Some(0))
        } else {
            let remaining = self.end - self.current + 1;
            let chunks = remaining.div_ceil(self.chunk_size) as usize;
            (chunks, Some(chunks))
        }
    }
}

impl ExactSizeIterator for ChunkIterator {}

/// Fixed capacity of a window cache.
///
/// Both the block and transaction caches hold at most this many records; the
/// oldest records slide out as new ones are prepended.
///
/// # Examples
///
/// ```
/// use lakescan::CacheCapacity;
///
/// let capacity = CacheCapacity::new(100);
/// assert_eq!(capacity.as_usize(), 100);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CacheCapacity(usize);

impl CacheCapacity {
    /// Default block cache size (most recent blocks)
    pub const BLOCKS_DEFAULT: Self = Self(100);

    /// Default transaction cache size (most recent transactions)
    pub const TXS_DEFAULT: Self = Self(200);

    /// Create a new cache capacity
    pub const fn new(records: usize) -> Self {
        Self(records)
    }

    /// Get the inner usize value
    pub const fn as_usize(&self) -> usize {
        self.0
    }
}

impl From<usize> for CacheCapacity {
    fn from(value: usize) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for CacheCapacity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} records", self.0)
    }
}

/// Maximum number of remote calls a backfill keeps in flight at once.
///
/// Backfill fan-out is bounded: chunk and per-height requests are fed
/// through a fixed-width pipeline instead of being issued all at once.
///
/// # Examples
///
/// ```
/// use lakescan::FetchConcurrency;
///
/// let limit = FetchConcurrency::DEFAULT;
/// assert_eq!(limit.as_usize(), 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FetchConcurrency(usize);

impl FetchConcurrency {
    /// Conservative default, safe for public RPC nodes
    pub const DEFAULT: Self = Self(8);

    /// Sequential fetching (one request at a time)
    pub const SERIAL: Self = Self(1);

    /// Create a new concurrency cap
    ///
    /// A zero cap is treated as [`FetchConcurrency::SERIAL`].
    pub const fn new(requests: usize) -> Self {
        if requests == 0 {
            Self::SERIAL
        } else {
            Self(requests)
        }
    }

    /// Get the inner usize value
    pub const fn as_usize(&self) -> usize {
        self.0
    }
}

impl Default for FetchConcurrency {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<usize> for FetchConcurrency {
    fn from(value: usize) -> Self {
        Self::new(value)
    }
}

impl std::fmt::Display for FetchConcurrency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} in-flight requests", self.0)
    }
}

/// Represents a count of ledger transactions
///
/// Prevents confusion between transaction counts and other numeric values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct TransactionCount(usize);

impl TransactionCount {
    /// Zero transactions
    pub const ZERO: Self = Self(0);

    /// Create a new transaction count
    pub const fn new(count: usize) -> Self {
        Self(count)
    }

    /// Get the inner usize value
    pub const fn as_usize(&self) -> usize {
        self.0
    }

    /// Check if count is zero
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl From<usize> for TransactionCount {
    fn from(value: usize) -> Self {
        Self(value)
    }
}

impl From<u64> for TransactionCount {
    fn from(value: u64) -> Self {
        Self(value as usize)
    }
}

impl Add for TransactionCount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl std::fmt::Display for TransactionCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} transactions", self.0)
    }
}
