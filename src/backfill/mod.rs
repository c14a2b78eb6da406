// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Historical backfill of a height range into the durable store.
//!
//! Backfill replays a closed height interval from the remote ledger node:
//! block listings go out in sub-intervals no wider than the node's fetch
//! window, transaction searches go out per height, and both fan out under a
//! bounded concurrency cap. Every fetched record is decoded and persisted
//! with insert-if-absent writes, so a failed run can simply be re-issued
//! over the same range.
//!
//! Backfill never touches the window caches; it writes to the store only.

mod fetcher;

pub use fetcher::BackfillFetcher;
