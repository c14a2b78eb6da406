// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Domain records for lakescan.
//!
//! This module provides the two persisted record shapes and their lookup
//! filter:
//! - Block records (identity key: height)
//! - Transaction records (identity key: hash)
//! - Equality filters over transaction fields

pub mod block;
pub mod tx;

// Note: Public types are re-exported from lib.rs, not here
