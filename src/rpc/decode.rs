// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Decoding remote records into lakescan's record shapes.
//!
//! The remote node is loose about numeric encoding: heights, counts, and
//! amounts arrive as JSON numbers or as decimal strings depending on the
//! endpoint. The helpers here accept both. A record that violates the
//! expected shape fails with a [`DecodeError`] (the malformed-record
//! condition), which callers treat as fatal for the enclosing fetch.

use chrono::{DateTime, Utc};

use super::{RawBlock, RawTransaction};
use crate::errors::DecodeError;
use crate::types::block::Block;
use crate::types::tx::{Transaction, TxResult};

/// Read a u64 out of a JSON value that may be a number or a decimal string.
fn value_as_u64(value: &serde_json::Value, field: &'static str) -> Result<Option<u64>, DecodeError> {
    match value {
        serde_json::Value::Null => Ok(None),
        serde_json::Value::Number(n) => n
            .as_u64()
            .map(Some)
            .ok_or_else(|| DecodeError::invalid_field(field, format!("not a u64: {n}"))),
        serde_json::Value::String(s) => s
            .parse::<u64>()
            .map(Some)
            .map_err(|_| DecodeError::invalid_field(field, format!("not numeric: {s:?}"))),
        other => Err(DecodeError::invalid_field(
            field,
            format!("unexpected type: {other}"),
        )),
    }
}

/// Read an owned string out of a JSON value, treating null as absent.
fn value_as_string(value: &serde_json::Value, field: &'static str) -> Result<Option<String>, DecodeError> {
    match value {
        serde_json::Value::Null => Ok(None),
        serde_json::Value::String(s) => Ok(Some(s.clone())),
        other => Err(DecodeError::invalid_field(
            field,
            format!("expected string, got {other}"),
        )),
    }
}

/// Decode a raw block listing entry into a [`Block`].
///
/// Extracts `height`, `time`, and `num_txs` from the header; the hash comes
/// from the block identifier; everything else stays in the opaque header
/// payload.
pub fn decode_block(raw: &RawBlock) -> Result<Block, DecodeError> {
    if raw.block_id.hash.is_empty() {
        return Err(DecodeError::missing_field("block_id.hash"));
    }

    let height = value_as_u64(&raw.header["height"], "header.height")?
        .ok_or_else(|| DecodeError::missing_field("header.height"))?;

    let time_str = value_as_string(&raw.header["time"], "header.time")?
        .ok_or_else(|| DecodeError::missing_field("header.time"))?;
    let time: DateTime<Utc> = time_str
        .parse()
        .map_err(|e| DecodeError::invalid_field("header.time", format!("{e}")))?;

    let num_txs = value_as_u64(&raw.header["num_txs"], "header.num_txs")?.unwrap_or(0);

    Ok(Block {
        height,
        hash: raw.block_id.hash.clone(),
        time,
        num_txs,
        header: raw.header.clone(),
    })
}

/// Decode a raw search result into a [`Transaction`].
///
/// Addresses fall back from the transaction body to the system `tx` event
/// tags (a submitted body may omit `from`/`to`/`payer` that execution
/// resolved); `gas_used` only exists in the tags. `time` is left unset
/// because it belongs to the containing block and is joined in by the store
/// on read.
pub fn decode_transaction(raw: &RawTransaction) -> Result<Transaction, DecodeError> {
    if raw.hash.is_empty() {
        return Err(DecodeError::missing_field("hash"));
    }

    let empty = serde_json::Value::Null;
    let tags = raw.system_tags().unwrap_or(&empty);

    let from = match value_as_string(&raw.tx["from"], "tx.from")? {
        Some(from) => Some(from),
        None => value_as_string(&tags["from"], "tags.from")?,
    };
    let to = match value_as_string(&raw.tx["to"], "tx.to")? {
        Some(to) => Some(to),
        None => value_as_string(&tags["to"], "tags.to")?,
    };
    let payer = match value_as_string(&raw.tx["payer"], "tx.payer")? {
        Some(payer) => Some(payer),
        None => value_as_string(&tags["payer"], "tags.payer")?,
    };

    let value = value_as_u64(&raw.tx["value"], "tx.value")?.unwrap_or(0);
    // The submitted body calls the gas limit `fee`
    let gas_limit = value_as_u64(&raw.tx["fee"], "tx.fee")?.unwrap_or(0);
    let nonce = value_as_u64(&raw.tx["nonce"], "tx.nonce")?.unwrap_or(0);
    let gas_used = value_as_u64(&tags["gasused"], "tags.gasused")?.unwrap_or(0);

    Ok(Transaction {
        height: raw.height,
        index: raw.index,
        hash: raw.hash.clone(),
        from,
        to,
        payer,
        value,
        gas_limit,
        gas_used,
        nonce,
        data: raw.tx["data"].clone(),
        return_value: raw.return_value.clone(),
        result: TxResult {
            code: raw.tx_result.code,
            log: raw.tx_result.log.clone(),
            data: raw.tx_result.data.clone(),
        },
        time: None,
    })
}
