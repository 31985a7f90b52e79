// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Error taxonomy for ledger operations.
//!
//! Every engine mutation either fully succeeds or fails with one of these;
//! there is no partial application. The CLI layer maps them to user-facing
//! messages via `anyhow` context.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, LedgerError>;

#[derive(Debug, Error)]
pub enum LedgerError {
    /// Malformed input: non-positive amount, missing required field,
    /// category/account type mismatch.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A referenced entity id does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Durable write failed. Any optimistic in-memory change has been rolled
    /// back, so the whole operation may be retried.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        LedgerError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        LedgerError::Storage(err.to_string())
    }
}
