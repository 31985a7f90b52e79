// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Durable key-value storage for the entity collections and the profile.
//!
//! The store holds JSON strings under logical keys and knows nothing about
//! business rules. Dates round-trip as ISO-8601 text through chrono's serde
//! impls, so `read_key(write_key(x)) == x` for every stored entity.

use crate::error::{LedgerError, Result};
use crate::models::{Account, Transaction};
use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

pub mod keys {
    /// Accounts and transactions live in one document so a balance change
    /// and the transaction that caused it commit in a single write.
    pub const LEDGER: &str = "ledger";
    pub const BUDGETS: &str = "budgets";
    pub const GOALS: &str = "goals";
    pub const CATEGORIES: &str = "categories";
    pub const PROFILE: &str = "profile";
}

/// Durable form of the balance-coupled pair. Splitting these across two keys
/// would let a crash or backend failure persist one without the other.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerDoc {
    pub accounts: Vec<Account>,
    pub transactions: Vec<Transaction>,
}

/// The only storage surface the engine touches. Implementations perform pure
/// get/set; failures surface as `LedgerError::Storage` and the engine rolls
/// back whatever it had applied optimistically.
pub trait KeyValue {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Deserialize the value under `key`, or return `T::default()` when the key
/// has never been written.
pub fn read_key<T: DeserializeOwned + Default>(store: &dyn KeyValue, key: &str) -> Result<T> {
    match store.get(key)? {
        Some(raw) => Ok(serde_json::from_str(&raw)?),
        None => Ok(T::default()),
    }
}

pub fn read_key_opt<T: DeserializeOwned>(store: &dyn KeyValue, key: &str) -> Result<Option<T>> {
    match store.get(key)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

pub fn write_key<T: Serialize>(store: &mut dyn KeyValue, key: &str, value: &T) -> Result<()> {
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw)
}

/// One `<key>.json` file per logical key under a data directory.
pub struct JsonDirStore {
    root: PathBuf,
}

impl JsonDirStore {
    /// Open (creating if needed) the platform-specific data directory.
    pub fn open_default() -> Result<Self> {
        let proj = ProjectDirs::from("com.alphavelocity", "Pocketledger", "pocketledger")
            .ok_or_else(|| {
                LedgerError::Storage("Could not determine platform-specific data dir".into())
            })?;
        Self::open_at(proj.data_dir().to_path_buf())
    }

    pub fn open_at(root: PathBuf) -> Result<Self> {
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }
}

impl KeyValue for JsonDirStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        // Write-then-rename so a crash mid-write never truncates a collection.
        let path = self.path_for(key);
        let tmp = self.root.join(format!("{}.json.tmp", key));
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemStore {
    map: HashMap<String, String>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValue for MemStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.map.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.map.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
