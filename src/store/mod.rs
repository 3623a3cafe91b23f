use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub mod models;

use models::{Balances, Beneficiary, Transaction, User};

/// Store key for the serialized user directory
pub const USERS_KEY: &str = "sb_users";
/// Store key for the serialized balances
pub const BALANCES_KEY: &str = "sb_balances";
/// Store key for the serialized transaction log
pub const TRANSACTIONS_KEY: &str = "sb_transactions";
/// Store key for the serialized beneficiary list
pub const BENEFICIARIES_KEY: &str = "sb_beneficiaries";

/// Store write errors. Reads never fail at the interface: a missing or
/// unparseable record falls back to the empty/default value.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage unavailable: {0}")]
    Unavailable(#[from] std::io::Error),

    #[error("Failed to serialize {key}: {source}")]
    Serialize {
        key: &'static str,
        source: serde_json::Error,
    },
}

/// Typed access to the persisted state records, one read/write pair per
/// record kind. Components take this injected rather than reaching for a
/// shared ambient store.
#[cfg_attr(test, mockall::automock)]
pub trait StateStore {
    fn load_users(&self) -> Vec<User>;
    fn save_users(&self, users: &[User]) -> Result<(), StoreError>;

    fn load_balances(&self) -> Balances;
    fn save_balances(&self, balances: &Balances) -> Result<(), StoreError>;

    fn load_transactions(&self) -> Vec<Transaction>;
    fn save_transactions(&self, transactions: &[Transaction]) -> Result<(), StoreError>;

    fn load_beneficiaries(&self) -> Vec<Beneficiary>;
    fn save_beneficiaries(&self, beneficiaries: &[Beneficiary]) -> Result<(), StoreError>;
}

/// File-backed store: one JSON document per record kind under a data
/// directory. The localStorage analogue of the original demo.
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Create the data directory if needed and open a store over it
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        debug!("Opened state store at {}", dir.display());
        Ok(Self { dir })
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    fn read_or<T, F>(&self, key: &'static str, fallback: F) -> T
    where
        T: DeserializeOwned,
        F: FnOnce() -> T,
    {
        let path = self.key_path(key);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No stored {}, using defaults", key);
                return fallback();
            }
            Err(e) => {
                warn!("Could not read {}: {}", key, e);
                return fallback();
            }
        };

        match serde_json::from_str(&contents) {
            Ok(value) => value,
            Err(e) => {
                warn!("Stored {} is unparseable, using defaults: {}", key, e);
                fallback()
            }
        }
    }

    fn write<T: Serialize>(&self, key: &'static str, value: &T) -> Result<(), StoreError> {
        let contents =
            serde_json::to_string(value).map_err(|source| StoreError::Serialize { key, source })?;
        fs::create_dir_all(&self.dir)?;
        fs::write(self.key_path(key), contents)?;
        debug!("Persisted {}", key);
        Ok(())
    }
}

impl StateStore for JsonFileStore {
    fn load_users(&self) -> Vec<User> {
        self.read_or(USERS_KEY, Vec::new)
    }

    fn save_users(&self, users: &[User]) -> Result<(), StoreError> {
        self.write(USERS_KEY, &users)
    }

    fn load_balances(&self) -> Balances {
        self.read_or(BALANCES_KEY, Balances::default)
    }

    fn save_balances(&self, balances: &Balances) -> Result<(), StoreError> {
        self.write(BALANCES_KEY, balances)
    }

    fn load_transactions(&self) -> Vec<Transaction> {
        self.read_or(TRANSACTIONS_KEY, Vec::new)
    }

    fn save_transactions(&self, transactions: &[Transaction]) -> Result<(), StoreError> {
        self.write(TRANSACTIONS_KEY, &transactions)
    }

    fn load_beneficiaries(&self) -> Vec<Beneficiary> {
        self.read_or(BENEFICIARIES_KEY, Vec::new)
    }

    fn save_beneficiaries(&self, beneficiaries: &[Beneficiary]) -> Result<(), StoreError> {
        self.write(BENEFICIARIES_KEY, &beneficiaries)
    }
}
