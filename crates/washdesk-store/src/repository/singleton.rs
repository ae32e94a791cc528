//! # Singleton Repository
//!
//! A record stored at one fixed path with a default when the file is absent.

use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use washdesk_core::{Inventory, RetailPriceConfig};

use crate::error::StoreResult;
use crate::files::{read_json, write_json_atomic};

/// A type kept in a single file directly under the data root.
pub trait SingletonRecord: Serialize + DeserializeOwned + Default + Clone + Send + Sync + 'static {
    const FILE_NAME: &'static str;
}

impl SingletonRecord for Inventory {
    const FILE_NAME: &'static str = "inventory.json";
}

impl SingletonRecord for RetailPriceConfig {
    const FILE_NAME: &'static str = "retail-price-list.json";
}

/// Repository for a singleton file.
#[derive(Debug)]
pub struct Singleton<T> {
    path: PathBuf,
    lock: RwLock<()>,
    _value: std::marker::PhantomData<fn() -> T>,
}

impl<T: SingletonRecord> Singleton<T> {
    pub fn new(root: &Path) -> Self {
        Singleton {
            path: root.join(T::FILE_NAME),
            lock: RwLock::new(()),
            _value: std::marker::PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current value, or `T::default()` when the file does not exist.
    pub fn load(&self) -> StoreResult<T> {
        let _guard = self.lock.read();
        let value: Option<T> = read_json(&self.path)?;
        if value.is_none() {
            debug!(file = T::FILE_NAME, "Singleton missing, using default");
        }
        Ok(value.unwrap_or_default())
    }

    pub fn save(&self, value: &T) -> StoreResult<()> {
        let _guard = self.lock.write();
        write_json_atomic(&self.path, value)
    }
}
