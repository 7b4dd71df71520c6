//! In-memory append-only store for unit testing and local development.

use async_trait::async_trait;
use parking_lot::RwLock;

use super::{rows, RecordStore, StoreResult};
use crate::api::{Address, AddressRecord, BrowserMeta, SolarRecord, UserId};

/// In-memory [`RecordStore`] holding raw rows, mirroring the sheet layout so
/// the same codecs are exercised as against the live backend.
#[derive(Default)]
pub struct LocalStore {
    addresses: RwLock<Vec<Vec<String>>>,
    browser_meta: RwLock<Vec<Vec<String>>>,
    solar: RwLock<Vec<Vec<String>>>,
}

impl LocalStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows per family, for assertions in tests.
    pub fn row_counts(&self) -> (usize, usize, usize) {
        (
            self.addresses.read().len(),
            self.browser_meta.read().len(),
            self.solar.read().len(),
        )
    }
}

#[async_trait]
impl RecordStore for LocalStore {
    async fn append_address(&self, user_id: &UserId, address: &Address) -> StoreResult<()> {
        self.addresses
            .write()
            .push(rows::encode_address(user_id, address));
        Ok(())
    }

    async fn append_browser_meta(
        &self,
        user_id: &UserId,
        meta: &BrowserMeta,
        client_ip: &str,
    ) -> StoreResult<()> {
        self.browser_meta
            .write()
            .push(rows::encode_browser_meta(user_id, meta, client_ip));
        Ok(())
    }

    async fn append_solar_record(&self, record: &SolarRecord) -> StoreResult<()> {
        self.solar.write().push(rows::encode_solar_record(record));
        Ok(())
    }

    async fn read_all_addresses(&self) -> StoreResult<Vec<AddressRecord>> {
        Ok(self
            .addresses
            .read()
            .iter()
            .filter_map(|row| rows::decode_address(row))
            .collect())
    }

    async fn read_all_solar_records(&self) -> StoreResult<Vec<SolarRecord>> {
        Ok(self
            .solar
            .read()
            .iter()
            .filter_map(|row| rows::decode_solar_record(row))
            .collect())
    }
}
