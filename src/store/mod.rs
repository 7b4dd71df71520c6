//! Append-only record store for user submissions and solar data.
//!
//! The store behaves like a log, not a queryable database: three record
//! families (address, browser metadata, solar data) support append and
//! full-range read only. All filtering (freshness windows, postal-code
//! matching) happens client-side in the service layer.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Service Layer (services/) - resolver, submission        │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  RecordStore Trait - append / read-all per family        │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌───────────────┴──────────────────┐
//!     │  LocalStore        SheetsStore   │
//!     │  (in-memory)       (HTTP rows)   │
//!     └──────────────────────────────────┘
//! ```

#[cfg(not(any(feature = "sheets-store", feature = "local-store")))]
compile_error!("Enable at least one record store backend feature.");

pub mod error;
pub mod rows;

#[cfg(feature = "local-store")]
pub mod local;

#[cfg(feature = "sheets-store")]
pub mod config;
#[cfg(feature = "sheets-store")]
pub mod sheets;

pub use error::{ErrorContext, StoreError, StoreResult};

#[cfg(feature = "local-store")]
pub use local::LocalStore;

#[cfg(feature = "sheets-store")]
pub use config::SheetsConfig;
#[cfg(feature = "sheets-store")]
pub use sheets::SheetsStore;

use async_trait::async_trait;

use crate::api::{Address, AddressRecord, BrowserMeta, SolarRecord, UserId};

/// Append-only store over the three record families.
///
/// Rows are never updated or deleted; "the current record" is a property the
/// caller derives by scanning. Implementations must be `Send + Sync`.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Append an address record for a user.
    async fn append_address(&self, user_id: &UserId, address: &Address) -> StoreResult<()>;

    /// Append a browser-metadata record for a user.
    async fn append_browser_meta(
        &self,
        user_id: &UserId,
        meta: &BrowserMeta,
        client_ip: &str,
    ) -> StoreResult<()>;

    /// Append a computed solar-data record.
    async fn append_solar_record(&self, record: &SolarRecord) -> StoreResult<()>;

    /// Read every address record, in append order.
    async fn read_all_addresses(&self) -> StoreResult<Vec<AddressRecord>>;

    /// Read every solar-data record, in append order.
    async fn read_all_solar_records(&self) -> StoreResult<Vec<SolarRecord>>;
}
