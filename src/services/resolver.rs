//! Cached solar lookup resolution.
//!
//! For a (user, address) pair the resolver decides which irradiance summary
//! and time zone to use, minimizing live fetches while respecting a 30-day
//! freshness window. Lookup order:
//!
//! 1. the requesting user's own most recent solar record, if fresh;
//! 2. a fresh record from any user sharing the address postal code;
//! 3. a live fetch (geocode, irradiance fetch, aggregation, time-zone
//!    resolution), persisted for later requests.
//!
//! Tiers 1 and 2 are read-only; only tier 3 writes. A failed write after a
//! live fetch is logged and tolerated, the freshly computed summary still
//! serves the current request.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{Duration, NaiveDate, Utc};
use tracing::{error, info, warn};

use crate::api::{
    Address, IrradianceSummary, ResolutionSource, ResolvedSolar, SolarRecord, UserId,
};
use crate::providers::{
    GeocodingService, IrradianceDataProvider, ProviderError, TimeZoneResolver,
};
use crate::services::aggregate;
use crate::store::{RecordStore, StoreError};

/// Maximum age for a stored solar summary to be reused without re-fetching.
pub const FRESHNESS_WINDOW_DAYS: i64 = 30;

/// Result type for resolution operations.
pub type ResolveResult<T> = Result<T, ResolveError>;

/// Error taxonomy for the resolution pipeline.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// Malformed address or system parameters.
    #[error("invalid input: {0}")]
    Input(String),

    /// Unknown user id or unresolvable address.
    #[error("not found: {0}")]
    NotFound(String),

    /// The geocoder or irradiance provider exceeded its deadline.
    /// Retryable by the caller; never retried internally.
    #[error("upstream timeout: {0}")]
    UpstreamTimeout(String),

    /// Any other external-service failure.
    #[error("upstream error: {0}")]
    Upstream(String),

    /// The store returned a record missing required fields. The resolver
    /// fails loudly rather than computing from partial data.
    #[error("data integrity: {0}")]
    DataIntegrity(String),

    /// Record store failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ResolveError {
    pub fn input(message: impl Into<String>) -> Self {
        Self::Input(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn data_integrity(message: impl Into<String>) -> Self {
        Self::DataIntegrity(message.into())
    }
}

impl From<ProviderError> for ResolveError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::NotFound(msg) => ResolveError::NotFound(msg),
            ProviderError::Timeout(msg) => ResolveError::UpstreamTimeout(msg),
            ProviderError::Service(msg) => ResolveError::Upstream(msg),
        }
    }
}

/// Resolves solar summaries through the cache/fallback chain.
///
/// All collaborators are injected; the resolver holds no global state and
/// performs no cross-request coordination (concurrent duplicate fetches for
/// one postal code are tolerated by design of the append-only store).
pub struct SolarLookupResolver {
    store: Arc<dyn RecordStore>,
    geocoder: Arc<dyn GeocodingService>,
    irradiance: Arc<dyn IrradianceDataProvider>,
    timezones: Arc<dyn TimeZoneResolver>,
}

impl SolarLookupResolver {
    pub fn new(
        store: Arc<dyn RecordStore>,
        geocoder: Arc<dyn GeocodingService>,
        irradiance: Arc<dyn IrradianceDataProvider>,
        timezones: Arc<dyn TimeZoneResolver>,
    ) -> Self {
        Self {
            store,
            geocoder,
            irradiance,
            timezones,
        }
    }

    /// Whether a record computed on `computed` may be reused on `today`.
    fn is_fresh(computed: NaiveDate, today: NaiveDate) -> bool {
        (today - computed).num_days() < FRESHNESS_WINDOW_DAYS
    }

    /// Fetch window for a live request: roughly three years of history
    /// ending one year in the past, where the archive is complete.
    fn fetch_window(today: NaiveDate) -> (NaiveDate, NaiveDate) {
        let end = today - Duration::days(365);
        let start = end - Duration::days(365 * 3);
        (start, end)
    }

    /// Resolve the stored address for a user, then resolve solar data for it.
    ///
    /// # Errors
    /// `ResolveError::NotFound` when no address record exists for the user.
    pub async fn resolve_for_user(&self, user_id: &UserId) -> ResolveResult<ResolvedSolar> {
        let addresses = self.store.read_all_addresses().await?;
        let record = addresses
            .into_iter()
            .find(|r| &r.user_id == user_id)
            .ok_or_else(|| {
                ResolveError::not_found(format!("no address record for user {}", user_id))
            })?;
        self.resolve(user_id, &record.address).await
    }

    /// Resolve an irradiance summary and time zone for a (user, address)
    /// pair via the three-tier chain.
    pub async fn resolve(
        &self,
        user_id: &UserId,
        address: &Address,
    ) -> ResolveResult<ResolvedSolar> {
        let today = Utc::now().date_naive();
        let solar_records = self.store.read_all_solar_records().await?;

        // Tier 1: the user's own records, most recent first.
        let mut own: Vec<&SolarRecord> = solar_records
            .iter()
            .filter(|r| &r.user_id == user_id && Self::is_fresh(r.computed_date, today))
            .collect();
        own.sort_by(|a, b| b.computed_date.cmp(&a.computed_date));
        for record in own {
            if let Some(resolved) = Self::cached_hit(record, "user")? {
                info!(user = %user_id, "reusing user's own solar record");
                return Ok(resolved);
            }
        }

        // Tier 2: fresh records of users sharing the postal code. Address
        // rows define the candidate set, solar rows are scanned in store
        // order, so the selection is deterministic for a store snapshot.
        let addresses = self.store.read_all_addresses().await?;
        let neighbors: HashSet<&UserId> = addresses
            .iter()
            .filter(|r| r.address.postal_code == address.postal_code)
            .map(|r| &r.user_id)
            .collect();
        for record in solar_records
            .iter()
            .filter(|r| neighbors.contains(&r.user_id) && Self::is_fresh(r.computed_date, today))
        {
            if let Some(resolved) = Self::cached_hit(record, "postal_code")? {
                info!(
                    user = %user_id,
                    postal_code = %address.postal_code,
                    neighbor = %record.user_id,
                    "reusing solar record shared via postal code"
                );
                return Ok(resolved);
            }
        }

        // Tier 3: live fetch. The only tier with side effects.
        self.fetch_live(user_id, address, today).await
    }

    /// Decode a cached record. Unparseable summaries are skipped (logged,
    /// `Ok(None)`); a parseable summary without coordinates is fatal.
    fn cached_hit(record: &SolarRecord, tier: &str) -> ResolveResult<Option<ResolvedSolar>> {
        let summary: IrradianceSummary = match serde_json::from_str(&record.summary_json) {
            Ok(summary) => summary,
            Err(e) => {
                error!(
                    user = %record.user_id,
                    tier,
                    error = %e,
                    "failed to parse stored solar summary; skipping record"
                );
                return Ok(None);
            }
        };

        if summary.latitude.is_none() || summary.longitude.is_none() {
            return Err(ResolveError::data_integrity(format!(
                "stored solar record for user {} has no coordinates",
                record.user_id
            )));
        }

        Ok(Some(ResolvedSolar {
            summary,
            time_zone: record.time_zone.clone(),
            source: ResolutionSource::Cache,
        }))
    }

    async fn fetch_live(
        &self,
        user_id: &UserId,
        address: &Address,
        today: NaiveDate,
    ) -> ResolveResult<ResolvedSolar> {
        let coords = self.geocoder.geocode(&address.to_query()).await?;
        let (start, end) = Self::fetch_window(today);
        let series = self.irradiance.fetch_daily(coords, start, end).await?;
        let summary = aggregate::summarize_series(&series, coords, (start, end));
        let time_zone = self.timezones.resolve(coords);

        let summary_json = serde_json::to_string(&summary)
            .map_err(|e| ResolveError::data_integrity(format!("summary serialization: {}", e)))?;
        let record = SolarRecord {
            user_id: user_id.clone(),
            summary_json,
            time_zone: time_zone.clone(),
            source: self.irradiance.source_label().to_string(),
            computed_date: today,
        };

        // Persistence failure must not fail the resolution; the computed
        // summary still serves this response.
        if let Err(e) = self.store.append_solar_record(&record).await {
            warn!(
                user = %user_id,
                error = %e,
                "failed to persist freshly computed solar record"
            );
        } else {
            info!(user = %user_id, source = %record.source, "persisted new solar record");
        }

        Ok(ResolvedSolar {
            summary,
            time_zone,
            source: ResolutionSource::Live,
        })
    }
}
