//! Shared test fixtures: mock collaborators and record seeding helpers.
#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;

use solar_potential::api::{
    Address, AddressRecord, BrowserMeta, Coordinates, IrradianceSeries, IrradianceSummary,
    SolarRecord, UserId,
};
use solar_potential::providers::{
    GeocodingService, IrradianceDataProvider, ProviderResult, TimeZoneResolver,
};
use solar_potential::store::{RecordStore, StoreError, StoreResult};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn address(postal_code: &str) -> Address {
    Address {
        street: "1 Main St".to_string(),
        city: "Springfield".to_string(),
        state: "IL".to_string(),
        postal_code: postal_code.to_string(),
        country: "USA".to_string(),
    }
}

pub fn coords() -> Coordinates {
    Coordinates {
        latitude: 39.8,
        longitude: -89.6,
    }
}

/// Small two-channel series with one sentinel sample in the all-sky channel.
pub fn sample_series() -> IrradianceSeries {
    let mut all_sky = BTreeMap::new();
    all_sky.insert(date(2023, 1, 1), 5.0);
    all_sky.insert(date(2023, 1, 2), -999.0);
    all_sky.insert(date(2023, 2, 1), 6.0);

    let mut clear_sky = BTreeMap::new();
    clear_sky.insert(date(2023, 1, 1), 7.0);
    clear_sky.insert(date(2023, 2, 1), 8.0);

    IrradianceSeries { all_sky, clear_sky }
}

/// A complete summary as the aggregator would emit it, with coordinates.
pub fn sample_summary() -> IrradianceSummary {
    IrradianceSummary {
        avg_all_sky: Some(5.5),
        avg_clear_sky: Some(7.5),
        monthly_all_sky: [0.0; 12],
        monthly_clear_sky: [0.0; 12],
        all_sky_quality: 0.6667,
        clear_sky_quality: 1.0,
        best_all_sky: Some(6.0),
        worst_all_sky: Some(5.0),
        best_clear_sky: Some(8.0),
        worst_clear_sky: Some(7.0),
        latitude: Some(39.8),
        longitude: Some(-89.6),
        period_start: date(2022, 1, 1),
        period_end: date(2024, 12, 31),
    }
}

pub fn solar_record(user_id: &str, summary_json: String, computed: NaiveDate) -> SolarRecord {
    SolarRecord {
        user_id: UserId::new(user_id),
        summary_json,
        time_zone: Some("Etc/GMT+6".to_string()),
        source: "nasa_power".to_string(),
        computed_date: computed,
    }
}

/// Geocoder returning fixed coordinates and counting calls.
pub struct MockGeocoder {
    pub coords: Coordinates,
    pub calls: AtomicUsize,
}

impl MockGeocoder {
    pub fn new(coords: Coordinates) -> Self {
        Self {
            coords,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GeocodingService for MockGeocoder {
    async fn geocode(&self, _address: &str) -> ProviderResult<Coordinates> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.coords)
    }
}

/// Irradiance provider returning a fixed series and counting calls.
pub struct MockIrradianceProvider {
    pub series: IrradianceSeries,
    pub calls: AtomicUsize,
}

impl MockIrradianceProvider {
    pub fn new(series: IrradianceSeries) -> Self {
        Self {
            series,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IrradianceDataProvider for MockIrradianceProvider {
    async fn fetch_daily(
        &self,
        _coords: Coordinates,
        _start: NaiveDate,
        _end: NaiveDate,
    ) -> ProviderResult<IrradianceSeries> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.series.clone())
    }

    fn source_label(&self) -> &str {
        "nasa_power"
    }
}

/// Time-zone resolver returning a fixed identifier.
pub struct FixedTimeZone(pub Option<String>);

impl TimeZoneResolver for FixedTimeZone {
    fn resolve(&self, _coords: Coordinates) -> Option<String> {
        self.0.clone()
    }
}

/// Store wrapper whose solar-record appends always fail, for testing that a
/// live resolution survives a persistence failure.
pub struct FailingAppendStore<S> {
    pub inner: S,
}

#[async_trait]
impl<S: RecordStore> RecordStore for FailingAppendStore<S> {
    async fn append_address(&self, user_id: &UserId, address: &Address) -> StoreResult<()> {
        self.inner.append_address(user_id, address).await
    }

    async fn append_browser_meta(
        &self,
        user_id: &UserId,
        meta: &BrowserMeta,
        client_ip: &str,
    ) -> StoreResult<()> {
        self.inner.append_browser_meta(user_id, meta, client_ip).await
    }

    async fn append_solar_record(&self, _record: &SolarRecord) -> StoreResult<()> {
        Err(StoreError::backend("append rejected by test store"))
    }

    async fn read_all_addresses(&self) -> StoreResult<Vec<AddressRecord>> {
        self.inner.read_all_addresses().await
    }

    async fn read_all_solar_records(&self) -> StoreResult<Vec<SolarRecord>> {
        self.inner.read_all_solar_records().await
    }
}
