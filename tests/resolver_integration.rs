//! Integration tests for the three-tier lookup resolution chain, using the
//! in-memory store and mock collaborators.
#![cfg(feature = "local-store")]

mod support;

use std::sync::Arc;

use chrono::{Duration, Utc};

use solar_potential::api::{IrradianceSummary, ResolutionSource, UserId};
use solar_potential::services::{ResolveError, SolarLookupResolver};
use solar_potential::store::{LocalStore, RecordStore};

use support::{
    address, coords, sample_series, sample_summary, solar_record, FailingAppendStore,
    FixedTimeZone, MockGeocoder, MockIrradianceProvider,
};

struct Harness {
    store: Arc<LocalStore>,
    geocoder: Arc<MockGeocoder>,
    provider: Arc<MockIrradianceProvider>,
    resolver: SolarLookupResolver,
}

fn harness() -> Harness {
    let store = Arc::new(LocalStore::new());
    let geocoder = Arc::new(MockGeocoder::new(coords()));
    let provider = Arc::new(MockIrradianceProvider::new(sample_series()));
    let resolver = SolarLookupResolver::new(
        store.clone(),
        geocoder.clone(),
        provider.clone(),
        Arc::new(FixedTimeZone(Some("Etc/GMT+6".to_string()))),
    );
    Harness {
        store,
        geocoder,
        provider,
        resolver,
    }
}

fn summary_json() -> String {
    serde_json::to_string(&sample_summary()).unwrap()
}

async fn seed_user(store: &LocalStore, user: &str, postal_code: &str) {
    store
        .append_address(&UserId::new(user), &address(postal_code))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_live_fetch_on_empty_store() {
    let h = harness();
    let resolved = h
        .resolver
        .resolve(&UserId::new("u-1"), &address("62701"))
        .await
        .unwrap();

    assert_eq!(resolved.source, ResolutionSource::Live);
    assert_eq!(resolved.time_zone.as_deref(), Some("Etc/GMT+6"));
    // avg of {5.0, 6.0}; the -999.0 sample is excluded
    assert_eq!(resolved.summary.avg_all_sky, Some(5.5));
    assert_eq!(resolved.summary.all_sky_quality, 0.6667);
    assert_eq!(resolved.summary.latitude, Some(39.8));

    assert_eq!(h.geocoder.call_count(), 1);
    assert_eq!(h.provider.call_count(), 1);
    // the new record was persisted
    assert_eq!(h.store.row_counts().2, 1);
}

#[tokio::test]
async fn test_fresh_user_record_is_reused_without_upstream_calls() {
    // Concrete scenario: a record computed 10 days ago is a cache hit.
    let h = harness();
    let computed = Utc::now().date_naive() - Duration::days(10);
    h.store
        .append_solar_record(&solar_record("u-1", summary_json(), computed))
        .await
        .unwrap();

    let resolved = h
        .resolver
        .resolve(&UserId::new("u-1"), &address("62701"))
        .await
        .unwrap();

    assert_eq!(resolved.source, ResolutionSource::Cache);
    assert_eq!(resolved.summary, sample_summary());
    assert_eq!(h.geocoder.call_count(), 0);
    assert_eq!(h.provider.call_count(), 0);
    // read-only tiers never write
    assert_eq!(h.store.row_counts().2, 1);
}

#[tokio::test]
async fn test_stale_user_record_forces_live_fetch() {
    // Concrete scenario: a record computed 31 days ago is not reusable.
    let h = harness();
    let computed = Utc::now().date_naive() - Duration::days(31);
    h.store
        .append_solar_record(&solar_record("u-1", summary_json(), computed))
        .await
        .unwrap();

    let resolved = h
        .resolver
        .resolve(&UserId::new("u-1"), &address("62701"))
        .await
        .unwrap();

    assert_eq!(resolved.source, ResolutionSource::Live);
    assert_eq!(h.provider.call_count(), 1);
}

#[tokio::test]
async fn test_freshness_window_is_strict() {
    // Exactly 30 days old falls outside `now - computed < 30 days`.
    let h = harness();
    let computed = Utc::now().date_naive() - Duration::days(30);
    h.store
        .append_solar_record(&solar_record("u-1", summary_json(), computed))
        .await
        .unwrap();

    let resolved = h
        .resolver
        .resolve(&UserId::new("u-1"), &address("62701"))
        .await
        .unwrap();
    assert_eq!(resolved.source, ResolutionSource::Live);

    let h = harness();
    let computed = Utc::now().date_naive() - Duration::days(29);
    h.store
        .append_solar_record(&solar_record("u-1", summary_json(), computed))
        .await
        .unwrap();

    let resolved = h
        .resolver
        .resolve(&UserId::new("u-1"), &address("62701"))
        .await
        .unwrap();
    assert_eq!(resolved.source, ResolutionSource::Cache);
}

#[tokio::test]
async fn test_postal_code_neighbor_record_is_shared() {
    let h = harness();
    seed_user(&h.store, "neighbor", "62701").await;
    let computed = Utc::now().date_naive() - Duration::days(5);
    h.store
        .append_solar_record(&solar_record("neighbor", summary_json(), computed))
        .await
        .unwrap();

    // u-2 has no records of their own but shares the postal code.
    let resolved = h
        .resolver
        .resolve(&UserId::new("u-2"), &address("62701"))
        .await
        .unwrap();

    assert_eq!(resolved.source, ResolutionSource::Cache);
    assert_eq!(resolved.summary.latitude, Some(39.8));
    assert_eq!(h.geocoder.call_count(), 0);
    assert_eq!(h.provider.call_count(), 0);
    assert_eq!(h.store.row_counts().2, 1);
}

#[tokio::test]
async fn test_other_postal_code_is_not_shared() {
    let h = harness();
    seed_user(&h.store, "neighbor", "90210").await;
    let computed = Utc::now().date_naive() - Duration::days(5);
    h.store
        .append_solar_record(&solar_record("neighbor", summary_json(), computed))
        .await
        .unwrap();

    let resolved = h
        .resolver
        .resolve(&UserId::new("u-2"), &address("62701"))
        .await
        .unwrap();

    assert_eq!(resolved.source, ResolutionSource::Live);
    assert_eq!(h.provider.call_count(), 1);
}

#[tokio::test]
async fn test_own_record_wins_over_neighbor() {
    let h = harness();
    seed_user(&h.store, "u-1", "62701").await;
    seed_user(&h.store, "neighbor", "62701").await;

    let mut own = sample_summary();
    own.avg_all_sky = Some(4.0);
    let own_json = serde_json::to_string(&own).unwrap();

    let today = Utc::now().date_naive();
    // neighbor's record is fresher, but tier 1 prefers the user's own
    h.store
        .append_solar_record(&solar_record("neighbor", summary_json(), today - Duration::days(1)))
        .await
        .unwrap();
    h.store
        .append_solar_record(&solar_record("u-1", own_json, today - Duration::days(20)))
        .await
        .unwrap();

    let resolved = h
        .resolver
        .resolve(&UserId::new("u-1"), &address("62701"))
        .await
        .unwrap();

    assert_eq!(resolved.source, ResolutionSource::Cache);
    assert_eq!(resolved.summary.avg_all_sky, Some(4.0));
}

#[tokio::test]
async fn test_neighbor_scan_is_deterministic_in_store_order() {
    let h = harness();
    seed_user(&h.store, "n-1", "62701").await;
    seed_user(&h.store, "n-2", "62701").await;

    let mut first = sample_summary();
    first.avg_all_sky = Some(4.5);
    let mut second = sample_summary();
    second.avg_all_sky = Some(6.5);

    let today = Utc::now().date_naive();
    h.store
        .append_solar_record(&solar_record(
            "n-1",
            serde_json::to_string(&first).unwrap(),
            today - Duration::days(9),
        ))
        .await
        .unwrap();
    h.store
        .append_solar_record(&solar_record(
            "n-2",
            serde_json::to_string(&second).unwrap(),
            today - Duration::days(2),
        ))
        .await
        .unwrap();

    // first fresh record in append order wins, regardless of relative age
    let resolved = h
        .resolver
        .resolve(&UserId::new("u-9"), &address("62701"))
        .await
        .unwrap();
    assert_eq!(resolved.summary.avg_all_sky, Some(4.5));
}

#[tokio::test]
async fn test_cached_record_without_coordinates_is_fatal() {
    let h = harness();
    let mut summary = sample_summary();
    summary.latitude = None;
    summary.longitude = None;
    let computed = Utc::now().date_naive() - Duration::days(3);
    h.store
        .append_solar_record(&solar_record(
            "u-1",
            serde_json::to_string(&summary).unwrap(),
            computed,
        ))
        .await
        .unwrap();

    let err = h
        .resolver
        .resolve(&UserId::new("u-1"), &address("62701"))
        .await
        .unwrap_err();

    assert!(matches!(err, ResolveError::DataIntegrity(_)));
    // never continue to a live fetch after an integrity failure
    assert_eq!(h.provider.call_count(), 0);
}

#[tokio::test]
async fn test_unparseable_summary_is_skipped() {
    let h = harness();
    let computed = Utc::now().date_naive() - Duration::days(3);
    h.store
        .append_solar_record(&solar_record("u-1", "not json".to_string(), computed))
        .await
        .unwrap();

    let resolved = h
        .resolver
        .resolve(&UserId::new("u-1"), &address("62701"))
        .await
        .unwrap();

    // the bad record is ignored and resolution degrades to a live fetch
    assert_eq!(resolved.source, ResolutionSource::Live);
    assert_eq!(h.provider.call_count(), 1);
}

#[tokio::test]
async fn test_persist_failure_does_not_fail_the_resolution() {
    let store = Arc::new(FailingAppendStore {
        inner: LocalStore::new(),
    });
    let geocoder = Arc::new(MockGeocoder::new(coords()));
    let provider = Arc::new(MockIrradianceProvider::new(sample_series()));
    let resolver = SolarLookupResolver::new(
        store,
        geocoder,
        provider,
        Arc::new(FixedTimeZone(None)),
    );

    let resolved = resolver
        .resolve(&UserId::new("u-1"), &address("62701"))
        .await
        .unwrap();

    assert_eq!(resolved.source, ResolutionSource::Live);
    assert_eq!(resolved.summary.avg_all_sky, Some(5.5));
    assert_eq!(resolved.time_zone, None);
}

#[tokio::test]
async fn test_resolve_for_user_requires_an_address_record() {
    let h = harness();
    let err = h
        .resolver
        .resolve_for_user(&UserId::new("missing"))
        .await
        .unwrap_err();
    assert!(matches!(err, ResolveError::NotFound(_)));
}

#[tokio::test]
async fn test_resolve_for_user_uses_the_stored_address() {
    let h = harness();
    seed_user(&h.store, "u-1", "62701").await;

    let resolved = h.resolver.resolve_for_user(&UserId::new("u-1")).await.unwrap();
    assert_eq!(resolved.source, ResolutionSource::Live);
    assert_eq!(h.geocoder.call_count(), 1);

    // the persisted record now serves the second request from cache
    let again = h.resolver.resolve_for_user(&UserId::new("u-1")).await.unwrap();
    assert_eq!(again.source, ResolutionSource::Cache);
    assert_eq!(h.geocoder.call_count(), 1);
}

#[tokio::test]
async fn test_cached_summary_round_trips_through_json() {
    let h = harness();
    let first = h
        .resolver
        .resolve(&UserId::new("u-1"), &address("62701"))
        .await
        .unwrap();

    let second = h
        .resolver
        .resolve(&UserId::new("u-1"), &address("62701"))
        .await
        .unwrap();

    assert_eq!(second.source, ResolutionSource::Cache);
    let live: IrradianceSummary = first.summary;
    assert_eq!(second.summary, live);
}
