//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the API router with versioned endpoints
    let api_v1 = Router::new()
        .route("/submissions", post(handlers::submit_user_data))
        .route("/solar-potential", post(handlers::get_solar_potential))
        .route("/solar-calculation", post(handlers::calculate_solar_potential));

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(all(test, feature = "local-store"))]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::providers::{
        GeocodingService, IrradianceDataProvider, LongitudeTimeZoneResolver, ProviderError,
        ProviderResult,
    };
    use crate::api::{Coordinates, IrradianceSeries};
    use crate::services::SolarLookupResolver;
    use crate::store::LocalStore;
    use async_trait::async_trait;
    use chrono::NaiveDate;

    struct NoopGeocoder;

    #[async_trait]
    impl GeocodingService for NoopGeocoder {
        async fn geocode(&self, address: &str) -> ProviderResult<Coordinates> {
            Err(ProviderError::not_found(address.to_string()))
        }
    }

    struct NoopProvider;

    #[async_trait]
    impl IrradianceDataProvider for NoopProvider {
        async fn fetch_daily(
            &self,
            _coords: Coordinates,
            _start: NaiveDate,
            _end: NaiveDate,
        ) -> ProviderResult<IrradianceSeries> {
            Err(ProviderError::service("unavailable"))
        }

        fn source_label(&self) -> &str {
            "noop"
        }
    }

    #[test]
    fn test_router_creation() {
        let store = Arc::new(LocalStore::new());
        let resolver = Arc::new(SolarLookupResolver::new(
            store.clone(),
            Arc::new(NoopGeocoder),
            Arc::new(NoopProvider),
            Arc::new(LongitudeTimeZoneResolver),
        ));
        let state = AppState::new(store, resolver);
        let _router = create_router(state);
        // If we got here, router was created successfully
    }
}
