//! Solar Potential HTTP Server Binary
//!
//! Main entry point for the solar-potential REST API server. It wires the
//! record store, the external providers and the lookup resolver together,
//! sets up the HTTP router, and starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! # Run with the in-memory store (default)
//! cargo run --bin solar-server --features "local-store,http-server"
//!
//! # Run against the spreadsheet backend
//! SHEETS_ACCESS_TOKEN=... PERSONAL_INFO_SHEET_ID=... \
//! BROWSER_DATA_SHEET_ID=... SOLAR_DATA_SHEET_ID=... \
//!   cargo run --bin solar-server --features "sheets-store,http-server"
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8000)
//! - `RUST_LOG`: Log level (default: info)
//! - Sheet ids and access token (sheets-store feature), see `store::config`

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use solar_potential::http::{create_router, AppState};
use solar_potential::providers::{LongitudeTimeZoneResolver, NasaPowerProvider, NominatimGeocoder};
use solar_potential::services::SolarLookupResolver;
use solar_potential::store::RecordStore;

// Priority: sheets > local (when --all-features is used)
#[cfg(feature = "sheets-store")]
fn create_selected_store() -> anyhow::Result<Arc<dyn RecordStore>> {
    let config = solar_potential::store::SheetsConfig::from_env()?;
    let store = solar_potential::store::SheetsStore::new(config)?;
    Ok(Arc::new(store))
}

#[cfg(all(feature = "local-store", not(feature = "sheets-store")))]
fn create_selected_store() -> anyhow::Result<Arc<dyn RecordStore>> {
    Ok(Arc::new(solar_potential::store::LocalStore::new()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .init();

    info!("Starting Solar Potential HTTP Server");

    // Wire collaborators explicitly; the resolver owns no global state.
    let store = create_selected_store()?;
    let resolver = Arc::new(SolarLookupResolver::new(
        store.clone(),
        Arc::new(NominatimGeocoder::new()?),
        Arc::new(NasaPowerProvider::new()?),
        Arc::new(LongitudeTimeZoneResolver),
    ));
    info!("Store and providers initialized successfully");

    let state = AppState::new(store, resolver);
    let app = create_router(state);

    // Determine bind address
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8000);
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
