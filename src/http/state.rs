//! Application state for the HTTP server.

use std::sync::Arc;

use crate::services::SolarLookupResolver;
use crate::store::RecordStore;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Record store for user submissions
    pub store: Arc<dyn RecordStore>,
    /// Resolver for cached solar lookups
    pub resolver: Arc<SolarLookupResolver>,
}

impl AppState {
    /// Create a new application state with the given store and resolver.
    pub fn new(store: Arc<dyn RecordStore>, resolver: Arc<SolarLookupResolver>) -> Self {
        Self { store, resolver }
    }
}
