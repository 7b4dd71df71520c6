//! Spreadsheet store configuration and environment variable handling.

use std::env;

use super::error::{StoreError, StoreResult};

const DEFAULT_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Configuration for the spreadsheet-backed store, loaded from environment
/// variables.
#[derive(Debug, Clone)]
pub struct SheetsConfig {
    /// Base URL of the values API.
    pub api_base: String,
    /// OAuth bearer token presented on every request.
    pub access_token: String,
    /// Sheet holding the address family.
    pub personal_info_sheet_id: String,
    /// Sheet holding the browser-metadata family.
    pub browser_data_sheet_id: String,
    /// Sheet holding the solar-data family.
    pub solar_data_sheet_id: String,
}

impl SheetsConfig {
    /// Create a configuration from environment variables.
    ///
    /// # Environment Variables
    /// - `SHEETS_ACCESS_TOKEN` (required): OAuth bearer token
    /// - `PERSONAL_INFO_SHEET_ID` (required): address-family sheet id
    /// - `BROWSER_DATA_SHEET_ID` (required): browser-family sheet id
    /// - `SOLAR_DATA_SHEET_ID` (required): solar-family sheet id
    /// - `SHEETS_API_BASE` (optional): override for tests/mirrors
    ///
    /// # Errors
    /// Returns a configuration error if a required variable is not set.
    pub fn from_env() -> StoreResult<Self> {
        Ok(Self {
            api_base: env::var("SHEETS_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string()),
            access_token: require_env("SHEETS_ACCESS_TOKEN")?,
            personal_info_sheet_id: require_env("PERSONAL_INFO_SHEET_ID")?,
            browser_data_sheet_id: require_env("BROWSER_DATA_SHEET_ID")?,
            solar_data_sheet_id: require_env("SOLAR_DATA_SHEET_ID")?,
        })
    }
}

fn require_env(name: &str) -> StoreResult<String> {
    env::var(name).map_err(|_| {
        StoreError::configuration(format!("{} environment variable not set", name))
    })
}
