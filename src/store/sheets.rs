//! Spreadsheet-backed record store speaking the Sheets values API.
//!
//! Rows are appended with `USER_ENTERED`/`INSERT_ROWS` semantics and read
//! back as whole column ranges; there is no server-side query, so callers
//! scan and filter the returned rows themselves.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use super::config::SheetsConfig;
use super::error::{ErrorContext, StoreError, StoreResult};
use super::{rows, RecordStore};
use crate::api::{Address, AddressRecord, BrowserMeta, SolarRecord, UserId};

/// Payload of a values `GET`. Absent when the range is empty.
#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

/// [`RecordStore`] backed by three spreadsheet ranges over HTTP.
pub struct SheetsStore {
    client: reqwest::Client,
    config: SheetsConfig,
}

impl SheetsStore {
    /// Build a store from configuration with a bounded request timeout.
    pub fn new(config: SheetsConfig) -> StoreResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(20))
            .build()
            .map_err(|e| StoreError::configuration(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { client, config })
    }

    fn values_url(&self, sheet_id: &str, range: &str) -> String {
        format!("{}/{}/values/{}", self.config.api_base, sheet_id, range)
    }

    async fn append_row(
        &self,
        sheet_id: &str,
        range: &str,
        row: Vec<String>,
        context: ErrorContext,
    ) -> StoreResult<()> {
        let url = format!("{}:append", self.values_url(sheet_id, range));
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.access_token)
            .query(&[
                ("valueInputOption", "USER_ENTERED"),
                ("insertDataOption", "INSERT_ROWS"),
            ])
            .json(&json!({ "values": [row] }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::backend_with_context(
                format!("append rejected ({}): {}", status, body.trim()),
                context,
            ));
        }
        Ok(())
    }

    async fn read_rows(&self, sheet_id: &str, range: &str) -> StoreResult<Vec<Vec<String>>> {
        let response = self
            .client
            .get(self.values_url(sheet_id, range))
            .bearer_auth(&self.config.access_token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::backend(format!(
                "read rejected ({}): {}",
                status,
                body.trim()
            )));
        }

        let payload: ValueRange = response
            .json()
            .await
            .map_err(|e| StoreError::validation(format!("malformed values payload: {}", e)))?;
        Ok(payload.values)
    }
}

#[async_trait]
impl RecordStore for SheetsStore {
    async fn append_address(&self, user_id: &UserId, address: &Address) -> StoreResult<()> {
        let context = ErrorContext::new("append_address")
            .with_family("address")
            .with_entity_id(user_id);
        self.append_row(
            &self.config.personal_info_sheet_id,
            rows::ADDRESS_RANGE,
            rows::encode_address(user_id, address),
            context,
        )
        .await
    }

    async fn append_browser_meta(
        &self,
        user_id: &UserId,
        meta: &BrowserMeta,
        client_ip: &str,
    ) -> StoreResult<()> {
        let context = ErrorContext::new("append_browser_meta")
            .with_family("browser")
            .with_entity_id(user_id);
        self.append_row(
            &self.config.browser_data_sheet_id,
            rows::BROWSER_RANGE,
            rows::encode_browser_meta(user_id, meta, client_ip),
            context,
        )
        .await
    }

    async fn append_solar_record(&self, record: &SolarRecord) -> StoreResult<()> {
        let context = ErrorContext::new("append_solar_record")
            .with_family("solar")
            .with_entity_id(&record.user_id);
        self.append_row(
            &self.config.solar_data_sheet_id,
            rows::SOLAR_RANGE,
            rows::encode_solar_record(record),
            context,
        )
        .await
    }

    async fn read_all_addresses(&self) -> StoreResult<Vec<AddressRecord>> {
        let raw = self
            .read_rows(&self.config.personal_info_sheet_id, rows::ADDRESS_RANGE)
            .await?;
        let total = raw.len();
        let decoded: Vec<AddressRecord> =
            raw.iter().filter_map(|row| rows::decode_address(row)).collect();
        if decoded.len() < total {
            debug!(skipped = total - decoded.len(), "skipped short address rows");
        }
        Ok(decoded)
    }

    async fn read_all_solar_records(&self) -> StoreResult<Vec<SolarRecord>> {
        let raw = self
            .read_rows(&self.config.solar_data_sheet_id, rows::SOLAR_RANGE)
            .await?;
        let total = raw.len();
        let decoded: Vec<SolarRecord> = raw
            .iter()
            .filter_map(|row| rows::decode_solar_record(row))
            .collect();
        if decoded.len() < total {
            debug!(skipped = total - decoded.len(), "skipped undecodable solar rows");
        }
        Ok(decoded)
    }
}
