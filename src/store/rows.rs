//! Row codecs for the three record families.
//!
//! The store is row-oriented: every record is a flat list of cell strings.
//! Layouts follow the live sheets: address rows span columns A:F, browser
//! rows A:H and solar rows A:E. Decoding is lenient: rows that are too
//! short or carry an unparseable date are skipped by the caller, never
//! silently padded.

use chrono::NaiveDate;

use crate::api::{Address, AddressRecord, BrowserMeta, SolarRecord, UserId};

/// Date format used in the solar family's `computed_date` column.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Column ranges per family.
pub const ADDRESS_RANGE: &str = "A:F";
pub const BROWSER_RANGE: &str = "A:H";
pub const SOLAR_RANGE: &str = "A:E";

/// Encode an address record as a 6-column row.
pub fn encode_address(user_id: &UserId, address: &Address) -> Vec<String> {
    vec![
        user_id.as_str().to_string(),
        address.street.clone(),
        address.city.clone(),
        address.state.clone(),
        address.postal_code.clone(),
        address.country.clone(),
    ]
}

/// Decode an address row. Returns `None` for rows with missing columns.
pub fn decode_address(row: &[String]) -> Option<AddressRecord> {
    if row.len() < 6 {
        return None;
    }
    Some(AddressRecord {
        user_id: UserId::new(row[0].clone()),
        address: Address {
            street: row[1].clone(),
            city: row[2].clone(),
            state: row[3].clone(),
            postal_code: row[4].clone(),
            country: row[5].clone(),
        },
    })
}

/// Encode browser metadata plus the client IP as an 8-column row.
pub fn encode_browser_meta(user_id: &UserId, meta: &BrowserMeta, client_ip: &str) -> Vec<String> {
    vec![
        user_id.as_str().to_string(),
        meta.user_agent.clone(),
        meta.screen_resolution.clone(),
        meta.language_preference.clone(),
        meta.time_zone.clone(),
        meta.referrer_url.clone(),
        meta.device_type.clone(),
        client_ip.to_string(),
    ]
}

/// Encode a solar record as a 5-column row. The summary travels as JSON text.
pub fn encode_solar_record(record: &SolarRecord) -> Vec<String> {
    vec![
        record.user_id.as_str().to_string(),
        record.summary_json.clone(),
        record.time_zone.clone().unwrap_or_default(),
        record.source.clone(),
        record.computed_date.format(DATE_FORMAT).to_string(),
    ]
}

/// Decode a solar row. Returns `None` for short rows or unparseable dates.
pub fn decode_solar_record(row: &[String]) -> Option<SolarRecord> {
    if row.len() < 5 {
        return None;
    }
    let computed_date = NaiveDate::parse_from_str(&row[4], DATE_FORMAT).ok()?;
    let time_zone = if row[2].is_empty() {
        None
    } else {
        Some(row[2].clone())
    };
    Some(SolarRecord {
        user_id: UserId::new(row[0].clone()),
        summary_json: row[1].clone(),
        time_zone,
        source: row[3].clone(),
        computed_date,
    })
}
