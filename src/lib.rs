//! # Solar Potential Backend
//!
//! Rust backend for estimating the solar-energy potential of a street address.
//!
//! The service geocodes an address, pulls multi-year daily irradiance data for
//! the location, reduces it to summary statistics (averages, monthly means,
//! best/worst months, data quality) and projects energy production, payback and
//! long-term savings for a candidate installation. Submitted addresses, browser
//! metadata and computed solar summaries are persisted to an append-only
//! row store so repeated lookups can reuse recent results instead of
//! re-fetching.
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: Domain types and DTOs shared across layers
//! - [`providers`]: External collaborators (geocoding, irradiance data,
//!   time-zone resolution) behind narrow async traits
//! - [`store`]: Append-only record store (`RecordStore` trait) with in-memory
//!   and spreadsheet-backed implementations
//! - [`services`]: Business logic: irradiance aggregation, the cached lookup
//!   resolver, the financial projection and user-data submission
//! - [`http`]: Axum-based HTTP server and request handlers
//!
//! ## Lookup policy
//!
//! Solar summaries are reused while they are fresher than 30 days. The
//! resolver first checks the requesting user's own records, then records of
//! any user sharing the same postal code, and only then performs a live
//! fetch, persisting the new summary for later requests.

pub mod api;

pub mod providers;
pub mod store;

pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
