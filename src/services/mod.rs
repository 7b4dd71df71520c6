//! Service layer for business logic and orchestration.
//!
//! This module contains the service layer that sits between the HTTP
//! handlers and the record store / external providers. Services orchestrate
//! collaborator calls and implement the aggregation, caching and projection
//! logic.

pub mod aggregate;

pub mod projection;

pub mod resolver;

pub mod submission;

pub use aggregate::summarize_series;
pub use projection::project;
pub use resolver::{ResolveError, ResolveResult, SolarLookupResolver};
pub use submission::submit_user_data;
