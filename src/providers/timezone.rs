//! Time-zone resolution collaborator.

use crate::api::Coordinates;

/// Resolves coordinates to an IANA time-zone identifier, when one is known.
pub trait TimeZoneResolver: Send + Sync {
    /// Returns `None` when no identifier can be determined; the resolver
    /// stores the absence rather than guessing.
    fn resolve(&self, coords: Coordinates) -> Option<String>;
}

/// Offline resolver mapping longitude to a nautical `Etc/GMT±N` zone.
///
/// The Etc/GMT identifiers use the POSIX sign convention: `Etc/GMT-1` is one
/// hour ahead of UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct LongitudeTimeZoneResolver;

impl TimeZoneResolver for LongitudeTimeZoneResolver {
    fn resolve(&self, coords: Coordinates) -> Option<String> {
        if !coords.longitude.is_finite() || coords.longitude.abs() > 180.0 {
            return None;
        }
        let offset = (coords.longitude / 15.0).round() as i32;
        let name = match offset.cmp(&0) {
            std::cmp::Ordering::Equal => "Etc/GMT".to_string(),
            std::cmp::Ordering::Greater => format!("Etc/GMT-{}", offset),
            std::cmp::Ordering::Less => format!("Etc/GMT+{}", -offset),
        };
        Some(name)
    }
}
