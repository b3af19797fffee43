//! Geographic utilities
//!
//! Great-circle distance between positions and human-readable formatting
//! of distances and risk labels for announcement messages.

use crate::models::Position;
use haversine::{Location as HaversineLocation, Units, distance};

/// Great-circle distance between two positions in meters.
///
/// Uses the haversine formula with a mean Earth radius of 6,371 km.
#[must_use]
pub fn distance_meters(from: &Position, to: &Position) -> f64 {
    let from_haversine = HaversineLocation {
        latitude: from.latitude,
        longitude: from.longitude,
    };
    let to_haversine = HaversineLocation {
        latitude: to.latitude,
        longitude: to.longitude,
    };
    distance(from_haversine, to_haversine, Units::Kilometers) * 1000.0
}

/// Format a distance for display: whole meters below 1 km, otherwise
/// kilometers to one decimal place.
#[must_use]
pub fn format_distance(meters: f64) -> String {
    if meters < 1000.0 {
        format!("{:.0} m", meters)
    } else {
        format!("{:.1} km", meters / 1000.0)
    }
}

/// Turn a raw risk tag into a human-readable label.
///
/// Tags are free-form strings from the report backend ("flood_severe",
/// "lluvia_intensa"). Underscores become spaces and the result is
/// lowercased; an empty tag maps to a generic "hazard".
#[must_use]
pub fn format_risk_label(risk_type: &str) -> String {
    let label = risk_type.trim();
    if label.is_empty() {
        return "hazard".to_string();
    }
    label.replace('_', " ").to_lowercase()
}
