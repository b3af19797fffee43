//! Hazard report wire model
//!
//! Reports arrive from the backend in the shape the mobile app submits
//! them. The `location` field shows up in two historical forms: a raw
//! `"lat,lng"` string and a GeoJSON-style `{ "coordinates": [lng, lat] }`
//! pair. Both are accepted and normalized to a single canonical
//! [`Position`] so the selector and debouncer never see the variance.

use crate::models::Position;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user-submitted record of an observed risk condition at a point
/// location. Read-only from the engine's point of view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HazardReport {
    /// Opaque identifier, stable across fetches
    #[serde(alias = "_id")]
    pub id: String,
    /// Username of the reporting citizen
    #[serde(default)]
    pub username: Option<String>,
    /// Location of the hazard in either accepted wire form
    pub location: ReportLocation,
    /// Categorical risk tag, free-form ("flood_severe", "lluvia_intensa", ...)
    pub risk_type: String,
    /// Optional free-text description
    #[serde(default)]
    pub description: Option<String>,
    /// Inactive reports are never considered for alerting
    #[serde(default = "default_active")]
    pub active: bool,
    /// Submission timestamp
    pub created_at: DateTime<Utc>,
}

fn default_active() -> bool {
    true
}

/// The two recognized wire forms a report location can take, plus a
/// catch-all so one unrecognized shape never fails deserialization of the
/// whole report list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ReportLocation {
    /// Raw `"lat,lng"` decimal string
    Text(String),
    /// GeoJSON-style pair, longitude first
    Geo { coordinates: [f64; 2] },
    /// Anything else (wrong arity, wrong type); normalizes to no position
    Other(serde_json::Value),
}

impl ReportLocation {
    /// Normalize to a canonical position.
    ///
    /// Returns `None` when the location is unparsable (not a valid
    /// `"lat,lng"` string, nor a 2-element coordinate pair); such reports
    /// are excluded from selection rather than failing the whole candidate
    /// computation.
    #[must_use]
    pub fn position(&self) -> Option<Position> {
        match self {
            ReportLocation::Text(raw) => {
                let mut parts = raw.split(',');
                let lat = parts.next()?.trim().parse::<f64>().ok()?;
                let lng = parts.next()?.trim().parse::<f64>().ok()?;
                if parts.next().is_some() {
                    return None;
                }
                Some(Position::new(lat, lng))
            }
            ReportLocation::Geo { coordinates } => {
                // GeoJSON order: [longitude, latitude]
                Some(Position::new(coordinates[1], coordinates[0]))
            }
            ReportLocation::Other(_) => None,
        }
    }
}

impl HazardReport {
    /// Normalized position of this report, if its location is parseable
    #[must_use]
    pub fn position(&self) -> Option<Position> {
        self.location.position()
    }
}
