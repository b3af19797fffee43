//! Candidate selection
//!
//! Turns a fetched report list into an ordered sequence of nearby
//! candidates: active, recent, parseable, within radius, nearest first.

use crate::config::EngineConfig;
use crate::geo;
use crate::models::{HazardReport, Position};
use chrono::{DateTime, Duration, Utc};
use tracing::debug;

/// A report paired with its distance from the current position.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub report: HazardReport,
    pub distance_meters: f64,
}

/// Select and rank alert candidates around the current position.
///
/// A report qualifies when it is active, no older than the recency window,
/// has a parseable location, and lies within the configured radius.
/// Unparsable locations are dropped silently. The result is sorted nearest
/// first; the sort is stable, so equidistant reports keep their source
/// order.
#[must_use]
pub fn nearby_candidates(
    position: &Position,
    reports: Vec<HazardReport>,
    config: &EngineConfig,
    now: DateTime<Utc>,
) -> Vec<Candidate> {
    let oldest_eligible = now - Duration::hours(i64::from(config.recency_window_hours));

    let mut candidates: Vec<Candidate> = reports
        .into_iter()
        .filter(|report| report.active)
        .filter(|report| report.created_at >= oldest_eligible)
        .filter_map(|report| {
            let Some(report_position) = report.position() else {
                debug!(report_id = %report.id, "dropping report with unparsable location");
                return None;
            };
            let distance_meters = geo::distance_meters(position, &report_position);
            Some(Candidate {
                report,
                distance_meters,
            })
        })
        .filter(|candidate| candidate.distance_meters <= config.radius_meters)
        .collect();

    candidates.sort_by(|a, b| a.distance_meters.total_cmp(&b.distance_meters));
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReportLocation;

    fn report(id: &str, location: &str, active: bool, age_hours: i64) -> HazardReport {
        HazardReport {
            id: id.to_string(),
            username: None,
            location: ReportLocation::Text(location.to_string()),
            risk_type: "flood_light".to_string(),
            description: None,
            active,
            created_at: Utc::now() - Duration::hours(age_hours),
        }
    }

    fn offset_north(base: &Position, meters: f64) -> String {
        // One degree of latitude is ~111,195 m on the haversine sphere
        let lat = base.latitude + meters / 111_195.0;
        format!("{},{}", lat, base.longitude)
    }

    #[test]
    fn test_excludes_inactive_reports() {
        let here = Position::new(20.5888, -100.3899);
        let reports = vec![
            report("active", &offset_north(&here, 100.0), true, 1),
            report("inactive", &offset_north(&here, 100.0), false, 1),
        ];
        let candidates = nearby_candidates(&here, reports, &EngineConfig::default(), Utc::now());
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].report.id, "active");
    }

    #[test]
    fn test_excludes_stale_reports() {
        let here = Position::new(20.5888, -100.3899);
        let reports = vec![
            report("fresh", &offset_north(&here, 100.0), true, 1),
            report("stale", &offset_north(&here, 100.0), true, 13),
        ];
        let candidates = nearby_candidates(&here, reports, &EngineConfig::default(), Utc::now());
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].report.id, "fresh");
    }

    #[test]
    fn test_excludes_out_of_radius_reports() {
        let here = Position::new(20.5888, -100.3899);
        let reports = vec![
            report("near", &offset_north(&here, 500.0), true, 1),
            report("far", &offset_north(&here, 1500.0), true, 1),
        ];
        let candidates = nearby_candidates(&here, reports, &EngineConfig::default(), Utc::now());
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].report.id, "near");
    }

    #[test]
    fn test_orders_candidates_nearest_first() {
        let here = Position::new(20.5888, -100.3899);
        let reports = vec![
            report("d800", &offset_north(&here, 800.0), true, 1),
            report("d200", &offset_north(&here, 200.0), true, 1),
            report("d500", &offset_north(&here, 500.0), true, 1),
        ];
        let candidates = nearby_candidates(&here, reports, &EngineConfig::default(), Utc::now());
        let ids: Vec<&str> = candidates.iter().map(|c| c.report.id.as_str()).collect();
        assert_eq!(ids, vec!["d200", "d500", "d800"]);
    }

    #[test]
    fn test_ties_keep_source_order() {
        let here = Position::new(20.5888, -100.3899);
        let spot = offset_north(&here, 300.0);
        let reports = vec![
            report("first", &spot, true, 1),
            report("second", &spot, true, 1),
        ];
        let candidates = nearby_candidates(&here, reports, &EngineConfig::default(), Utc::now());
        assert_eq!(candidates[0].report.id, "first");
        assert_eq!(candidates[1].report.id, "second");
    }

    #[test]
    fn test_drops_unparsable_locations_without_error() {
        let here = Position::new(20.5888, -100.3899);
        let reports = vec![
            report("bad", "abc,def", true, 1),
            report("good", &offset_north(&here, 100.0), true, 1),
        ];
        let candidates = nearby_candidates(&here, reports, &EngineConfig::default(), Utc::now());
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].report.id, "good");
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        let here = Position::new(20.5888, -100.3899);
        let candidates =
            nearby_candidates(&here, Vec::new(), &EngineConfig::default(), Utc::now());
        assert!(candidates.is_empty());
    }
}
