//! Announcement debouncing
//!
//! The stateful half of the alert decision: given the ranked candidate
//! list and what was last announced, decide whether announcing again is
//! newsworthy or spam. State lives in an explicit owned
//! [`AnnouncementState`] so the transition function stays a pure,
//! independently testable function of its inputs.

use crate::alert::selector::Candidate;
use crate::config::EngineConfig;
use crate::geo;
use crate::models::Position;
use chrono::{DateTime, Duration, Utc};
use tracing::debug;

/// What was last announced during this tracking session.
///
/// Mutated as a unit only when an announcement actually fires; a
/// suppressing decision never touches it. `Default` means "never
/// announced". Never persisted across sessions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnouncementState {
    /// When the last announcement fired
    pub last_announced_at: Option<DateTime<Utc>>,
    /// Where the user was when it fired
    pub last_position: Option<Position>,
    /// Which report it was about
    pub last_report_id: Option<String>,
}

impl AnnouncementState {
    /// Record a fired announcement. All three fields update together.
    pub fn record(&mut self, now: DateTime<Utc>, position: Position, report_id: String) {
        self.last_announced_at = Some(now);
        self.last_position = Some(position);
        self.last_report_id = Some(report_id);
    }
}

/// Outcome of one debounce evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    /// Fire exactly one announcement with this message
    Announce { message: String, report_id: String },
    /// Stay quiet; state is left untouched
    Suppress,
}

/// Decide whether the nearest candidate warrants a new announcement.
///
/// Fires iff `force` (first evaluation after tracking starts), the nearest
/// report changed since the last announcement, or the repeat interval has
/// elapsed. The repeat interval alone is sufficient once elapsed, whether
/// the user is stationary or moving; `same_spot` is logged for visibility
/// into stationary repeats but does not gate firing.
#[must_use]
pub fn decide(
    position: &Position,
    candidates: &[Candidate],
    state: &AnnouncementState,
    force: bool,
    now: DateTime<Utc>,
    config: &EngineConfig,
) -> Decision {
    let Some(nearest) = candidates.first() else {
        return Decision::Suppress;
    };

    let same_spot = state
        .last_position
        .as_ref()
        .is_some_and(|last| {
            geo::distance_meters(position, last) <= config.stationary_epsilon_meters
        });

    let repeat_elapsed = match state.last_announced_at {
        Some(last) => now - last >= Duration::seconds(i64::from(config.repeat_interval_secs)),
        None => true,
    };

    let new_nearest = state.last_report_id.as_deref() != Some(nearest.report.id.as_str());

    debug!(
        report_id = %nearest.report.id,
        distance_meters = nearest.distance_meters,
        force,
        new_nearest,
        repeat_elapsed,
        same_spot,
        "debounce evaluation"
    );

    if force || new_nearest || repeat_elapsed {
        let message = format!(
            "Attention: {} reported {} from your location.",
            geo::format_risk_label(&nearest.report.risk_type),
            geo::format_distance(nearest.distance_meters)
        );
        Decision::Announce {
            message,
            report_id: nearest.report.id.clone(),
        }
    } else {
        Decision::Suppress
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HazardReport, ReportLocation};

    fn candidate(id: &str, risk_type: &str, distance_meters: f64) -> Candidate {
        Candidate {
            report: HazardReport {
                id: id.to_string(),
                username: None,
                location: ReportLocation::Text("20.5888,-100.3899".to_string()),
                risk_type: risk_type.to_string(),
                description: None,
                active: true,
                created_at: Utc::now(),
            },
            distance_meters,
        }
    }

    fn announced(state: &mut AnnouncementState, decision: &Decision, now: DateTime<Utc>, position: Position) -> bool {
        match decision {
            Decision::Announce { report_id, .. } => {
                state.record(now, position, report_id.clone());
                true
            }
            Decision::Suppress => false,
        }
    }

    #[test]
    fn test_empty_candidates_suppress_and_leave_state_alone() {
        let state = AnnouncementState::default();
        let here = Position::new(20.5888, -100.3899);
        let decision = decide(&here, &[], &state, true, Utc::now(), &EngineConfig::default());
        assert_eq!(decision, Decision::Suppress);
        assert_eq!(state, AnnouncementState::default());
    }

    #[test]
    fn test_force_fires_once_then_suppresses_within_window() {
        let config = EngineConfig::default();
        let here = Position::new(20.5888, -100.3899);
        let candidates = vec![candidate("r1", "flood_severe", 420.0)];
        let mut state = AnnouncementState::default();

        // Session start: force fires exactly one announcement
        let t0 = Utc::now();
        let first = decide(&here, &candidates, &state, true, t0, &config);
        assert!(announced(&mut state, &first, t0, here));

        // 10 seconds later, same nearest, window not elapsed: zero announcements
        let t1 = t0 + Duration::seconds(10);
        let second = decide(&here, &candidates, &state, false, t1, &config);
        assert_eq!(second, Decision::Suppress);

        // After the repeat interval, same nearest: exactly one announcement
        let t2 = t0 + Duration::seconds(i64::from(config.repeat_interval_secs));
        let third = decide(&here, &candidates, &state, false, t2, &config);
        assert!(announced(&mut state, &third, t2, here));

        // A different nearest id fires immediately regardless of elapsed time
        let t3 = t2 + Duration::seconds(5);
        let other = vec![candidate("r2", "accident", 300.0)];
        let fourth = decide(&here, &other, &state, false, t3, &config);
        assert!(matches!(fourth, Decision::Announce { ref report_id, .. } if report_id == "r2"));
    }

    #[test]
    fn test_message_format() {
        let here = Position::new(20.5888, -100.3899);
        let candidates = vec![candidate("r1", "flood_severe", 420.0)];
        let decision = decide(
            &here,
            &candidates,
            &AnnouncementState::default(),
            true,
            Utc::now(),
            &EngineConfig::default(),
        );
        let Decision::Announce { message, .. } = decision else {
            panic!("expected announcement");
        };
        assert_eq!(
            message,
            "Attention: flood severe reported 420 m from your location."
        );
    }

    #[test]
    fn test_message_format_kilometers() {
        let here = Position::new(20.5888, -100.3899);
        let mut config = EngineConfig::default();
        config.radius_meters = 5000.0;
        let candidates = vec![candidate("r1", "heavy_rain", 2500.0)];
        let decision = decide(
            &here,
            &candidates,
            &AnnouncementState::default(),
            true,
            Utc::now(),
            &config,
        );
        let Decision::Announce { message, .. } = decision else {
            panic!("expected announcement");
        };
        assert_eq!(
            message,
            "Attention: heavy rain reported 2.5 km from your location."
        );
    }

    #[test]
    fn test_repeat_fires_even_while_stationary() {
        // Standing still at the same nearest hazard still refires once the
        // window elapses; the stationary epsilon never gates.
        let config = EngineConfig::default();
        let here = Position::new(20.5888, -100.3899);
        let candidates = vec![candidate("r1", "flood_light", 200.0)];
        let mut state = AnnouncementState::default();

        let t0 = Utc::now();
        let first = decide(&here, &candidates, &state, true, t0, &config);
        assert!(announced(&mut state, &first, t0, here));

        let t1 = t0 + Duration::seconds(i64::from(config.repeat_interval_secs) + 1);
        let refire = decide(&here, &candidates, &state, false, t1, &config);
        assert!(matches!(refire, Decision::Announce { .. }));
    }

    #[test]
    fn test_suppress_never_mutates_state() {
        let config = EngineConfig::default();
        let here = Position::new(20.5888, -100.3899);
        let candidates = vec![candidate("r1", "flood_light", 200.0)];
        let mut state = AnnouncementState::default();

        let t0 = Utc::now();
        let first = decide(&here, &candidates, &state, true, t0, &config);
        announced(&mut state, &first, t0, here);
        let snapshot = state.clone();

        let t1 = t0 + Duration::seconds(10);
        let second = decide(&here, &candidates, &state, false, t1, &config);
        assert_eq!(second, Decision::Suppress);
        assert_eq!(state, snapshot);
    }
}
