//! `Hazardwatch` - Proximity alerting for citizen weather-hazard reports
//!
//! This library decides when a nearby hazard report is worth announcing
//! to the user, given a stream of GPS positions and a fetched list of
//! active reports, and suppresses duplicate announcements as the user
//! lingers or moves. Report storage, push delivery, and speech synthesis
//! are external collaborators reached through the `ReportProvider` and
//! `Announcer` seams.

pub mod alert;
pub mod config;
pub mod error;
pub mod geo;
pub mod models;
pub mod reports;

// Re-export core types for public API
pub use alert::{
    AlertEngine, AlertSession, AnnouncementState, Announcer, Candidate, Decision, LogAnnouncer,
    Permissions,
};
pub use config::HazardwatchConfig;
pub use error::HazardwatchError;
pub use models::{HazardReport, Position, ReportLocation};
pub use reports::{HttpReportProvider, ReportProvider};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, HazardwatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
