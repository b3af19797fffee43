//! Proximity alert module
//!
//! This module contains the alerting pipeline:
//! - Candidate selection: filter fetched reports by activity, recency and
//!   radius, ranked nearest first
//! - Announcement debouncing: the stateful fire/suppress decision
//! - Engine and session: serialized processing of position updates over a
//!   tracking session's lifetime

pub mod announce;
pub mod debounce;
pub mod engine;
pub mod selector;

// Re-export commonly used types from submodules
pub use announce::{Announcer, LogAnnouncer};
pub use debounce::{AnnouncementState, Decision, decide};
pub use engine::{AlertEngine, AlertSession, Permissions};
pub use selector::{Candidate, nearby_candidates};
