//! Data models for the `Hazardwatch` engine
//!
//! This module contains the core domain models organized by concern:
//! - Position: a single GPS fix in decimal degrees
//! - Report: hazard reports as delivered by the backend, including
//!   location normalization

pub mod position;
pub mod report;

// Re-export all public types for convenient access
pub use position::Position;
pub use report::{HazardReport, ReportLocation};
