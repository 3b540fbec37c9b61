//! Smokeprobe Core - data model for the smokeprobe build-verification harness
//!
//! This crate provides:
//! - Probe definitions and their pass criteria
//! - Probe outcomes, per-probe results and the aggregate report
//! - Error types with miette diagnostics

pub mod error;
pub mod results;
pub mod types;

// Re-export commonly used types
pub use error::{Result, SmokeError};
pub use results::{AggregateReport, CapabilityReport, ProbeOutcome, ProbeResult, ToolAvailability};
pub use types::{HttpMethod, HttpTarget, ProbeAction, ProbeSpec, SuccessCriterion};
