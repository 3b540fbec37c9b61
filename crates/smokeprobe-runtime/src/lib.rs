//! Smokeprobe Runtime - runs the smoke-test plan against a local service
//!
//! This crate provides:
//! - The default probe plan and the sequential test runner
//! - The HTTP prober and the media tool capability check
//! - Harness configuration, report rendering and exit status mapping

pub mod capability;
pub mod command;
pub mod config;
pub mod exit;
pub mod mock;
pub mod plan;
pub mod prober;
pub mod report;
pub mod runner;
pub mod traits;

// Re-export primary types
pub use capability::{CapabilityProbe, MediaToolChecker, DEFAULT_MEDIA_TOOLS};
pub use config::HarnessConfig;
pub use exit::ExitStatus;
pub use mock::MockCapabilityChecker;
pub use plan::default_plan;
pub use prober::Prober;
pub use report::{ReportStyle, ResultReporter};
pub use runner::TestRunner;
pub use traits::CapabilityChecker;
