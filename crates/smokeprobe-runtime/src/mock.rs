use crate::traits::CapabilityChecker;
use async_trait::async_trait;
use smokeprobe_core::{CapabilityReport, Result, SmokeError, ToolAvailability};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::debug;

#[derive(Debug, Clone)]
enum MockResponse {
    Report(CapabilityReport),
    Error(String),
}

/// Mock capability checker for testing without external tools
///
/// Returns a preset report, or a preset error, and counts how often it was
/// asked.
#[derive(Debug)]
pub struct MockCapabilityChecker {
    response: MockResponse,
    calls: AtomicUsize,
}

impl MockCapabilityChecker {
    /// Every named tool reports available
    pub fn all_available(tools: &[&str]) -> Self {
        let tools = tools
            .iter()
            .map(|name| ToolAvailability::available(*name, Some(format!("{} version mock", name))))
            .collect();
        Self::with_report(CapabilityReport::new(tools))
    }

    pub fn with_report(report: CapabilityReport) -> Self {
        Self {
            response: MockResponse::Report(report),
            calls: AtomicUsize::new(0),
        }
    }

    /// The check itself fails with `message`
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            response: MockResponse::Error(message.into()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CapabilityChecker for MockCapabilityChecker {
    async fn check(&self) -> Result<CapabilityReport> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        debug!("Mock: capability check requested");

        match &self.response {
            MockResponse::Report(report) => Ok(report.clone()),
            MockResponse::Error(message) => Err(SmokeError::capability_check_failed(message)),
        }
    }
}
