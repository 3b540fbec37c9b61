use async_trait::async_trait;
use smokeprobe_core::{CapabilityReport, Result};

/// Trait for tool availability collaborators
///
/// Implementations report, per required external tool, whether it is present
/// and invocable. Returning `Err` means the check itself could not be
/// performed; the capability probe turns that into a failed result. This
/// enables testing via `MockCapabilityChecker` without real tools installed.
#[async_trait]
pub trait CapabilityChecker: Send + Sync {
    /// Check every required tool and report availability in a stable order
    async fn check(&self) -> Result<CapabilityReport>;
}
