use crate::command::exec_unchecked;
use crate::traits::CapabilityChecker;
use async_trait::async_trait;
use smokeprobe_core::{CapabilityReport, ProbeResult, Result, SmokeError, ToolAvailability};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

/// Default media tools the service under test shells out to
pub const DEFAULT_MEDIA_TOOLS: [&str; 2] = ["ffmpeg", "ffprobe"];

/// Checks media tools by running `<tool> -version`
///
/// A tool is available when the command spawns and exits 0. Tools are checked
/// one after another in the configured order.
#[derive(Debug, Clone)]
pub struct MediaToolChecker {
    tools: Vec<String>,
}

impl MediaToolChecker {
    pub fn new(tools: Vec<String>) -> Self {
        Self { tools }
    }

    pub fn tools(&self) -> &[String] {
        &self.tools
    }

    async fn check_tool(&self, tool: &str) -> ToolAvailability {
        match exec_unchecked(tool, &["-version"]).await {
            Ok(output) if output.success() => {
                let version = output
                    .stdout
                    .lines()
                    .next()
                    .map(|line| line.trim().to_string())
                    .filter(|line| !line.is_empty());
                debug!("{} available: {:?}", tool, version);
                ToolAvailability::available(tool, version)
            }
            Ok(output) => {
                debug!(
                    "{} exited with code {} (stderr: {})",
                    tool,
                    output.exit_code,
                    output.stderr.trim()
                );
                ToolAvailability::missing(tool)
            }
            Err(e) => {
                debug!("{} could not be started: {}", tool, e);
                ToolAvailability::missing(tool)
            }
        }
    }
}

impl Default for MediaToolChecker {
    fn default() -> Self {
        Self::new(DEFAULT_MEDIA_TOOLS.iter().map(|t| t.to_string()).collect())
    }
}

#[async_trait]
impl CapabilityChecker for MediaToolChecker {
    async fn check(&self) -> Result<CapabilityReport> {
        if self.tools.is_empty() {
            return Err(SmokeError::invalid_config(
                "no media tools configured",
                "Configure at least one tool, e.g. ffmpeg and ffprobe",
            ));
        }

        let mut tools = Vec::with_capacity(self.tools.len());
        for tool in &self.tools {
            tools.push(self.check_tool(tool).await);
        }

        Ok(CapabilityReport::new(tools))
    }
}

/// Turns a capability collaborator's answer into a probe result
///
/// Errors from the collaborator are captured here and never reach the caller.
pub struct CapabilityProbe {
    checker: Arc<dyn CapabilityChecker>,
}

impl CapabilityProbe {
    pub fn new(checker: Arc<dyn CapabilityChecker>) -> Self {
        Self { checker }
    }

    /// Run the check once and judge it: passed iff every tool is available
    pub async fn execute(&self, name: &str) -> ProbeResult {
        let start = Instant::now();

        match self.checker.check().await {
            Ok(report) if report.all_available() => ProbeResult::passed(name, start.elapsed()),
            Ok(report) => {
                warn!(
                    "{}: missing tools: {}",
                    name,
                    report.missing_tools().join(", ")
                );
                ProbeResult::failed(name, None, start.elapsed())
            }
            Err(e) => {
                warn!("{}: capability check errored: {}", name, e);
                ProbeResult::failed(name, Some(e.to_string()), start.elapsed())
            }
        }
    }
}
