use std::time::Duration;

/// Raw observed result of one HTTP probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// A response arrived and its body was fully read
    Response { status: u16, body: String },
    /// The request never produced a readable response
    TransportError(String),
}

impl ProbeOutcome {
    /// Response status, 0 when the transport failed
    pub fn status_code(&self) -> u16 {
        match self {
            ProbeOutcome::Response { status, .. } => *status,
            ProbeOutcome::TransportError(_) => 0,
        }
    }

    /// Response body, empty when the transport failed
    pub fn body(&self) -> &str {
        match self {
            ProbeOutcome::Response { body, .. } => body,
            ProbeOutcome::TransportError(_) => "",
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            ProbeOutcome::Response { .. } => None,
            ProbeOutcome::TransportError(message) => Some(message),
        }
    }
}

/// Availability of one external tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolAvailability {
    pub name: String,
    pub available: bool,
    /// First line of the tool's version output, if it ran
    pub version: Option<String>,
}

impl ToolAvailability {
    pub fn available(name: impl Into<String>, version: Option<String>) -> Self {
        Self {
            name: name.into(),
            available: true,
            version,
        }
    }

    pub fn missing(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            available: false,
            version: None,
        }
    }
}

/// What the capability collaborator reports
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapabilityReport {
    pub tools: Vec<ToolAvailability>,
}

impl CapabilityReport {
    pub fn new(tools: Vec<ToolAvailability>) -> Self {
        Self { tools }
    }

    /// True when at least one tool was checked and every tool is available
    pub fn all_available(&self) -> bool {
        !self.tools.is_empty() && self.tools.iter().all(|t| t.available)
    }

    pub fn missing_tools(&self) -> Vec<&str> {
        self.tools
            .iter()
            .filter(|t| !t.available)
            .map(|t| t.name.as_str())
            .collect()
    }
}

/// Pass/fail judgment for one probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    pub name: String,
    pub passed: bool,
    /// Set only when the probe could not run (transport or collaborator failure)
    pub error_message: Option<String>,
    pub duration: Duration,
}

impl ProbeResult {
    pub fn passed(name: impl Into<String>, duration: Duration) -> Self {
        Self {
            name: name.into(),
            passed: true,
            error_message: None,
            duration,
        }
    }

    pub fn failed(name: impl Into<String>, error_message: Option<String>, duration: Duration) -> Self {
        Self {
            name: name.into(),
            passed: false,
            error_message,
            duration,
        }
    }
}

/// All results of a run in declaration order, plus the verdict
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateReport {
    results: Vec<ProbeResult>,
    passed_count: usize,
    total_count: usize,
    overall_success: bool,
}

impl AggregateReport {
    /// Build the report; counts and the verdict are derived from `results`
    pub fn new(results: Vec<ProbeResult>) -> Self {
        let passed_count = results.iter().filter(|r| r.passed).count();
        let total_count = results.len();

        Self {
            results,
            passed_count,
            total_count,
            overall_success: passed_count == total_count,
        }
    }

    pub fn results(&self) -> &[ProbeResult] {
        &self.results
    }

    pub fn passed_count(&self) -> usize {
        self.passed_count
    }

    pub fn total_count(&self) -> usize {
        self.total_count
    }

    pub fn overall_success(&self) -> bool {
        self.overall_success
    }

    pub fn failures(&self) -> impl Iterator<Item = &ProbeResult> {
        self.results.iter().filter(|r| !r.passed)
    }
}
