use smokeprobe_core::AggregateReport;
use std::process::ExitCode;

/// Process exit status derived from a run's verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    /// Every probe passed (exit code 0)
    Success,
    /// At least one probe failed (exit code 1)
    Failure,
}

impl ExitStatus {
    pub fn from_report(report: &AggregateReport) -> Self {
        if report.overall_success() {
            ExitStatus::Success
        } else {
            ExitStatus::Failure
        }
    }

    pub fn code(self) -> u8 {
        match self {
            ExitStatus::Success => 0,
            ExitStatus::Failure => 1,
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status.code())
    }
}

impl From<ExitStatus> for i32 {
    fn from(status: ExitStatus) -> Self {
        status.code() as i32
    }
}
