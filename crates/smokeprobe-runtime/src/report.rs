use smokeprobe_core::AggregateReport;
use std::fmt::Write as _;
use std::io::Write as _;

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Formatting table for the console report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportStyle {
    pub pass_marker: &'static str,
    pub fail_marker: &'static str,
    pub pass_color: &'static str,
    pub fail_color: &'static str,
    pub emphasis: &'static str,
    pub reset: &'static str,
}

impl ReportStyle {
    /// No escape sequences
    pub fn plain() -> Self {
        Self {
            pass_marker: "✓",
            fail_marker: "✗",
            pass_color: "",
            fail_color: "",
            emphasis: "",
            reset: "",
        }
    }

    /// ANSI green/red markers and a bold summary
    pub fn colored() -> Self {
        Self {
            pass_color: GREEN,
            fail_color: RED,
            emphasis: BOLD,
            reset: RESET,
            ..Self::plain()
        }
    }

    fn marker(&self, passed: bool) -> String {
        if passed {
            format!("{}{}{}", self.pass_color, self.pass_marker, self.reset)
        } else {
            format!("{}{}{}", self.fail_color, self.fail_marker, self.reset)
        }
    }
}

impl Default for ReportStyle {
    fn default() -> Self {
        Self::colored()
    }
}

/// Renders an aggregate report as console text
pub struct ResultReporter {
    style: ReportStyle,
}

impl ResultReporter {
    pub fn new(style: ReportStyle) -> Self {
        Self { style }
    }

    /// One line per result, a count line, then the verdict
    pub fn render(&self, report: &AggregateReport) -> String {
        let style = &self.style;
        let mut out = String::new();

        for result in report.results() {
            let _ = write!(out, "{} {}", style.marker(result.passed), result.name);
            if let Some(message) = &result.error_message {
                let _ = write!(out, " ({})", message);
            }
            out.push('\n');
        }

        let _ = writeln!(
            out,
            "{}Results: {}/{} passed{}",
            style.emphasis,
            report.passed_count(),
            report.total_count(),
            style.reset
        );

        if report.overall_success() {
            let _ = writeln!(
                out,
                "{} {}All smoke tests passed{}",
                style.marker(true),
                style.pass_color,
                style.reset
            );
        } else {
            let _ = writeln!(
                out,
                "{} {}Some smoke tests failed{}",
                style.marker(false),
                style.fail_color,
                style.reset
            );
        }

        out
    }

    /// Write the rendered report to stdout
    pub fn print(&self, report: &AggregateReport) -> std::io::Result<()> {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(self.render(report).as_bytes())?;
        stdout.flush()
    }
}
