use clap::error::ErrorKind;
use clap::Parser;
use smokeprobe_runtime::{
    default_plan, ExitStatus, HarnessConfig, ReportStyle, ResultReporter, TestRunner,
};
use std::process::ExitCode;
use std::time::Duration;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(
    name = "smokeprobe",
    version,
    about = "Smoke-test a freshly built service and exit non-zero on any failure"
)]
struct Cli {
    /// Host of the service under test
    #[arg(long, env = "SMOKE_HOST", default_value = "127.0.0.1")]
    host: String,
    /// Port of the service under test
    #[arg(long, env = "PORT", default_value_t = smokeprobe_runtime::config::DEFAULT_PORT)]
    port: u16,
    /// Milliseconds to wait before the first probe (0 disables the wait)
    #[arg(long, env = "SMOKE_WARMUP_MS", default_value_t = 2000)]
    warmup_ms: u64,
    /// ffmpeg command the capability check runs
    #[arg(long, env = "FFMPEG_PATH", default_value = "ffmpeg")]
    ffmpeg: String,
    /// ffprobe command the capability check runs
    #[arg(long, env = "FFPROBE_PATH", default_value = "ffprobe")]
    ffprobe: String,
    /// Print the report without ANSI colors (also set by NO_COLOR)
    #[arg(long)]
    no_color: bool,
    /// Print the probe plan and exit without probing
    #[arg(long)]
    list: bool,
}

impl Cli {
    fn harness_config(&self) -> HarnessConfig {
        HarnessConfig {
            host: self.host.clone(),
            port: self.port,
            warmup: Duration::from_millis(self.warmup_ms),
            tools: vec![self.ffmpeg.clone(), self.ffprobe.clone()],
        }
    }

    fn report_style(&self) -> ReportStyle {
        let no_color_env = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
        if self.no_color || no_color_env {
            ReportStyle::plain()
        } else {
            ReportStyle::colored()
        }
    }
}

/// Help and version requests exit 0; any other parse error (an unparsable
/// PORT, an unknown flag) is a failed run and exits 1, not clap's usual 2.
fn parse_error_status(err: &clap::Error) -> ExitStatus {
    match err.kind() {
        ErrorKind::DisplayHelp
        | ErrorKind::DisplayVersion
        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => ExitStatus::Success,
        _ => ExitStatus::Failure,
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> miette::Result<ExitCode> {
    // Logs go to stderr; stdout carries only the report
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let status = parse_error_status(&e);
            if let Err(io) = e.print() {
                error!("Failed to write usage: {}", io);
            }
            return Ok(status.into());
        }
    };
    let config = cli.harness_config();
    config.validate()?;

    let plan = default_plan();

    if cli.list {
        for spec in &plan {
            println!("{}", spec);
        }
        return Ok(ExitCode::SUCCESS);
    }

    info!("Starting smoke tests against {}", config.base_url());

    let runner = TestRunner::from_config(&config, plan)?;
    let report = runner.run().await;

    let reporter = ResultReporter::new(cli.report_style());
    if let Err(e) = reporter.print(&report) {
        error!("Failed to write report: {}", e);
    }

    let status = ExitStatus::from_report(&report);
    info!(
        "{}/{} probes passed, exiting with {}",
        report.passed_count(),
        report.total_count(),
        status.code()
    );

    Ok(status.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_explicit_flags() {
        let cli = Cli::try_parse_from([
            "smokeprobe",
            "--host",
            "localhost",
            "--port",
            "8080",
            "--warmup-ms",
            "0",
            "--ffmpeg",
            "/opt/ffmpeg/bin/ffmpeg",
            "--ffprobe",
            "/opt/ffmpeg/bin/ffprobe",
            "--no-color",
        ])
        .unwrap();

        let config = cli.harness_config();
        assert_eq!(config.base_url(), "http://localhost:8080");
        assert_eq!(config.warmup, Duration::ZERO);
        assert_eq!(
            config.tools,
            vec!["/opt/ffmpeg/bin/ffmpeg", "/opt/ffmpeg/bin/ffprobe"]
        );
        assert_eq!(cli.report_style(), ReportStyle::plain());
        assert!(!cli.list);
    }

    #[test]
    fn test_cli_list_flag() {
        let cli = Cli::try_parse_from(["smokeprobe", "--list", "--port", "3000"]).unwrap();
        assert!(cli.list);
    }

    #[test]
    fn test_cli_bad_port_exits_with_failure() {
        for port in ["70000", "abc", "-1"] {
            let err = Cli::try_parse_from(["smokeprobe", "--port", port]).unwrap_err();
            assert_eq!(parse_error_status(&err), ExitStatus::Failure, "port {}", port);
            assert_eq!(i32::from(parse_error_status(&err)), 1);
        }
    }

    #[test]
    fn test_cli_unknown_flag_exits_with_failure() {
        let err = Cli::try_parse_from(["smokeprobe", "--verbose"]).unwrap_err();
        assert_eq!(parse_error_status(&err), ExitStatus::Failure);
    }

    #[test]
    fn test_cli_help_and_version_exit_cleanly() {
        let err = Cli::try_parse_from(["smokeprobe", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        assert_eq!(parse_error_status(&err), ExitStatus::Success);

        let err = Cli::try_parse_from(["smokeprobe", "--version"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayVersion);
        assert_eq!(parse_error_status(&err), ExitStatus::Success);
    }

    #[test]
    fn test_cli_port_zero_fails_validation() {
        let cli = Cli::try_parse_from(["smokeprobe", "--port", "0"]).unwrap();
        assert!(cli.harness_config().validate().is_err());
    }

    #[test]
    fn test_cli_remote_host_fails_validation() {
        let cli = Cli::try_parse_from(["smokeprobe", "--host", "example.com"]).unwrap();
        assert!(cli.harness_config().validate().is_err());
    }
}
