use crate::capability::{CapabilityProbe, MediaToolChecker};
use crate::config::HarnessConfig;
use crate::prober::Prober;
use crate::traits::CapabilityChecker;
use smokeprobe_core::{AggregateReport, ProbeAction, ProbeResult, ProbeSpec, Result};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Runs a probe plan strictly in declaration order
///
/// Each probe is awaited to completion before the next starts, so results come
/// out in plan order and the service never sees more than one probe at once.
/// A failing probe does not stop the run.
pub struct TestRunner {
    specs: Vec<ProbeSpec>,
    prober: Prober,
    capability: CapabilityProbe,
    warmup: Duration,
}

impl TestRunner {
    pub fn new(
        specs: Vec<ProbeSpec>,
        prober: Prober,
        checker: Arc<dyn CapabilityChecker>,
        warmup: Duration,
    ) -> Self {
        Self {
            specs,
            prober,
            capability: CapabilityProbe::new(checker),
            warmup,
        }
    }

    /// Wire a runner against the configured service and media tools
    pub fn from_config(config: &HarnessConfig, specs: Vec<ProbeSpec>) -> Result<Self> {
        Ok(Self::new(
            specs,
            Prober::new(&config.base_url())?,
            Arc::new(MediaToolChecker::new(config.tools.clone())),
            config.warmup,
        ))
    }

    pub fn specs(&self) -> &[ProbeSpec] {
        &self.specs
    }

    /// Wait out the warm-up, run every probe once, and aggregate
    pub async fn run(&self) -> AggregateReport {
        if !self.warmup.is_zero() {
            info!("Waiting {:?} for the service to settle", self.warmup);
            tokio::time::sleep(self.warmup).await;
        }

        info!(
            "Running {} probes against {}",
            self.specs.len(),
            self.prober.base_url()
        );

        let mut results = Vec::with_capacity(self.specs.len());
        for (i, spec) in self.specs.iter().enumerate() {
            debug!("Probe {}/{}: {}", i + 1, self.specs.len(), spec);
            let result = self.run_probe(spec).await;

            if result.passed {
                info!("{} passed in {:?}", result.name, result.duration);
            } else {
                warn!(
                    "{} failed in {:?}: {}",
                    result.name,
                    result.duration,
                    result.error_message.as_deref().unwrap_or("criterion not met")
                );
            }
            results.push(result);
        }

        AggregateReport::new(results)
    }

    async fn run_probe(&self, spec: &ProbeSpec) -> ProbeResult {
        match &spec.action {
            ProbeAction::HttpRequest { target, criterion } => {
                let start = Instant::now();
                let outcome = self.prober.execute(target).await;
                let duration = start.elapsed();

                if criterion.evaluate(&outcome) {
                    ProbeResult::passed(&spec.name, duration)
                } else {
                    if outcome.error_message().is_none() {
                        debug!(
                            "{}: got status {}, wanted {}",
                            spec.name,
                            outcome.status_code(),
                            criterion
                        );
                    }
                    ProbeResult::failed(
                        &spec.name,
                        outcome.error_message().map(str::to_string),
                        duration,
                    )
                }
            }
            ProbeAction::Capability => self.capability.execute(&spec.name).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockCapabilityChecker;
    use crate::plan::default_plan;
    use smokeprobe_core::{HttpTarget, SuccessCriterion};
    use std::collections::HashMap;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Minimal routing HTTP server: path -> (status line, body).
    /// Unknown paths get a 404. Runs until the test ends.
    async fn spawn_service(routes: Vec<(&'static str, &'static str, &'static str)>) -> u16 {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let routes: HashMap<_, _> = routes
            .into_iter()
            .map(|(path, status, body)| (path, (status, body)))
            .collect();
        let routes = Arc::new(routes);

        tokio::spawn(async move {
            loop {
                let Ok((mut stream, _)) = listener.accept().await else {
                    return;
                };
                let routes = routes.clone();
                tokio::spawn(async move {
                    let mut buf = [0u8; 4096];
                    let n = stream.read(&mut buf).await.unwrap_or(0);
                    let request = String::from_utf8_lossy(&buf[..n]);
                    let path = request
                        .lines()
                        .next()
                        .and_then(|line| line.split_whitespace().nth(1))
                        .unwrap_or("/")
                        .to_string();

                    let (status, body) = routes
                        .get(path.as_str())
                        .copied()
                        .unwrap_or(("404 Not Found", "Not Found"));
                    let response = format!(
                        "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                        status,
                        body.len(),
                        body
                    );
                    let _ = stream.write_all(response.as_bytes()).await;
                    let _ = stream.shutdown().await;
                });
            }
        });

        port
    }

    fn healthy_routes() -> Vec<(&'static str, &'static str, &'static str)> {
        vec![
            ("/health", "200 OK", r#"{"status":"ok"}"#),
            ("/api/models", "200 OK", r#"{"models":[]}"#),
            (
                "/index.html",
                "200 OK",
                "<!doctype html><html><body>app</body></html>",
            ),
        ]
    }

    fn runner_for(port: u16, checker: Arc<dyn CapabilityChecker>) -> TestRunner {
        TestRunner::new(
            default_plan(),
            Prober::new(&format!("http://127.0.0.1:{}", port)).unwrap(),
            checker,
            Duration::ZERO,
        )
    }

    fn media_tools_ok() -> Arc<dyn CapabilityChecker> {
        Arc::new(MockCapabilityChecker::all_available(&["ffmpeg", "ffprobe"]))
    }

    fn names(report: &AggregateReport) -> Vec<&str> {
        report.results().iter().map(|r| r.name.as_str()).collect()
    }

    #[tokio::test]
    async fn test_all_probes_pass() {
        let port = spawn_service(healthy_routes()).await;
        let report = runner_for(port, media_tools_ok()).run().await;

        assert_eq!(report.passed_count(), 5);
        assert_eq!(report.total_count(), 5);
        assert!(report.overall_success());
        assert!(report.results().iter().all(|r| r.error_message.is_none()));
    }

    #[tokio::test]
    async fn test_missing_route_answering_200_fails_only_404_probe() {
        let mut routes = healthy_routes();
        routes.push(("/nonexistent", "200 OK", "catch-all"));
        let port = spawn_service(routes).await;

        let report = runner_for(port, media_tools_ok()).run().await;

        let failed: Vec<_> = report.failures().map(|r| r.name.as_str()).collect();
        assert_eq!(failed, vec!["404 handling"]);
        assert_eq!(report.passed_count(), 4);
        assert!(!report.overall_success());
        // An assertion mismatch carries no error message
        assert_eq!(report.results()[4].error_message, None);
    }

    #[tokio::test]
    async fn test_unreachable_service_still_runs_capability_check() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let checker = Arc::new(MockCapabilityChecker::all_available(&["ffmpeg", "ffprobe"]));
        let report = runner_for(port, checker.clone()).run().await;

        assert_eq!(
            names(&report),
            vec![
                "Health check",
                "Models API",
                "Frontend",
                "Media tools",
                "404 handling"
            ]
        );
        for (i, result) in report.results().iter().enumerate() {
            if i == 3 {
                assert!(result.passed);
                assert_eq!(result.error_message, None);
            } else {
                assert!(!result.passed, "{} should fail", result.name);
                assert!(result.error_message.is_some(), "{} lost its error", result.name);
            }
        }
        assert_eq!(report.passed_count(), 1);
        assert!(!report.overall_success());
        assert_eq!(checker.calls(), 1);
    }

    #[tokio::test]
    async fn test_frontend_without_doctype_fails() {
        let routes = vec![
            ("/health", "200 OK", "ok"),
            ("/api/models", "200 OK", "[]"),
            ("/index.html", "200 OK", "<html>no doctype</html>"),
        ];
        let port = spawn_service(routes).await;

        let report = runner_for(port, media_tools_ok()).run().await;
        let failed: Vec<_> = report.failures().map(|r| r.name.as_str()).collect();
        assert_eq!(failed, vec!["Frontend"]);
    }

    #[tokio::test]
    async fn test_capability_error_does_not_abort_run() {
        let port = spawn_service(healthy_routes()).await;
        let checker = Arc::new(MockCapabilityChecker::failing("tool probe crashed"));
        let report = runner_for(port, checker).run().await;

        assert_eq!(report.total_count(), 5);
        assert_eq!(report.passed_count(), 4);
        let media = &report.results()[3];
        assert!(!media.passed);
        assert_eq!(
            media.error_message.as_deref(),
            Some("Capability check failed: tool probe crashed")
        );
        // The probe after the failing one still ran and passed
        assert!(report.results()[4].passed);
    }

    #[tokio::test]
    async fn test_server_errors_fail_2xx_probes() {
        let routes = vec![
            ("/health", "503 Service Unavailable", "starting"),
            ("/api/models", "500 Internal Server Error", "boom"),
            ("/index.html", "200 OK", "<!doctype html>"),
        ];
        let port = spawn_service(routes).await;

        let report = runner_for(port, media_tools_ok()).run().await;
        let failed: Vec<_> = report.failures().map(|r| r.name.as_str()).collect();
        assert_eq!(failed, vec!["Health check", "Models API"]);
    }

    #[tokio::test]
    async fn test_custom_plan_keeps_declaration_order() {
        let port = spawn_service(healthy_routes()).await;
        let specs = vec![
            ProbeSpec::http("z-last-alpha", HttpTarget::get("/missing"), SuccessCriterion::Status2xx),
            ProbeSpec::capability("m-tools"),
            ProbeSpec::http("a-health", HttpTarget::get("/health"), SuccessCriterion::Status2xx),
        ];
        let runner = TestRunner::new(
            specs,
            Prober::new(&format!("http://127.0.0.1:{}", port)).unwrap(),
            media_tools_ok(),
            Duration::ZERO,
        );

        let report = runner.run().await;
        assert_eq!(names(&report), vec!["z-last-alpha", "m-tools", "a-health"]);
        assert_eq!(
            report.results().iter().map(|r| r.passed).collect::<Vec<_>>(),
            vec![false, true, true]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_warmup_delays_first_probe() {
        let runner = TestRunner::new(
            vec![ProbeSpec::capability("Media tools")],
            Prober::new("http://127.0.0.1:9").unwrap(),
            media_tools_ok(),
            Duration::from_secs(2),
        );

        let start = tokio::time::Instant::now();
        let report = runner.run().await;
        assert!(start.elapsed() >= Duration::from_secs(2));
        assert!(report.overall_success());
    }

    #[tokio::test]
    async fn test_empty_plan_succeeds() {
        let runner = TestRunner::new(
            vec![],
            Prober::new("http://127.0.0.1:9").unwrap(),
            media_tools_ok(),
            Duration::ZERO,
        );
        let report = runner.run().await;
        assert_eq!(report.total_count(), 0);
        assert!(report.overall_success());
    }

    #[test]
    fn test_from_config() {
        let config = HarnessConfig {
            port: 8123,
            ..Default::default()
        };
        let runner = TestRunner::from_config(&config, default_plan()).unwrap();
        assert_eq!(runner.specs().len(), 5);
        assert_eq!(runner.prober.base_url(), "http://127.0.0.1:8123");
        assert_eq!(runner.warmup, Duration::from_secs(2));
    }
}
