use crate::capability::DEFAULT_MEDIA_TOOLS;
use smokeprobe_core::{Result, SmokeError};
use std::net::IpAddr;
use std::time::Duration;

/// Default port of the service under test
pub const DEFAULT_PORT: u16 = 3000;

/// Default deferred start before the first probe
pub const DEFAULT_WARMUP: Duration = Duration::from_secs(2);

/// Configuration for one harness run
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Host of the service under test
    pub host: String,
    /// Port of the service under test
    pub port: u16,
    /// Wait before the first probe so the service can finish starting
    pub warmup: Duration,
    /// Commands the capability check invokes
    pub tools: Vec<String>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
            warmup: DEFAULT_WARMUP,
            tools: DEFAULT_MEDIA_TOOLS.iter().map(|t| t.to_string()).collect(),
        }
    }
}

impl HarnessConfig {
    pub fn base_url(&self) -> String {
        match self.host.parse::<IpAddr>() {
            Ok(IpAddr::V6(ip)) => format!("http://[{}]:{}", ip, self.port),
            _ => format!("http://{}:{}", self.host, self.port),
        }
    }

    /// Reject settings that can only produce a meaningless run
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(SmokeError::invalid_config(
                "host must not be empty",
                "Pass --host 127.0.0.1 or unset SMOKE_HOST",
            ));
        }
        if !is_loopback(&self.host) {
            return Err(SmokeError::invalid_config(
                format!("host '{}' is not a loopback address", self.host),
                "The harness only probes a service on this machine; use 127.0.0.1, ::1 or localhost",
            ));
        }
        if self.port == 0 {
            return Err(SmokeError::invalid_config(
                "port must be between 1 and 65535",
                "Pass --port or set PORT to the port the service listens on",
            ));
        }
        if self.tools.is_empty() {
            return Err(SmokeError::invalid_config(
                "no media tools configured",
                "Configure the ffmpeg and ffprobe commands",
            ));
        }
        Ok(())
    }
}

fn is_loopback(host: &str) -> bool {
    let host = host.trim_start_matches('[').trim_end_matches(']');
    host.eq_ignore_ascii_case("localhost")
        || host.parse::<IpAddr>().is_ok_and(|ip| ip.is_loopback())
}
