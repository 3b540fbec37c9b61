use reqwest::{redirect, Client, Method};
use smokeprobe_core::{HttpMethod, HttpTarget, ProbeOutcome, Result, SmokeError};
use tracing::debug;

/// Issues single HTTP requests against the service under test
///
/// Every request resolves to a `ProbeOutcome`; transport failures are folded
/// into `ProbeOutcome::TransportError` instead of being returned as errors.
/// The client carries no timeout, so a hung service stalls the probe.
pub struct Prober {
    base_url: String,
    client: Client,
}

impl Prober {
    /// Redirects are reported as-is rather than followed, and proxy
    /// environment variables are ignored: one request goes straight to the
    /// service per probe.
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .redirect(redirect::Policy::none())
            .no_proxy()
            .build()
            .map_err(|e| SmokeError::http_client(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Perform one request and buffer the full response body
    pub async fn execute(&self, target: &HttpTarget) -> ProbeOutcome {
        let url = format!("{}{}", self.base_url, target.path);
        debug!("{} {}", target.method, url);

        let mut request = self.client.request(to_method(target.method), &url);
        if let Some(body) = &target.body {
            request = request.json(body);
        }

        let resp = match request.send().await {
            Ok(resp) => resp,
            Err(e) => {
                return ProbeOutcome::TransportError(format!(
                    "{} {} failed: {}",
                    target.method,
                    url,
                    error_chain(&e)
                ))
            }
        };

        let status = resp.status().as_u16();
        match resp.text().await {
            Ok(body) => {
                debug!("{} {} -> {} ({} bytes)", target.method, url, status, body.len());
                ProbeOutcome::Response { status, body }
            }
            Err(e) => ProbeOutcome::TransportError(format!(
                "reading body of {} {} failed: {}",
                target.method,
                url,
                error_chain(&e)
            )),
        }
    }
}

fn to_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
    }
}

/// reqwest's top-level message hides the cause ("error sending request");
/// append the source chain so "connection refused" shows up in the report.
fn error_chain(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
