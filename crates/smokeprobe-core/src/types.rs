use crate::results::ProbeOutcome;

/// HTTP method a probe issues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HttpMethod::Get => write!(f, "GET"),
            HttpMethod::Post => write!(f, "POST"),
        }
    }
}

/// Where an HTTP probe goes. Host and port come from the harness config.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpTarget {
    pub method: HttpMethod,
    pub path: String,
    /// Sent as `application/json` when present
    pub body: Option<serde_json::Value>,
}

impl HttpTarget {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            path: path.into(),
            body: None,
        }
    }

    pub fn post_json(path: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            method: HttpMethod::Post,
            path: path.into(),
            body: Some(body),
        }
    }
}

impl std::fmt::Display for HttpTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}

/// Pass criterion applied to an HTTP probe's outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuccessCriterion {
    /// Status in 200..=299
    Status2xx,
    /// Status is exactly this code
    StatusEquals(u16),
    /// Status in 200..=299 and the body contains the literal (case-sensitive)
    Status2xxContaining(String),
}

impl SuccessCriterion {
    /// Judge an outcome. A transport failure never passes.
    pub fn evaluate(&self, outcome: &ProbeOutcome) -> bool {
        let ProbeOutcome::Response { status, body } = outcome else {
            return false;
        };

        match self {
            SuccessCriterion::Status2xx => is_2xx(*status),
            SuccessCriterion::StatusEquals(expected) => status == expected,
            SuccessCriterion::Status2xxContaining(needle) => {
                is_2xx(*status) && body.contains(needle.as_str())
            }
        }
    }
}

impl std::fmt::Display for SuccessCriterion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SuccessCriterion::Status2xx => write!(f, "status 2xx"),
            SuccessCriterion::StatusEquals(code) => write!(f, "status == {}", code),
            SuccessCriterion::Status2xxContaining(needle) => {
                write!(f, "status 2xx, body contains {:?}", needle)
            }
        }
    }
}

fn is_2xx(status: u16) -> bool {
    (200..300).contains(&status)
}

/// What a probe does
#[derive(Debug, Clone, PartialEq)]
pub enum ProbeAction {
    /// One HTTP request against the service under test
    HttpRequest {
        target: HttpTarget,
        criterion: SuccessCriterion,
    },
    /// In-process check that the required external tools are available
    Capability,
}

/// Immutable definition of a single probe
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeSpec {
    pub name: String,
    pub action: ProbeAction,
}

impl ProbeSpec {
    pub fn http(name: impl Into<String>, target: HttpTarget, criterion: SuccessCriterion) -> Self {
        Self {
            name: name.into(),
            action: ProbeAction::HttpRequest { target, criterion },
        }
    }

    pub fn capability(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            action: ProbeAction::Capability,
        }
    }
}

impl std::fmt::Display for ProbeSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.action {
            ProbeAction::HttpRequest { target, criterion } => {
                write!(f, "{}: {} ({})", self.name, target, criterion)
            }
            ProbeAction::Capability => write!(f, "{}: capability check", self.name),
        }
    }
}
