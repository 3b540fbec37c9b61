use smokeprobe_core::{HttpTarget, ProbeSpec, SuccessCriterion};

/// Literal the frontend page must contain
pub const DOCTYPE_MARKER: &str = "<!doctype html>";

/// The fixed, ordered probe plan run against every build
pub fn default_plan() -> Vec<ProbeSpec> {
    vec![
        ProbeSpec::http(
            "Health check",
            HttpTarget::get("/health"),
            SuccessCriterion::Status2xx,
        ),
        ProbeSpec::http(
            "Models API",
            HttpTarget::get("/api/models"),
            SuccessCriterion::Status2xx,
        ),
        ProbeSpec::http(
            "Frontend",
            HttpTarget::get("/index.html"),
            SuccessCriterion::Status2xxContaining(DOCTYPE_MARKER.to_string()),
        ),
        ProbeSpec::capability("Media tools"),
        ProbeSpec::http(
            "404 handling",
            HttpTarget::get("/nonexistent"),
            SuccessCriterion::StatusEquals(404),
        ),
    ]
}
