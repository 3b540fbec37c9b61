// Allow unused assignments for diagnostic fields - they're used by the macros
#![allow(unused_assignments)]

use miette::Diagnostic;
use thiserror::Error;

/// Core error type for smokeprobe operations
#[derive(Error, Debug, Diagnostic)]
pub enum SmokeError {
    /// Invalid configuration
    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(smokeprobe::invalid_config), help("{suggestion}"))]
    InvalidConfig {
        #[allow(unused)]
        message: String,
        #[allow(unused)]
        suggestion: String,
    },

    /// External command failed to run
    #[error("Command '{command}' failed with exit code {exit_code}")]
    #[diagnostic(code(smokeprobe::command_failed), help("stderr: {stderr}"))]
    CommandFailed {
        #[allow(unused)]
        command: String,
        #[allow(unused)]
        exit_code: i32,
        #[allow(unused)]
        stderr: String,
    },

    /// Capability collaborator could not produce a report
    #[error("Capability check failed: {message}")]
    #[diagnostic(
        code(smokeprobe::capability_check_failed),
        help("Verify the required tools are installed and on PATH, or point --ffmpeg/--ffprobe at them")
    )]
    CapabilityCheckFailed {
        #[allow(unused)]
        message: String,
    },

    /// HTTP client could not be constructed
    #[error("Failed to build HTTP client: {message}")]
    #[diagnostic(
        code(smokeprobe::http_client),
        help("Check that the TLS backend can initialize on this host")
    )]
    HttpClient {
        #[allow(unused)]
        message: String,
    },
}

/// Result type alias for smokeprobe operations
pub type Result<T> = std::result::Result<T, SmokeError>;

impl SmokeError {
    /// Create an InvalidConfig error
    pub fn invalid_config(message: impl Into<String>, suggestion: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
            suggestion: suggestion.into(),
        }
    }

    /// Create a CommandFailed error
    pub fn command_failed(
        command: impl Into<String>,
        exit_code: i32,
        stderr: impl Into<String>,
    ) -> Self {
        Self::CommandFailed {
            command: command.into(),
            exit_code,
            stderr: stderr.into(),
        }
    }

    /// Create a CapabilityCheckFailed error
    pub fn capability_check_failed(message: impl Into<String>) -> Self {
        Self::CapabilityCheckFailed {
            message: message.into(),
        }
    }

    /// Create an HttpClient error
    pub fn http_client(message: impl Into<String>) -> Self {
        Self::HttpClient {
            message: message.into(),
        }
    }
}
