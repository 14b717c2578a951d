// ABOUTME: Error taxonomy for the Jira SDK with user-friendly messages
// ABOUTME: Every transport or HTTP failure is classified into one of these kinds

use thiserror::Error;

#[derive(Debug, Error)]
pub enum JiraError {
    #[error("Jira CLI is not configured.\n{guidance}")]
    ConfigurationMissing { guidance: String },

    #[error("Authentication failed. Please check your credentials.")]
    AuthenticationFailed,

    #[error("Access denied. You don't have permission to perform this action.")]
    AccessDenied,

    #[error("Resource not found.")]
    NotFound,

    #[error("{message}")]
    RemoteApi { status: u16, message: String },

    #[error("Network error. Please check your connection and server URL. ({message})")]
    Network { message: String },

    #[error("Invalid API response: {message}")]
    InvalidResponse { message: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },
}

impl JiraError {
    pub fn help_text(&self) -> Option<&'static str> {
        match self {
            JiraError::ConfigurationMissing { .. } => {
                Some("Run `jira init` for guided setup, or `jira config --show` to inspect settings")
            }
            JiraError::AuthenticationFailed => Some(
                "Check your API token. Leave the username empty for Bearer auth, or set it for Basic auth",
            ),
            JiraError::AccessDenied => Some("Ask a Jira administrator for access to this resource"),
            JiraError::NotFound => Some("Check the key or id you passed (e.g., PROJ-123)"),
            JiraError::Network { .. } => {
                Some("Check your internet connection and the configured server URL")
            }
            _ => None,
        }
    }

    /// HTTP status behind the error, when the remote answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            JiraError::AuthenticationFailed => Some(401),
            JiraError::AccessDenied => Some(403),
            JiraError::NotFound => Some(404),
            JiraError::RemoteApi { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for JiraError {
    fn from(err: serde_json::Error) -> Self {
        JiraError::InvalidResponse {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, JiraError>;
