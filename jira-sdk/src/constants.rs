// ABOUTME: Centralized constants for the Jira SDK
// ABOUTME: Contains REST base paths, timeouts, fallback signatures and request defaults

/// HTTP and request timeouts
pub mod timeouts {
    use std::time::Duration;

    /// Default timeout for HTTP requests
    pub const HTTP_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
}

/// REST base paths, relative to the configured server
pub mod paths {
    pub const REST_V2: &str = "/rest/api/2";
    pub const REST_V3: &str = "/rest/api/3";
    pub const AGILE: &str = "/rest/agile/1.0";
}

/// Environment variables consulted by the credential resolver
pub mod env {
    pub const HOST: &str = "JIRA_HOST";
    pub const API_TOKEN: &str = "JIRA_API_TOKEN";
    pub const USERNAME: &str = "JIRA_USERNAME";
    pub const DOMAIN: &str = "JIRA_DOMAIN";
    pub const API_VERSION: &str = "JIRA_API_VERSION";
}

/// Search and comment request defaults
pub mod requests {
    pub const DEFAULT_MAX_RESULTS: u32 = 50;

    pub const DEFAULT_SEARCH_FIELDS: &[&str] =
        &["summary", "status", "assignee", "created", "updated"];

    /// Role a comment is restricted to when posted as internal
    pub const INTERNAL_VISIBILITY_ROLE: &str = "Administrators";
}

/// Error text fragments that mark an API version endpoint as unavailable
pub mod fallback {
    pub const REMOVED_SIGNATURES: &[&str] = &[
        "has been removed",
        "is no longer available",
        "is no longer supported",
        "endpoint removed",
    ];

    /// Deprecated search endpoint responses point callers at the replacement
    pub const DEPRECATED_SEARCH_SIGNATURE: &str = "/search/jql";
}

pub const USER_AGENT: &str = concat!("jira-cli/", env!("CARGO_PKG_VERSION"));
