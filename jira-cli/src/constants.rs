// ABOUTME: Centralized constants for the Jira CLI application
// ABOUTME: Contains limits, display widths, settings locations, and progress timings

/// Default limits for issue queries
pub mod limits {
    pub const DEFAULT_ISSUE_LIMIT: u32 = 20;
    pub const MAX_ISSUE_LIMIT: u32 = 1000;
}

/// Timeout configurations for various operations
pub mod timeouts {
    /// Spinner tick interval for smooth animation
    pub const PROGRESS_BAR_TICK_MS: u64 = 80;
}

/// UI and formatting constants
pub mod ui {
    /// Width of the rule under detail view headers
    pub const BORDER_LINE_LENGTH: usize = 60;

    pub const SUMMARY_MAX_CHARS: usize = 50;
    pub const COMMENT_BODY_MAX_CHARS: usize = 150;

    /// Timestamps in tables and detail views
    pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

    pub const NOT_AVAILABLE: &str = "N/A";
    pub const UNASSIGNED: &str = "Unassigned";
}

/// Settings file location
pub mod settings {
    /// Overrides the settings file path
    pub const CONFIG_PATH_ENV: &str = "JIRA_CLI_CONFIG_PATH";
    pub const XDG_CONFIG_HOME_ENV: &str = "XDG_CONFIG_HOME";
    pub const CONFIG_DIR: &str = "jira-cli";
    pub const CONFIG_FILE: &str = "config.toml";
}

/// Values with special meaning in filters
pub mod jql {
    pub const CURRENT_USER: &str = "currentUser";
    pub const DEFAULT_QUERY: &str = "ORDER BY updated DESC";
}
