// ABOUTME: This module handles output formatting for the Jira CLI
// ABOUTME: It provides table and JSON formatters plus detail views with color support

use anyhow::Result;
use chrono::DateTime;
use jira_sdk::{
    Board, Comment, Component, ConnectionStatus, Issue, Project, ProjectVersion, Sprint, User,
};
use owo_colors::OwoColorize;
use serde::Serialize;
use std::fmt::Write;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::constants::ui;
use crate::types::SprintState;

pub trait OutputFormat {
    fn format_issues(&self, issues: &[Issue]) -> Result<String>;
    fn format_projects(&self, projects: &[Project]) -> Result<String>;
    fn format_sprints(&self, sprints: &[Sprint]) -> Result<String>;
    fn format_boards(&self, boards: &[Board]) -> Result<String>;
    fn format_comments(&self, comments: &[Comment]) -> Result<String>;
}

/// Cut `text` to `max_chars` characters and mark the cut with `...`
pub fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => format!("{}...", &text[..byte_index]),
        None => text.to_string(),
    }
}

/// Render a timestamp as `YYYY-MM-DD HH:MM` in its own offset
pub fn format_date(value: Option<&str>) -> String {
    let Some(raw) = value.filter(|v| !v.is_empty()) else {
        return ui::NOT_AVAILABLE.to_string();
    };

    DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f%z")
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .map(|date| date.format(ui::DATE_FORMAT).to_string())
        .unwrap_or_else(|_| raw.to_string())
}

/// Web link for an issue, derived from its REST self link when present
pub fn browse_url(issue: &Issue, server: &str) -> String {
    if let Some(self_url) = issue.self_url.as_deref() {
        if let Some(index) = self_url.find("/rest/api/") {
            return format!("{}/browse/{}", &self_url[..index], issue.key);
        }
    }
    format!("{}/browse/{}", server.trim_end_matches('/'), issue.key)
}

pub fn project_url(project: &Project, server: &str) -> String {
    format!("{}/browse/{}", server.trim_end_matches('/'), project.key)
}

fn user_label(user: Option<&User>) -> Option<&str> {
    user.and_then(User::label)
}

/// One-line outcome of a connection test
pub fn connection_summary(status: &ConnectionStatus) -> String {
    match status {
        ConnectionStatus::Connected(user) => {
            format!("Welcome, {}!", user.label().unwrap_or("Jira user"))
        }
        ConnectionStatus::Failed(message) => format!("Connection failed: {}", message),
    }
}

/// Number of sprints per state, in first-seen order
pub fn sprint_summary(sprints: &[Sprint]) -> Vec<(SprintState, usize)> {
    let mut summary: Vec<(SprintState, usize)> = Vec::new();
    for sprint in sprints {
        let state = SprintState::from(sprint.state.as_str());
        match summary.iter_mut().find(|(seen, _)| *seen == state) {
            Some((_, count)) => *count += 1,
            None => summary.push((state, 1)),
        }
    }
    summary
}

pub struct TableFormatter {
    use_color: bool,
}

impl TableFormatter {
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    fn key(&self, key: &str) -> String {
        if self.use_color {
            key.blue().to_string()
        } else {
            key.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        if self.use_color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn dim(&self, text: &str) -> String {
        if self.use_color {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }

    fn format_status(&self, status: Option<&str>) -> String {
        match status {
            Some(name) if self.use_color => name.yellow().to_string(),
            Some(name) => name.to_string(),
            None => ui::NOT_AVAILABLE.to_string(),
        }
    }

    fn format_assignee(&self, assignee: Option<&str>) -> String {
        match assignee {
            Some(name) => name.to_string(),
            None => self.dim(ui::UNASSIGNED),
        }
    }

    fn format_sprint_state(&self, state: &SprintState) -> String {
        let text = state.to_string();
        if !self.use_color {
            return text;
        }
        match state {
            SprintState::Active => text.green().to_string(),
            SprintState::Future => text.yellow().to_string(),
            SprintState::Closed | SprintState::Unknown(_) => text.dimmed().to_string(),
        }
    }

    fn format_release_state(&self, version: &ProjectVersion) -> String {
        let text = version.release_state();
        if !self.use_color {
            return text.to_string();
        }
        if version.released {
            text.green().to_string()
        } else if version.archived {
            text.dimmed().to_string()
        } else {
            text.yellow().to_string()
        }
    }

    fn render<T: Tabled>(rows: Vec<T>) -> String {
        let mut table = Table::new(rows);
        table.with(Style::psql());
        table.to_string()
    }

    pub fn format_issue_details(&self, issue: &Issue, server: &str) -> String {
        let fields = &issue.fields;
        let mut out = String::new();

        let summary = fields.summary.as_deref().unwrap_or(ui::NOT_AVAILABLE);
        let _ = writeln!(out, "{}", self.bold(&format!("{}: {}", issue.key, summary)));
        let _ = writeln!(out, "{}", self.dim(&"─".repeat(ui::BORDER_LINE_LENGTH)));

        let name = |named: &Option<jira_sdk::NamedRef>| {
            named
                .as_ref()
                .map(|n| n.name.clone())
                .unwrap_or_else(|| ui::NOT_AVAILABLE.to_string())
        };

        let status = fields.status.as_ref().map(|s| s.name.as_str());
        let _ = writeln!(out, "{} {}", self.bold("Status:"), self.format_status(status));
        let _ = writeln!(out, "{} {}", self.bold("Type:"), name(&fields.issuetype));
        let _ = writeln!(out, "{} {}", self.bold("Priority:"), name(&fields.priority));
        let _ = writeln!(
            out,
            "{} {}",
            self.bold("Assignee:"),
            self.format_assignee(user_label(fields.assignee.as_ref()))
        );
        let _ = writeln!(
            out,
            "{} {}",
            self.bold("Reporter:"),
            user_label(fields.reporter.as_ref()).unwrap_or(ui::NOT_AVAILABLE)
        );
        let _ = writeln!(
            out,
            "{} {}",
            self.bold("Created:"),
            format_date(fields.created.as_deref())
        );
        let _ = writeln!(
            out,
            "{} {}",
            self.bold("Updated:"),
            format_date(fields.updated.as_deref())
        );

        if let Some(description) = fields.description_text() {
            let _ = writeln!(out, "\n{}", self.bold("Description:"));
            let _ = writeln!(out, "{}", description);
        }

        if !fields.labels.is_empty() {
            let _ = writeln!(out, "\n{} {}", self.bold("Labels:"), fields.labels.join(", "));
        }

        let _ = write!(out, "\n{} {}", self.bold("URL:"), browse_url(issue, server));
        out
    }

    pub fn format_project_details(&self, project: &Project, server: &str) -> String {
        let mut out = String::new();

        let _ = writeln!(
            out,
            "{}",
            self.bold(&format!("{}: {}", project.key, project.name))
        );
        let _ = writeln!(out, "{}", self.dim(&"─".repeat(ui::BORDER_LINE_LENGTH)));
        let _ = writeln!(
            out,
            "{} {}",
            self.bold("Type:"),
            project.project_type_key.as_deref().unwrap_or(ui::NOT_AVAILABLE)
        );
        let _ = writeln!(
            out,
            "{} {}",
            self.bold("Lead:"),
            user_label(project.lead.as_ref()).unwrap_or(ui::NOT_AVAILABLE)
        );
        let _ = writeln!(
            out,
            "{} {}",
            self.bold("Description:"),
            project
                .description
                .as_deref()
                .filter(|d| !d.trim().is_empty())
                .unwrap_or("No description")
        );

        if let Some(category) = &project.project_category {
            let _ = writeln!(out, "{} {}", self.bold("Category:"), category.name);
        }

        if !project.components.is_empty() {
            let _ = writeln!(out, "\n{}", self.bold("Components:"));
            for component in &project.components {
                match component.description.as_deref().filter(|d| !d.is_empty()) {
                    Some(description) => {
                        let _ = writeln!(out, "  • {} - {}", component.name, description);
                    }
                    None => {
                        let _ = writeln!(out, "  • {}", component.name);
                    }
                }
            }
        }

        if !project.versions.is_empty() {
            let _ = writeln!(out, "\n{}", self.bold("Versions:"));
            for version in &project.versions {
                let _ = writeln!(
                    out,
                    "  • {} ({})",
                    version.name,
                    self.format_release_state(version)
                );
            }
        }

        let _ = write!(out, "\n{} {}", self.bold("URL:"), project_url(project, server));
        out
    }

    pub fn format_components(&self, components: &[Component]) -> String {
        let mut out = String::new();
        for component in components {
            let _ = writeln!(out, "• {}", self.bold(&component.name));
            if let Some(description) = component.description.as_deref().filter(|d| !d.is_empty()) {
                let _ = writeln!(out, "  {}", self.dim(description));
            }
            if let Some(lead) = user_label(component.lead.as_ref()) {
                let _ = writeln!(out, "  {} {}", self.dim("Lead:"), lead);
            }
        }
        out.trim_end().to_string()
    }

    pub fn format_versions(&self, versions: &[ProjectVersion]) -> String {
        let mut out = String::new();
        for version in versions {
            let _ = writeln!(
                out,
                "• {} {}",
                self.bold(&version.name),
                self.format_release_state(version)
            );
            if let Some(description) = version.description.as_deref().filter(|d| !d.is_empty()) {
                let _ = writeln!(out, "  {}", self.dim(description));
            }
            if let Some(date) = &version.release_date {
                let _ = writeln!(out, "  {} {}", self.dim("Release Date:"), date);
            }
        }
        out.trim_end().to_string()
    }

    pub fn format_sprint_summary(&self, sprints: &[Sprint]) -> String {
        let mut out = self.bold("Sprint Summary:");
        for (state, count) in sprint_summary(sprints) {
            let _ = write!(out, "\n  {}: {}", self.format_sprint_state(&state), count);
        }
        out
    }
}

#[derive(Tabled)]
struct IssueRow {
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Summary")]
    summary: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Assignee")]
    assignee: String,
    #[tabled(rename = "Created")]
    created: String,
    #[tabled(rename = "Updated")]
    updated: String,
}

#[derive(Tabled)]
struct ProjectRow {
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    project_type: String,
    #[tabled(rename = "Lead")]
    lead: String,
}

#[derive(Tabled)]
struct SprintRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "Start Date")]
    start: String,
    #[tabled(rename = "End Date")]
    end: String,
}

#[derive(Tabled)]
struct BoardRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    board_type: String,
    #[tabled(rename = "Project")]
    project: String,
}

#[derive(Tabled)]
struct CommentRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Author")]
    author: String,
    #[tabled(rename = "Created")]
    created: String,
    #[tabled(rename = "Body")]
    body: String,
}

impl OutputFormat for TableFormatter {
    fn format_issues(&self, issues: &[Issue]) -> Result<String> {
        let rows: Vec<IssueRow> = issues
            .iter()
            .map(|issue| {
                let fields = &issue.fields;
                IssueRow {
                    key: self.key(&issue.key),
                    summary: fields
                        .summary
                        .as_deref()
                        .map(|s| truncate(s, ui::SUMMARY_MAX_CHARS))
                        .unwrap_or_else(|| ui::NOT_AVAILABLE.to_string()),
                    status: self.format_status(fields.status.as_ref().map(|s| s.name.as_str())),
                    assignee: self.format_assignee(user_label(fields.assignee.as_ref())),
                    created: format_date(fields.created.as_deref()),
                    updated: format_date(fields.updated.as_deref()),
                }
            })
            .collect();

        Ok(Self::render(rows))
    }

    fn format_projects(&self, projects: &[Project]) -> Result<String> {
        let rows: Vec<ProjectRow> = projects
            .iter()
            .map(|project| ProjectRow {
                key: self.key(&project.key),
                name: project.name.clone(),
                project_type: project
                    .project_type_key
                    .clone()
                    .unwrap_or_else(|| ui::NOT_AVAILABLE.to_string()),
                lead: user_label(project.lead.as_ref())
                    .unwrap_or(ui::NOT_AVAILABLE)
                    .to_string(),
            })
            .collect();

        Ok(Self::render(rows))
    }

    fn format_sprints(&self, sprints: &[Sprint]) -> Result<String> {
        let rows: Vec<SprintRow> = sprints
            .iter()
            .map(|sprint| SprintRow {
                id: sprint.id,
                name: sprint.name.clone(),
                state: self.format_sprint_state(&SprintState::from(sprint.state.as_str())),
                start: format_date(sprint.start_date.as_deref()),
                end: format_date(sprint.end_date.as_deref()),
            })
            .collect();

        Ok(Self::render(rows))
    }

    fn format_boards(&self, boards: &[Board]) -> Result<String> {
        let rows: Vec<BoardRow> = boards
            .iter()
            .map(|board| BoardRow {
                id: board.id,
                name: board.name.clone(),
                board_type: board.board_type.clone(),
                project: board
                    .location
                    .as_ref()
                    .and_then(|l| l.display_name.clone())
                    .unwrap_or_else(|| ui::NOT_AVAILABLE.to_string()),
            })
            .collect();

        Ok(Self::render(rows))
    }

    fn format_comments(&self, comments: &[Comment]) -> Result<String> {
        let rows: Vec<CommentRow> = comments
            .iter()
            .map(|comment| CommentRow {
                id: comment.id.clone(),
                author: user_label(comment.author.as_ref())
                    .unwrap_or(ui::NOT_AVAILABLE)
                    .to_string(),
                created: format_date(comment.created.as_deref()),
                body: truncate(
                    &comment.body_text().replace('\n', " "),
                    ui::COMMENT_BODY_MAX_CHARS,
                ),
            })
            .collect();

        Ok(Self::render(rows))
    }
}

pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    pub fn format<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(value)?)
        } else {
            Ok(serde_json::to_string(value)?)
        }
    }
}

impl OutputFormat for JsonFormatter {
    fn format_issues(&self, issues: &[Issue]) -> Result<String> {
        self.format(issues)
    }

    fn format_projects(&self, projects: &[Project]) -> Result<String> {
        self.format(projects)
    }

    fn format_sprints(&self, sprints: &[Sprint]) -> Result<String> {
        self.format(sprints)
    }

    fn format_boards(&self, boards: &[Board]) -> Result<String> {
        self.format(boards)
    }

    fn format_comments(&self, comments: &[Comment]) -> Result<String> {
        self.format(comments)
    }
}

/// Pick the formatter for a listing
pub fn formatter(json: bool, pretty: bool, use_color: bool) -> Box<dyn OutputFormat> {
    if json {
        Box::new(JsonFormatter::new(pretty))
    } else {
        Box::new(TableFormatter::new(use_color))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SERVER: &str = "https://x.atlassian.net";

    fn issue_fixture() -> Issue {
        serde_json::from_value(json!({
            "id": "10001",
            "key": "TEST-1",
            "self": "https://x.atlassian.net/rest/api/2/issue/10001",
            "fields": {
                "summary": "Fix login race condition",
                "status": {"name": "In Progress"},
                "issuetype": {"name": "Bug"},
                "priority": {"name": "High"},
                "assignee": {"displayName": "John Doe"},
                "reporter": {"displayName": "Jane Roe"},
                "created": "2024-01-15T10:30:00.000+0000",
                "updated": "2024-01-16T14:45:00.000+0000",
                "description": "Users see a race when logging in from two devices.",
                "labels": ["bug", "authentication"]
            }
        }))
        .unwrap()
    }

    fn sparse_issue(key: &str, summary: Option<&str>) -> Issue {
        let mut fields = json!({});
        if let Some(summary) = summary {
            fields["summary"] = json!(summary);
        }
        serde_json::from_value(json!({"key": key, "fields": fields})).unwrap()
    }

    fn sprint(id: u64, state: &str) -> Sprint {
        Sprint {
            id,
            name: format!("Sprint {}", id),
            state: state.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_truncate_long_summary() {
        let summary = "a".repeat(90);
        let truncated = truncate(&summary, ui::SUMMARY_MAX_CHARS);
        assert_eq!(truncated.chars().count(), 53);
        assert!(truncated.ends_with("..."));
        assert_eq!(truncate("short", ui::SUMMARY_MAX_CHARS), "short");
    }

    #[test]
    fn test_truncate_is_character_based() {
        let text = "é".repeat(60);
        let truncated = truncate(&text, 50);
        assert_eq!(truncated, format!("{}...", "é".repeat(50)));
        assert_eq!(truncate(&"x".repeat(50), 50), "x".repeat(50));
    }

    #[test]
    fn test_format_date() {
        assert_eq!(
            format_date(Some("2024-01-15T10:30:00.000+0000")),
            "2024-01-15 10:30"
        );
        assert_eq!(format_date(Some("2024-01-15T10:30:00Z")), "2024-01-15 10:30");
        assert_eq!(
            format_date(Some("2024-01-15T10:30:00.000-0500")),
            "2024-01-15 10:30"
        );
        assert_eq!(format_date(None), "N/A");
        assert_eq!(format_date(Some("")), "N/A");
        assert_eq!(format_date(Some("sometime")), "sometime");
    }

    #[test]
    fn test_browse_url_from_self_link() {
        assert_eq!(
            browse_url(&issue_fixture(), "https://ignored.example.com"),
            "https://x.atlassian.net/browse/TEST-1"
        );
    }

    #[test]
    fn test_browse_url_falls_back_to_server() {
        let issue = sparse_issue("TEST-9", None);
        assert_eq!(browse_url(&issue, SERVER), "https://x.atlassian.net/browse/TEST-9");
    }

    #[test]
    fn test_issue_table_defaults() {
        let formatter = TableFormatter::new(false);
        let long = "This summary is far too long to fit into the issue table column width";
        let issues = vec![issue_fixture(), sparse_issue("TEST-2", Some(long))];

        let result = formatter.format_issues(&issues).unwrap();

        assert!(result.contains("Key"));
        assert!(result.contains("Summary"));
        assert!(result.contains("TEST-1"));
        assert!(result.contains("John Doe"));
        assert!(result.contains("2024-01-15 10:30"));
        assert!(result.contains(&format!("{}...", &long[..50])));
        assert!(!result.contains("column width"));
        assert!(result.contains("Unassigned"));
        assert!(result.contains("N/A"));
    }

    #[test]
    fn test_issue_table_with_color() {
        let formatter = TableFormatter::new(true);
        let result = formatter.format_issues(&[issue_fixture()]).unwrap();

        assert!(result.contains("TEST-1"));
        assert!(result.contains("\u{1b}["));
    }

    #[test]
    fn test_empty_table_keeps_headers() {
        let formatter = TableFormatter::new(false);
        let result = formatter.format_projects(&[]).unwrap();

        assert!(result.contains("Key"));
        assert!(result.contains("Name"));
        assert!(result.contains("Type"));
        assert!(result.contains("Lead"));
    }

    #[test]
    fn test_issue_details() {
        let formatter = TableFormatter::new(false);
        let details = formatter.format_issue_details(&issue_fixture(), SERVER);

        insta::assert_snapshot!(details, @r"
        TEST-1: Fix login race condition
        ────────────────────────────────────────────────────────────
        Status: In Progress
        Type: Bug
        Priority: High
        Assignee: John Doe
        Reporter: Jane Roe
        Created: 2024-01-15 10:30
        Updated: 2024-01-16 14:45

        Description:
        Users see a race when logging in from two devices.

        Labels: bug, authentication

        URL: https://x.atlassian.net/browse/TEST-1
        ");
    }

    #[test]
    fn test_sparse_issue_details() {
        let formatter = TableFormatter::new(false);
        let details = formatter.format_issue_details(&sparse_issue("TEST-3", None), SERVER);

        assert!(details.starts_with("TEST-3: N/A"));
        assert!(details.contains("Status: N/A"));
        assert!(details.contains("Assignee: Unassigned"));
        assert!(details.contains("Created: N/A"));
        assert!(!details.contains("Description:"));
        assert!(!details.contains("Labels:"));
        assert!(details.ends_with("URL: https://x.atlassian.net/browse/TEST-3"));
    }

    #[test]
    fn test_project_details() {
        let project: Project = serde_json::from_value(json!({
            "key": "TEST",
            "name": "Test Project",
            "projectTypeKey": "software",
            "lead": {"displayName": "Jane Roe"},
            "projectCategory": {"name": "Internal"},
            "components": [{"name": "Backend", "description": "API services"}, {"name": "Web"}],
            "versions": [{"name": "1.0", "released": true}, {"name": "2.0"}]
        }))
        .unwrap();

        let details = TableFormatter::new(false).format_project_details(&project, SERVER);

        assert!(details.contains("TEST: Test Project"));
        assert!(details.contains("Type: software"));
        assert!(details.contains("Lead: Jane Roe"));
        assert!(details.contains("Description: No description"));
        assert!(details.contains("Category: Internal"));
        assert!(details.contains("  • Backend - API services"));
        assert!(details.contains("  • Web\n"));
        assert!(details.contains("  • 1.0 (Released)"));
        assert!(details.contains("  • 2.0 (Unreleased)"));
        assert!(details.ends_with("URL: https://x.atlassian.net/browse/TEST"));
    }

    #[test]
    fn test_sprint_summary_counts_by_state() {
        let sprints = vec![
            sprint(1, "closed"),
            sprint(2, "active"),
            sprint(3, "CLOSED"),
            sprint(4, "future"),
        ];

        assert_eq!(
            sprint_summary(&sprints),
            vec![
                (SprintState::Closed, 2),
                (SprintState::Active, 1),
                (SprintState::Future, 1)
            ]
        );

        let rendered = TableFormatter::new(false).format_sprint_summary(&sprints);
        insta::assert_snapshot!(rendered, @r"
        Sprint Summary:
          CLOSED: 2
          ACTIVE: 1
          FUTURE: 1
        ");
    }

    #[test]
    fn test_comment_bodies_are_truncated() {
        let comment = Comment {
            id: "10000".to_string(),
            body: Some(json!("x".repeat(200))),
            ..Default::default()
        };

        let result = TableFormatter::new(false)
            .format_comments(&[comment])
            .unwrap();

        assert!(result.contains("10000"));
        assert!(result.contains(&format!("{}...", "x".repeat(150))));
        assert!(!result.contains(&"x".repeat(151)));

        let exact = "y".repeat(ui::COMMENT_BODY_MAX_CHARS);
        assert_eq!(truncate(&exact, ui::COMMENT_BODY_MAX_CHARS), exact);
    }

    #[test]
    fn test_connection_summary() {
        let user = User {
            display_name: Some("Test User".to_string()),
            ..Default::default()
        };
        assert_eq!(
            connection_summary(&ConnectionStatus::Connected(user)),
            "Welcome, Test User!"
        );
        assert_eq!(
            connection_summary(&ConnectionStatus::Failed("Resource not found.".to_string())),
            "Connection failed: Resource not found."
        );
    }

    #[test]
    fn test_json_formatter_passes_payloads_through() {
        let formatter = JsonFormatter::new(false);
        let result = formatter.format_issues(&[issue_fixture()]).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&result).unwrap();
        assert_eq!(parsed[0]["key"], "TEST-1");
        assert_eq!(parsed[0]["self"], "https://x.atlassian.net/rest/api/2/issue/10001");
        assert_eq!(parsed[0]["fields"]["labels"][1], "authentication");
    }

    #[test]
    fn test_json_formatter_pretty() {
        let formatter = JsonFormatter::new(true);
        let result = formatter.format_sprints(&[sprint(1, "active")]).unwrap();

        assert!(result.contains('\n'));
        let parsed: serde_json::Value = serde_json::from_str(&result).unwrap();
        assert_eq!(parsed[0]["state"], "active");
    }

    #[test]
    fn test_json_formatter_empty() {
        let formatter = JsonFormatter::new(false);
        assert_eq!(formatter.format_boards(&[]).unwrap(), "[]");
    }
}
