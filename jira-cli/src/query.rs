// ABOUTME: Builds JQL filter queries from issue list options
// ABOUTME: Conditions are AND-joined in a fixed order; a raw query overrides them

use crate::constants::jql;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    pub project: Option<String>,
    pub assignee: Option<String>,
    pub status: Option<String>,
    pub issue_type: Option<String>,
    pub reporter: Option<String>,
    pub priority: Option<String>,
    /// Lower bound, e.g. `-7d` or `2024-01-01`
    pub created: Option<String>,
    pub updated: Option<String>,
    /// Raw JQL used verbatim instead of the conditions above
    pub jql: Option<String>,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn user_condition(field: &str, value: &str) -> String {
    if value == jql::CURRENT_USER || value == "currentUser()" {
        format!("{} = currentUser()", field)
    } else {
        format!("{} = \"{}\"", field, value)
    }
}

pub fn build_filter_query(options: &FilterOptions) -> String {
    if let Some(raw) = present(&options.jql) {
        return raw.to_string();
    }

    let mut conditions = Vec::new();

    if let Some(project) = present(&options.project) {
        conditions.push(format!("project = \"{}\"", project));
    }
    if let Some(assignee) = present(&options.assignee) {
        conditions.push(user_condition("assignee", assignee));
    }
    if let Some(status) = present(&options.status) {
        conditions.push(format!("status = \"{}\"", status));
    }
    if let Some(issue_type) = present(&options.issue_type) {
        conditions.push(format!("issuetype = \"{}\"", issue_type));
    }
    if let Some(reporter) = present(&options.reporter) {
        conditions.push(user_condition("reporter", reporter));
    }
    if let Some(priority) = present(&options.priority) {
        conditions.push(format!("priority = \"{}\"", priority));
    }
    if let Some(created) = present(&options.created) {
        conditions.push(format!("created >= \"{}\"", created));
    }
    if let Some(updated) = present(&options.updated) {
        conditions.push(format!("updated >= \"{}\"", updated));
    }

    if conditions.is_empty() {
        jql::DEFAULT_QUERY.to_string()
    } else {
        conditions.join(" AND ")
    }
}
