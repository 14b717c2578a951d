// ABOUTME: Interactive prompts for setup, issue creation, editing, and deletion
// ABOUTME: Prompting goes through the Prompter trait so flows can run against scripted answers

use anyhow::{bail, Context, Result};
use dialoguer::{Confirm, Editor, Input, Password, Select};
use jira_sdk::{Environment, Issue, IssueType, Project};
use std::io::IsTerminal;

/// Terminal input primitives
pub trait Prompter {
    fn input(&self, prompt: &str, default: Option<&str>, allow_empty: bool) -> Result<String>;
    fn password(&self, prompt: &str, allow_empty: bool) -> Result<String>;
    fn select(&self, prompt: &str, items: &[String]) -> Result<usize>;
    fn confirm(&self, prompt: &str, default: bool) -> Result<bool>;
    /// `None` when the editor was closed without saving
    fn editor(&self, initial: &str) -> Result<Option<String>>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    /// Prompts need a terminal on stdin and no CI runner
    pub fn is_available(environment: &dyn Environment) -> bool {
        std::io::stdin().is_terminal() && !is_in_ci(environment)
    }
}

pub fn is_in_ci(environment: &dyn Environment) -> bool {
    ["CI", "GITHUB_ACTIONS", "JENKINS_URL", "BUILDKITE"]
        .iter()
        .any(|key| environment.var(key).is_some())
}

impl Prompter for DialoguerPrompter {
    fn input(&self, prompt: &str, default: Option<&str>, allow_empty: bool) -> Result<String> {
        let mut input = Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(allow_empty);
        if let Some(default) = default {
            input = input.default(default.to_string());
        }
        let value = input
            .interact_text()
            .with_context(|| format!("Failed to read {}", prompt.to_lowercase()))?;
        Ok(value.trim().to_string())
    }

    fn password(&self, prompt: &str, allow_empty: bool) -> Result<String> {
        let value = Password::new()
            .with_prompt(prompt)
            .allow_empty_password(allow_empty)
            .interact()
            .with_context(|| format!("Failed to read {}", prompt.to_lowercase()))?;
        Ok(value.trim().to_string())
    }

    fn select(&self, prompt: &str, items: &[String]) -> Result<usize> {
        Select::new()
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact()
            .with_context(|| format!("Failed to read {}", prompt.to_lowercase()))
    }

    fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()
            .context("Failed to read confirmation")
    }

    fn editor(&self, initial: &str) -> Result<Option<String>> {
        Editor::new().edit(initial).context("Failed to open editor")
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupAnswers {
    pub server: String,
    /// Empty selects Bearer auth
    pub username: Option<String>,
    /// `None` keeps the stored token
    pub token: Option<String>,
}

/// Setup wizard questions; current values become defaults
pub fn collect_setup(
    prompter: &dyn Prompter,
    current_server: Option<&str>,
    current_username: Option<&str>,
    has_token: bool,
) -> Result<SetupAnswers> {
    let server = prompter.input("Jira server URL", current_server, false)?;
    if server.is_empty() {
        bail!("Server URL is required");
    }

    let username = prompter.input(
        "Username or email (leave empty for Bearer token auth)",
        current_username,
        true,
    )?;

    let token_prompt = if has_token {
        "API token (leave empty to keep the current token)"
    } else {
        "API token"
    };
    let token = prompter.password(token_prompt, has_token)?;
    if token.is_empty() && !has_token {
        bail!("API token is required");
    }

    Ok(SetupAnswers {
        server,
        username: non_empty(Some(username)),
        token: non_empty(Some(token)),
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueTypeRef {
    Id(String),
    Name(String),
}

/// Values given on the command line for `issue create`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateDraft {
    pub project: Option<String>,
    pub issue_type: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub assignee: Option<String>,
    pub priority: Option<String>,
}

impl CreateDraft {
    pub fn is_complete(&self) -> bool {
        [&self.project, &self.issue_type, &self.summary]
            .iter()
            .all(|value| value.as_deref().is_some_and(|v| !v.trim().is_empty()))
    }

    pub fn missing_flags(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        for (value, flag) in [
            (&self.project, "--project"),
            (&self.issue_type, "--type"),
            (&self.summary, "--summary"),
        ] {
            if value.as_deref().is_none_or(|v| v.trim().is_empty()) {
                missing.push(flag);
            }
        }
        missing
    }

    /// Turn a complete draft into an issue without prompting
    pub fn into_new_issue(self) -> Option<NewIssue> {
        Some(NewIssue {
            project_key: non_empty(self.project)?,
            issue_type: IssueTypeRef::Name(non_empty(self.issue_type)?),
            summary: non_empty(self.summary)?,
            description: non_empty(self.description),
            assignee: non_empty(self.assignee),
            priority: non_empty(self.priority),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIssue {
    pub project_key: String,
    pub issue_type: IssueTypeRef,
    pub summary: String,
    pub description: Option<String>,
    pub assignee: Option<String>,
    pub priority: Option<String>,
}

/// Fill the gaps in `draft` by prompting
pub fn collect_create_issue(
    prompter: &dyn Prompter,
    projects: &[Project],
    issue_types: &[IssueType],
    draft: CreateDraft,
) -> Result<NewIssue> {
    let project_key = match non_empty(draft.project) {
        Some(key) => key,
        None => {
            if projects.is_empty() {
                bail!("No projects found");
            }
            let labels: Vec<String> = projects
                .iter()
                .map(|p| format!("{} - {}", p.key, p.name))
                .collect();
            let index = prompter.select("Select project", &labels)?;
            projects[index].key.clone()
        }
    };

    let issue_type = match non_empty(draft.issue_type) {
        Some(name) => IssueTypeRef::Name(name),
        None => {
            let candidates: Vec<&IssueType> =
                issue_types.iter().filter(|t| !t.subtask).collect();
            if candidates.is_empty() {
                bail!("No issue types found");
            }
            let labels: Vec<String> = candidates.iter().map(|t| t.name.clone()).collect();
            let index = prompter.select("Select issue type", &labels)?;
            IssueTypeRef::Id(candidates[index].id.clone())
        }
    };

    let summary = match non_empty(draft.summary) {
        Some(summary) => summary,
        None => {
            let summary = prompter.input("Issue summary", None, false)?;
            if summary.is_empty() {
                bail!("Summary is required");
            }
            summary
        }
    };

    let description = match non_empty(draft.description) {
        Some(description) => Some(description),
        None => non_empty(prompter.editor("")?),
    };

    Ok(NewIssue {
        project_key,
        issue_type,
        summary,
        description,
        assignee: non_empty(draft.assignee),
        priority: non_empty(draft.priority),
    })
}

/// New values entered for an existing issue
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueEdits {
    pub summary: Option<String>,
    pub description: Option<String>,
    pub assignee: Option<String>,
    pub priority: Option<String>,
}

impl IssueEdits {
    pub fn is_empty(&self) -> bool {
        self == &IssueEdits::default()
    }
}

/// Prompt for a new summary and description, current values prefilled
pub fn collect_issue_update(prompter: &dyn Prompter, issue: &Issue) -> Result<IssueEdits> {
    let current_summary = issue.fields.summary.as_deref().unwrap_or_default();
    let summary = prompter.input("New summary", Some(current_summary), true)?;

    let current_description = issue.fields.description_text().unwrap_or_default();
    let description = prompter.editor(&current_description)?;

    Ok(IssueEdits {
        summary: non_empty(Some(summary)),
        description: non_empty(description),
        ..Default::default()
    })
}

pub fn confirm_delete(prompter: &dyn Prompter, key: &str) -> Result<bool> {
    prompter.confirm(
        &format!(
            "Are you sure you want to delete {}? This action cannot be undone.",
            key
        ),
        false,
    )
}


#[cfg(test)]
mod tests {
    use super::scripted::{Answer, ScriptedPrompter};
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    fn projects() -> Vec<Project> {
        serde_json::from_value(json!([
            {"key": "TEST", "name": "Test Project"},
            {"key": "OPS", "name": "Operations"}
        ]))
        .unwrap()
    }

    fn issue_types() -> Vec<IssueType> {
        serde_json::from_value(json!([
            {"id": "10001", "name": "Bug"},
            {"id": "10002", "name": "Sub-task", "subtask": true},
            {"id": "10003", "name": "Story"}
        ]))
        .unwrap()
    }

    #[test]
    fn test_ci_detection() {
        let ci: HashMap<&str, &str> = [("GITHUB_ACTIONS", "true")].into_iter().collect();
        let local: HashMap<&str, &str> = HashMap::new();
        assert!(is_in_ci(&ci));
        assert!(!is_in_ci(&local));
    }

    #[test]
    fn test_setup_for_bearer_auth() {
        let prompter = ScriptedPrompter::new(vec![
            Answer::Text("jira.example.com"),
            Answer::Text(""),
            Answer::Text("secret-token"),
        ]);

        let answers = collect_setup(&prompter, None, None, false).unwrap();
        assert_eq!(
            answers,
            SetupAnswers {
                server: "jira.example.com".to_string(),
                username: None,
                token: Some("secret-token".to_string()),
            }
        );
    }

    #[test]
    fn test_setup_keeps_existing_values() {
        let prompter = ScriptedPrompter::new(vec![
            Answer::Text(""),
            Answer::Text(""),
            Answer::Text(""),
        ]);

        let answers = collect_setup(
            &prompter,
            Some("https://jira.example.com"),
            Some("me@example.com"),
            true,
        )
        .unwrap();

        assert_eq!(answers.server, "https://jira.example.com");
        assert_eq!(answers.username.as_deref(), Some("me@example.com"));
        assert!(answers.token.is_none());
        assert!(prompter.prompts.borrow()[2].contains("keep the current token"));
    }

    #[test]
    fn test_setup_requires_token_on_first_run() {
        let prompter = ScriptedPrompter::new(vec![
            Answer::Text("jira.example.com"),
            Answer::Text(""),
            Answer::Text(""),
        ]);

        let err = collect_setup(&prompter, None, None, false).unwrap_err();
        assert_eq!(err.to_string(), "API token is required");
    }

    #[test]
    fn test_complete_draft_skips_prompts() {
        let draft = CreateDraft {
            project: Some("TEST".to_string()),
            issue_type: Some("Bug".to_string()),
            summary: Some("Login fails on Safari".to_string()),
            priority: Some("High".to_string()),
            ..Default::default()
        };
        assert!(draft.is_complete());

        let issue = draft.into_new_issue().unwrap();
        assert_eq!(issue.issue_type, IssueTypeRef::Name("Bug".to_string()));
        assert_eq!(issue.priority.as_deref(), Some("High"));
        assert!(issue.description.is_none());
    }

    #[test]
    fn test_missing_flags() {
        let draft = CreateDraft {
            project: Some("TEST".to_string()),
            summary: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(!draft.is_complete());
        assert_eq!(draft.missing_flags(), vec!["--type", "--summary"]);
    }

    #[test]
    fn test_interactive_create_selects_type_by_id() {
        let prompter = ScriptedPrompter::new(vec![
            Answer::Choice(1),
            Answer::Choice(1),
            Answer::Text("Add user profile page"),
            Answer::Edited(Some("Users need a profile page.\n")),
        ]);

        let issue =
            collect_create_issue(&prompter, &projects(), &issue_types(), CreateDraft::default())
                .unwrap();

        assert_eq!(issue.project_key, "OPS");
        // Sub-tasks are not offered, so index 1 is Story
        assert_eq!(issue.issue_type, IssueTypeRef::Id("10003".to_string()));
        assert_eq!(issue.summary, "Add user profile page");
        assert_eq!(issue.description.as_deref(), Some("Users need a profile page."));
    }

    #[test]
    fn test_interactive_create_only_asks_for_gaps() {
        let prompter = ScriptedPrompter::new(vec![Answer::Choice(0), Answer::Edited(None)]);
        let draft = CreateDraft {
            project: Some("TEST".to_string()),
            summary: Some("Crash on save".to_string()),
            assignee: Some("john.doe".to_string()),
            ..Default::default()
        };

        let issue = collect_create_issue(&prompter, &projects(), &issue_types(), draft).unwrap();

        assert_eq!(issue.project_key, "TEST");
        assert_eq!(issue.issue_type, IssueTypeRef::Id("10001".to_string()));
        assert!(issue.description.is_none());
        assert_eq!(issue.assignee.as_deref(), Some("john.doe"));
        assert_eq!(
            *prompter.prompts.borrow(),
            vec!["Select issue type".to_string(), "editor".to_string()]
        );
    }

    #[test]
    fn test_interactive_create_without_projects() {
        let prompter = ScriptedPrompter::new(vec![]);
        let err = collect_create_issue(&prompter, &[], &issue_types(), CreateDraft::default())
            .unwrap_err();
        assert_eq!(err.to_string(), "No projects found");
    }

    #[test]
    fn test_issue_update_prompts() {
        let issue: Issue = serde_json::from_value(json!({
            "key": "TEST-1",
            "fields": {"summary": "Old summary", "description": "Old text"}
        }))
        .unwrap();
        let prompter = ScriptedPrompter::new(vec![
            Answer::Text("New summary"),
            Answer::Edited(Some("Old text")),
        ]);

        let edits = collect_issue_update(&prompter, &issue).unwrap();
        assert_eq!(edits.summary.as_deref(), Some("New summary"));
        assert_eq!(edits.description.as_deref(), Some("Old text"));
        assert!(!edits.is_empty());
    }

    #[test]
    fn test_confirm_delete() {
        let prompter = ScriptedPrompter::new(vec![Answer::Yes(false)]);
        assert!(!confirm_delete(&prompter, "TEST-1").unwrap());
        assert!(prompter.prompts.borrow()[0].contains("TEST-1"));
    }
}
