// ABOUTME: The `issue` command family: list, view, create, edit, delete, and comments
// ABOUTME: Builds create/update payloads and drives the interactive forms when flags are missing

use anyhow::{bail, Context, Result};
use jira_sdk::{CommentOptions, Issue, SearchOptions};
use serde_json::{json, Map, Value};

use super::CommandContext;
use crate::cli::{CommentCommand, IssueCommand, IssueCreateArgs, IssueEditArgs, IssueListArgs};
use crate::interactive::{
    collect_create_issue, collect_issue_update, confirm_delete, CreateDraft, IssueEdits,
    IssueTypeRef, NewIssue,
};
use crate::output::JsonFormatter;
use crate::progress::with_spinner;
use crate::query::build_filter_query;

pub async fn run(ctx: &mut CommandContext, command: IssueCommand) -> Result<()> {
    match command {
        IssueCommand::List(args) => list_issues(ctx, args).await,
        IssueCommand::View { key, output } => {
            let client = ctx.client()?;
            let issue = with_spinner(
                &format!("Fetching issue {}...", key),
                client.get_issue(&key),
            )
            .await?;

            if output.json {
                println!("{}", JsonFormatter::new(output.pretty).format(&issue)?);
            } else {
                println!("{}", ctx.table().format_issue_details(&issue, client.server()));
            }
            Ok(())
        }
        IssueCommand::Create(args) => create_issue(ctx, args).await,
        IssueCommand::Edit(args) => edit_issue(ctx, args).await,
        IssueCommand::Delete { key, force } => delete_issue(ctx, &key, force).await,
        IssueCommand::Comment { command } => run_comment(ctx, command).await,
    }
}

async fn list_issues(ctx: &CommandContext, args: IssueListArgs) -> Result<()> {
    let client = ctx.client()?;
    let jql = build_filter_query(&args.filters());
    log::debug!("Searching with JQL: {}", jql);

    let options = SearchOptions {
        max_results: args.limit,
        ..Default::default()
    };
    let results = with_spinner("Fetching issues...", client.search_issues(&jql, &options))
        .await
        .context("Failed to list issues")?;

    let formatter = ctx.formatter(args.output);
    if args.output.json {
        println!("{}", formatter.format_issues(&results.issues)?);
        return Ok(());
    }

    if results.issues.is_empty() {
        ctx.output.info("No issues found");
        return Ok(());
    }

    println!("{}", formatter.format_issues(&results.issues)?);

    if let Some(total) = results.total {
        if total > results.issues.len() as u64 {
            ctx.output.info(&format!(
                "Showing {} of {} total issues",
                results.issues.len(),
                total
            ));
        }
    }
    Ok(())
}

/// `{"fields": {...}}` body for `POST /issue`
pub fn build_create_payload(issue: &NewIssue) -> Value {
    let mut fields = Map::new();
    fields.insert("project".to_string(), json!({ "key": issue.project_key }));
    let issue_type = match &issue.issue_type {
        IssueTypeRef::Id(id) => json!({ "id": id }),
        IssueTypeRef::Name(name) => json!({ "name": name }),
    };
    fields.insert("issuetype".to_string(), issue_type);
    fields.insert("summary".to_string(), json!(issue.summary));

    if let Some(description) = &issue.description {
        fields.insert("description".to_string(), json!(description));
    }
    if let Some(assignee) = &issue.assignee {
        fields.insert("assignee".to_string(), json!({ "name": assignee }));
    }
    if let Some(priority) = &issue.priority {
        fields.insert("priority".to_string(), json!({ "name": priority }));
    }

    json!({ "fields": fields })
}

/// `{"fields": {...}}` body for `PUT /issue/{key}`, or `None` when nothing changed.
/// Summary and description are only sent when they differ from the current values.
pub fn build_update_payload(current: &Issue, edits: &IssueEdits) -> Option<Value> {
    let mut fields = Map::new();

    if let Some(summary) = edits.summary.as_deref().filter(|s| !s.is_empty()) {
        if current.fields.summary.as_deref() != Some(summary) {
            fields.insert("summary".to_string(), json!(summary));
        }
    }

    if let Some(description) = edits.description.as_deref().filter(|d| !d.is_empty()) {
        let existing = current.fields.description_text().unwrap_or_default();
        if existing.trim() != description.trim() {
            fields.insert("description".to_string(), json!(description));
        }
    }

    if let Some(assignee) = edits.assignee.as_deref().filter(|a| !a.is_empty()) {
        fields.insert("assignee".to_string(), json!({ "name": assignee }));
    }
    if let Some(priority) = edits.priority.as_deref().filter(|p| !p.is_empty()) {
        fields.insert("priority".to_string(), json!({ "name": priority }));
    }

    if fields.is_empty() {
        None
    } else {
        Some(json!({ "fields": fields }))
    }
}

async fn create_issue(ctx: &CommandContext, args: IssueCreateArgs) -> Result<()> {
    let draft = CreateDraft {
        project: args.project,
        issue_type: args.issue_type,
        summary: args.summary,
        description: args.description,
        assignee: args.assignee,
        priority: args.priority,
    };

    let client = ctx.client()?;

    let new_issue = if draft.is_complete() {
        draft
            .into_new_issue()
            .context("Incomplete issue details")?
    } else {
        if !ctx.interactive {
            bail!(
                "Missing required options: {}",
                draft.missing_flags().join(", ")
            );
        }

        let (projects, issue_types) = with_spinner("Loading form data...", async {
            tokio::try_join!(client.get_projects(), client.get_issue_types())
        })
        .await?;

        collect_create_issue(ctx.prompter.as_ref(), &projects, &issue_types, draft)?
    };

    let payload = build_create_payload(&new_issue);
    log::debug!("Create payload: {}", payload);

    let created = with_spinner("Creating issue...", client.create_issue(&payload))
        .await
        .context("Failed to create issue")?;

    ctx.output
        .success(&format!("Issue created: {}", created.key));
    println!("URL: {}/browse/{}", client.server(), created.key);
    Ok(())
}

async fn edit_issue(ctx: &CommandContext, args: IssueEditArgs) -> Result<()> {
    let client = ctx.client()?;
    let issue = with_spinner(
        &format!("Loading issue {}...", args.key),
        client.get_issue(&args.key),
    )
    .await?;

    eprintln!("Updating issue: {}", issue.key);
    eprintln!(
        "Current summary: {}\n",
        issue.fields.summary.as_deref().unwrap_or_default()
    );

    let edits = if args.has_values() {
        IssueEdits {
            summary: args.summary,
            description: args.description,
            assignee: args.assignee,
            priority: args.priority,
        }
    } else {
        if !ctx.interactive {
            bail!("Nothing to change. Pass --summary, --description, --assignee, or --priority");
        }
        collect_issue_update(ctx.prompter.as_ref(), &issue)?
    };

    let Some(payload) = build_update_payload(&issue, &edits) else {
        ctx.output.info("No changes made");
        return Ok(());
    };

    with_spinner("Updating issue...", client.update_issue(&issue.key, &payload))
        .await
        .context("Failed to update issue")?;
    ctx.output
        .success(&format!("Issue {} updated successfully", issue.key));
    Ok(())
}

async fn delete_issue(ctx: &CommandContext, key: &str, force: bool) -> Result<()> {
    let client = ctx.client()?;
    let issue = with_spinner(&format!("Loading issue {}...", key), client.get_issue(key)).await?;

    eprintln!("Issue to delete: {}", issue.key);
    eprintln!(
        "Summary: {}\n",
        issue.fields.summary.as_deref().unwrap_or_default()
    );

    if !force {
        if !ctx.interactive {
            bail!("Refusing to delete {} without confirmation; pass --force", key);
        }
        if !confirm_delete(ctx.prompter.as_ref(), &issue.key)? {
            ctx.output.info("Delete cancelled");
            return Ok(());
        }
    }

    with_spinner("Deleting issue...", client.delete_issue(&issue.key))
        .await
        .context("Failed to delete issue")?;
    ctx.output
        .success(&format!("Issue {} deleted successfully", issue.key));
    Ok(())
}

/// Comment text from the argument, or from an editor when interactive
fn comment_text(ctx: &CommandContext, body: Option<String>, initial: &str) -> Result<String> {
    let text = match body {
        Some(body) => Some(body),
        None if ctx.interactive => ctx.prompter.editor(initial)?,
        None => None,
    };

    match text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty()) {
        Some(text) => Ok(text),
        None => bail!("Comment text is required"),
    }
}

async fn run_comment(ctx: &CommandContext, command: CommentCommand) -> Result<()> {
    let client = ctx.client()?;

    match command {
        CommentCommand::List { key, output } => {
            let page = with_spinner(
                &format!("Fetching comments for {}...", key),
                client.get_comments(&key),
            )
            .await?;

            if !output.json && page.comments.is_empty() {
                ctx.output.info(&format!("No comments on {}", key));
                return Ok(());
            }
            println!("{}", ctx.formatter(output).format_comments(&page.comments)?);
        }
        CommentCommand::Add {
            key,
            body,
            internal,
        } => {
            let text = comment_text(ctx, body, "")?;
            let comment = with_spinner(
                "Adding comment...",
                client.add_comment(&key, &text, CommentOptions { internal }),
            )
            .await
            .context("Failed to add comment")?;

            ctx.output
                .success(&format!("Comment {} added to {}", comment.id, key));
            if internal {
                ctx.output.info("Visible to Administrators only");
            }
        }
        CommentCommand::Edit { id, body } => {
            let text = comment_text(ctx, body, "")?;
            with_spinner("Updating comment...", client.update_comment(&id, &text))
                .await
                .context("Failed to update comment")?;
            ctx.output.success(&format!("Comment {} updated", id));
        }
        CommentCommand::Delete { id, force } => {
            if !force {
                if !ctx.interactive {
                    bail!("Refusing to delete comment {} without confirmation; pass --force", id);
                }
                let confirmed = ctx
                    .prompter
                    .confirm(&format!("Delete comment {}?", id), false)?;
                if !confirmed {
                    ctx.output.info("Delete cancelled");
                    return Ok(());
                }
            }

            with_spinner("Deleting comment...", client.delete_comment(&id))
                .await
                .context("Failed to delete comment")?;
            ctx.output.success(&format!("Comment {} deleted", id));
        }
    }

    Ok(())
}
