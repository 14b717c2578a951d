// ABOUTME: The `init` setup wizard
// ABOUTME: Prompts for server, username, and token, saves them, then tests the connection

use anyhow::{bail, Result};
use jira_sdk::ConnectionStatus;

use super::config::check_connection;
use super::CommandContext;
use crate::config::SettingKey;
use crate::interactive::collect_setup;
use crate::output::connection_summary;

const NEXT_STEPS: &str = "You can now start using Jira CLI:
  • List issues: jira issue list
  • View an issue: jira issue view PROJ-123
  • Create an issue: jira issue create
  • List projects: jira project list
  • Show help: jira --help";

pub async fn run(ctx: &mut CommandContext) -> Result<()> {
    if !ctx.interactive {
        bail!(
            "Interactive setup needs a terminal. Use `jira config --server <url> --token <token>` instead"
        );
    }

    eprintln!("\nWelcome to Jira CLI!\n");
    ctx.output
        .info("Let's get you set up with your Jira connection...");

    let answers = collect_setup(
        ctx.prompter.as_ref(),
        ctx.settings.get(SettingKey::Server),
        ctx.settings.get(SettingKey::Username),
        ctx.settings.get(SettingKey::Token).is_some(),
    )?;

    ctx.settings.set(SettingKey::Server, &answers.server)?;
    match &answers.username {
        Some(username) => ctx.settings.set(SettingKey::Username, username)?,
        None => ctx.settings.unset(SettingKey::Username)?,
    }
    if let Some(token) = &answers.token {
        ctx.settings.set(SettingKey::Token, token)?;
    }
    log::debug!("Saved setup answers to {}", ctx.settings.path().display());

    let status = check_connection(ctx).await;
    match &status {
        ConnectionStatus::Connected(_) => {
            ctx.output.success("Connection successful!");
            eprintln!("{}", connection_summary(&status));
        }
        ConnectionStatus::Failed(message) => {
            ctx.output.error(&connection_summary(&status));
            ctx.output.hint("You can try again by running: jira init");
            ctx.output.hint("Or configure manually: jira config");
            bail!("Setup failed: {}", message);
        }
    }

    ctx.output.success("Setup complete!");
    eprintln!("\n{}\n", NEXT_STEPS);
    Ok(())
}
