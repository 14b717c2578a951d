// ABOUTME: The `config` command: show, get, set, unset, and clear stored settings
// ABOUTME: Changing connection settings is followed by a connection test when possible

use anyhow::{bail, Result};
use jira_sdk::constants::env;
use jira_sdk::ConnectionStatus;
use std::fmt::Write;

use super::CommandContext;
use crate::cli::{ConfigAction, ConfigArgs};
use crate::config::SettingKey;
use crate::output::connection_summary;
use crate::progress::with_spinner;

const USAGE: &str = "Configuration requires explicit options.

Bearer authentication (recommended):
  jira config --server <url> --token <token>

Basic authentication (optional):
  jira config --server <url> --username <email> --token <token>

Or set using individual commands:
  jira config set server <url>
  jira config set token <token>
  jira config set username <email>  # optional for Basic auth

Or use environment variables:
  Bearer auth: export JIRA_HOST=<url> JIRA_API_TOKEN=<token>
  Basic auth: export JIRA_HOST=<url> JIRA_API_TOKEN=<token> JIRA_USERNAME=<email>";

pub async fn run(ctx: &mut CommandContext, args: ConfigArgs) -> Result<()> {
    if let Some(action) = args.action {
        return run_action(ctx, action).await;
    }

    if args.show {
        println!("{}", render_settings(ctx));
        return Ok(());
    }

    if !args.has_values() {
        bail!(USAGE);
    }

    if let Some(server) = &args.server {
        ctx.settings.set(SettingKey::Server, server)?;
        let stored = ctx.settings.get(SettingKey::Server).unwrap_or(server.as_str());
        ctx.output.success(&format!("Server set to: {}", stored));
    }
    if let Some(username) = &args.username {
        ctx.settings.set(SettingKey::Username, username)?;
        ctx.output
            .success(&format!("Username set to: {}", username.trim()));
    }
    if let Some(token) = &args.token {
        ctx.settings.set(SettingKey::Token, token)?;
        ctx.output.success("API token updated");
    }

    if ctx.is_configured() {
        let status = check_connection(ctx).await;
        match &status {
            ConnectionStatus::Connected(_) => {
                ctx.output.success("Connection successful!");
                println!("{}", connection_summary(&status));
            }
            ConnectionStatus::Failed(_) => ctx.output.error(&connection_summary(&status)),
        }
    }

    Ok(())
}

async fn run_action(ctx: &mut CommandContext, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Get { key: None } => {
            println!("{}", render_settings(ctx));
        }
        ConfigAction::Get { key: Some(key) } => match ctx.settings.get(key) {
            Some(value) => println!("{}", describe_value(key, value)),
            None => ctx
                .output
                .warning(&format!("Configuration key '{}' not found", key)),
        },
        ConfigAction::Set { key, value } => {
            ctx.settings.set(key, &value)?;
            ctx.output.success(&format!("{} set successfully", key));

            if key.affects_connection() && ctx.is_configured() {
                match check_connection(ctx).await {
                    ConnectionStatus::Connected(_) => ctx.output.success("Connection verified"),
                    ConnectionStatus::Failed(message) => ctx.output.warning(&format!(
                        "Configuration saved but connection test failed: {}",
                        message
                    )),
                }
            }
        }
        ConfigAction::Unset { key } => {
            ctx.settings.unset(key)?;
            ctx.output.success(&format!("{} unset successfully", key));
        }
        ConfigAction::Clear { force } => {
            if !force {
                if !ctx.interactive {
                    bail!("Refusing to clear settings without confirmation; pass --force");
                }
                let confirmed = ctx
                    .prompter
                    .confirm("Remove all stored Jira settings?", false)?;
                if !confirmed {
                    ctx.output.info("Clear cancelled");
                    return Ok(());
                }
            }
            ctx.settings.clear()?;
            ctx.output.success("Configuration cleared");
        }
    }

    Ok(())
}

/// `key: value` with secrets masked
pub fn describe_value(key: SettingKey, value: &str) -> String {
    if key.is_secret() {
        format!("{}: ***", key)
    } else {
        format!("{}: {}", key, value)
    }
}

/// Test the resolved connection behind a spinner; never fails
pub(crate) async fn check_connection(ctx: &CommandContext) -> ConnectionStatus {
    ctx.output.info("Testing connection...");
    match ctx.client() {
        Ok(client) => with_spinner("Testing connection...", client.test_connection()).await,
        Err(err) => ConnectionStatus::Failed(format!("{:#}", err)),
    }
}

fn has_env_config(ctx: &CommandContext) -> bool {
    let environment = ctx.environment.as_ref();
    let token = environment.non_empty(env::API_TOKEN).is_some();
    (environment.non_empty(env::HOST).is_some() && token)
        || (environment.non_empty(env::DOMAIN).is_some()
            && environment.non_empty(env::USERNAME).is_some()
            && token)
}

/// Settings report for `config --show`, secrets hidden
pub fn render_settings(ctx: &CommandContext) -> String {
    let from_env = has_env_config(ctx);
    if ctx.settings.is_empty() && !from_env {
        return format!(
            "No configuration found.\nRun `jira config --server <url> --token <token>` or `jira init` to set up your Jira connection.\nSettings file: {}",
            ctx.settings.path().display()
        );
    }

    let environment = ctx.environment.as_ref();
    let mut out = String::from("Current Jira Configuration:");

    if from_env {
        let _ = write!(out, "\n\nFrom Environment Variables:");
        if let Some(host) = environment.non_empty(env::HOST) {
            let _ = write!(out, "\nServer: {}", host);
            let username = environment.non_empty(env::USERNAME);
            let _ = write!(
                out,
                "\nUsername: {}",
                username.as_deref().unwrap_or("(token auth)")
            );
        } else if let Some(domain) = environment.non_empty(env::DOMAIN) {
            let _ = write!(out, "\nServer: {}", domain);
            let _ = write!(
                out,
                "\nUsername: {}",
                environment.non_empty(env::USERNAME).unwrap_or_default()
            );
        }
        let _ = write!(out, "\nToken: ***configured***");
        if let Some(version) = environment.non_empty(env::API_VERSION) {
            let _ = write!(out, "\nAPI version: {}", version);
        }
    }

    if !ctx.settings.is_empty() {
        let _ = write!(
            out,
            "\n\nFrom Config File ({}):",
            ctx.settings.path().display()
        );
        let _ = write!(
            out,
            "\nServer: {}",
            ctx.settings.get(SettingKey::Server).unwrap_or("Not set")
        );
        let _ = write!(
            out,
            "\nUsername: {}",
            ctx.settings
                .get(SettingKey::Username)
                .unwrap_or("(Bearer auth)")
        );
        let token = if ctx.settings.get(SettingKey::Token).is_some() {
            "Set (hidden)"
        } else {
            "Not set"
        };
        let _ = write!(out, "\nToken: {}", token);
        if let Some(version) = ctx.settings.get(SettingKey::ApiVersion) {
            let _ = write!(out, "\nAPI version: {}", version);
        }
    }

    let status = if ctx.is_configured() {
        ctx.output.success_line("Configuration is complete")
    } else {
        ctx.output.error_line("Configuration is incomplete")
    };
    let _ = write!(out, "\n\n{}", status);
    out
}
