// ABOUTME: Command handlers and the shared context they run against
// ABOUTME: Resolves settings, credentials, and API version once per invocation

use anyhow::{Context, Result};
use clap::CommandFactory;
use jira_sdk::constants::env;
use jira_sdk::{ApiVersionMode, CredentialSet, Environment, JiraClient};
use std::io::IsTerminal;

use crate::cli::{Cli, Commands, OutputArgs};
use crate::cli_output::CliOutput;
use crate::completions;
use crate::config::SettingsStore;
use crate::interactive::Prompter;
use crate::output::{self, OutputFormat, TableFormatter};

pub mod config;
pub mod init;
pub mod issue;
pub mod project;
pub mod sprint;

/// Everything a command needs besides its own arguments
pub struct CommandContext {
    pub settings: SettingsStore,
    pub environment: Box<dyn Environment>,
    pub output: CliOutput,
    /// `--api-version` from the command line
    pub api_version: Option<ApiVersionMode>,
    pub prompter: Box<dyn Prompter>,
    /// Whether prompts can be shown at all
    pub interactive: bool,
}

impl CommandContext {
    pub fn use_color(&self) -> bool {
        self.output.use_color()
    }

    pub fn credentials(&self) -> Result<CredentialSet> {
        Ok(jira_sdk::credentials::resolve(
            self.environment.as_ref(),
            &self.settings.persisted(),
        )?)
    }

    pub fn is_configured(&self) -> bool {
        jira_sdk::credentials::is_configured(self.environment.as_ref(), &self.settings.persisted())
    }

    /// Flag, then `JIRA_API_VERSION`, then the settings file, then auto
    pub fn api_version_mode(&self) -> Result<ApiVersionMode> {
        if let Some(mode) = self.api_version {
            return Ok(mode);
        }

        if let Some(raw) = self.environment.non_empty(env::API_VERSION) {
            return raw
                .parse::<ApiVersionMode>()
                .with_context(|| format!("Invalid {}", env::API_VERSION));
        }

        Ok(self.settings.api_version()?.unwrap_or_default())
    }

    pub fn client(&self) -> Result<JiraClient> {
        let credentials = self.credentials()?;
        let api_version = self.api_version_mode()?;
        log::debug!(
            "Connecting to {} (API version: {})",
            credentials.server(),
            api_version
        );

        let client = JiraClient::builder()
            .credentials(credentials)
            .api_version(api_version)
            .build()?;
        Ok(client)
    }

    pub fn table(&self) -> TableFormatter {
        TableFormatter::new(self.use_color())
    }

    pub fn formatter(&self, output: OutputArgs) -> Box<dyn OutputFormat> {
        output::formatter(output.json, output.pretty, self.use_color())
    }
}

pub async fn run(command: Commands, ctx: &mut CommandContext) -> Result<()> {
    match command {
        Commands::Config(args) => config::run(ctx, args).await,
        Commands::Init => init::run(ctx).await,
        Commands::Issue { command } => issue::run(ctx, command).await,
        Commands::Project { command } => project::run(ctx, command).await,
        Commands::Sprint { command } => sprint::run(ctx, command).await,
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            completions::generate_completions(shell, &mut cmd, &mut std::io::stdout());
            if std::io::stdout().is_terminal() {
                eprintln!("\n{}", completions::installation_instructions());
            }
            Ok(())
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::interactive::scripted::{Answer, ScriptedPrompter};
    use std::collections::HashMap;
    use tempfile::TempDir;

    /// Context with a bearer token for `server_url` and an empty settings file
    pub fn context_for(server_url: &str, dir: &TempDir, answers: Vec<Answer>) -> CommandContext {
        let environment: HashMap<String, String> = [
            ("JIRA_HOST".to_string(), server_url.to_string()),
            ("JIRA_API_TOKEN".to_string(), "abc".to_string()),
        ]
        .into_iter()
        .collect();

        CommandContext {
            settings: SettingsStore::open(dir.path().join("config.toml")).unwrap(),
            environment: Box::new(environment),
            output: CliOutput::new(false),
            api_version: Some(ApiVersionMode::V2),
            prompter: Box::new(ScriptedPrompter::new(answers)),
            interactive: true,
        }
    }

    pub fn myself_body() -> String {
        serde_json::json!({
            "accountId": "5b10a2844c20165700ede21g",
            "displayName": "Test User",
            "emailAddress": "test@example.com",
            "active": true
        })
        .to_string()
    }

    pub fn unconfigured_context(dir: &TempDir, answers: Vec<Answer>) -> CommandContext {
        CommandContext {
            settings: SettingsStore::open(dir.path().join("config.toml")).unwrap(),
            environment: Box::new(HashMap::<String, String>::new()),
            output: CliOutput::new(false),
            api_version: None,
            prompter: Box::new(ScriptedPrompter::new(answers)),
            interactive: true,
        }
    }
}
