// ABOUTME: Main entry point for the Jira CLI application
// ABOUTME: Parses arguments, builds the command context, and reports errors

use clap::Parser;
use jira_cli::cli::Cli;
use jira_cli::cli_output::CliOutput;
use jira_cli::commands::{self, CommandContext};
use jira_cli::config::SettingsStore;
use jira_cli::interactive::DialoguerPrompter;
use jira_sdk::{Environment, JiraError, ProcessEnv};

fn colors_enabled(no_color: bool, environment: &dyn Environment) -> bool {
    !no_color
        && environment.var("NO_COLOR").is_none()
        && environment.var("TERM").as_deref() != Some("dumb")
}

fn report(output: &CliOutput, err: &anyhow::Error) {
    output.error(&format!("{:#}", err));
    if let Some(help) = err.downcast_ref::<JiraError>().and_then(JiraError::help_text) {
        output.hint(help);
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let output = CliOutput::new(colors_enabled(cli.no_color, &ProcessEnv));

    let settings = match &cli.config {
        Some(path) => SettingsStore::open(path.clone()),
        None => SettingsStore::load(&ProcessEnv),
    };
    let settings = match settings {
        Ok(settings) => settings,
        Err(err) => {
            report(&output, &err);
            std::process::exit(1);
        }
    };
    log::debug!("Using settings file {}", settings.path().display());

    let mut ctx = CommandContext {
        settings,
        environment: Box::new(ProcessEnv),
        output,
        api_version: cli.api_version,
        prompter: Box::new(DialoguerPrompter),
        interactive: DialoguerPrompter::is_available(&ProcessEnv),
    };

    if let Err(err) = commands::run(cli.command, &mut ctx).await {
        report(&output, &err);
        std::process::exit(1);
    }
}
