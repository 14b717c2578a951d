// ABOUTME: CLI argument definitions for the Jira CLI application
// ABOUTME: Defines the command-line interface structure using clap derive macros

use clap::{Args, Parser, Subcommand};
use jira_sdk::ApiVersionMode;
use std::path::PathBuf;

use crate::config::SettingKey;
use crate::constants::limits;
use crate::query::FilterOptions;

#[derive(Parser, Debug)]
#[command(name = "jira")]
#[command(about = "A CLI for Jira", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable verbose output for debugging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// REST API version: 2, 3, or auto
    #[arg(long, global = true, value_name = "VERSION")]
    pub api_version: Option<ApiVersionMode>,

    /// Use this settings file instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show or change the stored connection settings
    Config(ConfigArgs),
    /// Guided setup of the Jira connection
    #[command(alias = "setup")]
    Init,
    /// Work with issues
    #[command(alias = "i")]
    Issue {
        #[command(subcommand)]
        command: IssueCommand,
    },
    /// Browse projects
    #[command(alias = "p")]
    Project {
        #[command(subcommand)]
        command: ProjectCommand,
    },
    /// Browse sprints and boards
    #[command(alias = "s")]
    Sprint {
        #[command(subcommand)]
        command: SprintCommand,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: crate::completions::Shell,
    },
}

/// Machine-readable output switches shared by listings
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct OutputArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Pretty print JSON output
    #[arg(long, requires = "json")]
    pub pretty: bool,
}

#[derive(Args, Debug)]
#[command(args_conflicts_with_subcommands = true)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: Option<ConfigAction>,

    /// Show the current configuration
    #[arg(short, long)]
    pub show: bool,

    /// Set the Jira server URL
    #[arg(long, value_name = "URL")]
    pub server: Option<String>,

    /// Set the username (only for Basic auth)
    #[arg(long)]
    pub username: Option<String>,

    /// Set the API token
    #[arg(long)]
    pub token: Option<String>,
}

impl ConfigArgs {
    pub fn has_values(&self) -> bool {
        self.server.is_some() || self.username.is_some() || self.token.is_some()
    }
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print one setting, or all of them
    Get {
        #[arg(value_enum)]
        key: Option<SettingKey>,
    },
    /// Store a setting
    Set {
        #[arg(value_enum)]
        key: SettingKey,
        value: String,
    },
    /// Remove a setting
    Unset {
        #[arg(value_enum)]
        key: SettingKey,
    },
    /// Remove every stored setting
    Clear {
        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum IssueCommand {
    /// List issues with filters
    #[command(alias = "ls")]
    List(IssueListArgs),
    /// Show details for a single issue
    #[command(alias = "show")]
    View {
        /// Issue key (e.g., PROJ-123)
        key: String,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Create a new issue (prompts for anything missing)
    #[command(alias = "new")]
    Create(IssueCreateArgs),
    /// Change an issue's summary, description, assignee, or priority
    #[command(alias = "update")]
    Edit(IssueEditArgs),
    /// Delete an issue
    #[command(alias = "rm")]
    Delete {
        /// Issue key (e.g., PROJ-123)
        key: String,

        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },
    /// Manage issue comments
    #[command(alias = "c")]
    Comment {
        #[command(subcommand)]
        command: CommentCommand,
    },
}

#[derive(Args, Debug, Default)]
pub struct IssueListArgs {
    /// Filter by project key
    #[arg(long)]
    pub project: Option<String>,

    /// Filter by assignee (use "currentUser" for yourself)
    #[arg(long)]
    pub assignee: Option<String>,

    /// Filter by status (e.g., "In Progress")
    #[arg(long)]
    pub status: Option<String>,

    /// Filter by issue type (e.g., Bug, Story)
    #[arg(long = "type", value_name = "TYPE")]
    pub issue_type: Option<String>,

    /// Filter by reporter
    #[arg(long)]
    pub reporter: Option<String>,

    /// Filter by priority (e.g., High)
    #[arg(long)]
    pub priority: Option<String>,

    /// Created on or after (e.g., -7d, 2024-01-01)
    #[arg(long, value_name = "DATE")]
    pub created: Option<String>,

    /// Updated on or after (e.g., -7d, 2024-01-01)
    #[arg(long, value_name = "DATE")]
    pub updated: Option<String>,

    /// Raw JQL query; overrides the other filters
    #[arg(long, value_name = "QUERY")]
    pub jql: Option<String>,

    /// Maximum number of issues to fetch
    #[arg(
        short,
        long,
        default_value_t = limits::DEFAULT_ISSUE_LIMIT,
        value_parser = clap::value_parser!(u32).range(1..=limits::MAX_ISSUE_LIMIT as i64)
    )]
    pub limit: u32,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl IssueListArgs {
    pub fn filters(&self) -> FilterOptions {
        FilterOptions {
            project: self.project.clone(),
            assignee: self.assignee.clone(),
            status: self.status.clone(),
            issue_type: self.issue_type.clone(),
            reporter: self.reporter.clone(),
            priority: self.priority.clone(),
            created: self.created.clone(),
            updated: self.updated.clone(),
            jql: self.jql.clone(),
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct IssueCreateArgs {
    /// Project key (e.g., PROJ)
    #[arg(long)]
    pub project: Option<String>,

    /// Issue type name (e.g., Bug, Story, Task)
    #[arg(long = "type", value_name = "TYPE")]
    pub issue_type: Option<String>,

    /// Issue summary
    #[arg(long)]
    pub summary: Option<String>,

    /// Issue description
    #[arg(long)]
    pub description: Option<String>,

    /// Assignee username
    #[arg(long)]
    pub assignee: Option<String>,

    /// Priority name (e.g., High)
    #[arg(long)]
    pub priority: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct IssueEditArgs {
    /// Issue key (e.g., PROJ-123)
    pub key: String,

    /// New summary
    #[arg(long)]
    pub summary: Option<String>,

    /// New description
    #[arg(long)]
    pub description: Option<String>,

    /// New assignee username
    #[arg(long)]
    pub assignee: Option<String>,

    /// New priority name
    #[arg(long)]
    pub priority: Option<String>,
}

impl IssueEditArgs {
    pub fn has_values(&self) -> bool {
        self.summary.is_some()
            || self.description.is_some()
            || self.assignee.is_some()
            || self.priority.is_some()
    }
}

#[derive(Subcommand, Debug)]
pub enum CommentCommand {
    /// List comments on an issue
    #[command(alias = "ls")]
    List {
        /// Issue key (e.g., PROJ-123)
        key: String,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Add a comment (opens an editor when no text is given)
    Add {
        /// Issue key (e.g., PROJ-123)
        key: String,

        /// Comment text
        body: Option<String>,

        /// Restrict visibility to administrators
        #[arg(long)]
        internal: bool,
    },
    /// Replace the text of a comment
    Edit {
        /// Comment id
        id: String,

        /// New comment text
        body: Option<String>,
    },
    /// Delete a comment
    #[command(alias = "rm")]
    Delete {
        /// Comment id
        id: String,

        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum ProjectCommand {
    /// List projects
    #[command(alias = "ls")]
    List {
        /// Only projects whose type contains this text (e.g., software)
        #[arg(long = "type", value_name = "TYPE")]
        project_type: Option<String>,

        /// Only projects whose category contains this text
        #[arg(long)]
        category: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Show project details
    #[command(alias = "show")]
    View {
        /// Project key (e.g., PROJ)
        key: String,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// List project components
    Components {
        /// Project key (e.g., PROJ)
        key: String,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// List project versions
    Versions {
        /// Project key (e.g., PROJ)
        key: String,

        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Subcommand, Debug)]
pub enum SprintCommand {
    /// List sprints on a board
    #[command(alias = "ls")]
    List {
        /// Board id (required when more than one board exists)
        #[arg(long, value_name = "ID")]
        board: Option<u64>,

        /// Only active sprints
        #[arg(long, conflicts_with = "state")]
        active: bool,

        /// Only sprints in this state (active, future, closed)
        #[arg(long)]
        state: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Show the active sprints
    Active {
        /// Board id (required when more than one board exists)
        #[arg(long, value_name = "ID")]
        board: Option<u64>,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// List agile boards
    Boards {
        #[command(flatten)]
        output: OutputArgs,
    },
}
