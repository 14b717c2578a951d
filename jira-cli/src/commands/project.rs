// ABOUTME: The `project` command family: list, view, components, and versions
// ABOUTME: Listing filters by project type or category name substring

use anyhow::Result;
use jira_sdk::Project;

use super::CommandContext;
use crate::cli::ProjectCommand;
use crate::output::JsonFormatter;
use crate::progress::with_spinner;

/// Keep projects whose type and category contain the given text (case-insensitive)
pub fn filter_projects(
    projects: Vec<Project>,
    project_type: Option<&str>,
    category: Option<&str>,
) -> Vec<Project> {
    let contains = |value: Option<&str>, needle: Option<&str>| match needle {
        Some(needle) => value
            .map(|v| v.to_lowercase().contains(&needle.to_lowercase()))
            .unwrap_or(false),
        None => true,
    };

    projects
        .into_iter()
        .filter(|project| {
            contains(project.project_type_key.as_deref(), project_type)
                && contains(
                    project.project_category.as_ref().map(|c| c.name.as_str()),
                    category,
                )
        })
        .collect()
}

pub async fn run(ctx: &mut CommandContext, command: ProjectCommand) -> Result<()> {
    let client = ctx.client()?;

    match command {
        ProjectCommand::List {
            project_type,
            category,
            output,
        } => {
            let projects = with_spinner("Fetching projects...", client.get_projects()).await?;
            let projects =
                filter_projects(projects, project_type.as_deref(), category.as_deref());

            if !output.json {
                if projects.is_empty() {
                    ctx.output.info("No projects found");
                    return Ok(());
                }
                eprintln!("Found {} projects:", projects.len());
            }
            println!("{}", ctx.formatter(output).format_projects(&projects)?);
        }
        ProjectCommand::View { key, output } => {
            let project = with_spinner(
                &format!("Fetching project {}...", key),
                client.get_project(&key),
            )
            .await?;

            if output.json {
                println!("{}", JsonFormatter::new(output.pretty).format(&project)?);
            } else {
                println!(
                    "{}",
                    ctx.table().format_project_details(&project, client.server())
                );
            }
        }
        ProjectCommand::Components { key, output } => {
            let components = with_spinner(
                &format!("Fetching components for {}...", key),
                client.get_project_components(&key),
            )
            .await?;

            if output.json {
                println!("{}", JsonFormatter::new(output.pretty).format(&components)?);
            } else if components.is_empty() {
                ctx.output.info(&format!("No components in {}", key));
            } else {
                println!("{}", ctx.table().format_components(&components));
            }
        }
        ProjectCommand::Versions { key, output } => {
            let versions = with_spinner(
                &format!("Fetching versions for {}...", key),
                client.get_project_versions(&key),
            )
            .await?;

            if output.json {
                println!("{}", JsonFormatter::new(output.pretty).format(&versions)?);
            } else if versions.is_empty() {
                ctx.output.info(&format!("No versions in {}", key));
            } else {
                println!("{}", ctx.table().format_versions(&versions));
            }
        }
    }

    Ok(())
}
