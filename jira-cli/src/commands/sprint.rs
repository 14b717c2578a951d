// ABOUTME: The `sprint` command family: list, active, and boards
// ABOUTME: Picks the only board automatically and asks for --board when there are several

use anyhow::{bail, Result};
use jira_sdk::{Board, JiraClient, Sprint};

use super::CommandContext;
use crate::cli::{OutputArgs, SprintCommand};
use crate::progress::with_spinner;
use crate::types::SprintState;

/// Keep sprints matching the state filter; state names compare case-insensitively
pub fn filter_sprints(sprints: Vec<Sprint>, active_only: bool, state: Option<&str>) -> Vec<Sprint> {
    let wanted = if active_only {
        Some(SprintState::Active)
    } else {
        state.map(SprintState::from)
    };

    match wanted {
        Some(wanted) => sprints
            .into_iter()
            .filter(|sprint| SprintState::from(sprint.state.as_str()) == wanted)
            .collect(),
        None => sprints,
    }
}

/// `active sprints`, `closed sprints`, or plain `sprints`
fn describe_filter(active_only: bool, state: Option<&str>) -> String {
    if active_only {
        "active sprints".to_string()
    } else if let Some(state) = state {
        format!("{} sprints", state.to_lowercase())
    } else {
        "sprints".to_string()
    }
}

#[derive(Debug, PartialEq)]
pub enum BoardChoice {
    NoBoards,
    Single(Board),
    Multiple(Vec<Board>),
}

pub fn choose_board(mut boards: Vec<Board>) -> BoardChoice {
    match boards.len() {
        0 => BoardChoice::NoBoards,
        1 => BoardChoice::Single(boards.remove(0)),
        _ => BoardChoice::Multiple(boards),
    }
}

pub async fn run(ctx: &mut CommandContext, command: SprintCommand) -> Result<()> {
    let client = ctx.client()?;

    match command {
        SprintCommand::List {
            board,
            active,
            state,
            output,
        } => list_sprints(ctx, &client, board, active, state.as_deref(), output).await,
        SprintCommand::Active { board, output } => {
            list_sprints(ctx, &client, board, true, None, output).await
        }
        SprintCommand::Boards { output } => {
            let boards = with_spinner("Fetching boards...", client.get_boards()).await?;
            if !output.json {
                if boards.is_empty() {
                    ctx.output.info("No boards found");
                    return Ok(());
                }
                eprintln!("Found {} boards:", boards.len());
            }
            println!("{}", ctx.formatter(output).format_boards(&boards)?);
            Ok(())
        }
    }
}

async fn list_sprints(
    ctx: &CommandContext,
    client: &JiraClient,
    board: Option<u64>,
    active_only: bool,
    state: Option<&str>,
    output: OutputArgs,
) -> Result<()> {
    let (board_id, board_name) = match board {
        Some(id) => (id, None),
        None => {
            let boards = with_spinner("Fetching boards...", client.get_boards()).await?;
            match choose_board(boards) {
                BoardChoice::NoBoards => {
                    ctx.output.info("No boards found");
                    return Ok(());
                }
                BoardChoice::Single(board) => {
                    log::debug!("Using the only board: {} ({})", board.name, board.id);
                    (board.id, Some(board.name))
                }
                BoardChoice::Multiple(boards) => {
                    eprintln!("Multiple boards found:\n");
                    for board in &boards {
                        eprintln!(
                            "  {:<6} {} ({})",
                            board.id, board.name, board.board_type
                        );
                    }
                    eprintln!();
                    ctx.output.info("Please specify a board using --board <ID>");
                    ctx.output
                        .hint(&format!("Example: jira sprint list --board {}", boards[0].id));
                    bail!("Board ID required when multiple boards exist");
                }
            }
        }
    };

    let message = match &board_name {
        Some(name) => format!("Fetching sprints for {}...", name),
        None => "Fetching sprints...".to_string(),
    };
    let sprints = with_spinner(&message, client.get_sprints(board_id)).await?;
    let sprints = filter_sprints(sprints, active_only, state);
    let formatter = ctx.formatter(output);

    if output.json {
        println!("{}", formatter.format_sprints(&sprints)?);
        return Ok(());
    }

    let label = describe_filter(active_only, state);
    if sprints.is_empty() {
        ctx.output.info(&format!("No {} found", label));
        return Ok(());
    }

    match &board_name {
        Some(name) => eprintln!("Found {} {} for {}:", sprints.len(), label, name),
        None => eprintln!("Found {} {}:", sprints.len(), label),
    }
    println!("{}", formatter.format_sprints(&sprints)?);

    if !active_only && state.is_none() {
        println!("\n{}", ctx.table().format_sprint_summary(&sprints));
    }
    Ok(())
}
