// ABOUTME: Library exports for Jira CLI modules for testing and external use
// ABOUTME: Makes internal modules available to integration tests

pub mod cli;
pub mod cli_output;
pub mod commands;
pub mod completions;
pub mod config;
pub mod constants;
pub mod interactive;
pub mod output;
pub mod progress;
pub mod query;
pub mod types;
