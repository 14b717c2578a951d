// ABOUTME: Shell completion generation using clap_complete for all supported shells
// ABOUTME: Provides static completions for bash, zsh, fish, and powershell

use clap::{Command, ValueEnum};
use clap_complete::{generate, shells};
use std::io::Write;

const BIN_NAME: &str = "jira";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    #[value(name = "powershell", alias = "pwsh")]
    PowerShell,
}

/// Write the completion script for `shell` to `writer`
pub fn generate_completions<W: Write>(shell: Shell, cmd: &mut Command, writer: &mut W) {
    match shell {
        Shell::Bash => generate(shells::Bash, cmd, BIN_NAME, writer),
        Shell::Zsh => generate(shells::Zsh, cmd, BIN_NAME, writer),
        Shell::Fish => generate(shells::Fish, cmd, BIN_NAME, writer),
        Shell::PowerShell => generate(shells::PowerShell, cmd, BIN_NAME, writer),
    }
}

pub fn installation_instructions() -> &'static str {
    r#"Shell Completion Installation

The completions subcommand outputs shell completion code to stdout. To install:

Bash:
  Linux: jira completions bash > ~/.local/share/bash-completion/completions/jira
  macOS: jira completions bash > $(brew --prefix)/etc/bash_completion.d/jira

Zsh:
  jira completions zsh > ~/.zfunc/_jira
  # Add ~/.zfunc to $fpath in your ~/.zshrc:
  # fpath=(~/.zfunc $fpath)

Fish:
  jira completions fish > ~/.config/fish/completions/jira.fish

PowerShell:
  jira completions powershell > jira_completions.ps1
  # Then source it in your PowerShell profile

Note: You may need to restart your shell or source the completion file.
"#
}
