// ABOUTME: Centralized CLI output utilities for consistent user-facing messages
// ABOUTME: Status lines go to stderr so stdout stays clean for tables and JSON

use owo_colors::OwoColorize;

/// Status line printer; data never goes through here
#[derive(Debug, Clone, Copy)]
pub struct CliOutput {
    use_color: bool,
}

impl CliOutput {
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    pub fn use_color(&self) -> bool {
        self.use_color
    }

    pub fn error_line(&self, message: &str) -> String {
        if self.use_color {
            format!("{} {}", "✗".red().bold(), message)
        } else {
            format!("✗ {}", message)
        }
    }

    pub fn warning_line(&self, message: &str) -> String {
        if self.use_color {
            format!("{} {}", "⚠".yellow().bold(), message)
        } else {
            format!("⚠ {}", message)
        }
    }

    pub fn info_line(&self, message: &str) -> String {
        if self.use_color {
            format!("{} {}", "ℹ".blue().bold(), message)
        } else {
            format!("ℹ {}", message)
        }
    }

    pub fn success_line(&self, message: &str) -> String {
        if self.use_color {
            format!("{} {}", "✓".green().bold(), message)
        } else {
            format!("✓ {}", message)
        }
    }

    pub fn error(&self, message: &str) {
        eprintln!("{}", self.error_line(message));
    }

    pub fn warning(&self, message: &str) {
        eprintln!("{}", self.warning_line(message));
    }

    pub fn info(&self, message: &str) {
        eprintln!("{}", self.info_line(message));
    }

    pub fn success(&self, message: &str) {
        eprintln!("{}", self.success_line(message));
    }

    /// Follow-up guidance, dimmed
    pub fn hint(&self, message: &str) {
        if self.use_color {
            eprintln!("  {}", message.dimmed());
        } else {
            eprintln!("  {}", message);
        }
    }
}
