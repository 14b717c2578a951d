// ABOUTME: Spinner shown on stderr while a remote call is in flight
// ABOUTME: Hidden automatically when stderr is not a terminal

use indicatif::{ProgressBar, ProgressStyle};
use std::future::Future;
use std::io::IsTerminal;
use std::time::Duration;

use crate::constants::timeouts;

pub struct Spinner {
    bar: ProgressBar,
}

impl Spinner {
    pub fn start(message: &str) -> Self {
        Self::with_visibility(message, std::io::stderr().is_terminal())
    }

    pub fn with_visibility(message: &str, visible: bool) -> Self {
        let bar = if visible {
            ProgressBar::new_spinner()
        } else {
            ProgressBar::hidden()
        };

        let style = ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        bar.set_style(style);
        bar.set_message(message.to_string());

        if visible {
            bar.enable_steady_tick(Duration::from_millis(timeouts::PROGRESS_BAR_TICK_MS));
        }

        Self { bar }
    }

    pub fn is_hidden(&self) -> bool {
        self.bar.is_hidden()
    }

    pub fn finish(self) {
        self.bar.finish_and_clear();
    }
}

/// Run `future` behind a spinner that is cleared before returning
pub async fn with_spinner<F, T>(message: &str, future: F) -> T
where
    F: Future<Output = T>,
{
    let spinner = Spinner::start(message);
    let result = future.await;
    spinner.finish();
    result
}
