//! Console output for streamed responses.
//!
//! Tokens are printed raw as they arrive; a spinner covers the wait for
//! the first one.

use std::io::Write;
use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use bobby_core::chat::sink::TokenSink;

/// Streams tokens to stdout.
#[derive(Default)]
pub struct ConsoleSink {
    spinner: Option<ProgressBar>,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self::default()
    }

    fn clear_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }
}

impl TokenSink for ConsoleSink {
    fn begin_response(&mut self) {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message("thinking...");
        spinner.enable_steady_tick(Duration::from_millis(80));
        self.spinner = Some(spinner);
    }

    fn write_token(&mut self, token: &str) {
        self.clear_spinner();
        print!("{token}");
        let _ = std::io::stdout().flush();
    }

    fn end_response(&mut self) {
        self.clear_spinner();
        println!("\n");
    }

    fn show_failure(&mut self, message: &str) {
        self.clear_spinner();
        println!();
        println!("{} {}\n", style("!").red().bold(), style(message).red());
    }
}

impl Drop for ConsoleSink {
    fn drop(&mut self) {
        self.clear_spinner();
    }
}
