//! CLI argument definitions for the `bobby` binary.
//!
//! Uses clap derive macros. Every session setting can come from
//! `config.toml`; the flags here override individual values.

pub mod chat;

use std::path::PathBuf;

use clap::Parser;

use bobby_types::config::SessionConfig;

/// Chat with a hosted language model from the terminal.
#[derive(Debug, Parser)]
#[command(name = "bobby", version, about, long_about = None)]
pub struct Cli {
    /// Config file (defaults to `$BOBBY_DATA_DIR/config.toml` or `~/.bobby/config.toml`).
    #[arg(short, long, env = "BOBBY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Model identifier to request.
    #[arg(short, long)]
    pub model: Option<String>,

    /// Number of most-recent messages sent with each request.
    #[arg(long)]
    pub max_history: Option<usize>,

    /// Per-turn timeout in seconds.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// PDF whose text is added to the system prompt.
    #[arg(short, long)]
    pub document: Option<PathBuf>,

    /// Suppress all log output except errors.
    #[arg(long)]
    pub quiet: bool,

    /// Detailed logs (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Export spans to stdout through OpenTelemetry.
    #[arg(long)]
    pub otel: bool,
}

impl Cli {
    /// Apply command-line overrides on top of the loaded config.
    pub fn apply_overrides(&self, config: &mut SessionConfig) {
        if let Some(model) = &self.model {
            config.model = model.clone();
        }
        if let Some(max_history) = self.max_history {
            config.max_history = max_history;
        }
        if let Some(timeout) = self.timeout {
            config.timeout_secs = timeout;
        }
        if let Some(document) = &self.document {
            config.document_path = Some(document.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_flags_keeps_config() {
        let cli = Cli::try_parse_from(["bobby"]).unwrap();
        let mut config = SessionConfig::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config, SessionConfig::default());
        assert_eq!(cli.verbose, 0);
        assert!(!cli.otel);
    }

    #[test]
    fn test_overrides_replace_config_values() {
        let cli = Cli::try_parse_from([
            "bobby",
            "--model",
            "gpt-4",
            "--max-history",
            "6",
            "--timeout",
            "12",
            "--document",
            "paper.pdf",
            "-vv",
        ])
        .unwrap();
        let mut config = SessionConfig::default();
        cli.apply_overrides(&mut config);

        assert_eq!(config.model, "gpt-4");
        assert_eq!(config.max_history, 6);
        assert_eq!(config.timeout_secs, 12);
        assert_eq!(config.document_path, Some(PathBuf::from("paper.pdf")));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_zero_history_override_fails_validation() {
        let cli = Cli::try_parse_from(["bobby", "--max-history", "0"]).unwrap();
        let mut config = SessionConfig::default();
        cli.apply_overrides(&mut config);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_non_numeric_timeout() {
        assert!(Cli::try_parse_from(["bobby", "--timeout", "soon"]).is_err());
    }
}
