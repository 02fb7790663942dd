// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::types::OutputFormat;

/// Command-line arguments for `stepdag`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "stepdag",
    version,
    about = "Track recipe steps as a dependency graph: what can be done now, what waits, and per-step timers.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `Stepdag.toml` in the current working directory; a missing
    /// default file means built-in defaults.
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `STEPDAG_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print the Now / Next up / Completed checklist for a recipe.
    Checklist {
        /// Recipe file (JSON list of steps, or `{ "planned_steps": [...] }`).
        recipe: PathBuf,

        /// Step ids to treat as already completed.
        #[arg(long = "done", value_name = "ID")]
        done: Vec<String>,
    },

    /// Print the layered graph layout for a recipe.
    Layout {
        recipe: PathBuf,

        #[arg(long = "done", value_name = "ID")]
        done: Vec<String>,

        /// `text` (levels and boxes) or `json` (full layout).
        #[arg(long, value_name = "FORMAT", default_value = "text")]
        format: OutputFormat,
    },

    /// Interactive session: toggle steps and drive timers from stdin.
    Run { recipe: PathBuf },
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_options_may_follow_the_subcommand() {
        let args = CliArgs::try_parse_from([
            "stepdag",
            "checklist",
            "r.json",
            "--config",
            "x.toml",
            "--log-level",
            "debug",
            "--done",
            "1",
        ])
        .unwrap();

        assert_eq!(args.config, Some(PathBuf::from("x.toml")));
        assert!(matches!(args.log_level, Some(LogLevel::Debug)));
        match args.command {
            Command::Checklist { recipe, done } => {
                assert_eq!(recipe, PathBuf::from("r.json"));
                assert_eq!(done, vec!["1".to_string()]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn layout_format_defaults_to_text() {
        let args = CliArgs::try_parse_from(["stepdag", "--config", "x.toml", "layout", "r.json"])
            .unwrap();
        assert_eq!(args.config, Some(PathBuf::from("x.toml")));
        assert!(matches!(
            args.command,
            Command::Layout {
                format: OutputFormat::Text,
                ..
            }
        ));
    }
}
