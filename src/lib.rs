// src/lib.rs

pub mod cli;
pub mod config;
pub mod console;
pub mod dag;
pub mod engine;
pub mod errors;
pub mod layout;
pub mod logging;
pub mod report;
pub mod timer;
pub mod types;

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::cli::{CliArgs, Command};
use crate::config::{ConfigFile, load_recipe, resolve_config};
use crate::console::{ConsoleObserver, HELP, parse_command};
use crate::dag::{StepGraph, StepId, classify};
use crate::engine::{Runtime, SessionCore, SessionEvent, TokioClock};
use crate::timer::TimerSnapshot;
use crate::types::OutputFormat;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - recipe loading
/// - the one-shot `checklist` / `layout` views
/// - the interactive session (core, clock, stdin, Ctrl-C) for `run`
pub async fn run(args: CliArgs) -> Result<()> {
    let cfg = resolve_config(args.config.as_deref())?;

    match args.command {
        Command::Checklist { recipe, done } => {
            let graph = load_graph(&recipe)?;
            let completed = completion_set(&graph, done);
            let classification = classify(&graph, &completed);
            print!(
                "{}",
                report::render_checklist(&classification, &TimerSnapshot::default(), graph.len())
            );
            Ok(())
        }
        Command::Layout {
            recipe,
            done,
            format,
        } => {
            let graph = load_graph(&recipe)?;
            let completed = completion_set(&graph, done);
            let layout = layout::compute(&graph, &completed, &cfg.layout);
            match format {
                OutputFormat::Text => print!("{}", report::render_layout_text(&graph, &layout)),
                OutputFormat::Json => println!("{}", report::render_layout_json(&layout)?),
            }
            Ok(())
        }
        Command::Run { recipe } => run_session(&recipe, &cfg).await,
    }
}

fn load_graph(path: &Path) -> Result<StepGraph> {
    let steps = load_recipe(path)?;
    Ok(StepGraph::new(steps))
}

/// Completion set from `--done` flags; ids not in the recipe are dropped.
fn completion_set(graph: &StepGraph, done: Vec<StepId>) -> BTreeSet<StepId> {
    done.into_iter()
        .filter(|id| {
            let known = graph.contains(id);
            if !known {
                warn!(step = %id, "--done names an unknown step; ignoring");
            }
            known
        })
        .collect()
}

/// Interactive session: stdin commands + timer clock until `quit`,
/// end of input, or Ctrl-C.
async fn run_session(recipe: &Path, cfg: &ConfigFile) -> Result<()> {
    let steps = load_recipe(recipe)?;

    let (tx, rx) = mpsc::channel::<SessionEvent>(64);

    // Load through the event channel so the first render goes through the
    // same path as every later update.
    tx.send(SessionEvent::LoadRecipe { steps }).await?;

    // Ctrl-C → graceful shutdown.
    {
        let tx = tx.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("failed to listen for Ctrl+C: {e}");
                return;
            }
            let _ = tx.send(SessionEvent::ShutdownRequested).await;
        });
    }

    // stdin → session events.
    {
        let tx = tx.clone();
        tokio::spawn(async move {
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            loop {
                match lines.next_line().await {
                    Ok(Some(line)) => match parse_command(&line) {
                        Ok(Some(event)) => {
                            if tx.send(event).await.is_err() {
                                break;
                            }
                        }
                        Ok(None) => {}
                        Err(msg) => eprintln!("{msg}"),
                    },
                    Ok(None) => {
                        debug!("stdin closed");
                        let _ = tx.send(SessionEvent::ShutdownRequested).await;
                        break;
                    }
                    Err(e) => {
                        warn!(error = %e, "failed to read stdin");
                        let _ = tx.send(SessionEvent::ShutdownRequested).await;
                        break;
                    }
                }
            }
        });
    }

    println!("{HELP}");

    let clock = TokioClock::new(tx.clone(), cfg.timer.tick_period());
    drop(tx);

    let observer = ConsoleObserver::new(std::io::stdout());
    let runtime = Runtime::new(SessionCore::new(), rx, clock, observer);
    let core = runtime.run().await?;

    let (done, total) = core.repository().progress();
    info!(done, total, "session finished");
    Ok(())
}
