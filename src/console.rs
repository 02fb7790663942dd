// src/console.rs

//! Interactive terminal front-end for the `run` subcommand.
//!
//! - [`parse_command`] turns one stdin line into a `SessionEvent`.
//! - [`ConsoleObserver`] prints the checklist and timer expiries to stdout.

use std::io::Write;

use crate::dag::StepId;
use crate::engine::{SessionCore, SessionEvent, SessionObserver};
use crate::errors::Result;
use crate::report::render_checklist;

pub const HELP: &str = "commands: done <id> | start <id> | pause <id> | reset <id> | show | back | quit";

/// Parse one line of user input.
///
/// Returns `Ok(None)` for blank lines and `Err` with a message for anything
/// unrecognised.
pub fn parse_command(line: &str) -> std::result::Result<Option<SessionEvent>, String> {
    let mut parts = line.split_whitespace();
    let Some(verb) = parts.next() else {
        return Ok(None);
    };
    let arg = parts.next().map(str::to_string);

    let need_id = |arg: Option<StepId>| arg.ok_or_else(|| format!("`{verb}` needs a step id"));

    let event = match verb.to_lowercase().as_str() {
        "done" | "toggle" | "check" => SessionEvent::ToggleStep { step: need_id(arg)? },
        "start" => SessionEvent::StartTimer { step: need_id(arg)? },
        "pause" => SessionEvent::PauseTimer { step: need_id(arg)? },
        "reset" => SessionEvent::ResetTimer { step: need_id(arg)? },
        "show" | "ls" => SessionEvent::ShowRequested,
        "back" => SessionEvent::BackToSearch,
        "quit" | "exit" | "q" => SessionEvent::ShutdownRequested,
        other => return Err(format!("unknown command `{other}`; {HELP}")),
    };
    Ok(Some(event))
}

/// Prints session state to a writer (stdout in production).
pub struct ConsoleObserver<W: Write + Send> {
    out: W,
}

impl<W: Write + Send> ConsoleObserver<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> SessionObserver for ConsoleObserver<W> {
    fn publish(&mut self, core: &SessionCore) -> Result<()> {
        let classification = core.classification();
        let text = render_checklist(
            &classification,
            &core.timers(),
            core.repository().graph().len(),
        );
        writeln!(self.out, "{text}")?;
        self.out.flush()?;
        Ok(())
    }

    fn timers_expired(&mut self, core: &SessionCore, steps: &[StepId]) -> Result<()> {
        let graph = core.repository().graph();
        for id in steps {
            writeln!(self.out, "Timer done: [{id}] {}", graph.display_name(id))?;
        }
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dag::Step;

    #[test]
    fn parses_step_commands() {
        match parse_command("done 3") {
            Ok(Some(SessionEvent::ToggleStep { step })) => assert_eq!(step, "3"),
            other => panic!("unexpected: {other:?}"),
        }
        assert!(matches!(
            parse_command("  START  s1 "),
            Ok(Some(SessionEvent::StartTimer { .. }))
        ));
        assert!(matches!(parse_command("quit"), Ok(Some(SessionEvent::ShutdownRequested))));
        assert!(matches!(parse_command("   "), Ok(None)));
    }

    #[test]
    fn rejects_missing_ids_and_unknown_verbs() {
        assert!(parse_command("pause").unwrap_err().contains("needs a step id"));
        assert!(parse_command("fly 2").unwrap_err().contains("unknown command"));
    }

    #[test]
    fn blocked_step_commands_are_ignored_by_the_session() {
        let mut last = Step::new("2", "Serve");
        last.dependencies = vec!["1".to_string()];
        last.duration_minute = Some(3);
        let mut core = SessionCore::with_steps(vec![Step::new("1", "Cook"), last]);

        for line in ["done 2", "start 2"] {
            let event = parse_command(line).unwrap().unwrap();
            let step = core.step(event);
            assert!(step.commands.is_empty(), "`{line}` should be a no-op");
        }
        assert!(!core.repository().is_completed("2"));
        assert!(core.timers().get("2").is_none());
        assert!(!core.is_clock_running());
    }

    #[test]
    fn expiry_message_uses_step_name() {
        let core = SessionCore::with_steps(vec![Step::new("1", "Bake")]);
        let mut observer = ConsoleObserver::new(Vec::new());
        observer
            .timers_expired(&core, &["1".to_string(), "gone".to_string()])
            .unwrap();

        let text = String::from_utf8(observer.into_inner()).unwrap();
        assert_eq!(text, "Timer done: [1] Bake\nTimer done: [gone] gone\n");
    }
}
