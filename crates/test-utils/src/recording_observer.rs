use std::sync::{Arc, Mutex};

use stepdag::dag::StepId;
use stepdag::engine::{SessionCore, SessionObserver};
use stepdag::errors::Result;

/// What the runtime showed, one entry per observer call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Observed {
    /// Ready step ids at the time of a publish.
    Published { ready: Vec<String> },
    Expired(Vec<StepId>),
}

/// Observer that records publishes and expiries instead of printing.
#[derive(Clone, Default)]
pub struct RecordingObserver {
    seen: Arc<Mutex<Vec<Observed>>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seen(&self) -> Vec<Observed> {
        self.seen.lock().unwrap().clone()
    }
}

impl SessionObserver for RecordingObserver {
    fn publish(&mut self, core: &SessionCore) -> Result<()> {
        let ready = core
            .classification()
            .ready_ids()
            .into_iter()
            .map(str::to_string)
            .collect();
        self.seen.lock().unwrap().push(Observed::Published { ready });
        Ok(())
    }

    fn timers_expired(&mut self, _core: &SessionCore, steps: &[StepId]) -> Result<()> {
        self.seen
            .lock()
            .unwrap()
            .push(Observed::Expired(steps.to_vec()));
        Ok(())
    }
}
